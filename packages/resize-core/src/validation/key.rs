use crate::constants::MAX_KEY_LENGTH;
use crate::errors::KeyError;

/// リクエストパスをオブジェクトキーに正規化する
///
/// 先頭のスラッシュを1つだけ取り除き、URLデコードした結果を返す。
pub fn decode_key(path: &str) -> Result<String, KeyError> {
    let raw = path.strip_prefix('/').unwrap_or(path);

    // URLデコード
    let decoded = urlencoding::decode(raw).map_err(|_| KeyError::InvalidEncoding)?;

    // 空文字チェック
    if decoded.is_empty() {
        return Err(KeyError::Empty);
    }

    // 長さチェック（S3 キーの上限）
    if decoded.len() > MAX_KEY_LENGTH {
        return Err(KeyError::TooLong {
            len: decoded.len(),
            max: MAX_KEY_LENGTH,
        });
    }

    Ok(decoded.into_owned())
}
