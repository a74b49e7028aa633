use crate::constants::{MAX_DECODE_ALLOC, MAX_SOURCE_DIMENSION};
use crate::errors::TransformError;
use image::{DynamicImage, ImageReader, Limits};
use std::io::Cursor;

/// 画像バイト列をデコードする
///
/// フォーマットは Content-Type ではなくバイト列の内容から推測する。
/// 巨大な元画像はピクセルを展開する前にヘッダの寸法で弾く。
pub fn decode_image(input: &[u8]) -> Result<DynamicImage, TransformError> {
    let mut reader = ImageReader::new(Cursor::new(input))
        .with_guessed_format()
        .map_err(|e| TransformError::ProcessingFailed(format!("failed to guess format: {e}")))?;

    if reader.format().is_none() {
        return Err(TransformError::ProcessingFailed(
            "unrecognized image format".to_string(),
        ));
    }

    reader.limits(decode_limits());

    reader
        .decode()
        .map_err(|e| TransformError::ProcessingFailed(format!("decode failed: {e}")))
}

fn decode_limits() -> Limits {
    let mut limits = Limits::default();
    limits.max_image_width = Some(MAX_SOURCE_DIMENSION);
    limits.max_image_height = Some(MAX_SOURCE_DIMENSION);
    limits.max_alloc = Some(MAX_DECODE_ALLOC);
    limits
}
