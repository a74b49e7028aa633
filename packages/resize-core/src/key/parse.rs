use super::{Extension, FitMode, KeyDescriptor, ParsedKey};
use crate::errors::KeyError;
use crate::validation::{decode_key, parse_dimension};

/// リクエストパスを解析する
///
/// `^(.*)-(\d*)x(\d*)(?:-(m))?\.(jpg|png)$`（拡張子のみ大文字小文字を無視）と
/// 同じ規則で照合する。prefix は最長一致なので、寸法ブロックは最後の `-` 以降になる。
pub fn parse_key(path: &str) -> Result<ParsedKey, KeyError> {
    let key = decode_key(path)?;

    let (stem, raw_ext) = key.rsplit_once('.').ok_or(KeyError::NoMatch)?;
    let extension = Extension::from_str(raw_ext).ok_or(KeyError::NoMatch)?;

    let (stem, fit) = match stem.strip_suffix("-m") {
        Some(rest) => (rest, FitMode::BoundedMax),
        None => (stem, FitMode::Exact),
    };

    let (prefix, block) = stem.rsplit_once('-').ok_or(KeyError::NoMatch)?;
    let (raw_w, raw_h) = block.split_once('x').ok_or(KeyError::NoMatch)?;

    if !is_digits(raw_w) || !is_digits(raw_h) {
        return Err(KeyError::NoMatch);
    }
    // `.` は改行にマッチしない
    if prefix.contains(['\n', '\r', '\u{2028}', '\u{2029}']) {
        return Err(KeyError::NoMatch);
    }

    let width = parse_dimension(raw_w);
    let height = parse_dimension(raw_h);
    let original_key = format!("{prefix}.{raw_ext}");

    if width.is_none() && height.is_none() {
        return Ok(ParsedKey::Identity { original_key });
    }

    Ok(ParsedKey::Derivative(KeyDescriptor {
        original_id: prefix.to_string(),
        original_key,
        width,
        height,
        fit,
        extension,
        key,
    }))
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn derivative(path: &str) -> KeyDescriptor {
        match parse_key(path) {
            Ok(ParsedKey::Derivative(d)) => d,
            other => panic!("expected derivative for {path}, got {other:?}"),
        }
    }

    #[test]
    fn test_basic_derivative() {
        let d = derivative("/photos/cat-300x200.jpg");
        assert_eq!(d.key, "photos/cat-300x200.jpg");
        assert_eq!(d.original_id, "photos/cat");
        assert_eq!(d.original_key, "photos/cat.jpg");
        assert_eq!(d.width, Some(300));
        assert_eq!(d.height, Some(200));
        assert_eq!(d.fit, FitMode::Exact);
        assert_eq!(d.extension, Extension::Jpg);
    }

    #[test]
    fn test_bounded_max_mode() {
        let d = derivative("/cat-300x200-m.png");
        assert_eq!(d.fit, FitMode::BoundedMax);
        assert_eq!(d.extension, Extension::Png);
        assert_eq!(d.original_key, "cat.png");
    }

    #[test]
    fn test_greedy_prefix() {
        // prefix 自体にハイフンや寸法風の文字列を含められる
        let d = derivative("/2024-01-01/img-10x10-640x480.jpg");
        assert_eq!(d.original_id, "2024-01-01/img-10x10");
        assert_eq!(d.width, Some(640));
        assert_eq!(d.height, Some(480));

        let d = derivative("/a-x-x5.jpg");
        assert_eq!(d.original_id, "a-x");
        assert_eq!(d.width, None);
        assert_eq!(d.height, Some(5));
    }

    #[test]
    fn test_extension_case_insensitive() {
        let d = derivative("/Cat-10x20.JPG");
        assert_eq!(d.extension, Extension::Jpg);
        // 元画像キーはリクエストの拡張子の表記をそのまま使う
        assert_eq!(d.original_key, "Cat.JPG");

        assert_eq!(derivative("/cat-10x20.Png").extension, Extension::Png);
    }

    #[test]
    fn test_separator_and_mode_are_case_sensitive() {
        assert_eq!(parse_key("/cat-10X20.jpg"), Err(KeyError::NoMatch));
        assert_eq!(parse_key("/cat-10x20-M.jpg"), Err(KeyError::NoMatch));
    }

    #[test]
    fn test_single_axis() {
        let d = derivative("/name-0x200.jpg");
        assert_eq!(d.width, None);
        assert_eq!(d.height, Some(200));

        let d = derivative("/name-x200.jpg");
        assert_eq!(d.width, None);
        assert_eq!(d.height, Some(200));

        let d = derivative("/name-150x.png");
        assert_eq!(d.width, Some(150));
        assert_eq!(d.height, None);
    }

    #[test]
    fn test_identity() {
        for path in ["/name-x.jpg", "/name-0x0.jpg", "/name-0x.png", "/name-x0-m.jpg"] {
            let expected_ext = &path[path.len() - 3..];
            assert_eq!(
                parse_key(path),
                Ok(ParsedKey::Identity {
                    original_key: format!("name.{expected_ext}")
                }),
                "{path}"
            );
        }
    }

    #[test]
    fn test_empty_prefix() {
        let d = derivative("/-10x10.jpg");
        assert_eq!(d.original_id, "");
        assert_eq!(d.original_key, ".jpg");
    }

    #[test]
    fn test_percent_decoded_before_matching() {
        let d = derivative("/my%20cat-10x10.jpg");
        assert_eq!(d.key, "my cat-10x10.jpg");
        assert_eq!(d.original_key, "my cat.jpg");

        // エンコードされた区切り文字も照合対象になる
        let d = derivative("/cat%2D10x10.jpg");
        assert_eq!(d.original_id, "cat");
    }

    #[test]
    fn test_non_matching_paths() {
        for path in [
            "/cat.jpg",
            "/cat-100x100.gif",
            "/cat-100x100.jpeg",
            "/cat-100x100",
            "/cat100x100.jpg",
            "/cat-100-100.jpg",
            "/cat-1a0x100.jpg",
            "/cat-100x100x1.jpg",
            "/cat-100x100-q.jpg",
            "/cat-100x100.jpg.bak",
            "/line\nbreak-10x10.jpg",
        ] {
            assert_eq!(parse_key(path), Err(KeyError::NoMatch), "{path:?}");
        }
    }

    #[test]
    fn test_large_dimensions_are_accepted() {
        // 上限の判定は出力サイズが決まってから行う
        let d = derivative("/cat-5000x10.jpg");
        assert_eq!(d.width, Some(5000));
        assert_eq!(d.height, Some(10));

        let d = derivative("/cat-10x99999999999.jpg");
        assert_eq!(d.height, Some(u32::MAX));
    }
}
