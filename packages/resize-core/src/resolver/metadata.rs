use std::collections::HashMap;

use crate::constants::{GENERATED_BY_KEY, GENERATED_BY_VALUE};
use crate::storage::{ObjectMetadata, PutObject};
use crate::transform::{OutputFormat, Transformed};

/// 元画像のメタデータから派生画像のメタデータを作る
///
/// Cache-Control と Expires はそのまま引き継ぎ、Content-Type は出力フォーマットに合わせる。
pub fn derivative_metadata(original: &ObjectMetadata, format: OutputFormat) -> ObjectMetadata {
    ObjectMetadata {
        content_type: Some(format.content_type().to_string()),
        cache_control: original.cache_control.clone(),
        expires: original.expires.clone(),
    }
}

/// 機械生成であることを示すタグ
pub fn provenance_tag() -> HashMap<String, String> {
    HashMap::from([(GENERATED_BY_KEY.to_string(), GENERATED_BY_VALUE.to_string())])
}

/// 派生画像の保存リクエストを組み立てる
pub fn derivative_put(key: &str, transformed: Transformed, original: &ObjectMetadata) -> PutObject {
    PutObject {
        key: key.to_string(),
        metadata: derivative_metadata(original, transformed.format),
        body: transformed.bytes,
        user_metadata: provenance_tag(),
    }
}
