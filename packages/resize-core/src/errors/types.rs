use thiserror::Error;

/// 解決処理の統合エラー型
///
/// ここに到達したエラーはすべてインフラ障害として扱い、404 には変換しない。
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("transform error: {0}")]
    Transform(#[from] TransformError),
}

/// リクエストキーの解析エラー
///
/// ユーザー起因の不正なパスであり、404 として応答する。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("key is empty")]
    Empty,

    #[error("key is too long ({len} bytes, max {max})")]
    TooLong { len: usize, max: usize },

    #[error("invalid URL encoding")]
    InvalidEncoding,

    #[error("key does not match the derivative pattern")]
    NoMatch,
}

/// ストレージアクセスエラー
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object not found: {key}")]
    NotFound { key: String },

    #[error("access denied")]
    Forbidden,

    #[error("storage error: {0}")]
    Internal(String),
}

impl StorageError {
    /// 「存在しない」以外はすべて異常系
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// 画像変換エラー
#[derive(Debug, Error)]
pub enum TransformError {
    /// 要求された出力サイズが上限を超えている（リクエスト起因）
    #[error("output resolution exceeds maximum ({width}x{height})")]
    ResolutionTooLarge { width: u32, height: u32 },

    #[error("processing failed: {0}")]
    ProcessingFailed(String),
}
