//! 派生画像の解決
//!
//! 存在確認 → 元画像の取得 → 変換 → 保存 を1リクエスト内で順に行う。
//! 同じキーへの同時リクエストはどちらも生成・保存まで進むが、
//! 変換は決定的なので後勝ちの上書きで問題にならない。

mod metadata;

use std::sync::Arc;

pub use metadata::{derivative_metadata, derivative_put, provenance_tag};

use crate::errors::{ResolveError, TransformError};
use crate::key::{parse_key, KeyDescriptor, ParsedKey};
use crate::response::Response;
use crate::storage::{ObjectStore, StoredObject};
use crate::transform::{Transformed, Transformer};

/// 解決結果
///
/// 変換・ストレージの障害はここに含めず、`ResolveError` として返す。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// キーが書式に合わない
    Malformed,
    /// 寸法指定なし。元画像へリダイレクトする
    Identity { original_key: String },
    /// 派生画像が既に存在する
    AlreadyExists { key: String },
    /// 派生画像を生成して保存した
    Created { key: String },
    /// 元画像が存在しない
    OriginalMissing { original_key: String },
    /// 出力サイズが上限を超えるため生成しない
    TooLarge { key: String },
}

impl Resolution {
    /// リダイレクト先のキー
    pub fn redirect_key(&self) -> Option<&str> {
        match self {
            Self::Identity { original_key } => Some(original_key),
            Self::AlreadyExists { key } | Self::Created { key } => Some(key),
            Self::Malformed | Self::OriginalMissing { .. } | Self::TooLarge { .. } => None,
        }
    }
}

/// 派生画像リゾルバ
///
/// ストアと変換エンジンは起動時に一度だけ作って注入する。
/// 内部状態を持たないので `Arc` で包んで全リクエストから共有できる。
pub struct Resolver<S, T> {
    store: S,
    transformer: Arc<T>,
    base_url: String,
}

impl<S, T> Resolver<S, T>
where
    S: ObjectStore,
    T: Transformer + 'static,
{
    pub fn new(store: S, transformer: T, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            store,
            transformer: Arc::new(transformer),
            base_url: base_url.strip_suffix('/').unwrap_or(&base_url).to_string(),
        }
    }

    /// リクエストパスを解決する
    pub async fn resolve(&self, path: &str) -> Result<Resolution, ResolveError> {
        let descriptor = match parse_key(path) {
            Ok(ParsedKey::Derivative(descriptor)) => descriptor,
            Ok(ParsedKey::Identity { original_key }) => {
                tracing::debug!(path = %path, original_key = %original_key, "no dimensions, redirecting to original");
                return Ok(Resolution::Identity { original_key });
            }
            Err(e) => {
                tracing::debug!(path = %path, error = %e, "malformed key");
                return Ok(Resolution::Malformed);
            }
        };
        let key = descriptor.key.clone();

        // 既に生成済みか確認（本文は取得しない）
        match self.store.head(&key).await {
            Ok(_) => {
                tracing::debug!(key = %key, "derivative already exists");
                return Ok(Resolution::AlreadyExists { key });
            }
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e.into()),
        }

        let original = match self.store.get(&descriptor.original_key).await {
            Ok(original) => original,
            Err(e) if e.is_not_found() => {
                tracing::debug!(key = %key, original_key = %descriptor.original_key, "original not found");
                return Ok(Resolution::OriginalMissing {
                    original_key: descriptor.original_key,
                });
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(
            key = %key,
            original_key = %descriptor.original_key,
            w = ?descriptor.width,
            h = ?descriptor.height,
            fit = ?descriptor.fit,
            "creating derivative"
        );

        let transformed = match self.transform(&original, &descriptor).await {
            Ok(transformed) => transformed,
            Err(TransformError::ResolutionTooLarge { width, height }) => {
                tracing::warn!(key = %key, width, height, "requested output is too large");
                return Ok(Resolution::TooLarge { key });
            }
            Err(e) => return Err(e.into()),
        };
        let size = transformed.bytes.len();

        // 保存は最後。途中で失敗しても不完全な派生画像は残らない
        self.store
            .put(derivative_put(&key, transformed, &original.metadata))
            .await?;

        tracing::info!(key = %key, size, "derivative stored");
        Ok(Resolution::Created { key })
    }

    /// CPU を占有する変換はブロッキング用のスレッドで実行する
    async fn transform(
        &self,
        original: &StoredObject,
        descriptor: &KeyDescriptor,
    ) -> Result<Transformed, TransformError> {
        let transformer = Arc::clone(&self.transformer);
        let body = original.body.clone();
        let content_type = original.metadata.content_type.clone();
        let descriptor = descriptor.clone();

        tokio::task::spawn_blocking(move || {
            transformer.transform(&body, content_type.as_deref(), &descriptor)
        })
        .await
        .map_err(|e| TransformError::ProcessingFailed(format!("transform task failed: {e}")))?
    }

    /// リクエストパスを解決し、トランスポート非依存のレスポンスを返す
    ///
    /// `Err` はトランスポート側で 5xx 相当として扱うこと。
    pub async fn handle_request(&self, path: &str) -> Result<Response, ResolveError> {
        let resolution = self.resolve(path).await?;
        Ok(Response::from_resolution(&resolution, &self.base_url))
    }
}
