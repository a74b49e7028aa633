use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::{DisplayErrorContext, SdkError};
use aws_sdk_s3::primitives::{ByteStream, DateTime, DateTimeFormat};
use tracing::instrument;

use super::{ObjectMetadata, ObjectStore, PutObject, StoredObject};
use crate::errors::{StorageError, StorageResult};

/// S3 互換ストレージ
///
/// クライアントはプロセス起動時に1つだけ作り、全リクエストで共有する。
#[derive(Clone)]
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl std::fmt::Debug for S3ObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3ObjectStore")
            .field("bucket", &self.bucket)
            .finish_non_exhaustive()
    }
}

impl S3ObjectStore {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

/// SDK エラーを StorageError に変換する
///
/// HTTP ステータスで判定するので、HEAD（本文なし）でも GET でも同じ扱いになる。
fn map_sdk_error<E>(err: SdkError<E>, key: &str) -> StorageError
where
    E: std::error::Error + Send + Sync + 'static,
{
    if let SdkError::ServiceError(ref service_err) = err {
        match service_err.raw().status().as_u16() {
            404 => {
                return StorageError::NotFound {
                    key: key.to_string(),
                };
            }
            403 => {
                tracing::error!(key = %key, "access denied by S3");
                return StorageError::Forbidden;
            }
            _ => {}
        }
    }
    StorageError::Internal(DisplayErrorContext(&err).to_string())
}

/// HTTP-date 文字列を SDK の DateTime に変換する
///
/// 元画像の Expires が壊れていても派生画像の生成は止めない。
fn parse_expires(key: &str, value: &str) -> Option<DateTime> {
    DateTime::from_str(value, DateTimeFormat::HttpDate)
        .inspect_err(|e| {
            tracing::warn!(key = %key, expires = %value, error = %e, "ignoring unparseable Expires");
        })
        .ok()
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    #[instrument(skip(self), fields(bucket = %self.bucket))]
    async fn head(&self, key: &str) -> StorageResult<ObjectMetadata> {
        let output = self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, key))?;

        Ok(ObjectMetadata {
            content_type: output.content_type().map(str::to_string),
            cache_control: output.cache_control().map(str::to_string),
            expires: output.expires_string().map(str::to_string),
        })
    }

    #[instrument(skip(self), fields(bucket = %self.bucket))]
    async fn get(&self, key: &str) -> StorageResult<StoredObject> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, key))?;

        let metadata = ObjectMetadata {
            content_type: output.content_type().map(str::to_string),
            cache_control: output.cache_control().map(str::to_string),
            expires: output.expires_string().map(str::to_string),
        };

        let body = output
            .body
            .collect()
            .await
            .map_err(|e| StorageError::Internal(format!("failed to read body of {key}: {e}")))?
            .into_bytes();

        Ok(StoredObject { body, metadata })
    }

    #[instrument(skip(self, object), fields(bucket = %self.bucket, key = %object.key, size = object.body.len()))]
    async fn put(&self, object: PutObject) -> StorageResult<()> {
        let PutObject {
            key,
            body,
            metadata,
            user_metadata,
        } = object;

        let expires = metadata
            .expires
            .as_deref()
            .and_then(|value| parse_expires(&key, value));

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(body))
            .set_content_type(metadata.content_type)
            .set_cache_control(metadata.cache_control)
            .set_expires(expires)
            .set_metadata((!user_metadata.is_empty()).then_some(user_metadata))
            .send()
            .await
            .map_err(|e| map_sdk_error(e, &key))?;

        Ok(())
    }
}
