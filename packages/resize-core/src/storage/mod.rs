//! オブジェクトストアの抽象化
//!
//! 解決処理が必要とするのは存在確認・取得・保存の3操作だけ。

pub mod s3;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

pub use crate::errors::{StorageError, StorageResult};
pub use s3::S3ObjectStore;

/// オブジェクトに付随する HTTP メタデータ
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectMetadata {
    pub content_type: Option<String>,
    pub cache_control: Option<String>,
    /// `Expires` ヘッダの値（HTTP-date 文字列のまま保持する）
    pub expires: Option<String>,
}

/// 取得したオブジェクト
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub body: Bytes,
    pub metadata: ObjectMetadata,
}

/// 保存リクエスト
#[derive(Debug, Clone)]
pub struct PutObject {
    pub key: String,
    pub body: Bytes,
    pub metadata: ObjectMetadata,
    /// ユーザー定義メタデータ（生成元タグなど）
    pub user_metadata: HashMap<String, String>,
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// 本文を取得せずにメタデータだけを取得する
    async fn head(&self, key: &str) -> StorageResult<ObjectMetadata>;

    async fn get(&self, key: &str) -> StorageResult<StoredObject>;

    /// 同じキーへの書き込みは後勝ちで上書きする
    async fn put(&self, object: PutObject) -> StorageResult<()>;
}

#[async_trait]
impl<T: ObjectStore + ?Sized> ObjectStore for Arc<T> {
    async fn head(&self, key: &str) -> StorageResult<ObjectMetadata> {
        (**self).head(key).await
    }

    async fn get(&self, key: &str) -> StorageResult<StoredObject> {
        (**self).get(key).await
    }

    async fn put(&self, object: PutObject) -> StorageResult<()> {
        (**self).put(object).await
    }
}
