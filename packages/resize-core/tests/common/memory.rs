use async_trait::async_trait;
use resize_core::{ObjectMetadata, ObjectStore, PutObject, StorageError, StorageResult, StoredObject};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Barrier;

/// 失敗を注入する操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Head,
    Get,
    Put,
}

#[derive(Debug, Clone)]
pub struct MemoryObject {
    pub body: bytes::Bytes,
    pub metadata: ObjectMetadata,
    pub user_metadata: HashMap<String, String>,
}

/// 呼び出し回数を記録するインメモリストア
#[derive(Default)]
pub struct MemoryStore {
    objects: Mutex<HashMap<String, MemoryObject>>,
    failures: Mutex<HashSet<Op>>,
    head_barrier: Option<Arc<Barrier>>,
    head_calls: AtomicUsize,
    get_calls: AtomicUsize,
    put_calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// `n` 件の head が揃うまで全員を待たせる（同時リクエストの再現用）
    pub fn with_head_barrier(n: usize) -> Arc<Self> {
        Arc::new(Self {
            head_barrier: Some(Arc::new(Barrier::new(n))),
            ..Self::default()
        })
    }

    pub fn insert(&self, key: &str, body: Vec<u8>, metadata: ObjectMetadata) {
        self.objects.lock().unwrap().insert(
            key.to_string(),
            MemoryObject {
                body: body.into(),
                metadata,
                user_metadata: HashMap::new(),
            },
        );
    }

    pub fn object(&self, key: &str) -> Option<MemoryObject> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn fail_on(&self, op: Op) {
        self.failures.lock().unwrap().insert(op);
    }

    pub fn head_calls(&self) -> usize {
        self.head_calls.load(Ordering::SeqCst)
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn put_calls(&self) -> usize {
        self.put_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.head_calls() + self.get_calls() + self.put_calls()
    }

    fn injected(&self, op: Op) -> StorageResult<()> {
        if self.failures.lock().unwrap().contains(&op) {
            return Err(StorageError::Internal(format!("injected {op:?} failure")));
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn head(&self, key: &str) -> StorageResult<ObjectMetadata> {
        self.head_calls.fetch_add(1, Ordering::SeqCst);
        self.injected(Op::Head)?;

        let result = self
            .object(key)
            .map(|o| o.metadata)
            .ok_or_else(|| StorageError::NotFound {
                key: key.to_string(),
            });

        // 結果を確定させてから待つので、全員が同じ状態を観測する
        if let Some(barrier) = &self.head_barrier {
            barrier.wait().await;
        }
        result
    }

    async fn get(&self, key: &str) -> StorageResult<StoredObject> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.injected(Op::Get)?;

        self.object(key)
            .map(|o| StoredObject {
                body: o.body,
                metadata: o.metadata,
            })
            .ok_or_else(|| StorageError::NotFound {
                key: key.to_string(),
            })
    }

    async fn put(&self, object: PutObject) -> StorageResult<()> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);
        self.injected(Op::Put)?;

        self.objects.lock().unwrap().insert(
            object.key,
            MemoryObject {
                body: object.body,
                metadata: object.metadata,
                user_metadata: object.user_metadata,
            },
        );
        Ok(())
    }
}
