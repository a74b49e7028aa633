use resize_core::{ImageTransformer, KeyDescriptor, TransformError, Transformed, Transformer};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::ThreadId;

/// 本物の変換エンジンに呼び出し回数のカウンタを付けたもの
#[derive(Clone, Default)]
pub struct CountingTransformer {
    inner: ImageTransformer,
    calls: Arc<AtomicUsize>,
}

impl CountingTransformer {
    pub fn new() -> (Self, Arc<AtomicUsize>) {
        let transformer = Self::default();
        let calls = transformer.calls.clone();
        (transformer, calls)
    }
}

impl Transformer for CountingTransformer {
    fn transform(
        &self,
        input: &[u8],
        content_type: Option<&str>,
        descriptor: &KeyDescriptor,
    ) -> Result<Transformed, TransformError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.transform(input, content_type, descriptor)
    }
}

/// 常に失敗する変換エンジン
pub struct FailingTransformer;

impl Transformer for FailingTransformer {
    fn transform(
        &self,
        _input: &[u8],
        _content_type: Option<&str>,
        _descriptor: &KeyDescriptor,
    ) -> Result<Transformed, TransformError> {
        Err(TransformError::ProcessingFailed("engine exploded".to_string()))
    }
}

/// 変換を実行したスレッドを記録する
#[derive(Default)]
pub struct ThreadRecordingTransformer {
    inner: ImageTransformer,
    seen: Arc<Mutex<Option<ThreadId>>>,
}

impl ThreadRecordingTransformer {
    pub fn new() -> (Self, Arc<Mutex<Option<ThreadId>>>) {
        let transformer = Self::default();
        let seen = transformer.seen.clone();
        (transformer, seen)
    }
}

impl Transformer for ThreadRecordingTransformer {
    fn transform(
        &self,
        input: &[u8],
        content_type: Option<&str>,
        descriptor: &KeyDescriptor,
    ) -> Result<Transformed, TransformError> {
        *self.seen.lock().unwrap() = Some(std::thread::current().id());
        self.inner.transform(input, content_type, descriptor)
    }
}

pub fn calls(counter: &AtomicUsize) -> usize {
    counter.load(Ordering::SeqCst)
}
