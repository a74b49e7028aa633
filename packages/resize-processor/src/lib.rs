pub mod config;
pub mod handler;
pub mod lambda;
pub mod storage;
pub mod telemetry;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use resize_core::{ImageTransformer, ObjectStore, Resolver};

use crate::config::Config;

pub type SharedResolver = Arc<Resolver<Arc<dyn ObjectStore>, ImageTransformer>>;

/// 全リクエストで共有する状態（起動時に一度だけ作る）
#[derive(Clone)]
pub struct AppState {
    pub resolver: SharedResolver,
}

impl AppState {
    pub fn new(store: Arc<dyn ObjectStore>, base_url: &str) -> Self {
        Self {
            resolver: Arc::new(Resolver::new(store, ImageTransformer::default(), base_url)),
        }
    }

    /// 設定に従って S3 クライアントを作り、状態を組み立てる
    pub async fn connect(config: &Config) -> Self {
        let store = storage::connect(config).await;
        Self::new(Arc::new(store), &config.base_url)
    }
}

/// `/health` 以外のパスはすべて派生画像のリクエストとして扱う
///
/// 受け付けるのは GET（と HEAD）だけで、それ以外のメソッドは 405 を返す。
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handler::health))
        .fallback(get(handler::resize))
        .with_state(state)
}
