use resize_processor::config::Config;
use resize_processor::{router, telemetry, AppState};

#[tokio::main]
async fn main() -> Result<(), String> {
    telemetry::init(false);

    let config = Config::from_env()?;
    let state = AppState::connect(&config).await;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| format!("failed to bind {}: {e}", config.listen_addr))?;

    tracing::info!(
        addr = %config.listen_addr,
        bucket = %config.bucket,
        url = %config.base_url,
        "resize processor listening"
    );

    axum::serve(listener, app)
        .await
        .map_err(|e| format!("server error: {e}"))
}
