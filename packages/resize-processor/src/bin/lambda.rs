use lambda_runtime::{service_fn, Error, LambdaEvent};
use resize_processor::config::Config;
use resize_processor::{lambda, telemetry, AppState};

#[tokio::main]
async fn main() -> Result<(), Error> {
    telemetry::init(true);

    let config = Config::from_env().map_err(Error::from)?;
    // クライアントはコールドスタート時に一度だけ作り、以後の呼び出しで使い回す
    let state = AppState::connect(&config).await;
    tracing::info!(bucket = %config.bucket, url = %config.base_url, "resize lambda ready");

    lambda_runtime::run(service_fn(move |event: LambdaEvent<serde_json::Value>| {
        let resolver = state.resolver.clone();
        async move { lambda::handle_event(resolver.as_ref(), event.payload).await }
    }))
    .await
}
