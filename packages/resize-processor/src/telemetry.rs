use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// ログ出力を初期化する
///
/// `RUST_LOG` が未設定なら info。Lambda では CloudWatch 向けに JSON で出力する。
pub fn init(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(fmt::layer().json().without_time().with_current_span(false))
            .init();
    } else {
        registry.with(fmt::layer()).init();
    }
}
