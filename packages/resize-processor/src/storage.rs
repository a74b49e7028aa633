use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use resize_core::S3ObjectStore;

use crate::config::Config;

/// S3 クライアントを作成する。
///
/// 認証情報とリージョンは AWS SDK の標準の探索順（環境変数・プロファイル・IAM ロール）に従う。
/// `S3_ENDPOINT` が設定されている場合は path-style でそのエンドポイントに接続する。
pub async fn connect(config: &Config) -> S3ObjectStore {
    let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;

    let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config);
    if let Some(endpoint) = &config.s3_endpoint {
        tracing::info!(endpoint = %endpoint, "using custom S3 endpoint");
        builder = builder.endpoint_url(endpoint).force_path_style(true);
    }

    let store = S3ObjectStore::new(Client::from_conf(builder.build()), config.bucket.clone());
    tracing::info!(bucket = %store.bucket(), "S3 store ready");
    store
}
