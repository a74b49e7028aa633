//! API Gateway プロキシ統合用の Lambda ハンドラ

use std::collections::HashMap;

use lambda_runtime::Error;
use resize_core::{ObjectStore, Resolver, Transformer};
use serde::{Deserialize, Serialize};

/// API Gateway プロキシイベントのうち使う部分だけ
#[derive(Debug, Clone, Deserialize)]
pub struct ProxyRequest {
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl From<resize_core::Response> for ProxyResponse {
    fn from(response: resize_core::Response) -> Self {
        Self {
            status_code: response.status.as_u16(),
            headers: response
                .headers
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
            body: response.body,
        }
    }
}

/// イベントを処理する
///
/// 変換・ストレージの障害は Lambda の呼び出しエラーとして返す。
pub async fn handle_event<S, T>(
    resolver: &Resolver<S, T>,
    payload: serde_json::Value,
) -> Result<ProxyResponse, Error>
where
    S: ObjectStore,
    T: Transformer + 'static,
{
    let request: ProxyRequest = serde_json::from_value(payload)
        .map_err(|error| Error::from(format!("invalid proxy event: {error}")))?;

    let response = resolver.handle_request(&request.path).await.map_err(|error| {
        tracing::error!(path = %request.path, error = %error, "failed to resolve derivative");
        Error::from(error)
    })?;

    tracing::info!(path = %request.path, status = response.status.as_u16(), "request resolved");
    Ok(response.into())
}
