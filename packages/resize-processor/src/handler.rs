use axum::extract::State;
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode, Uri};
use axum::response::{IntoResponse, Response};

use crate::AppState;
use resize_core::{ResolveError, StorageError, TransformError};

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// 派生画像のリクエストを処理する
///
/// パスはデコードせずにそのまま渡す（デコードはキー解析側で行う）。
pub async fn resize(State(state): State<AppState>, uri: Uri) -> Result<Response, AppError> {
    let path = uri.path();
    let response = state.resolver.handle_request(path).await?;

    tracing::info!(
        path = %path,
        status = response.status.as_u16(),
        location = ?response.location(),
        "request resolved"
    );

    into_http_response(response)
}

/// コアのレスポンスを axum のレスポンスに変換する
pub fn into_http_response(response: resize_core::Response) -> Result<Response, AppError> {
    let status = StatusCode::from_u16(response.status.as_u16())
        .map_err(|e| AppError::Internal(format!("invalid status: {e}")))?;

    let mut headers = HeaderMap::new();
    for (name, value) in response.headers {
        let value = HeaderValue::from_str(&value)
            .map_err(|e| AppError::Internal(format!("invalid {name} header: {e}")))?;
        headers.insert(HeaderName::from_static(name), value);
    }

    Ok((status, headers, response.body).into_response())
}

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    TransformFailed(String),
    StorageUnavailable(String),
    Internal(String),
}

impl From<ResolveError> for AppError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::Storage(storage_err) => storage_err.into(),
            ResolveError::Transform(transform_err) => transform_err.into(),
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { key } => {
                // 解決処理で 404 に振り分け済みのはずなので、ここに来るのは異常
                tracing::error!(key = %key, "unexpected not found from storage");
                AppError::StorageUnavailable(format!("object not found: {key}"))
            }
            StorageError::Forbidden => {
                tracing::error!("access denied by S3 (check bucket policy and IAM role)");
                AppError::StorageUnavailable("storage access denied".to_string())
            }
            StorageError::Internal(msg) => {
                tracing::error!(error = %msg, "storage error");
                AppError::StorageUnavailable("storage error".to_string())
            }
        }
    }
}

impl From<TransformError> for AppError {
    fn from(err: TransformError) -> Self {
        match err {
            TransformError::ResolutionTooLarge { width, height } => {
                tracing::warn!(width = %width, height = %height, "image resolution too large");
                AppError::BadRequest(format!("image resolution {width}x{height} is too large"))
            }
            TransformError::ProcessingFailed(msg) => {
                tracing::error!(error = %msg, "image processing failed");
                AppError::TransformFailed(msg)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::TransformFailed(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::StorageUnavailable(msg) => {
                tracing::error!(error = %msg, "storage unavailable");
                (StatusCode::BAD_GATEWAY, "storage unavailable".to_string())
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}
