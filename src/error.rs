use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Failures that reach the request boundary. Everything renders through one
/// place so every error body has the same shape.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(&'static str),

    #[error(transparent)]
    Store(#[from] sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, (*message).to_owned()),
            ApiError::Store(e) => {
                tracing::error!("Store error: {:?}", e);
                let message = if crate::config::is_production() {
                    "Internal Server Error".to_owned()
                } else {
                    e.to_string()
                };
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        let body = Json(json!({
            "error": {
                "message": message,
                "statusCode": status.as_u16(),
            }
        }));

        (status, body).into_response()
    }
}
