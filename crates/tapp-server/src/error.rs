use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use tapp_store::StoreError;
use tapp_types::ValidationErrors;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Store(StoreError::UserNotFound(_)) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// `422 {"detail": [errors]}`, `404 {"detail": "..."}`, otherwise 500.
impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::Validation(errors) => {
                tracing::warn!(count = errors.len(), "request failed validation");
                json!({ "detail": errors })
            }
            Self::Store(e @ StoreError::UserNotFound(_)) => {
                tracing::warn!("{e}");
                json!({ "detail": e.to_string() })
            }
            other => {
                tracing::error!("request failed: {other}");
                json!({ "detail": "Internal Server Error" })
            }
        };
        (status, Json(body)).into_response()
    }
}
