use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use docstore::StoreError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Serialize)]
pub struct ApiError {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Internal(String),

    #[error("Not Found")]
    NotFound,

    #[error("Method Not Allowed")]
    MethodNotAllowed,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Store(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        };
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }

        (status, Json(ApiError { error: self.to_string() })).into_response()
    }
}
