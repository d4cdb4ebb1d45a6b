use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use weali_import::ImportError;

use crate::service::ServiceError;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid source type: {0}")]
    InvalidSource(String),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidSource(_) => StatusCode::BAD_REQUEST,
            ApiError::Service(ServiceError::Import(ImportError::UnsupportedSource(_))) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Service(ServiceError::Import(ImportError::Csv(_))) => StatusCode::BAD_REQUEST,
            ApiError::Service(ServiceError::Storage(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Join(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
