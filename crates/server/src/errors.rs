use axum::extract::rejection::PathRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::{ErrorBody, Message};
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

pub const NOT_FOUND_MESSAGE: &str = "Data not found";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// The only two failures a client can observe. Every handler returns this,
/// so logging and the response body are decided here and nowhere else.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("data not found")]
    NotFound,
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn internal(e: impl std::fmt::Display) -> Self { Self::Internal(e.to_string()) }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(_) => Self::NotFound,
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(e: PathRejection) -> Self { Self::Internal(e.body_text()) }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => (StatusCode::NOT_FOUND, Json(Message::new(NOT_FOUND_MESSAGE))).into_response(),
            Self::Internal(detail) => {
                error!(error = %detail, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody::new(INTERNAL_ERROR_MESSAGE))).into_response()
            }
        }
    }
}
