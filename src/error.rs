use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Errors surfaced to HTTP clients.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing values")]
    MissingValues,
    #[error("invalid JSON payload: {0}")]
    InvalidPayload(String),
    #[error("mining cancelled before a valid proof was found")]
    MiningCancelled,
    #[error("mining task failed")]
    MiningFailed,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingValues | ApiError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            ApiError::MiningCancelled => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::MiningFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).body(self.to_string())
    }
}
