use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;
use tracing::{error, warn};

use crate::api::validation::ErrorResponse;
use crate::db::store::StoreError;

/// Request-level errors, rendered as `{ "error": ... }` envelopes
#[derive(Debug, Error)]
pub enum ApiError {
    /// The addressed row does not exist
    #[error("{0}")]
    NotFound(&'static str),

    /// The database refused the operation; its message is passed through
    #[error("{0}")]
    Rejected(String),

    /// Infrastructure failure; `context` is the client-facing message
    #[error("{context}: {source}")]
    Internal {
        context: &'static str,
        source: StoreError,
    },
}

impl ApiError {
    /// Map a store failure for the operation described by `context`.
    pub fn store(context: &'static str) -> impl FnOnce(StoreError) -> ApiError {
        move |err| match err {
            StoreError::Rejected(message) => ApiError::Rejected(message),
            source => ApiError::Internal { context, source },
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Rejected(msg) => msg.clone(),
            ApiError::NotFound(msg) => (*msg).to_string(),
            ApiError::Internal { context, .. } => (*context).to_string(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Rejected(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::NotFound(msg) => warn!("Not found: {}", msg),
            ApiError::Rejected(msg) => warn!("Backend rejected request: {}", msg),
            ApiError::Internal { context, source } => error!("{}: {}", context, source),
        }

        HttpResponse::build(self.status_code()).json(ErrorResponse::new(self.message()))
    }
}
