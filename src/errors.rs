use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::domain::errors::DomainError;

pub const STORE_FAILURE_MESSAGE: &str = "Server Issue please contact Administration";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Order not found")]
    NotFound(String),

    /// Request could not be extracted (malformed JSON, path or query).
    #[error("Bad request")]
    BadRequest(String),

    #[error("Invalid request")]
    Validation(String),

    /// Pool or statement failure caught at the executor boundary.
    #[error("{}", STORE_FAILURE_MESSAGE)]
    Store(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error body shared by every failing endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `"error"`.
    pub status: String,
    pub message: String,
    pub error_details: String,
}

impl AppError {
    fn details(&self) -> &str {
        match self {
            AppError::NotFound(d)
            | AppError::BadRequest(d)
            | AppError::Validation(d)
            | AppError::Store(d)
            | AppError::Internal(d) => d,
        }
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        let details = e.to_string();
        match e {
            DomainError::NotFound(_) => AppError::NotFound(details),
            DomainError::InvalidInput(msg) => AppError::Validation(msg),
            DomainError::Unavailable(_) | DomainError::Store(_) => AppError::Store(details),
        }
    }
}

impl From<actix_web::error::BlockingError> for AppError {
    fn from(e: actix_web::error::BlockingError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Validation(_) | AppError::Store(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Store(d) | AppError::Internal(d) => log::error!("{}: {}", self, d),
            AppError::NotFound(d) => log::warn!("{}", d),
            AppError::BadRequest(d) | AppError::Validation(d) => log::info!("{}: {}", self, d),
        }

        // Internal failures keep their details in the log only.
        let error_details = match self {
            AppError::Internal(_) => String::new(),
            _ => self.details().to_string(),
        };
        let message = match self {
            AppError::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            status: "error".to_string(),
            message,
            error_details,
        })
    }
}
