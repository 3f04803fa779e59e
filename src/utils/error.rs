use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    NotFound(String),
    InvalidCredential(String),
    AlreadyExists(String),
    InvalidRequest(String),
    DatabaseError(String),
    TokenError(String),
    Internal(String),
}

impl AppError {
    /// Short machine-readable name sent next to the message
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NotFound",
            AppError::InvalidCredential(_) => "InvalidCredential",
            AppError::AlreadyExists(_) => "AlreadyExists",
            AppError::InvalidRequest(_) => "InvalidRequest",
            AppError::DatabaseError(_) => "DatabaseError",
            AppError::TokenError(_) => "TokenError",
            AppError::Internal(_) => "Internal",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AppError::NotFound(msg)
            | AppError::InvalidCredential(msg)
            | AppError::AlreadyExists(msg)
            | AppError::InvalidRequest(msg)
            | AppError::DatabaseError(msg)
            | AppError::TokenError(msg)
            | AppError::Internal(msg) => msg,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::InvalidCredential(msg) => write!(f, "Invalid credential: {}", msg),
            AppError::AlreadyExists(msg) => write!(f, "Already exists: {}", msg),
            AppError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AppError::TokenError(msg) => write!(f, "Token error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidCredential(_) => StatusCode::UNAUTHORIZED,
            AppError::AlreadyExists(_) => StatusCode::CONFLICT,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::DatabaseError(_) | AppError::TokenError(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "success": false,
            "error": self.message(),
            "kind": self.kind(),
        }))
    }
}
