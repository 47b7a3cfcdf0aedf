use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use sea_orm::SqlErr;
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sea_orm::DbErr),

    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The request is well-formed but refers to something that cannot be
    /// priced or acted on, e.g. a movie without a pricing tier.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Auth error: {0}")]
    AuthError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Forbidden")]
    Forbidden,

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
}

impl AppError {
    /// Turns a unique-index violation raised by a write into `Conflict`;
    /// every other database error is kept as is.
    pub fn from_write(err: sea_orm::DbErr, conflict: impl FnOnce() -> String) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AppError::Conflict(conflict()),
            _ => AppError::DatabaseError(err),
        }
    }

    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::ValidationError(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_REQUEST", msg.clone())
            }
            AppError::AuthError(msg) => (StatusCode::UNAUTHORIZED, "AUTH_ERROR", msg.clone()),
            AppError::JwtError(_) => (
                StatusCode::UNAUTHORIZED,
                "AUTH_ERROR",
                "Invalid access token".to_string(),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Forbidden => (
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
                "Forbidden".to_string(),
            ),
            AppError::DatabaseError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                "Database error".to_string(),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Internal server error".to_string(),
            ),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.parts().0
    }

    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code, message) = self.parts();

        if status_code.is_server_error() {
            log::error!("{self}");
        } else if matches!(
            self,
            AppError::AuthError(_) | AppError::JwtError(_) | AppError::Forbidden
        ) {
            log::warn!("{self}");
        } else {
            log::debug!("{self}");
        }

        HttpResponse::build(status_code).json(json!({
            "success": false,
            "error": {
                "code": error_code,
                "message": message
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::InvalidRequest("movie has no pricing".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound("Movie not found".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Conflict("duplicate".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(AppError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::DatabaseError(sea_orm::DbErr::Custom("boom".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_from_write_keeps_other_database_errors() {
        let err = AppError::from_write(sea_orm::DbErr::Custom("connection reset".into()), || {
            "taken".to_string()
        });
        assert!(matches!(err, AppError::DatabaseError(_)));
    }

    #[test]
    fn test_database_error_message_is_not_leaked() {
        let (_, code, message) =
            AppError::DatabaseError(sea_orm::DbErr::Custom("secret dsn".into())).parts();
        assert_eq!(code, "DATABASE_ERROR");
        assert_eq!(message, "Database error");
    }
}
