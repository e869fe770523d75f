use actix_web::{HttpResponse, ResponseError};
use async_graphql::ErrorExtensions;
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sea_orm::DbErr),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Auth error: {0}")]
    AuthError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Invalid email or verification code")]
    InvalidCode,

    #[error("Verification code has expired")]
    ExpiredCode,

    #[error("Unable to generate unique restaurant code after {attempts} attempts")]
    CodeSpaceExhausted { attempts: u32 },

    #[error("Identity provider error: {0}")]
    IdentityProviderError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("HTTP request error: {0}")]
    ReqwestError(#[from] reqwest::Error),
}

impl AppError {
    /// Stable machine-readable code, shared by the GraphQL and REST surfaces.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::AuthError(_) | AppError::JwtError(_) => "AUTH_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::InvalidCode => "INVALID_CODE",
            AppError::ExpiredCode => "EXPIRED_CODE",
            AppError::CodeSpaceExhausted { .. } => "CODE_SPACE_EXHAUSTED",
            AppError::IdentityProviderError(_) | AppError::ReqwestError(_) => {
                "EXTERNAL_API_ERROR"
            }
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Message safe to hand to a client. Infrastructure details stay in the log.
    pub fn public_message(&self) -> String {
        match self {
            AppError::ValidationError(msg)
            | AppError::AuthError(msg)
            | AppError::NotFound(msg)
            | AppError::Forbidden(msg) => msg.clone(),
            AppError::InvalidCode | AppError::ExpiredCode | AppError::CodeSpaceExhausted { .. } => {
                self.to_string()
            }
            AppError::JwtError(_) => "Invalid access token".to_string(),
            AppError::IdentityProviderError(_) | AppError::ReqwestError(_) => {
                "Identity provider unavailable".to_string()
            }
            AppError::DatabaseError(_) => "Database error".to_string(),
            AppError::InternalError(_) => "Internal server error".to_string(),
        }
    }

    fn log(&self) {
        match self {
            AppError::ValidationError(_)
            | AppError::AuthError(_)
            | AppError::JwtError(_)
            | AppError::Forbidden(_)
            | AppError::InvalidCode
            | AppError::ExpiredCode => log::warn!("{self}"),
            AppError::NotFound(_) => log::debug!("{self}"),
            _ => log::error!("{self}"),
        }
    }
}

/// Resolvers surface `AppError` through `ResultExt::extend` so the error
/// keeps its `code` extension.
impl ErrorExtensions for AppError {
    fn extend(&self) -> async_graphql::Error {
        self.log();
        let code = self.code();
        async_graphql::Error::new(self.public_message()).extend_with(|_, e| e.set("code", code))
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        self.log();
        let status_code = match self {
            AppError::ValidationError(_) | AppError::InvalidCode | AppError::ExpiredCode => {
                actix_web::http::StatusCode::BAD_REQUEST
            }
            AppError::AuthError(_) | AppError::JwtError(_) => {
                actix_web::http::StatusCode::UNAUTHORIZED
            }
            AppError::NotFound(_) => actix_web::http::StatusCode::NOT_FOUND,
            AppError::Forbidden(_) => actix_web::http::StatusCode::FORBIDDEN,
            AppError::IdentityProviderError(_) | AppError::ReqwestError(_) => {
                actix_web::http::StatusCode::BAD_GATEWAY
            }
            _ => actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
        };

        HttpResponse::build(status_code).json(json!({
            "success": false,
            "error": {
                "code": self.code(),
                "message": self.public_message()
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_error_is_not_leaked() {
        let err = AppError::DatabaseError(sea_orm::DbErr::Custom("connection refused".into()));
        assert_eq!(err.code(), "DATABASE_ERROR");
        assert_eq!(err.public_message(), "Database error");
    }

    #[test]
    fn test_graphql_error_carries_code() {
        let gql = AppError::CodeSpaceExhausted { attempts: 100 }.extend();
        assert!(gql.message.contains("100 attempts"));
        let ext = gql.extensions.expect("extensions set");
        assert_eq!(
            ext.get("code"),
            Some(&async_graphql::Value::from("CODE_SPACE_EXHAUSTED"))
        );
    }

    #[test]
    fn test_response_status() {
        let resp = AppError::NotFound("Restaurant not found".into()).error_response();
        assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);
    }
}
