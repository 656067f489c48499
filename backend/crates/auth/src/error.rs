//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordHashError;
use platform::token::TokenError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// User name already registered
    #[error("Error: Username is already taken!")]
    DuplicateUsername,

    /// Email already registered
    #[error("Error: Email is already in use!")]
    DuplicateEmail,

    /// Unknown user name or wrong password
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Session token missing, invalid, expired, or pointing at no account
    #[error("Session not found or expired")]
    SessionInvalid,

    /// Request input rejected before reaching the use case
    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] PasswordHashError),

    /// Token signing failed (validation failures map to `SessionInvalid`)
    #[error("Token error: {0}")]
    Token(TokenError),

    /// Router built from an unusable configuration
    #[error("Invalid auth configuration: {0}")]
    InvalidConfig(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::DuplicateUsername
            | AuthError::DuplicateEmail
            | AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::InvalidCredentials | AuthError::SessionInvalid => ErrorKind::Unauthorized,
            AuthError::Database(_)
            | AuthError::PasswordHash(_)
            | AuthError::Token(_)
            | AuthError::InvalidConfig(_)
            | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError.
    ///
    /// Server-side failures are reported with a generic message; details
    /// stay in the logs.
    pub fn into_app_error(self) -> AppError {
        match self {
            AuthError::Database(e) => {
                let app_err = AppError::from(e);
                if app_err.is_server_error() {
                    app_err
                } else {
                    AppError::internal("Database error")
                }
            }
            AuthError::PasswordHash(e) => {
                AppError::internal("Internal server error").with_source(e)
            }
            AuthError::Token(e) => AppError::internal("Internal server error").with_source(e),
            AuthError::InvalidConfig(_) | AuthError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            AuthError::DuplicateUsername => AppError::bad_request(self.to_string())
                .with_action("Choose a different username"),
            AuthError::DuplicateEmail => AppError::bad_request(self.to_string())
                .with_action("Sign in or use a different email"),
            AuthError::InvalidCredentials => AppError::unauthorized(self.to_string()),
            AuthError::SessionInvalid => {
                AppError::unauthorized(self.to_string()).with_action("Sign in again")
            }
            AuthError::Validation(message) => AppError::bad_request(message),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::PasswordHash(e) => {
                tracing::error!(error = %e, "Password hashing failed");
            }
            AuthError::Token(e) => {
                tracing::error!(error = %e, "Session token signing failed");
            }
            AuthError::InvalidConfig(msg) => {
                tracing::error!(message = %msg, "Auth misconfigured");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthError::DuplicateUsername.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::DuplicateEmail.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AuthError::Validation("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AuthError::SessionInvalid.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AuthError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AuthError::Database(sqlx::Error::PoolTimedOut).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_duplicate_messages_are_user_facing() {
        let err = AuthError::DuplicateUsername.into_app_error();
        assert_eq!(err.message(), "Error: Username is already taken!");

        let err = AuthError::DuplicateEmail.into_app_error();
        assert_eq!(err.message(), "Error: Email is already in use!");
    }

    #[test]
    fn test_actions_point_the_client_forward() {
        let err = AuthError::DuplicateUsername.into_app_error();
        assert_eq!(err.action(), Some("Choose a different username"));

        let err = AuthError::SessionInvalid.into_app_error();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert_eq!(err.action(), Some("Sign in again"));

        // No hint that would tell a guesser which half was wrong
        let err = AuthError::InvalidCredentials.into_app_error();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert!(err.action().is_none());

        let err = AuthError::Validation("Username is required".into()).into_app_error();
        assert_eq!(err.message(), "Username is required");
        assert!(err.action().is_none());
    }

    #[test]
    fn test_internal_details_hidden() {
        let err = AuthError::Internal("connection string leaked".into()).into_app_error();
        assert_eq!(err.message(), "Internal server error");
        assert!(err.is_server_error());

        let err = AuthError::InvalidConfig("jwt secret too short".into()).into_app_error();
        assert_eq!(err.message(), "Internal server error");
    }

    #[test]
    fn test_database_unavailable_keeps_5xx() {
        let err = AuthError::Database(sqlx::Error::PoolTimedOut).into_app_error();
        assert_eq!(err.status_code(), 503);

        // 4xx classifications from the store never leak past the auth layer
        let err = AuthError::Database(sqlx::Error::RowNotFound).into_app_error();
        assert_eq!(err.status_code(), 500);
    }
}
