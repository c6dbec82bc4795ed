//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system. Response bodies use the
//! `{"detail": "..."}` shape.

use axum::extract::rejection::FormRejection;
use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordHashError;
use platform::rate_limit::RateLimitError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown user, inactive account, or wrong password.
    /// One variant for all causes so responses cannot be told apart.
    #[error("Incorrect username or password")]
    InvalidCredentials,

    /// Too many login attempts from one client
    #[error("Too many login attempts. Please try again later.")]
    RateLimited { retry_after_secs: u64 },

    /// Missing, invalid or expired session token
    #[error("Could not validate credentials")]
    Unauthorized,

    /// Login form missing a field or not form-encoded
    #[error("{0}")]
    InvalidRequest(String),

    /// Startup configuration rejected (weak password, short secret, ...)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials | AuthError::Unauthorized => {
                ErrorKind::Unauthorized
            }
            AuthError::RateLimited { .. } => ErrorKind::TooManyRequests,
            AuthError::InvalidRequest(_) => ErrorKind::UnprocessableEntity,
            AuthError::Configuration(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    ///
    /// Server-side details stay in the logs.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Configuration(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::Configuration(msg) => {
                tracing::error!(message = %msg, "Auth configuration error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::RateLimited { retry_after_secs } => {
                tracing::warn!(retry_after_secs, "Login rate limit exceeded");
            }
            AuthError::Unauthorized => {
                tracing::debug!(error = %self, "Rejected admin request");
            }
            AuthError::InvalidRequest(msg) => {
                tracing::debug!(message = %msg, "Malformed login request");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        let mut response = self.to_app_error().into_response();

        if self.kind() == ErrorKind::Unauthorized {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        if let AuthError::RateLimited { retry_after_secs } = self {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(retry_after_secs));
        }

        response
    }
}

impl From<FormRejection> for AuthError {
    fn from(rejection: FormRejection) -> Self {
        AuthError::InvalidRequest(rejection.body_text())
    }
}

impl From<PasswordHashError> for AuthError {
    fn from(err: PasswordHashError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<RateLimitError> for AuthError {
    fn from(err: RateLimitError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AuthError {
    fn from(err: tokio::task::JoinError) -> Self {
        AuthError::Internal(format!("Blocking task failed: {err}"))
    }
}
