//! Content Error Types
//!
//! Content-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Content-specific result type alias
pub type ContentResult<T> = Result<T, ContentError>;

#[derive(Debug, Error)]
pub enum ContentError {
    /// Payload rejected by entity validation
    #[error("{0}")]
    Validation(String),

    /// Path segment that does not parse (non-numeric id)
    #[error("{0}")]
    BadRequest(String),

    /// No row with the requested id or slug. Carries the display name.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Unique value already taken (blog slug)
    #[error("{0}")]
    Conflict(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ContentError {
    pub fn validation(message: impl Into<String>) -> Self {
        ContentError::Validation(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ContentError::Validation(_) => ErrorKind::UnprocessableEntity,
            ContentError::BadRequest(_) => ErrorKind::BadRequest,
            ContentError::NotFound(_) => ErrorKind::NotFound,
            ContentError::Conflict(_) => ErrorKind::Conflict,
            ContentError::Database(e) => AppError::classify_sqlx(e).kind(),
        }
    }

    fn log(&self) {
        let kind = self.kind();
        if kind.is_server_error() {
            tracing::error!(error = %self, "Content database error");
        } else if let ContentError::Database(e) = self {
            tracing::warn!(error = %e, status = kind.status_code(), "Content write rejected by database");
        } else {
            tracing::debug!(error = %self, "Content request rejected");
        }
    }
}

impl From<ContentError> for AppError {
    fn from(err: ContentError) -> Self {
        match err {
            // Postgres codes (unique violation, pool exhaustion, ...) map in kernel
            ContentError::Database(e) => AppError::from(e),
            ContentError::Validation(msg) => AppError::unprocessable(msg),
            ContentError::BadRequest(msg) => AppError::bad_request(msg),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

impl IntoResponse for ContentError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}

// Extractor rejections keep the `{"detail"}` body

impl From<JsonRejection> for ContentError {
    fn from(rejection: JsonRejection) -> Self {
        ContentError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ContentError {
    fn from(rejection: QueryRejection) -> Self {
        ContentError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ContentError {
    fn from(rejection: PathRejection) -> Self {
        ContentError::BadRequest(rejection.body_text())
    }
}
