//! Error classes and their HTTP statuses

use serde::Serialize;

/// One variant per status code the API can answer with.
///
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// assert_eq!(ErrorKind::UnprocessableEntity.status_code(), 422);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// Database constraint rejected the values
    BadRequest,
    /// Missing, invalid or expired session; also every failed login
    Unauthorized,
    NotFound,
    /// Duplicate key (blog slug, admin user name)
    Conflict,
    /// Content field validation
    UnprocessableEntity,
    /// Login throttle
    TooManyRequests,
    InternalServerError,
    /// Database unreachable or exhausted
    ServiceUnavailable,
}

impl ErrorKind {
    pub const fn status_code(&self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::Unauthorized => 401,
            ErrorKind::NotFound => 404,
            ErrorKind::Conflict => 409,
            ErrorKind::UnprocessableEntity => 422,
            ErrorKind::TooManyRequests => 429,
            ErrorKind::InternalServerError => 500,
            ErrorKind::ServiceUnavailable => 503,
        }
    }

    /// 5xx; logged at error level by the crates that raise them
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }
}
