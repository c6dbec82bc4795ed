//! Shared Kernel - vocabulary common to every backend crate
//!
//! Only error classification lives here:
//! - [`error::kind::ErrorKind`] maps failures onto HTTP status codes
//! - [`error::app_error::AppError`] is the response-facing error value
//! - conversions from `sqlx` and into `axum` responses (feature-gated)

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}

pub use error::app_error::{AppError, AppResult};
pub use error::kind::ErrorKind;
