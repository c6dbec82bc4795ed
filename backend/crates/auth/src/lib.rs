//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Admin entity, value objects, repository trait
//! - `application/` - Login, authorize and bootstrap use cases, token issuer
//! - `infra/` - PostgreSQL and in-memory credential stores
//! - `presentation/` - HTTP handlers, DTOs, router, guard middleware
//!
//! ## Security Model
//! - A single operator-configured admin; no compiled-in default credentials
//! - Passwords hashed with Argon2id, verified off the async workers
//! - Stateless HS256 session tokens, delivered as bearer body and httpOnly cookie
//! - Login attempts throttled per client address
//! - Unknown user, inactive account and wrong password are indistinguishable

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::{
    AdminIdentity, AuthConfig, BootstrapInput, BootstrapOutcome, BootstrapUseCase, TokenIssuer,
};
pub use error::{AuthError, AuthResult};
pub use infra::{MemoryAdminRepository, PgAdminRepository};
pub use presentation::{AuthAppState, CurrentAdmin, auth_router, require_admin};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[cfg(test)]
mod tests;
