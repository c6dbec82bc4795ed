//! Application Layer
//!
//! Use cases and application services.

pub mod authorize;
pub mod bootstrap;
pub mod config;
pub mod login;
pub mod token;

// Re-exports
pub use authorize::{AdminIdentity, AuthorizeUseCase};
pub use bootstrap::{BootstrapInput, BootstrapOutcome, BootstrapUseCase};
pub use config::AuthConfig;
pub use login::{LoginInput, LoginUseCase, Session};
pub use token::{IssuedToken, TokenError, TokenIssuer};
