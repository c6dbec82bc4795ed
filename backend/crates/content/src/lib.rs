//! Portfolio Content Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, partial-update merge, validation, repository traits
//! - `infra/` - PostgreSQL and in-memory stores
//! - `presentation/` - HTTP handlers, public and admin routers
//!
//! Admin routes carry no guard of their own; the binary layers the auth
//! guard over [`admin_router`].

pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use domain::entity::Entity;
pub use domain::query::ListQuery;
pub use domain::repository::{ContentRepository, CrudRepository};
pub use error::{ContentError, ContentResult};
pub use infra::{MemoryContentRepository, PgContentRepository};
pub use presentation::{ContentAppState, admin_router, public_router};
