//! Infrastructure Layer
//!
//! Credential store implementations.

pub mod memory;
pub mod postgres;

pub use memory::MemoryAdminRepository;
pub use postgres::PgAdminRepository;
