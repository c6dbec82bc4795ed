//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id) and the admin password policy
//! - Cookie management
//! - Client address resolution
//! - Rate limiting (store trait + in-memory implementation)
//! - Random secret bytes

pub mod client;
pub mod cookie;
pub mod crypto;
pub mod password;
pub mod rate_limit;
