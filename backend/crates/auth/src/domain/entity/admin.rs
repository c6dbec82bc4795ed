//! Admin Entity
//!
//! The single operator account that may use the admin API.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{admin_name::AdminName, admin_password::PasswordDigest};

/// Admin account as stored
#[derive(Debug, Clone)]
pub struct Admin {
    pub id: i64,
    /// Unique login name
    pub username: AdminName,
    /// Argon2id PHC string, never plaintext
    pub password: PasswordDigest,
    pub email: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Admin {
    /// Disabled accounts are rejected exactly like unknown ones
    #[inline]
    pub fn can_login(&self) -> bool {
        self.is_active
    }
}

/// Input for creating an admin
#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub username: AdminName,
    pub password: PasswordDigest,
    pub email: Option<String>,
}
