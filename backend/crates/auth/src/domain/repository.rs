//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::admin::{Admin, NewAdmin};
use crate::domain::value_object::{admin_name::AdminName, admin_password::PasswordDigest};
use crate::error::AuthResult;

/// Admin credential store
#[trait_variant::make(AdminRepository: Send)]
pub trait LocalAdminRepository {
    /// Find admin by exact user name
    async fn get_by_username(&self, username: &AdminName) -> AuthResult<Option<Admin>>;

    /// Create a new admin; fails if the user name is taken
    async fn create(&self, admin: &NewAdmin) -> AuthResult<Admin>;

    /// Replace the stored hash; returns false if no such admin exists
    async fn update_password(
        &self,
        username: &AdminName,
        password: &PasswordDigest,
    ) -> AuthResult<bool>;
}
