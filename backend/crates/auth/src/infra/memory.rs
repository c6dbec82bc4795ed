//! In-memory Repository Implementation
//!
//! For tests and local runs without a database.

use std::sync::{Mutex, PoisonError};

use chrono::Utc;

use crate::domain::entity::admin::{Admin, NewAdmin};
use crate::domain::repository::AdminRepository;
use crate::domain::value_object::{admin_name::AdminName, admin_password::PasswordDigest};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Default)]
pub struct MemoryAdminRepository {
    admins: Mutex<Vec<Admin>>,
}

impl MemoryAdminRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Flip the active flag; returns false if no such admin exists
    pub fn set_active(&self, username: &str, active: bool) -> bool {
        let mut admins = self.lock();
        match admins.iter_mut().find(|a| a.username.as_str() == username) {
            Some(admin) => {
                admin.is_active = active;
                true
            }
            None => false,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Admin>> {
        self.admins.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AdminRepository for MemoryAdminRepository {
    async fn get_by_username(&self, username: &AdminName) -> AuthResult<Option<Admin>> {
        Ok(self
            .lock()
            .iter()
            .find(|a| &a.username == username)
            .cloned())
    }

    async fn create(&self, admin: &NewAdmin) -> AuthResult<Admin> {
        let mut admins = self.lock();

        if admins.iter().any(|a| a.username == admin.username) {
            return Err(AuthError::Internal(format!(
                "Admin '{}' already exists",
                admin.username
            )));
        }

        let created = Admin {
            id: admins.len() as i64 + 1,
            username: admin.username.clone(),
            password: admin.password.clone(),
            email: admin.email.clone(),
            is_active: true,
            created_at: Utc::now(),
        };
        admins.push(created.clone());

        Ok(created)
    }

    async fn update_password(
        &self,
        username: &AdminName,
        password: &PasswordDigest,
    ) -> AuthResult<bool> {
        let mut admins = self.lock();
        match admins.iter_mut().find(|a| &a.username == username) {
            Some(admin) => {
                admin.password = password.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
