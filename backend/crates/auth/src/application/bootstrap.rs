//! Bootstrap Use Case
//!
//! Ensures the operator-configured admin account exists at startup.
//! There is no compiled-in default account.

use std::sync::Arc;

use platform::password::check_admin_password;

use crate::application::config::AuthConfig;
use crate::domain::entity::admin::NewAdmin;
use crate::domain::repository::AdminRepository;
use crate::domain::value_object::admin_name::AdminName;
use crate::domain::value_object::admin_password::{RawPassword, hash_blocking};
use crate::error::{AuthError, AuthResult};

/// Operator-supplied credentials
#[derive(Default)]
pub struct BootstrapInput {
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
    /// Overwrite the stored hash of an existing admin
    pub reset_password: bool,
}

/// What bootstrap did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// Credentials missing; admin routes stay locked
    Disabled,
    Created,
    /// Admin already present and left untouched
    Existing,
    /// Admin already present; hash replaced on explicit request
    PasswordReset,
}

impl BootstrapOutcome {
    /// Whether admin login and admin routes are usable
    pub fn admin_enabled(&self) -> bool {
        !matches!(self, BootstrapOutcome::Disabled)
    }
}

/// Bootstrap use case
pub struct BootstrapUseCase<A>
where
    A: AdminRepository,
{
    admin_repo: Arc<A>,
    config: Arc<AuthConfig>,
}

impl<A> BootstrapUseCase<A>
where
    A: AdminRepository,
{
    pub fn new(admin_repo: Arc<A>, config: Arc<AuthConfig>) -> Self {
        Self { admin_repo, config }
    }

    /// Weak or short passwords are a fatal `Configuration` error.
    pub async fn execute(&self, input: BootstrapInput) -> AuthResult<BootstrapOutcome> {
        let username = input.username.filter(|u| !u.trim().is_empty());
        let password = input.password.filter(|p| !p.trim().is_empty());

        let (Some(username), Some(password)) = (username, password) else {
            tracing::warn!(
                "ADMIN_USERNAME or ADMIN_PASSWORD not set; admin functionality is disabled"
            );
            return Ok(BootstrapOutcome::Disabled);
        };

        let username = AdminName::new(&username)
            .map_err(|e| AuthError::Configuration(format!("Invalid admin username: {e}")))?;

        check_admin_password(&password)
            .map_err(|e| AuthError::Configuration(format!("Refusing admin password: {e}")))?;

        let existing = self.admin_repo.get_by_username(&username).await?;
        let pepper = self.config.password_pepper.clone();

        match existing {
            None => {
                let digest = hash_blocking(RawPassword::new(password), pepper).await?;
                self.admin_repo
                    .create(&NewAdmin {
                        username: username.clone(),
                        password: digest,
                        email: input.email,
                    })
                    .await?;

                tracing::info!(username = %username, "Admin account created");
                Ok(BootstrapOutcome::Created)
            }
            Some(_) if input.reset_password => {
                let digest = hash_blocking(RawPassword::new(password), pepper).await?;
                self.admin_repo.update_password(&username, &digest).await?;

                tracing::warn!(username = %username, "Admin password reset from configuration");
                Ok(BootstrapOutcome::PasswordReset)
            }
            Some(_) => {
                tracing::info!(username = %username, "Admin account already exists; leaving it unchanged");
                Ok(BootstrapOutcome::Existing)
            }
        }
    }
}
