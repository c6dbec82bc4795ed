//! Login Use Case
//!
//! Verifies admin credentials and mints a session token.

use std::sync::Arc;

use platform::rate_limit::{RateLimitStore, now_ms};

use crate::application::config::AuthConfig;
use crate::application::token::TokenIssuer;
use crate::domain::repository::AdminRepository;
use crate::domain::value_object::admin_name::AdminName;
use crate::domain::value_object::admin_password::{RawPassword, verify_blocking};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub username: String,
    pub password: String,
    /// Rate-limit key, usually the client IP
    pub client_key: String,
}

/// A successful login
#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: String,
    pub token_type: &'static str,
    /// Unix seconds
    pub expires_at: i64,
    /// Cookie Max-Age in seconds
    pub max_age: u64,
}

/// Login use case
pub struct LoginUseCase<A, L>
where
    A: AdminRepository,
    L: RateLimitStore,
{
    admin_repo: Arc<A>,
    limiter: Arc<L>,
    issuer: Arc<TokenIssuer>,
    config: Arc<AuthConfig>,
    enabled: bool,
}

impl<A, L> LoginUseCase<A, L>
where
    A: AdminRepository,
    L: RateLimitStore,
{
    pub fn new(
        admin_repo: Arc<A>,
        limiter: Arc<L>,
        issuer: Arc<TokenIssuer>,
        config: Arc<AuthConfig>,
        enabled: bool,
    ) -> Self {
        Self {
            admin_repo,
            limiter,
            issuer,
            config,
            enabled,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<Session> {
        // Throttle before touching the store or the hasher
        let limit = self
            .limiter
            .check_and_increment(&input.client_key, &self.config.login_rate_limit)
            .await?;

        if !limit.allowed {
            tracing::warn!(client = %input.client_key, "Login attempt rate limited");
            return Err(AuthError::RateLimited {
                retry_after_secs: limit.retry_after_secs(now_ms()),
            });
        }

        if !self.enabled {
            return Err(AuthError::InvalidCredentials);
        }

        let username =
            AdminName::new(&input.username).map_err(|_| AuthError::InvalidCredentials)?;
        let raw_password = RawPassword::new(input.password);

        let admin = self.admin_repo.get_by_username(&username).await?;

        let verified = match admin {
            Some(admin) if admin.can_login() => {
                verify_blocking(
                    admin.password,
                    raw_password,
                    self.config.password_pepper.clone(),
                )
                .await?
            }
            _ => false,
        };

        if !verified {
            tracing::warn!(
                username = %username,
                client = %input.client_key,
                "Failed admin login attempt"
            );
            return Err(AuthError::InvalidCredentials);
        }

        let issued = self.issuer.issue(username.as_str(), self.config.token_ttl)?;

        tracing::info!(
            username = %username,
            client = %input.client_key,
            expires_at = issued.expires_at,
            "Admin signed in"
        );

        Ok(Session {
            access_token: issued.token,
            token_type: "bearer",
            expires_at: issued.expires_at,
            max_age: self.config.token_ttl_secs(),
        })
    }
}
