//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;
use std::time::Duration;

use platform::cookie::CookieConfig;

use crate::error::{AuthError, AuthResult};
pub use platform::rate_limit::RateLimitConfig;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Minimum signing secret length in bytes
pub const MIN_SECRET_LENGTH: usize = 32;

/// Longest accepted session lifetime (365 days)
pub const MAX_TOKEN_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub cookie_name: String,
    /// HS256 signing secret
    pub token_secret: Vec<u8>,
    /// Token lifetime, also the cookie Max-Age
    pub token_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Login attempts per client address
    pub login_rate_limit: RateLimitConfig,
    /// Honour X-Forwarded-For when resolving the client address
    pub trust_proxy_headers: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            cookie_name: "access_token".to_string(),
            token_secret: Vec::new(),
            token_ttl: Duration::from_secs(30 * 60),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_pepper: None,
            login_rate_limit: RateLimitConfig::default(),
            trust_proxy_headers: false,
        }
    }
}

impl AuthConfig {
    /// Create config with a random signing secret
    pub fn with_random_secret() -> Self {
        Self {
            token_secret: platform::crypto::secret_bytes(MIN_SECRET_LENGTH),
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    pub fn token_ttl_secs(&self) -> u64 {
        self.token_ttl.as_secs()
    }

    /// Reject values the token and cookie cannot carry
    pub fn validate(&self) -> AuthResult<()> {
        if self.token_ttl.as_secs() == 0 || self.token_ttl > MAX_TOKEN_TTL {
            return Err(AuthError::Configuration(format!(
                "Token lifetime must be between 1 second and {} days",
                MAX_TOKEN_TTL.as_secs() / 86_400
            )));
        }
        Ok(())
    }

    /// Cookie attributes for the session cookie
    pub fn cookie_config(&self) -> CookieConfig {
        CookieConfig {
            name: self.cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: i64::try_from(self.token_ttl.as_secs()).ok(),
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("cookie_name", &self.cookie_name)
            .field("token_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field("cookie_secure", &self.cookie_secure)
            .field("cookie_same_site", &self.cookie_same_site)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .field("login_rate_limit", &self.login_rate_limit)
            .field("trust_proxy_headers", &self.trust_proxy_headers)
            .finish()
    }
}
