//! Authorize Use Case
//!
//! Resolves the admin acting on a request from its session token.

use std::sync::Arc;

use axum::http::{HeaderMap, header};
use serde::Serialize;

use crate::application::config::AuthConfig;
use crate::application::token::TokenIssuer;
use crate::domain::repository::AdminRepository;
use crate::domain::value_object::admin_name::AdminName;
use crate::error::{AuthError, AuthResult};

/// The authenticated admin, inserted into request extensions by the guard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminIdentity {
    pub username: String,
}

/// Find the session token on a request.
///
/// A usable cookie wins over the `Authorization` header. Both carry
/// `Bearer <token>`; a cookie without one (such as the empty value logout
/// leaves behind) counts as absent.
pub fn extract_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    platform::cookie::extract_cookie(headers, cookie_name)
        .and_then(|cookie| bearer_token(&cookie))
        .or_else(|| {
            let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
            bearer_token(value)
        })
}

fn bearer_token(raw: &str) -> Option<String> {
    let (scheme, token) = raw.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}

/// Authorize use case
pub struct AuthorizeUseCase<A>
where
    A: AdminRepository,
{
    admin_repo: Arc<A>,
    issuer: Arc<TokenIssuer>,
    config: Arc<AuthConfig>,
    enabled: bool,
}

impl<A> AuthorizeUseCase<A>
where
    A: AdminRepository,
{
    pub fn new(
        admin_repo: Arc<A>,
        issuer: Arc<TokenIssuer>,
        config: Arc<AuthConfig>,
        enabled: bool,
    ) -> Self {
        Self {
            admin_repo,
            issuer,
            config,
            enabled,
        }
    }

    /// Any failure is `Unauthorized`; the reason is only logged.
    pub async fn execute(&self, headers: &HeaderMap) -> AuthResult<AdminIdentity> {
        if !self.enabled {
            return Err(AuthError::Unauthorized);
        }

        let token =
            extract_token(headers, &self.config.cookie_name).ok_or(AuthError::Unauthorized)?;

        let subject = self.issuer.validate(&token).map_err(|e| {
            tracing::debug!(reason = %e, "Session token rejected");
            AuthError::Unauthorized
        })?;

        let username = AdminName::new(&subject).map_err(|_| AuthError::Unauthorized)?;

        // The account must still exist and be active
        match self.admin_repo.get_by_username(&username).await? {
            Some(admin) if admin.can_login() => Ok(AdminIdentity {
                username: admin.username.to_string(),
            }),
            _ => {
                tracing::warn!(username = %username, "Valid token for missing or inactive admin");
                Err(AuthError::Unauthorized)
            }
        }
    }
}
