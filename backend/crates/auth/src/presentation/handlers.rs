//! HTTP Handlers

use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::FormRejection;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};

use platform::client::{ClientAddr, client_key};
use platform::cookie::{delete_cookie_header, set_cookie_header};
use platform::rate_limit::MemoryRateLimitStore;

use crate::application::config::AuthConfig;
use crate::application::{AuthorizeUseCase, LoginInput, LoginUseCase, TokenIssuer};
use crate::domain::repository::AdminRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{LoginForm, LogoutResponse, TokenResponse, VerifyResponse};
use crate::presentation::middleware::CurrentAdmin;

/// Shared state for auth handlers and the admin guard
pub struct AuthAppState<A>
where
    A: AdminRepository + Send + Sync + 'static,
{
    pub repo: Arc<A>,
    pub config: Arc<AuthConfig>,
    pub issuer: Arc<TokenIssuer>,
    pub limiter: Arc<MemoryRateLimitStore>,
    /// False when bootstrap found no admin credentials
    pub admin_enabled: bool,
}

impl<A> Clone for AuthAppState<A>
where
    A: AdminRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
            issuer: self.issuer.clone(),
            limiter: self.limiter.clone(),
            admin_enabled: self.admin_enabled,
        }
    }
}

impl<A> AuthAppState<A>
where
    A: AdminRepository + Send + Sync + 'static,
{
    /// Fails if the signing secret or token lifetime is unusable
    pub fn new(repo: A, config: AuthConfig, admin_enabled: bool) -> AuthResult<Self> {
        config.validate()?;
        let issuer = TokenIssuer::new(&config.token_secret)?;
        Ok(Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
            issuer: Arc::new(issuer),
            limiter: Arc::new(MemoryRateLimitStore::new()),
            admin_enabled,
        })
    }

    pub(crate) fn authorizer(&self) -> AuthorizeUseCase<A> {
        AuthorizeUseCase::new(
            self.repo.clone(),
            self.issuer.clone(),
            self.config.clone(),
            self.admin_enabled,
        )
    }
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/admin/login
pub async fn login<A>(
    State(state): State<AuthAppState<A>>,
    ClientAddr(peer): ClientAddr,
    headers: HeaderMap,
    form: Result<Form<LoginForm>, FormRejection>,
) -> AuthResult<Response>
where
    A: AdminRepository + Send + Sync + 'static,
{
    let Form(form) = form?;

    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.limiter.clone(),
        state.issuer.clone(),
        state.config.clone(),
        state.admin_enabled,
    );

    let input = LoginInput {
        username: form.username,
        password: form.password,
        client_key: client_key(&headers, peer, state.config.trust_proxy_headers),
    };

    let session = use_case.execute(input).await?;

    let cookie = set_cookie_header(
        &state.config.cookie_config(),
        &format!("Bearer {}", session.access_token),
    )
    .map_err(|e| AuthError::Internal(format!("Invalid cookie header: {e}")))?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(TokenResponse {
            access_token: session.access_token,
            token_type: session.token_type.to_string(),
        }),
    )
        .into_response())
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/admin/logout
///
/// Always succeeds. The token itself stays valid until it expires.
pub async fn logout<A>(State(state): State<AuthAppState<A>>) -> AuthResult<Response>
where
    A: AdminRepository + Send + Sync + 'static,
{
    let cookie = delete_cookie_header(&state.config.cookie_config())
        .map_err(|e| AuthError::Internal(format!("Invalid cookie header: {e}")))?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(LogoutResponse {
            message: "Logged out".to_string(),
        }),
    )
        .into_response())
}

// ============================================================================
// Verify (guarded)
// ============================================================================

/// GET /api/admin/verify
pub async fn verify(CurrentAdmin(admin): CurrentAdmin) -> Json<VerifyResponse> {
    Json(VerifyResponse {
        username: admin.username,
        authenticated: true,
    })
}
