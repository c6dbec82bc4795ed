//! Auth Middleware
//!
//! Guard for admin-only routes.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;

use crate::application::AdminIdentity;
use crate::domain::repository::AdminRepository;
use crate::error::AuthError;
use crate::presentation::handlers::AuthAppState;

/// Middleware that requires a valid admin session.
///
/// On success the [`AdminIdentity`] is inserted into request extensions;
/// on failure the request never reaches the handler.
///
/// ```ignore
/// admin_routes.route_layer(axum::middleware::from_fn_with_state(state, require_admin::<Repo>))
/// ```
pub async fn require_admin<A>(
    State(state): State<AuthAppState<A>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    A: AdminRepository + Send + Sync + 'static,
{
    let identity = state.authorizer().execute(req.headers()).await?;

    tracing::debug!(
        username = %identity.username,
        method = %req.method(),
        path = %req.uri().path(),
        "Admin request authorized"
    );

    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}

/// Extractor for the admin resolved by [`require_admin`]
#[derive(Debug, Clone)]
pub struct CurrentAdmin(pub AdminIdentity);

impl<S> FromRequestParts<S> for CurrentAdmin
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AdminIdentity>()
            .cloned()
            .map(CurrentAdmin)
            .ok_or(AuthError::Unauthorized)
    }
}
