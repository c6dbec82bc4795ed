//! Auth Router

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};

use crate::domain::repository::AdminRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_admin;

/// Routes mounted under `/api/admin`
///
/// - `POST /login`
/// - `POST /logout`
/// - `GET /verify` (guarded)
pub fn auth_router<A>(state: AuthAppState<A>) -> Router
where
    A: AdminRepository + Send + Sync + 'static,
{
    let guarded = Router::new()
        .route("/verify", get(handlers::verify))
        .route_layer(from_fn_with_state(state.clone(), require_admin::<A>));

    Router::new()
        .route("/login", post(handlers::login::<A>))
        .route("/logout", post(handlers::logout::<A>))
        .merge(guarded)
        .with_state(state)
}
