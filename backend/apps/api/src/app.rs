//! Router assembly
//!
//! `/`                 health
//! `/api/...`          public content
//! `/api/admin/...`    login/logout/verify + guarded content writes

use auth::domain::repository::AdminRepository;
use auth::{AuthAppState, auth_router, require_admin};
use axum::http::{HeaderValue, Method, header};
use axum::middleware::from_fn_with_state;
use axum::{Json, Router, routing::get};
use content::{ContentAppState, ContentRepository, admin_router, public_router};
use kernel::error::app_error::AppError;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub message: &'static str,
    pub version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "Portfolio API is running",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn not_found() -> AppError {
    AppError::not_found("Not Found")
}

pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true)
}

pub fn build_app<A, C>(
    auth_state: AuthAppState<A>,
    content_state: ContentAppState<C>,
    origins: &[String],
) -> Router
where
    A: AdminRepository + Send + Sync + 'static,
    C: ContentRepository,
{
    let guarded_content = admin_router(content_state.clone())
        .route_layer(from_fn_with_state(auth_state.clone(), require_admin::<A>));

    let admin = auth_router(auth_state).merge(guarded_content);
    let api = public_router(content_state).nest("/admin", admin);

    Router::new()
        .route("/", get(health))
        .nest("/api", api)
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(origins)),
        )
}
