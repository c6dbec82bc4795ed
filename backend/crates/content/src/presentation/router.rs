//! Content Routers

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::domain::entity::{
    About, Blog, Contact, Education, Experience, Project, SocialLink, Stack,
};
use crate::domain::repository::ContentRepository;
use crate::presentation::handlers::{self, ContentAppState};

/// Read-only routes plus the contact form, mounted under `/api`
pub fn public_router<R>(state: ContentAppState<R>) -> Router
where
    R: ContentRepository,
{
    Router::new()
        .route("/about", get(handlers::get_about::<R>))
        .route("/stack", get(handlers::list::<R, Stack>))
        .route("/projects", get(handlers::list::<R, Project>))
        .route("/projects/{id}", get(handlers::get::<R, Project>))
        .route("/experience", get(handlers::list::<R, Experience>))
        .route("/education", get(handlers::list::<R, Education>))
        .route("/social-links", get(handlers::list::<R, SocialLink>))
        .route("/contact", post(handlers::submit_contact::<R>))
        .route("/blogs", get(handlers::list_published_blogs::<R>))
        .route("/blogs/{slug}", get(handlers::get_published_blog::<R>))
        .with_state(state)
}

/// Write routes mounted under `/api/admin`.
///
/// Unguarded on its own; the caller layers the admin guard on top.
pub fn admin_router<R>(state: ContentAppState<R>) -> Router
where
    R: ContentRepository,
{
    Router::new()
        .route("/about", post(handlers::create_about::<R>))
        .route("/about/{id}", put(handlers::update::<R, About>))
        .route("/stack", post(handlers::create::<R, Stack>))
        .route(
            "/stack/{id}",
            put(handlers::update::<R, Stack>).delete(handlers::delete::<R, Stack>),
        )
        .route("/projects", post(handlers::create::<R, Project>))
        .route(
            "/projects/{id}",
            put(handlers::update::<R, Project>).delete(handlers::delete::<R, Project>),
        )
        .route("/experience", post(handlers::create::<R, Experience>))
        .route(
            "/experience/{id}",
            put(handlers::update::<R, Experience>).delete(handlers::delete::<R, Experience>),
        )
        .route("/education", post(handlers::create::<R, Education>))
        .route(
            "/education/{id}",
            put(handlers::update::<R, Education>).delete(handlers::delete::<R, Education>),
        )
        .route("/social-links", post(handlers::create::<R, SocialLink>))
        .route(
            "/social-links/{id}",
            put(handlers::update::<R, SocialLink>).delete(handlers::delete::<R, SocialLink>),
        )
        .route(
            "/blogs",
            get(handlers::list::<R, Blog>).post(handlers::create::<R, Blog>),
        )
        .route(
            "/blogs/{id}",
            get(handlers::get::<R, Blog>)
                .put(handlers::update::<R, Blog>)
                .delete(handlers::delete::<R, Blog>),
        )
        .route("/contacts", get(handlers::list::<R, Contact>))
        .route("/contacts/{id}", delete(handlers::delete::<R, Contact>))
        .route("/contacts/{id}/read", put(handlers::mark_contact_read::<R>))
        .with_state(state)
}
