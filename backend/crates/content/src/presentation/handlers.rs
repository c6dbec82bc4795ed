//! HTTP Handlers
//!
//! Generic over the store `R` and, for plain CRUD, the entity `E`.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use crate::domain::entity::{About, Blog, Contact, Entity};
use crate::domain::query::ListQuery;
use crate::domain::repository::{
    AboutRepository, BlogRepository, ContactRepository, CrudRepository,
};
use crate::error::{ContentError, ContentResult};
use crate::presentation::dto::ListParams;

/// Shared state for content handlers
pub struct ContentAppState<R> {
    pub repo: Arc<R>,
}

impl<R> ContentAppState<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo: Arc::new(repo),
        }
    }
}

impl<R> Clone for ContentAppState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

// ============================================================================
// Generic CRUD
// ============================================================================

/// GET list, `?skip=&limit=&featured=`
pub async fn list<R, E>(
    State(state): State<ContentAppState<R>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> ContentResult<Json<Vec<E>>>
where
    R: CrudRepository<E> + Send + Sync + 'static,
    E: Entity,
{
    let Query(params) = params?;
    let rows = <R as CrudRepository<E>>::list(state.repo.as_ref(), &params.into_query()).await?;
    Ok(Json(rows))
}

pub async fn get<R, E>(
    State(state): State<ContentAppState<R>>,
    id: Result<Path<i64>, PathRejection>,
) -> ContentResult<Json<E>>
where
    R: CrudRepository<E> + Send + Sync + 'static,
    E: Entity,
{
    let Path(id) = id?;
    <R as CrudRepository<E>>::get(state.repo.as_ref(), id)
        .await?
        .map(Json)
        .ok_or(ContentError::NotFound(E::NAME))
}

pub async fn create<R, E>(
    State(state): State<ContentAppState<R>>,
    body: Result<Json<E::Create>, JsonRejection>,
) -> ContentResult<(StatusCode, Json<E>)>
where
    R: CrudRepository<E> + Send + Sync + 'static,
    E: Entity,
{
    let Json(body) = body?;
    let created = <R as CrudRepository<E>>::create(state.repo.as_ref(), body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Partial update; fields absent from the body are kept
pub async fn update<R, E>(
    State(state): State<ContentAppState<R>>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<E::Update>, JsonRejection>,
) -> ContentResult<Json<E>>
where
    R: CrudRepository<E> + Send + Sync + 'static,
    E: Entity,
{
    let Path(id) = id?;
    let Json(body) = body?;
    <R as CrudRepository<E>>::update(state.repo.as_ref(), id, body)
        .await?
        .map(Json)
        .ok_or(ContentError::NotFound(E::NAME))
}

pub async fn delete<R, E>(
    State(state): State<ContentAppState<R>>,
    id: Result<Path<i64>, PathRejection>,
) -> ContentResult<StatusCode>
where
    R: CrudRepository<E> + Send + Sync + 'static,
    E: Entity,
{
    let Path(id) = id?;
    if <R as CrudRepository<E>>::delete(state.repo.as_ref(), id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ContentError::NotFound(E::NAME))
    }
}

// ============================================================================
// Entity-specific
// ============================================================================

/// GET /api/about
pub async fn get_about<R>(State(state): State<ContentAppState<R>>) -> ContentResult<Json<About>>
where
    R: AboutRepository + Send + Sync + 'static,
{
    state
        .repo
        .first()
        .await?
        .map(Json)
        .ok_or(ContentError::NotFound(About::NAME))
}

/// POST /api/admin/about. Answers 200 where other creates answer 201.
pub async fn create_about<R>(
    State(state): State<ContentAppState<R>>,
    body: Result<Json<<About as Entity>::Create>, JsonRejection>,
) -> ContentResult<Json<About>>
where
    R: CrudRepository<About> + Send + Sync + 'static,
{
    let Json(body) = body?;
    let about = <R as CrudRepository<About>>::create(state.repo.as_ref(), body).await?;
    Ok(Json(about))
}

/// POST /api/contact
pub async fn submit_contact<R>(
    State(state): State<ContentAppState<R>>,
    body: Result<Json<<Contact as Entity>::Create>, JsonRejection>,
) -> ContentResult<(StatusCode, Json<Contact>)>
where
    R: CrudRepository<Contact> + Send + Sync + 'static,
{
    let Json(body) = body?;
    let contact = <R as CrudRepository<Contact>>::create(state.repo.as_ref(), body).await?;
    tracing::info!(contact_id = contact.id, "Contact message received");
    Ok((StatusCode::CREATED, Json(contact)))
}

/// PUT /api/admin/contacts/{id}/read
pub async fn mark_contact_read<R>(
    State(state): State<ContentAppState<R>>,
    id: Result<Path<i64>, PathRejection>,
) -> ContentResult<Json<Contact>>
where
    R: ContactRepository + Send + Sync + 'static,
{
    let Path(id) = id?;
    state
        .repo
        .mark_read(id)
        .await?
        .map(Json)
        .ok_or(ContentError::NotFound(Contact::NAME))
}

/// GET /api/blogs, published posts only
pub async fn list_published_blogs<R>(
    State(state): State<ContentAppState<R>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> ContentResult<Json<Vec<Blog>>>
where
    R: CrudRepository<Blog> + Send + Sync + 'static,
{
    let Query(params) = params?;
    let query = ListQuery {
        published_only: true,
        ..params.into_query()
    };
    let rows = <R as CrudRepository<Blog>>::list(state.repo.as_ref(), &query).await?;
    Ok(Json(rows))
}

/// GET /api/blogs/{slug}. Drafts are indistinguishable from missing posts.
pub async fn get_published_blog<R>(
    State(state): State<ContentAppState<R>>,
    slug: Result<Path<String>, PathRejection>,
) -> ContentResult<Json<Blog>>
where
    R: BlogRepository + Send + Sync + 'static,
{
    let Path(slug) = slug?;
    state
        .repo
        .get_by_slug(&slug, true)
        .await?
        .map(Json)
        .ok_or(ContentError::NotFound(Blog::NAME))
}
