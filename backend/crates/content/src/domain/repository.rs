//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.

use crate::domain::entity::{About, Blog, Contact, Education, Entity, Experience, Project};
use crate::domain::entity::{SocialLink, Stack};
use crate::domain::query::ListQuery;
use crate::error::ContentResult;

/// Generic CRUD over one entity table
#[trait_variant::make(CrudRepository: Send)]
pub trait LocalCrudRepository<E: Entity> {
    async fn list(&self, query: &ListQuery) -> ContentResult<Vec<E>>;

    async fn get(&self, id: i64) -> ContentResult<Option<E>>;

    /// Validates, inserts and returns the stored row
    async fn create(&self, create: E::Create) -> ContentResult<E>;

    /// Merge `update` into the current row and validate the result.
    /// `None` when no row has this id. Concurrent updates: last write wins.
    async fn update(&self, id: i64, update: E::Update) -> ContentResult<Option<E>>;

    /// Whether a row was removed
    async fn delete(&self, id: i64) -> ContentResult<bool>;
}

#[trait_variant::make(AboutRepository: Send)]
pub trait LocalAboutRepository {
    /// The about section shown publicly (lowest id)
    async fn first(&self) -> ContentResult<Option<About>>;
}

#[trait_variant::make(ContactRepository: Send)]
pub trait LocalContactRepository {
    async fn mark_read(&self, id: i64) -> ContentResult<Option<Contact>>;
}

#[trait_variant::make(BlogRepository: Send)]
pub trait LocalBlogRepository {
    async fn get_by_slug(&self, slug: &str, published_only: bool) -> ContentResult<Option<Blog>>;
}

/// Everything the content routes need from one store
pub trait ContentRepository:
    CrudRepository<About>
    + CrudRepository<Stack>
    + CrudRepository<Project>
    + CrudRepository<Experience>
    + CrudRepository<Education>
    + CrudRepository<Contact>
    + CrudRepository<SocialLink>
    + CrudRepository<Blog>
    + AboutRepository
    + ContactRepository
    + BlogRepository
    + Send
    + Sync
    + 'static
{
}

impl<T> ContentRepository for T where
    T: CrudRepository<About>
        + CrudRepository<Stack>
        + CrudRepository<Project>
        + CrudRepository<Experience>
        + CrudRepository<Education>
        + CrudRepository<Contact>
        + CrudRepository<SocialLink>
        + CrudRepository<Blog>
        + AboutRepository
        + ContactRepository
        + BlogRepository
        + Send
        + Sync
        + 'static
{
}
