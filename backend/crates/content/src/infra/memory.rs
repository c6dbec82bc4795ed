//! In-memory Repository Implementation
//!
//! For tests and local runs without a database. Applies the same ordering,
//! filters, validation and slug uniqueness as the PostgreSQL store.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;

use crate::domain::entity::{
    About, Blog, Contact, ContactUpdate, Education, Entity, Experience, ListOrder, Project,
    SocialLink, Stack,
};
use crate::domain::query::ListQuery;
use crate::domain::repository::{
    AboutRepository, BlogRepository, ContactRepository, CrudRepository,
};
use crate::error::{ContentError, ContentResult};

/// Rows of one entity type with a monotonically increasing id
pub struct Table<E> {
    rows: Vec<E>,
    next_id: i64,
}

impl<E> Default for Table<E> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
        }
    }
}

impl<E: Entity> Table<E> {
    fn list(&self, query: &ListQuery) -> Vec<E> {
        let mut rows: Vec<&E> = self.rows.iter().filter(|e| e.matches(query)).collect();
        match E::ORDER {
            ListOrder::OrderIndex => rows.sort_by_key(|e| (e.order_index(), e.id())),
            ListOrder::NewestFirst => {
                rows.sort_by_key(|e| std::cmp::Reverse((e.created_at(), e.id())))
            }
        }
        rows.into_iter()
            .skip(query.skip.max(0) as usize)
            .take(query.limit.max(0) as usize)
            .cloned()
            .collect()
    }

    fn get(&self, id: i64) -> Option<E> {
        self.rows.iter().find(|e| e.id() == id).cloned()
    }

    fn ensure_unique(&self, entity: &E) -> ContentResult<()> {
        let Some(key) = entity.unique_key() else {
            return Ok(());
        };
        let taken = self
            .rows
            .iter()
            .any(|e| e.id() != entity.id() && e.unique_key() == Some(key));
        if taken {
            return Err(ContentError::Conflict("Duplicate key value".into()));
        }
        Ok(())
    }

    fn create(&mut self, create: E::Create) -> ContentResult<E> {
        let mut entity = E::from_create(create, Utc::now());
        entity.validate()?;
        entity.set_id(self.next_id);
        self.ensure_unique(&entity)?;

        self.next_id += 1;
        self.rows.push(entity.clone());
        Ok(entity)
    }

    fn update(&mut self, id: i64, update: E::Update) -> ContentResult<Option<E>> {
        let Some(pos) = self.rows.iter().position(|e| e.id() == id) else {
            return Ok(None);
        };

        let mut entity = self.rows[pos].clone();
        entity.apply(update, Utc::now());
        entity.validate()?;
        self.ensure_unique(&entity)?;

        self.rows[pos] = entity.clone();
        Ok(Some(entity))
    }

    fn delete(&mut self, id: i64) -> bool {
        let before = self.rows.len();
        self.rows.retain(|e| e.id() != id);
        self.rows.len() != before
    }
}

/// Storage slot for one entity type
pub trait TableOf<E> {
    fn table(&mut self) -> &mut Table<E>;
}

#[derive(Default)]
pub struct Tables {
    about: Table<About>,
    stack: Table<Stack>,
    projects: Table<Project>,
    experience: Table<Experience>,
    education: Table<Education>,
    contacts: Table<Contact>,
    social_links: Table<SocialLink>,
    blogs: Table<Blog>,
}

impl TableOf<About> for Tables {
    fn table(&mut self) -> &mut Table<About> {
        &mut self.about
    }
}

impl TableOf<Stack> for Tables {
    fn table(&mut self) -> &mut Table<Stack> {
        &mut self.stack
    }
}

impl TableOf<Project> for Tables {
    fn table(&mut self) -> &mut Table<Project> {
        &mut self.projects
    }
}

impl TableOf<Experience> for Tables {
    fn table(&mut self) -> &mut Table<Experience> {
        &mut self.experience
    }
}

impl TableOf<Education> for Tables {
    fn table(&mut self) -> &mut Table<Education> {
        &mut self.education
    }
}

impl TableOf<Contact> for Tables {
    fn table(&mut self) -> &mut Table<Contact> {
        &mut self.contacts
    }
}

impl TableOf<SocialLink> for Tables {
    fn table(&mut self) -> &mut Table<SocialLink> {
        &mut self.social_links
    }
}

impl TableOf<Blog> for Tables {
    fn table(&mut self) -> &mut Table<Blog> {
        &mut self.blogs
    }
}

#[derive(Default)]
pub struct MemoryContentRepository {
    tables: Mutex<Tables>,
}

impl MemoryContentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn with_table<E, T>(&self, f: impl FnOnce(&mut Table<E>) -> T) -> T
    where
        Tables: TableOf<E>,
    {
        f(self.lock().table())
    }
}

impl<E> CrudRepository<E> for MemoryContentRepository
where
    E: Entity,
    Tables: TableOf<E>,
{
    async fn list(&self, query: &ListQuery) -> ContentResult<Vec<E>> {
        Ok(self.with_table(|t: &mut Table<E>| t.list(query)))
    }

    async fn get(&self, id: i64) -> ContentResult<Option<E>> {
        Ok(self.with_table(|t: &mut Table<E>| t.get(id)))
    }

    async fn create(&self, create: E::Create) -> ContentResult<E> {
        self.with_table(|t: &mut Table<E>| t.create(create))
    }

    async fn update(&self, id: i64, update: E::Update) -> ContentResult<Option<E>> {
        self.with_table(|t: &mut Table<E>| t.update(id, update))
    }

    async fn delete(&self, id: i64) -> ContentResult<bool> {
        Ok(self.with_table(|t: &mut Table<E>| t.delete(id)))
    }
}

impl AboutRepository for MemoryContentRepository {
    async fn first(&self) -> ContentResult<Option<About>> {
        Ok(self.with_table(|t: &mut Table<About>| t.rows.iter().min_by_key(|a| a.id).cloned()))
    }
}

impl ContactRepository for MemoryContentRepository {
    async fn mark_read(&self, id: i64) -> ContentResult<Option<Contact>> {
        self.with_table(|t: &mut Table<Contact>| t.update(id, ContactUpdate::mark_read()))
    }
}

impl BlogRepository for MemoryContentRepository {
    async fn get_by_slug(&self, slug: &str, published_only: bool) -> ContentResult<Option<Blog>> {
        Ok(self.with_table(|t: &mut Table<Blog>| {
            t.rows
                .iter()
                .find(|b| b.slug == slug && (b.published || !published_only))
                .cloned()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::{BlogCreate, BlogUpdate, StackCreate};

    fn stack(name: &str, order_index: i32) -> StackCreate {
        StackCreate {
            name: name.into(),
            category: None,
            icon: None,
            proficiency: None,
            description: None,
            order_index,
        }
    }

    fn blog(title: &str, published: bool) -> BlogCreate {
        BlogCreate {
            title: title.into(),
            slug: None,
            excerpt: None,
            content: "Body".into(),
            featured_image: None,
            published,
            tags: None,
            author: None,
        }
    }

    #[tokio::test]
    async fn test_list_ordered_by_order_index() {
        let repo = MemoryContentRepository::new();
        for (name, idx) in [("C", 2), ("A", 0), ("B", 1), ("A2", 0)] {
            CrudRepository::<Stack>::create(&repo, stack(name, idx))
                .await
                .unwrap();
        }

        let rows: Vec<Stack> = CrudRepository::<Stack>::list(&repo, &ListQuery::default())
            .await
            .unwrap();
        let names: Vec<_> = rows.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["A", "A2", "B", "C"]);

        let page = CrudRepository::<Stack>::list(
            &repo,
            &ListQuery {
                skip: 1,
                limit: 2,
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].name, "A2");
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let repo = MemoryContentRepository::new();
        let first = CrudRepository::<Stack>::create(&repo, stack("A", 0))
            .await
            .unwrap();
        assert!(CrudRepository::<Stack>::delete(&repo, first.id).await.unwrap());
        assert!(!CrudRepository::<Stack>::delete(&repo, first.id).await.unwrap());

        let second = CrudRepository::<Stack>::create(&repo, stack("B", 0))
            .await
            .unwrap();
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_update_missing_row() {
        let repo = MemoryContentRepository::new();
        let result = CrudRepository::<Stack>::update(&repo, 42, Default::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_invalid_update_leaves_row_untouched() {
        let repo = MemoryContentRepository::new();
        let created = CrudRepository::<Stack>::create(&repo, stack("Rust", 0))
            .await
            .unwrap();

        let err = CrudRepository::<Stack>::update(
            &repo,
            created.id,
            crate::domain::entity::StackUpdate {
                proficiency: Some(Some(500)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ContentError::Validation(_)));

        let stored = CrudRepository::<Stack>::get(&repo, created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored, created);
    }

    #[tokio::test]
    async fn test_blog_slug_unique() {
        let repo = MemoryContentRepository::new();
        CrudRepository::<Blog>::create(&repo, blog("Hello World", true))
            .await
            .unwrap();

        let err = CrudRepository::<Blog>::create(&repo, blog("Hello, world!", false))
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_blog_by_slug_respects_published() {
        let repo = MemoryContentRepository::new();
        let draft = CrudRepository::<Blog>::create(&repo, blog("Draft Post", false))
            .await
            .unwrap();

        assert!(repo.get_by_slug("draft-post", true).await.unwrap().is_none());
        assert!(repo.get_by_slug("draft-post", false).await.unwrap().is_some());

        CrudRepository::<Blog>::update(
            &repo,
            draft.id,
            BlogUpdate {
                published: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let published = repo.get_by_slug("draft-post", true).await.unwrap().unwrap();
        assert!(published.published_at.is_some());
    }

    #[tokio::test]
    async fn test_published_only_listing() {
        let repo = MemoryContentRepository::new();
        CrudRepository::<Blog>::create(&repo, blog("One", true))
            .await
            .unwrap();
        CrudRepository::<Blog>::create(&repo, blog("Two", false))
            .await
            .unwrap();
        CrudRepository::<Blog>::create(&repo, blog("Three", true))
            .await
            .unwrap();

        let all: Vec<Blog> = CrudRepository::<Blog>::list(&repo, &ListQuery::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 3);

        let public: Vec<Blog> = CrudRepository::<Blog>::list(&repo, &ListQuery::published())
            .await
            .unwrap();
        let titles: Vec<_> = public.iter().map(|b| b.title.as_str()).collect();
        // Newest first; equal timestamps fall back to id
        assert_eq!(titles, ["Three", "One"]);
    }

    #[tokio::test]
    async fn test_mark_read_and_about_first() {
        let repo = MemoryContentRepository::new();
        assert!(repo.mark_read(1).await.unwrap().is_none());
        assert!(repo.first().await.unwrap().is_none());

        let contact = CrudRepository::<Contact>::create(
            &repo,
            crate::domain::entity::ContactCreate {
                name: "Bob".into(),
                email: "bob@example.com".into(),
                subject: None,
                message: "Hi".into(),
            },
        )
        .await
        .unwrap();
        assert!(repo.mark_read(contact.id).await.unwrap().unwrap().is_read);
    }
}
