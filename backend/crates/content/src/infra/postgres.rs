//! PostgreSQL Repository Implementation
//!
//! SQL is generated from [`Entity::TABLE`] and [`Entity::COLUMNS`]; each
//! entity binds its values in column order through [`PgEntity`].

use chrono::Utc;
use sqlx::PgPool;
use sqlx::postgres::{PgArguments, PgRow, Postgres};
use sqlx::query::QueryAs;

use crate::domain::entity::{
    About, Blog, Contact, Education, Entity, Experience, Project, SocialLink, Stack,
};
use crate::domain::query::ListQuery;
use crate::domain::repository::{
    AboutRepository, BlogRepository, ContactRepository, CrudRepository,
};
use crate::error::ContentResult;

type PgQueryAs<'q, E> = QueryAs<'q, Postgres, E, PgArguments>;

/// Entity stored in its own PostgreSQL table
pub trait PgEntity: Entity + for<'r> sqlx::FromRow<'r, PgRow> {
    /// Bind one value per entry of [`Entity::COLUMNS`], in order
    fn bind_columns<'q>(&self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self>;
}

fn insert_sql<E: Entity>() -> String {
    let placeholders = (1..=E::COLUMNS.len())
        .map(|i| format!("${i}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING *",
        E::TABLE,
        E::COLUMNS.join(", "),
        placeholders
    )
}

/// `$1` is the id; columns start at `$2`
fn update_sql<E: Entity>() -> String {
    let assignments = E::COLUMNS
        .iter()
        .enumerate()
        .map(|(i, col)| format!("{col} = ${}", i + 2))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "UPDATE {} SET {} WHERE id = $1 RETURNING *",
        E::TABLE,
        assignments
    )
}

fn list_sql<E: Entity>(query: &ListQuery) -> String {
    let mut filters = Vec::new();
    if query.featured && E::FEATURED {
        filters.push("featured = TRUE");
    }
    if query.published_only && E::PUBLISHED {
        filters.push("published = TRUE");
    }
    let where_clause = if filters.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", filters.join(" AND "))
    };
    format!(
        "SELECT * FROM {}{} ORDER BY {} OFFSET $1 LIMIT $2",
        E::TABLE,
        where_clause,
        E::ORDER.sql()
    )
}

/// PostgreSQL-backed repository for all content tables
#[derive(Clone)]
pub struct PgContentRepository {
    pool: PgPool,
}

impl PgContentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl<E: PgEntity> CrudRepository<E> for PgContentRepository {
    async fn list(&self, query: &ListQuery) -> ContentResult<Vec<E>> {
        let sql = list_sql::<E>(query);
        let rows = sqlx::query_as::<_, E>(&sql)
            .bind(query.skip)
            .bind(query.limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get(&self, id: i64) -> ContentResult<Option<E>> {
        let sql = format!("SELECT * FROM {} WHERE id = $1", E::TABLE);
        let row = sqlx::query_as::<_, E>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, create: E::Create) -> ContentResult<E> {
        let entity = E::from_create(create, Utc::now());
        entity.validate()?;

        let sql = insert_sql::<E>();
        let created = entity
            .bind_columns(sqlx::query_as::<_, E>(&sql))
            .fetch_one(&self.pool)
            .await?;

        tracing::info!(entity = E::NAME, id = created.id(), "Content created");
        Ok(created)
    }

    async fn update(&self, id: i64, update: E::Update) -> ContentResult<Option<E>> {
        let mut tx = self.pool.begin().await?;

        let select = format!("SELECT * FROM {} WHERE id = $1 FOR UPDATE", E::TABLE);
        let current = sqlx::query_as::<_, E>(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(mut entity) = current else {
            return Ok(None);
        };
        entity.apply(update, Utc::now());
        entity.validate()?;

        let sql = update_sql::<E>();
        let updated = entity
            .bind_columns(sqlx::query_as::<_, E>(&sql).bind(id))
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;

        tracing::info!(entity = E::NAME, id, "Content updated");
        Ok(Some(updated))
    }

    async fn delete(&self, id: i64) -> ContentResult<bool> {
        let sql = format!("DELETE FROM {} WHERE id = $1", E::TABLE);
        let deleted = sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected()
            > 0;

        if deleted {
            tracing::info!(entity = E::NAME, id, "Content deleted");
        }
        Ok(deleted)
    }
}

impl AboutRepository for PgContentRepository {
    async fn first(&self) -> ContentResult<Option<About>> {
        let row = sqlx::query_as::<_, About>("SELECT * FROM about ORDER BY id ASC LIMIT 1")
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}

impl ContactRepository for PgContentRepository {
    async fn mark_read(&self, id: i64) -> ContentResult<Option<Contact>> {
        let row = sqlx::query_as::<_, Contact>(
            "UPDATE contact SET is_read = TRUE WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}

impl BlogRepository for PgContentRepository {
    async fn get_by_slug(&self, slug: &str, published_only: bool) -> ContentResult<Option<Blog>> {
        let row = sqlx::query_as::<_, Blog>(
            "SELECT * FROM blog WHERE slug = $1 AND (published OR NOT $2)",
        )
        .bind(slug)
        .bind(published_only)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}

// ============================================================================
// Column bindings
// ============================================================================

impl PgEntity for About {
    fn bind_columns<'q>(&self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self> {
        query
            .bind(self.title.clone())
            .bind(self.subtitle.clone())
            .bind(self.description.clone())
            .bind(self.profile_image.clone())
            .bind(self.resume_url.clone())
            .bind(self.email.clone())
            .bind(self.phone.clone())
            .bind(self.location.clone())
            .bind(self.created_at)
            .bind(self.updated_at)
    }
}

impl PgEntity for Stack {
    fn bind_columns<'q>(&self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self> {
        query
            .bind(self.name.clone())
            .bind(self.category.clone())
            .bind(self.icon.clone())
            .bind(self.proficiency)
            .bind(self.description.clone())
            .bind(self.order_index)
            .bind(self.created_at)
            .bind(self.updated_at)
    }
}

impl PgEntity for Project {
    fn bind_columns<'q>(&self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self> {
        query
            .bind(self.title.clone())
            .bind(self.description.clone())
            .bind(self.short_description.clone())
            .bind(self.image.clone())
            .bind(self.technologies.clone())
            .bind(self.github_url.clone())
            .bind(self.live_url.clone())
            .bind(self.featured)
            .bind(self.order_index)
            .bind(self.created_at)
            .bind(self.updated_at)
    }
}

impl PgEntity for Experience {
    fn bind_columns<'q>(&self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self> {
        query
            .bind(self.company.clone())
            .bind(self.position.clone())
            .bind(self.description.clone())
            .bind(self.start_date.clone())
            .bind(self.end_date.clone())
            .bind(self.location.clone())
            .bind(self.is_current)
            .bind(self.order_index)
            .bind(self.created_at)
            .bind(self.updated_at)
    }
}

impl PgEntity for Education {
    fn bind_columns<'q>(&self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self> {
        query
            .bind(self.institution.clone())
            .bind(self.degree.clone())
            .bind(self.field.clone())
            .bind(self.description.clone())
            .bind(self.start_date.clone())
            .bind(self.end_date.clone())
            .bind(self.grade.clone())
            .bind(self.order_index)
            .bind(self.created_at)
            .bind(self.updated_at)
    }
}

impl PgEntity for Contact {
    fn bind_columns<'q>(&self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self> {
        query
            .bind(self.name.clone())
            .bind(self.email.clone())
            .bind(self.subject.clone())
            .bind(self.message.clone())
            .bind(self.is_read)
            .bind(self.created_at)
    }
}

impl PgEntity for SocialLink {
    fn bind_columns<'q>(&self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self> {
        query
            .bind(self.platform.clone())
            .bind(self.url.clone())
            .bind(self.icon.clone())
            .bind(self.order_index)
            .bind(self.created_at)
            .bind(self.updated_at)
    }
}

impl PgEntity for Blog {
    fn bind_columns<'q>(&self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self> {
        query
            .bind(self.title.clone())
            .bind(self.slug.clone())
            .bind(self.excerpt.clone())
            .bind(self.content.clone())
            .bind(self.featured_image.clone())
            .bind(self.published)
            .bind(self.tags.clone())
            .bind(self.author.clone())
            .bind(self.created_at)
            .bind(self.updated_at)
            .bind(self.published_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_sql() {
        assert_eq!(
            insert_sql::<SocialLink>(),
            "INSERT INTO social_links (platform, url, icon, order_index, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *"
        );
    }

    #[test]
    fn test_update_sql_offsets_past_id() {
        let sql = update_sql::<Contact>();
        assert!(sql.starts_with("UPDATE contact SET name = $2, email = $3"));
        assert!(sql.ends_with("created_at = $7 WHERE id = $1 RETURNING *"));
    }

    #[test]
    fn test_list_sql_filters() {
        let featured = ListQuery {
            featured: true,
            ..Default::default()
        };
        assert_eq!(
            list_sql::<Project>(&featured),
            "SELECT * FROM projects WHERE featured = TRUE \
             ORDER BY order_index ASC, id ASC OFFSET $1 LIMIT $2"
        );

        // Flag ignored on tables without the column
        assert_eq!(
            list_sql::<Stack>(&featured),
            "SELECT * FROM stack ORDER BY order_index ASC, id ASC OFFSET $1 LIMIT $2"
        );

        assert_eq!(
            list_sql::<Blog>(&ListQuery::published()),
            "SELECT * FROM blog WHERE published = TRUE \
             ORDER BY created_at DESC, id DESC OFFSET $1 LIMIT $2"
        );
    }

    #[test]
    fn test_bindings_cover_every_column() {
        // One placeholder per column; bind_columns binds in the same order.
        for (cols, sql) in [
            (About::COLUMNS.len(), insert_sql::<About>()),
            (Blog::COLUMNS.len(), insert_sql::<Blog>()),
        ] {
            assert!(sql.contains(&format!("${cols})")));
            assert!(!sql.contains(&format!("${}", cols + 1)));
        }
    }
}
