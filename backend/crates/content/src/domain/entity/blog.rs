//! Blog posts
//!
//! The slug is the public address of a post. It is derived from the title
//! when left empty and must otherwise already be in `[a-z0-9-]` form.
//! `published_at` is stamped the first time a post is published and kept
//! through later unpublish/republish cycles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Entity, ListOrder, merge, nullable, require};
use crate::error::{ContentError, ContentResult};

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Blog {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub featured_image: Option<String>,
    pub published: bool,
    /// Comma-separated
    pub tags: Option<String>,
    pub author: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlogCreate {
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    pub content: String,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlogUpdate {
    pub title: Option<String>,
    /// Empty string re-derives from the (possibly updated) title
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub excerpt: Option<Option<String>>,
    pub content: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub featured_image: Option<Option<String>>,
    pub published: Option<bool>,
    #[serde(default, deserialize_with = "nullable")]
    pub tags: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub author: Option<Option<String>>,
}

/// Lowercase ASCII alphanumerics; every other run of characters becomes one `-`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && slug
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

fn slug_or_derived(slug: Option<String>, title: &str) -> String {
    match slug.map(|s| s.trim().to_string()) {
        Some(s) if !s.is_empty() => s,
        _ => slugify(title),
    }
}

impl Entity for Blog {
    type Create = BlogCreate;
    type Update = BlogUpdate;

    const NAME: &'static str = "Blog";
    const TABLE: &'static str = "blog";
    const COLUMNS: &'static [&'static str] = &[
        "title",
        "slug",
        "excerpt",
        "content",
        "featured_image",
        "published",
        "tags",
        "author",
        "created_at",
        "updated_at",
        "published_at",
    ];
    const ORDER: ListOrder = ListOrder::NewestFirst;
    const PUBLISHED: bool = true;

    fn from_create(c: BlogCreate, now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            slug: slug_or_derived(c.slug, &c.title),
            title: c.title,
            excerpt: c.excerpt,
            content: c.content,
            featured_image: c.featured_image,
            published: c.published,
            tags: c.tags,
            author: c.author,
            created_at: now,
            updated_at: None,
            published_at: c.published.then_some(now),
        }
    }

    fn apply(&mut self, u: BlogUpdate, now: DateTime<Utc>) {
        merge(&mut self.title, u.title);
        if let Some(slug) = u.slug {
            self.slug = slug_or_derived(Some(slug), &self.title);
        }
        merge(&mut self.excerpt, u.excerpt);
        merge(&mut self.content, u.content);
        merge(&mut self.featured_image, u.featured_image);
        merge(&mut self.published, u.published);
        merge(&mut self.tags, u.tags);
        merge(&mut self.author, u.author);

        if self.published && self.published_at.is_none() {
            self.published_at = Some(now);
        }
        self.updated_at = Some(now);
    }

    fn validate(&self) -> ContentResult<()> {
        require(&self.title, "title")?;
        require(&self.content, "content")?;
        if !is_valid_slug(&self.slug) {
            return Err(ContentError::validation(
                "slug must contain only lowercase letters, digits and hyphens",
            ));
        }
        Ok(())
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn is_published(&self) -> bool {
        self.published
    }

    fn unique_key(&self) -> Option<&str> {
        Some(&self.slug)
    }
}
