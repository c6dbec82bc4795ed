//! Portfolio projects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Entity, merge, nullable, require};
use crate::error::ContentResult;

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub short_description: Option<String>,
    pub image: Option<String>,
    /// Free text, typically comma-separated
    pub technologies: Option<String>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub featured: bool,
    pub order_index: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectCreate {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub technologies: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub live_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub order_index: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub short_description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub image: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub technologies: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub github_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub live_url: Option<Option<String>>,
    pub featured: Option<bool>,
    pub order_index: Option<i32>,
}

impl Entity for Project {
    type Create = ProjectCreate;
    type Update = ProjectUpdate;

    const NAME: &'static str = "Project";
    const TABLE: &'static str = "projects";
    const COLUMNS: &'static [&'static str] = &[
        "title",
        "description",
        "short_description",
        "image",
        "technologies",
        "github_url",
        "live_url",
        "featured",
        "order_index",
        "created_at",
        "updated_at",
    ];
    const FEATURED: bool = true;

    fn from_create(c: ProjectCreate, now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            title: c.title,
            description: c.description,
            short_description: c.short_description,
            image: c.image,
            technologies: c.technologies,
            github_url: c.github_url,
            live_url: c.live_url,
            featured: c.featured,
            order_index: c.order_index,
            created_at: now,
            updated_at: None,
        }
    }

    fn apply(&mut self, u: ProjectUpdate, now: DateTime<Utc>) {
        merge(&mut self.title, u.title);
        merge(&mut self.description, u.description);
        merge(&mut self.short_description, u.short_description);
        merge(&mut self.image, u.image);
        merge(&mut self.technologies, u.technologies);
        merge(&mut self.github_url, u.github_url);
        merge(&mut self.live_url, u.live_url);
        merge(&mut self.featured, u.featured);
        merge(&mut self.order_index, u.order_index);
        self.updated_at = Some(now);
    }

    fn validate(&self) -> ContentResult<()> {
        require(&self.title, "title")?;
        require(&self.description, "description")
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

    fn order_index(&self) -> i32 {
        self.order_index
    }

    fn is_featured(&self) -> bool {
        self.featured
    }
}
