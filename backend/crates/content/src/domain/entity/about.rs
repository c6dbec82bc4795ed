//! About section

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Entity, merge, nullable, require};
use crate::error::ContentResult;

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct About {
    pub id: i64,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: String,
    pub profile_image: Option<String>,
    pub resume_url: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AboutCreate {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    pub description: String,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub resume_url: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AboutUpdate {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub subtitle: Option<Option<String>>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub profile_image: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub resume_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub location: Option<Option<String>>,
}

impl Entity for About {
    type Create = AboutCreate;
    type Update = AboutUpdate;

    const NAME: &'static str = "About section";
    const TABLE: &'static str = "about";
    const COLUMNS: &'static [&'static str] = &[
        "title",
        "subtitle",
        "description",
        "profile_image",
        "resume_url",
        "email",
        "phone",
        "location",
        "created_at",
        "updated_at",
    ];

    fn from_create(c: AboutCreate, now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            title: c.title,
            subtitle: c.subtitle,
            description: c.description,
            profile_image: c.profile_image,
            resume_url: c.resume_url,
            email: c.email,
            phone: c.phone,
            location: c.location,
            created_at: now,
            updated_at: None,
        }
    }

    fn apply(&mut self, u: AboutUpdate, now: DateTime<Utc>) {
        merge(&mut self.title, u.title);
        merge(&mut self.subtitle, u.subtitle);
        merge(&mut self.description, u.description);
        merge(&mut self.profile_image, u.profile_image);
        merge(&mut self.resume_url, u.resume_url);
        merge(&mut self.email, u.email);
        merge(&mut self.phone, u.phone);
        merge(&mut self.location, u.location);
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
}
