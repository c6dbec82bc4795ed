//! Social profile links

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Entity, merge, nullable, require};
use crate::error::ContentResult;

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct SocialLink {
    pub id: i64,
    /// GitHub, LinkedIn, ...
    pub platform: String,
    pub url: String,
    pub icon: Option<String>,
    pub order_index: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SocialLinkCreate {
    pub platform: String,
    pub url: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub order_index: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SocialLinkUpdate {
    pub platform: Option<String>,
    pub url: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub icon: Option<Option<String>>,
    pub order_index: Option<i32>,
}

impl Entity for SocialLink {
    type Create = SocialLinkCreate;
    type Update = SocialLinkUpdate;

    const NAME: &'static str = "Social link";
    const TABLE: &'static str = "social_links";
    const COLUMNS: &'static [&'static str] = &[
        "platform",
        "url",
        "icon",
        "order_index",
        "created_at",
        "updated_at",
    ];

    fn from_create(c: SocialLinkCreate, now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            platform: c.platform,
            url: c.url,
            icon: c.icon,
            order_index: c.order_index,
            created_at: now,
            updated_at: None,
        }
    }

    fn apply(&mut self, u: SocialLinkUpdate, now: DateTime<Utc>) {
        merge(&mut self.platform, u.platform);
        merge(&mut self.url, u.url);
        merge(&mut self.icon, u.icon);
        merge(&mut self.order_index, u.order_index);
        self.updated_at = Some(now);
    }

    fn validate(&self) -> ContentResult<()> {
        require(&self.platform, "platform")?;
        require(&self.url, "url")
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
}
