//! Work experience

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Entity, merge, nullable, require};
use crate::error::ContentResult;

/// Dates are free text ("Jan 2021", "Present") as the frontend renders them
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Experience {
    pub id: i64,
    pub company: String,
    pub position: String,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub location: Option<String>,
    pub is_current: bool,
    pub order_index: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExperienceCreate {
    pub company: String,
    pub position: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub is_current: bool,
    #[serde(default)]
    pub order_index: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExperienceUpdate {
    pub company: Option<String>,
    pub position: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub start_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub end_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub location: Option<Option<String>>,
    pub is_current: Option<bool>,
    pub order_index: Option<i32>,
}

impl Entity for Experience {
    type Create = ExperienceCreate;
    type Update = ExperienceUpdate;

    const NAME: &'static str = "Experience";
    const TABLE: &'static str = "experience";
    const COLUMNS: &'static [&'static str] = &[
        "company",
        "position",
        "description",
        "start_date",
        "end_date",
        "location",
        "is_current",
        "order_index",
        "created_at",
        "updated_at",
    ];

    fn from_create(c: ExperienceCreate, now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            company: c.company,
            position: c.position,
            description: c.description,
            start_date: c.start_date,
            end_date: c.end_date,
            location: c.location,
            is_current: c.is_current,
            order_index: c.order_index,
            created_at: now,
            updated_at: None,
        }
    }

    fn apply(&mut self, u: ExperienceUpdate, now: DateTime<Utc>) {
        merge(&mut self.company, u.company);
        merge(&mut self.position, u.position);
        merge(&mut self.description, u.description);
        merge(&mut self.start_date, u.start_date);
        merge(&mut self.end_date, u.end_date);
        merge(&mut self.location, u.location);
        merge(&mut self.is_current, u.is_current);
        merge(&mut self.order_index, u.order_index);
        self.updated_at = Some(now);
    }

    fn validate(&self) -> ContentResult<()> {
        require(&self.company, "company")?;
        require(&self.position, "position")
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
