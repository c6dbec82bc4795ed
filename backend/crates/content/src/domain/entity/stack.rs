//! Skills / tech stack

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Entity, merge, nullable, require};
use crate::error::{ContentError, ContentResult};

pub const PROFICIENCY_RANGE: std::ops::RangeInclusive<i32> = 1..=100;

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Stack {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    pub icon: Option<String>,
    pub proficiency: Option<i32>,
    pub description: Option<String>,
    pub order_index: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StackCreate {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub proficiency: Option<i32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub order_index: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StackUpdate {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub category: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub icon: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub proficiency: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    pub order_index: Option<i32>,
}

impl Entity for Stack {
    type Create = StackCreate;
    type Update = StackUpdate;

    const NAME: &'static str = "Stack";
    const TABLE: &'static str = "stack";
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "category",
        "icon",
        "proficiency",
        "description",
        "order_index",
        "created_at",
        "updated_at",
    ];

    fn from_create(c: StackCreate, now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            name: c.name,
            category: c.category,
            icon: c.icon,
            proficiency: c.proficiency,
            description: c.description,
            order_index: c.order_index,
            created_at: now,
            updated_at: None,
        }
    }

    fn apply(&mut self, u: StackUpdate, now: DateTime<Utc>) {
        merge(&mut self.name, u.name);
        merge(&mut self.category, u.category);
        merge(&mut self.icon, u.icon);
        merge(&mut self.proficiency, u.proficiency);
        merge(&mut self.description, u.description);
        merge(&mut self.order_index, u.order_index);
        self.updated_at = Some(now);
    }

    fn validate(&self) -> ContentResult<()> {
        require(&self.name, "name")?;
        match self.proficiency {
            Some(p) if !PROFICIENCY_RANGE.contains(&p) => Err(ContentError::validation(
                "proficiency must be between 1 and 100",
            )),
            _ => Ok(()),
        }
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
