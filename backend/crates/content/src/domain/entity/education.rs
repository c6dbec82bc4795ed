//! Education history

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Entity, merge, nullable, require};
use crate::error::ContentResult;

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Education {
    pub id: i64,
    pub institution: String,
    pub degree: String,
    pub field: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub grade: Option<String>,
    pub order_index: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EducationCreate {
    pub institution: String,
    pub degree: String,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub order_index: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EducationUpdate {
    pub institution: Option<String>,
    pub degree: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub field: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub start_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub end_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub grade: Option<Option<String>>,
    pub order_index: Option<i32>,
}

impl Entity for Education {
    type Create = EducationCreate;
    type Update = EducationUpdate;

    const NAME: &'static str = "Education";
    const TABLE: &'static str = "education";
    const COLUMNS: &'static [&'static str] = &[
        "institution",
        "degree",
        "field",
        "description",
        "start_date",
        "end_date",
        "grade",
        "order_index",
        "created_at",
        "updated_at",
    ];

    fn from_create(c: EducationCreate, now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            institution: c.institution,
            degree: c.degree,
            field: c.field,
            description: c.description,
            start_date: c.start_date,
            end_date: c.end_date,
            grade: c.grade,
            order_index: c.order_index,
            created_at: now,
            updated_at: None,
        }
    }

    fn apply(&mut self, u: EducationUpdate, now: DateTime<Utc>) {
        merge(&mut self.institution, u.institution);
        merge(&mut self.degree, u.degree);
        merge(&mut self.field, u.field);
        merge(&mut self.description, u.description);
        merge(&mut self.start_date, u.start_date);
        merge(&mut self.end_date, u.end_date);
        merge(&mut self.grade, u.grade);
        merge(&mut self.order_index, u.order_index);
        self.updated_at = Some(now);
    }

    fn validate(&self) -> ContentResult<()> {
        require(&self.institution, "institution")?;
        require(&self.degree, "degree")
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
