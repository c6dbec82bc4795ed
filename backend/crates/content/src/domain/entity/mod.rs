//! Portfolio Entities
//!
//! Every table row type implements [`Entity`]: how it is created from a
//! payload, how a partial update merges into it, and how it validates.

pub mod about;
pub mod blog;
pub mod contact;
pub mod education;
pub mod experience;
pub mod project;
pub mod social_link;
pub mod stack;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::query::ListQuery;
use crate::error::{ContentError, ContentResult};

pub use about::{About, AboutCreate, AboutUpdate};
pub use blog::{Blog, BlogCreate, BlogUpdate};
pub use contact::{Contact, ContactCreate, ContactUpdate};
pub use education::{Education, EducationCreate, EducationUpdate};
pub use experience::{Experience, ExperienceCreate, ExperienceUpdate};
pub use project::{Project, ProjectCreate, ProjectUpdate};
pub use social_link::{SocialLink, SocialLinkCreate, SocialLinkUpdate};
pub use stack::{Stack, StackCreate, StackUpdate};

/// How a table is listed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOrder {
    /// `order_index` ascending, then id
    OrderIndex,
    /// `created_at` descending, then id descending
    NewestFirst,
}

impl ListOrder {
    pub fn sql(&self) -> &'static str {
        match self {
            ListOrder::OrderIndex => "order_index ASC, id ASC",
            ListOrder::NewestFirst => "created_at DESC, id DESC",
        }
    }
}

pub trait Entity: Clone + Serialize + Send + Sync + Unpin + 'static {
    type Create: DeserializeOwned + Send + 'static;
    type Update: DeserializeOwned + Send + 'static;

    /// Used in "<NAME> not found"
    const NAME: &'static str;
    const TABLE: &'static str;
    /// Every column except `id`, in `bind` order
    const COLUMNS: &'static [&'static str];
    const ORDER: ListOrder = ListOrder::OrderIndex;
    /// Table has a `featured` flag honoured by [`ListQuery::featured`]
    const FEATURED: bool = false;
    /// Table has a `published` flag honoured by [`ListQuery::published_only`]
    const PUBLISHED: bool = false;

    fn from_create(create: Self::Create, now: DateTime<Utc>) -> Self;

    /// Merge the fields present in `update`. Absent fields stay untouched.
    fn apply(&mut self, update: Self::Update, now: DateTime<Utc>);

    fn validate(&self) -> ContentResult<()>;

    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
    fn created_at(&self) -> DateTime<Utc>;

    fn order_index(&self) -> i32 {
        0
    }

    fn is_featured(&self) -> bool {
        false
    }

    fn is_published(&self) -> bool {
        false
    }

    /// Value that must be unique across the table, if any
    fn unique_key(&self) -> Option<&str> {
        None
    }

    /// Whether a row passes the filters of `query`
    fn matches(&self, query: &ListQuery) -> bool {
        (!query.featured || !Self::FEATURED || self.is_featured())
            && (!query.published_only || !Self::PUBLISHED || self.is_published())
    }
}

/// Overwrite `slot` when the update carries a value
pub(crate) fn merge<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// Distinguish an absent field (`None`) from an explicit `null` (`Some(None)`)
pub(crate) fn nullable<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

pub(crate) fn require(value: &str, field: &str) -> ContentResult<()> {
    if value.trim().is_empty() {
        return Err(ContentError::validation(format!("{field} must not be blank")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "nullable")]
        subtitle: Option<Option<String>>,
    }

    #[test]
    fn test_nullable_absent_vs_null() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.subtitle, None);

        let null: Patch = serde_json::from_str(r#"{"subtitle": null}"#).unwrap();
        assert_eq!(null.subtitle, Some(None));

        let set: Patch = serde_json::from_str(r#"{"subtitle": "hi"}"#).unwrap();
        assert_eq!(set.subtitle, Some(Some("hi".into())));
    }

    #[test]
    fn test_merge() {
        let mut slot = Some("old".to_string());
        merge(&mut slot, None);
        assert_eq!(slot.as_deref(), Some("old"));
        merge(&mut slot, Some(None));
        assert_eq!(slot, None);
    }

    #[test]
    fn test_require() {
        assert!(require("x", "title").is_ok());
        let err = require("  ", "title").unwrap_err();
        assert_eq!(err.to_string(), "title must not be blank");
    }
}
