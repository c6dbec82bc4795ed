//! API DTOs (Data Transfer Objects)
//!
//! Entities serialize as-is; only query strings need their own types.

use serde::Deserialize;

use crate::domain::query::{DEFAULT_LIMIT, ListQuery, MAX_LIMIT};

/// Query string accepted by list endpoints: `?skip=&limit=&featured=`
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub featured: Option<bool>,
}

impl ListParams {
    /// Negative skip becomes 0; limit is clamped to `1..=MAX_LIMIT`.
    pub fn into_query(self) -> ListQuery {
        ListQuery {
            skip: self.skip.unwrap_or(0).max(0),
            limit: self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
            featured: self.featured.unwrap_or(false),
            published_only: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let q = ListParams::default().into_query();
        assert_eq!(q, ListQuery::default());
        assert_eq!(q.limit, 100);
    }

    #[test]
    fn test_clamping() {
        let q = ListParams {
            skip: Some(-5),
            limit: Some(1000),
            featured: Some(true),
        }
        .into_query();
        assert_eq!(q.skip, 0);
        assert_eq!(q.limit, MAX_LIMIT);
        assert!(q.featured);

        let q = ListParams {
            limit: Some(0),
            ..Default::default()
        }
        .into_query();
        assert_eq!(q.limit, 1);
    }
}
