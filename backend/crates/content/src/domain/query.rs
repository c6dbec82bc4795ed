//! List paging and filters

pub const DEFAULT_LIMIT: i64 = 100;
pub const MAX_LIMIT: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQuery {
    pub skip: i64,
    pub limit: i64,
    /// Only rows with `featured = true` (tables that have the flag)
    pub featured: bool,
    /// Only rows with `published = true` (tables that have the flag)
    pub published_only: bool,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
            featured: false,
            published_only: false,
        }
    }
}

impl ListQuery {
    pub fn published() -> Self {
        Self {
            published_only: true,
            ..Self::default()
        }
    }
}
