//! Admin Name Value Object
//!
//! The login handle of an admin account.
//!
//! ## Invariants
//! - NFKC normalized, surrounding whitespace trimmed
//! - 1 to 100 characters
//! - No whitespace or control characters inside
//! - Case is preserved and significant

use derive_more::Display;
use serde::Serialize;
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Maximum length for admin names (in characters)
pub const ADMIN_NAME_MAX_LENGTH: usize = 100;

/// Error returned when admin name validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminNameError {
    Empty,
    TooLong { length: usize, max: usize },
    InvalidCharacter { position: usize },
}

impl fmt::Display for AdminNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Username cannot be empty"),
            Self::TooLong { length, max } => {
                write!(f, "Username is too long ({length} chars, maximum {max})")
            }
            Self::InvalidCharacter { position } => {
                write!(f, "Username contains whitespace or a control character at position {position}")
            }
        }
    }
}

impl std::error::Error for AdminNameError {}

/// Validated admin name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Display)]
#[display("{_0}")]
#[serde(transparent)]
pub struct AdminName(String);

impl AdminName {
    pub fn new(input: impl AsRef<str>) -> Result<Self, AdminNameError> {
        let normalized: String = input.as_ref().nfkc().collect();
        let name = normalized.trim();

        if name.is_empty() {
            return Err(AdminNameError::Empty);
        }

        let length = name.chars().count();
        if length > ADMIN_NAME_MAX_LENGTH {
            return Err(AdminNameError::TooLong {
                length,
                max: ADMIN_NAME_MAX_LENGTH,
            });
        }

        if let Some(position) = name
            .chars()
            .position(|c| c.is_whitespace() || c.is_control())
        {
            return Err(AdminNameError::InvalidCharacter { position });
        }

        Ok(Self(name.to_string()))
    }

    /// Wrap a value read from the database (already validated on write)
    #[inline]
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for AdminName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
