//! Contact form messages

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Entity, ListOrder, merge, nullable, require};
use crate::error::{ContentError, ContentResult};

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Public submission; `is_read` is never client-controlled
#[derive(Debug, Clone, Deserialize)]
pub struct ContactCreate {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub subject: Option<Option<String>>,
    pub message: Option<String>,
    pub is_read: Option<bool>,
}

impl ContactUpdate {
    pub fn mark_read() -> Self {
        Self {
            is_read: Some(true),
            ..Default::default()
        }
    }
}

impl Entity for Contact {
    type Create = ContactCreate;
    type Update = ContactUpdate;

    const NAME: &'static str = "Contact";
    const TABLE: &'static str = "contact";
    const COLUMNS: &'static [&'static str] =
        &["name", "email", "subject", "message", "is_read", "created_at"];
    const ORDER: ListOrder = ListOrder::NewestFirst;

    fn from_create(c: ContactCreate, now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            name: c.name,
            email: c.email.trim().to_string(),
            subject: c.subject,
            message: c.message,
            is_read: false,
            created_at: now,
        }
    }

    // No updated_at column
    fn apply(&mut self, u: ContactUpdate, _now: DateTime<Utc>) {
        merge(&mut self.name, u.name);
        merge(&mut self.email, u.email);
        merge(&mut self.subject, u.subject);
        merge(&mut self.message, u.message);
        merge(&mut self.is_read, u.is_read);
    }

    fn validate(&self) -> ContentResult<()> {
        require(&self.name, "name")?;
        require(&self.message, "message")?;
        match self.email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(ContentError::validation("email must be a valid address")),
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
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(email: &str) -> Contact {
        Contact::from_create(
            ContactCreate {
                name: "Bob".into(),
                email: email.into(),
                subject: None,
                message: "Hello there".into(),
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_new_contact_is_unread() {
        let c = contact("bob@example.com");
        assert!(!c.is_read);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_email_shape() {
        for bad in ["", "bob", "@example.com", "bob@"] {
            assert!(contact(bad).validate().is_err(), "{bad:?} accepted");
        }
        assert!(contact(" bob@example.com ").validate().is_ok());
    }

    #[test]
    fn test_mark_read() {
        let mut c = contact("bob@example.com");
        c.apply(ContactUpdate::mark_read(), Utc::now());
        assert!(c.is_read);
        assert_eq!(c.message, "Hello there");
    }
}
