//! User model
//!
//! A registered person who owns financial entries and logs in by email and
//! password.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::UserId;

/// A registered user
///
/// The password is stored and compared as given. It is never hashed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct User {
    /// Assigned by the repository on first save
    pub id: Option<UserId>,

    pub name: String,

    /// Unique across all users
    pub email: String,

    pub password: String,
}

impl User {
    /// Create an unsaved user
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// Set the ID, for test fixtures; repositories assign IDs themselves
    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }

    /// A view of the user that is safe to write to logs
    pub fn redacted(&self) -> RedactedUser<'_> {
        RedactedUser {
            id: self.id,
            name: &self.name,
            email: &self.email,
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

/// A user without its password
#[derive(Debug, Clone, Serialize)]
pub struct RedactedUser<'a> {
    pub id: Option<UserId>,
    pub name: &'a str,
    pub email: &'a str,
}
