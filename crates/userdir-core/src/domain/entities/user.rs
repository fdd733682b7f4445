//! User entity.

use crate::{ConflictField, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted user row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Storage-assigned identifier.
    pub id: UserId,

    /// Unique username.
    pub username: String,

    /// Unique email address.
    pub email: String,

    /// Password as supplied by the client (never exposed via API).
    #[serde(skip_serializing)]
    pub password: String,

    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// The mutable attributes of a user, as supplied on create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl NewUser {
    /// Creates a new set of user attributes.
    #[must_use]
    pub fn new(username: impl Into<String>, email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

impl User {
    /// Reports which unique attribute of `candidate` this row already owns.
    ///
    /// Username is checked first, so a row matching on both reports a
    /// username conflict.
    #[must_use]
    pub fn conflicts_with(&self, candidate: &NewUser) -> Option<ConflictField> {
        if self.username == candidate.username {
            Some(ConflictField::Username)
        } else if self.email == candidate.email {
            Some(ConflictField::Email)
        } else {
            None
        }
    }

    /// Overwrites username, email and password; the id is preserved.
    pub fn apply(&mut self, changes: NewUser) {
        self.username = changes.username;
        self.email = changes.email;
        self.password = changes.password;
        self.updated_at = Utc::now();
    }
}
