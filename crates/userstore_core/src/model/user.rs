//! User domain model.
//!
//! # Responsibility
//! - Define the single entity managed by this crate.
//! - Describe column limits mirrored by the `users` schema.
//!
//! # Invariants
//! - `id` is assigned by storage on create and treated as immutable
//!   afterwards. Callers may still supply one explicitly.
//! - Text fields are not validated here; `MAX_TEXT_LEN` documents the
//!   declared column width only.

use serde::{Deserialize, Serialize};

/// Primary key of a persisted user row.
pub type UserId = u64;

/// Table name derived from the pluralized entity name.
pub const USERS_TABLE: &str = "users";

/// Declared width of the `name` and `email` columns.
pub const MAX_TEXT_LEN: usize = 255;

/// Persisted user record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Auto-incremented by storage. `0` means "not yet assigned".
    pub id: UserId,
    pub name: String,
    /// No format or uniqueness constraint is enforced.
    pub email: String,
    pub age: u64,
}

impl User {
    /// Creates an unsaved user; storage assigns `id` on create.
    pub fn new(name: impl Into<String>, email: impl Into<String>, age: u64) -> Self {
        Self {
            id: 0,
            name: name.into(),
            email: email.into(),
            age,
        }
    }

    /// Creates a user with a caller-provided ID.
    pub fn with_id(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        age: u64,
    ) -> Self {
        Self {
            id,
            ..Self::new(name, email, age)
        }
    }

    /// Returns whether storage has assigned (or the caller supplied) an ID.
    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }
}
