//! User model for storage and API.

use serde::{Deserialize, Serialize};

/// User document stored in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Document ID, generated by Firestore on insert.
    #[serde(alias = "_firestore_id", skip_serializing)]
    pub id: Option<String>,
    /// Unique username (uniqueness enforced by check-then-insert, see DESIGN.md)
    pub username: String,
    /// Soft-delete marker; only active users are ever returned by reads
    pub active: bool,
}

impl User {
    /// A new, active user ready for insertion.
    pub fn new(username: &str) -> Self {
        Self {
            id: None,
            username: username.to_string(),
            active: true,
        }
    }
}
