//! Exercise model for storage and API.

use crate::time_utils::format_utc_rfc3339;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Exercise document stored in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    /// Document ID, generated by Firestore on insert.
    #[serde(alias = "_firestore_id", skip_serializing)]
    pub id: Option<String>,
    /// Owning user's document ID. Existence is checked at creation time,
    /// not enforced by the store.
    pub user_id: String,
    /// What was done
    pub description: String,
    /// Duration in minutes, always positive; fractional minutes allowed
    pub duration: f64,
    /// Exercise date as a fixed-width RFC3339 UTC string (sortable)
    pub date: String,
    /// Soft-delete marker; only active exercises are ever returned by reads
    pub active: bool,
}

impl Exercise {
    /// A new, active exercise ready for insertion.
    pub fn new(user_id: &str, description: &str, duration: f64, date: DateTime<Utc>) -> Self {
        Self {
            id: None,
            user_id: user_id.to_string(),
            description: description.to_string(),
            duration,
            date: format_utc_rfc3339(date),
            active: true,
        }
    }
}
