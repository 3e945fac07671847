//! Database layer (Firestore).

pub mod firestore;

pub use firestore::{DbError, FirestoreDb};

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const EXERCISES: &str = "exercises";
}
