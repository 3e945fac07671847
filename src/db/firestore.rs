// SPDX-License-Identifier: MIT

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (registration and lookup)
//! - Exercises (logging and date-bounded listing)
//!
//! All reads filter on the `active` soft-delete marker; nothing in this
//! service ever hard-deletes or deactivates a document.

use crate::db::collections;
use crate::models::{Exercise, User};
use crate::time_utils::format_utc_rfc3339;
use chrono::{DateTime, Utc};

/// Store-layer error. Handlers wrap this with the public message their
/// endpoint contract requires; the detail here is only ever logged.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct DbError(pub String);

/// Firestore database client.
///
/// `client` is `None` until a connection has been established; that is the
/// readiness state handlers check before doing any work. A connection
/// failure at startup is permanent for the process lifetime.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Connect to Firestore.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn connect(project_id: &str) -> Result<Self, DbError> {
        // If the emulator environment variable is set, use unauthenticated
        // connection to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::connect_emulator(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| DbError(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Connect to the Firestore emulator with unauthenticated access.
    async fn connect_emulator(project_id: &str) -> Result<Self, DbError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        // ExternalJwtFunctionSource provides a dummy token without needing a
        // custom TokenSource implementation struct.
        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| DbError(format!("Failed to connect to Firestore Emulator: {}", e)))?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a handle in the permanently-disconnected (not ready) state.
    ///
    /// Used when the startup connection fails, and by offline tests.
    /// All database operations return an error if called.
    pub fn new_disconnected() -> Self {
        Self { client: None }
    }

    /// Readiness flag: has the store connection completed initialization?
    pub fn is_connected(&self) -> bool {
        self.client.is_some()
    }

    /// Helper to get the client or return an error if not connected.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, DbError> {
        self.client
            .as_ref()
            .ok_or_else(|| DbError("Database not connected".to_string()))
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Find an active user by exact username.
    pub async fn find_user_by_name(&self, username: &str) -> Result<Option<User>, DbError> {
        let username = username.to_string();
        let mut users: Vec<User> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .filter(move |q| {
                q.for_all([
                    q.field("username").eq(username.clone()),
                    q.field("active").eq(true),
                ])
            })
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| DbError(e.to_string()))?;

        Ok(users.pop())
    }

    /// Find an active user by document ID.
    pub async fn find_user_by_id(&self, user_id: &str) -> Result<Option<User>, DbError> {
        let user: Option<User> = self
            .get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| DbError(e.to_string()))?;

        // Soft-deleted users are treated as absent
        Ok(user.filter(|u| u.active))
    }

    /// List all active users.
    pub async fn find_all_users(&self) -> Result<Vec<User>, DbError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .filter(|q| q.for_all([q.field("active").eq(true)]))
            .obj()
            .query()
            .await
            .map_err(|e| DbError(e.to_string()))
    }

    /// Insert a new active user with a store-generated document ID.
    ///
    /// Callers check `find_user_by_name` first; this is a check-then-insert
    /// scheme, not an atomic uniqueness guarantee (see DESIGN.md).
    pub async fn create_user(&self, username: &str) -> Result<User, DbError> {
        let user = User::new(username);

        let created: User = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::USERS)
            .generate_document_id()
            .object(&user)
            .execute()
            .await
            .map_err(|e| DbError(e.to_string()))?;

        tracing::debug!(username, id = ?created.id, "User created");

        Ok(created)
    }

    // ─── Exercise Operations ─────────────────────────────────────

    /// Insert a new active exercise with a store-generated document ID.
    pub async fn create_exercise(
        &self,
        user_id: &str,
        description: &str,
        duration: f64,
        date: DateTime<Utc>,
    ) -> Result<Exercise, DbError> {
        let exercise = Exercise::new(user_id, description, duration, date);

        let created: Exercise = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::EXERCISES)
            .generate_document_id()
            .object(&exercise)
            .execute()
            .await
            .map_err(|e| DbError(e.to_string()))?;

        tracing::debug!(user_id, id = ?created.id, "Exercise created");

        Ok(created)
    }

    /// List active exercises for a user, newest first.
    ///
    /// The date window applies only when BOTH bounds are supplied:
    /// strictly after `from`, up to and including `to`. A `limit` that is
    /// absent or not positive means unlimited.
    pub async fn find_exercises_by_user(
        &self,
        user_id: &str,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        limit: Option<i64>,
    ) -> Result<Vec<Exercise>, DbError> {
        let query = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::EXERCISES);

        let user_id = user_id.to_string();
        let query = if let (Some(from), Some(to)) = (from, to) {
            // Stored dates are fixed-width RFC3339, so string comparison
            // in the store matches chronological comparison.
            let from = format_utc_rfc3339(from);
            let to = format_utc_rfc3339(to);
            query.filter(move |q| {
                q.for_all([
                    q.field("user_id").eq(user_id.clone()),
                    q.field("active").eq(true),
                    q.field("date").greater_than(from.clone()),
                    q.field("date").less_than_or_equal(to.clone()),
                ])
            })
        } else {
            query.filter(move |q| {
                q.for_all([
                    q.field("user_id").eq(user_id.clone()),
                    q.field("active").eq(true),
                ])
            })
        };

        let query = query.order_by([("date", firestore::FirestoreQueryDirection::Descending)]);

        // Anything below 1 means "no cap"
        let query = match limit {
            Some(limit) if limit > 0 => query.limit(limit.min(u32::MAX as i64) as u32),
            _ => query,
        };

        query
            .obj()
            .query()
            .await
            .map_err(|e| DbError(e.to_string()))
    }
}
