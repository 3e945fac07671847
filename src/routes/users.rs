// SPDX-License-Identifier: MIT

//! User registration and listing routes.

use crate::error::{AppError, Result};
use crate::models::User;
use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/users", get(list_users).post(create_user))
}

/// User as returned by the API. Internal fields (the soft-delete marker)
/// are projected out.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.unwrap_or_default(),
            username: user.username,
        }
    }
}

/// List all registered users.
async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<UserResponse>>> {
    if !state.db.is_connected() {
        return Err(AppError::NotReady);
    }

    let users = state
        .db
        .find_all_users()
        .await
        .map_err(|e| AppError::db("Error getting data from the table!", e))?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

#[derive(Deserialize)]
struct CreateUserRequest {
    #[serde(default)]
    username: Option<String>,
}

/// Register a user, or return the existing one with the same name.
///
/// Creation is idempotent by name: posting an already-registered username
/// answers 200 with the original document, same ID included.
async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateUserRequest>,
) -> Result<Json<UserResponse>> {
    if !state.db.is_connected() {
        return Err(AppError::NotReady);
    }

    let username = match body.username.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => return Err(AppError::BadRequest("User name is invalid!".to_string())),
    };

    if let Some(existing) = state
        .db
        .find_user_by_name(&username)
        .await
        .map_err(|e| AppError::db("Error checking user!", e))?
    {
        return Ok(Json(existing.into()));
    }

    let created = state
        .db
        .create_user(&username)
        .await
        .map_err(|e| AppError::db("Error adding new user!", e))?;

    tracing::info!(username = %created.username, "New user registered");

    Ok(Json(created.into()))
}
