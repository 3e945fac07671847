// SPDX-License-Identifier: MIT

//! Exercise logging and log-listing routes.

use crate::error::{AppError, Result};
use crate::models::Exercise;
use crate::time_utils::format_date_string;
use crate::validation::{self, JsonScalar};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/users/{user_id}/logs", get(get_logs))
        .route("/api/users/{user_id}/exercises", post(create_exercise))
}

// ─── Exercise Logs ───────────────────────────────────────────

#[derive(Deserialize)]
struct LogsQuery {
    /// Lower date bound, exclusive (only applied together with `to`)
    from: Option<String>,
    /// Upper date bound, inclusive
    to: Option<String>,
    /// Cap on the number of log entries; absent, non-numeric or
    /// non-positive means no cap
    limit: Option<String>,
}

/// Whole-minute durations echo back as the integer the client sent,
/// fractional ones keep their fraction.
fn serialize_minutes<S: serde::Serializer>(
    n: &f64,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    if n.fract() == 0.0 && n.abs() <= i64::MAX as f64 {
        serializer.serialize_i64(*n as i64)
    } else {
        serializer.serialize_f64(*n)
    }
}

/// One exercise reduced to its log form.
#[derive(Serialize)]
pub struct LogEntry {
    pub description: String,
    #[serde(serialize_with = "serialize_minutes")]
    pub duration: f64,
    /// Human-readable date, e.g. `Thu Jan 05 2023`
    pub date: String,
}

impl From<Exercise> for LogEntry {
    fn from(exercise: Exercise) -> Self {
        let date = DateTime::parse_from_rfc3339(&exercise.date)
            .map(|d| format_date_string(d.with_timezone(&Utc)))
            .unwrap_or_else(|_| exercise.date.clone());

        Self {
            description: exercise.description,
            duration: exercise.duration,
            date,
        }
    }
}

#[derive(Serialize)]
pub struct LogsResponse {
    pub id: String,
    pub username: String,
    pub count: usize,
    pub log: Vec<LogEntry>,
}

fn parse_date_bound(raw: Option<&str>, message: &str) -> Result<Option<DateTime<Utc>>> {
    raw.map(|r| {
        validation::parse_query_date(r)
            .ok_or_else(|| AppError::BadRequest(message.to_string()))
    })
    .transpose()
}

/// Get a user's exercise log, optionally date-bounded and capped.
async fn get_logs(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(params): Query<LogsQuery>,
) -> Result<Json<LogsResponse>> {
    if !state.db.is_connected() {
        return Err(AppError::NotReady);
    }

    let from = parse_date_bound(params.from.as_deref(), "Please enter valid from date")?;
    let to = parse_date_bound(params.to.as_deref(), "Please enter valid to date")?;

    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            return Err(AppError::BadRequest(
                "From date cannot be greater than to date".to_string(),
            ));
        }
    }

    let user = state
        .db
        .find_user_by_id(&user_id)
        .await
        .map_err(|e| AppError::db("Error checking user!", e))?
        .ok_or(AppError::UserNotFound)?;

    tracing::debug!(
        user_id = %user_id,
        from = ?params.from,
        to = ?params.to,
        limit = ?params.limit,
        "Fetching exercise log"
    );

    // An unparseable limit is ignored rather than rejected
    let limit = params
        .limit
        .as_deref()
        .and_then(|raw| raw.trim().parse::<i64>().ok());

    let exercises = state
        .db
        .find_exercises_by_user(&user_id, from, to, limit)
        .await
        .map_err(|e| AppError::db("Error getting exercises!", e))?;

    let log: Vec<LogEntry> = exercises.into_iter().map(LogEntry::from).collect();

    Ok(Json(LogsResponse {
        id: user_id,
        username: user.username,
        count: log.len(),
        log,
    }))
}

// ─── Exercise Creation ───────────────────────────────────────

#[derive(Deserialize)]
struct CreateExerciseRequest {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    duration: Option<JsonScalar>,
    /// Defaults to today when omitted
    #[serde(default)]
    date: Option<JsonScalar>,
}

#[derive(Serialize)]
pub struct ExerciseResponse {
    /// The owning user's ID
    pub id: String,
    pub username: String,
    pub description: String,
    #[serde(serialize_with = "serialize_minutes")]
    pub duration: f64,
    /// Human-readable date, e.g. `Thu Jan 05 2023`
    pub date: String,
}

/// Log an exercise against a user.
async fn create_exercise(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(body): Json<CreateExerciseRequest>,
) -> Result<Json<ExerciseResponse>> {
    if !state.db.is_connected() {
        return Err(AppError::NotReady);
    }

    // Field checks run in a fixed order and the first failure is reported.
    if user_id.trim().is_empty() {
        return Err(AppError::BadRequest("id is missing!".to_string()));
    }

    let description = match body.description.as_deref().map(str::trim) {
        Some(d) if !d.is_empty() => d.to_string(),
        _ => return Err(AppError::BadRequest("Description is missing!".to_string())),
    };

    let duration = validation::parse_duration(body.duration.as_ref())
        .ok_or_else(|| AppError::BadRequest("Duration is missing or invalid!".to_string()))?;

    let date = validation::parse_exercise_date(body.date.as_ref())
        .ok_or_else(|| AppError::BadRequest("Date is missing or invalid!".to_string()))?;

    let user = state
        .db
        .find_user_by_id(&user_id)
        .await
        .map_err(|e| AppError::db("Error checking user!", e))?
        .ok_or(AppError::UserNotFound)?;

    let created = state
        .db
        .create_exercise(&user_id, &description, duration, date)
        .await
        .map_err(|e| AppError::db("Error adding exercise!", e))?;

    tracing::info!(
        user_id = %user_id,
        duration = created.duration,
        "Exercise logged"
    );

    Ok(Json(ExerciseResponse {
        id: user_id,
        username: user.username,
        description: created.description,
        duration: created.duration,
        date: format_date_string(date),
    }))
}
