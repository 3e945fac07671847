// SPDX-License-Identifier: MIT

//! Exercise Tracker API Server
//!
//! Serves the user/exercise CRUD API and the static landing page.

use exercise_tracker::{config::Config, db::FirestoreDb, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Exercise Tracker API");

    // Connect to Firestore. A failed connection is not fatal for the
    // process: the server still comes up and every handler answers with
    // the not-ready error until a restart.
    let db = match FirestoreDb::connect(&config.gcp_project_id).await {
        Ok(db) => db,
        Err(err) => {
            tracing::error!(error = %err, "Database connection failed, serving in not-ready state");
            FirestoreDb::new_disconnected()
        }
    };

    let state = Arc::new(AppState { config: config.clone(), db });

    let app = exercise_tracker::routes::create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("exercise_tracker=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
