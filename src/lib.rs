// SPDX-License-Identifier: MIT

//! Exercise Tracker: a small user/exercise CRUD API.
//!
//! This crate provides the backend API for registering users and logging
//! exercises against them, backed by a Firestore document store.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod time_utils;
pub mod validation;

use config::Config;
use db::FirestoreDb;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
}
