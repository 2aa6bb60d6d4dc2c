// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise Tracker: register users and keep a dated log of their exercises.
//!
//! This crate provides a small REST API over a document store (Firestore in
//! production, an in-process store for development and tests).

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::ExerciseService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub exercises: ExerciseService,
}
