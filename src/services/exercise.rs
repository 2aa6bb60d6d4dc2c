// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise log service.
//!
//! Handles the four user-facing workflows:
//! 1. Register a user
//! 2. List users
//! 3. Append an exercise to a user's log
//! 4. Read back a user's log, filtered and capped

use crate::db::ExerciseStore;
use crate::error::{AppError, Result};
use crate::models::{Exercise, LogFilter, LogReport, NewUser, User, UserLog};
use chrono::{DateTime, Utc};
use futures_util::{stream, StreamExt};
use std::sync::Arc;
use validator::Validate;

const MAX_CONCURRENT_DB_OPS: usize = 50;

/// Input for appending an exercise to a user's log.
#[derive(Debug, Clone)]
pub struct NewExercise {
    pub user_id: String,
    pub description: String,
    pub duration: f64,
    /// Defaults to the time the request is handled
    pub date: Option<DateTime<Utc>>,
}

/// Business logic over an injected document store.
#[derive(Clone)]
pub struct ExerciseService {
    store: Arc<dyn ExerciseStore>,
}

impl ExerciseService {
    pub fn new(store: Arc<dyn ExerciseStore>) -> Self {
        Self { store }
    }

    /// Register a user after validating the username.
    pub async fn create_user(&self, input: NewUser) -> Result<User> {
        input.validate()?;

        let user = User::new(input.username);
        self.store.create_user(&user).await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User created");
        Ok(user)
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.store.list_users().await
    }

    /// Create an exercise and append it to the user's log.
    ///
    /// The user must exist before anything is written. If the append still
    /// fails (the user vanished, or the store errored), the new exercise is
    /// deleted again so no unreferenced record is left behind.
    pub async fn add_exercise(&self, input: NewExercise) -> Result<User> {
        let date = input.date.unwrap_or_else(Utc::now);

        if input.user_id.is_empty() {
            return Err(AppError::Validation("userId is required".to_string()));
        }
        if !input.duration.is_finite() {
            return Err(AppError::Validation(
                "duration must be a finite number".to_string(),
            ));
        }

        if self.store.get_user(&input.user_id).await?.is_none() {
            return Err(user_not_found(&input.user_id));
        }

        let exercise = Exercise::new(input.description, input.duration, date);
        self.store.create_exercise(&exercise).await?;

        match self.store.append_to_log(&input.user_id, &exercise.id).await {
            Ok(Some(user)) => {
                tracing::info!(
                    user_id = %user.id,
                    exercise_id = %exercise.id,
                    log_len = user.exercise_log.len(),
                    "Exercise added"
                );
                Ok(user)
            }
            Ok(None) => {
                self.discard_exercise(&exercise.id).await;
                Err(user_not_found(&input.user_id))
            }
            Err(e) => {
                self.discard_exercise(&exercise.id).await;
                Err(e)
            }
        }
    }

    /// Fetch a user with their log expanded, filtered, and capped.
    pub async fn get_user_log(&self, user_id: &str, filter: LogFilter) -> Result<LogReport> {
        if user_id.is_empty() {
            return Err(AppError::Validation("userId is required".to_string()));
        }

        let user = self
            .store
            .get_user(user_id)
            .await?
            .ok_or_else(|| user_not_found(user_id))?;

        let entries = self.expand_log(&user).await?;
        let exercise_log = filter.apply(entries);

        tracing::debug!(
            user_id,
            total = user.exercise_log.len(),
            returned = exercise_log.len(),
            "User log fetched"
        );

        Ok(UserLog {
            id: user.id,
            username: user.username,
            exercise_log,
        }
        .into())
    }

    /// Resolve each log reference, preserving log order.
    ///
    /// References that no longer resolve are skipped.
    async fn expand_log(&self, user: &User) -> Result<Vec<Exercise>> {
        let fetched: Vec<(String, Result<Option<Exercise>>)> =
            stream::iter(user.exercise_log.clone())
                .map(|id| {
                    let store = Arc::clone(&self.store);
                    async move {
                        let result = store.get_exercise(&id).await;
                        (id, result)
                    }
                })
                .buffered(MAX_CONCURRENT_DB_OPS)
                .collect()
                .await;

        let mut exercises = Vec::with_capacity(fetched.len());
        for (id, result) in fetched {
            match result? {
                Some(exercise) => exercises.push(exercise),
                None => tracing::warn!(
                    user_id = %user.id,
                    exercise_id = %id,
                    "Log references a missing exercise"
                ),
            }
        }
        Ok(exercises)
    }

    /// Compensating delete for an exercise that never made it into a log.
    async fn discard_exercise(&self, exercise_id: &str) {
        if let Err(e) = self.store.delete_exercise(exercise_id).await {
            tracing::error!(
                exercise_id,
                error = %e,
                "Failed to delete unreferenced exercise"
            );
        }
    }
}

fn user_not_found(user_id: &str) -> AppError {
    AppError::NotFound(format!("User {} not found", user_id))
}
