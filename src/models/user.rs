// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User model for storage and API.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::{Validate, ValidationError};

use crate::models::Exercise;

/// User document stored in the `users` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct User {
    /// Opaque identifier (also used as document ID)
    #[serde(rename = "_id")]
    pub id: String,
    /// Alphanumeric display name; not unique
    pub username: String,
    /// Exercise IDs in append order
    #[serde(rename = "exerciseLog", default)]
    pub exercise_log: Vec<String>,
}

impl User {
    /// Build a user with a fresh identifier and an empty log.
    pub fn new(username: String) -> Self {
        Self {
            id: crate::models::new_id(),
            username,
            exercise_log: Vec::new(),
        }
    }
}

/// Input for registering a user.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUser {
    #[serde(default)]
    #[validate(custom(function = "validate_username"))]
    pub username: String,
}

/// Usernames are non-empty and ASCII alphanumeric only.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.is_empty() {
        return Err(ValidationError::new("empty").with_message("username is required".into()));
    }
    if !username.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::new("alphanumeric")
            .with_message("username may only contain letters and digits".into()));
    }
    Ok(())
}

/// A user with its log expanded into full exercise records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserLog {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    #[serde(rename = "exerciseLog")]
    pub exercise_log: Vec<Exercise>,
}

/// A user's filtered log together with the number of entries it holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LogReport {
    pub user: UserLog,
    /// Always equal to `user.exercise_log.len()`
    pub count: usize,
}

impl From<UserLog> for LogReport {
    fn from(user: UserLog) -> Self {
        Self {
            count: user.exercise_log.len(),
            user,
        }
    }
}
