// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer.
//!
//! Handlers and services only see [`ExerciseStore`]; the concrete backend is
//! chosen once at startup from `STORE_URI`.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryDb;

use crate::error::AppError;
use crate::models::{Exercise, User};

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const EXERCISES: &str = "exercises";
}

/// Operations the service needs from a document store.
///
/// Each call is atomic on its own. Nothing here composes calls into a
/// transaction; the service layer handles multi-step writes.
#[async_trait::async_trait]
pub trait ExerciseStore: Send + Sync {
    /// Persist a new user document.
    async fn create_user(&self, user: &User) -> Result<(), AppError>;

    /// All users, in store order.
    async fn list_users(&self) -> Result<Vec<User>, AppError>;

    /// Get a user by ID.
    async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError>;

    /// Append `exercise_id` to the user's log in one read-modify-write.
    ///
    /// Returns the updated user, or `None` if the user does not exist.
    async fn append_to_log(
        &self,
        user_id: &str,
        exercise_id: &str,
    ) -> Result<Option<User>, AppError>;

    /// Persist a new exercise document.
    async fn create_exercise(&self, exercise: &Exercise) -> Result<(), AppError>;

    /// Get an exercise by ID.
    async fn get_exercise(&self, exercise_id: &str) -> Result<Option<Exercise>, AppError>;

    /// Delete an exercise. Deleting a missing exercise is not an error.
    async fn delete_exercise(&self, exercise_id: &str) -> Result<(), AppError>;
}
