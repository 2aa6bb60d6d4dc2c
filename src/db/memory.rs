// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process document store for local development and tests.

use crate::db::ExerciseStore;
use crate::error::AppError;
use crate::models::{Exercise, User};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

#[derive(Default)]
struct Collections {
    users: HashMap<String, User>,
    /// User IDs in creation order, so listings are stable.
    user_order: Vec<String>,
    exercises: HashMap<String, Exercise>,
}

/// Memory-backed store.
#[derive(Default)]
pub struct MemoryDb {
    inner: RwLock<Collections>,
    /// When set, every operation fails as if the store were unreachable.
    offline: AtomicBool,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate an unreachable store (or bring it back).
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of stored exercises, referenced or not.
    pub async fn exercise_count(&self) -> usize {
        self.inner.read().await.exercises.len()
    }

    /// Number of stored users.
    pub async fn user_count(&self) -> usize {
        self.inner.read().await.users.len()
    }

    fn check_online(&self) -> Result<(), AppError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(AppError::Database(
                "Database not connected (offline mode)".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl ExerciseStore for MemoryDb {
    async fn create_user(&self, user: &User) -> Result<(), AppError> {
        self.check_online()?;
        let mut inner = self.inner.write().await;
        if inner.users.contains_key(&user.id) {
            return Err(AppError::Database(format!(
                "Document already exists: users/{}",
                user.id
            )));
        }
        inner.user_order.push(user.id.clone());
        inner.users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.check_online()?;
        let inner = self.inner.read().await;
        Ok(inner
            .user_order
            .iter()
            .filter_map(|id| inner.users.get(id).cloned())
            .collect())
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        self.check_online()?;
        Ok(self.inner.read().await.users.get(user_id).cloned())
    }

    async fn append_to_log(
        &self,
        user_id: &str,
        exercise_id: &str,
    ) -> Result<Option<User>, AppError> {
        self.check_online()?;
        let mut inner = self.inner.write().await;
        Ok(inner.users.get_mut(user_id).map(|user| {
            user.exercise_log.push(exercise_id.to_string());
            user.clone()
        }))
    }

    async fn create_exercise(&self, exercise: &Exercise) -> Result<(), AppError> {
        self.check_online()?;
        let mut inner = self.inner.write().await;
        if inner.exercises.contains_key(&exercise.id) {
            return Err(AppError::Database(format!(
                "Document already exists: exercises/{}",
                exercise.id
            )));
        }
        inner
            .exercises
            .insert(exercise.id.clone(), exercise.clone());
        Ok(())
    }

    async fn get_exercise(&self, exercise_id: &str) -> Result<Option<Exercise>, AppError> {
        self.check_online()?;
        Ok(self.inner.read().await.exercises.get(exercise_id).cloned())
    }

    async fn delete_exercise(&self, exercise_id: &str) -> Result<(), AppError> {
        self.check_online()?;
        self.inner.write().await.exercises.remove(exercise_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn test_users_listed_in_creation_order() {
        let db = MemoryDb::new();
        for name in ["c", "a", "b"] {
            db.create_user(&User::new(name.to_string())).await.unwrap();
        }

        let names: Vec<_> = db
            .list_users()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.username)
            .collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn test_append_to_log_missing_user() {
        let db = MemoryDb::new();
        assert!(db.append_to_log("nope", "e1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_append_to_log_keeps_order() {
        let db = MemoryDb::new();
        let user = User::new("sam".to_string());
        db.create_user(&user).await.unwrap();

        db.append_to_log(&user.id, "e1").await.unwrap();
        let updated = db.append_to_log(&user.id, "e2").await.unwrap().unwrap();

        assert_eq!(updated.exercise_log, vec!["e1", "e2"]);
        assert_eq!(db.get_user(&user.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_concurrent_appends_are_not_lost() {
        let db = std::sync::Arc::new(MemoryDb::new());
        let user = User::new("sam".to_string());
        db.create_user(&user).await.unwrap();

        let handles: Vec<_> = (0..20)
            .map(|i| {
                let db = db.clone();
                let user_id = user.id.clone();
                tokio::spawn(async move {
                    db.append_to_log(&user_id, &format!("e{}", i)).await.unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        let stored = db.get_user(&user.id).await.unwrap().unwrap();
        assert_eq!(stored.exercise_log.len(), 20);
    }

    #[tokio::test]
    async fn test_delete_exercise() {
        let db = MemoryDb::new();
        let exercise = Exercise::new("run".to_string(), 30.0, Utc::now());
        db.create_exercise(&exercise).await.unwrap();
        assert_eq!(db.exercise_count().await, 1);

        db.delete_exercise(&exercise.id).await.unwrap();
        assert!(db.get_exercise(&exercise.id).await.unwrap().is_none());

        // Deleting again is a no-op.
        db.delete_exercise(&exercise.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_offline_mode_fails_every_call() {
        let db = MemoryDb::new();
        db.set_offline(true);

        assert!(matches!(db.list_users().await, Err(AppError::Database(_))));
        assert!(matches!(db.get_user("x").await, Err(AppError::Database(_))));

        db.set_offline(false);
        assert!(db.list_users().await.unwrap().is_empty());
    }
}
