// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (profile and exercise log references)
//! - Exercises (individual log entries)

use crate::db::{collections, ExerciseStore};
use crate::error::AppError;
use crate::models::{Exercise, User};

/// Commit attempts for one log append before giving up.
const MAX_APPEND_ATTEMPTS: u32 = 5;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: firestore::FirestoreDb,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self { client })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

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
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self { client })
    }

    /// One transactional read-modify-write of the user's log.
    async fn try_append_to_log(
        &self,
        user_id: &str,
        exercise_id: &str,
    ) -> Result<Option<User>, AppError> {
        let mut transaction = self
            .client
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        // Reads through this handle are registered with the transaction.
        let tx_client = self.client.clone_with_consistency_selector(
            firestore::FirestoreConsistencySelector::Transaction(
                transaction.transaction_id().clone(),
            ),
        );

        let current: Option<User> = tx_client
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| {
                AppError::Database(format!("Failed to read user in transaction: {}", e))
            })?;

        let Some(mut user) = current else {
            if let Err(e) = transaction.rollback().await {
                tracing::warn!(user_id, error = %e, "Failed to roll back transaction");
            }
            return Ok(None);
        };

        user.exercise_log.push(exercise_id.to_string());

        self.client
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&user.id)
            .object(&user)
            .add_to_transaction(&mut transaction)
            .map_err(|e| AppError::Database(format!("Failed to add user to transaction: {}", e)))?;

        transaction
            .commit()
            .await
            .map_err(|e| AppError::Database(format!("Transaction commit failed: {}", e)))?;

        tracing::debug!(
            user_id,
            exercise_id,
            log_len = user.exercise_log.len(),
            "Exercise appended to log"
        );

        Ok(Some(user))
    }
}

#[async_trait::async_trait]
impl ExerciseStore for FirestoreDb {
    // ─── User Operations ─────────────────────────────────────────

    async fn create_user(&self, user: &User) -> Result<(), AppError> {
        let _: () = self
            .client
            .fluent()
            .insert()
            .into(collections::USERS)
            .document_id(&user.id)
            .object(user)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.client
            .fluent()
            .select()
            .from(collections::USERS)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        self.client
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Append inside a transaction, retrying when the commit fails.
    ///
    /// The user is read through the transaction, so a concurrent append to
    /// the same user makes this commit fail instead of overwriting the log.
    async fn append_to_log(
        &self,
        user_id: &str,
        exercise_id: &str,
    ) -> Result<Option<User>, AppError> {
        let mut attempt = 1;
        loop {
            match self.try_append_to_log(user_id, exercise_id).await {
                Err(e) if attempt < MAX_APPEND_ATTEMPTS => {
                    tracing::warn!(
                        user_id,
                        exercise_id,
                        attempt,
                        error = %e,
                        "Log append failed, retrying"
                    );
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    // ─── Exercise Operations ─────────────────────────────────────

    async fn create_exercise(&self, exercise: &Exercise) -> Result<(), AppError> {
        let _: () = self
            .client
            .fluent()
            .insert()
            .into(collections::EXERCISES)
            .document_id(&exercise.id)
            .object(exercise)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    async fn get_exercise(&self, exercise_id: &str) -> Result<Option<Exercise>, AppError> {
        self.client
            .fluent()
            .select()
            .by_id_in(collections::EXERCISES)
            .obj()
            .one(exercise_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn delete_exercise(&self, exercise_id: &str) -> Result<(), AppError> {
        self.client
            .fluent()
            .delete()
            .from(collections::EXERCISES)
            .document_id(exercise_id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
