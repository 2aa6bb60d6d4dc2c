// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise tracker API routes.

use crate::error::{AppError, Result};
use crate::models::{LogFilter, LogReport, NewUser, User};
use crate::routes::extract::FormOrJson;
use crate::services::exercise::NewExercise;
use crate::time_utils::parse_client_date;
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/exercise/new-user", post(new_user))
        .route("/api/exercise/users", get(list_users))
        .route("/api/exercise/add", post(add_exercise))
        .route("/api/exercise/log", get(get_log))
}

// ─── Users ───────────────────────────────────────────────────

/// Response for user registration.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct NewUserResponse {
    pub username: String,
    #[serde(rename = "_id")]
    pub id: String,
}

async fn new_user(
    State(state): State<Arc<AppState>>,
    FormOrJson(input): FormOrJson<NewUser>,
) -> Result<Json<NewUserResponse>> {
    let user = state.exercises.create_user(input).await?;
    Ok(Json(NewUserResponse {
        username: user.username,
        id: user.id,
    }))
}

async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<User>>> {
    Ok(Json(state.exercises.list_users().await?))
}

// ─── Exercises ───────────────────────────────────────────────

/// Form fields arrive as strings; JSON clients may send a number.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

#[derive(Deserialize)]
struct AddExerciseForm {
    #[serde(rename = "userId", default)]
    user_id: String,
    #[serde(default)]
    description: String,
    duration: Option<NumberOrText>,
    date: Option<String>,
}

impl AddExerciseForm {
    fn into_new_exercise(self) -> Result<NewExercise> {
        let duration = match self.duration {
            Some(NumberOrText::Number(n)) => n,
            Some(NumberOrText::Text(raw)) if !raw.trim().is_empty() => {
                raw.trim().parse::<f64>().map_err(|_| {
                    AppError::Validation(format!("Invalid 'duration' parameter: {:?}", raw))
                })?
            }
            _ => return Err(AppError::Validation("duration is required".to_string())),
        };

        let date = parse_optional_date("date", self.date.as_deref())?;

        Ok(NewExercise {
            user_id: self.user_id.trim().to_string(),
            description: self.description,
            duration,
            date,
        })
    }
}

async fn add_exercise(
    State(state): State<Arc<AppState>>,
    FormOrJson(form): FormOrJson<AddExerciseForm>,
) -> Result<Json<User>> {
    let input = form.into_new_exercise()?;
    Ok(Json(state.exercises.add_exercise(input).await?))
}

// ─── Log ─────────────────────────────────────────────────────

#[derive(Deserialize)]
struct LogQuery {
    #[serde(rename = "userId", default)]
    user_id: String,
    /// Exclusive lower date bound
    from: Option<String>,
    /// Exclusive upper date bound
    to: Option<String>,
    /// Maximum number of entries; 0 means unlimited
    limit: Option<String>,
}

impl LogQuery {
    fn filter(&self) -> Result<LogFilter> {
        let limit = match self.limit.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => match raw.parse::<usize>() {
                Ok(0) => None,
                Ok(n) => Some(n),
                Err(_) => {
                    return Err(AppError::Validation(format!(
                        "Invalid 'limit' parameter: {:?}",
                        raw
                    )))
                }
            },
        };

        Ok(LogFilter {
            from: parse_optional_date("from", self.from.as_deref())?,
            to: parse_optional_date("to", self.to.as_deref())?,
            limit,
        })
    }
}

async fn get_log(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LogQuery>,
) -> Result<Json<LogReport>> {
    let filter = query.filter()?;
    let report = state
        .exercises
        .get_user_log(query.user_id.trim(), filter)
        .await?;
    Ok(Json(report))
}

/// Empty values count as absent, as HTML forms submit blank fields.
fn parse_optional_date(
    name: &str,
    raw: Option<&str>,
) -> Result<Option<chrono::DateTime<chrono::Utc>>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_client_date(value).map(Some).ok_or_else(|| {
            AppError::Validation(format!(
                "Invalid '{}' parameter: must be YYYY-MM-DD or RFC3339 datetime",
                name
            ))
        }),
    }
}
