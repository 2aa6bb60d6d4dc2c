// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Exercise document stored in the `exercises` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Exercise {
    /// Opaque identifier (also used as document ID)
    #[serde(rename = "_id")]
    pub id: String,
    pub description: String,
    /// Duration as submitted; no unit or range is enforced
    pub duration: f64,
    pub date: DateTime<Utc>,
}

impl Exercise {
    pub fn new(description: String, duration: f64, date: DateTime<Utc>) -> Self {
        Self {
            id: crate::models::new_id(),
            description,
            duration,
            date,
        }
    }
}

/// Date bounds and result cap applied when expanding a user's log.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LogFilter {
    /// Exclusive lower bound
    pub from: Option<DateTime<Utc>>,
    /// Exclusive upper bound
    pub to: Option<DateTime<Utc>>,
    /// Maximum number of entries; `None` means no cap
    pub limit: Option<usize>,
}

impl LogFilter {
    /// Whether `date` falls strictly inside the configured bounds.
    pub fn contains(&self, date: DateTime<Utc>) -> bool {
        self.from.is_none_or(|from| date > from) && self.to.is_none_or(|to| date < to)
    }

    /// Filter, order ascending by date, then cap.
    ///
    /// The sort is stable, so entries with equal dates keep log order.
    pub fn apply(&self, exercises: Vec<Exercise>) -> Vec<Exercise> {
        let mut kept: Vec<Exercise> = exercises
            .into_iter()
            .filter(|e| self.contains(e.date))
            .collect();
        kept.sort_by_key(|e| e.date);
        if let Some(limit) = self.limit {
            kept.truncate(limit);
        }
        kept
    }
}
