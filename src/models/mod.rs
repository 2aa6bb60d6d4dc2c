// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod exercise;
pub mod user;

pub use exercise::{Exercise, LogFilter};
pub use user::{LogReport, NewUser, User, UserLog};

/// Generate a new opaque document identifier.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
