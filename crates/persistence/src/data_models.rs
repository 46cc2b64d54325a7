// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::NaiveDateTime;
use client_schedule_domain::Customer;
use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;

/// Storage format of every timestamp column (UTC).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats a UTC wall-clock value for storage.
#[must_use]
pub fn format_timestamp(value: NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses a stored timestamp.
///
/// # Errors
///
/// Returns [`PersistenceError::InvalidTimestamp`] if the value is malformed.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, PersistenceError> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map_err(|_| PersistenceError::InvalidTimestamp(value.to_string()))
}

/// A stored user, including the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserData {
    pub user_id: i64,
    pub user_name: String,
    pub password_hash: String,
    pub created_at: String,
}

/// A stored login session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub user_id: i64,
    /// IANA zone name the user chose at login.
    pub time_zone: String,
    pub created_at: String,
    pub last_activity_at: String,
    pub expires_at: String,
}

/// A customer together with its audit columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub customer: Customer,
    pub created_at: String,
    pub created_by: String,
    pub last_updated_at: String,
    pub last_updated_by: String,
}
