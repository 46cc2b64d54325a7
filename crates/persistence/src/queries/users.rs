// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User and session queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::data_models::{SessionData, UserData};
use crate::diesel_schema::{sessions, users};
use crate::error::PersistenceError;

/// Diesel Queryable struct for user rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = users)]
struct UserRow {
    user_id: i64,
    user_name: String,
    password_hash: String,
    created_at: String,
}

/// Diesel Queryable struct for session rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = sessions)]
struct SessionRow {
    session_id: i64,
    session_token: String,
    user_id: i64,
    time_zone: String,
    created_at: String,
    last_activity_at: String,
    expires_at: String,
}

/// Retrieves a user by login name. Names match exactly.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the user is not found.
pub fn get_user_by_name(
    conn: &mut SqliteConnection,
    user_name: &str,
) -> Result<Option<UserData>, PersistenceError> {
    debug!("Looking up user by name: {}", user_name);

    let row: Option<UserRow> = users::table
        .filter(users::user_name.eq(user_name))
        .select(UserRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(|row| UserData {
        user_id: row.user_id,
        user_name: row.user_name,
        password_hash: row.password_hash,
        created_at: row.created_at,
    }))
}

/// Retrieves a user's login name by id.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_user_name(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Option<String>, PersistenceError> {
    Ok(users::table
        .filter(users::user_id.eq(user_id))
        .select(users::user_name)
        .first(conn)
        .optional()?)
}

/// Retrieves a session by token.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the session is not found.
pub fn get_session_by_token(
    conn: &mut SqliteConnection,
    session_token: &str,
) -> Result<Option<SessionData>, PersistenceError> {
    debug!("Looking up session by token");

    let row: Option<SessionRow> = sessions::table
        .filter(sessions::session_token.eq(session_token))
        .select(SessionRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(|row| SessionData {
        session_id: row.session_id,
        session_token: row.session_token,
        user_id: row.user_id,
        time_zone: row.time_zone,
        created_at: row.created_at,
        last_activity_at: row.last_activity_at,
        expires_at: row.expires_at,
    }))
}

/// Verifies a plain-text password against a stored bcrypt hash.
///
/// # Errors
///
/// Returns an error if the stored hash is malformed.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PersistenceError> {
    bcrypt::verify(password, password_hash)
        .map_err(|e| PersistenceError::Other(format!("Failed to verify password: {e}")))
}
