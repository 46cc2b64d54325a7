// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session-based authentication.
//!
//! A login binds a token to a user and to the zone that user enters and
//! reads times in. Every later request resolves its token back into a
//! [`Session`] for the scheduling workflows.

use chrono::{NaiveDateTime, TimeDelta};
use chrono_tz::Tz;
use client_schedule::Session;
use client_schedule_domain::parse_zone;
use client_schedule_persistence::{
    PersistenceError, SessionData, SqlitePersistence, UserData, parse_timestamp,
};
use tracing::{debug, info};

use crate::error::AuthError;

/// Zone used when a login does not name one.
pub const DEFAULT_TIME_ZONE: &str = "UTC";

/// A validated login session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedSession {
    /// The opaque bearer token.
    pub token: String,
    /// The user and display zone bound to the token.
    pub session: Session,
    /// When the token stops being accepted (UTC).
    pub expires_at: NaiveDateTime,
}

/// Authentication service for session-based authentication.
pub struct AuthenticationService;

impl AuthenticationService {
    /// How long a session stays valid after login.
    const SESSION_LIFETIME: TimeDelta = TimeDelta::hours(8);

    /// Authenticates a user and creates a session.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `user_name` - The login name (case-sensitive)
    /// * `password` - The plain-text password
    /// * `time_zone` - IANA zone for the session; [`DEFAULT_TIME_ZONE`] when `None`
    /// * `now_utc` - The current instant
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::AuthenticationFailed`] for an unknown user or a
    /// wrong password, [`AuthError::InvalidTimeZone`] for an unknown zone, and
    /// [`AuthError::StoreUnavailable`] if users or sessions cannot be accessed.
    pub fn login(
        persistence: &mut SqlitePersistence,
        user_name: &str,
        password: &str,
        time_zone: Option<&str>,
        now_utc: NaiveDateTime,
    ) -> Result<AuthenticatedSession, AuthError> {
        let user: UserData = persistence
            .get_user_by_name(user_name)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid username or password"),
            })?;

        let password_matches: bool = persistence
            .verify_password(password, &user.password_hash)
            .map_err(Self::map_persistence_error)?;
        if !password_matches {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Invalid username or password"),
            });
        }

        let zone_name: &str = time_zone
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_TIME_ZONE);
        let zone: Tz = parse_zone(zone_name).map_err(|_| AuthError::InvalidTimeZone {
            value: zone_name.to_string(),
        })?;

        persistence
            .delete_expired_sessions(now_utc)
            .map_err(Self::map_persistence_error)?;

        let token: String = Self::generate_session_token(now_utc);
        let expires_at: NaiveDateTime = now_utc + Self::SESSION_LIFETIME;
        persistence
            .create_session(&token, user.user_id, zone.name(), expires_at)
            .map_err(|e| AuthError::StoreUnavailable {
                reason: format!("Failed to create session: {e}"),
            })?;

        info!(user_id = user.user_id, zone = zone.name(), "User logged in");

        Ok(AuthenticatedSession {
            token,
            session: Session::new(user.user_id, &user.user_name, zone),
            expires_at,
        })
    }

    /// Validates a session token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::SessionInvalid`] if the token is unknown or
    /// expired, or if its user no longer exists.
    pub fn validate_session(
        persistence: &mut SqlitePersistence,
        session_token: &str,
        now_utc: NaiveDateTime,
    ) -> Result<AuthenticatedSession, AuthError> {
        let stored: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::SessionInvalid {
                reason: String::from("Invalid session token"),
            })?;

        let expires_at: NaiveDateTime =
            parse_timestamp(&stored.expires_at).map_err(Self::map_persistence_error)?;
        if now_utc > expires_at {
            debug!(session_id = stored.session_id, "Rejected expired session");
            return Err(AuthError::SessionInvalid {
                reason: String::from("Session expired"),
            });
        }

        let user_name: String = persistence
            .get_user_name(stored.user_id)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::SessionInvalid {
                reason: String::from("User not found"),
            })?;
        let zone: Tz = parse_zone(&stored.time_zone).map_err(|_| AuthError::SessionInvalid {
            reason: format!("Stored zone '{}' is unknown", stored.time_zone),
        })?;

        persistence
            .update_session_activity(stored.session_id)
            .map_err(Self::map_persistence_error)?;

        Ok(AuthenticatedSession {
            token: stored.session_token,
            session: Session::new(stored.user_id, &user_name, zone),
            expires_at,
        })
    }

    /// Logs out by deleting the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session does not exist or cannot be deleted.
    pub fn logout(
        persistence: &mut SqlitePersistence,
        session_token: &str,
    ) -> Result<(), AuthError> {
        persistence
            .delete_session(session_token)
            .map_err(Self::map_persistence_error)
    }

    /// Generates a session token from the login instant and a random suffix.
    fn generate_session_token(now_utc: NaiveDateTime) -> String {
        let timestamp: i64 = now_utc.and_utc().timestamp_nanos_opt().unwrap_or_default();
        format!("session_{timestamp}_{}", rand::random::<u64>())
    }

    /// Maps persistence errors to authentication errors.
    ///
    /// Only a missing session is the caller's fault; anything else is a
    /// storage failure and never counts as a rejected login.
    pub(crate) fn map_persistence_error(err: PersistenceError) -> AuthError {
        match err {
            PersistenceError::SessionNotFound(msg) => AuthError::SessionInvalid { reason: msg },
            _ => AuthError::StoreUnavailable {
                reason: format!("Database error: {err}"),
            },
        }
    }
}
