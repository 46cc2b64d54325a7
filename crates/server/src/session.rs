// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bearer-token extraction for the scheduling routes.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use client_schedule_api::{AuthError, AuthenticatedSession, AuthenticationService};
use tracing::{debug, error, warn};

use crate::{AppState, now_utc};

/// Extractor for a logged-in session.
///
/// Reads `Authorization: Bearer <token>`, validates the token and yields the
/// session with its user and display zone.
///
/// # Errors
///
/// Rejects with HTTP 401 Unauthorized if the header is missing or malformed,
/// or if the token is unknown or expired, and with HTTP 500 if sessions
/// cannot be read.
pub struct SessionUser(pub AuthenticatedSession);

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header: &str = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| {
                debug!("Missing Authorization header");
                SessionError::MissingAuthorizationHeader
            })?
            .to_str()
            .map_err(|_| {
                warn!("Invalid Authorization header encoding");
                SessionError::InvalidAuthorizationHeader
            })?;

        let token: &str = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            warn!("Authorization header does not start with 'Bearer '");
            SessionError::InvalidAuthorizationHeader
        })?;

        let mut persistence = state.persistence.lock().await;
        let authenticated: AuthenticatedSession =
            AuthenticationService::validate_session(&mut persistence, token, now_utc()).map_err(
                |e| match e {
                    AuthError::StoreUnavailable { reason } => {
                        error!(error = %reason, "Session store unavailable");
                        SessionError::StoreUnavailable
                    }
                    other => {
                        warn!(error = %other, "Session validation failed");
                        SessionError::InvalidSession(other.to_string())
                    }
                },
            )?;

        debug!(
            user = authenticated.session.user_name(),
            zone = authenticated.session.zone().name(),
            "Session validated"
        );

        Ok(Self(authenticated))
    }
}

/// Why a request carried no usable session.
#[derive(Debug)]
pub enum SessionError {
    MissingAuthorizationHeader,
    InvalidAuthorizationHeader,
    InvalidSession(String),
    StoreUnavailable,
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let status: StatusCode = match self {
            Self::StoreUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        };
        let message: String = match self {
            Self::MissingAuthorizationHeader => String::from("Missing Authorization header"),
            Self::InvalidAuthorizationHeader => String::from(
                "Invalid Authorization header format. Expected: 'Bearer <token>'",
            ),
            Self::InvalidSession(reason) => format!("Session validation failed: {reason}"),
            Self::StoreUnavailable => String::from("Sessions are temporarily unavailable"),
        };

        (status, message).into_response()
    }
}
