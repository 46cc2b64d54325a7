// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use client_schedule::Rejection;
use client_schedule_domain::DomainError;
use client_schedule_persistence::PersistenceError;

/// Authentication errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The session token is unknown or has expired.
    SessionInvalid {
        /// Why the session was refused.
        reason: String,
    },
    /// The display zone supplied at login is not an IANA zone.
    InvalidTimeZone {
        /// The rejected zone name.
        value: String,
    },
    /// Users or sessions could not be read or written.
    StoreUnavailable {
        /// The underlying storage failure.
        reason: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::SessionInvalid { reason } => write!(f, "Invalid session: {reason}"),
            Self::InvalidTimeZone { value } => write!(f, "Unknown time zone: {value}"),
            Self::StoreUnavailable { reason } => write!(f, "Session store unavailable: {reason}"),
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed or the session is not usable.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// A scheduling rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } | AuthError::SessionInvalid { reason } => {
                Self::AuthenticationFailed { reason }
            }
            AuthError::InvalidTimeZone { value } => Self::InvalidInput {
                field: String::from("time_zone"),
                message: format!("Unknown time zone: {value}"),
            },
            AuthError::StoreUnavailable { reason } => Self::Internal { message: reason },
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        translate_persistence_error(err)
    }
}

impl From<Rejection> for ApiError {
    fn from(rejection: Rejection) -> Self {
        translate_rejection(rejection)
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::MissingField { field } | DomainError::InvalidIdentifier { field, .. } => {
            ApiError::InvalidInput {
                field: field.to_string(),
                message,
            }
        }
        DomainError::InvalidTimeFormat { .. } => ApiError::InvalidInput {
            field: String::from("time"),
            message,
        },
        DomainError::InvalidDate { .. } => ApiError::InvalidInput {
            field: String::from("date"),
            message,
        },
        DomainError::InvalidInterval { .. } => ApiError::DomainRuleViolation {
            rule: String::from("end_after_start"),
            message,
        },
        DomainError::InvalidTimezone(_) => ApiError::InvalidInput {
            field: String::from("time_zone"),
            message,
        },
    }
}

/// Translates a scheduling rejection into an API error.
///
/// The rejection's own message is kept so callers see the same text the
/// scheduling notifier produced.
#[must_use]
pub fn translate_rejection(rejection: Rejection) -> ApiError {
    let message: String = rejection.to_string();
    match rejection {
        Rejection::MissingFields { field } => ApiError::InvalidInput {
            field: field.to_string(),
            message,
        },
        Rejection::InvalidTimeFormat { .. } => ApiError::InvalidInput {
            field: String::from("time"),
            message,
        },
        Rejection::InvalidDateFormat { .. } => ApiError::InvalidInput {
            field: String::from("date"),
            message,
        },
        Rejection::InvalidView { .. } => ApiError::InvalidInput {
            field: String::from("view"),
            message,
        },
        Rejection::UnknownContact { .. } => ApiError::InvalidInput {
            field: String::from("contact_name"),
            message,
        },
        Rejection::UnknownCustomer { .. } => ApiError::InvalidInput {
            field: String::from("customer_id"),
            message,
        },
        Rejection::UnknownUser { .. } => ApiError::InvalidInput {
            field: String::from("user_id"),
            message,
        },
        Rejection::UnknownDivision { .. } => ApiError::InvalidInput {
            field: String::from("division"),
            message,
        },
        Rejection::EndNotAfterStart => ApiError::DomainRuleViolation {
            rule: String::from("end_after_start"),
            message,
        },
        Rejection::OutsideBusinessHours => ApiError::DomainRuleViolation {
            rule: String::from("business_hours"),
            message,
        },
        Rejection::OverlappingAppointment { .. } => ApiError::DomainRuleViolation {
            rule: String::from("no_overlap"),
            message,
        },
        Rejection::AppointmentNotFound { .. } => ApiError::ResourceNotFound {
            resource_type: String::from("Appointment"),
            message,
        },
        Rejection::CustomerNotFound { .. } => ApiError::ResourceNotFound {
            resource_type: String::from("Customer"),
            message,
        },
        Rejection::DomainViolation(err) => translate_domain_error(err),
        Rejection::PersistenceFailed(err) => ApiError::Internal {
            message: format!("Persistence failed: {err}"),
        },
    }
}

/// Translates a persistence error into an API error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::AppointmentNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Appointment"),
            message: format!("No appointment found with id {id}"),
        },
        PersistenceError::CustomerNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Customer"),
            message: format!("No customer found with id {id}"),
        },
        PersistenceError::UserNotFound(name) => ApiError::ResourceNotFound {
            resource_type: String::from("User"),
            message: format!("No user named '{name}'"),
        },
        PersistenceError::DuplicateUser(name) => ApiError::DomainRuleViolation {
            rule: String::from("unique_user_name"),
            message: format!("User '{name}' already exists"),
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
