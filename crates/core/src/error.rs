// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::ports::StoreError;
use client_schedule_domain::DomainError;

/// Why a scheduling request was refused.
///
/// Every variant is a terminal outcome of a workflow; none is retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// A required field was blank.
    #[error("All fields must be filled out (missing {field})")]
    MissingFields {
        /// The first missing field.
        field: &'static str,
    },
    /// A time of day was not strict 24-hour `HH:mm`.
    #[error("Invalid time format '{value}'. Please use HH:mm (24-hour)")]
    InvalidTimeFormat {
        /// The rejected input.
        value: String,
    },
    /// A date was not `yyyy-MM-dd`.
    #[error("Invalid date format '{value}'. Please use yyyy-MM-dd")]
    InvalidDateFormat {
        /// The rejected input.
        value: String,
    },
    /// The calendar view name is not one of `all`, `month`, `week`.
    #[error("Unknown calendar view '{value}'")]
    InvalidView {
        /// The rejected input.
        value: String,
    },
    /// The contact name did not resolve.
    #[error("Unknown contact '{contact_name}'")]
    UnknownContact {
        /// The name that was supplied.
        contact_name: String,
    },
    /// The customer id does not exist.
    #[error("Unknown customer id {customer_id}")]
    UnknownCustomer {
        /// The id that was supplied.
        customer_id: i64,
    },
    /// The user id does not exist.
    #[error("Unknown user id {user_id}")]
    UnknownUser {
        /// The id that was supplied.
        user_id: i64,
    },
    /// The division name did not resolve.
    #[error("Unknown division '{division_name}'")]
    UnknownDivision {
        /// The name that was supplied.
        division_name: String,
    },
    /// The appointment ends at or before its start.
    #[error("Appointment end time must be after its start time")]
    EndNotAfterStart,
    /// An endpoint falls outside 08:00-22:00 Eastern.
    #[error("Appointments must be scheduled between 08:00 and 22:00 ET")]
    OutsideBusinessHours,
    /// The interval intersects another appointment on the same day.
    #[error("The appointment overlaps existing appointment {conflicting_id}")]
    OverlappingAppointment {
        /// The id of the first conflicting appointment.
        conflicting_id: i64,
    },
    /// No appointment carries the requested id.
    #[error("No appointment found with id {appointment_id}")]
    AppointmentNotFound {
        /// The requested id.
        appointment_id: i64,
    },
    /// No customer carries the requested id.
    #[error("No customer found with id {customer_id}")]
    CustomerNotFound {
        /// The requested id.
        customer_id: i64,
    },
    /// Any other domain rule violation.
    #[error("Domain violation: {0}")]
    DomainViolation(DomainError),
    /// The store refused a read or write.
    #[error("Persistence failed: {0}")]
    PersistenceFailed(#[from] StoreError),
}

impl Rejection {
    /// A short, stable reason code for the rejection.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::MissingFields { .. } => "missing fields",
            Self::InvalidTimeFormat { .. } => "invalid time format",
            Self::InvalidDateFormat { .. } => "invalid date format",
            Self::InvalidView { .. } => "invalid view",
            Self::UnknownContact { .. } => "unknown contact",
            Self::UnknownCustomer { .. } => "unknown customer",
            Self::UnknownUser { .. } => "unknown user",
            Self::UnknownDivision { .. } => "unknown division",
            Self::EndNotAfterStart => "end must be after start",
            Self::OutsideBusinessHours => "outside business hours",
            Self::OverlappingAppointment { .. } => "overlapping appointment",
            Self::AppointmentNotFound { .. } => "appointment not found",
            Self::CustomerNotFound { .. } => "customer not found",
            Self::DomainViolation(_) => "domain violation",
            Self::PersistenceFailed(_) => "persistence failed",
        }
    }
}

impl From<DomainError> for Rejection {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::MissingField { field } => Self::MissingFields { field },
            DomainError::InvalidTimeFormat { value } => Self::InvalidTimeFormat { value },
            DomainError::InvalidDate { value } => Self::InvalidDateFormat { value },
            DomainError::InvalidInterval { .. } => Self::EndNotAfterStart,
            other => Self::DomainViolation(other),
        }
    }
}
