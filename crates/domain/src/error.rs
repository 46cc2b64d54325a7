// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::NaiveDateTime;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field is absent or blank.
    MissingField {
        /// The name of the missing field.
        field: &'static str,
    },
    /// A time of day was not in strict 24-hour `HH:mm` form.
    InvalidTimeFormat {
        /// The rejected input.
        value: String,
    },
    /// A calendar date was not in `yyyy-MM-dd` form.
    InvalidDate {
        /// The rejected input.
        value: String,
    },
    /// The interval does not end after it starts.
    InvalidInterval {
        /// The proposed start.
        start: NaiveDateTime,
        /// The proposed end.
        end: NaiveDateTime,
    },
    /// Time zone name is not a known IANA zone.
    InvalidTimezone(String),
    /// A numeric identifier was zero or negative.
    InvalidIdentifier {
        /// The name of the identifier field.
        field: &'static str,
        /// The rejected value.
        value: i64,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "Missing required field: {field}"),
            Self::InvalidTimeFormat { value } => {
                write!(f, "Invalid time '{value}': expected 24-hour HH:mm")
            }
            Self::InvalidDate { value } => {
                write!(f, "Invalid date '{value}': expected yyyy-MM-dd")
            }
            Self::InvalidInterval { start, end } => {
                write!(f, "Appointment end {end} must be after its start {start}")
            }
            Self::InvalidTimezone(zone) => write!(f, "Unknown time zone: {zone}"),
            Self::InvalidIdentifier { field, value } => {
                write!(f, "Invalid {field}: {value}. Must be greater than 0")
            }
        }
    }
}

impl std::error::Error for DomainError {}
