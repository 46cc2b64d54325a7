// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::Customer;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Ensures that a required text field is present and not blank.
///
/// # Errors
///
/// Returns [`DomainError::MissingField`] naming `field` if `value` is empty
/// or whitespace only.
pub fn require_text(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::MissingField { field });
    }
    Ok(())
}

/// Parses a strict 24-hour `HH:mm` time of day.
///
/// Exactly two digits are required on either side of the colon, so `9:30`
/// and `09:30:00` are rejected.
///
/// # Errors
///
/// Returns [`DomainError::InvalidTimeFormat`] for anything else, including
/// out-of-range values such as `24:00`.
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime, DomainError> {
    let invalid = || DomainError::InvalidTimeFormat {
        value: value.to_string(),
    };

    let bytes: &[u8] = value.as_bytes();
    let well_formed: bool = bytes.len() == 5
        && bytes[2] == b':'
        && [0, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit());
    if !well_formed {
        return Err(invalid());
    }

    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| invalid())
}

/// Parses an ISO `yyyy-MM-dd` calendar date.
///
/// # Errors
///
/// Returns [`DomainError::InvalidDate`] if the value is not a valid date.
pub fn parse_date(value: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| DomainError::InvalidDate {
        value: value.to_string(),
    })
}

/// Ensures an interval ends strictly after it starts.
///
/// # Errors
///
/// Returns [`DomainError::InvalidInterval`] if `end <= start`.
pub fn validate_interval(start: NaiveDateTime, end: NaiveDateTime) -> Result<(), DomainError> {
    if end <= start {
        return Err(DomainError::InvalidInterval { start, end });
    }
    Ok(())
}

/// Validates that a customer carries every required field.
///
/// # Errors
///
/// Returns the first [`DomainError::MissingField`] encountered, or
/// [`DomainError::InvalidIdentifier`] if the division id is not positive.
pub fn validate_customer_fields(customer: &Customer) -> Result<(), DomainError> {
    require_text("customer_name", &customer.customer_name)?;
    require_text("address", &customer.address)?;
    require_text("postal_code", &customer.postal_code)?;
    require_text("phone", &customer.phone)?;
    if customer.division_id <= 0 {
        return Err(DomainError::InvalidIdentifier {
            field: "division_id",
            value: customer.division_id,
        });
    }
    Ok(())
}
