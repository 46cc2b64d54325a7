// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Conversion of wall-clock values between time zones.
//!
//! Appointments are persisted as UTC wall-clock values. Users enter and read
//! times in their own zone, and business hours are judged in a fixed zone.
//! Conversions fix the absolute instant; only the rendering changes, so DST
//! transitions are handled by the zone database.
//!
//! Local times that do not map to exactly one instant are resolved as follows:
//!
//! - Ambiguous (clocks fall back): the earlier offset is used.
//! - Non-existent (clocks spring forward): the time is shifted later by the
//!   length of the gap.

use crate::error::DomainError;
use chrono::{LocalResult, NaiveDateTime, Offset, TimeDelta, TimeZone};
use chrono_tz::Tz;

/// The zone business hours are evaluated in.
pub const BUSINESS_TIME_ZONE: Tz = chrono_tz::America::New_York;

/// Reinterprets `local` as a wall-clock time in `source_zone` and returns the
/// UTC wall-clock time of the same instant.
#[must_use]
pub fn to_utc(local: NaiveDateTime, source_zone: Tz) -> NaiveDateTime {
    match source_zone.from_local_datetime(&local) {
        LocalResult::Single(resolved) => resolved.naive_utc(),
        LocalResult::Ambiguous(earliest, _) => earliest.naive_utc(),
        LocalResult::None => {
            // Inside a gap: apply the offset in force before the transition.
            let before = source_zone
                .offset_from_utc_datetime(&(local - TimeDelta::days(1)))
                .fix();
            local - TimeDelta::seconds(i64::from(before.local_minus_utc()))
        }
    }
}

/// Renders the UTC wall-clock time `utc` in `target_zone`.
#[must_use]
pub fn from_utc(utc: NaiveDateTime, target_zone: Tz) -> NaiveDateTime {
    target_zone.from_utc_datetime(&utc).naive_local()
}

/// Parses an IANA zone name such as `America/Denver`.
///
/// # Errors
///
/// Returns [`DomainError::InvalidTimezone`] if the name is unknown.
pub fn parse_zone(name: &str) -> Result<Tz, DomainError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| DomainError::InvalidTimezone(name.to_string()))
}
