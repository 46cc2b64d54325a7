// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operating-window policy for appointments.
//!
//! ## Invariants
//!
//! - The window is 08:00 through 22:00 inclusive, in [`BUSINESS_TIME_ZONE`]
//! - Both endpoints must lie inside the window on their own
//! - No wraparound: an endpoint after 22:00 or before 08:00 is rejected even
//!   when the interval itself is short

use crate::time_conversion::{BUSINESS_TIME_ZONE, from_utc};
use chrono::{NaiveDateTime, Timelike};

/// Opening time as seconds after midnight (08:00).
pub const BUSINESS_OPENS_SECONDS: u32 = 8 * 3600;

/// Closing time as seconds after midnight (22:00).
pub const BUSINESS_CLOSES_SECONDS: u32 = 22 * 3600;

/// Returns whether `[start, end]` lies within business hours.
///
/// # Arguments
///
/// * `start` - Interval start, as a UTC wall-clock value
/// * `end` - Interval end, as a UTC wall-clock value
#[must_use]
pub fn is_within_business_hours(start: NaiveDateTime, end: NaiveDateTime) -> bool {
    is_open_at(from_utc(start, BUSINESS_TIME_ZONE)) && is_open_at(from_utc(end, BUSINESS_TIME_ZONE))
}

fn is_open_at(local: NaiveDateTime) -> bool {
    let seconds: u32 = local.time().num_seconds_from_midnight();
    (BUSINESS_OPENS_SECONDS..=BUSINESS_CLOSES_SECONDS).contains(&seconds)
}
