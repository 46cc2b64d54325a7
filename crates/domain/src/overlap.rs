// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Double-booking detection.
//!
//! Two appointments conflict when they share the calendar date of their
//! starts and their intervals intersect under open/open semantics:
//! `start < other.end && end > other.start`. Touching intervals (one ends
//! exactly when the other starts) do not conflict. Appointments starting on
//! different dates never conflict, even if one runs past midnight.
//!
//! All values compared here must be in the same zone (UTC for stored data).

use crate::types::Appointment;
use chrono::NaiveDateTime;

/// Returns the first appointment in `existing` that conflicts with the
/// candidate interval.
///
/// # Arguments
///
/// * `existing` - The appointments to check against
/// * `start` - Candidate start
/// * `end` - Candidate end
/// * `exclude_id` - The candidate's own id when updating; `None` excludes nothing
#[must_use]
pub fn find_conflict<'a>(
    existing: &'a [Appointment],
    start: NaiveDateTime,
    end: NaiveDateTime,
    exclude_id: Option<i64>,
) -> Option<&'a Appointment> {
    existing
        .iter()
        .filter(|other| exclude_id.is_none() || other.appointment_id != exclude_id)
        .filter(|other| other.start.date() == start.date())
        .find(|other| start < other.end && end > other.start)
}

/// Returns whether the candidate interval conflicts with any appointment in
/// `existing`. See [`find_conflict`].
#[must_use]
pub fn has_conflict(
    existing: &[Appointment],
    start: NaiveDateTime,
    end: NaiveDateTime,
    exclude_id: Option<i64>,
) -> bool {
    find_conflict(existing, start, end, exclude_id).is_some()
}
