// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar filters over appointments already rendered in a display zone.

use crate::types::Appointment;
use chrono::{Datelike, NaiveDateTime, NaiveTime, TimeDelta};

/// Returns the appointments starting in the same month and year as `now`.
#[must_use]
pub fn current_month(appointments: &[Appointment], now: NaiveDateTime) -> Vec<Appointment> {
    appointments
        .iter()
        .filter(|a| a.start.year() == now.year() && a.start.month() == now.month())
        .cloned()
        .collect()
}

/// Returns the appointments starting within the week containing `now`.
///
/// The week runs from Monday 00:00:00 to Sunday 23:59:59. Both bounds are
/// exclusive, so an appointment starting exactly at Monday midnight is not
/// listed.
#[must_use]
pub fn current_week(appointments: &[Appointment], now: NaiveDateTime) -> Vec<Appointment> {
    let days_from_monday: i64 = i64::from(now.weekday().num_days_from_monday());
    let week_start: NaiveDateTime =
        (now.date() - TimeDelta::days(days_from_monday)).and_time(NaiveTime::MIN);
    let week_end: NaiveDateTime = week_start + TimeDelta::days(7) - TimeDelta::seconds(1);

    appointments
        .iter()
        .filter(|a| a.start > week_start && a.start < week_end)
        .cloned()
        .collect()
}
