// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Aggregations backing the tabular reports.

use crate::types::Appointment;
use chrono::{Datelike, Month, NaiveDateTime, TimeDelta};
use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How far ahead the login alert looks for appointments.
pub const UPCOMING_WINDOW_MINUTES: i64 = 15;

/// The number of appointments of one type within one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeMonthCount {
    pub appointment_type: String,
    /// Full English month name, e.g. `March`.
    pub month: String,
    pub count: usize,
}

/// Counts appointments grouped by type and by the month of their start.
///
/// Rows are ordered by calendar month, then by type. Months of different
/// years are merged.
#[must_use]
pub fn count_by_type_and_month(appointments: &[Appointment]) -> Vec<TypeMonthCount> {
    let mut groups: BTreeMap<(u32, &str), usize> = BTreeMap::new();
    for appointment in appointments {
        *groups
            .entry((appointment.start.month(), appointment.appointment_type.as_str()))
            .or_default() += 1;
    }

    groups
        .into_iter()
        .map(|((month, appointment_type), count)| TypeMonthCount {
            appointment_type: appointment_type.to_string(),
            month: Month::from_u32(month)
                .map(|m| m.name().to_string())
                .unwrap_or_default(),
            count,
        })
        .collect()
}

/// Returns the appointments held with one contact, ordered by start.
#[must_use]
pub fn contact_schedule(appointments: &[Appointment], contact_id: i64) -> Vec<Appointment> {
    let mut schedule: Vec<Appointment> = appointments
        .iter()
        .filter(|a| a.contact_id == contact_id)
        .cloned()
        .collect();
    schedule.sort_by_key(|a| a.start);
    schedule
}

/// Returns the user's appointments starting between `now` and
/// `now + UPCOMING_WINDOW_MINUTES`, both inclusive, ordered by start.
///
/// `now` and the appointments must be in the same zone.
#[must_use]
pub fn upcoming_for_user(
    appointments: &[Appointment],
    user_id: i64,
    now: NaiveDateTime,
) -> Vec<Appointment> {
    let horizon: NaiveDateTime = now + TimeDelta::minutes(UPCOMING_WINDOW_MINUTES);
    let mut upcoming: Vec<Appointment> = appointments
        .iter()
        .filter(|a| a.user_id == user_id && a.start >= now && a.start <= horizon)
        .cloned()
        .collect();
    upcoming.sort_by_key(|a| a.start);
    upcoming
}
