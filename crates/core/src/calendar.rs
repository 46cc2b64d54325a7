// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::Rejection;
use crate::ports::AppointmentRepository;
use crate::session::Session;
use chrono::NaiveDateTime;
use client_schedule_domain::{Appointment, current_month, current_week};
use std::str::FromStr;

/// Which slice of the calendar to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CalendarView {
    #[default]
    All,
    Month,
    Week,
}

impl CalendarView {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Month => "month",
            Self::Week => "week",
        }
    }
}

impl FromStr for CalendarView {
    type Err = Rejection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "month" => Ok(Self::Month),
            "week" => Ok(Self::Week),
            _ => Err(Rejection::InvalidView {
                value: s.to_string(),
            }),
        }
    }
}

/// Lists appointments for a view, rendered in the session's zone.
///
/// Month and week boundaries are those of the session zone at `now_utc`.
///
/// # Errors
///
/// Returns [`Rejection::PersistenceFailed`] if the store cannot be read.
pub fn list_appointments<R>(
    store: &mut R,
    session: &Session,
    view: CalendarView,
    now_utc: NaiveDateTime,
) -> Result<Vec<Appointment>, Rejection>
where
    R: AppointmentRepository + ?Sized,
{
    let mut local: Vec<Appointment> = store
        .list_all()?
        .iter()
        .map(|a| a.in_zone(session.zone()))
        .collect();
    local.sort_by_key(|a| a.start);

    let now: NaiveDateTime = session.local_time(now_utc);
    Ok(match view {
        CalendarView::All => local,
        CalendarView::Month => current_month(&local, now),
        CalendarView::Week => current_week(&local, now),
    })
}
