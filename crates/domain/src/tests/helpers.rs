// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Appointment;
use chrono::NaiveDateTime;

/// Parses `yyyy-MM-dd HH:mm` into a naive date-time.
pub fn dt(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M").unwrap()
}

pub fn create_test_appointment(id: i64, start: &str, end: &str) -> Appointment {
    Appointment {
        appointment_id: Some(id),
        title: String::from("Quarterly review"),
        description: String::from("Review account status"),
        location: String::from("Phoenix"),
        appointment_type: String::from("Planning Session"),
        start: dt(start),
        end: dt(end),
        customer_id: 1,
        user_id: 1,
        contact_id: 1,
        contact_name: String::from("Anika Costa"),
    }
}
