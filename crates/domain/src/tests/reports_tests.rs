// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_test_appointment, dt};
use crate::{Appointment, TypeMonthCount, contact_schedule, count_by_type_and_month, upcoming_for_user};

fn with_type(mut appointment: Appointment, appointment_type: &str) -> Appointment {
    appointment.appointment_type = appointment_type.to_string();
    appointment
}

#[test]
fn test_count_by_type_and_month_groups_and_orders() {
    let appointments: Vec<Appointment> = vec![
        with_type(
            create_test_appointment(1, "2024-04-02 13:00", "2024-04-02 14:00"),
            "De-Briefing",
        ),
        with_type(
            create_test_appointment(2, "2024-03-02 13:00", "2024-03-02 14:00"),
            "Planning Session",
        ),
        with_type(
            create_test_appointment(3, "2024-03-09 13:00", "2024-03-09 14:00"),
            "Planning Session",
        ),
        with_type(
            create_test_appointment(4, "2024-03-10 13:00", "2024-03-10 14:00"),
            "De-Briefing",
        ),
    ];

    let counts: Vec<TypeMonthCount> = count_by_type_and_month(&appointments);
    let rows: Vec<(&str, &str, usize)> = counts
        .iter()
        .map(|c| (c.appointment_type.as_str(), c.month.as_str(), c.count))
        .collect();

    assert_eq!(
        rows,
        vec![
            ("De-Briefing", "March", 1),
            ("Planning Session", "March", 2),
            ("De-Briefing", "April", 1),
        ]
    );
}

#[test]
fn test_count_by_type_and_month_of_nothing_is_empty() {
    assert!(count_by_type_and_month(&[]).is_empty());
}

#[test]
fn test_contact_schedule_filters_and_sorts() {
    let mut later: Appointment = create_test_appointment(1, "2024-03-12 13:00", "2024-03-12 14:00");
    later.contact_id = 2;
    let mut earlier: Appointment =
        create_test_appointment(2, "2024-03-10 13:00", "2024-03-10 14:00");
    earlier.contact_id = 2;
    let other: Appointment = create_test_appointment(3, "2024-03-11 13:00", "2024-03-11 14:00");

    let schedule: Vec<Appointment> = contact_schedule(&[later, other, earlier], 2);
    let ids: Vec<Option<i64>> = schedule.iter().map(|a| a.appointment_id).collect();
    assert_eq!(ids, vec![Some(2), Some(1)]);
}

#[test]
fn test_upcoming_window_is_inclusive_and_scoped_to_user() {
    let mut someone_else: Appointment =
        create_test_appointment(5, "2024-03-10 13:05", "2024-03-10 13:30");
    someone_else.user_id = 2;

    let appointments: Vec<Appointment> = vec![
        create_test_appointment(1, "2024-03-10 13:15", "2024-03-10 13:45"),
        create_test_appointment(2, "2024-03-10 13:00", "2024-03-10 13:10"),
        create_test_appointment(3, "2024-03-10 13:16", "2024-03-10 13:45"),
        create_test_appointment(4, "2024-03-10 12:59", "2024-03-10 13:30"),
        someone_else,
    ];

    let upcoming: Vec<Appointment> = upcoming_for_user(&appointments, 1, dt("2024-03-10 13:00"));
    let ids: Vec<Option<i64>> = upcoming.iter().map(|a| a.appointment_id).collect();
    assert_eq!(ids, vec![Some(2), Some(1)]);
}
