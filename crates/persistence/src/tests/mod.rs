// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod customer_tests;
mod initialization_tests;

use chrono::{NaiveDate, NaiveDateTime};
use client_schedule_domain::{Appointment, Customer};

use crate::SqlitePersistence;

/// Builds a UTC instant from calendar parts.
pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .expect("Valid test timestamp")
}

/// A customer in New York (division 9).
pub fn create_test_customer(name: &str) -> Customer {
    Customer {
        customer_id: None,
        customer_name: name.to_string(),
        address: String::from("123 Main St"),
        postal_code: String::from("10001"),
        phone: String::from("555-0100"),
        division_id: 9,
        division_name: String::new(),
        country_name: String::new(),
    }
}

/// An appointment with contact 1 (Anika Costa).
pub fn create_test_appointment(
    customer_id: i64,
    user_id: i64,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Appointment {
    Appointment {
        appointment_id: None,
        title: String::from("Planning"),
        description: String::from("Quarterly planning"),
        location: String::from("Office"),
        appointment_type: String::from("Planning Session"),
        start,
        end,
        customer_id,
        user_id,
        contact_id: 1,
        contact_name: String::new(),
    }
}

/// Fresh database holding one user (`test`) and one customer.
///
/// Returns the persistence handle, the user id and the customer id.
pub fn seeded_persistence() -> (SqlitePersistence, i64, i64) {
    let mut persistence: SqlitePersistence =
        SqlitePersistence::new_in_memory().expect("In-memory database");
    let user_id: i64 = persistence
        .create_user("test", "test")
        .expect("Create test user");
    let customer_id: i64 = persistence
        .insert_customer(&create_test_customer("Acme"), "test")
        .expect("Create test customer");
    (persistence, user_id, customer_id)
}
