// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use chrono::{NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use client_schedule::Session;
use client_schedule_domain::Customer;
use client_schedule_persistence::SqlitePersistence;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::{AppointmentRequest, CustomerRequest, LoginActivityLog};

static LOG_COUNTER: AtomicU64 = AtomicU64::new(0);

pub const TEST_USER: &str = "test";
pub const TEST_PASSWORD: &str = "test";

pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .expect("Valid test timestamp")
}

/// A fresh database with user `test` (password `test`) and customer 1 in
/// New York.
///
/// Returns the persistence handle and an Eastern session for the user.
pub fn create_test_environment() -> (SqlitePersistence, Session) {
    let mut persistence: SqlitePersistence =
        SqlitePersistence::new_in_memory().expect("In-memory database");
    let user_id: i64 = persistence
        .create_user(TEST_USER, TEST_PASSWORD)
        .expect("Create test user");
    let customer: Customer = Customer {
        customer_id: None,
        customer_name: String::from("Acme"),
        address: String::from("123 Main St"),
        postal_code: String::from("10001"),
        phone: String::from("555-0100"),
        division_id: 9,
        division_name: String::new(),
        country_name: String::new(),
    };
    persistence
        .insert_customer(&customer, TEST_USER)
        .expect("Create test customer");

    let session: Session = Session::new(user_id, TEST_USER, Tz::America__New_York);
    (persistence, session)
}

/// 09:00-10:00 on Monday 2024-06-03, entered in the session zone.
pub fn create_test_appointment_request() -> AppointmentRequest {
    AppointmentRequest {
        title: String::from("Kickoff"),
        description: String::from("Project kickoff"),
        location: String::from("Room 1"),
        appointment_type: String::from("Planning Session"),
        contact_name: String::from("Anika Costa"),
        start_date: String::from("2024-06-03"),
        start_time: String::from("09:00"),
        end_date: String::from("2024-06-03"),
        end_time: String::from("10:00"),
        customer_id: Some(1),
        user_id: None,
    }
}

pub fn create_test_customer_request() -> CustomerRequest {
    CustomerRequest {
        customer_name: String::from("Globex"),
        address: String::from("42 Elm St"),
        postal_code: String::from("M5V"),
        phone: String::from("555-0142"),
        division: String::from("Ontario"),
    }
}

/// A login activity log in a unique temporary file.
pub fn create_test_activity_log() -> LoginActivityLog {
    let id: u64 = LOG_COUNTER.fetch_add(1, Ordering::SeqCst);
    let path: PathBuf = std::env::temp_dir().join(format!(
        "client_schedule_login_{}_{id}.txt",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);
    LoginActivityLog::new(path)
}

pub fn read_activity_lines(log: &LoginActivityLog) -> Vec<String> {
    std::fs::read_to_string(log.path())
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}
