// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::dt;
use crate::{
    Customer, DomainError, parse_date, parse_time_of_day, require_text, validate_customer_fields,
    validate_interval,
};
use chrono::{NaiveDate, NaiveTime};

fn create_test_customer() -> Customer {
    Customer {
        customer_id: None,
        customer_name: String::from("Daddy William"),
        address: String::from("2 Wonder Way"),
        postal_code: String::from("31031"),
        phone: String::from("555-555-5555"),
        division_id: 29,
        division_name: String::from("Colorado"),
        country_name: String::from("U.S"),
    }
}

#[test]
fn test_parse_time_of_day_accepts_strict_format() {
    let time: NaiveTime = parse_time_of_day("09:30").unwrap();
    assert_eq!(time, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
    assert_eq!(
        parse_time_of_day("23:59").unwrap(),
        NaiveTime::from_hms_opt(23, 59, 0).unwrap()
    );
    assert_eq!(parse_time_of_day("00:00").unwrap(), NaiveTime::MIN);
}

#[test]
fn test_parse_time_of_day_rejects_loose_formats() {
    for value in ["9:30", "09:30:00", "0930", "ab:cd", "", " 09:30", "09-30"] {
        let result: Result<NaiveTime, DomainError> = parse_time_of_day(value);
        assert!(
            matches!(result, Err(DomainError::InvalidTimeFormat { .. })),
            "{value:?} should be rejected"
        );
    }
}

#[test]
fn test_parse_time_of_day_rejects_out_of_range_values() {
    assert!(parse_time_of_day("24:00").is_err());
    assert!(parse_time_of_day("12:60").is_err());
}

#[test]
fn test_parse_date() {
    assert_eq!(
        parse_date("2024-03-10").unwrap(),
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    );
    assert!(matches!(
        parse_date("03/10/2024"),
        Err(DomainError::InvalidDate { .. })
    ));
    assert!(parse_date("2024-02-30").is_err());
}

#[test]
fn test_require_text_rejects_blank_values() {
    assert!(require_text("title", "Kickoff").is_ok());
    assert_eq!(
        require_text("title", "   "),
        Err(DomainError::MissingField { field: "title" })
    );
    assert!(require_text("title", "").is_err());
}

#[test]
fn test_validate_interval_requires_end_after_start() {
    assert!(validate_interval(dt("2024-03-10 09:00"), dt("2024-03-10 10:00")).is_ok());
    assert!(matches!(
        validate_interval(dt("2024-03-10 10:00"), dt("2024-03-10 10:00")),
        Err(DomainError::InvalidInterval { .. })
    ));
    assert!(validate_interval(dt("2024-03-10 10:00"), dt("2024-03-10 09:00")).is_err());
}

#[test]
fn test_validate_customer_fields_accepts_complete_customer() {
    assert!(validate_customer_fields(&create_test_customer()).is_ok());
}

#[test]
fn test_validate_customer_fields_rejects_missing_phone() {
    let mut customer: Customer = create_test_customer();
    customer.phone = String::new();
    assert_eq!(
        validate_customer_fields(&customer),
        Err(DomainError::MissingField { field: "phone" })
    );
}

#[test]
fn test_validate_customer_fields_rejects_unset_division() {
    let mut customer: Customer = create_test_customer();
    customer.division_id = 0;
    assert!(matches!(
        validate_customer_fields(&customer),
        Err(DomainError::InvalidIdentifier {
            field: "division_id",
            ..
        })
    ));
}
