// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use client_schedule_domain::{Country, Customer};

use super::{create_test_appointment, create_test_customer, seeded_persistence, utc};
use crate::SqlitePersistence;
use crate::data_models::CustomerRecord;
use crate::error::PersistenceError;

#[test]
fn test_insert_customer_sets_audit_columns_and_joins_location() {
    let mut persistence: SqlitePersistence = SqlitePersistence::new_in_memory().unwrap();

    let customer_id: i64 = persistence
        .insert_customer(&create_test_customer("Acme"), "alice")
        .unwrap();

    let record: CustomerRecord = persistence.get_customer(customer_id).unwrap().unwrap();
    assert_eq!(customer_id, 1);
    assert_eq!(record.customer.division_name, "New York");
    assert_eq!(record.customer.country_name, "U.S");
    assert_eq!(record.created_by, "alice");
    assert_eq!(record.last_updated_by, "alice");
    assert_eq!(record.created_at, record.last_updated_at);
}

#[test]
fn test_update_customer_changes_division_and_updater() {
    let (mut persistence, _, customer_id) = seeded_persistence();
    let mut customer: Customer = persistence
        .get_customer(customer_id)
        .unwrap()
        .unwrap()
        .customer;
    customer.division_id = 101;
    customer.phone = String::from("555-0199");

    persistence.update_customer(&customer, "bob").unwrap();

    let record: CustomerRecord = persistence.get_customer(customer_id).unwrap().unwrap();
    assert_eq!(record.customer.division_name, "England");
    assert_eq!(record.customer.country_name, "UK");
    assert_eq!(record.customer.phone, "555-0199");
    assert_eq!(record.created_by, "test");
    assert_eq!(record.last_updated_by, "bob");
}

#[test]
fn test_update_of_missing_customer_fails() {
    let mut persistence: SqlitePersistence = SqlitePersistence::new_in_memory().unwrap();
    let mut customer: Customer = create_test_customer("Ghost");
    customer.customer_id = Some(5);

    let result: Result<(), PersistenceError> = persistence.update_customer(&customer, "bob");

    assert_eq!(result, Err(PersistenceError::CustomerNotFound(5)));
}

#[test]
fn test_delete_customer_removes_its_appointments() {
    let (mut persistence, user_id, customer_id) = seeded_persistence();
    let other_customer: i64 = persistence
        .insert_customer(&create_test_customer("Globex"), "test")
        .unwrap();
    for (customer, hour) in [(customer_id, 9), (customer_id, 11), (other_customer, 13)] {
        persistence
            .insert_appointment(&create_test_appointment(
                customer,
                user_id,
                utc(2024, 6, 3, hour, 0),
                utc(2024, 6, 3, hour + 1, 0),
            ))
            .unwrap();
    }

    let removed: usize = persistence.delete_customer(customer_id).unwrap();

    assert_eq!(removed, 2);
    assert!(persistence.get_customer(customer_id).unwrap().is_none());
    assert_eq!(persistence.list_appointments().unwrap().len(), 1);
}

#[test]
fn test_delete_of_missing_customer_keeps_other_rows() {
    let (mut persistence, _, _) = seeded_persistence();

    let result: Result<usize, PersistenceError> = persistence.delete_customer(77);

    assert_eq!(result, Err(PersistenceError::CustomerNotFound(77)));
    assert_eq!(persistence.list_customers().unwrap().len(), 1);
}

#[test]
fn test_customers_by_country() {
    let (mut persistence, _, _) = seeded_persistence();
    let mut canadian: Customer = create_test_customer("Maple");
    canadian.division_id = 205;
    persistence.insert_customer(&canadian, "test").unwrap();

    let in_canada: Vec<CustomerRecord> = persistence.list_customers_by_country("Canada").unwrap();
    let countries: Vec<Country> = persistence.list_countries_with_customers().unwrap();

    assert_eq!(in_canada.len(), 1);
    assert_eq!(in_canada[0].customer.division_name, "Ontario");
    let names: Vec<&str> = countries.iter().map(|c| c.country_name.as_str()).collect();
    assert_eq!(names, vec!["Canada", "U.S"]);
}
