// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Customer queries.
//!
//! Customers are loaded joined with their division and country.

use client_schedule_domain::{Country, Customer};
use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::data_models::CustomerRecord;
use crate::diesel_schema::{countries, customers, first_level_divisions};
use crate::error::PersistenceError;

/// Diesel Queryable struct for customer rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = customers)]
struct CustomerRow {
    customer_id: i64,
    customer_name: String,
    address: String,
    postal_code: String,
    phone: String,
    division_id: i64,
    created_at: String,
    created_by: String,
    last_updated_at: String,
    last_updated_by: String,
}

type JoinedCustomerRow = (CustomerRow, String, String);

fn into_record((row, division_name, country_name): JoinedCustomerRow) -> CustomerRecord {
    CustomerRecord {
        customer: Customer {
            customer_id: Some(row.customer_id),
            customer_name: row.customer_name,
            address: row.address,
            postal_code: row.postal_code,
            phone: row.phone,
            division_id: row.division_id,
            division_name,
            country_name,
        },
        created_at: row.created_at,
        created_by: row.created_by,
        last_updated_at: row.last_updated_at,
        last_updated_by: row.last_updated_by,
    }
}

/// Lists every customer, ordered by id.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_customers(conn: &mut SqliteConnection) -> Result<Vec<CustomerRecord>, PersistenceError> {
    debug!("Listing all customers");

    let rows: Vec<JoinedCustomerRow> = customers::table
        .inner_join(first_level_divisions::table.inner_join(countries::table))
        .select((
            CustomerRow::as_select(),
            first_level_divisions::division_name,
            countries::country_name,
        ))
        .order(customers::customer_id.asc())
        .load(conn)?;

    Ok(rows.into_iter().map(into_record).collect())
}

/// Retrieves a customer by id.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the customer is not found.
pub fn get_customer(
    conn: &mut SqliteConnection,
    customer_id: i64,
) -> Result<Option<CustomerRecord>, PersistenceError> {
    debug!(customer_id, "Looking up customer");

    let row: Option<JoinedCustomerRow> = customers::table
        .inner_join(first_level_divisions::table.inner_join(countries::table))
        .filter(customers::customer_id.eq(customer_id))
        .select((
            CustomerRow::as_select(),
            first_level_divisions::division_name,
            countries::country_name,
        ))
        .first(conn)
        .optional()?;

    Ok(row.map(into_record))
}

/// Checks whether a customer exists.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn customer_exists(conn: &mut SqliteConnection, customer_id: i64) -> Result<bool, PersistenceError> {
    use diesel::dsl::{exists, select};

    Ok(select(exists(
        customers::table.filter(customers::customer_id.eq(customer_id)),
    ))
    .get_result(conn)?)
}

/// Lists every customer id in ascending order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_customer_ids(conn: &mut SqliteConnection) -> Result<Vec<i64>, PersistenceError> {
    Ok(customers::table
        .select(customers::customer_id)
        .order(customers::customer_id.asc())
        .load(conn)?)
}

/// Lists the customers located in the named country, ordered by id.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_customers_by_country(
    conn: &mut SqliteConnection,
    country_name: &str,
) -> Result<Vec<CustomerRecord>, PersistenceError> {
    debug!(country_name, "Listing customers by country");

    let rows: Vec<JoinedCustomerRow> = customers::table
        .inner_join(first_level_divisions::table.inner_join(countries::table))
        .filter(countries::country_name.eq(country_name))
        .select((
            CustomerRow::as_select(),
            first_level_divisions::division_name,
            countries::country_name,
        ))
        .order(customers::customer_id.asc())
        .load(conn)?;

    Ok(rows.into_iter().map(into_record).collect())
}

/// Lists the countries that have at least one customer, ordered by name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_countries_with_customers(
    conn: &mut SqliteConnection,
) -> Result<Vec<Country>, PersistenceError> {
    let rows: Vec<(i64, String)> = countries::table
        .inner_join(first_level_divisions::table.inner_join(customers::table))
        .select((countries::country_id, countries::country_name))
        .distinct()
        .order(countries::country_name.asc())
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|(country_id, country_name)| Country {
            country_id,
            country_name,
        })
        .collect())
}
