// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Customer mutations.
//!
//! Every write stamps the audit columns with the current UTC time and the
//! acting user's name.

use chrono::{NaiveDateTime, Utc};
use client_schedule_domain::{Customer, first_unused_id};
use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::info;

use crate::data_models::format_timestamp;
use crate::diesel_schema::{appointments, customers};
use crate::error::PersistenceError;
use crate::queries::customers::list_customer_ids;

fn now_utc() -> String {
    let now: NaiveDateTime = Utc::now().naive_utc();
    format_timestamp(now)
}

/// Inserts a new customer and returns its assigned id.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `customer` - The customer; its id, division name and country name are ignored
/// * `actor` - Name of the user making the change
///
/// # Errors
///
/// Returns an error if the division does not exist or the database operation
/// fails.
pub fn insert_customer(
    conn: &mut SqliteConnection,
    customer: &Customer,
    actor: &str,
) -> Result<i64, PersistenceError> {
    let stamp: String = now_utc();

    conn.transaction::<_, PersistenceError, _>(|conn| {
        let existing: Vec<i64> = list_customer_ids(conn)?;
        let customer_id: i64 = first_unused_id(&existing);

        diesel::insert_into(customers::table)
            .values((
                customers::customer_id.eq(customer_id),
                customers::customer_name.eq(&customer.customer_name),
                customers::address.eq(&customer.address),
                customers::postal_code.eq(&customer.postal_code),
                customers::phone.eq(&customer.phone),
                customers::division_id.eq(customer.division_id),
                customers::created_at.eq(&stamp),
                customers::created_by.eq(actor),
                customers::last_updated_at.eq(&stamp),
                customers::last_updated_by.eq(actor),
            ))
            .execute(conn)?;

        info!(customer_id, actor, "Inserted customer");
        Ok(customer_id)
    })
}

/// Overwrites a stored customer's editable columns.
///
/// # Errors
///
/// Returns [`PersistenceError::CustomerNotFound`] if no row carries the id,
/// or an error if the database operation fails.
pub fn update_customer(
    conn: &mut SqliteConnection,
    customer: &Customer,
    actor: &str,
) -> Result<(), PersistenceError> {
    let customer_id: i64 = customer
        .customer_id
        .ok_or_else(|| PersistenceError::NotFound("Customer has no id".to_string()))?;

    let rows_affected: usize = diesel::update(customers::table)
        .filter(customers::customer_id.eq(customer_id))
        .set((
            customers::customer_name.eq(&customer.customer_name),
            customers::address.eq(&customer.address),
            customers::postal_code.eq(&customer.postal_code),
            customers::phone.eq(&customer.phone),
            customers::division_id.eq(customer.division_id),
            customers::last_updated_at.eq(now_utc()),
            customers::last_updated_by.eq(actor),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::CustomerNotFound(customer_id));
    }

    info!(customer_id, actor, "Updated customer");
    Ok(())
}

/// Deletes a customer together with all of its appointments.
///
/// Both deletes run in one transaction.
///
/// # Returns
///
/// The number of appointments removed.
///
/// # Errors
///
/// Returns [`PersistenceError::CustomerNotFound`] if no row carries the id,
/// or an error if the database operation fails.
pub fn delete_customer(
    conn: &mut SqliteConnection,
    customer_id: i64,
) -> Result<usize, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let removed_appointments: usize = diesel::delete(appointments::table)
            .filter(appointments::customer_id.eq(customer_id))
            .execute(conn)?;

        let rows_affected: usize = diesel::delete(customers::table)
            .filter(customers::customer_id.eq(customer_id))
            .execute(conn)?;

        if rows_affected == 0 {
            return Err(PersistenceError::CustomerNotFound(customer_id));
        }

        info!(customer_id, removed_appointments, "Deleted customer");
        Ok(removed_appointments)
    })
}
