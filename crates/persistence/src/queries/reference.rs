// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Contacts, countries and first-level divisions.
//!
//! These tables are seeded by migration and read-only at runtime.

use client_schedule_domain::{Contact, Country, Division};
use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::diesel_schema::{contacts, countries, first_level_divisions};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = contacts)]
struct ContactRow {
    contact_id: i64,
    contact_name: String,
    email: String,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = first_level_divisions)]
struct DivisionRow {
    division_id: i64,
    division_name: String,
    country_id: i64,
}

impl From<DivisionRow> for Division {
    fn from(row: DivisionRow) -> Self {
        Self {
            division_id: row.division_id,
            division_name: row.division_name,
            country_id: row.country_id,
        }
    }
}

/// Lists every contact, ordered by id.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_contacts(conn: &mut SqliteConnection) -> Result<Vec<Contact>, PersistenceError> {
    let rows: Vec<ContactRow> = contacts::table
        .select(ContactRow::as_select())
        .order(contacts::contact_id.asc())
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|row| Contact {
            contact_id: row.contact_id,
            contact_name: row.contact_name,
            email: row.email,
        })
        .collect())
}

/// Resolves a contact name to its id. Names match exactly.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no contact has the name.
pub fn get_contact_id_by_name(
    conn: &mut SqliteConnection,
    contact_name: &str,
) -> Result<Option<i64>, PersistenceError> {
    debug!(contact_name, "Resolving contact");

    Ok(contacts::table
        .filter(contacts::contact_name.eq(contact_name))
        .select(contacts::contact_id)
        .first(conn)
        .optional()?)
}

/// Lists every country, ordered by id.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_countries(conn: &mut SqliteConnection) -> Result<Vec<Country>, PersistenceError> {
    let rows: Vec<(i64, String)> = countries::table
        .select((countries::country_id, countries::country_name))
        .order(countries::country_id.asc())
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|(country_id, country_name)| Country {
            country_id,
            country_name,
        })
        .collect())
}

/// Lists the divisions of the named country, or of every country when
/// `country_name` is `None`. Ordered by id.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_divisions(
    conn: &mut SqliteConnection,
    country_name: Option<&str>,
) -> Result<Vec<Division>, PersistenceError> {
    let rows: Vec<DivisionRow> = match country_name {
        Some(country_name) => first_level_divisions::table
            .inner_join(countries::table)
            .filter(countries::country_name.eq(country_name))
            .select(DivisionRow::as_select())
            .order(first_level_divisions::division_id.asc())
            .load(conn)?,
        None => first_level_divisions::table
            .select(DivisionRow::as_select())
            .order(first_level_divisions::division_id.asc())
            .load(conn)?,
    };

    Ok(rows.into_iter().map(Division::from).collect())
}

/// Retrieves a division by its exact name.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no division has the name.
pub fn get_division_by_name(
    conn: &mut SqliteConnection,
    division_name: &str,
) -> Result<Option<Division>, PersistenceError> {
    let row: Option<DivisionRow> = first_level_divisions::table
        .filter(first_level_divisions::division_name.eq(division_name))
        .select(DivisionRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(Division::from))
}
