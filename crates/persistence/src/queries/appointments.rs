// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Appointment queries.
//!
//! Appointments are always loaded joined with their contact so the contact
//! name travels with the record. Times are returned exactly as stored (UTC).

use client_schedule_domain::Appointment;
use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::data_models::parse_timestamp;
use crate::diesel_schema::{appointments, contacts};
use crate::error::PersistenceError;

/// Diesel Queryable struct for appointment rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = appointments)]
struct AppointmentRow {
    appointment_id: i64,
    title: String,
    description: String,
    location: String,
    appointment_type: String,
    start_utc: String,
    end_utc: String,
    customer_id: i64,
    user_id: i64,
    contact_id: i64,
}

impl AppointmentRow {
    fn into_appointment(self, contact_name: String) -> Result<Appointment, PersistenceError> {
        Ok(Appointment {
            appointment_id: Some(self.appointment_id),
            title: self.title,
            description: self.description,
            location: self.location,
            appointment_type: self.appointment_type,
            start: parse_timestamp(&self.start_utc)?,
            end: parse_timestamp(&self.end_utc)?,
            customer_id: self.customer_id,
            user_id: self.user_id,
            contact_id: self.contact_id,
            contact_name,
        })
    }
}

fn into_appointments(rows: Vec<(AppointmentRow, String)>) -> Result<Vec<Appointment>, PersistenceError> {
    rows.into_iter()
        .map(|(row, contact_name)| row.into_appointment(contact_name))
        .collect()
}

/// Lists every appointment, ordered by id.
///
/// # Errors
///
/// Returns an error if the database query fails or a stored timestamp is
/// malformed.
pub fn list_appointments(conn: &mut SqliteConnection) -> Result<Vec<Appointment>, PersistenceError> {
    debug!("Listing all appointments");

    let rows: Vec<(AppointmentRow, String)> = appointments::table
        .inner_join(contacts::table)
        .select((AppointmentRow::as_select(), contacts::contact_name))
        .order(appointments::appointment_id.asc())
        .load(conn)?;

    into_appointments(rows)
}

/// Retrieves an appointment by id.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the appointment is not found.
pub fn get_appointment(
    conn: &mut SqliteConnection,
    appointment_id: i64,
) -> Result<Option<Appointment>, PersistenceError> {
    debug!(appointment_id, "Looking up appointment");

    let result: Option<(AppointmentRow, String)> = appointments::table
        .inner_join(contacts::table)
        .filter(appointments::appointment_id.eq(appointment_id))
        .select((AppointmentRow::as_select(), contacts::contact_name))
        .first(conn)
        .optional()?;

    result
        .map(|(row, contact_name)| row.into_appointment(contact_name))
        .transpose()
}

/// Lists every appointment id in ascending order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_appointment_ids(conn: &mut SqliteConnection) -> Result<Vec<i64>, PersistenceError> {
    Ok(appointments::table
        .select(appointments::appointment_id)
        .order(appointments::appointment_id.asc())
        .load(conn)?)
}
