// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Appointment mutations.
//!
//! Ids are assigned here, not by `SQLite`: a new appointment takes the
//! smallest positive id not already in use.

use client_schedule_domain::{Appointment, first_unused_id};
use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::{debug, info};

use crate::data_models::format_timestamp;
use crate::diesel_schema::appointments;
use crate::error::PersistenceError;
use crate::queries::appointments::list_appointment_ids;

/// Inserts a new appointment and returns its assigned id.
///
/// Any id carried by `appointment` is ignored. The id lookup and the insert
/// share one transaction.
///
/// # Errors
///
/// Returns an error if the insert violates a constraint or the database
/// operation fails.
pub fn insert_appointment(
    conn: &mut SqliteConnection,
    appointment: &Appointment,
) -> Result<i64, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let existing: Vec<i64> = list_appointment_ids(conn)?;
        let appointment_id: i64 = first_unused_id(&existing);

        diesel::insert_into(appointments::table)
            .values((
                appointments::appointment_id.eq(appointment_id),
                appointments::title.eq(&appointment.title),
                appointments::description.eq(&appointment.description),
                appointments::location.eq(&appointment.location),
                appointments::appointment_type.eq(&appointment.appointment_type),
                appointments::start_utc.eq(format_timestamp(appointment.start)),
                appointments::end_utc.eq(format_timestamp(appointment.end)),
                appointments::customer_id.eq(appointment.customer_id),
                appointments::user_id.eq(appointment.user_id),
                appointments::contact_id.eq(appointment.contact_id),
            ))
            .execute(conn)?;

        info!(
            appointment_id,
            customer_id = appointment.customer_id,
            user_id = appointment.user_id,
            "Inserted appointment"
        );
        Ok(appointment_id)
    })
}

/// Overwrites every column of a stored appointment.
///
/// # Errors
///
/// Returns [`PersistenceError::NotFound`] if `appointment` has no id,
/// [`PersistenceError::AppointmentNotFound`] if no row carries the id, or
/// an error if the database operation fails.
pub fn update_appointment(
    conn: &mut SqliteConnection,
    appointment: &Appointment,
) -> Result<(), PersistenceError> {
    let appointment_id: i64 = appointment
        .appointment_id
        .ok_or_else(|| PersistenceError::NotFound("Appointment has no id".to_string()))?;

    let rows_affected: usize = diesel::update(appointments::table)
        .filter(appointments::appointment_id.eq(appointment_id))
        .set((
            appointments::title.eq(&appointment.title),
            appointments::description.eq(&appointment.description),
            appointments::location.eq(&appointment.location),
            appointments::appointment_type.eq(&appointment.appointment_type),
            appointments::start_utc.eq(format_timestamp(appointment.start)),
            appointments::end_utc.eq(format_timestamp(appointment.end)),
            appointments::customer_id.eq(appointment.customer_id),
            appointments::user_id.eq(appointment.user_id),
            appointments::contact_id.eq(appointment.contact_id),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::AppointmentNotFound(appointment_id));
    }

    debug!(appointment_id, "Updated appointment");
    Ok(())
}

/// Deletes an appointment by id.
///
/// # Errors
///
/// Returns [`PersistenceError::AppointmentNotFound`] if no row carries the
/// id, or an error if the database operation fails.
pub fn delete_appointment(
    conn: &mut SqliteConnection,
    appointment_id: i64,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::delete(appointments::table)
        .filter(appointments::appointment_id.eq(appointment_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::AppointmentNotFound(appointment_id));
    }

    info!(appointment_id, "Deleted appointment");
    Ok(())
}
