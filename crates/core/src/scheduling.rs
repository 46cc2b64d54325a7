// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Appointment workflows: validate, persist, then tell the user.
//!
//! A failed write is reported as [`Rejection::PersistenceFailed`] and never
//! yields an appointment. Nothing is rolled back here; the store owns its
//! own atomicity.

use crate::error::Rejection;
use crate::form::AppointmentForm;
use crate::pipeline::{validate_appointment_update, validate_new_appointment};
use crate::ports::{Notifier, SchedulingStore};
use crate::session::Session;
use chrono::NaiveDateTime;
use client_schedule_domain::{Appointment, upcoming_for_user};
use tracing::{info, warn};

/// Validates and persists a new appointment.
///
/// # Returns
///
/// The stored appointment (UTC times) with its assigned id.
///
/// # Errors
///
/// Returns the validation [`Rejection`], or
/// [`Rejection::PersistenceFailed`] if the store refuses the write. The
/// reason is also sent to `notifier`.
pub fn schedule_appointment<S, N>(
    store: &mut S,
    notifier: &mut N,
    session: &Session,
    form: &AppointmentForm,
) -> Result<Appointment, Rejection>
where
    S: SchedulingStore + ?Sized,
    N: Notifier + ?Sized,
{
    let outcome: Result<Appointment, Rejection> = validate_new_appointment(store, session, form)
        .and_then(|candidate| {
            let appointment_id: i64 = store.create(&candidate)?;
            Ok(candidate.with_id(appointment_id))
        });

    report(notifier, session, outcome, |appointment| {
        format!(
            "Appointment {} '{}' has been scheduled",
            appointment.appointment_id.unwrap_or_default(),
            appointment.title
        )
    })
}

/// Validates and persists changes to a stored appointment.
///
/// # Errors
///
/// As [`schedule_appointment`], plus [`Rejection::AppointmentNotFound`].
pub fn reschedule_appointment<S, N>(
    store: &mut S,
    notifier: &mut N,
    session: &Session,
    appointment_id: i64,
    changes: &AppointmentForm,
) -> Result<Appointment, Rejection>
where
    S: SchedulingStore + ?Sized,
    N: Notifier + ?Sized,
{
    let outcome: Result<Appointment, Rejection> =
        validate_appointment_update(store, session, appointment_id, changes).and_then(
            |candidate| {
                store.update(&candidate)?;
                Ok(candidate)
            },
        );

    report(notifier, session, outcome, |appointment| {
        format!(
            "Appointment {appointment_id} '{}' has been updated",
            appointment.title
        )
    })
}

/// Deletes a stored appointment.
///
/// # Returns
///
/// The appointment as it was before deletion.
///
/// # Errors
///
/// Returns [`Rejection::AppointmentNotFound`] if no appointment has the id,
/// or [`Rejection::PersistenceFailed`] if the store fails.
pub fn cancel_appointment<S, N>(
    store: &mut S,
    notifier: &mut N,
    session: &Session,
    appointment_id: i64,
) -> Result<Appointment, Rejection>
where
    S: SchedulingStore + ?Sized,
    N: Notifier + ?Sized,
{
    let outcome: Result<Appointment, Rejection> = store
        .find_by_id(appointment_id)
        .map_err(Rejection::from)
        .and_then(|found| found.ok_or(Rejection::AppointmentNotFound { appointment_id }))
        .and_then(|appointment| {
            store.delete(appointment_id)?;
            Ok(appointment)
        });

    report(notifier, session, outcome, |appointment| {
        format!(
            "Appointment ID: {appointment_id}, Type: {} has been canceled",
            appointment.appointment_type
        )
    })
}

/// Returns the session user's appointments starting within the next
/// fifteen minutes, rendered in the session zone.
///
/// # Errors
///
/// Returns [`Rejection::PersistenceFailed`] if the store cannot be read.
pub fn upcoming_appointments<S>(
    store: &mut S,
    session: &Session,
    now_utc: NaiveDateTime,
) -> Result<Vec<Appointment>, Rejection>
where
    S: SchedulingStore + ?Sized,
{
    let all: Vec<Appointment> = store.list_all()?;
    Ok(upcoming_for_user(&all, session.user_id(), now_utc)
        .iter()
        .map(|a| a.in_zone(session.zone()))
        .collect())
}

fn report<N, F>(
    notifier: &mut N,
    session: &Session,
    outcome: Result<Appointment, Rejection>,
    confirmation: F,
) -> Result<Appointment, Rejection>
where
    N: Notifier + ?Sized,
    F: FnOnce(&Appointment) -> String,
{
    match &outcome {
        Ok(appointment) => {
            info!(
                appointment_id = ?appointment.appointment_id,
                user = session.user_name(),
                "Appointment change accepted"
            );
            notifier.notify(&confirmation(appointment));
        }
        Err(Rejection::PersistenceFailed(err)) => {
            warn!(user = session.user_name(), error = %err, "Appointment write failed");
            notifier.notify(&format!("Persistence failed: {err}"));
        }
        Err(rejection) => {
            info!(
                user = session.user_name(),
                reason = rejection.reason(),
                "Appointment change rejected"
            );
            notifier.notify(&rejection.to_string());
        }
    }
    outcome
}
