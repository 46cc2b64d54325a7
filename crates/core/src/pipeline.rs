// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Admission of proposed appointments.
//!
//! A candidate passes through these stages in order and stops at the first
//! failure:
//!
//! 1. Field presence
//! 2. Strict `HH:mm` time and `yyyy-MM-dd` date parsing
//! 3. Contact, customer and user resolution
//! 4. Composition of start/end in the session zone, then conversion to UTC;
//!    end must follow start
//! 5. Business hours (08:00-22:00 Eastern, inclusive)
//! 6. Overlap against every stored appointment, read fresh from the store
//!
//! The admitted appointment carries UTC times and is ready to persist.
//!
//! ## Concurrency
//!
//! Validation reads the store and persistence writes it in separate steps.
//! Nothing holds the store between the two, so two sessions admitting
//! overlapping appointments at the same time can both succeed. Validation
//! itself has no side effects and may be repeated freely.

use crate::error::Rejection;
use crate::form::{AppointmentForm, merged_text, supplied_id};
use crate::ports::{CustomerResolver, SchedulingStore, UserResolver};
use crate::session::Session;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use client_schedule_domain::{
    Appointment, DomainError, find_conflict, is_within_business_hours, parse_date,
    parse_time_of_day, require_text, to_utc, validate_interval,
};
use tracing::debug;

/// Validates a new appointment.
///
/// # Arguments
///
/// * `store` - Source of contacts, customers, users and existing appointments
/// * `session` - The acting user and their zone
/// * `form` - The raw input
///
/// # Returns
///
/// The admitted appointment, with UTC times and no id.
///
/// # Errors
///
/// Returns the [`Rejection`] of the first failing stage.
pub fn validate_new_appointment<S>(
    store: &mut S,
    session: &Session,
    form: &AppointmentForm,
) -> Result<Appointment, Rejection>
where
    S: SchedulingStore + ?Sized,
{
    require_text("title", &form.title)?;
    require_text("description", &form.description)?;
    require_text("location", &form.location)?;
    require_text("type", &form.appointment_type)?;
    require_text("contact", &form.contact_name)?;
    require_text("start_date", &form.start_date)?;
    require_text("start_time", &form.start_time)?;
    require_text("end_date", &form.end_date)?;
    require_text("end_time", &form.end_time)?;
    let customer_id: i64 = supplied_id(form.customer_id).ok_or(Rejection::MissingFields {
        field: "customer_id",
    })?;
    let user_id: i64 = supplied_id(form.user_id).unwrap_or_else(|| session.user_id());

    let start_time: NaiveTime = parse_time_of_day(&form.start_time)?;
    let end_time: NaiveTime = parse_time_of_day(&form.end_time)?;
    let start_date: NaiveDate = parse_date(&form.start_date)?;
    let end_date: NaiveDate = parse_date(&form.end_date)?;

    let contact_name: String = form.contact_name.trim().to_string();
    let contact_id: i64 = resolve_contact(store, &contact_name)?;
    ensure_customer(store, customer_id)?;
    ensure_user(store, user_id)?;

    let candidate: Appointment = Appointment {
        appointment_id: None,
        title: form.title.trim().to_string(),
        description: form.description.trim().to_string(),
        location: form.location.trim().to_string(),
        appointment_type: form.appointment_type.trim().to_string(),
        start: to_utc(start_date.and_time(start_time), session.zone()),
        end: to_utc(end_date.and_time(end_time), session.zone()),
        customer_id,
        user_id,
        contact_id,
        contact_name,
    };

    admit(store, candidate)
}

/// Validates changes to a stored appointment.
///
/// Blank text fields keep their stored values. A supplied date replaces only
/// the date part of the stored start or end; a supplied time replaces only
/// the time of day. Merging happens in the session's zone. An endpoint with
/// neither date nor time supplied keeps its stored instant, so an ambiguous
/// local time is never re-resolved.
///
/// # Returns
///
/// The merged appointment, with UTC times and the original id.
///
/// # Errors
///
/// Returns [`Rejection::AppointmentNotFound`] if no appointment has the id,
/// otherwise the [`Rejection`] of the first failing stage. The appointment
/// never conflicts with its own stored interval.
pub fn validate_appointment_update<S>(
    store: &mut S,
    session: &Session,
    appointment_id: i64,
    changes: &AppointmentForm,
) -> Result<Appointment, Rejection>
where
    S: SchedulingStore + ?Sized,
{
    let stored: Appointment = store
        .find_by_id(appointment_id)?
        .ok_or(Rejection::AppointmentNotFound { appointment_id })?;
    let current: Appointment = stored.in_zone(session.zone());

    let start_time: NaiveTime = parse_supplied(&changes.start_time, parse_time_of_day)?
        .unwrap_or_else(|| current.start.time());
    let end_time: NaiveTime = parse_supplied(&changes.end_time, parse_time_of_day)?
        .unwrap_or_else(|| current.end.time());
    let start_date: NaiveDate =
        parse_supplied(&changes.start_date, parse_date)?.unwrap_or_else(|| current.start.date());
    let end_date: NaiveDate =
        parse_supplied(&changes.end_date, parse_date)?.unwrap_or_else(|| current.end.date());

    let (contact_id, contact_name): (i64, String) = if changes.contact_name.trim().is_empty() {
        (current.contact_id, current.contact_name.clone())
    } else {
        let contact_name: String = changes.contact_name.trim().to_string();
        (resolve_contact(store, &contact_name)?, contact_name)
    };
    let customer_id: i64 = supplied_id(changes.customer_id).unwrap_or(current.customer_id);
    let user_id: i64 = supplied_id(changes.user_id).unwrap_or(current.user_id);
    ensure_customer(store, customer_id)?;
    ensure_user(store, user_id)?;

    let start: NaiveDateTime = if is_blank(&changes.start_date) && is_blank(&changes.start_time) {
        stored.start
    } else {
        to_utc(start_date.and_time(start_time), session.zone())
    };
    let end: NaiveDateTime = if is_blank(&changes.end_date) && is_blank(&changes.end_time) {
        stored.end
    } else {
        to_utc(end_date.and_time(end_time), session.zone())
    };

    let candidate: Appointment = Appointment {
        appointment_id: Some(appointment_id),
        title: merged_text(&changes.title, &current.title),
        description: merged_text(&changes.description, &current.description),
        location: merged_text(&changes.location, &current.location),
        appointment_type: merged_text(&changes.appointment_type, &current.appointment_type),
        start,
        end,
        customer_id,
        user_id,
        contact_id,
        contact_name,
    };

    admit(store, candidate)
}

/// Runs the time-based stages on a fully resolved candidate with UTC times.
fn admit<S>(store: &mut S, candidate: Appointment) -> Result<Appointment, Rejection>
where
    S: SchedulingStore + ?Sized,
{
    let start: NaiveDateTime = candidate.start;
    let end: NaiveDateTime = candidate.end;
    validate_interval(start, end)?;

    if !is_within_business_hours(start, end) {
        debug!(%start, %end, "Candidate falls outside business hours");
        return Err(Rejection::OutsideBusinessHours);
    }

    let existing: Vec<Appointment> = store.list_all()?;
    if let Some(conflict) = find_conflict(&existing, start, end, candidate.appointment_id) {
        debug!(
            conflicting_id = ?conflict.appointment_id,
            %start,
            %end,
            "Candidate overlaps an existing appointment"
        );
        return Err(Rejection::OverlappingAppointment {
            conflicting_id: conflict.appointment_id.unwrap_or_default(),
        });
    }

    debug!(%start, %end, appointment_id = ?candidate.appointment_id, "Candidate admitted");
    Ok(candidate)
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Parses a supplied value, or yields `None` when it is blank. Non-blank
/// values reach the parser untrimmed.
fn parse_supplied<T>(
    value: &str,
    parse: fn(&str) -> Result<T, DomainError>,
) -> Result<Option<T>, DomainError> {
    if is_blank(value) {
        return Ok(None);
    }
    parse(value).map(Some)
}

fn resolve_contact<S>(store: &mut S, contact_name: &str) -> Result<i64, Rejection>
where
    S: SchedulingStore + ?Sized,
{
    store
        .id_for_name(contact_name)?
        .ok_or_else(|| Rejection::UnknownContact {
            contact_name: contact_name.to_string(),
        })
}

fn ensure_customer<S>(store: &mut S, customer_id: i64) -> Result<(), Rejection>
where
    S: SchedulingStore + ?Sized,
{
    if CustomerResolver::exists(store, customer_id)? {
        Ok(())
    } else {
        Err(Rejection::UnknownCustomer { customer_id })
    }
}

fn ensure_user<S>(store: &mut S, user_id: i64) -> Result<(), Rejection>
where
    S: SchedulingStore + ?Sized,
{
    if UserResolver::exists(store, user_id)? {
        Ok(())
    } else {
        Err(Rejection::UnknownUser { user_id })
    }
}
