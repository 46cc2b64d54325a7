// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Handlers are synchronous and take the persistence adapter by mutable
//! reference. Callers that share one adapter must serialize access.

use chrono::NaiveDateTime;
use client_schedule::{
    AppointmentForm, CalendarView, CollectingNotifier, CustomerForm, Session,
    cancel_appointment as cancel_workflow, list_appointments as list_workflow,
    prepare_customer_update, prepare_new_customer, reschedule_appointment,
    schedule_appointment, upcoming_appointments,
};
use client_schedule_domain::{
    Appointment, Contact, Customer, UPCOMING_WINDOW_MINUTES, contact_schedule,
    count_by_type_and_month,
};
use client_schedule_persistence::{CustomerRecord, SqlitePersistence, format_timestamp};
use tracing::{debug, info};

use crate::auth::{AuthenticatedSession, AuthenticationService};
use crate::error::{ApiError, AuthError};
use crate::login_activity::{LoginActivityLog, LoginOutcome};
use crate::request_response::{
    AppointmentInfo, AppointmentRequest, AppointmentResponse, CancelAppointmentResponse,
    ContactScheduleReport, ContactScheduleRow, CountryReport, CustomerInfo, CustomerRequest,
    CustomerResponse, DISPLAY_FORMAT, DeleteCustomerResponse, ListAppointmentsResponse,
    ListContactsResponse, ListCountriesResponse, ListCustomersResponse, ListDivisionsResponse,
    LoginRequest, LoginResponse, TypeMonthReport, WhoAmIResponse,
};

// ============================================================================
// Sessions
// ============================================================================

/// Logs a user in and reports their imminent appointments.
///
/// Every attempt with a non-blank name and password is appended to the
/// login activity log.
///
/// # Errors
///
/// Returns an error if:
/// - The name or password is blank
/// - The credentials do not match a user
/// - The requested zone is unknown
/// - Database operations fail
pub fn login(
    persistence: &mut SqlitePersistence,
    activity: &LoginActivityLog,
    request: &LoginRequest,
    now_utc: NaiveDateTime,
) -> Result<LoginResponse, ApiError> {
    if request.user_name.trim().is_empty() || request.password.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("credentials"),
            message: String::from("Username and password are required"),
        });
    }

    let authenticated: AuthenticatedSession = match AuthenticationService::login(
        persistence,
        &request.user_name,
        &request.password,
        request.time_zone.as_deref(),
        now_utc,
    ) {
        Ok(authenticated) => authenticated,
        Err(err) => {
            if matches!(err, AuthError::AuthenticationFailed { .. }) {
                activity.record(&request.user_name, LoginOutcome::Failed);
            }
            return Err(err.into());
        }
    };
    activity.record(&request.user_name, LoginOutcome::Success);

    let upcoming: Vec<Appointment> =
        upcoming_appointments(persistence, &authenticated.session, now_utc)?;

    Ok(LoginResponse {
        session_token: authenticated.token,
        user_name: authenticated.session.user_name().to_string(),
        time_zone: authenticated.session.zone().name().to_string(),
        expires_at: format_timestamp(authenticated.expires_at),
        alert: upcoming_alert(&upcoming),
        upcoming: upcoming.iter().map(AppointmentInfo::from).collect(),
    })
}

/// Summarizes the appointments starting soon, one line per appointment.
///
/// `upcoming` must already be rendered in the display zone.
#[must_use]
pub fn upcoming_alert(upcoming: &[Appointment]) -> String {
    if upcoming.is_empty() {
        return format!(
            "There are no upcoming appointments within {UPCOMING_WINDOW_MINUTES} minutes."
        );
    }

    let mut alert: String =
        format!("You have upcoming appointments within {UPCOMING_WINDOW_MINUTES} minutes:");
    for appointment in upcoming {
        alert.push_str(&format!(
            "\nAppointment ID: {}, Date: {}, Time: {}",
            appointment.appointment_id.unwrap_or_default(),
            appointment.start.format("%Y-%m-%d"),
            appointment.start.format("%H:%M"),
        ));
    }
    alert
}

/// Logs out by deleting the session.
///
/// # Errors
///
/// Returns an error if the logout fails.
pub fn logout(persistence: &mut SqlitePersistence, session_token: &str) -> Result<(), ApiError> {
    AuthenticationService::logout(persistence, session_token)?;
    Ok(())
}

/// Describes the current session.
#[must_use]
pub fn whoami(authenticated: &AuthenticatedSession) -> WhoAmIResponse {
    WhoAmIResponse {
        user_id: authenticated.session.user_id(),
        user_name: authenticated.session.user_name().to_string(),
        time_zone: authenticated.session.zone().name().to_string(),
        expires_at: format_timestamp(authenticated.expires_at),
    }
}

// ============================================================================
// Appointments
// ============================================================================

/// Lists appointments for a calendar view, in the session's zone.
///
/// # Arguments
///
/// * `view` - `all`, `month` or `week` (case-insensitive)
///
/// # Errors
///
/// Returns an error if the view is unknown or the store cannot be read.
pub fn list_appointments(
    persistence: &mut SqlitePersistence,
    session: &Session,
    view: &str,
    now_utc: NaiveDateTime,
) -> Result<ListAppointmentsResponse, ApiError> {
    let view: CalendarView = view.parse()?;
    let appointments: Vec<Appointment> = list_workflow(persistence, session, view, now_utc)?;

    debug!(?view, count = appointments.len(), "Listed appointments");

    Ok(ListAppointmentsResponse {
        view: view.as_str().to_string(),
        time_zone: session.zone().name().to_string(),
        appointments: appointments.iter().map(AppointmentInfo::from).collect(),
    })
}

/// Creates an appointment.
///
/// # Errors
///
/// Returns the translated [`client_schedule::Rejection`] if validation or
/// persistence fails.
pub fn create_appointment(
    persistence: &mut SqlitePersistence,
    session: &Session,
    request: AppointmentRequest,
) -> Result<AppointmentResponse, ApiError> {
    let form: AppointmentForm = request.into();
    let mut notifier: CollectingNotifier = CollectingNotifier::new();

    let stored: Appointment = schedule_appointment(persistence, &mut notifier, session, &form)?;

    Ok(appointment_response(session, &stored, notifier))
}

/// Changes a stored appointment. Blank fields keep stored values.
///
/// # Errors
///
/// Returns the translated [`client_schedule::Rejection`] if the appointment
/// does not exist, validation fails or persistence fails.
pub fn update_appointment(
    persistence: &mut SqlitePersistence,
    session: &Session,
    appointment_id: i64,
    request: AppointmentRequest,
) -> Result<AppointmentResponse, ApiError> {
    let form: AppointmentForm = request.into();
    let mut notifier: CollectingNotifier = CollectingNotifier::new();

    let stored: Appointment =
        reschedule_appointment(persistence, &mut notifier, session, appointment_id, &form)?;

    Ok(appointment_response(session, &stored, notifier))
}

/// Cancels (deletes) an appointment.
///
/// # Errors
///
/// Returns an error if the appointment does not exist or cannot be deleted.
pub fn cancel_appointment(
    persistence: &mut SqlitePersistence,
    session: &Session,
    appointment_id: i64,
) -> Result<CancelAppointmentResponse, ApiError> {
    let mut notifier: CollectingNotifier = CollectingNotifier::new();

    let canceled: Appointment =
        cancel_workflow(persistence, &mut notifier, session, appointment_id)?;

    Ok(CancelAppointmentResponse {
        appointment_id,
        appointment_type: canceled.appointment_type,
        message: last_message(notifier),
    })
}

fn appointment_response(
    session: &Session,
    stored: &Appointment,
    notifier: CollectingNotifier,
) -> AppointmentResponse {
    AppointmentResponse {
        appointment: AppointmentInfo::from(&stored.in_zone(session.zone())),
        message: last_message(notifier),
    }
}

fn last_message(notifier: CollectingNotifier) -> String {
    notifier.into_messages().pop().unwrap_or_default()
}

// ============================================================================
// Customers
// ============================================================================

/// Lists every customer.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn list_customers(
    persistence: &mut SqlitePersistence,
) -> Result<ListCustomersResponse, ApiError> {
    let customers: Vec<CustomerRecord> = persistence.list_customers()?;
    Ok(ListCustomersResponse {
        customers: customers.into_iter().map(CustomerInfo::from).collect(),
    })
}

/// Creates a customer on behalf of the session user.
///
/// # Errors
///
/// Returns an error if a field is blank, the division is unknown or the
/// insert fails.
pub fn create_customer(
    persistence: &mut SqlitePersistence,
    session: &Session,
    request: CustomerRequest,
) -> Result<CustomerResponse, ApiError> {
    let form: CustomerForm = request.into();
    let customer: Customer = prepare_new_customer(persistence, &form)?;

    let customer_id: i64 = persistence.insert_customer(&customer, session.user_name())?;
    let record: CustomerRecord = fetch_customer(persistence, customer_id)?;

    info!(customer_id, user = session.user_name(), "Customer created");
    Ok(CustomerResponse {
        message: format!(
            "Customer {customer_id} '{}' has been added",
            record.customer.customer_name
        ),
        customer: CustomerInfo::from(record),
    })
}

/// Changes a customer on behalf of the session user. Blank fields keep
/// stored values.
///
/// # Errors
///
/// Returns an error if the customer or division does not exist or the
/// update fails.
pub fn update_customer(
    persistence: &mut SqlitePersistence,
    session: &Session,
    customer_id: i64,
    request: CustomerRequest,
) -> Result<CustomerResponse, ApiError> {
    let form: CustomerForm = request.into();
    let stored: CustomerRecord = fetch_customer(persistence, customer_id)?;
    let customer: Customer = prepare_customer_update(persistence, &stored.customer, &form)?;

    persistence.update_customer(&customer, session.user_name())?;
    let record: CustomerRecord = fetch_customer(persistence, customer_id)?;

    info!(customer_id, user = session.user_name(), "Customer updated");
    Ok(CustomerResponse {
        message: format!(
            "Customer {customer_id} '{}' has been updated",
            record.customer.customer_name
        ),
        customer: CustomerInfo::from(record),
    })
}

/// Deletes a customer together with all of its appointments.
///
/// # Errors
///
/// Returns an error if the customer does not exist or the delete fails.
/// Nothing is removed on failure.
pub fn delete_customer(
    persistence: &mut SqlitePersistence,
    session: &Session,
    customer_id: i64,
) -> Result<DeleteCustomerResponse, ApiError> {
    let removed_appointments: usize = persistence.delete_customer(customer_id)?;

    info!(
        customer_id,
        removed_appointments,
        user = session.user_name(),
        "Customer deleted"
    );
    Ok(DeleteCustomerResponse {
        customer_id,
        removed_appointments,
        message: String::from("The customer has been successfully deleted."),
    })
}

fn fetch_customer(
    persistence: &mut SqlitePersistence,
    customer_id: i64,
) -> Result<CustomerRecord, ApiError> {
    persistence
        .get_customer(customer_id)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Customer"),
            message: format!("No customer found with id {customer_id}"),
        })
}

// ============================================================================
// Reference data
// ============================================================================

/// Lists the contacts appointments can be held with.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn list_contacts(persistence: &mut SqlitePersistence) -> Result<ListContactsResponse, ApiError> {
    Ok(ListContactsResponse {
        contacts: persistence.list_contacts()?,
    })
}

/// Lists every country.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn list_countries(
    persistence: &mut SqlitePersistence,
) -> Result<ListCountriesResponse, ApiError> {
    Ok(ListCountriesResponse {
        countries: persistence.list_countries()?,
    })
}

/// Lists first-level divisions, optionally of one country.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn list_divisions(
    persistence: &mut SqlitePersistence,
    country: Option<&str>,
) -> Result<ListDivisionsResponse, ApiError> {
    Ok(ListDivisionsResponse {
        country: country.map(str::to_string),
        divisions: persistence.list_divisions(country)?,
    })
}

// ============================================================================
// Reports
// ============================================================================

/// Counts appointments by type and month of their start in the session's
/// zone.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn type_month_report(
    persistence: &mut SqlitePersistence,
    session: &Session,
) -> Result<TypeMonthReport, ApiError> {
    let local: Vec<Appointment> = appointments_in_zone(persistence, session)?;
    Ok(TypeMonthReport {
        time_zone: session.zone().name().to_string(),
        rows: count_by_type_and_month(&local),
    })
}

/// Lists the appointments held with a contact, ordered by start.
///
/// # Errors
///
/// Returns an error if the contact does not exist or the store cannot be
/// read.
pub fn contact_schedule_report(
    persistence: &mut SqlitePersistence,
    session: &Session,
    contact_id: i64,
) -> Result<ContactScheduleReport, ApiError> {
    let contact: Contact = persistence
        .list_contacts()?
        .into_iter()
        .find(|c| c.contact_id == contact_id)
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Contact"),
            message: format!("No contact found with id {contact_id}"),
        })?;

    let local: Vec<Appointment> = appointments_in_zone(persistence, session)?;
    let rows: Vec<ContactScheduleRow> = contact_schedule(&local, contact_id)
        .iter()
        .map(|a| ContactScheduleRow {
            appointment_id: a.appointment_id.unwrap_or_default(),
            title: a.title.clone(),
            appointment_type: a.appointment_type.clone(),
            description: a.description.clone(),
            start: a.start.format(DISPLAY_FORMAT).to_string(),
            end: a.end.format(DISPLAY_FORMAT).to_string(),
            customer_id: a.customer_id,
        })
        .collect();

    Ok(ContactScheduleReport {
        contact_id,
        contact_name: contact.contact_name,
        time_zone: session.zone().name().to_string(),
        rows,
    })
}

/// Lists the customers of a country, with the countries that have any.
///
/// Without a country only the country list is filled in.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn country_report(
    persistence: &mut SqlitePersistence,
    country: Option<&str>,
) -> Result<CountryReport, ApiError> {
    let available_countries: Vec<String> = persistence
        .list_countries_with_customers()?
        .into_iter()
        .map(|c| c.country_name)
        .collect();

    let customers: Vec<CustomerInfo> = match country {
        Some(country) => persistence
            .list_customers_by_country(country)?
            .into_iter()
            .map(CustomerInfo::from)
            .collect(),
        None => Vec::new(),
    };

    Ok(CountryReport {
        country: country.map(str::to_string),
        available_countries,
        customers,
    })
}

fn appointments_in_zone(
    persistence: &mut SqlitePersistence,
    session: &Session,
) -> Result<Vec<Appointment>, ApiError> {
    Ok(persistence
        .list_appointments()?
        .iter()
        .map(|a| a.in_zone(session.zone()))
        .collect())
}
