// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Appointment times in responses are rendered in the session's zone as
//! `yyyy-MM-dd HH:mm`. Audit timestamps stay UTC.

use client_schedule::{AppointmentForm, CustomerForm};
use client_schedule_domain::{Appointment, Contact, Country, Division, TypeMonthCount};
use client_schedule_persistence::CustomerRecord;
use serde::{Deserialize, Serialize};

/// Display format of appointment times.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// API request to log in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// The login name (case-sensitive).
    pub user_name: String,
    /// The password.
    pub password: String,
    /// IANA zone to enter and display times in. Defaults to UTC.
    #[serde(default)]
    pub time_zone: Option<String>,
}

/// API response for successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// The session token (opaque).
    pub session_token: String,
    pub user_name: String,
    /// The zone bound to the session.
    pub time_zone: String,
    /// Session expiration (UTC, `yyyy-MM-dd HH:mm:ss`).
    pub expires_at: String,
    /// The user's appointments starting within the next 15 minutes.
    pub upcoming: Vec<AppointmentInfo>,
    /// Human-readable summary of `upcoming`.
    pub alert: String,
}

/// API response describing the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhoAmIResponse {
    pub user_id: i64,
    pub user_name: String,
    pub time_zone: String,
    pub expires_at: String,
}

/// API request to create or change an appointment.
///
/// Dates are `yyyy-MM-dd` and times strict 24-hour `HH:mm`, both in the
/// session's zone. When changing, omitted or blank fields keep their stored
/// values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppointmentRequest {
    pub title: String,
    pub description: String,
    pub location: String,
    #[serde(rename = "type")]
    pub appointment_type: String,
    pub contact_name: String,
    pub start_date: String,
    pub start_time: String,
    pub end_date: String,
    pub end_time: String,
    /// `0` is treated as absent.
    pub customer_id: Option<i64>,
    /// Defaults to the session user. `0` is treated as absent.
    pub user_id: Option<i64>,
}

impl From<AppointmentRequest> for AppointmentForm {
    fn from(request: AppointmentRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            location: request.location,
            appointment_type: request.appointment_type,
            contact_name: request.contact_name,
            start_date: request.start_date,
            start_time: request.start_time,
            end_date: request.end_date,
            end_time: request.end_time,
            customer_id: request.customer_id,
            user_id: request.user_id,
        }
    }
}

/// An appointment as shown to a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentInfo {
    pub appointment_id: i64,
    pub title: String,
    pub description: String,
    pub location: String,
    #[serde(rename = "type")]
    pub appointment_type: String,
    pub contact_id: i64,
    pub contact_name: String,
    /// Start in the session's zone.
    pub start: String,
    /// End in the session's zone.
    pub end: String,
    pub customer_id: i64,
    pub user_id: i64,
}

impl From<&Appointment> for AppointmentInfo {
    /// Expects an appointment already rendered in the display zone.
    fn from(appointment: &Appointment) -> Self {
        Self {
            appointment_id: appointment.appointment_id.unwrap_or_default(),
            title: appointment.title.clone(),
            description: appointment.description.clone(),
            location: appointment.location.clone(),
            appointment_type: appointment.appointment_type.clone(),
            contact_id: appointment.contact_id,
            contact_name: appointment.contact_name.clone(),
            start: appointment.start.format(DISPLAY_FORMAT).to_string(),
            end: appointment.end.format(DISPLAY_FORMAT).to_string(),
            customer_id: appointment.customer_id,
            user_id: appointment.user_id,
        }
    }
}

/// API response for a created or changed appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentResponse {
    pub appointment: AppointmentInfo,
    /// The confirmation shown to the user.
    pub message: String,
}

/// API response listing appointments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListAppointmentsResponse {
    /// `all`, `month` or `week`.
    pub view: String,
    pub time_zone: String,
    pub appointments: Vec<AppointmentInfo>,
}

/// API response for a canceled appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelAppointmentResponse {
    pub appointment_id: i64,
    #[serde(rename = "type")]
    pub appointment_type: String,
    pub message: String,
}

/// API request to create or change a customer.
///
/// `division` is the first-level division name. When changing, omitted or
/// blank fields keep their stored values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerRequest {
    pub customer_name: String,
    pub address: String,
    pub postal_code: String,
    pub phone: String,
    pub division: String,
}

impl From<CustomerRequest> for CustomerForm {
    fn from(request: CustomerRequest) -> Self {
        Self {
            customer_name: request.customer_name,
            address: request.address,
            postal_code: request.postal_code,
            phone: request.phone,
            division_name: request.division,
        }
    }
}

/// A customer with its location and audit columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub customer_id: i64,
    pub customer_name: String,
    pub address: String,
    pub postal_code: String,
    pub phone: String,
    pub division_id: i64,
    pub division: String,
    pub country: String,
    pub created_at: String,
    pub created_by: String,
    pub last_updated_at: String,
    pub last_updated_by: String,
}

impl From<CustomerRecord> for CustomerInfo {
    fn from(record: CustomerRecord) -> Self {
        Self {
            customer_id: record.customer.customer_id.unwrap_or_default(),
            customer_name: record.customer.customer_name,
            address: record.customer.address,
            postal_code: record.customer.postal_code,
            phone: record.customer.phone,
            division_id: record.customer.division_id,
            division: record.customer.division_name,
            country: record.customer.country_name,
            created_at: record.created_at,
            created_by: record.created_by,
            last_updated_at: record.last_updated_at,
            last_updated_by: record.last_updated_by,
        }
    }
}

/// API response for a created or changed customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerResponse {
    pub customer: CustomerInfo,
    pub message: String,
}

/// API response listing customers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListCustomersResponse {
    pub customers: Vec<CustomerInfo>,
}

/// API response for a deleted customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteCustomerResponse {
    pub customer_id: i64,
    /// How many of the customer's appointments were removed with it.
    pub removed_appointments: usize,
    pub message: String,
}

/// API response listing contacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListContactsResponse {
    pub contacts: Vec<Contact>,
}

/// API response listing countries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListCountriesResponse {
    pub countries: Vec<Country>,
}

/// API response listing first-level divisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListDivisionsResponse {
    /// The country filter, if one was applied.
    pub country: Option<String>,
    pub divisions: Vec<Division>,
}

/// Appointment counts by type and month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeMonthReport {
    pub time_zone: String,
    pub rows: Vec<TypeMonthCount>,
}

/// One line of a contact's schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactScheduleRow {
    pub appointment_id: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub appointment_type: String,
    pub description: String,
    pub start: String,
    pub end: String,
    pub customer_id: i64,
}

/// The schedule held with one contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactScheduleReport {
    pub contact_id: i64,
    pub contact_name: String,
    pub time_zone: String,
    pub rows: Vec<ContactScheduleRow>,
}

/// Customers located in one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryReport {
    /// The selected country, if any.
    pub country: Option<String>,
    /// Countries that have at least one customer.
    pub available_countries: Vec<String>,
    pub customers: Vec<CustomerInfo>,
}
