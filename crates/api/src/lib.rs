// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the client schedule.
//!
//! Translates request DTOs into scheduling workflows, runs them against the
//! persistence adapter and translates outcomes into response DTOs and
//! [`ApiError`]s. Transport concerns live in the server crate.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod handlers;
mod login_activity;
mod reports;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedSession, AuthenticationService, DEFAULT_TIME_ZONE};
pub use error::{
    ApiError, AuthError, translate_domain_error, translate_persistence_error, translate_rejection,
};
pub use handlers::{
    cancel_appointment, contact_schedule_report, country_report, create_appointment,
    create_customer, delete_customer, list_appointments, list_contacts, list_countries,
    list_customers, list_divisions, login, logout, type_month_report, update_appointment,
    update_customer, upcoming_alert, whoami,
};
pub use login_activity::{LoginActivityLog, LoginOutcome, format_entry};
pub use reports::{contact_schedule_csv, country_csv, type_month_csv};
pub use request_response::{
    AppointmentInfo, AppointmentRequest, AppointmentResponse, CancelAppointmentResponse,
    ContactScheduleReport, ContactScheduleRow, CountryReport, CustomerInfo, CustomerRequest,
    CustomerResponse, DISPLAY_FORMAT, DeleteCustomerResponse, ListAppointmentsResponse,
    ListContactsResponse, ListCountriesResponse, ListCustomersResponse, ListDivisionsResponse,
    LoginRequest, LoginResponse, TypeMonthReport, WhoAmIResponse,
};
