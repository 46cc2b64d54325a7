// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod calendar;
mod customers;
mod error;
mod form;
mod pipeline;
mod ports;
mod scheduling;
mod session;

#[cfg(test)]
mod tests;

pub use calendar::{CalendarView, list_appointments};
pub use customers::{prepare_customer_update, prepare_new_customer};
pub use error::Rejection;
pub use form::{AppointmentForm, CustomerForm, supplied_id};
pub use pipeline::{validate_appointment_update, validate_new_appointment};
pub use ports::{
    AppointmentRepository, CollectingNotifier, ContactResolver, CustomerResolver,
    DivisionResolver, Notifier, SchedulingStore, StoreError, UserResolver,
};
pub use scheduling::{
    cancel_appointment, reschedule_appointment, schedule_appointment, upcoming_appointments,
};
pub use session::Session;
