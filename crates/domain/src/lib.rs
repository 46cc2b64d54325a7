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

mod business_hours;
mod error;
mod id_allocation;
mod overlap;
mod reports;
mod time_conversion;
mod types;
mod validation;
mod views;

#[cfg(test)]
mod tests;

pub use business_hours::{BUSINESS_CLOSES_SECONDS, BUSINESS_OPENS_SECONDS, is_within_business_hours};
pub use error::DomainError;
pub use id_allocation::first_unused_id;
pub use overlap::{find_conflict, has_conflict};
pub use reports::{
    TypeMonthCount, UPCOMING_WINDOW_MINUTES, contact_schedule, count_by_type_and_month,
    upcoming_for_user,
};
pub use time_conversion::{BUSINESS_TIME_ZONE, from_utc, parse_zone, to_utc};
pub use types::{Appointment, Contact, Country, Customer, Division, User};
pub use validation::{
    parse_date, parse_time_of_day, require_text, validate_customer_fields, validate_interval,
};
pub use views::{current_month, current_week};
