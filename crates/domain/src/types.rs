// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::time_conversion::from_utc;
use chrono::NaiveDateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// A scheduled meeting between a user, a customer and a contact.
///
/// Outside of an edit buffer, `start` and `end` are UTC wall-clock values.
/// Use [`Appointment::in_zone`] to obtain a display copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    /// The persisted identifier.
    /// `None` indicates the appointment has not been persisted yet.
    pub appointment_id: Option<i64>,
    pub title: String,
    pub description: String,
    pub location: String,
    pub appointment_type: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub customer_id: i64,
    pub user_id: i64,
    pub contact_id: i64,
    /// Display name of the contact, resolved from `contact_id`.
    pub contact_name: String,
}

impl Appointment {
    /// Returns a copy carrying the given persisted identifier.
    #[must_use]
    pub fn with_id(mut self, appointment_id: i64) -> Self {
        self.appointment_id = Some(appointment_id);
        self
    }

    /// Returns a copy whose times are rendered in `zone`.
    ///
    /// `self` must hold UTC times.
    #[must_use]
    pub fn in_zone(&self, zone: Tz) -> Self {
        Self {
            start: from_utc(self.start, zone),
            end: from_utc(self.end, zone),
            ..self.clone()
        }
    }
}

/// A customer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// `None` until persisted.
    pub customer_id: Option<i64>,
    pub customer_name: String,
    pub address: String,
    pub postal_code: String,
    pub phone: String,
    pub division_id: i64,
    pub division_name: String,
    pub country_name: String,
}

/// A contact that appointments are held with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Contact {
    pub contact_id: i64,
    pub contact_name: String,
    pub email: String,
}

/// A country customers can reside in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Country {
    pub country_id: i64,
    pub country_name: String,
}

/// A first-level division (state, province, region) of a country.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Division {
    pub division_id: i64,
    pub division_name: String,
    pub country_id: i64,
}

/// An application user who owns appointments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: i64,
    pub user_name: String,
}
