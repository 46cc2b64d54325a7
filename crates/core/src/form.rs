// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Raw appointment input as entered by a user, in the user's own zone.
///
/// When creating, every text field is required. When updating, a blank field
/// keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentForm {
    pub title: String,
    pub description: String,
    pub location: String,
    pub appointment_type: String,
    pub contact_name: String,
    /// `yyyy-MM-dd`
    pub start_date: String,
    /// `HH:mm`, 24-hour
    pub start_time: String,
    /// `yyyy-MM-dd`
    pub end_date: String,
    /// `HH:mm`, 24-hour
    pub end_time: String,
    /// Required when creating. `None` or `0` means "not supplied".
    pub customer_id: Option<i64>,
    /// Defaults to the session user. `None` or `0` means "not supplied".
    pub user_id: Option<i64>,
}

/// Raw customer input. Blank fields keep stored values on update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerForm {
    pub customer_name: String,
    pub address: String,
    pub postal_code: String,
    pub phone: String,
    pub division_name: String,
}

/// Normalizes a numeric field where `0` stands for "not supplied".
#[must_use]
pub const fn supplied_id(value: Option<i64>) -> Option<i64> {
    match value {
        Some(0) | None => None,
        Some(id) => Some(id),
    }
}

/// Returns the trimmed input, or `stored` if the input is blank.
pub(crate) fn merged_text(supplied: &str, stored: &str) -> String {
    let supplied: &str = supplied.trim();
    if supplied.is_empty() {
        stored.to_string()
    } else {
        supplied.to_string()
    }
}
