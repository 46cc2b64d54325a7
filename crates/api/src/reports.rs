// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV rendering of the reports.
//!
//! Every rendering starts with a header line, even when there are no rows.

use serde::Serialize;

use crate::error::ApiError;
use crate::request_response::{ContactScheduleReport, CountryReport, TypeMonthReport};

const TYPE_MONTH_HEADERS: [&str; 3] = ["appointment_type", "month", "count"];

const CONTACT_SCHEDULE_HEADERS: [&str; 7] = [
    "appointment_id",
    "title",
    "type",
    "description",
    "start",
    "end",
    "customer_id",
];

const COUNTRY_HEADERS: [&str; 12] = [
    "customer_id",
    "customer_name",
    "address",
    "postal_code",
    "phone",
    "division_id",
    "division",
    "country",
    "created_at",
    "created_by",
    "last_updated_at",
    "last_updated_by",
];

fn render<T: Serialize>(headers: &[&str], rows: &[T]) -> Result<String, ApiError> {
    let csv_error = |e: &dyn std::fmt::Display| ApiError::Internal {
        message: format!("Failed to render CSV: {e}"),
    };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(headers).map_err(|e| csv_error(&e))?;
    for row in rows {
        writer.serialize(row).map_err(|e| csv_error(&e))?;
    }

    let bytes: Vec<u8> = writer.into_inner().map_err(|e| csv_error(&e))?;
    String::from_utf8(bytes).map_err(|e| csv_error(&e))
}

/// Renders the type/month counts.
///
/// # Errors
///
/// Returns [`ApiError::Internal`] if rendering fails.
pub fn type_month_csv(report: &TypeMonthReport) -> Result<String, ApiError> {
    render(&TYPE_MONTH_HEADERS, &report.rows)
}

/// Renders a contact's schedule.
///
/// # Errors
///
/// Returns [`ApiError::Internal`] if rendering fails.
pub fn contact_schedule_csv(report: &ContactScheduleReport) -> Result<String, ApiError> {
    render(&CONTACT_SCHEDULE_HEADERS, &report.rows)
}

/// Renders the customers of one country.
///
/// # Errors
///
/// Returns [`ApiError::Internal`] if rendering fails.
pub fn country_csv(report: &CountryReport) -> Result<String, ApiError> {
    render(&COUNTRY_HEADERS, &report.customers)
}
