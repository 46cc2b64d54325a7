// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::Rejection;
use crate::form::{CustomerForm, merged_text};
use crate::ports::DivisionResolver;
use client_schedule_domain::{Customer, Division, require_text, validate_customer_fields};

/// Validates input for a new customer and resolves its division.
///
/// The returned customer has no id; `country_name` is left for the store to
/// fill in.
///
/// # Errors
///
/// Returns [`Rejection::MissingFields`] for a blank field or
/// [`Rejection::UnknownDivision`] if the division name does not resolve.
pub fn prepare_new_customer<R>(resolver: &mut R, form: &CustomerForm) -> Result<Customer, Rejection>
where
    R: DivisionResolver + ?Sized,
{
    require_text("customer_name", &form.customer_name)?;
    require_text("address", &form.address)?;
    require_text("postal_code", &form.postal_code)?;
    require_text("phone", &form.phone)?;
    require_text("division", &form.division_name)?;

    let division: Division = resolve_division(resolver, form.division_name.trim())?;
    let customer: Customer = Customer {
        customer_id: None,
        customer_name: form.customer_name.trim().to_string(),
        address: form.address.trim().to_string(),
        postal_code: form.postal_code.trim().to_string(),
        phone: form.phone.trim().to_string(),
        division_id: division.division_id,
        division_name: division.division_name,
        country_name: String::new(),
    };
    validate_customer_fields(&customer)?;
    Ok(customer)
}

/// Merges changes into a stored customer. Blank fields keep stored values.
///
/// # Errors
///
/// Returns [`Rejection::UnknownDivision`] if a supplied division name does
/// not resolve.
pub fn prepare_customer_update<R>(
    resolver: &mut R,
    stored: &Customer,
    changes: &CustomerForm,
) -> Result<Customer, Rejection>
where
    R: DivisionResolver + ?Sized,
{
    let mut customer: Customer = Customer {
        customer_name: merged_text(&changes.customer_name, &stored.customer_name),
        address: merged_text(&changes.address, &stored.address),
        postal_code: merged_text(&changes.postal_code, &stored.postal_code),
        phone: merged_text(&changes.phone, &stored.phone),
        ..stored.clone()
    };

    let division_name: &str = changes.division_name.trim();
    if !division_name.is_empty() && division_name != stored.division_name {
        let division: Division = resolve_division(resolver, division_name)?;
        customer.division_id = division.division_id;
        customer.division_name = division.division_name;
        customer.country_name = String::new();
    }

    validate_customer_fields(&customer)?;
    Ok(customer)
}

fn resolve_division<R>(resolver: &mut R, division_name: &str) -> Result<Division, Rejection>
where
    R: DivisionResolver + ?Sized,
{
    resolver
        .division_for_name(division_name)?
        .ok_or_else(|| Rejection::UnknownDivision {
            division_name: division_name.to_string(),
        })
}
