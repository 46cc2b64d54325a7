// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query modules for persistence layer.
//!
//! This module contains all read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `appointments`: Appointment listing and lookup
//! - `customers`: Customer listing, lookup and country reports
//! - `reference`: Contacts, countries and first-level divisions
//! - `users`: Users and login sessions

pub mod appointments;
pub mod customers;
pub mod reference;
pub mod users;
