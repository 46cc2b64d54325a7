// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutation modules for persistence layer.
//!
//! ## Module Organization
//!
//! - `appointments`: Appointment insert, update and delete
//! - `customers`: Customer insert, update and cascading delete
//! - `users`: User creation and login session lifecycle

pub mod appointments;
pub mod customers;
pub mod users;
