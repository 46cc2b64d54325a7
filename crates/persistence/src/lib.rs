// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the client schedule.
//!
//! This crate stores customers, appointments, users and login sessions in
//! `SQLite` through Diesel, and seeds the reference tables (countries,
//! first-level divisions, contacts) by migration.
//!
//! ## Storage Conventions
//!
//! - Every timestamp is stored as UTC text in `YYYY-MM-DD HH:MM:SS` form
//! - Customer and appointment ids are assigned by the application as the
//!   smallest unused positive id
//! - Foreign keys are enforced; the adapter refuses to start without them
//!
//! ## Testing
//!
//! [`Persistence::new_in_memory`] gives each caller its own shared-cache
//! in-memory database, so tests never see each other's rows.
//!
//! The adapter also implements the storage traits of the `client_schedule`
//! crate, so the scheduling workflows run directly against it.

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

use chrono::NaiveDateTime;
use client_schedule_domain::{Appointment, Contact, Country, Customer, Division};
use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod store;

#[cfg(test)]
mod tests;

pub use data_models::{
    CustomerRecord, SessionData, TIMESTAMP_FORMAT, UserData, format_timestamp, parse_timestamp,
};
pub use error::PersistenceError;

/// Type alias for the only supported backend.
pub type SqlitePersistence = Persistence;

/// Persistence adapter over a single `SQLite` connection.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// The file is created if missing. WAL journaling is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    /// Lists the application tables, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_tables(&mut self) -> Result<Vec<String>, PersistenceError> {
        backend::sqlite::list_tables(&mut self.conn)
    }

    /// Lists the columns of `table` in declaration order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_columns(&mut self, table: &str) -> Result<Vec<String>, PersistenceError> {
        backend::sqlite::list_columns(&mut self.conn, table)
    }

    // ========================================================================
    // Appointments
    // ========================================================================

    /// Lists every appointment (UTC), ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_appointments(&mut self) -> Result<Vec<Appointment>, PersistenceError> {
        queries::appointments::list_appointments(&mut self.conn)
    }

    /// Retrieves an appointment by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_appointment(
        &mut self,
        appointment_id: i64,
    ) -> Result<Option<Appointment>, PersistenceError> {
        queries::appointments::get_appointment(&mut self.conn, appointment_id)
    }

    /// Inserts an appointment and returns its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_appointment(&mut self, appointment: &Appointment) -> Result<i64, PersistenceError> {
        mutations::appointments::insert_appointment(&mut self.conn, appointment)
    }

    /// Overwrites a stored appointment.
    ///
    /// # Errors
    ///
    /// Returns an error if no appointment has the id or the update fails.
    pub fn update_appointment(&mut self, appointment: &Appointment) -> Result<(), PersistenceError> {
        mutations::appointments::update_appointment(&mut self.conn, appointment)
    }

    /// Deletes an appointment.
    ///
    /// # Errors
    ///
    /// Returns an error if no appointment has the id or the delete fails.
    pub fn delete_appointment(&mut self, appointment_id: i64) -> Result<(), PersistenceError> {
        mutations::appointments::delete_appointment(&mut self.conn, appointment_id)
    }

    // ========================================================================
    // Customers
    // ========================================================================

    /// Lists every customer with audit columns, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_customers(&mut self) -> Result<Vec<CustomerRecord>, PersistenceError> {
        queries::customers::list_customers(&mut self.conn)
    }

    /// Retrieves a customer by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_customer(
        &mut self,
        customer_id: i64,
    ) -> Result<Option<CustomerRecord>, PersistenceError> {
        queries::customers::get_customer(&mut self.conn, customer_id)
    }

    /// Lists the customers of one country.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_customers_by_country(
        &mut self,
        country_name: &str,
    ) -> Result<Vec<CustomerRecord>, PersistenceError> {
        queries::customers::list_customers_by_country(&mut self.conn, country_name)
    }

    /// Lists the countries with at least one customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_countries_with_customers(&mut self) -> Result<Vec<Country>, PersistenceError> {
        queries::customers::list_countries_with_customers(&mut self.conn)
    }

    /// Inserts a customer on behalf of `actor` and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_customer(
        &mut self,
        customer: &Customer,
        actor: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::customers::insert_customer(&mut self.conn, customer, actor)
    }

    /// Overwrites a stored customer on behalf of `actor`.
    ///
    /// # Errors
    ///
    /// Returns an error if no customer has the id or the update fails.
    pub fn update_customer(&mut self, customer: &Customer, actor: &str) -> Result<(), PersistenceError> {
        mutations::customers::update_customer(&mut self.conn, customer, actor)
    }

    /// Deletes a customer and its appointments. Returns the number of
    /// appointments removed.
    ///
    /// # Errors
    ///
    /// Returns an error if no customer has the id or the delete fails.
    pub fn delete_customer(&mut self, customer_id: i64) -> Result<usize, PersistenceError> {
        mutations::customers::delete_customer(&mut self.conn, customer_id)
    }

    // ========================================================================
    // Reference data
    // ========================================================================

    /// Lists every contact.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_contacts(&mut self) -> Result<Vec<Contact>, PersistenceError> {
        queries::reference::list_contacts(&mut self.conn)
    }

    /// Lists every country.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_countries(&mut self) -> Result<Vec<Country>, PersistenceError> {
        queries::reference::list_countries(&mut self.conn)
    }

    /// Lists divisions, optionally limited to one country.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_divisions(
        &mut self,
        country_name: Option<&str>,
    ) -> Result<Vec<Division>, PersistenceError> {
        queries::reference::list_divisions(&mut self.conn, country_name)
    }

    // ========================================================================
    // Users & Sessions
    // ========================================================================

    /// Creates a user with a bcrypt-hashed password.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is taken or the insert fails.
    pub fn create_user(&mut self, user_name: &str, password: &str) -> Result<i64, PersistenceError> {
        mutations::users::create_user(&mut self.conn, user_name, password)
    }

    /// Retrieves a user by login name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_user_by_name(&mut self, user_name: &str) -> Result<Option<UserData>, PersistenceError> {
        queries::users::get_user_by_name(&mut self.conn, user_name)
    }

    /// Retrieves a user's login name by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_user_name(&mut self, user_id: i64) -> Result<Option<String>, PersistenceError> {
        queries::users::get_user_name(&mut self.conn, user_id)
    }

    /// Verifies a password against a stored hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the hash is malformed.
    pub fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, PersistenceError> {
        queries::users::verify_password(password, password_hash)
    }

    /// Creates a login session.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_session(
        &mut self,
        session_token: &str,
        user_id: i64,
        time_zone: &str,
        expires_at: NaiveDateTime,
    ) -> Result<i64, PersistenceError> {
        mutations::users::create_session(&mut self.conn, session_token, user_id, time_zone, expires_at)
    }

    /// Retrieves a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        queries::users::get_session_by_token(&mut self.conn, session_token)
    }

    /// Records activity on a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_session_activity(&mut self, session_id: i64) -> Result<(), PersistenceError> {
        mutations::users::update_session_activity(&mut self.conn, session_id)
    }

    /// Deletes a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if no session has the token or the delete fails.
    pub fn delete_session(&mut self, session_token: &str) -> Result<(), PersistenceError> {
        mutations::users::delete_session(&mut self.conn, session_token)
    }

    /// Deletes sessions that expired before `now` (UTC).
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_expired_sessions(&mut self, now: NaiveDateTime) -> Result<usize, PersistenceError> {
        mutations::users::delete_expired_sessions(&mut self.conn, now)
    }
}
