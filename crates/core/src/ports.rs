// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Collaborator traits the workflows depend on.
//!
//! Implementations are expected to talk to durable storage, so every method
//! takes `&mut self` and reports failure as a [`StoreError`].

use client_schedule_domain::{Appointment, Division};

/// A failure reported by a storage collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct StoreError {
    message: String,
}

impl StoreError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Supplies and persists appointments. All times are UTC.
pub trait AppointmentRepository {
    /// Returns every stored appointment.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list_all(&mut self) -> Result<Vec<Appointment>, StoreError>;

    /// Returns the appointment with the given id, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn find_by_id(&mut self, appointment_id: i64) -> Result<Option<Appointment>, StoreError>;

    /// Persists a new appointment and returns its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the write is rejected.
    fn create(&mut self, appointment: &Appointment) -> Result<i64, StoreError>;

    /// Overwrites the stored appointment carrying the same id.
    ///
    /// # Errors
    ///
    /// Returns an error if the write is rejected.
    fn update(&mut self, appointment: &Appointment) -> Result<(), StoreError>;

    /// Deletes the appointment with the given id.
    ///
    /// # Errors
    ///
    /// Returns an error if the write is rejected.
    fn delete(&mut self, appointment_id: i64) -> Result<(), StoreError>;
}

/// Maps contact names to ids.
pub trait ContactResolver {
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn id_for_name(&mut self, contact_name: &str) -> Result<Option<i64>, StoreError>;
}

/// Checks customer existence.
pub trait CustomerResolver {
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn exists(&mut self, customer_id: i64) -> Result<bool, StoreError>;
}

/// Maps user names to ids and checks user existence.
pub trait UserResolver {
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn id_for_username(&mut self, user_name: &str) -> Result<Option<i64>, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn exists(&mut self, user_id: i64) -> Result<bool, StoreError>;
}

/// Resolves first-level division names for customer records.
pub trait DivisionResolver {
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn division_for_name(&mut self, division_name: &str) -> Result<Option<Division>, StoreError>;
}

/// Receives rejection reasons and confirmations meant for the user.
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

/// Everything the appointment workflows read from or write to.
pub trait SchedulingStore:
    AppointmentRepository + ContactResolver + CustomerResolver + UserResolver
{
}

impl<T> SchedulingStore for T where
    T: AppointmentRepository + ContactResolver + CustomerResolver + UserResolver + ?Sized
{
}

/// A [`Notifier`] that keeps every message, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectingNotifier {
    messages: Vec<String>,
}

impl CollectingNotifier {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    #[must_use]
    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}
