// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    AppointmentForm, AppointmentRepository, ContactResolver, CustomerResolver, DivisionResolver,
    Session, StoreError, UserResolver,
};
use chrono::NaiveDateTime;
use client_schedule_domain::{Appointment, Division, first_unused_id};

/// An in-memory store holding UTC appointments and fixed reference data.
pub struct InMemoryStore {
    pub appointments: Vec<Appointment>,
    pub contacts: Vec<(i64, String)>,
    pub customers: Vec<i64>,
    pub users: Vec<(i64, String)>,
    pub divisions: Vec<Division>,
    pub fail_writes: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            appointments: Vec::new(),
            contacts: vec![
                (1, String::from("Anika Costa")),
                (2, String::from("Daniel Garcia")),
                (3, String::from("Li Lee")),
            ],
            customers: vec![1, 2, 3],
            users: vec![(1, String::from("test")), (2, String::from("admin"))],
            divisions: vec![
                Division {
                    division_id: 29,
                    division_name: String::from("Colorado"),
                    country_id: 1,
                },
                Division {
                    division_id: 61,
                    division_name: String::from("Alberta"),
                    country_id: 3,
                },
            ],
            fail_writes: false,
        }
    }

    pub fn with_appointments(appointments: Vec<Appointment>) -> Self {
        let mut store: Self = Self::new();
        store.appointments = appointments;
        store
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::new("disk full"));
        }
        Ok(())
    }
}

impl AppointmentRepository for InMemoryStore {
    fn list_all(&mut self) -> Result<Vec<Appointment>, StoreError> {
        Ok(self.appointments.clone())
    }

    fn find_by_id(&mut self, appointment_id: i64) -> Result<Option<Appointment>, StoreError> {
        Ok(self
            .appointments
            .iter()
            .find(|a| a.appointment_id == Some(appointment_id))
            .cloned())
    }

    fn create(&mut self, appointment: &Appointment) -> Result<i64, StoreError> {
        self.check_writable()?;
        let ids: Vec<i64> = self
            .appointments
            .iter()
            .filter_map(|a| a.appointment_id)
            .collect();
        let appointment_id: i64 = first_unused_id(&ids);
        self.appointments
            .push(appointment.clone().with_id(appointment_id));
        Ok(appointment_id)
    }

    fn update(&mut self, appointment: &Appointment) -> Result<(), StoreError> {
        self.check_writable()?;
        let slot: &mut Appointment = self
            .appointments
            .iter_mut()
            .find(|a| a.appointment_id == appointment.appointment_id)
            .ok_or_else(|| StoreError::new("no such appointment"))?;
        *slot = appointment.clone();
        Ok(())
    }

    fn delete(&mut self, appointment_id: i64) -> Result<(), StoreError> {
        self.check_writable()?;
        self.appointments
            .retain(|a| a.appointment_id != Some(appointment_id));
        Ok(())
    }
}

impl ContactResolver for InMemoryStore {
    fn id_for_name(&mut self, contact_name: &str) -> Result<Option<i64>, StoreError> {
        Ok(self
            .contacts
            .iter()
            .find(|(_, name)| name == contact_name)
            .map(|(id, _)| *id))
    }
}

impl CustomerResolver for InMemoryStore {
    fn exists(&mut self, customer_id: i64) -> Result<bool, StoreError> {
        Ok(self.customers.contains(&customer_id))
    }
}

impl UserResolver for InMemoryStore {
    fn id_for_username(&mut self, user_name: &str) -> Result<Option<i64>, StoreError> {
        Ok(self
            .users
            .iter()
            .find(|(_, name)| name == user_name)
            .map(|(id, _)| *id))
    }

    fn exists(&mut self, user_id: i64) -> Result<bool, StoreError> {
        Ok(self.users.iter().any(|(id, _)| *id == user_id))
    }
}

impl DivisionResolver for InMemoryStore {
    fn division_for_name(&mut self, division_name: &str) -> Result<Option<Division>, StoreError> {
        Ok(self
            .divisions
            .iter()
            .find(|d| d.division_name == division_name)
            .cloned())
    }
}

pub fn dt(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M").unwrap()
}

pub fn eastern_session() -> Session {
    Session::new(1, "test", chrono_tz::America::New_York)
}

/// A stored appointment with UTC times.
pub fn stored_appointment(id: i64, start_utc: &str, end_utc: &str) -> Appointment {
    Appointment {
        appointment_id: Some(id),
        title: String::from("Quarterly review"),
        description: String::from("Review account status"),
        location: String::from("Phoenix"),
        appointment_type: String::from("Planning Session"),
        start: dt(start_utc),
        end: dt(end_utc),
        customer_id: 1,
        user_id: 1,
        contact_id: 1,
        contact_name: String::from("Anika Costa"),
    }
}

/// A complete form for the given local date and times.
pub fn create_test_form(date: &str, start_time: &str, end_time: &str) -> AppointmentForm {
    AppointmentForm {
        title: String::from("Kickoff"),
        description: String::from("Project kickoff"),
        location: String::from("White Plains"),
        appointment_type: String::from("Planning Session"),
        contact_name: String::from("Anika Costa"),
        start_date: date.to_string(),
        start_time: start_time.to_string(),
        end_date: date.to_string(),
        end_time: end_time.to_string(),
        customer_id: Some(1),
        user_id: None,
    }
}

/// A store holding one appointment on 2024-03-10, 09:00-10:00 Eastern.
pub fn store_with_morning_meeting() -> InMemoryStore {
    InMemoryStore::with_appointments(vec![stored_appointment(
        1,
        "2024-03-10 13:00",
        "2024-03-10 14:00",
    )])
}
