// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Storage traits of the scheduling core, implemented over `SQLite`.

use client_schedule::{
    AppointmentRepository, ContactResolver, CustomerResolver, DivisionResolver, StoreError,
    UserResolver,
};
use client_schedule_domain::{Appointment, Division};

use crate::{Persistence, queries};

impl AppointmentRepository for Persistence {
    fn list_all(&mut self) -> Result<Vec<Appointment>, StoreError> {
        Ok(self.list_appointments()?)
    }

    fn find_by_id(&mut self, appointment_id: i64) -> Result<Option<Appointment>, StoreError> {
        Ok(self.get_appointment(appointment_id)?)
    }

    fn create(&mut self, appointment: &Appointment) -> Result<i64, StoreError> {
        Ok(self.insert_appointment(appointment)?)
    }

    fn update(&mut self, appointment: &Appointment) -> Result<(), StoreError> {
        Ok(self.update_appointment(appointment)?)
    }

    fn delete(&mut self, appointment_id: i64) -> Result<(), StoreError> {
        Ok(self.delete_appointment(appointment_id)?)
    }
}

impl ContactResolver for Persistence {
    fn id_for_name(&mut self, contact_name: &str) -> Result<Option<i64>, StoreError> {
        Ok(queries::reference::get_contact_id_by_name(
            &mut self.conn,
            contact_name,
        )?)
    }
}

impl CustomerResolver for Persistence {
    fn exists(&mut self, customer_id: i64) -> Result<bool, StoreError> {
        Ok(queries::customers::customer_exists(&mut self.conn, customer_id)?)
    }
}

impl UserResolver for Persistence {
    fn id_for_username(&mut self, user_name: &str) -> Result<Option<i64>, StoreError> {
        Ok(queries::users::get_user_by_name(&mut self.conn, user_name)?.map(|user| user.user_id))
    }

    fn exists(&mut self, user_id: i64) -> Result<bool, StoreError> {
        Ok(queries::users::get_user_name(&mut self.conn, user_id)?.is_some())
    }
}

impl DivisionResolver for Persistence {
    fn division_for_name(&mut self, division_name: &str) -> Result<Option<Division>, StoreError> {
        Ok(queries::reference::get_division_by_name(
            &mut self.conn,
            division_name,
        )?)
    }
}
