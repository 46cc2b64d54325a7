// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::NaiveDateTime;
use chrono_tz::Tz;
use client_schedule_domain::from_utc;

/// The authenticated user and the zone their times are entered and shown in.
///
/// Passed explicitly into every workflow; there is no process-wide current
/// user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user_id: i64,
    user_name: String,
    zone: Tz,
}

impl Session {
    /// Creates a new session context.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The authenticated user's id
    /// * `user_name` - The authenticated user's login name
    /// * `zone` - The user's display zone
    #[must_use]
    pub fn new(user_id: i64, user_name: &str, zone: Tz) -> Self {
        Self {
            user_id,
            user_name: user_name.to_string(),
            zone,
        }
    }

    #[must_use]
    pub const fn user_id(&self) -> i64 {
        self.user_id
    }

    #[must_use]
    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    #[must_use]
    pub const fn zone(&self) -> Tz {
        self.zone
    }

    /// Renders a UTC instant as wall-clock time in the session's zone.
    #[must_use]
    pub fn local_time(&self, utc: NaiveDateTime) -> NaiveDateTime {
        from_utc(utc, self.zone)
    }
}
