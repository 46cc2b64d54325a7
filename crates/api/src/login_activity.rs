// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Append-only record of login attempts.
//!
//! Each attempt becomes one line:
//!
//! ```text
//! 2026-03-14 09:26:53 - User: test, Status: Success
//! ```
//!
//! Timestamps are UTC.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use tracing::warn;

const ENTRY_TIMESTAMP: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Outcome of a login attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Success,
    Failed,
}

impl LoginOutcome {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Failed => "Failed",
        }
    }
}

/// Formats one activity line, without the trailing newline.
#[must_use]
pub fn format_entry(at: OffsetDateTime, user_name: &str, outcome: LoginOutcome) -> String {
    let timestamp: String = at.format(ENTRY_TIMESTAMP).unwrap_or_default();
    format!(
        "{timestamp} - User: {user_name}, Status: {}",
        outcome.as_str()
    )
}

/// The login activity file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginActivityLog {
    path: PathBuf,
}

impl LoginActivityLog {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one attempt, creating the file if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or written.
    pub fn append(&self, user_name: &str, outcome: LoginOutcome) -> std::io::Result<()> {
        let line: String = format_entry(OffsetDateTime::now_utc(), user_name, outcome);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")
    }

    /// Appends one attempt. Write failures are logged, never returned.
    pub fn record(&self, user_name: &str, outcome: LoginOutcome) {
        if let Err(err) = self.append(user_name, outcome) {
            warn!(
                path = %self.path.display(),
                error = %err,
                "Failed to record login activity"
            );
        }
    }
}
