//! The operator-facing history of mutating operations.
//!
//! Distinct from the `log` facade the core emits through: this is an
//! in-memory, append-only list the shell keeps for its own "show audit log"
//! menu entry, independent of `RUST_LOG` verbosity.

use chrono::{DateTime, Local};

const DISPLAY_LIMIT: usize = 20;

/// Append-only record of shell-driven operations, newest entry last.
#[derive(Debug, Default)]
pub struct AuditLog {
    entries: Vec<(DateTime<Local>, String)>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `description` with the current local time.
    pub fn record(&mut self, description: impl Into<String>) {
        self.entries.push((Local::now(), description.into()));
    }

    /// The most recent entries, newest first, capped at 20.
    pub fn recent(&self) -> impl Iterator<Item = &(DateTime<Local>, String)> {
        self.entries.iter().rev().take(DISPLAY_LIMIT)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
