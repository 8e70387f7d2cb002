//! Expected start/end scheduling window and the IN_PROGRESS invariant.

use super::{Status, TrackerDomainError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Optional expected start/end window carried by tasks and stories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    expected_start: Option<DateTime<Utc>>,
    expected_end: Option<DateTime<Utc>>,
}

impl Schedule {
    /// Creates a schedule from optional start and end instants.
    #[must_use]
    pub const fn new(
        expected_start: Option<DateTime<Utc>>,
        expected_end: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            expected_start,
            expected_end,
        }
    }

    /// Returns the expected start instant, if set.
    #[must_use]
    pub const fn expected_start(&self) -> Option<DateTime<Utc>> {
        self.expected_start
    }

    /// Returns the expected end instant, if set.
    #[must_use]
    pub const fn expected_end(&self) -> Option<DateTime<Utc>> {
        self.expected_end
    }

    /// Returns whether both the start and end instants are set.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.expected_start.is_some() && self.expected_end.is_some()
    }

    /// Validates this schedule for a record being created with `status`.
    ///
    /// Statuses other than `IN_PROGRESS` (case-insensitive) accept any
    /// schedule, including an empty one. Pure check; no observable effect on
    /// success.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::ScheduleRequired`] when `status` is
    /// `IN_PROGRESS` and either instant is missing.
    pub fn ensure_complete_for(&self, status: &Status) -> Result<(), TrackerDomainError> {
        if status.is_in_progress() && !self.is_complete() {
            return Err(TrackerDomainError::ScheduleRequired);
        }
        Ok(())
    }
}
