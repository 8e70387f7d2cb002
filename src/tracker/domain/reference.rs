//! Status and priority reference rows.
//!
//! Reference data is immutable from the tracker's perspective: rows are
//! seeded into the store and only ever read here. Status names are compared
//! case-insensitively when enforcing the IN_PROGRESS scheduling invariant;
//! the active-story predicate matches names exactly.

use super::{PriorityId, StatusId, TrackerDomainError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status name that triggers the mandatory-schedule invariant.
pub const IN_PROGRESS: &str = "IN_PROGRESS";

/// Priority name used by the active-story predicate.
pub const LOW: &str = "LOW";

/// Validated, trimmed reference-data name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceName(String);

impl ReferenceName {
    /// Creates a validated reference name.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::EmptyReferenceName`] when the value is
    /// empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, TrackerDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TrackerDomainError::EmptyReferenceName);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ReferenceName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ReferenceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Status reference row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    id: StatusId,
    name: ReferenceName,
    description: Option<String>,
}

impl Status {
    /// Creates a status row.
    #[must_use]
    pub const fn new(id: StatusId, name: ReferenceName, description: Option<String>) -> Self {
        Self {
            id,
            name,
            description,
        }
    }

    /// Returns the status identifier.
    #[must_use]
    pub const fn id(&self) -> StatusId {
        self.id
    }

    /// Returns the unique status name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the status description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns whether this status is `IN_PROGRESS`, case-insensitively.
    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        self.name.as_str().eq_ignore_ascii_case(IN_PROGRESS)
    }
}

/// Priority reference row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Priority {
    id: PriorityId,
    name: ReferenceName,
    description: Option<String>,
}

impl Priority {
    /// Creates a priority row.
    #[must_use]
    pub const fn new(id: PriorityId, name: ReferenceName, description: Option<String>) -> Self {
        Self {
            id,
            name,
            description,
        }
    }

    /// Returns the priority identifier.
    #[must_use]
    pub const fn id(&self) -> PriorityId {
        self.id
    }

    /// Returns the unique priority name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the priority description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
