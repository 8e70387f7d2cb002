//! In-memory reference-data repository.
//!
//! Holds the seeded status and priority rows. Mutation is inherent-only:
//! the port exposes reads, seeding happens at wiring time.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::tracker::{
    domain::{Priority, PriorityId, Status, StatusId},
    ports::{ReferenceDataRepository, TrackerRepositoryError, TrackerRepositoryResult},
};

/// Thread-safe in-memory status/priority store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReferenceDataRepository {
    state: Arc<RwLock<ReferenceState>>,
}

#[derive(Debug, Default)]
struct ReferenceState {
    statuses: HashMap<StatusId, Status>,
    priorities: HashMap<PriorityId, Priority>,
}

impl InMemoryReferenceDataRepository {
    /// Creates an empty reference-data store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a status row, replacing any row with the same identifier.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the store lock is poisoned.
    pub fn insert_status(&self, status: Status) -> TrackerRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TrackerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.statuses.insert(status.id(), status);
        Ok(())
    }

    /// Seeds a priority row, replacing any row with the same identifier.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the store lock is poisoned.
    pub fn insert_priority(&self, priority: Priority) -> TrackerRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TrackerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.priorities.insert(priority.id(), priority);
        Ok(())
    }
}

#[async_trait]
impl ReferenceDataRepository for InMemoryReferenceDataRepository {
    async fn find_status(&self, id: StatusId) -> TrackerRepositoryResult<Option<Status>> {
        let state = self.state.read().map_err(|err| {
            TrackerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.statuses.get(&id).cloned())
    }

    async fn find_priority(&self, id: PriorityId) -> TrackerRepositoryResult<Option<Priority>> {
        let state = self.state.read().map_err(|err| {
            TrackerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.priorities.get(&id).cloned())
    }
}
