//! Repository ports for task, story, and reference-data persistence.
//!
//! `find_by_id` lookups are raw persistence primitives and return
//! soft-deleted rows (soft deletion must stay idempotent); the query
//! operations (`search`, `filter`, `find_by_user`, `find_active`) always
//! exclude tombstoned records.

use crate::directory::domain::UserId;
use crate::tracker::domain::{
    Page, PageRequest, Priority, PriorityId, Status, StatusId, Story, StoryId, Task, TaskId,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Result type for tracker repository operations.
pub type TrackerRepositoryResult<T> = Result<T, TrackerRepositoryError>;

/// Filter arguments for the task search query.
///
/// Every field is optional; an absent filter matches all rows for that
/// dimension. The struct serializes deterministically and doubles as the
/// cache-key payload for the search namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSearchFilter {
    /// Exact match on the assignee id.
    pub assigned_to: Option<UserId>,
    /// Case-insensitive substring match on the assignee's first name.
    pub first_name: Option<String>,
    /// Exact instant match on the expected end.
    pub expected_end: Option<DateTime<Utc>>,
    /// Case-insensitive match on the status name.
    pub status: Option<String>,
}

impl TaskSearchFilter {
    /// Creates an empty filter matching every live task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts results to one assignee.
    #[must_use]
    pub const fn with_assignee(mut self, user_id: UserId) -> Self {
        self.assigned_to = Some(user_id);
        self
    }

    /// Restricts results by assignee first-name substring.
    #[must_use]
    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    /// Restricts results to an exact expected-end instant.
    #[must_use]
    pub const fn with_expected_end(mut self, expected_end: DateTime<Utc>) -> Self {
        self.expected_end = Some(expected_end);
        self
    }

    /// Restricts results by status name.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// Filter arguments for the task filter query.
///
/// Name lists with no entries match all rows for that dimension. Also the
/// cache-key payload for the filter namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskQueryFilter {
    /// Exact match on the assignee id.
    pub assigned_to: Option<UserId>,
    /// Case-insensitive match against any of these status names.
    pub statuses: Vec<String>,
    /// Case-insensitive match against any of these priority names.
    pub priorities: Vec<String>,
}

impl TaskQueryFilter {
    /// Creates an empty filter matching every live task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts results to one assignee.
    #[must_use]
    pub const fn with_assignee(mut self, user_id: UserId) -> Self {
        self.assigned_to = Some(user_id);
        self
    }

    /// Restricts results to the given status names.
    #[must_use]
    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = String>) -> Self {
        self.statuses = statuses.into_iter().collect();
        self
    }

    /// Restricts results to the given priority names.
    #[must_use]
    pub fn with_priorities(mut self, priorities: impl IntoIterator<Item = String>) -> Self {
        self.priorities = priorities.into_iter().collect();
        self
    }
}

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerRepositoryError::DuplicateTask`] when the identifier
    /// already exists.
    async fn store(&self, task: &Task) -> TrackerRepositoryResult<()>;

    /// Persists changes to an existing task (status, tombstone, timestamps).
    ///
    /// # Errors
    ///
    /// Returns [`TrackerRepositoryError::TaskNotFound`] when the task does
    /// not exist.
    async fn update(&self, task: &Task) -> TrackerRepositoryResult<()>;

    /// Finds a task by identifier, including soft-deleted rows.
    async fn find_by_id(&self, id: TaskId) -> TrackerRepositoryResult<Option<Task>>;

    /// Runs the parameterized search query.
    ///
    /// Excludes soft-deleted tasks and tasks whose assignee is soft-deleted,
    /// for every filter combination.
    async fn search(
        &self,
        filter: &TaskSearchFilter,
        page: &PageRequest,
    ) -> TrackerRepositoryResult<Page<Task>>;

    /// Runs the parameterized filter query.
    ///
    /// Same exclusion rules as [`TaskRepository::search`].
    async fn filter(
        &self,
        filter: &TaskQueryFilter,
        page: &PageRequest,
    ) -> TrackerRepositoryResult<Page<Task>>;
}

/// Story persistence contract.
#[async_trait]
pub trait StoryRepository: Send + Sync {
    /// Stores a new story.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerRepositoryError::DuplicateStory`] when the
    /// identifier already exists.
    async fn store(&self, story: &Story) -> TrackerRepositoryResult<()>;

    /// Finds a story by identifier, including soft-deleted rows.
    async fn find_by_id(&self, id: StoryId) -> TrackerRepositoryResult<Option<Story>>;

    /// Returns the live stories assigned to `user_id`, paginated.
    async fn find_by_user(
        &self,
        user_id: UserId,
        page: &PageRequest,
    ) -> TrackerRepositoryResult<Page<Story>>;

    /// Returns all active stories: status name exactly `IN_PROGRESS`,
    /// priority name exactly `LOW`, not soft deleted.
    async fn find_active(&self) -> TrackerRepositoryResult<Vec<Story>>;
}

/// Read-only contract over the status and priority reference rows.
#[async_trait]
pub trait ReferenceDataRepository: Send + Sync {
    /// Finds a status row by identifier.
    async fn find_status(&self, id: StatusId) -> TrackerRepositoryResult<Option<Status>>;

    /// Finds a priority row by identifier.
    async fn find_priority(&self, id: PriorityId) -> TrackerRepositoryResult<Option<Priority>>;
}

/// Errors returned by tracker repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TrackerRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// A story with the same identifier already exists.
    #[error("duplicate story identifier: {0}")]
    DuplicateStory(StoryId),

    /// The task was not found.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The story was not found.
    #[error("story not found: {0}")]
    StoryNotFound(StoryId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TrackerRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
