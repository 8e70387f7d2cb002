//! Task aggregate root.

use super::{
    EstimatedHours, Priority, Schedule, Status, StoryId, TaskId, TrackerDomainError,
};
use crate::directory::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Input fields for creating a new task.
///
/// References are already resolved: the service layer exchanges raw ids for
/// live [`Status`]/[`Priority`] rows and a verified assignee before the
/// aggregate is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Task title.
    pub title: String,
    /// Validated effort estimate.
    pub estimated_hours: EstimatedHours,
    /// Assignee. Tasks always carry one.
    pub assigned_to: UserId,
    /// Owning story, if the task belongs to one.
    pub story_id: Option<StoryId>,
    /// Resolved status row.
    pub status: Status,
    /// Resolved priority row.
    pub priority: Priority,
    /// Expected start/end window.
    pub schedule: Schedule,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted effort estimate.
    pub estimated_hours: EstimatedHours,
    /// Persisted assignee reference.
    pub assigned_to: UserId,
    /// Persisted owning-story reference, if any.
    pub story_id: Option<StoryId>,
    /// Persisted status row.
    pub status: Status,
    /// Persisted priority row.
    pub priority: Priority,
    /// Persisted schedule window.
    pub schedule: Schedule,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last-mutation timestamp, if the task was ever mutated.
    pub updated_at: Option<DateTime<Utc>>,
    /// Persisted tombstone flag.
    pub is_deleted: bool,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    estimated_hours: EstimatedHours,
    assigned_to: UserId,
    story_id: Option<StoryId>,
    status: Status,
    priority: Priority,
    schedule: Schedule,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    is_deleted: bool,
}

impl Task {
    /// Creates a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::EmptyTitle`] when the title is blank,
    /// or [`TrackerDomainError::ScheduleRequired`] when the status is
    /// `IN_PROGRESS` and the schedule is incomplete.
    pub fn new(data: NewTask, clock: &impl Clock) -> Result<Self, TrackerDomainError> {
        let title = data.title.trim().to_owned();
        if title.is_empty() {
            return Err(TrackerDomainError::EmptyTitle);
        }
        data.schedule.ensure_complete_for(&data.status)?;

        Ok(Self {
            id: TaskId::new(),
            title,
            estimated_hours: data.estimated_hours,
            assigned_to: data.assigned_to,
            story_id: data.story_id,
            status: data.status,
            priority: data.priority,
            schedule: data.schedule,
            created_at: clock.utc(),
            updated_at: None,
            is_deleted: false,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            estimated_hours: data.estimated_hours,
            assigned_to: data.assigned_to,
            story_id: data.story_id,
            status: data.status,
            priority: data.priority,
            schedule: data.schedule,
            created_at: data.created_at,
            updated_at: data.updated_at,
            is_deleted: data.is_deleted,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the effort estimate.
    #[must_use]
    pub const fn estimated_hours(&self) -> EstimatedHours {
        self.estimated_hours
    }

    /// Returns the assignee.
    #[must_use]
    pub const fn assigned_to(&self) -> UserId {
        self.assigned_to
    }

    /// Returns the owning story, if any.
    #[must_use]
    pub const fn story_id(&self) -> Option<StoryId> {
        self.story_id
    }

    /// Returns the current status row.
    #[must_use]
    pub const fn status(&self) -> &Status {
        &self.status
    }

    /// Returns the priority row.
    #[must_use]
    pub const fn priority(&self) -> &Priority {
        &self.priority
    }

    /// Returns the schedule window.
    #[must_use]
    pub const fn schedule(&self) -> Schedule {
        self.schedule
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last-mutation timestamp, if the task was ever mutated.
    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Returns whether the task has been soft deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    /// Moves the task to a new status.
    ///
    /// The transition does not accept new schedule instants: moving into
    /// `IN_PROGRESS` requires the window to be set already.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::ScheduleNotSet`] when `status` is
    /// `IN_PROGRESS` and the existing schedule is incomplete; the task is
    /// left unchanged.
    pub fn change_status(
        &mut self,
        status: Status,
        clock: &impl Clock,
    ) -> Result<(), TrackerDomainError> {
        if status.is_in_progress() && !self.schedule.is_complete() {
            return Err(TrackerDomainError::ScheduleNotSet);
        }
        self.status = status;
        self.touch(clock);
        Ok(())
    }

    /// Marks the task as deleted. Idempotent: re-deleting only refreshes the
    /// mutation timestamp.
    pub fn mark_deleted(&mut self, clock: &impl Clock) {
        self.is_deleted = true;
        self.touch(clock);
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = Some(clock.utc());
    }
}
