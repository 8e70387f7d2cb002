//! Story aggregate root.
//!
//! A story owns its child tasks through the task-side `story_id` reference;
//! the aggregate itself stores no duplicate collection.

use super::{
    Priority, Schedule, Status, StoryId, StoryPoints, TrackerDomainError, reference,
};
use crate::directory::domain::UserId;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Input fields for creating a new story.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStory {
    /// Story title.
    pub title: String,
    /// Story description.
    pub description: String,
    /// Validated story point estimate.
    pub story_points: StoryPoints,
    /// Optional assignee.
    pub assigned_to: Option<UserId>,
    /// Resolved status row.
    pub status: Status,
    /// Resolved priority row.
    pub priority: Priority,
    /// Expected start/end window.
    pub schedule: Schedule,
}

/// Parameter object for reconstructing a persisted story aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedStoryData {
    /// Persisted story identifier.
    pub id: StoryId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted story points.
    pub story_points: StoryPoints,
    /// Persisted assignee reference, if any.
    pub assigned_to: Option<UserId>,
    /// Persisted status row.
    pub status: Status,
    /// Persisted priority row.
    pub priority: Priority,
    /// Persisted schedule window.
    pub schedule: Schedule,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last-mutation timestamp, if any.
    pub updated_at: Option<DateTime<Utc>>,
    /// Persisted tombstone flag.
    pub is_deleted: bool,
}

/// Story aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    id: StoryId,
    title: String,
    description: String,
    story_points: StoryPoints,
    assigned_to: Option<UserId>,
    status: Status,
    priority: Priority,
    schedule: Schedule,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    is_deleted: bool,
}

impl Story {
    /// Creates a new story.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::EmptyTitle`] or
    /// [`TrackerDomainError::EmptyDescription`] when those fields are blank,
    /// or [`TrackerDomainError::ScheduleRequired`] when the status is
    /// `IN_PROGRESS` and the schedule is incomplete.
    pub fn new(data: NewStory, clock: &impl Clock) -> Result<Self, TrackerDomainError> {
        let title = data.title.trim().to_owned();
        if title.is_empty() {
            return Err(TrackerDomainError::EmptyTitle);
        }
        let description = data.description.trim().to_owned();
        if description.is_empty() {
            return Err(TrackerDomainError::EmptyDescription);
        }
        data.schedule.ensure_complete_for(&data.status)?;

        Ok(Self {
            id: StoryId::new(),
            title,
            description,
            story_points: data.story_points,
            assigned_to: data.assigned_to,
            status: data.status,
            priority: data.priority,
            schedule: data.schedule,
            created_at: clock.utc(),
            updated_at: None,
            is_deleted: false,
        })
    }

    /// Reconstructs a story from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedStoryData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            story_points: data.story_points,
            assigned_to: data.assigned_to,
            status: data.status,
            priority: data.priority,
            schedule: data.schedule,
            created_at: data.created_at,
            updated_at: data.updated_at,
            is_deleted: data.is_deleted,
        }
    }

    /// Returns the story identifier.
    #[must_use]
    pub const fn id(&self) -> StoryId {
        self.id
    }

    /// Returns the story title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the story description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the story point estimate.
    #[must_use]
    pub const fn story_points(&self) -> StoryPoints {
        self.story_points
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assigned_to(&self) -> Option<UserId> {
        self.assigned_to
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

    /// Returns the last-mutation timestamp, if any.
    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Returns whether the story has been soft deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    /// Returns whether this story is "active": status name exactly
    /// `IN_PROGRESS`, priority name exactly `LOW`, and not soft deleted.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status.name() == reference::IN_PROGRESS
            && self.priority.name() == reference::LOW
            && !self.is_deleted
    }

    /// Returns a transient copy whose expected start has been passed through
    /// `zone`.
    ///
    /// The stored instant is treated as a UTC wall time, attached to `zone`
    /// preserving the absolute instant, then stored back as UTC. The
    /// round-trip leaves the instant value numerically unchanged; callers
    /// render it in `zone` to obtain the local wall clock. The persisted row
    /// is never written back.
    #[must_use]
    pub fn localized_to(&self, zone: Tz) -> Self {
        let mut copy = self.clone();
        if let Some(start) = copy.schedule.expected_start() {
            let rezoned = start.with_timezone(&zone).with_timezone(&Utc);
            copy.schedule = Schedule::new(Some(rezoned), copy.schedule.expected_end());
        }
        copy
    }
}
