//! Service layer for task creation, status transitions, soft deletion, and
//! the cached search/filter queries.

use super::caching;
use crate::directory::{
    domain::{User, UserId},
    ports::{UserRepository, UserRepositoryError},
};
use crate::tracker::{
    domain::{
        EstimatedHours, NewTask, Page, PageRequest, Priority, PriorityId, Schedule, Status,
        StatusId, StoryId, Task, TaskId, TrackerDomainError,
    },
    ports::{
        CacheNamespace, QueryCache, ReferenceDataRepository, StoryRepository, TaskQueryFilter,
        TaskRepository, TaskSearchFilter, TrackerRepositoryError,
    },
};
use mockable::Clock;
use rust_decimal::Decimal;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    estimated_hours: Decimal,
    assigned_to: UserId,
    status_id: StatusId,
    priority_id: PriorityId,
    story_id: Option<StoryId>,
    schedule: Schedule,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        estimated_hours: Decimal,
        assigned_to: UserId,
        status_id: StatusId,
        priority_id: PriorityId,
    ) -> Self {
        Self {
            title: title.into(),
            estimated_hours,
            assigned_to,
            status_id,
            priority_id,
            story_id: None,
            schedule: Schedule::default(),
        }
    }

    /// Attaches the task to an owning story.
    #[must_use]
    pub const fn with_story(mut self, story_id: StoryId) -> Self {
        self.story_id = Some(story_id);
        self
    }

    /// Sets the expected start/end window.
    #[must_use]
    pub const fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TrackerDomainError),

    /// Tracker repository operation failed.
    #[error(transparent)]
    Repository(#[from] TrackerRepositoryError),

    /// User directory operation failed.
    #[error(transparent)]
    Directory(#[from] UserRepositoryError),

    /// No live user exists with the given identifier.
    #[error("user {0} not found or deleted")]
    UserNotFound(UserId),

    /// No status row exists with the given identifier.
    #[error("status {0} not found")]
    StatusNotFound(StatusId),

    /// No priority row exists with the given identifier.
    #[error("priority {0} not found")]
    PriorityNotFound(PriorityId),

    /// No story exists with the given identifier.
    #[error("story {0} not found")]
    StoryNotFound(StoryId),

    /// No task exists with the given identifier.
    #[error("task {0} not found")]
    TaskNotFound(TaskId),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle and query orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<T, S, R, U, C>
where
    T: TaskRepository,
    S: StoryRepository,
    R: ReferenceDataRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    stories: Arc<S>,
    reference: Arc<R>,
    users: Arc<U>,
    cache: Arc<dyn QueryCache>,
    clock: Arc<C>,
}

impl<T, S, R, U, C> TaskLifecycleService<T, S, R, U, C>
where
    T: TaskRepository,
    S: StoryRepository,
    R: ReferenceDataRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(
        tasks: Arc<T>,
        stories: Arc<S>,
        reference: Arc<R>,
        users: Arc<U>,
        cache: Arc<dyn QueryCache>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            tasks,
            stories,
            reference,
            users,
            cache,
            clock,
        }
    }

    async fn require_user(&self, id: UserId) -> TaskLifecycleResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .filter(|user| !user.is_deleted())
            .ok_or(TaskLifecycleError::UserNotFound(id))
    }

    async fn require_status(&self, id: StatusId) -> TaskLifecycleResult<Status> {
        self.reference
            .find_status(id)
            .await?
            .ok_or(TaskLifecycleError::StatusNotFound(id))
    }

    async fn require_priority(&self, id: PriorityId) -> TaskLifecycleResult<Priority> {
        self.reference
            .find_priority(id)
            .await?
            .ok_or(TaskLifecycleError::PriorityNotFound(id))
    }

    /// Creates a new task.
    ///
    /// An explicit `story_id` that does not resolve is a hard failure; the
    /// task is never silently created without its parent. Creation performs
    /// no cache eviction: the read caches hold only filtered views and the
    /// new row simply appears on the next computed query.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` variants for unresolved references, or domain
    /// validation errors (blank title, non-positive estimate, IN_PROGRESS
    /// without a complete schedule).
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        info!(title = %request.title, "creating task");
        let user = self.require_user(request.assigned_to).await?;
        let status = self.require_status(request.status_id).await?;
        let priority = self.require_priority(request.priority_id).await?;
        request.schedule.ensure_complete_for(&status)?;

        let story_id = match request.story_id {
            Some(id) => {
                self.stories
                    .find_by_id(id)
                    .await?
                    .ok_or(TaskLifecycleError::StoryNotFound(id))?;
                Some(id)
            }
            None => None,
        };
        let estimated_hours = EstimatedHours::new(request.estimated_hours)?;

        let task = Task::new(
            NewTask {
                title: request.title,
                estimated_hours,
                assigned_to: user.id(),
                story_id,
                status,
                priority,
                schedule: request.schedule,
            },
            &*self.clock,
        )?;
        self.tasks.store(&task).await?;
        info!(task_id = %task.id(), "task created");
        Ok(task)
    }

    /// Moves a task to a new status.
    ///
    /// Transitioning into `IN_PROGRESS` requires the task's existing
    /// schedule to be complete; the transition does not accept new instants.
    /// Evicts both read-cache namespaces so cached search/filter pages never
    /// serve the old status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] or
    /// [`TaskLifecycleError::StatusNotFound`] for unresolved ids, or
    /// [`TrackerDomainError::ScheduleNotSet`] when the IN_PROGRESS guard
    /// fails; the task is left unchanged on failure.
    pub async fn update_task_status(
        &self,
        task_id: TaskId,
        status_id: StatusId,
    ) -> TaskLifecycleResult<Task> {
        info!(%task_id, %status_id, "updating task status");
        let mut task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::TaskNotFound(task_id))?;
        let status = self.require_status(status_id).await?;

        if let Err(err) = task.change_status(status, &*self.clock) {
            warn!(%task_id, "invalid IN_PROGRESS transition without schedule");
            return Err(err.into());
        }
        self.tasks.update(&task).await?;
        caching::evict_read_caches(self.cache.as_ref()).await;
        info!(%task_id, "task status updated");
        Ok(task)
    }

    /// Validates a schedule against a status id without writing anything.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::StatusNotFound`] when the status id
    /// does not resolve, or [`TrackerDomainError::ScheduleRequired`] when
    /// the status is `IN_PROGRESS` and the schedule is incomplete.
    pub async fn validate_status_schedule(
        &self,
        status_id: StatusId,
        schedule: Schedule,
    ) -> TaskLifecycleResult<()> {
        let status = self.require_status(status_id).await?;
        schedule.ensure_complete_for(&status)?;
        Ok(())
    }

    /// Runs the memoized task search query.
    ///
    /// # Errors
    ///
    /// Returns repository errors; cache failures degrade to an uncached
    /// computation.
    pub async fn search_tasks(
        &self,
        filter: &TaskSearchFilter,
        page: &PageRequest,
    ) -> TaskLifecycleResult<Page<Task>> {
        debug!(?filter, ?page, "searching tasks");
        let Some(key) = caching::query_key(&(filter, page)) else {
            return Ok(self.tasks.search(filter, page).await?);
        };
        caching::get_or_compute(
            self.cache.as_ref(),
            CacheNamespace::SearchTasks,
            &key,
            || async { Ok(self.tasks.search(filter, page).await?) },
        )
        .await
    }

    /// Runs the memoized task filter query.
    ///
    /// # Errors
    ///
    /// Returns repository errors; cache failures degrade to an uncached
    /// computation.
    pub async fn filter_tasks(
        &self,
        filter: &TaskQueryFilter,
        page: &PageRequest,
    ) -> TaskLifecycleResult<Page<Task>> {
        debug!(?filter, ?page, "filtering tasks");
        let Some(key) = caching::query_key(&(filter, page)) else {
            return Ok(self.tasks.filter(filter, page).await?);
        };
        caching::get_or_compute(
            self.cache.as_ref(),
            CacheNamespace::FilterTasks,
            &key,
            || async { Ok(self.tasks.filter(filter, page).await?) },
        )
        .await
    }

    /// Soft deletes a task and evicts both read-cache namespaces.
    ///
    /// Idempotent in effect: the row is never physically removed, so a
    /// second call finds it and re-sets the tombstone.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] when no task row exists.
    pub async fn soft_delete_task(&self, task_id: TaskId) -> TaskLifecycleResult<()> {
        info!(%task_id, "soft deleting task");
        let mut task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::TaskNotFound(task_id))?;
        task.mark_deleted(&*self.clock);
        self.tasks.update(&task).await?;
        caching::evict_read_caches(self.cache.as_ref()).await;
        info!(%task_id, "task soft deleted and caches evicted");
        Ok(())
    }
}
