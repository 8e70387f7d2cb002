//! Service layer for story creation, per-user listing, and the cached
//! timezone-adjusted active-story query.

use super::caching;
use crate::directory::{
    domain::{User, UserId},
    ports::{UserRepository, UserRepositoryError},
};
use crate::tracker::{
    domain::{
        NewStory, Page, PageRequest, Priority, PriorityId, Schedule, Status, StatusId, Story,
        StoryPoints, TrackerDomainError,
    },
    ports::{
        CacheNamespace, QueryCache, ReferenceDataRepository, StoryRepository,
        TrackerRepositoryError,
    },
};
use chrono_tz::Tz;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Request payload for creating a story.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateStoryRequest {
    title: String,
    description: String,
    story_points: u32,
    assigned_to: Option<UserId>,
    status_id: StatusId,
    priority_id: PriorityId,
    schedule: Schedule,
}

impl CreateStoryRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        story_points: u32,
        status_id: StatusId,
        priority_id: PriorityId,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            story_points,
            assigned_to: None,
            status_id,
            priority_id,
            schedule: Schedule::default(),
        }
    }

    /// Assigns the story to a user.
    #[must_use]
    pub const fn with_assignee(mut self, user_id: UserId) -> Self {
        self.assigned_to = Some(user_id);
        self
    }

    /// Sets the expected start/end window.
    #[must_use]
    pub const fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }
}

/// Service-level errors for story lifecycle operations.
#[derive(Debug, Error)]
pub enum StoryLifecycleError {
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
}

/// Result type for story lifecycle service operations.
pub type StoryLifecycleResult<T> = Result<T, StoryLifecycleError>;

/// Story lifecycle orchestration service.
#[derive(Clone)]
pub struct StoryLifecycleService<S, R, U, C>
where
    S: StoryRepository,
    R: ReferenceDataRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    stories: Arc<S>,
    reference: Arc<R>,
    users: Arc<U>,
    cache: Arc<dyn QueryCache>,
    clock: Arc<C>,
}

impl<S, R, U, C> StoryLifecycleService<S, R, U, C>
where
    S: StoryRepository,
    R: ReferenceDataRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new story lifecycle service.
    #[must_use]
    pub const fn new(
        stories: Arc<S>,
        reference: Arc<R>,
        users: Arc<U>,
        cache: Arc<dyn QueryCache>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            stories,
            reference,
            users,
            cache,
            clock,
        }
    }

    async fn require_user(&self, id: UserId) -> StoryLifecycleResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .filter(|user| !user.is_deleted())
            .ok_or(StoryLifecycleError::UserNotFound(id))
    }

    async fn require_status(&self, id: StatusId) -> StoryLifecycleResult<Status> {
        self.reference
            .find_status(id)
            .await?
            .ok_or(StoryLifecycleError::StatusNotFound(id))
    }

    async fn require_priority(&self, id: PriorityId) -> StoryLifecycleResult<Priority> {
        self.reference
            .find_priority(id)
            .await?
            .ok_or(StoryLifecycleError::PriorityNotFound(id))
    }

    /// Creates a new story.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` variants for unresolved references, or domain
    /// validation errors (blank title/description, zero story points,
    /// IN_PROGRESS without a complete schedule).
    pub async fn create_story(&self, request: CreateStoryRequest) -> StoryLifecycleResult<Story> {
        info!(title = %request.title, "creating story");
        let status = self.require_status(request.status_id).await?;
        request.schedule.ensure_complete_for(&status)?;

        let assigned_to = match request.assigned_to {
            Some(id) => Some(self.require_user(id).await?.id()),
            None => None,
        };
        let priority = self.require_priority(request.priority_id).await?;
        let story_points = StoryPoints::new(request.story_points)?;

        let story = Story::new(
            NewStory {
                title: request.title,
                description: request.description,
                story_points,
                assigned_to,
                status,
                priority,
                schedule: request.schedule,
            },
            &*self.clock,
        )?;
        self.stories.store(&story).await?;
        info!(story_id = %story.id(), "story created");
        Ok(story)
    }

    /// Returns the live stories assigned to `user_id`, paginated and
    /// created_at-descending by default. Not memoized.
    ///
    /// # Errors
    ///
    /// Returns repository errors.
    pub async fn get_stories_by_user(
        &self,
        user_id: UserId,
        page: &PageRequest,
    ) -> StoryLifecycleResult<Page<Story>> {
        debug!(%user_id, "fetching stories for user");
        Ok(self.stories.find_by_user(user_id, page).await?)
    }

    /// Returns the active stories with their expected start passed through
    /// `time_zone`.
    ///
    /// Active means status name exactly `IN_PROGRESS`, priority name exactly
    /// `LOW`, not soft deleted. The zone conversion keeps the absolute
    /// instant and is applied to transient copies only; persisted rows are
    /// untouched. Results are memoized per canonical zone name with no
    /// eviction.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::UnknownTimeZone`] when `time_zone` is
    /// not an IANA zone name, or repository errors.
    pub async fn get_active_stories(&self, time_zone: &str) -> StoryLifecycleResult<Vec<Story>> {
        let zone: Tz = time_zone
            .parse()
            .map_err(|_| TrackerDomainError::UnknownTimeZone(time_zone.to_owned()))?;
        info!(zone = zone.name(), "fetching active stories");

        caching::get_or_compute(
            self.cache.as_ref(),
            CacheNamespace::ActiveStories,
            zone.name(),
            || async {
                let stories = self.stories.find_active().await?;
                Ok(stories
                    .into_iter()
                    .map(|story| story.localized_to(zone))
                    .collect::<Vec<_>>())
            },
        )
        .await
    }
}
