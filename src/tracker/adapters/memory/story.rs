//! In-memory story repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::directory::domain::UserId;
use crate::tracker::{
    domain::{Page, PageRequest, SortOrder, Story, StoryId},
    ports::{StoryRepository, TrackerRepositoryError, TrackerRepositoryResult},
};

/// Thread-safe in-memory story repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStoryRepository {
    state: Arc<RwLock<HashMap<StoryId, Story>>>,
}

impl InMemoryStoryRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn snapshot(&self) -> TrackerRepositoryResult<Vec<Story>> {
        let state = self.state.read().map_err(|err| {
            TrackerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.values().cloned().collect())
    }
}

fn sort_stories(stories: &mut [Story], order: SortOrder) {
    stories.sort_by(|a, b| {
        let by_created = match order {
            SortOrder::CreatedAtDesc => b.created_at().cmp(&a.created_at()),
            SortOrder::CreatedAtAsc => a.created_at().cmp(&b.created_at()),
        };
        by_created.then_with(|| a.id().into_inner().cmp(&b.id().into_inner()))
    });
}

#[async_trait]
impl StoryRepository for InMemoryStoryRepository {
    async fn store(&self, story: &Story) -> TrackerRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TrackerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.contains_key(&story.id()) {
            return Err(TrackerRepositoryError::DuplicateStory(story.id()));
        }
        state.insert(story.id(), story.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: StoryId) -> TrackerRepositoryResult<Option<Story>> {
        let state = self.state.read().map_err(|err| {
            TrackerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.get(&id).cloned())
    }

    async fn find_by_user(
        &self,
        user_id: UserId,
        page: &PageRequest,
    ) -> TrackerRepositoryResult<Page<Story>> {
        let mut matched: Vec<Story> = self
            .snapshot()?
            .into_iter()
            .filter(|story| !story.is_deleted() && story.assigned_to() == Some(user_id))
            .collect();
        sort_stories(&mut matched, page.sort());
        Ok(Page::from_complete(matched, page))
    }

    async fn find_active(&self) -> TrackerRepositoryResult<Vec<Story>> {
        let mut active: Vec<Story> = self
            .snapshot()?
            .into_iter()
            .filter(Story::is_active)
            .collect();
        sort_stories(&mut active, SortOrder::CreatedAtDesc);
        Ok(active)
    }
}
