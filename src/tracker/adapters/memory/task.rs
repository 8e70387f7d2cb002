//! In-memory task repository.
//!
//! The search query joins against the user directory to match assignee
//! first names and to exclude tasks whose assignee has been soft deleted,
//! mirroring what a SQL adapter would express as a join.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::directory::adapters::memory::InMemoryUserRepository;
use crate::tracker::{
    domain::{Page, PageRequest, SortOrder, Task, TaskId},
    ports::{
        TaskQueryFilter, TaskRepository, TaskSearchFilter, TrackerRepositoryError,
        TrackerRepositoryResult,
    },
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<HashMap<TaskId, Task>>>,
    users: InMemoryUserRepository,
}

impl InMemoryTaskRepository {
    /// Creates an empty repository joined to the given user store.
    #[must_use]
    pub fn new(users: InMemoryUserRepository) -> Self {
        Self {
            state: Arc::new(RwLock::new(HashMap::new())),
            users,
        }
    }

    fn live_tasks(&self) -> TrackerRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(|err| {
            TrackerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut tasks = Vec::new();
        for task in state.values().filter(|task| !task.is_deleted()) {
            let assignee = self
                .users
                .read_user(task.assigned_to())
                .map_err(TrackerRepositoryError::persistence)?;
            // A task whose assignee is gone or tombstoned never appears in
            // query results.
            if assignee.is_some_and(|user| !user.is_deleted()) {
                tasks.push(task.clone());
            }
        }
        Ok(tasks)
    }

    fn matches_search(&self, task: &Task, filter: &TaskSearchFilter) -> TrackerRepositoryResult<bool> {
        if let Some(assigned_to) = filter.assigned_to
            && task.assigned_to() != assigned_to
        {
            return Ok(false);
        }
        if let Some(first_name) = &filter.first_name {
            let assignee = self
                .users
                .read_user(task.assigned_to())
                .map_err(TrackerRepositoryError::persistence)?;
            let matched = assignee.is_some_and(|user| {
                user.first_name()
                    .to_lowercase()
                    .contains(&first_name.to_lowercase())
            });
            if !matched {
                return Ok(false);
            }
        }
        if let Some(expected_end) = filter.expected_end
            && task.schedule().expected_end() != Some(expected_end)
        {
            return Ok(false);
        }
        if let Some(status) = &filter.status
            && !task.status().name().eq_ignore_ascii_case(status)
        {
            return Ok(false);
        }
        Ok(true)
    }
}

fn matches_query(task: &Task, filter: &TaskQueryFilter) -> bool {
    if let Some(assigned_to) = filter.assigned_to
        && task.assigned_to() != assigned_to
    {
        return false;
    }
    if !filter.statuses.is_empty()
        && !filter
            .statuses
            .iter()
            .any(|name| task.status().name().eq_ignore_ascii_case(name))
    {
        return false;
    }
    if !filter.priorities.is_empty()
        && !filter
            .priorities
            .iter()
            .any(|name| task.priority().name().eq_ignore_ascii_case(name))
    {
        return false;
    }
    true
}

fn sort_tasks(tasks: &mut [Task], order: SortOrder) {
    // Identifier tie-break keeps equal-timestamp orderings stable across
    // calls, so identical queries produce identical cache values.
    tasks.sort_by(|a, b| {
        let by_created = match order {
            SortOrder::CreatedAtDesc => b.created_at().cmp(&a.created_at()),
            SortOrder::CreatedAtAsc => a.created_at().cmp(&b.created_at()),
        };
        by_created.then_with(|| a.id().into_inner().cmp(&b.id().into_inner()))
    });
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TrackerRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TrackerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.contains_key(&task.id()) {
            return Err(TrackerRepositoryError::DuplicateTask(task.id()));
        }
        state.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TrackerRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TrackerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.contains_key(&task.id()) {
            return Err(TrackerRepositoryError::TaskNotFound(task.id()));
        }
        state.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TrackerRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(|err| {
            TrackerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.get(&id).cloned())
    }

    async fn search(
        &self,
        filter: &TaskSearchFilter,
        page: &PageRequest,
    ) -> TrackerRepositoryResult<Page<Task>> {
        let mut matched = Vec::new();
        for task in self.live_tasks()? {
            if self.matches_search(&task, filter)? {
                matched.push(task);
            }
        }
        sort_tasks(&mut matched, page.sort());
        Ok(Page::from_complete(matched, page))
    }

    async fn filter(
        &self,
        filter: &TaskQueryFilter,
        page: &PageRequest,
    ) -> TrackerRepositoryResult<Page<Task>> {
        let mut matched: Vec<Task> = self
            .live_tasks()?
            .into_iter()
            .filter(|task| matches_query(task, filter))
            .collect();
        sort_tasks(&mut matched, page.sort());
        Ok(Page::from_complete(matched, page))
    }
}
