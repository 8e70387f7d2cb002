//! Application services for the lifecycle and query engine.

mod caching;
mod stories;
mod tasks;

pub use stories::{
    CreateStoryRequest, StoryLifecycleError, StoryLifecycleResult, StoryLifecycleService,
};
pub use tasks::{
    CreateTaskRequest, TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService,
};
