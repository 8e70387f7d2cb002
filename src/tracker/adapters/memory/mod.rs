//! In-memory tracker adapters for tests and local development.

mod cache;
mod reference;
mod story;
mod task;

pub use cache::InMemoryQueryCache;
pub use reference::InMemoryReferenceDataRepository;
pub use story::InMemoryStoryRepository;
pub use task::InMemoryTaskRepository;
