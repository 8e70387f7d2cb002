//! Port contracts for the lifecycle and query engine.
//!
//! Ports define infrastructure-agnostic interfaces used by tracker services.

pub mod cache;
pub mod repository;

pub use cache::{CacheError, CacheNamespace, CacheResult, QueryCache};
pub use repository::{
    ReferenceDataRepository, StoryRepository, TaskQueryFilter, TaskRepository, TaskSearchFilter,
    TrackerRepositoryError, TrackerRepositoryResult,
};
