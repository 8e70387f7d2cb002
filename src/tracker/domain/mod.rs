//! Domain model for task and story tracking.
//!
//! The tracker domain models stories and their child tasks, the reference
//! status and priority rows they point at, the IN_PROGRESS scheduling
//! invariant, and pagination, while keeping all infrastructure concerns
//! outside of the domain boundary.

mod error;
mod ids;
mod page;
mod reference;
mod schedule;
mod story;
mod task;

pub use error::TrackerDomainError;
pub use ids::{EstimatedHours, PriorityId, StatusId, StoryId, StoryPoints, TaskId};
pub use page::{Page, PageRequest, SortOrder};
pub use reference::{IN_PROGRESS, LOW, Priority, ReferenceName, Status};
pub use schedule::Schedule;
pub use story::{NewStory, PersistedStoryData, Story};
pub use task::{NewTask, PersistedTaskData, Task};
