//! Domain model for the user directory.
//!
//! Users carry the profile fields the tracker needs for assignment and
//! time-zone aware queries, plus the tombstone flag used for soft deletion.

mod error;
mod ids;
mod user;

pub use error::DirectoryDomainError;
pub use ids::UserId;
pub use user::{NewUser, PersistedUserData, User};
