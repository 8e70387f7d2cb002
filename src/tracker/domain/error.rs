//! Error types for tracker domain validation.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors returned while constructing or mutating tracker domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TrackerDomainError {
    /// The title is empty after trimming.
    #[error("title must not be empty")]
    EmptyTitle,

    /// The description is empty after trimming.
    #[error("description must not be empty")]
    EmptyDescription,

    /// The reference-data name is empty after trimming.
    #[error("reference name must not be empty")]
    EmptyReferenceName,

    /// The estimated hours value is not positive.
    #[error("estimated hours must be positive, got {0}")]
    InvalidEstimatedHours(Decimal),

    /// The story points value is zero.
    #[error("story points must be a positive integer")]
    InvalidStoryPoints,

    /// A creation request targets IN_PROGRESS without a complete schedule.
    #[error("Expected start/end date are mandatory for IN_PROGRESS status.")]
    ScheduleRequired,

    /// A status transition targets IN_PROGRESS but the record's schedule is
    /// incomplete.
    #[error("Expected start/end date must be set when status is IN_PROGRESS.")]
    ScheduleNotSet,

    /// The time zone is not a known IANA zone name.
    #[error("unknown IANA time zone: {0}")]
    UnknownTimeZone(String),
}
