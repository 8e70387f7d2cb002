//! Error types for user directory validation.

use thiserror::Error;

/// Errors returned while constructing directory user values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryDomainError {
    /// The first name is empty after trimming.
    #[error("first name must not be empty")]
    EmptyFirstName,

    /// The last name is empty after trimming.
    #[error("last name must not be empty")]
    EmptyLastName,

    /// The email address is empty or not addressable.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// The time zone is not a known IANA zone name.
    #[error("unknown IANA time zone: {0}")]
    UnknownTimeZone(String),
}
