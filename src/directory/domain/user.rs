//! User aggregate for the directory.

use super::{DirectoryDomainError, UserId};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Input fields for creating a new user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Given name, required.
    pub first_name: String,
    /// Optional middle name.
    pub middle_name: Option<String>,
    /// Family name, required.
    pub last_name: String,
    /// Unique email address.
    pub email: String,
    /// IANA time zone name, e.g. `Asia/Kolkata`.
    pub time_zone: String,
}

/// Parameter object for reconstructing a persisted user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted user identifier.
    pub id: UserId,
    /// Persisted first name.
    pub first_name: String,
    /// Persisted middle name, if any.
    pub middle_name: Option<String>,
    /// Persisted last name.
    pub last_name: String,
    /// Persisted email address.
    pub email: String,
    /// Persisted time zone.
    pub time_zone: Tz,
    /// Persisted tombstone flag.
    pub is_deleted: bool,
}

/// Directory user record.
///
/// Mutated only by soft deletion; profile fields are fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    first_name: String,
    middle_name: Option<String>,
    last_name: String,
    email: String,
    time_zone: Tz,
    is_deleted: bool,
}

impl User {
    /// Creates a new user from validated input.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDomainError`] when a name is blank, the email is
    /// not addressable, or the time zone is not a known IANA zone.
    pub fn new(data: NewUser) -> Result<Self, DirectoryDomainError> {
        let first_name = data.first_name.trim().to_owned();
        if first_name.is_empty() {
            return Err(DirectoryDomainError::EmptyFirstName);
        }
        let last_name = data.last_name.trim().to_owned();
        if last_name.is_empty() {
            return Err(DirectoryDomainError::EmptyLastName);
        }
        let email = validate_email(&data.email)?;
        let time_zone: Tz = data
            .time_zone
            .parse()
            .map_err(|_| DirectoryDomainError::UnknownTimeZone(data.time_zone.clone()))?;
        let middle_name = data
            .middle_name
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty());

        Ok(Self {
            id: UserId::new(),
            first_name,
            middle_name,
            last_name,
            email,
            time_zone,
            is_deleted: false,
        })
    }

    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            first_name: data.first_name,
            middle_name: data.middle_name,
            last_name: data.last_name,
            email: data.email,
            time_zone: data.time_zone,
            is_deleted: data.is_deleted,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the first name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Returns the middle name, if any.
    #[must_use]
    pub fn middle_name(&self) -> Option<&str> {
        self.middle_name.as_deref()
    }

    /// Returns the last name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the user's IANA time zone.
    #[must_use]
    pub const fn time_zone(&self) -> Tz {
        self.time_zone
    }

    /// Returns whether the user has been soft deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    /// Marks the user as deleted. Idempotent.
    pub const fn mark_deleted(&mut self) {
        self.is_deleted = true;
    }
}

fn validate_email(raw: &str) -> Result<String, DirectoryDomainError> {
    let email = raw.trim();
    let addressable = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty())
        && !email.chars().any(char::is_whitespace);
    if !addressable {
        return Err(DirectoryDomainError::InvalidEmail(raw.to_owned()));
    }
    Ok(email.to_owned())
}
