//! Application services for the user directory.

mod accounts;

pub use accounts::{
    CreateUserRequest, UserAccountError, UserAccountResult, UserAccountService,
};
