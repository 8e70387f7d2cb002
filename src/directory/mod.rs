//! User directory for Backlog.
//!
//! Holds the user records that stories and tasks are assigned to. Users are
//! created once, mutated only by soft delete, and never removed from
//! storage. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
