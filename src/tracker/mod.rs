//! Task and story lifecycle tracking for Backlog.
//!
//! This module is the lifecycle and query engine: it validates status
//! transitions (the IN_PROGRESS scheduling invariant), serves filtered and
//! paginated task views through a cache-aside layer, computes
//! timezone-adjusted active stories, and orchestrates creation, status
//! updates, and soft deletion with cache invalidation. The module follows
//! hexagonal architecture:
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
