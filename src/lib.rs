//! Backlog: task and story tracking backend.
//!
//! This crate provides the core functionality for a small agile tracker:
//! user accounts, stories and their child tasks, status-transition
//! validation, and cached filtered queries.
//!
//! # Architecture
//!
//! Backlog follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory stores, the
//!   query cache)
//!
//! # Modules
//!
//! - [`directory`]: User accounts, profile validation, and soft deletion
//! - [`tracker`]: Story and task lifecycle, queries, and caching

pub mod directory;
pub mod tracker;
