//! Unit and service tests for the lifecycle and query engine.

mod query_tests;
mod story_service_tests;
