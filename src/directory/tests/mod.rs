//! Unit and service tests for the user directory.

mod domain_tests;
