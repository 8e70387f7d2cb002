//! Adapter implementations of the tracker ports.

pub mod memory;
