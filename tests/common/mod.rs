//! Common test utilities for thumbnail-dl integration tests

#[allow(dead_code)]
pub mod fixtures;

pub use fixtures::*;
