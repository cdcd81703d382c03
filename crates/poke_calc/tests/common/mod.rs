//! Shared test utilities for kill-probability tests.
//!
//! Fixture types and builders for the combatants used across the
//! integration tests. Imported by each test binary with `mod common;`.

pub mod fixtures;
pub mod helpers;
