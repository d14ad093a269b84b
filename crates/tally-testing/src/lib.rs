//! Testing infrastructure for tally integration tests.
//!
//! This crate provides utilities for writing robust integration tests:
//! - `TestWorld`: Fluent interface for declarative test setup
//! - `fixtures`: Deterministic guide payload builders

pub mod fixtures;
pub mod world;

pub use world::TestWorld;
