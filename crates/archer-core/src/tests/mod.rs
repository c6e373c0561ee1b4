//! Scenario tests for the full simulation pipeline.
//!
//! - `helpers.rs`: session setup and entity placement utilities
//! - `integration.rs`: end-to-end scenarios (win, loss, combat, movement)
//! - `determinism.rs`: same seed and input give the same session

mod helpers;

pub use helpers::*;
