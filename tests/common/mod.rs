//! Common utilities for integration tests

pub mod fixtures;

// Re-export commonly used items
pub use fixtures::{billiard_text, oscillator_text, write_file};
