//! In-memory implementations for development and tests.

mod exercise_source;

pub use exercise_source::*;
