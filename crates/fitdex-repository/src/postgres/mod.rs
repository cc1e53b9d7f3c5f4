//! Postgres implementations.

mod exercise_source;

pub use exercise_source::*;
