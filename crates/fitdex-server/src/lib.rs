//! # Fitdex Server Library
//!
//! Wiring for the Fitdex server: the dependency container that builds the
//! exercise source, cache, and services from configuration, plus startup
//! output helpers.

pub mod di;
pub mod startup;
