//! # Fitdex Config
//!
//! Configuration management for Fitdex.
//! Supports layered configuration from files, environment variables,
//! and runtime refresh.

mod app_config;
mod loader;
mod modes;
mod validation;

pub use app_config::*;
pub use loader::*;
pub use modes::*;
pub use validation::*;
