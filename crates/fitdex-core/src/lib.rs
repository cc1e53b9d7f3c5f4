//! # Fitdex Core
//!
//! Core types, traits, and error definitions for Fitdex.
//! This crate provides the exercise entity, facet vocabularies, and the
//! foundational abstractions shared by the repository, service, and REST
//! layers.

pub mod domain;
pub mod error;
pub mod id;
pub mod pagination;
pub mod result;
pub mod telemetry;
pub mod traits;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use pagination::*;
pub use result::*;
pub use telemetry::{init_tracing, LogFormat, TracingConfig};
pub use traits::*;
pub use validation::*;
