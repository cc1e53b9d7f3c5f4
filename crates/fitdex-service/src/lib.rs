//! # Fitdex Service
//!
//! The exercise data access and cache layer.
//!
//! - [`cache`]: the in-memory query-result cache with TTL-gated validity.
//! - [`ExerciseService`]: `fetch_page`, `search` and `get_by_id`, each
//!   consulting the cache before the remote source.
//! - [`FacetProvider`]: muscle-group and equipment vocabularies, computed
//!   once per process.

pub mod cache;
pub mod dto;
pub mod exercise_service;
pub mod facet_provider;
pub mod metrics;
pub mod r#impl;

pub use cache::*;
pub use dto::*;
pub use exercise_service::*;
pub use facet_provider::*;
pub use r#impl::{ExerciseServiceImpl, FacetProviderImpl};
