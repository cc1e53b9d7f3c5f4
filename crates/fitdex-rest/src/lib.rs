//! # Fitdex REST
//!
//! HTTP surface for the exercise catalog using Axum.
//! Exposes paged listing, name search, lookup by id, facet vocabularies,
//! health probes, and the OpenAPI document.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
