//! Service implementations.
//!
//! Trait definitions live in the parent module (e.g. `exercise_service.rs`).

mod exercise_service_impl;
mod facet_provider_impl;

pub use exercise_service_impl::ExerciseServiceImpl;
pub use facet_provider_impl::FacetProviderImpl;
