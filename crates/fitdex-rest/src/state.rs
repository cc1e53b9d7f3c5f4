//! Application state for Axum handlers.

use fitdex_repository::ExerciseSource;
use fitdex_service::{ExerciseService, FacetProvider};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub exercise_service: Arc<dyn ExerciseService>,
    pub facet_provider: Arc<dyn FacetProvider>,
    /// Probed by the readiness endpoint; `None` reports ready unconditionally.
    pub source: Option<Arc<dyn ExerciseSource>>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        exercise_service: Arc<dyn ExerciseService>,
        facet_provider: Arc<dyn FacetProvider>,
    ) -> Self {
        Self {
            exercise_service,
            facet_provider,
            source: None,
        }
    }

    /// Sets the source checked by `/ready`.
    #[must_use]
    pub fn with_source(mut self, source: Arc<dyn ExerciseSource>) -> Self {
        self.source = Some(source);
        self
    }
}
