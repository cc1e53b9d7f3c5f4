//! Facet provider implementation.

use crate::facet_provider::FacetProvider;
use async_trait::async_trait;
use fitdex_config::{FacetMode, FacetsConfig};
use fitdex_core::FacetKind;
use fitdex_repository::ExerciseSource;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

/// Facet provider backed by built-in lists or the exercise source.
///
/// Each vocabulary is resolved at most once; later calls return the same
/// `Arc`.
pub struct FacetProviderImpl {
    source: Option<Arc<dyn ExerciseSource>>,
    mode: FacetMode,
    muscle_groups_override: Option<Vec<String>>,
    equipment_override: Option<Vec<String>>,
    muscle_groups: OnceCell<Arc<Vec<String>>>,
    equipment: OnceCell<Arc<Vec<String>>>,
}

impl FacetProviderImpl {
    /// Serves the built-in vocabularies.
    #[must_use]
    pub fn fixed() -> Self {
        Self {
            source: None,
            mode: FacetMode::Static,
            muscle_groups_override: None,
            equipment_override: None,
            muscle_groups: OnceCell::new(),
            equipment: OnceCell::new(),
        }
    }

    /// Derives vocabularies from the distinct values in the source.
    #[must_use]
    pub fn derived(source: Arc<dyn ExerciseSource>) -> Self {
        Self {
            source: Some(source),
            mode: FacetMode::Derived,
            ..Self::fixed()
        }
    }

    /// Builds a provider from configuration.
    #[must_use]
    pub fn from_config(source: Arc<dyn ExerciseSource>, config: &FacetsConfig) -> Self {
        let provider = match config.mode {
            FacetMode::Static => Self::fixed(),
            FacetMode::Derived => Self::derived(source),
        };
        Self {
            muscle_groups_override: config.muscle_groups.clone(),
            equipment_override: config.equipment.clone(),
            ..provider
        }
    }

    /// Replaces the fallback list for one facet.
    #[must_use]
    pub fn with_override(mut self, kind: FacetKind, values: Vec<String>) -> Self {
        match kind {
            FacetKind::MuscleGroup => self.muscle_groups_override = Some(values),
            FacetKind::Equipment => self.equipment_override = Some(values),
        }
        self
    }

    /// Configured mode.
    #[must_use]
    pub const fn mode(&self) -> FacetMode {
        self.mode
    }

    fn cell(&self, kind: FacetKind) -> &OnceCell<Arc<Vec<String>>> {
        match kind {
            FacetKind::MuscleGroup => &self.muscle_groups,
            FacetKind::Equipment => &self.equipment,
        }
    }

    fn fallback(&self, kind: FacetKind) -> Vec<String> {
        let configured = match kind {
            FacetKind::MuscleGroup => self.muscle_groups_override.as_ref(),
            FacetKind::Equipment => self.equipment_override.as_ref(),
        };
        configured.cloned().unwrap_or_else(|| kind.default_labels())
    }

    async fn resolve(&self, kind: FacetKind) -> Vec<String> {
        let source = match (&self.source, self.mode) {
            (Some(source), FacetMode::Derived) => source,
            _ => {
                debug!(facet = %kind, "Using static facet vocabulary");
                return self.fallback(kind);
            }
        };

        match source.select_distinct(kind).await {
            Ok(values) if !values.is_empty() => {
                info!(facet = %kind, count = values.len(), "Derived facet vocabulary from source");
                values
            }
            Ok(_) => {
                warn!(facet = %kind, "Source has no facet values, using defaults");
                self.fallback(kind)
            }
            Err(e) => {
                warn!(facet = %kind, error = %e, "Failed to derive facet vocabulary, using defaults");
                self.fallback(kind)
            }
        }
    }
}

#[async_trait]
impl FacetProvider for FacetProviderImpl {
    async fn values(&self, kind: FacetKind) -> Arc<Vec<String>> {
        self.cell(kind)
            .get_or_init(|| async { Arc::new(self.resolve(kind).await) })
            .await
            .clone()
    }
}
