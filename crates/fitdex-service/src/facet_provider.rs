//! Facet provider trait definition.

use async_trait::async_trait;
use fitdex_core::FacetKind;
use std::sync::Arc;

/// Filter vocabularies for the exercise catalog.
///
/// Each list is computed on first use and then served unchanged for the
/// rest of the process. The provider never fails; when the source cannot be
/// read it falls back to the built-in lists.
#[async_trait]
pub trait FacetProvider: Send + Sync {
    /// Vocabulary for the given facet.
    async fn values(&self, kind: FacetKind) -> Arc<Vec<String>>;

    /// Muscle group labels.
    async fn muscle_groups(&self) -> Arc<Vec<String>> {
        self.values(FacetKind::MuscleGroup).await
    }

    /// Equipment labels.
    async fn equipment_types(&self) -> Arc<Vec<String>> {
        self.values(FacetKind::Equipment).await
    }
}
