//! Exercise source trait definition.

use async_trait::async_trait;
use fitdex_core::{Exercise, ExerciseId, FacetKind, FitdexResult};

/// Read-only access to the table that owns exercise records.
///
/// Implementations return rows in their natural order (ascending `id`) and
/// never cache; caching is the service layer's job.
#[async_trait]
pub trait ExerciseSource: Send + Sync {
    /// Returns the rows at positions `start..=end` (zero-based, inclusive).
    async fn select_range(&self, start: usize, end: usize) -> FitdexResult<Vec<Exercise>>;

    /// Returns up to `limit` rows whose name contains `term`, ignoring case.
    ///
    /// `term` is matched literally; `%` and `_` carry no wildcard meaning.
    async fn select_name_ilike(&self, term: &str, limit: usize) -> FitdexResult<Vec<Exercise>>;

    /// Returns the rows whose primary key equals `id` (zero or one).
    async fn select_by_id(&self, id: ExerciseId) -> FitdexResult<Vec<Exercise>>;

    /// Returns the distinct non-empty values of a facet column, sorted.
    async fn select_distinct(&self, kind: FacetKind) -> FitdexResult<Vec<String>>;

    /// Checks that the source is reachable.
    async fn health_check(&self) -> FitdexResult<()> {
        Ok(())
    }

    /// Short name used in logs and error messages.
    fn name(&self) -> &'static str;
}
