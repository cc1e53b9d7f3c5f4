//! Exercise service trait definition.

use crate::cache::CacheStats;
use async_trait::async_trait;
use fitdex_core::{Exercise, ExerciseId, FitdexResult, PageRequest};

/// Cached read access to the exercise catalog.
///
/// Every operation checks the cache first and goes to the remote source
/// only when no fresh entry exists for the query. Remote errors are
/// returned unchanged and leave the cache untouched.
#[async_trait]
pub trait ExerciseService: Send + Sync {
    /// Returns `page.limit` exercises starting at `page.offset`, in id order.
    ///
    /// A zero limit returns an empty list without touching the source.
    async fn fetch_page(&self, page: PageRequest) -> FitdexResult<Vec<Exercise>>;

    /// Returns up to `limit` exercises whose name contains `term`, ignoring case.
    async fn search(&self, term: &str, limit: usize) -> FitdexResult<Vec<Exercise>>;

    /// Returns the exercise with the given id, or `None` if there is none.
    async fn get_by_id(&self, id: ExerciseId) -> FitdexResult<Option<Exercise>>;

    /// Current cache statistics.
    fn cache_stats(&self) -> CacheStats;
}
