//! Cache key generators for consistent key naming.
//!
//! Keys are deterministic functions of the query shape, so two identical
//! queries always land on the same entry.

use fitdex_core::ExerciseId;

/// Namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "exercises";

/// Generate a cache key for a page of exercises.
#[must_use]
pub fn page(namespace: &str, limit: usize, offset: usize) -> String {
    format!("{}:page:{}:{}", namespace, limit, offset)
}

/// Generate a cache key for a name search.
///
/// The term is kept verbatim; `"Squat"` and `"squat"` are separate entries
/// even though the remote match ignores case.
#[must_use]
pub fn search(namespace: &str, term: &str, limit: usize) -> String {
    format!("{}:search:{}:{}", namespace, term, limit)
}

/// Generate a cache key for a single exercise by ID.
#[must_use]
pub fn by_id(namespace: &str, id: ExerciseId) -> String {
    format!("{}:id:{}", namespace, id)
}
