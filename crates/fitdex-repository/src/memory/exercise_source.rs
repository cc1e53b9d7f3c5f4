//! In-memory exercise source.

use crate::traits::ExerciseSource;
use async_trait::async_trait;
use fitdex_core::{Exercise, ExerciseId, FacetKind, FitdexError, FitdexResult};
use parking_lot::{Mutex, RwLock};
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info};

/// Exercise source backed by a process-local list.
///
/// Rows are kept sorted by id so the range and search semantics match the
/// Postgres source. Every `select_*` call is counted, which lets callers
/// observe how often the service layer actually went to the source.
#[derive(Debug, Default)]
pub struct InMemoryExerciseSource {
    exercises: RwLock<Vec<Exercise>>,
    queries: AtomicUsize,
    failure: Mutex<Option<FitdexError>>,
}

impl InMemoryExerciseSource {
    /// Creates a source holding the given exercises.
    #[must_use]
    pub fn new(mut exercises: Vec<Exercise>) -> Self {
        exercises.sort_by_key(|e| e.id);
        Self {
            exercises: RwLock::new(exercises),
            ..Self::default()
        }
    }

    /// Parses a JSON array of exercises.
    pub fn from_json(json: &str) -> FitdexResult<Self> {
        let exercises: Vec<Exercise> = serde_json::from_str(json)?;
        Ok(Self::new(exercises))
    }

    /// Loads a JSON array of exercises from a file.
    pub fn from_json_file(path: impl AsRef<Path>) -> FitdexResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            FitdexError::Configuration(format!("Failed to read seed file {}: {}", path.display(), e))
        })?;
        let source = Self::from_json(&json)?;
        info!("Seeded in-memory source with {} exercises from {}", source.len(), path.display());
        Ok(source)
    }

    /// Number of stored exercises.
    #[must_use]
    pub fn len(&self) -> usize {
        self.exercises.read().len()
    }

    /// Returns true if no exercises are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exercises.read().is_empty()
    }

    /// Inserts or replaces an exercise, as if the remote table had changed.
    pub fn upsert(&self, exercise: Exercise) {
        let mut exercises = self.exercises.write();
        match exercises.binary_search_by_key(&exercise.id, |e| e.id) {
            Ok(pos) => exercises[pos] = exercise,
            Err(pos) => exercises.insert(pos, exercise),
        }
    }

    /// Number of `select_*` calls served so far, failed ones included.
    #[must_use]
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    /// Makes every following query fail with `error` until [`Self::recover`].
    pub fn fail_with(&self, error: FitdexError) {
        *self.failure.lock() = Some(error);
    }

    /// Clears an injected failure.
    pub fn recover(&self) {
        *self.failure.lock() = None;
    }

    fn begin_query(&self) -> FitdexResult<()> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        match self.failure.lock().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ExerciseSource for InMemoryExerciseSource {
    async fn select_range(&self, start: usize, end: usize) -> FitdexResult<Vec<Exercise>> {
        debug!("Selecting exercises {}..={} from memory", start, end);
        self.begin_query()?;

        if end < start {
            return Ok(Vec::new());
        }
        Ok(self
            .exercises
            .read()
            .iter()
            .skip(start)
            .take((end - start).saturating_add(1))
            .cloned()
            .collect())
    }

    async fn select_name_ilike(&self, term: &str, limit: usize) -> FitdexResult<Vec<Exercise>> {
        debug!("Searching exercises by name in memory: {:?} (limit {})", term, limit);
        self.begin_query()?;

        Ok(self
            .exercises
            .read()
            .iter()
            .filter(|e| e.name_contains(term))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn select_by_id(&self, id: ExerciseId) -> FitdexResult<Vec<Exercise>> {
        debug!("Selecting exercise by id from memory: {}", id);
        self.begin_query()?;

        Ok(self
            .exercises
            .read()
            .iter()
            .filter(|e| e.id == id)
            .cloned()
            .collect())
    }

    async fn select_distinct(&self, kind: FacetKind) -> FitdexResult<Vec<String>> {
        debug!("Selecting distinct {} values from memory", kind);
        self.begin_query()?;

        let values: BTreeSet<String> = self
            .exercises
            .read()
            .iter()
            .filter_map(|e| e.facet_value(kind))
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect();
        Ok(values.into_iter().collect())
    }

    /// Reports an injected failure without counting as a query.
    async fn health_check(&self) -> FitdexResult<()> {
        match self.failure.lock().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
