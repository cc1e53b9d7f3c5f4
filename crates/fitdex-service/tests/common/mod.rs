//! Common fixtures for service integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use fitdex_core::{Exercise, ExerciseId, FacetKind, FitdexResult};
use fitdex_repository::{ExerciseSource, InMemoryExerciseSource};
use fitdex_service::{InMemoryExerciseCache, ManualClock};
use std::sync::Arc;
use std::time::Duration;

/// The three-row catalog used across the service tests.
pub fn seeded_source() -> Arc<InMemoryExerciseSource> {
    Arc::new(InMemoryExerciseSource::new(vec![
        Exercise::new(1, "Squat")
            .with_target_muscle_group("Quadriceps")
            .with_primary_equipment("Barbell"),
        Exercise::new(2, "Bench")
            .with_target_muscle_group("Chest")
            .with_primary_equipment("Barbell"),
        Exercise::new(3, "Row")
            .with_target_muscle_group("Back")
            .with_primary_equipment("Dumbbell"),
    ]))
}

/// A 60 second cache driven by a manual clock.
pub fn manual_cache() -> (Arc<InMemoryExerciseCache>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    let cache = Arc::new(InMemoryExerciseCache::new(Duration::from_secs(60)).with_clock(clock.clone()));
    (cache, clock)
}

/// Delays every query so concurrent callers overlap.
pub struct SlowSource {
    inner: Arc<InMemoryExerciseSource>,
    delay: Duration,
}

impl SlowSource {
    pub fn new(inner: Arc<InMemoryExerciseSource>, delay: Duration) -> Self {
        Self { inner, delay }
    }
}

#[async_trait]
impl ExerciseSource for SlowSource {
    async fn select_range(&self, start: usize, end: usize) -> FitdexResult<Vec<Exercise>> {
        tokio::time::sleep(self.delay).await;
        self.inner.select_range(start, end).await
    }

    async fn select_name_ilike(&self, term: &str, limit: usize) -> FitdexResult<Vec<Exercise>> {
        tokio::time::sleep(self.delay).await;
        self.inner.select_name_ilike(term, limit).await
    }

    async fn select_by_id(&self, id: ExerciseId) -> FitdexResult<Vec<Exercise>> {
        tokio::time::sleep(self.delay).await;
        self.inner.select_by_id(id).await
    }

    async fn select_distinct(&self, kind: FacetKind) -> FitdexResult<Vec<String>> {
        tokio::time::sleep(self.delay).await;
        self.inner.select_distinct(kind).await
    }

    fn name(&self) -> &'static str {
        "slow"
    }
}
