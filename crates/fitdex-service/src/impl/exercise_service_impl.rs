//! Exercise service implementation.

use crate::cache::{cache_keys, CacheStats, ExerciseCacheStore, InMemoryExerciseCache, SingleFlight};
use crate::exercise_service::ExerciseService;
use crate::metrics::CacheMetrics;
use async_trait::async_trait;
use fitdex_config::CacheConfig;
use fitdex_core::{Exercise, ExerciseId, FitdexResult, PageRequest};
use fitdex_repository::ExerciseSource;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// The remote call behind a cache key, in owned form so it can outlive the
/// request that started it.
#[derive(Debug, Clone)]
enum RemoteQuery {
    Range { start: usize, end: usize },
    NameIlike { term: String, limit: usize },
    ById(ExerciseId),
}

impl RemoteQuery {
    const fn operation(&self) -> &'static str {
        match self {
            Self::Range { .. } => "fetch_page",
            Self::NameIlike { .. } => "search",
            Self::ById(_) => "get_by_id",
        }
    }

    async fn run(&self, source: &dyn ExerciseSource) -> FitdexResult<Vec<Exercise>> {
        match self {
            Self::Range { start, end } => source.select_range(*start, *end).await,
            Self::NameIlike { term, limit } => source.select_name_ilike(term, *limit).await,
            Self::ById(id) => source.select_by_id(*id).await,
        }
    }
}

/// Exercise service over an [`ExerciseSource`] and an [`ExerciseCacheStore`].
pub struct ExerciseServiceImpl {
    source: Arc<dyn ExerciseSource>,
    cache: Arc<dyn ExerciseCacheStore>,
    namespace: String,
    coalescer: Option<SingleFlight<Vec<Exercise>>>,
}

impl ExerciseServiceImpl {
    /// Creates a new exercise service with its own cache.
    #[must_use]
    pub fn new(source: Arc<dyn ExerciseSource>, cache: Arc<dyn ExerciseCacheStore>) -> Self {
        Self {
            source,
            cache,
            namespace: cache_keys::DEFAULT_NAMESPACE.to_string(),
            coalescer: None,
        }
    }

    /// Creates a service with an in-memory cache built from configuration.
    #[must_use]
    pub fn from_config(source: Arc<dyn ExerciseSource>, config: &CacheConfig) -> Self {
        let cache = Arc::new(InMemoryExerciseCache::from_config(config));
        Self::new(source, cache)
            .with_namespace(config.key_namespace.clone())
            .with_coalescing(config.coalesce_requests)
    }

    /// Sets the cache key namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Enables or disables sharing of identical in-flight remote calls.
    #[must_use]
    pub fn with_coalescing(mut self, enabled: bool) -> Self {
        self.coalescer = enabled.then(SingleFlight::new);
        self
    }

    /// Returns the cache this service reads and writes.
    #[must_use]
    pub fn cache(&self) -> Arc<dyn ExerciseCacheStore> {
        Arc::clone(&self.cache)
    }

    async fn cached(&self, key: String, query: RemoteQuery) -> FitdexResult<Vec<Exercise>> {
        let operation = query.operation();

        if let Some(records) = self.cache.get_fresh(&key) {
            debug!(operation, key = %key, count = records.len(), "Cache hit");
            CacheMetrics::hit(operation);
            return Ok(records);
        }

        debug!(operation, key = %key, "Cache miss");
        CacheMetrics::miss(operation);

        let fetch = Self::fetch_and_store(
            Arc::clone(&self.source),
            Arc::clone(&self.cache),
            key.clone(),
            query,
        );

        match &self.coalescer {
            Some(coalescer) => coalescer.run(&key, fetch).await,
            None => fetch.await,
        }
    }

    /// Runs the remote query and caches a successful result.
    ///
    /// Takes owned handles so the future is `'static` and can be shared
    /// between coalesced callers.
    async fn fetch_and_store(
        source: Arc<dyn ExerciseSource>,
        cache: Arc<dyn ExerciseCacheStore>,
        key: String,
        query: RemoteQuery,
    ) -> FitdexResult<Vec<Exercise>> {
        let operation = query.operation();
        CacheMetrics::remote_query(operation, source.name());
        let started = Instant::now();
        let result = query.run(source.as_ref()).await;
        let elapsed = started.elapsed();
        CacheMetrics::remote_latency(operation, source.name(), elapsed);

        match result {
            Ok(records) => {
                debug!(
                    operation,
                    key = %key,
                    count = records.len(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Remote query completed"
                );

                cache.put(&key, records.clone());
                CacheMetrics::entries(cache.len());
                Ok(records)
            }
            Err(e) => {
                CacheMetrics::remote_error(operation, e.error_code());
                warn!(operation, key = %key, error = %e, "Remote query failed");
                Err(e)
            }
        }
    }
}

#[async_trait]
impl ExerciseService for ExerciseServiceImpl {
    async fn fetch_page(&self, page: PageRequest) -> FitdexResult<Vec<Exercise>> {
        let Some((start, end)) = page.range() else {
            debug!("Zero-limit page requested, skipping source");
            return Ok(Vec::new());
        };

        let key = cache_keys::page(&self.namespace, page.limit, page.offset);
        self.cached(key, RemoteQuery::Range { start, end }).await
    }

    async fn search(&self, term: &str, limit: usize) -> FitdexResult<Vec<Exercise>> {
        if limit == 0 {
            debug!("Zero-limit search requested, skipping source");
            return Ok(Vec::new());
        }

        let key = cache_keys::search(&self.namespace, term, limit);
        let query = RemoteQuery::NameIlike {
            term: term.to_string(),
            limit,
        };
        self.cached(key, query).await
    }

    async fn get_by_id(&self, id: ExerciseId) -> FitdexResult<Option<Exercise>> {
        let key = cache_keys::by_id(&self.namespace, id);
        let records = self.cached(key, RemoteQuery::ById(id)).await?;
        Ok(records.into_iter().next())
    }

    fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
