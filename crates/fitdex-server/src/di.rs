//! Dependency wiring.
//!
//! Every component is built once from [`AppConfig`] and shared through
//! `Arc<dyn Trait>` handles:
//!
//! ```text
//! AppContainer
//! ├── source            Arc<dyn ExerciseSource>   (Postgres or in-memory)
//! ├── exercise_service  Arc<dyn ExerciseService>  (cache + source)
//! └── facet_provider    Arc<dyn FacetProvider>    (static or derived)
//! ```

use fitdex_config::{AppConfig, SourceKind};
use fitdex_core::FitdexResult;
use fitdex_repository::{
    create_pool, DatabasePool, DatabasePoolInterface, ExerciseSource, InMemoryExerciseSource,
    PgExerciseSource,
};
use fitdex_rest::AppState;
use fitdex_service::{ExerciseService, ExerciseServiceImpl, FacetProvider, FacetProviderImpl};
use std::sync::Arc;
use tracing::{info, warn};

/// Application components resolved from configuration.
pub struct AppContainer {
    source: Arc<dyn ExerciseSource>,
    exercise_service: Arc<dyn ExerciseService>,
    facet_provider: Arc<dyn FacetProvider>,
    pool: Option<Arc<DatabasePool>>,
}

impl AppContainer {
    /// Connects the configured source and builds the services on top of it.
    pub async fn build(config: &AppConfig) -> FitdexResult<Self> {
        let (source, pool) = build_source(config).await?;
        let mut container = Self::with_source(source, config);
        container.pool = pool;
        Ok(container)
    }

    /// Builds the services over an already constructed source.
    pub fn with_source(source: Arc<dyn ExerciseSource>, config: &AppConfig) -> Self {
        let exercise_service: Arc<dyn ExerciseService> = Arc::new(ExerciseServiceImpl::from_config(
            Arc::clone(&source),
            &config.cache,
        ));
        let facet_provider: Arc<dyn FacetProvider> = Arc::new(FacetProviderImpl::from_config(
            Arc::clone(&source),
            &config.facets,
        ));

        info!(
            source = source.name(),
            ttl_secs = config.cache.ttl_secs,
            validity = %config.cache.validity,
            facets = %config.facets.mode,
            "Services wired"
        );

        Self {
            source,
            exercise_service,
            facet_provider,
            pool: None,
        }
    }

    /// The exercise source.
    pub fn source(&self) -> Arc<dyn ExerciseSource> {
        Arc::clone(&self.source)
    }

    /// The cached exercise service.
    pub fn exercise_service(&self) -> Arc<dyn ExerciseService> {
        Arc::clone(&self.exercise_service)
    }

    /// The facet provider.
    pub fn facet_provider(&self) -> Arc<dyn FacetProvider> {
        Arc::clone(&self.facet_provider)
    }

    /// Handler state for the REST router.
    pub fn app_state(&self) -> AppState {
        AppState::new(self.exercise_service(), self.facet_provider()).with_source(self.source())
    }

    /// Releases external resources.
    pub async fn shutdown(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}

async fn build_source(
    config: &AppConfig,
) -> FitdexResult<(Arc<dyn ExerciseSource>, Option<Arc<DatabasePool>>)> {
    match config.source.kind {
        SourceKind::Postgres => {
            let pool = create_pool(&config.database).await?;
            if config.database.run_migrations {
                pool.run_migrations().await?;
            }

            let source = PgExerciseSource::new(pool.clone(), config.source.table.clone());
            info!("Using Postgres exercise source (table {})", source.table());
            Ok((Arc::new(source), Some(pool)))
        }
        SourceKind::Memory => {
            let source = match &config.source.seed_path {
                Some(path) => InMemoryExerciseSource::from_json_file(path)?,
                None => {
                    warn!("In-memory source has no seed file; the catalog is empty");
                    InMemoryExerciseSource::default()
                }
            };
            info!("Using in-memory exercise source ({} exercises)", source.len());
            Ok((Arc::new(source), None))
        }
    }
}
