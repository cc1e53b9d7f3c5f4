//! Configuration loader with layered sources.

use crate::{format_validation_errors, AppConfig, ConfigValidator};
use config::{Config, ConfigError, Environment, File};
use fitdex_core::FitdexError;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Environment variable prefix for overrides (`FITDEX_CACHE__TTL_SECS=30`).
pub const ENV_PREFIX: &str = "FITDEX";

/// Configuration loader with runtime refresh support.
#[derive(Clone)]
pub struct ConfigLoader {
    config: Arc<RwLock<AppConfig>>,
    config_dir: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Local overrides
    /// 4. Environment variables with `FITDEX_` prefix
    pub fn new(config_dir: impl Into<String>) -> Result<Self, FitdexError> {
        let config_dir = config_dir.into();
        let config = Self::load_config(&config_dir)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_dir,
        })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, FitdexError> {
        Self::new("./config")
    }

    /// Returns the current configuration.
    pub async fn get(&self) -> AppConfig {
        self.config.read().await.clone()
    }

    /// Reloads the configuration from disk.
    ///
    /// The previous configuration stays in place if the new one fails to
    /// load or validate.
    pub async fn reload(&self) -> Result<(), FitdexError> {
        let new_config = Self::load_config(&self.config_dir)?;
        let mut config = self.config.write().await;
        *config = new_config;
        info!("Configuration reloaded successfully");
        Ok(())
    }

    /// Loads configuration from the specified directory.
    fn load_config(config_dir: &str) -> Result<AppConfig, FitdexError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var("FITDEX_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = format!("{}/{}.toml", config_dir, name);
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_error_to_fitdex_error)?;

        let app_config: AppConfig = config
            .try_deserialize()
            .map_err(config_error_to_fitdex_error)?;

        Self::validate_config(&app_config)?;

        Ok(app_config)
    }

    /// Validates the configuration.
    fn validate_config(config: &AppConfig) -> Result<(), FitdexError> {
        ConfigValidator::validate(config)
            .map_err(|errors| FitdexError::Configuration(format_validation_errors(&errors)))?;

        if !config.source.kind.needs_database() && config.source.seed_path.is_none() {
            warn!("In-memory source has no seed_path; the catalog will be empty");
        }

        Ok(())
    }

    /// Gets a specific configuration value by key path.
    pub async fn get_value<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let config = self.config.read().await;
        let json = serde_json::to_value(&*config).ok()?;

        let mut current = &json;
        for part in key.split('.') {
            current = current.get(part)?;
        }

        serde_json::from_value(current.clone()).ok()
    }
}

fn config_error_to_fitdex_error(err: ConfigError) -> FitdexError {
    FitdexError::Configuration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FacetMode, SourceKind, ValidityPolicy};
    use std::fs;

    fn write(dir: &tempfile::TempDir, name: &str, contents: &str) {
        fs::write(dir.path().join(name), contents).unwrap();
    }

    fn dir_str(dir: &tempfile::TempDir) -> String {
        dir.path().to_string_lossy().into_owned()
    }

    #[tokio::test]
    async fn test_empty_dir_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ConfigLoader::new(dir_str(&dir)).unwrap();
        let config = loader.get().await;
        assert_eq!(config.cache.ttl_secs, 60);
        assert_eq!(config.server.port, 8080);
    }

    #[tokio::test]
    async fn test_local_overrides_default() {
        let dir = tempfile::tempdir().unwrap();
        write(
            &dir,
            "default.toml",
            r#"
[cache]
ttl_secs = 120
validity = "global_timestamp"

[source]
kind = "memory"
seed_path = "data/exercises.json"
"#,
        );
        write(
            &dir,
            "local.toml",
            r#"
[cache]
ttl_secs = 15

[facets]
mode = "static"
"#,
        );

        let loader = ConfigLoader::new(dir_str(&dir)).unwrap();
        let config = loader.get().await;
        assert_eq!(config.cache.ttl_secs, 15);
        assert_eq!(config.cache.validity, ValidityPolicy::GlobalTimestamp);
        assert_eq!(config.source.kind, SourceKind::Memory);
        assert_eq!(config.facets.mode, FacetMode::Static);
    }

    #[tokio::test]
    async fn test_invalid_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir, "default.toml", "[cache]\nttl_secs = 0\n");

        let err = ConfigLoader::new(dir_str(&dir)).err().unwrap();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
        assert!(err.to_string().contains("cache.ttl_secs"));
    }

    #[tokio::test]
    async fn test_reload_picks_up_changes() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir, "local.toml", "[cache]\nttl_secs = 30\n");
        let loader = ConfigLoader::new(dir_str(&dir)).unwrap();
        assert_eq!(loader.get().await.cache.ttl_secs, 30);

        write(&dir, "local.toml", "[cache]\nttl_secs = 90\n");
        loader.reload().await.unwrap();
        assert_eq!(loader.get().await.cache.ttl_secs, 90);
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_previous() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir, "local.toml", "[cache]\nttl_secs = 30\n");
        let loader = ConfigLoader::new(dir_str(&dir)).unwrap();

        write(&dir, "local.toml", "[cache]\nmax_entries = 0\n");
        assert!(loader.reload().await.is_err());
        assert_eq!(loader.get().await.cache.ttl_secs, 30);
    }

    #[tokio::test]
    async fn test_get_value_by_path() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ConfigLoader::new(dir_str(&dir)).unwrap();

        let ttl: Option<u64> = loader.get_value("cache.ttl_secs").await;
        assert_eq!(ttl, Some(60));

        let missing: Option<u64> = loader.get_value("cache.nope").await;
        assert!(missing.is_none());
    }
}
