//! Configuration validation module.
//!
//! Checks every section and collects all problems at once, so a bad
//! deployment fails at startup with the full list.

use crate::AppConfig;
use fitdex_core::validation::rules;
use std::fmt;
use std::net::SocketAddr;
use url::Url;

/// Configuration validation error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// Port number is invalid (must be 1-65535).
    InvalidPort { name: String, value: u16 },
    /// Pool size configuration is invalid (min must be <= max).
    InvalidPoolSize { min: u32, max: u32 },
    /// Pool size exceeds maximum allowed.
    PoolSizeTooLarge { value: u32, maximum: u32 },
    /// URL or address format is invalid.
    InvalidUrl { url_type: String, message: String },
    /// Timeout or TTL value must be positive.
    NonPositiveTimeout { name: String, value: u64 },
    /// Cache capacity must be positive when set.
    ZeroCapacity,
    /// Cache key namespace is blank or contains the key separator.
    InvalidNamespace { value: String },
    /// Table name is not a plain SQL identifier.
    InvalidTableName { value: String },
    /// A configured facet override list is empty.
    EmptyFacetList { name: String },
    /// Log level is invalid.
    InvalidLogLevel { value: String },
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPort { name, value } => {
                write!(f, "Invalid port for {}: {} (must be 1-65535)", name, value)
            }
            Self::InvalidPoolSize { min, max } => {
                write!(
                    f,
                    "Invalid pool size: min ({}) cannot be greater than max ({})",
                    min, max
                )
            }
            Self::PoolSizeTooLarge { value, maximum } => {
                write!(f, "Pool size {} exceeds maximum allowed ({})", value, maximum)
            }
            Self::InvalidUrl { url_type, message } => {
                write!(f, "Invalid {} URL: {}", url_type, message)
            }
            Self::NonPositiveTimeout { name, value } => {
                write!(f, "Timeout '{}' must be positive, got {}", name, value)
            }
            Self::ZeroCapacity => {
                write!(f, "cache.max_entries must be at least 1 when set")
            }
            Self::InvalidNamespace { value } => {
                write!(
                    f,
                    "Invalid cache key namespace: '{}' (must be non-blank and contain no ':')",
                    value
                )
            }
            Self::InvalidTableName { value } => {
                write!(f, "Invalid source table name: '{}'", value)
            }
            Self::EmptyFacetList { name } => {
                write!(f, "Facet override '{}' must not be empty", name)
            }
            Self::InvalidLogLevel { value } => {
                write!(
                    f,
                    "Invalid log level: '{}' (valid: trace, debug, info, warn, error)",
                    value
                )
            }
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Result of configuration validation containing all errors found.
#[derive(Debug, Default)]
struct ValidationResult {
    errors: Vec<ConfigValidationError>,
}

impl ValidationResult {
    fn add_error(&mut self, error: ConfigValidationError) {
        self.errors.push(error);
    }

    fn into_result(self) -> Result<(), Vec<ConfigValidationError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Maximum connection pool size.
    const MAX_POOL_SIZE: u32 = 1000;
    /// Valid log levels.
    const VALID_LOG_LEVELS: &'static [&'static str] = &["trace", "debug", "info", "warn", "error"];

    /// Validates the entire application configuration.
    ///
    /// Returns Ok(()) if valid, or Err with all validation errors found.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut result = ValidationResult::default();

        Self::validate_server(&config.server, &mut result);
        if config.source.kind.needs_database() {
            Self::validate_database(&config.database, &mut result);
        }
        Self::validate_source(&config.source, &mut result);
        Self::validate_cache(&config.cache, &mut result);
        Self::validate_facets(&config.facets, &mut result);
        Self::validate_observability(&config.observability, &mut result);

        result.into_result()
    }

    fn validate_server(config: &crate::ServerConfig, result: &mut ValidationResult) {
        if config.port == 0 {
            result.add_error(ConfigValidationError::InvalidPort {
                name: "server.port".to_string(),
                value: config.port,
            });
        }

        if config.request_timeout_secs == 0 {
            result.add_error(ConfigValidationError::NonPositiveTimeout {
                name: "server.request_timeout_secs".to_string(),
                value: 0,
            });
        }
    }

    fn validate_database(config: &crate::DatabaseConfig, result: &mut ValidationResult) {
        if config.url.is_empty() {
            result.add_error(ConfigValidationError::InvalidUrl {
                url_type: "database".to_string(),
                message: "URL cannot be empty".to_string(),
            });
        } else {
            match Url::parse(&config.url) {
                Ok(url) if matches!(url.scheme(), "postgres" | "postgresql") => {}
                Ok(_) => result.add_error(ConfigValidationError::InvalidUrl {
                    url_type: "database".to_string(),
                    message: "URL must start with postgres:// or postgresql://".to_string(),
                }),
                Err(e) => result.add_error(ConfigValidationError::InvalidUrl {
                    url_type: "database".to_string(),
                    message: e.to_string(),
                }),
            }
        }

        if config.min_connections > config.max_connections {
            result.add_error(ConfigValidationError::InvalidPoolSize {
                min: config.min_connections,
                max: config.max_connections,
            });
        }
        if config.max_connections > Self::MAX_POOL_SIZE {
            result.add_error(ConfigValidationError::PoolSizeTooLarge {
                value: config.max_connections,
                maximum: Self::MAX_POOL_SIZE,
            });
        }

        if config.connect_timeout_secs == 0 {
            result.add_error(ConfigValidationError::NonPositiveTimeout {
                name: "database.connect_timeout_secs".to_string(),
                value: 0,
            });
        }
        if config.idle_timeout_secs == 0 {
            result.add_error(ConfigValidationError::NonPositiveTimeout {
                name: "database.idle_timeout_secs".to_string(),
                value: 0,
            });
        }
    }

    fn validate_source(config: &crate::SourceConfig, result: &mut ValidationResult) {
        if rules::valid_table_name(&config.table).is_err() {
            result.add_error(ConfigValidationError::InvalidTableName {
                value: config.table.clone(),
            });
        }
    }

    fn validate_cache(config: &crate::CacheConfig, result: &mut ValidationResult) {
        if config.ttl_secs == 0 {
            result.add_error(ConfigValidationError::NonPositiveTimeout {
                name: "cache.ttl_secs".to_string(),
                value: 0,
            });
        }

        if config.max_entries == Some(0) {
            result.add_error(ConfigValidationError::ZeroCapacity);
        }

        if rules::not_blank(&config.key_namespace).is_err() || config.key_namespace.contains(':') {
            result.add_error(ConfigValidationError::InvalidNamespace {
                value: config.key_namespace.clone(),
            });
        }
    }

    fn validate_facets(config: &crate::FacetsConfig, result: &mut ValidationResult) {
        let overrides = [
            ("facets.muscle_groups", &config.muscle_groups),
            ("facets.equipment", &config.equipment),
        ];
        for (name, list) in overrides {
            if list.as_ref().is_some_and(Vec::is_empty) {
                result.add_error(ConfigValidationError::EmptyFacetList {
                    name: name.to_string(),
                });
            }
        }
    }

    fn validate_observability(config: &crate::ObservabilityConfig, result: &mut ValidationResult) {
        // Full directives (`info,fitdex_service=debug`) are accepted as-is;
        // bare segments must be a known level.
        let bad_level = config
            .log_level
            .split(',')
            .map(str::trim)
            .filter(|segment| !segment.contains('='))
            .any(|segment| !Self::VALID_LOG_LEVELS.contains(&segment.to_lowercase().as_str()));
        if bad_level {
            result.add_error(ConfigValidationError::InvalidLogLevel {
                value: config.log_level.clone(),
            });
        }

        if config.metrics_enabled && config.metrics_addr.parse::<SocketAddr>().is_err() {
            result.add_error(ConfigValidationError::InvalidUrl {
                url_type: "metrics_addr".to_string(),
                message: format!("Invalid socket address: {}", config.metrics_addr),
            });
        }
    }
}

/// Formats validation errors for display.
#[must_use]
pub fn format_validation_errors(errors: &[ConfigValidationError]) -> String {
    let mut output = String::from("Configuration validation failed:\n");
    for (i, error) in errors.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, error));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SourceKind;

    fn errors_of(config: &AppConfig) -> Vec<ConfigValidationError> {
        ConfigValidator::validate(config).unwrap_err()
    }

    #[test]
    fn test_default_config_passes() {
        assert!(ConfigValidator::validate(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let mut config = AppConfig::default();
        config.cache.ttl_secs = 0;

        let errors = errors_of(&config);
        assert!(errors.iter().any(|e| matches!(
            e,
            ConfigValidationError::NonPositiveTimeout { name, .. } if name == "cache.ttl_secs"
        )));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let mut config = AppConfig::default();
        config.cache.max_entries = Some(0);
        assert!(errors_of(&config).contains(&ConfigValidationError::ZeroCapacity));

        config.cache.max_entries = Some(1);
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_namespace_with_separator_rejected() {
        let mut config = AppConfig::default();
        config.cache.key_namespace = "ex:ercises".to_string();
        assert!(errors_of(&config)
            .iter()
            .any(|e| matches!(e, ConfigValidationError::InvalidNamespace { .. })));
    }

    #[test]
    fn test_empty_database_url_rejected_for_postgres() {
        let mut config = AppConfig::default();
        config.database.url = String::new();

        let errors = errors_of(&config);
        assert!(errors.iter().any(|e| matches!(
            e,
            ConfigValidationError::InvalidUrl { url_type, .. } if url_type == "database"
        )));
    }

    #[test]
    fn test_database_ignored_for_memory_source() {
        let mut config = AppConfig::default();
        config.source.kind = SourceKind::Memory;
        config.database.url = String::new();
        config.database.min_connections = 50;
        config.database.max_connections = 1;

        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_non_postgres_url_rejected() {
        let mut config = AppConfig::default();
        config.database.url = "mysql://localhost/fitdex".to_string();
        assert_eq!(errors_of(&config).len(), 1);
    }

    #[test]
    fn test_invalid_pool_size() {
        let mut config = AppConfig::default();
        config.database.min_connections = 100;
        config.database.max_connections = 10;

        let errors = errors_of(&config);
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigValidationError::InvalidPoolSize { .. })));
    }

    #[test]
    fn test_invalid_table_name() {
        let mut config = AppConfig::default();
        config.source.table = "exercises; drop table users".to_string();

        let errors = errors_of(&config);
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigValidationError::InvalidTableName { .. })));
    }

    #[test]
    fn test_empty_facet_override_rejected() {
        let mut config = AppConfig::default();
        config.facets.equipment = Some(Vec::new());

        let errors = errors_of(&config);
        assert!(errors.iter().any(|e| matches!(
            e,
            ConfigValidationError::EmptyFacetList { name } if name == "facets.equipment"
        )));
    }

    #[test]
    fn test_log_level_directives() {
        let mut config = AppConfig::default();
        config.observability.log_level = "info,fitdex_service=trace".to_string();
        assert!(ConfigValidator::validate(&config).is_ok());

        config.observability.log_level = "loud".to_string();
        assert!(errors_of(&config)
            .iter()
            .any(|e| matches!(e, ConfigValidationError::InvalidLogLevel { .. })));
    }

    #[test]
    fn test_metrics_addr_checked_when_enabled() {
        let mut config = AppConfig::default();
        config.observability.metrics_addr = "not an address".to_string();
        assert!(ConfigValidator::validate(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_multiple_errors() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        config.cache.ttl_secs = 0;
        config.cache.max_entries = Some(0);

        assert!(errors_of(&config).len() >= 3);
    }

    #[test]
    fn test_format_validation_errors() {
        let errors = vec![
            ConfigValidationError::ZeroCapacity,
            ConfigValidationError::InvalidPort {
                name: "server.port".to_string(),
                value: 0,
            },
        ];

        let output = format_validation_errors(&errors);
        assert!(output.contains("max_entries"));
        assert!(output.contains("Invalid port"));
    }
}
