//! Tracing subscriber initialisation.
//!
//! The subscriber is built from an `EnvFilter`: `RUST_LOG` wins when set,
//! otherwise the configured level is applied to the whole process with
//! `fitdex` crates and `tower_http` raised to that same level.

#[cfg(feature = "telemetry")]
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::FitdexResult;
use serde::{Deserialize, Serialize};

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable, multi-field lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Tracing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TracingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl TracingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    #[must_use]
    pub fn default_directive(&self) -> String {
        let level = self.log_level.trim();
        if level.contains('=') || level.contains(',') {
            level.to_string()
        } else {
            format!("{level},fitdex={level},tower_http={level},sqlx=warn")
        }
    }
}

/// Installs the global tracing subscriber.
///
/// Fails if a global subscriber is already set.
#[cfg(feature = "telemetry")]
pub fn init_tracing(config: &TracingConfig) -> FitdexResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.default_directive()))
        .map_err(|e| crate::FitdexError::Configuration(format!("Invalid log filter: {e}")))?;

    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init(),
    };

    result.map_err(|e| crate::FitdexError::Internal(format!("Failed to install subscriber: {e}")))?;

    tracing::debug!(
        log_level = %config.log_level,
        format = ?config.format,
        "Tracing initialized"
    );

    Ok(())
}

/// Placeholder for when the telemetry feature is disabled.
#[cfg(not(feature = "telemetry"))]
pub fn init_tracing(_config: &TracingConfig) -> FitdexResult<()> {
    Ok(())
}
