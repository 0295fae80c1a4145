//! Configuration module for the execution stack.
//!
//! Loads a YAML file with environment variable interpolation. Every section
//! is optional and falls back to its defaults.
//!
//! # Usage
//!
//! ```rust,ignore
//! use execution_stack::config::load_config;
//!
//! // Load from default path (config.yaml)
//! let config = load_config(None)?;
//!
//! println!("wide spread threshold: {}", config.routing.wide_spread_bps);
//! ```
//!
//! # Example
//!
//! ```yaml
//! environment:
//!   mode: ${EXECUTION_MODE:-PAPER}
//! routing:
//!   wide_spread_bps: 15
//! retry:
//!   throttle:
//!     max_attempts: 4
//! telemetry:
//!   base_dir: /var/lib/execution-stack
//!   fsync: true
//! ```

mod environment;
mod execution;
mod observability;
mod telemetry;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::execution_tactics::SlicingConfig;
use crate::domain::market_impact::ImpactModelConfig;
use crate::domain::order_routing::RouterConfig;
use crate::domain::retry_policy::RetryConfig;

pub use environment::EnvironmentConfig;
pub use execution::ExecutionConfig;
pub use observability::{LogFormat, LoggingConfig, MetricsSettings, ObservabilityConfig};
pub use telemetry::TelemetryConfig;

/// Default configuration path.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Environment configuration.
    #[serde(default)]
    pub environment: EnvironmentConfig,
    /// Order router configuration.
    #[serde(default)]
    pub routing: RouterConfig,
    /// Slicing planner configuration.
    #[serde(default)]
    pub slicing: SlicingConfig,
    /// Impact model configuration.
    #[serde(default)]
    pub impact: ImpactModelConfig,
    /// Retry configuration for retryable buckets.
    #[serde(default)]
    pub retry: RetryConfig,
    /// Orchestrator timing.
    #[serde(default)]
    pub execution: ExecutionConfig,
    /// Telemetry stream configuration.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "config.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration, using defaults when the file does not exist.
///
/// # Errors
///
/// Returns a `ConfigError` if an existing file cannot be read, parsed, or
/// validated.
pub fn load_config_or_default(path: &str) -> Result<Config, ConfigError> {
    if Path::new(path).exists() {
        load_config(Some(path))
    } else {
        tracing::info!(path, "Config file not found, using defaults");
        Ok(Config::default())
    }
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = if interpolated.trim().is_empty() {
        Config::default()
    } else {
        serde_yaml_bw::from_str(&interpolated)?
    };
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match std::env::var(&cap[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let section = |name: &str, result: Result<(), String>| {
        result.map_err(|e| ConfigError::ValidationError(format!("{name}: {e}")))
    };

    section("routing", config.routing.validate())?;
    section(
        "slicing",
        config.slicing.validate().map_err(|e| e.to_string()),
    )?;
    section("impact", config.impact.validate())?;
    section("retry.transient", config.retry.transient.validate())?;
    section("retry.throttle", config.retry.throttle.validate())?;

    if config.execution.attempt_timeout_ms == 0 {
        return Err(ConfigError::ValidationError(
            "execution.attempt_timeout_ms must be positive".to_string(),
        ));
    }

    if config.telemetry.base_dir.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "telemetry.base_dir must not be empty".to_string(),
        ));
    }

    if config.observability.metrics.enabled
        && config
            .observability
            .metrics
            .listen_addr
            .parse::<std::net::SocketAddr>()
            .is_err()
    {
        return Err(ConfigError::ValidationError(format!(
            "observability.metrics.listen_addr is not a socket address: {}",
            config.observability.metrics.listen_addr
        )));
    }

    Ok(())
}
