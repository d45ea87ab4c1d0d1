// ABOUTME: Environment configuration for the analytics server deployment
// ABOUTME: Parses ports, snapshot location, clustering settings and CORS origins from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepcoin Wellness

//! Environment-based configuration management

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::{self, Display};
use std::path::PathBuf;
use std::str::FromStr;
use stepcoin_analytics::{AnalyticsConfig, CentroidInit};
use stepcoin_core::constants::{clustering, service};
use stepcoin_core::errors::{AppError, AppResult};
use tracing::info;

/// Environment type for logging and deployment decisions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Clustering settings the server exposes through the environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsSettings {
    /// Seed for centroid initialization
    pub seed: u64,
    /// Lloyd iteration cap
    pub max_iterations: usize,
    /// Centroid initialization strategy
    pub init: CentroidInit,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            seed: clustering::DEFAULT_SEED,
            max_iterations: clustering::DEFAULT_MAX_ITERATIONS,
            init: CentroidInit::default(),
        }
    }
}

impl AnalyticsSettings {
    /// Build the analytics configuration, everything else at its defaults
    #[must_use]
    pub fn to_analytics_config(&self) -> AnalyticsConfig {
        let mut config = AnalyticsConfig::default()
            .with_seed(self.seed)
            .with_init(self.init);
        config.clustering.max_iterations = self.max_iterations;
        config
    }
}

/// CORS configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated allowed origins, or `*`
    pub allowed_origins: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: "*".to_owned(),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Location of the users CSV snapshot
    pub users_csv_path: PathBuf,
    /// Deployment environment
    pub environment: Environment,
    /// Log filter directive (`RUST_LOG`)
    pub log_level: String,
    /// Clustering settings
    pub analytics: AnalyticsSettings,
    /// CORS settings
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: service::DEFAULT_HTTP_PORT,
            users_csv_path: PathBuf::from(service::DEFAULT_USERS_CSV),
            environment: Environment::default(),
            log_level: "info".to_owned(),
            analytics: AnalyticsSettings::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a `ConfigInvalid` error when a variable is set but cannot be parsed
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        let init = env_var_or("ANALYTICS_CLUSTER_INIT", "seeded");
        let config = Self {
            http_port: parse_env("HTTP_PORT", service::DEFAULT_HTTP_PORT)?,
            users_csv_path: PathBuf::from(env_var_or("USERS_CSV_PATH", service::DEFAULT_USERS_CSV)),
            environment: Environment::from_str_or_default(&env_var_or("ENVIRONMENT", "development")),
            log_level: env_var_or("RUST_LOG", "info"),
            analytics: AnalyticsSettings {
                seed: parse_env("ANALYTICS_SEED", clustering::DEFAULT_SEED)?,
                max_iterations: parse_env(
                    "ANALYTICS_MAX_ITERATIONS",
                    clustering::DEFAULT_MAX_ITERATIONS,
                )?,
                init: init.parse().map_err(|e| {
                    AppError::config_invalid(format!("Invalid ANALYTICS_CLUSTER_INIT value: {e}"))
                })?,
            },
            cors: CorsConfig {
                allowed_origins: env_var_or("CORS_ALLOWED_ORIGINS", "*"),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate values that parse but make no sense
    ///
    /// # Errors
    ///
    /// Returns a `ConfigInvalid` error describing the offending value
    pub fn validate(&self) -> AppResult<()> {
        self.analytics
            .to_analytics_config()
            .validate()
            .map_err(AppError::from)
    }

    /// Analytics configuration derived from these settings
    #[must_use]
    pub fn analytics_config(&self) -> AnalyticsConfig {
        self.analytics.to_analytics_config()
    }

    /// Human-readable configuration summary for startup logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Stepcoin Server Configuration:\n\
             - HTTP Port: {}\n\
             - Environment: {}\n\
             - Log Level: {}\n\
             - Users CSV: {}\n\
             - Clustering: seed={} max_iterations={} init={:?}\n\
             - CORS Origins: {}",
            self.http_port,
            self.environment,
            self.log_level,
            self.users_csv_path.display(),
            self.analytics.seed,
            self.analytics.max_iterations,
            self.analytics.init,
            self.cors.allowed_origins,
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse an environment variable, falling back to `default` when unset
fn parse_env<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|e| {
            AppError::config_invalid(format!("Invalid {key} value '{raw}': {e}"))
        }),
        Err(_) => Ok(default),
    }
}
