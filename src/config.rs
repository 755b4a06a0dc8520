//! Runtime configuration.
//!
//! Every field has a default, so an empty TOML document is a valid
//! configuration. `DATABASE_URL` in the environment overrides
//! `database.url`.
//!
//! ```toml
//! [distribution]
//! default_strategy = "round_robin"
//! history_window = 10
//! category_match_mode = "scored"
//!
//! [distribution.retry]
//! max_attempts = 3
//! base_delay_ms = 500
//! backoff_factor = 2
//!
//! [query]
//! max_zip_codes = 50
//! max_search_chars = 64
//!
//! [saved_filters]
//! fetch_timeout_ms = 5000
//!
//! [database]
//! url = "postgres://localhost/leadhub"
//! pool_size = 4
//! ```

use crate::distribution::domain::{CategoryMatchMode, DistributionStrategy};
use crate::lead::query::QueryLimits;
use crate::retry::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variable overriding [`DatabaseConfig::url`].
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadhubConfig {
    /// Distribution behaviour.
    pub distribution: DistributionConfig,
    /// Lead query validation limits.
    pub query: QueryLimits,
    /// Saved filter fetch behaviour.
    pub saved_filters: SavedFilterConfig,
    /// Database connection.
    pub database: DatabaseConfig,
}

/// Distribution behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistributionConfig {
    /// Strategy used when neither the run nor the settings name one.
    pub default_strategy: DistributionStrategy,
    /// Retry policy around provider selection.
    pub retry: RetryPolicy,
    /// History rows inspected by the round-robin fallback.
    pub history_window: usize,
    /// Category matching variant.
    pub category_match_mode: CategoryMatchMode,
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            default_strategy: DistributionStrategy::RoundRobin,
            retry: RetryPolicy::default(),
            history_window: 10,
            category_match_mode: CategoryMatchMode::default(),
        }
    }
}

/// Saved filter fetch behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavedFilterConfig {
    /// Upper bound on the whole list call, retries included.
    pub fetch_timeout_ms: u64,
    /// Retry policy for the list call.
    pub retry: RetryPolicy,
}

impl SavedFilterConfig {
    /// Returns the fetch timeout.
    #[must_use]
    pub const fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}

impl Default for SavedFilterConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_ms: 5_000,
            retry: RetryPolicy::default(),
        }
    }
}

/// Database connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: Option<String>,
    /// Maximum pooled connections.
    pub pool_size: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            pool_size: 4,
        }
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration file {}: {source}", path.display())]
    Read {
        /// File that was read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration is not valid TOML for this schema.
    #[error("failed to parse configuration: {0}")]
    Parse(#[source] Box<toml::de::Error>),
}

impl LeadhubConfig {
    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown values.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|err| ConfigError::Parse(Box::new(err)))
    }

    /// Loads configuration from an optional file and the environment.
    ///
    /// Without a path the defaults are used.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(file) => {
                let raw = std::fs::read_to_string(file).map_err(|source| ConfigError::Read {
                    path: file.to_path_buf(),
                    source,
                })?;
                Self::from_toml_str(&raw)?
            }
            None => Self::default(),
        };
        Ok(base.with_database_url(std::env::var(DATABASE_URL_ENV).ok()))
    }

    /// Replaces the database URL when `url` is present and non-blank.
    #[must_use]
    pub fn with_database_url(mut self, url: Option<String>) -> Self {
        if let Some(value) = url.filter(|candidate| !candidate.trim().is_empty()) {
            self.database.url = Some(value);
        }
        self
    }
}
