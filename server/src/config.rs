//! Configuration management for the review service.
//!
//! Loads configuration from environment variables with sensible defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,review_analyzer=debug,tower_http=debug";

/// Configuration that cannot be used as given.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `HOST` and `PORT` could not be resolved
    #[error("Invalid bind address {address}: {source}")]
    InvalidAddress {
        /// The `host:port` that failed
        address: String,
        /// Resolution failure
        #[source]
        source: std::io::Error,
    },

    /// `HOST` resolved to no addresses
    #[error("Bind address {address} resolved to nothing")]
    Unresolved {
        /// The `host:port` that failed
        address: String,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Initial dataset configuration
    pub dataset: DatasetConfig,
    /// Metrics configuration
    pub metrics: MetricsConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Log filter directives (trace, debug, info, warn, error, per target)
    pub log_level: String,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout: u64,
}

/// Dataset configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// CSV file loaded into the store at startup
    pub path: PathBuf,
}

/// Metrics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Install the Prometheus recorder and serve `/metrics`
    pub enabled: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparseable values fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            server: ServerConfig {
                host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: lookup("PORT")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(8000),
                log_level: lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
                shutdown_timeout: lookup("SHUTDOWN_TIMEOUT")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            },
            dataset: DatasetConfig {
                path: lookup("DATASET_PATH")
                    .map_or_else(|| PathBuf::from("data/reviews.csv"), PathBuf::from),
            },
            metrics: MetricsConfig {
                enabled: lookup("METRICS_ENABLED")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(true),
            },
        }
    }

    /// Address the HTTP server binds to.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `HOST` does not resolve.
    pub fn bind_address(&self) -> Result<SocketAddr, ConfigError> {
        let address = format!("{}:{}", self.server.host, self.server.port);
        (self.server.host.as_str(), self.server.port)
            .to_socket_addrs()
            .map_err(|source| ConfigError::InvalidAddress {
                address: address.clone(),
                source,
            })?
            .next()
            .ok_or(ConfigError::Unresolved { address })
    }

    /// How long in-flight requests may run after a shutdown signal.
    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.server.shutdown_timeout)
    }
}
