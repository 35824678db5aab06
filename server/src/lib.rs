//! # Review Analyzer
//!
//! HTTP service that stores customer reviews in memory and serves them
//! filtered by location and date, ranked by sentiment.
//!
//! The binary loads [`config::Config`] from the environment, seeds the store
//! from a CSV dataset and serves the router from `review-analyzer-web` until
//! it receives Ctrl+C or SIGTERM.

pub mod app;
pub mod config;

pub use app::{build_state, run, serve, shutdown_signal};
pub use config::{Config, ConfigError};
