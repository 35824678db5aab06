//! # Review Analyzer Runtime
//!
//! Stateful pieces of the review service.
//!
//! ## Core Components
//!
//! - **`ReviewStore`**: the shared, append-only review collection with
//!   consistent snapshots
//! - **Dataset**: loads the initial reviews from CSV at startup
//! - **Health**: readiness reporting for the store
//! - **Metrics**: Prometheus recorder and review counters
//!
//! ## Example
//!
//! ```ignore
//! use review_analyzer_runtime::{dataset, ReviewStore};
//!
//! let dataset = dataset::load_reviews_from_path("data/reviews.csv")?;
//! let store = ReviewStore::with_reviews(dataset.reviews);
//!
//! let snapshot = store.snapshot().await;
//! store.append(new_review).await;
//! ```

/// Initial dataset loading
pub mod dataset;

/// Health check types
pub mod health;

/// Prometheus metrics for observability
pub mod metrics;

/// The shared review store
pub mod store;

pub use dataset::{Dataset, DatasetError, load_reviews, load_reviews_from_path};
pub use health::{HealthCheck, HealthStatus};
pub use metrics::{MetricsError, MetricsRecorder, ReviewMetrics};
pub use store::{ReviewStore, Snapshot};
