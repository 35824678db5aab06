//! Prometheus metrics for the review service.
//!
//! This module provides metric collection for:
//! - Review submissions (accepted and rejected, by reason)
//! - Review queries (count, result size, latency)
//!
//! # Example
//!
//! ```rust,no_run
//! use review_analyzer_runtime::metrics::MetricsRecorder;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut recorder = MetricsRecorder::new();
//! recorder.install()?;
//!
//! // Serve `recorder.render()` from a `/metrics` route
//! # Ok(())
//! # }
//! ```

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;
use thiserror::Error;

/// Errors from metrics operations.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Failed to build metrics exporter
    #[error("Failed to build metrics exporter: {0}")]
    Build(String),
    /// Failed to install metrics exporter
    #[error("Failed to install metrics exporter: {0}")]
    Install(String),
}

/// Installs the Prometheus recorder and renders its output.
///
/// Unlike a standalone exporter this does not bind a port; the web layer
/// serves [`MetricsRecorder::render`] from the main router.
#[derive(Default)]
pub struct MetricsRecorder {
    handle: Option<PrometheusHandle>,
}

impl MetricsRecorder {
    /// Create a recorder that is not installed yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { handle: None }
    }

    /// Register metric descriptions and install the global recorder.
    ///
    /// # Errors
    ///
    /// Returns error if the exporter cannot be built or installed.
    ///
    /// # Note
    ///
    /// If a recorder is already installed (e.g., in tests), this logs a
    /// warning and leaves [`MetricsRecorder::handle`] empty.
    pub fn install(&mut self) -> Result<(), MetricsError> {
        register_metrics();

        let builder = PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Suffix("duration_seconds".to_string()),
                &[0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0],
            )
            .map_err(|e| MetricsError::Build(e.to_string()))?;

        match builder.install_recorder() {
            Ok(handle) => {
                self.handle = Some(handle);
                tracing::info!("Prometheus metrics recorder installed");
                Ok(())
            }
            Err(e) => {
                let err_msg = e.to_string();
                if err_msg.contains("already initialized") {
                    tracing::warn!("Metrics recorder already initialized, skipping re-initialization");
                    Ok(())
                } else {
                    Err(MetricsError::Install(err_msg))
                }
            }
        }
    }

    /// Get the metrics handle for rendering.
    #[must_use]
    pub const fn handle(&self) -> Option<&PrometheusHandle> {
        self.handle.as_ref()
    }

    /// Render current metrics in Prometheus format.
    ///
    /// Returns `None` if the recorder was not installed by this instance.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        self.handle.as_ref().map(PrometheusHandle::render)
    }
}

fn register_metrics() {
    describe_counter!(
        "reviews_created_total",
        "Total number of reviews accepted and stored"
    );
    describe_counter!(
        "reviews_rejected_total",
        "Total number of review submissions rejected, by reason"
    );
    describe_counter!("review_queries_total", "Total number of review queries served");
    describe_histogram!(
        "review_query_results",
        "Number of reviews returned per query"
    );
    describe_histogram!(
        "review_query_duration_seconds",
        "Time taken to filter, score and rank a query"
    );
}

/// Review metrics recorder.
pub struct ReviewMetrics;

impl ReviewMetrics {
    /// Record an accepted submission.
    pub fn record_created() {
        counter!("reviews_created_total").increment(1);
    }

    /// Record a rejected submission.
    pub fn record_rejected(reason: &'static str) {
        counter!("reviews_rejected_total", "reason" => reason).increment(1);
    }

    /// Record a served query.
    #[allow(clippy::cast_precision_loss)]
    pub fn record_query(results: usize, duration: Duration) {
        counter!("review_queries_total").increment(1);
        histogram!("review_query_results").record(results as f64);
        histogram!("review_query_duration_seconds").record(duration.as_secs_f64());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn recorder_starts_uninstalled() {
        let recorder = MetricsRecorder::new();
        assert!(recorder.handle().is_none());
        assert!(recorder.render().is_none());
    }

    #[test]
    fn recorder_renders_review_metrics() {
        let mut recorder = MetricsRecorder::new();
        recorder.install().unwrap();

        ReviewMetrics::record_created();
        ReviewMetrics::record_rejected("invalid_location");
        ReviewMetrics::record_query(3, Duration::from_millis(2));

        // If another test already installed the global recorder, this
        // instance has no handle. Metrics are still recorded.
        if let Some(rendered) = recorder.render() {
            assert!(rendered.contains("reviews_created_total"));
            assert!(rendered.contains("reviews_rejected_total"));
            assert!(rendered.contains("review_queries_total"));
        }
    }
}
