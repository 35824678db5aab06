//! Application state for Axum handlers.

use axum::extract::FromRef;
use metrics_exporter_prometheus::PrometheusHandle;
use review_analyzer_core::ReviewEnvironment;
use review_analyzer_runtime::ReviewStore;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// # Examples
///
/// ```ignore
/// let state = AppState::new(Arc::new(ReviewStore::with_reviews(dataset.reviews)), environment)
///     .with_metrics(recorder.handle().cloned());
/// let app = build_router(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    /// The shared review store
    pub store: Arc<ReviewStore>,
    /// Clock, id generator and sentiment scorer
    pub environment: ReviewEnvironment,
    /// Prometheus handle, when metrics are enabled
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create a new application state without metrics.
    #[must_use]
    pub const fn new(store: Arc<ReviewStore>, environment: ReviewEnvironment) -> Self {
        Self {
            store,
            environment,
            metrics: None,
        }
    }

    /// Attach a Prometheus handle to serve from `/metrics`.
    #[must_use]
    pub fn with_metrics(mut self, handle: Option<PrometheusHandle>) -> Self {
        self.metrics = handle;
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store)
            .field("environment", &self.environment)
            .field("metrics_enabled", &self.metrics.is_some())
            .finish()
    }
}

impl FromRef<AppState> for Arc<ReviewStore> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use review_analyzer_testing::{StubScorer, test_environment};

    #[test]
    fn test_state_is_clone() {
        // Ensure AppState implements Clone (required for Axum)
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn metrics_are_optional() {
        let state = AppState::new(Arc::new(ReviewStore::new()), test_environment(StubScorer::new()));
        assert!(state.metrics.is_none());
        assert!(state.with_metrics(None).metrics.is_none());
    }
}
