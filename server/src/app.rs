//! Wiring the service together and running it.

use crate::config::Config;
use anyhow::Context;
use review_analyzer_core::ReviewEnvironment;
use review_analyzer_runtime::{MetricsRecorder, ReviewStore, load_reviews_from_path};
use review_analyzer_sentiment::LexiconScorer;
use review_analyzer_web::{AppState, build_router};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::oneshot;
use tracing::{error, info, warn};

/// Build the application state: load the dataset, wire the production
/// environment and, if enabled, install the metrics recorder.
///
/// # Errors
///
/// Fails when the dataset cannot be loaded or the recorder cannot be
/// installed.
pub fn build_state(config: &Config) -> anyhow::Result<AppState> {
    let dataset =
        load_reviews_from_path(&config.dataset.path).context("Failed to load initial dataset")?;
    if !dataset.skipped.is_empty() {
        warn!(skipped = dataset.skipped.len(), "Some dataset rows were skipped");
    }

    let store = Arc::new(ReviewStore::with_reviews(dataset.reviews));
    let environment = ReviewEnvironment::production(Arc::new(LexiconScorer::new()));
    let mut state = AppState::new(store, environment);

    if config.metrics.enabled {
        let mut recorder = MetricsRecorder::new();
        recorder
            .install()
            .context("Failed to install metrics recorder")?;
        state = state.with_metrics(recorder.handle().cloned());
    }

    Ok(state)
}

/// Serve the router on `listener` until `shutdown` resolves.
///
/// After `shutdown` resolves, in-flight requests get `grace` to finish;
/// connections still open after that are dropped.
///
/// # Errors
///
/// Returns the I/O error that stopped the server.
pub async fn serve<F>(
    listener: TcpListener,
    state: AppState,
    shutdown: F,
    grace: Duration,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (signalled_tx, signalled_rx) = oneshot::channel::<()>();
    let server = axum::serve(listener, build_router(state)).with_graceful_shutdown(async move {
        shutdown.await;
        let _ = signalled_tx.send(());
    });

    let deadline = async move {
        if signalled_rx.await.is_ok() {
            tokio::time::sleep(grace).await;
        } else {
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        result = server.into_future() => result,
        () = deadline => {
            warn!(timeout_secs = grace.as_secs(), "Shutdown timeout elapsed, dropping open connections");
            Ok(())
        }
    }
}

/// Run the service with the given configuration until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Fails when startup fails (dataset, metrics, bind) or the server stops
/// with an I/O error.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let state = build_state(&config)?;
    let reviews = state.store.len().await;

    let address = config.bind_address()?;
    let listener = TcpListener::bind(address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!(%address, reviews, metrics = config.metrics.enabled, "Server listening");

    serve(listener, state, shutdown_signal(), config.shutdown_timeout()).await?;

    info!("Server stopped");
    Ok(())
}

/// Graceful shutdown signal handler.
///
/// Waits for:
/// - Ctrl+C (SIGINT)
/// - SIGTERM (in production environments)
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        () = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}
