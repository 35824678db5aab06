//! The dataset shipped in `data/` must load cleanly with the default config.

#![allow(clippy::unwrap_used)] // Tests can unwrap

use review_analyzer::{Config, build_state};
use std::path::PathBuf;

fn bundled_dataset() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../data/reviews.csv")
}

#[test]
fn bundled_dataset_has_no_skipped_rows() {
    let dataset = review_analyzer_runtime::load_reviews_from_path(bundled_dataset()).unwrap();

    assert!(!dataset.reviews.is_empty());
    assert!(dataset.skipped.is_empty(), "skipped: {:?}", dataset.skipped);
}

#[tokio::test]
async fn default_config_serves_bundled_dataset() {
    let path = bundled_dataset().to_string_lossy().into_owned();
    let config = Config::from_lookup(|key| match key {
        "DATASET_PATH" => Some(path.clone()),
        "METRICS_ENABLED" => Some("false".to_string()),
        _ => None,
    });

    let state = build_state(&config).unwrap();

    assert_eq!(state.store.len().await, 18);
}
