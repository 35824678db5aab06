//! The in-memory review store.
//!
//! The store is the only shared mutable state in the service. Reviews live in
//! an `Arc<Vec<Review>>` behind a [`RwLock`]:
//!
//! - [`ReviewStore::snapshot`] takes the read lock just long enough to clone
//!   the `Arc`, so readers never block each other and the snapshot they get
//!   is frozen.
//! - [`ReviewStore::append`] takes the write lock and pushes through
//!   [`Arc::make_mut`]. If any snapshot is still alive the vector is copied
//!   first, so a published snapshot is never mutated.

use crate::health::HealthCheck;
use review_analyzer_core::Review;
use std::sync::Arc;
use tokio::sync::RwLock;

/// An immutable point-in-time view of the store, in insertion order.
pub type Snapshot = Arc<Vec<Review>>;

/// Component name reported by [`ReviewStore::health`].
pub const STORE_COMPONENT: &str = "review_store";

/// Thread-safe, append-only collection of reviews.
#[derive(Debug, Default)]
pub struct ReviewStore {
    reviews: RwLock<Snapshot>,
}

impl ReviewStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with `reviews`, kept in the given order.
    #[must_use]
    pub fn with_reviews(reviews: Vec<Review>) -> Self {
        Self {
            reviews: RwLock::new(Arc::new(reviews)),
        }
    }

    /// Take a consistent snapshot of every review.
    ///
    /// Later appends are not visible through the returned value.
    pub async fn snapshot(&self) -> Snapshot {
        Arc::clone(&*self.reviews.read().await)
    }

    /// Append one review at the end.
    ///
    /// Appends are serialized; concurrent snapshots observe the store either
    /// before or after the review was added.
    #[tracing::instrument(skip(self, review), fields(review_id = %review.id))]
    pub async fn append(&self, review: Review) {
        let mut reviews = self.reviews.write().await;
        Arc::make_mut(&mut *reviews).push(review);
        tracing::trace!(count = reviews.len(), "Review appended");
    }

    /// Number of stored reviews.
    pub async fn len(&self) -> usize {
        self.reviews.read().await.len()
    }

    /// Whether the store holds no reviews.
    pub async fn is_empty(&self) -> bool {
        self.reviews.read().await.is_empty()
    }

    /// Report store health.
    ///
    /// An empty store is degraded: it serves, but every query returns nothing.
    pub async fn health(&self) -> HealthCheck {
        let count = self.len().await;
        let check = if count == 0 {
            HealthCheck::degraded(STORE_COMPONENT, "Review store is empty")
        } else {
            HealthCheck::healthy(STORE_COMPONENT)
        };
        check.with_metadata("review_count", count.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::health::HealthStatus;
    use review_analyzer_testing::fixtures::review;
    use std::collections::HashSet;

    #[tokio::test]
    async fn append_keeps_insertion_order() {
        let store = ReviewStore::new();
        store.append(review("a", "Denver, Colorado", "2022-01-01 00:00:00")).await;
        store.append(review("b", "Denver, Colorado", "2021-01-01 00:00:00")).await;
        store.append(review("c", "Denver, Colorado", "2023-01-01 00:00:00")).await;

        let ids: Vec<_> = store
            .snapshot()
            .await
            .iter()
            .map(|r| r.id.to_string())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn snapshot_is_not_affected_by_later_appends() {
        let store = ReviewStore::with_reviews(vec![review(
            "seed",
            "Denver, Colorado",
            "2022-01-01 00:00:00",
        )]);

        let before = store.snapshot().await;
        store.append(review("new", "San Diego, California", "2022-02-01 00:00:00")).await;
        let after = store.snapshot().await;

        assert_eq!(before.len(), 1);
        assert_eq!(after.len(), 2);
        assert_eq!(after[1].id.as_str(), "new");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_appends_lose_nothing() {
        let store = Arc::new(ReviewStore::new());

        let handles: Vec<_> = (0..64)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    let _ = store.snapshot().await;
                    store
                        .append(review(
                            &format!("r{i}"),
                            "Denver, Colorado",
                            "2022-01-01 00:00:00",
                        ))
                        .await;
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.len(), 64);
        let unique: HashSet<_> = snapshot.iter().map(|r| r.id.clone()).collect();
        assert_eq!(unique.len(), 64);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn snapshots_during_appends_are_prefixes() {
        let store = Arc::new(ReviewStore::new());
        let writer = {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                for i in 0..200 {
                    store
                        .append(review(
                            &i.to_string(),
                            "Denver, Colorado",
                            "2022-01-01 00:00:00",
                        ))
                        .await;
                }
            })
        };

        for _ in 0..50 {
            let snapshot = store.snapshot().await;
            for (position, r) in snapshot.iter().enumerate() {
                assert_eq!(r.id.as_str(), position.to_string());
            }
            tokio::task::yield_now().await;
        }
        writer.await.unwrap();
        assert_eq!(store.len().await, 200);
    }

    #[test]
    fn store_is_usable_outside_a_runtime() {
        let store = ReviewStore::new();
        tokio_test::block_on(store.append(review("a", "San Diego, California", "2022-01-01 00:00:00")));
        let snapshot = tokio_test::block_on(store.snapshot());
        assert_eq!(snapshot[0].location.as_str(), "San Diego, California");
    }

    #[tokio::test]
    async fn health_reports_count() {
        let empty = ReviewStore::new();
        let check = empty.health().await;
        assert_eq!(check.status, HealthStatus::Degraded);
        assert_eq!(check.metadata["review_count"], "0");
        assert!(empty.is_empty().await);

        let seeded = ReviewStore::with_reviews(vec![review(
            "a",
            "Denver, Colorado",
            "2022-01-01 00:00:00",
        )]);
        let check = seeded.health().await;
        assert_eq!(check.status, HealthStatus::Healthy);
        assert_eq!(check.metadata["review_count"], "1");
    }
}
