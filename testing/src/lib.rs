//! # Review Analyzer Testing
//!
//! Testing utilities and helpers for the review service.
//!
//! This crate provides:
//! - Deterministic implementations of the environment traits
//! - A stub sentiment scorer with scripted scores
//! - Review fixtures
//!
//! ## Example
//!
//! ```ignore
//! use review_analyzer_testing::{fixtures, test_environment, StubScorer};
//!
//! let scorer = StubScorer::new().with_score("Great service!", 0.8);
//! let env = test_environment(scorer);
//! let store = ReviewStore::with_reviews(fixtures::sample_reviews());
//! ```

use review_analyzer_core::ReviewEnvironment;
use std::sync::Arc;

/// Mock implementations of Environment traits
pub mod mocks {
    use chrono::{NaiveDate, NaiveDateTime};
    use review_analyzer_core::{Clock, IdGenerator, ReviewId, SentimentScore, SentimentScorer};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use review_analyzer_testing::mocks::test_clock;
    /// use review_analyzer_core::Clock;
    ///
    /// let clock = test_clock();
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: NaiveDateTime,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: NaiveDateTime) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> NaiveDateTime {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 12:00:00)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp is invalid,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            NaiveDate::from_ymd_opt(2025, 1, 1)
                .and_then(|date| date.and_hms_opt(12, 0, 0))
                .expect("hardcoded timestamp should always be valid"),
        )
    }

    /// Produces `review-1`, `review-2`, ... in call order.
    #[derive(Debug, Default)]
    pub struct SequentialIdGenerator {
        next: AtomicU64,
    }

    impl SequentialIdGenerator {
        /// Create a generator starting at `review-1`
        #[must_use]
        pub const fn new() -> Self {
            Self {
                next: AtomicU64::new(1),
            }
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn next_id(&self) -> ReviewId {
            let id = self.next.fetch_add(1, Ordering::SeqCst);
            ReviewId::new(format!("review-{id}"))
        }
    }

    /// Scorer returning scripted compound scores by exact text.
    ///
    /// Unscripted text scores as neutral. Every call is counted so tests can
    /// check how many reviews were scored.
    #[derive(Debug, Default)]
    pub struct StubScorer {
        scores: HashMap<String, f64>,
        calls: AtomicUsize,
    }

    impl StubScorer {
        /// Create a scorer with no scripted scores
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Script the compound score for `text`
        #[must_use]
        pub fn with_score(mut self, text: impl Into<String>, compound: f64) -> Self {
            self.scores.insert(text.into(), compound);
            self
        }

        /// How many times `score` has been called
        #[must_use]
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl SentimentScorer for StubScorer {
        fn score(&self, text: &str) -> SentimentScore {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.scores.get(text) {
                Some(&compound) if compound > 0.0 => SentimentScore {
                    neg: 0.0,
                    neu: 1.0 - compound,
                    pos: compound,
                    compound,
                },
                Some(&compound) if compound < 0.0 => SentimentScore {
                    neg: -compound,
                    neu: 1.0 + compound,
                    pos: 0.0,
                    compound,
                },
                _ => SentimentScore::NEUTRAL,
            }
        }
    }
}

/// Review fixtures
pub mod fixtures {
    use review_analyzer_core::{Location, Review, ReviewId, Timestamp};

    /// Build a review whose body is `"review <id>"`.
    ///
    /// # Panics
    ///
    /// Panics if `location` is not an allowed location or `timestamp` is not
    /// `YYYY-MM-DD HH:MM:SS`.
    #[must_use]
    pub fn review(id: &str, location: &str, timestamp: &str) -> Review {
        review_with_body(id, &format!("review {id}"), location, timestamp)
    }

    /// Build a review with an explicit body.
    ///
    /// # Panics
    ///
    /// Panics if `location` is not an allowed location or `timestamp` is not
    /// `YYYY-MM-DD HH:MM:SS`.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn review_with_body(id: &str, body: &str, location: &str, timestamp: &str) -> Review {
        Review::new(
            ReviewId::new(id),
            body,
            Location::parse(location).expect("fixture location should be valid"),
            Timestamp::parse(timestamp).expect("fixture timestamp should be valid"),
        )
    }

    /// Four reviews across both locations and early 2021, in insertion order.
    #[must_use]
    pub fn sample_reviews() -> Vec<Review> {
        vec![
            review_with_body(
                "r1",
                "Pretty average visit",
                "Denver, Colorado",
                "2021-01-10 09:00:00",
            ),
            review_with_body(
                "r2",
                "Absolutely wonderful staff",
                "San Diego, California",
                "2021-02-01 00:00:00",
            ),
            review_with_body(
                "r3",
                "Rude and slow",
                "Denver, Colorado",
                "2021-02-01 12:30:00",
            ),
            review_with_body(
                "r4",
                "Nice view",
                "San Diego, California",
                "2021-03-15 18:45:00",
            ),
        ]
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, SequentialIdGenerator, StubScorer, test_clock};

/// Environment with the fixed test clock, sequential ids and `scorer`.
#[must_use]
pub fn test_environment(scorer: impl review_analyzer_core::SentimentScorer + 'static) -> ReviewEnvironment {
    ReviewEnvironment::new(
        Arc::new(test_clock()),
        Arc::new(SequentialIdGenerator::new()),
        Arc::new(scorer),
    )
}
