//! Injected dependencies for the review core.
//!
//! Everything non-deterministic the core needs (time, identifiers, sentiment
//! scoring) is reached through a trait so tests can substitute fixed
//! implementations.

use crate::review::ReviewId;
use crate::sentiment::SentimentScorer;
use chrono::{Local, NaiveDateTime};
use std::sync::Arc;
use uuid::Uuid;

/// Clock trait - abstracts time operations for testability
///
/// Review timestamps are naive local time, so the clock returns a
/// [`NaiveDateTime`] rather than a zoned instant.
pub trait Clock: Send + Sync {
    /// Get the current local time
    fn now(&self) -> NaiveDateTime;
}

/// Production clock reading the system's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Generates identifiers for newly created reviews.
///
/// Every call must return an identifier never returned before.
pub trait IdGenerator: Send + Sync {
    /// Produce a fresh identifier
    fn next_id(&self) -> ReviewId;
}

/// Production generator backed by random (v4) UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> ReviewId {
        ReviewId::new(Uuid::new_v4().to_string())
    }
}

/// Environment dependencies for handling review requests
#[derive(Clone)]
pub struct ReviewEnvironment {
    /// Clock for stamping new reviews
    pub clock: Arc<dyn Clock>,
    /// Identifier source for new reviews
    pub ids: Arc<dyn IdGenerator>,
    /// Sentiment scorer applied on every read
    pub scorer: Arc<dyn SentimentScorer>,
}

impl ReviewEnvironment {
    /// Creates a new `ReviewEnvironment`
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
        scorer: Arc<dyn SentimentScorer>,
    ) -> Self {
        Self { clock, ids, scorer }
    }

    /// Production wiring: system clock and UUID identifiers around `scorer`.
    #[must_use]
    pub fn production(scorer: Arc<dyn SentimentScorer>) -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(UuidGenerator), scorer)
    }
}

impl std::fmt::Debug for ReviewEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewEnvironment").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn uuid_generator_yields_distinct_ids() {
        let ids: HashSet<_> = (0..100).map(|_| UuidGenerator.next_id()).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn uuid_ids_are_hyphenated_uuids() {
        let id = UuidGenerator.next_id();
        assert!(Uuid::parse_str(id.as_str()).is_ok());
    }
}
