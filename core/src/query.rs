//! Narrowing a review sequence by optional criteria.
//!
//! Criteria are independent intersections: a review survives when it passes
//! every criterion that is present. Date criteria that fail to parse are kept
//! as [`DateBound::Ignored`] and do not filter anything.

use crate::review::{Review, Timestamp};
use chrono::{NaiveDate, NaiveTime};

/// Format accepted for `start_date` / `end_date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Query-string key for the location criterion.
pub const LOCATION_PARAM: &str = "location";
/// Query-string key for the inclusive lower date bound.
pub const START_DATE_PARAM: &str = "start_date";
/// Query-string key for the inclusive upper date bound.
pub const END_DATE_PARAM: &str = "end_date";

/// A date criterion as supplied by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBound {
    /// The value parsed; the bound applies at midnight of this date.
    Parsed(NaiveDate),
    /// The value did not parse and the bound is not applied.
    Ignored,
}

impl DateBound {
    /// Parse a `YYYY-MM-DD` date, degrading to [`DateBound::Ignored`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        NaiveDate::parse_from_str(raw, DATE_FORMAT).map_or(Self::Ignored, Self::Parsed)
    }

    /// Midnight at the start of the parsed date, if any.
    #[must_use]
    pub fn midnight(self) -> Option<Timestamp> {
        match self {
            Self::Parsed(date) => Some(Timestamp::new(date.and_time(NaiveTime::MIN))),
            Self::Ignored => None,
        }
    }
}

/// Criteria for a review listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewQuery {
    /// Exact, case-sensitive location to keep
    pub location: Option<String>,
    /// Keep reviews at or after midnight of this date
    pub start_date: Option<DateBound>,
    /// Keep reviews at or before midnight of this date
    pub end_date: Option<DateBound>,
}

impl ReviewQuery {
    /// A query with no criteria.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to one location.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Add a lower date bound from raw client text.
    #[must_use]
    pub fn with_start_date(mut self, raw: &str) -> Self {
        self.start_date = Some(DateBound::parse(raw));
        self
    }

    /// Add an upper date bound from raw client text.
    #[must_use]
    pub fn with_end_date(mut self, raw: &str) -> Self {
        self.end_date = Some(DateBound::parse(raw));
        self
    }

    /// Build a query from decoded query-string pairs.
    ///
    /// Blank values count as absent and, when a key repeats, the first
    /// non-blank value wins. Unknown keys are ignored.
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut query = Self::new();
        for (key, value) in pairs {
            let value = value.as_ref();
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                LOCATION_PARAM if query.location.is_none() => {
                    query.location = Some(value.to_string());
                }
                START_DATE_PARAM if query.start_date.is_none() => {
                    query.start_date = Some(DateBound::parse(value));
                }
                END_DATE_PARAM if query.end_date.is_none() => {
                    query.end_date = Some(DateBound::parse(value));
                }
                _ => {}
            }
        }
        query
    }

    /// Whether the query has no criteria at all.
    #[must_use]
    pub const fn is_unfiltered(&self) -> bool {
        self.location.is_none() && self.start_date.is_none() && self.end_date.is_none()
    }

    /// Whether `review` passes every applicable criterion.
    #[must_use]
    pub fn matches(&self, review: &Review) -> bool {
        if let Some(location) = &self.location {
            if review.location.as_str() != location {
                return false;
            }
        }
        if let Some(start) = self.start_date.and_then(DateBound::midnight) {
            if review.timestamp < start {
                return false;
            }
        }
        if let Some(end) = self.end_date.and_then(DateBound::midnight) {
            if review.timestamp > end {
                return false;
            }
        }
        true
    }

    /// Keep the reviews that match, preserving their relative order.
    #[must_use]
    pub fn apply<'a>(&self, reviews: &'a [Review]) -> Vec<&'a Review> {
        reviews.iter().filter(|review| self.matches(review)).collect()
    }
}
