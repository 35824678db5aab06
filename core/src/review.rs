//! The review entity and its value types.
//!
//! A [`Review`] is immutable once created. Every field is assigned either by
//! the submission path (see [`crate::submission`]) or by the dataset loaded at
//! startup; nothing in the system edits a review afterwards.

use chrono::{NaiveDateTime, SubsecRound};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Locations a review may be filed under.
pub const VALID_LOCATIONS: [&str; 2] = ["Denver, Colorado", "San Diego, California"];

/// Format of a [`Timestamp`] on the wire and in the dataset.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Opaque, unique review identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewId(String);

impl ReviewId {
    /// Wrap an existing identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A location that is guaranteed to be one of [`VALID_LOCATIONS`].
///
/// The only way to obtain a `Location` is [`Location::parse`], so a review
/// can never carry a location outside the allowed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Location(&'static str);

impl Location {
    /// Look up `value` in [`VALID_LOCATIONS`] (exact, case-sensitive).
    ///
    /// Returns `None` when the value is not an allowed location.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        VALID_LOCATIONS
            .into_iter()
            .find(|candidate| *candidate == value)
            .map(Self)
    }

    /// The location name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Naive local creation time with one-second resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// Build a timestamp, dropping any sub-second component so that the value
    /// compares exactly like its formatted text.
    #[must_use]
    pub fn new(at: NaiveDateTime) -> Self {
        Self(at.trunc_subsecs(0))
    }

    /// Parse a `YYYY-MM-DD HH:MM:SS` timestamp.
    ///
    /// # Errors
    ///
    /// Returns the chrono parse error when `text` does not match
    /// [`TIMESTAMP_FORMAT`].
    pub fn parse(text: &str) -> Result<Self, chrono::ParseError> {
        NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).map(Self)
    }

    /// The underlying date and time.
    #[must_use]
    pub const fn as_naive(self) -> NaiveDateTime {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// A customer review.
///
/// Serializes with the field names clients see: `ReviewId`, `ReviewBody`,
/// `Location` and `Timestamp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Review {
    /// Unique identifier
    #[serde(rename = "ReviewId")]
    pub id: ReviewId,
    /// Free-text body
    #[serde(rename = "ReviewBody")]
    pub body: String,
    /// Where the review was filed
    #[serde(rename = "Location")]
    pub location: Location,
    /// When the review was created
    #[serde(rename = "Timestamp")]
    pub timestamp: Timestamp,
}

impl Review {
    /// Create a review from its parts.
    #[must_use]
    pub fn new(
        id: ReviewId,
        body: impl Into<String>,
        location: Location,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id,
            body: body.into(),
            location,
            timestamp,
        }
    }
}
