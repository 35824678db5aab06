//! Loading the initial review dataset.
//!
//! The dataset is a CSV file with a header row naming at least `ReviewId`,
//! `Location`, `Timestamp` and `ReviewBody` (in any order; extra columns are
//! ignored). Rows that would break a store invariant are skipped with a
//! warning rather than failing startup; structural CSV problems and I/O
//! errors do fail.

use review_analyzer_core::{Location, Review, ReviewId, Timestamp};
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that prevent the dataset from loading.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// The dataset file could not be opened
    #[error("Failed to open dataset {path}: {source}")]
    Open {
        /// Path that was tried
        path: PathBuf,
        /// Underlying error
        #[source]
        source: csv::Error,
    },

    /// The CSV content is structurally invalid (bad quoting, missing columns)
    #[error("Malformed dataset: {0}")]
    Malformed(#[from] csv::Error),
}

/// Why a dataset row was left out of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// `Location` is not an allowed location
    UnknownLocation,
    /// `Timestamp` is not `YYYY-MM-DD HH:MM:SS`
    InvalidTimestamp,
    /// `ReviewBody` is empty
    EmptyBody,
    /// `ReviewId` was already used by an earlier row
    DuplicateId,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::UnknownLocation => "unknown location",
            Self::InvalidTimestamp => "invalid timestamp",
            Self::EmptyBody => "empty review body",
            Self::DuplicateId => "duplicate review id",
        };
        f.write_str(text)
    }
}

/// Outcome of a dataset load.
#[derive(Debug, Default)]
pub struct Dataset {
    /// Accepted reviews, in file order
    pub reviews: Vec<Review>,
    /// Rejected rows as `(line, reason)`
    pub skipped: Vec<(u64, SkipReason)>,
}

#[derive(Debug, Deserialize)]
struct DatasetRow {
    #[serde(rename = "ReviewId")]
    id: String,
    #[serde(rename = "ReviewBody")]
    body: String,
    #[serde(rename = "Location")]
    location: String,
    #[serde(rename = "Timestamp")]
    timestamp: String,
}

impl DatasetRow {
    fn into_review(self) -> Result<Review, SkipReason> {
        let location = Location::parse(&self.location).ok_or(SkipReason::UnknownLocation)?;
        let timestamp =
            Timestamp::parse(&self.timestamp).map_err(|_| SkipReason::InvalidTimestamp)?;
        if self.body.is_empty() {
            return Err(SkipReason::EmptyBody);
        }
        Ok(Review::new(ReviewId::new(self.id), self.body, location, timestamp))
    }
}

/// Read reviews from CSV data.
///
/// # Errors
///
/// Returns [`DatasetError::Malformed`] when the CSV cannot be parsed or a
/// required column is missing.
pub fn load_reviews<R: io::Read>(reader: R) -> Result<Dataset, DatasetError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut record = csv::StringRecord::new();
    let mut dataset = Dataset::default();
    let mut seen = HashSet::new();

    while csv_reader.read_record(&mut record)? {
        let row: DatasetRow = record.deserialize(Some(&headers))?;
        let line = record.position().map_or(0, csv::Position::line);

        let outcome = row.into_review().and_then(|review| {
            if seen.insert(review.id.clone()) {
                Ok(review)
            } else {
                Err(SkipReason::DuplicateId)
            }
        });

        match outcome {
            Ok(review) => dataset.reviews.push(review),
            Err(reason) => {
                tracing::warn!(line, %reason, "Skipping dataset row");
                dataset.skipped.push((line, reason));
            }
        }
    }

    Ok(dataset)
}

/// Read reviews from a CSV file.
///
/// # Errors
///
/// Returns [`DatasetError::Open`] when the file cannot be opened, otherwise
/// as [`load_reviews`].
pub fn load_reviews_from_path(path: impl AsRef<Path>) -> Result<Dataset, DatasetError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|err| DatasetError::Open {
        path: path.to_path_buf(),
        source: csv::Error::from(err),
    })?;

    let dataset = load_reviews(io::BufReader::new(file))?;
    tracing::info!(
        path = %path.display(),
        loaded = dataset.reviews.len(),
        skipped = dataset.skipped.len(),
        "Dataset loaded"
    );
    Ok(dataset)
}
