//! Decoding and validating review submissions.
//!
//! A submission passes through two steps:
//!
//! 1. [`RawSubmission::decode`] turns the request body into one normalized
//!    shape regardless of whether it arrived as JSON or as form data.
//! 2. [`RawSubmission::validate`] checks the fields and builds the [`Review`].
//!
//! [`accept_submission`] runs both, short-circuiting on the first failure in
//! the order empty body, malformed payload, missing field, invalid location.

use crate::environment::{Clock, IdGenerator};
use crate::review::{Location, Review, Timestamp};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Payload field holding the location.
pub const LOCATION_FIELD: &str = "Location";
/// Payload field holding the review text.
pub const REVIEW_BODY_FIELD: &str = "ReviewBody";

/// How a submission body is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadEncoding {
    /// `application/json`
    Json,
    /// `application/x-www-form-urlencoded`, and anything undeclared
    Form,
}

impl PayloadEncoding {
    /// Pick the encoding from a `Content-Type` header value.
    ///
    /// Only the media type is compared; parameters such as `charset` are
    /// ignored. Anything other than JSON is read as form data.
    #[must_use]
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        let is_json = content_type
            .and_then(|value| value.split(';').next())
            .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("application/json"));
        if is_json { Self::Json } else { Self::Form }
    }
}

impl fmt::Display for PayloadEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("JSON"),
            Self::Form => f.write_str("form data"),
        }
    }
}

/// Why a submission was rejected.
///
/// The `Display` text is the reason returned to the client.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionError {
    /// The request carried no body
    #[error("Empty request body")]
    EmptyBody,

    /// The body is not valid in its declared encoding
    #[error("Invalid {0}")]
    MalformedPayload(PayloadEncoding),

    /// `Location` or `ReviewBody` is absent
    #[error("Missing Location or ReviewBody")]
    MissingField,

    /// `Location` is not one of the allowed locations
    #[error("Invalid Location")]
    InvalidLocation,
}

impl SubmissionError {
    /// Short machine-readable label, used for metrics and logs.
    #[must_use]
    pub const fn reason(self) -> &'static str {
        match self {
            Self::EmptyBody => "empty_body",
            Self::MalformedPayload(_) => "malformed_payload",
            Self::MissingField => "missing_field",
            Self::InvalidLocation => "invalid_location",
        }
    }
}

/// Submitted fields after decoding, before validation.
///
/// A field is `None` when it was absent, blank, or had no usable value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSubmission {
    /// Submitted location, unchecked
    pub location: Option<String>,
    /// Submitted review text
    pub review_body: Option<String>,
}

impl RawSubmission {
    /// Decode a request body.
    ///
    /// JSON fields may hold a string or a list (whose first element is used);
    /// numbers and booleans are taken as their JSON text. An empty JSON
    /// `ReviewBody` counts as absent, an empty `Location` does not. A JSON
    /// document that is not an object has no fields. Form bodies take the
    /// first non-blank value of each key.
    ///
    /// # Errors
    ///
    /// [`SubmissionError::EmptyBody`] for an empty body and
    /// [`SubmissionError::MalformedPayload`] when the body is not valid JSON
    /// (or not UTF-8 form data).
    pub fn decode(body: &[u8], encoding: PayloadEncoding) -> Result<Self, SubmissionError> {
        if body.is_empty() {
            return Err(SubmissionError::EmptyBody);
        }
        match encoding {
            PayloadEncoding::Json => Self::from_json(body),
            PayloadEncoding::Form => Self::from_form(body),
        }
    }

    fn from_json(body: &[u8]) -> Result<Self, SubmissionError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|_| SubmissionError::MalformedPayload(PayloadEncoding::Json))?;

        let Value::Object(fields) = value else {
            return Ok(Self::default());
        };

        // An empty location is present but invalid; an empty body counts as absent.
        Ok(Self {
            location: fields.get(LOCATION_FIELD).and_then(json_field_text),
            review_body: fields
                .get(REVIEW_BODY_FIELD)
                .and_then(json_field_text)
                .filter(|text| !text.is_empty()),
        })
    }

    fn from_form(body: &[u8]) -> Result<Self, SubmissionError> {
        let malformed = || SubmissionError::MalformedPayload(PayloadEncoding::Form);
        let text = std::str::from_utf8(body).map_err(|_| malformed())?;
        let pairs: Vec<(String, String)> =
            serde_urlencoded::from_str(text).map_err(|_| malformed())?;

        let mut submission = Self::default();
        for (key, value) in pairs {
            if value.is_empty() {
                continue;
            }
            let slot = match key.as_str() {
                LOCATION_FIELD => &mut submission.location,
                REVIEW_BODY_FIELD => &mut submission.review_body,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        Ok(submission)
    }

    /// Check the fields and build the review.
    ///
    /// The body and location are kept verbatim; the identifier and timestamp
    /// come from the injected generators.
    ///
    /// # Errors
    ///
    /// [`SubmissionError::MissingField`] when either field is absent, then
    /// [`SubmissionError::InvalidLocation`] when the location is not allowed.
    pub fn validate(
        self,
        clock: &dyn Clock,
        ids: &dyn IdGenerator,
    ) -> Result<Review, SubmissionError> {
        let (Some(location), Some(body)) = (self.location, self.review_body) else {
            return Err(SubmissionError::MissingField);
        };
        let location = Location::parse(&location).ok_or(SubmissionError::InvalidLocation)?;

        Ok(Review::new(
            ids.next_id(),
            body,
            location,
            Timestamp::new(clock.now()),
        ))
    }
}

/// Decode and validate a submission body in one step.
///
/// # Errors
///
/// The first [`SubmissionError`] hit by [`RawSubmission::decode`] or
/// [`RawSubmission::validate`].
pub fn accept_submission(
    body: &[u8],
    encoding: PayloadEncoding,
    clock: &dyn Clock,
    ids: &dyn IdGenerator,
) -> Result<Review, SubmissionError> {
    RawSubmission::decode(body, encoding)?.validate(clock, ids)
}

fn json_field_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Array(items) => items.first().and_then(json_field_text),
        Value::Bool(_) | Value::Number(_) => Some(value.to_string()),
        Value::Null | Value::Object(_) => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::review::ReviewId;
    use chrono::{NaiveDate, NaiveDateTime};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StoppedClock;

    impl Clock for StoppedClock {
        fn now(&self) -> NaiveDateTime {
            NaiveDate::from_ymd_opt(2024, 5, 6)
                .unwrap()
                .and_hms_opt(7, 8, 9)
                .unwrap()
        }
    }

    #[derive(Default)]
    struct CountingIds(AtomicUsize);

    impl IdGenerator for CountingIds {
        fn next_id(&self) -> ReviewId {
            ReviewId::new(format!("id-{}", self.0.fetch_add(1, Ordering::SeqCst)))
        }
    }

    fn accept(body: &str, encoding: PayloadEncoding) -> Result<Review, SubmissionError> {
        accept_submission(body.as_bytes(), encoding, &StoppedClock, &CountingIds::default())
    }

    #[test]
    fn content_type_selects_encoding() {
        use PayloadEncoding::{Form, Json};
        assert_eq!(PayloadEncoding::from_content_type(Some("application/json")), Json);
        assert_eq!(
            PayloadEncoding::from_content_type(Some("application/json; charset=utf-8")),
            Json
        );
        assert_eq!(
            PayloadEncoding::from_content_type(Some("application/x-www-form-urlencoded")),
            Form
        );
        assert_eq!(PayloadEncoding::from_content_type(Some("text/plain")), Form);
        assert_eq!(PayloadEncoding::from_content_type(None), Form);
    }

    #[test]
    fn valid_json_submission_builds_review() {
        let review = accept(
            r#"{"Location": "Denver, Colorado", "ReviewBody": "Great service!"}"#,
            PayloadEncoding::Json,
        )
        .unwrap();

        assert_eq!(review.id.as_str(), "id-0");
        assert_eq!(review.body, "Great service!");
        assert_eq!(review.location.as_str(), "Denver, Colorado");
        assert_eq!(review.timestamp.to_string(), "2024-05-06 07:08:09");
    }

    #[test]
    fn valid_form_submission_builds_review() {
        let review = accept(
            "Location=San+Diego%2C+California&ReviewBody=Loved+it%21",
            PayloadEncoding::Form,
        )
        .unwrap();
        assert_eq!(review.location.as_str(), "San Diego, California");
        assert_eq!(review.body, "Loved it!");
    }

    #[test]
    fn empty_body_is_rejected_first() {
        assert_eq!(accept("", PayloadEncoding::Json), Err(SubmissionError::EmptyBody));
        assert_eq!(accept("", PayloadEncoding::Form), Err(SubmissionError::EmptyBody));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = accept("{not json", PayloadEncoding::Json).unwrap_err();
        assert_eq!(err, SubmissionError::MalformedPayload(PayloadEncoding::Json));
        assert_eq!(err.to_string(), "Invalid JSON");
    }

    #[test]
    fn non_utf8_form_is_rejected() {
        let err = accept_submission(
            &[0xff, 0xfe, b'=', b'x'],
            PayloadEncoding::Form,
            &StoppedClock,
            &CountingIds::default(),
        )
        .unwrap_err();
        assert_eq!(err, SubmissionError::MalformedPayload(PayloadEncoding::Form));
    }

    #[test]
    fn missing_fields_are_rejected() {
        assert_eq!(accept("{}", PayloadEncoding::Json), Err(SubmissionError::MissingField));
        assert_eq!(
            accept(r#"{"Location": "Denver, Colorado"}"#, PayloadEncoding::Json),
            Err(SubmissionError::MissingField)
        );
        assert_eq!(
            accept("ReviewBody=hello", PayloadEncoding::Form),
            Err(SubmissionError::MissingField)
        );
        assert_eq!(accept("[1, 2]", PayloadEncoding::Json), Err(SubmissionError::MissingField));
        assert_eq!(
            SubmissionError::MissingField.to_string(),
            "Missing Location or ReviewBody"
        );
    }

    #[test]
    fn blank_values_count_as_missing() {
        assert_eq!(
            accept("Location=&ReviewBody=x", PayloadEncoding::Form),
            Err(SubmissionError::MissingField)
        );
        assert_eq!(
            accept(
                r#"{"Location": "Denver, Colorado", "ReviewBody": ""}"#,
                PayloadEncoding::Json
            ),
            Err(SubmissionError::MissingField)
        );
        assert_eq!(
            accept(
                r#"{"Location": "Denver, Colorado", "ReviewBody": null}"#,
                PayloadEncoding::Json
            ),
            Err(SubmissionError::MissingField)
        );
    }

    #[test]
    fn empty_json_location_is_invalid_not_missing() {
        let raw = RawSubmission::decode(
            br#"{"Location": "", "ReviewBody": "x"}"#,
            PayloadEncoding::Json,
        )
        .unwrap();
        assert_eq!(raw.location.as_deref(), Some(""));
        assert_eq!(
            accept(r#"{"Location": "", "ReviewBody": "x"}"#, PayloadEncoding::Json),
            Err(SubmissionError::InvalidLocation)
        );
        assert_eq!(
            accept(r#"{"Location": "", "ReviewBody": ""}"#, PayloadEncoding::Json),
            Err(SubmissionError::MissingField)
        );
    }

    #[test]
    fn missing_field_is_checked_before_location() {
        assert_eq!(
            accept(r#"{"Location": "Nowhere"}"#, PayloadEncoding::Json),
            Err(SubmissionError::MissingField)
        );
    }

    #[test]
    fn unknown_location_is_rejected() {
        let err = accept(
            r#"{"Location": "Nowhere", "ReviewBody": "x"}"#,
            PayloadEncoding::Json,
        )
        .unwrap_err();
        assert_eq!(err, SubmissionError::InvalidLocation);
        assert_eq!(err.to_string(), "Invalid Location");
    }

    #[test]
    fn list_values_use_first_element() {
        let raw = RawSubmission::decode(
            br#"{"Location": ["Denver, Colorado", "Nowhere"], "ReviewBody": ["first", "second"]}"#,
            PayloadEncoding::Json,
        )
        .unwrap();
        assert_eq!(raw.location.as_deref(), Some("Denver, Colorado"));
        assert_eq!(raw.review_body.as_deref(), Some("first"));
    }

    #[test]
    fn repeated_form_keys_use_first_value() {
        let raw = RawSubmission::decode(
            b"ReviewBody=one&ReviewBody=two&Location=Denver%2C+Colorado",
            PayloadEncoding::Form,
        )
        .unwrap();
        assert_eq!(raw.review_body.as_deref(), Some("one"));
    }

    #[test]
    fn scalar_json_values_are_taken_as_text() {
        let err = accept(
            r#"{"Location": 42, "ReviewBody": true}"#,
            PayloadEncoding::Json,
        )
        .unwrap_err();
        assert_eq!(err, SubmissionError::InvalidLocation);

        let raw =
            RawSubmission::decode(br#"{"ReviewBody": 5}"#, PayloadEncoding::Json).unwrap();
        assert_eq!(raw.review_body.as_deref(), Some("5"));
    }

    #[test]
    fn body_is_kept_verbatim() {
        let review = accept(
            r#"{"Location": "Denver, Colorado", "ReviewBody": "  spaced  \n out "}"#,
            PayloadEncoding::Json,
        )
        .unwrap();
        assert_eq!(review.body, "  spaced  \n out ");
    }

    #[test]
    fn reasons_are_stable_labels() {
        assert_eq!(SubmissionError::EmptyBody.reason(), "empty_body");
        assert_eq!(
            SubmissionError::MalformedPayload(PayloadEncoding::Form).reason(),
            "malformed_payload"
        );
        assert_eq!(SubmissionError::MissingField.reason(), "missing_field");
        assert_eq!(SubmissionError::InvalidLocation.reason(), "invalid_location");
    }
}
