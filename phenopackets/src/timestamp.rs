//! Protobuf `google.protobuf.Timestamp` in its JSON object form.
//!
//! Phenopacket producers that go through generated protobuf code emit
//! timestamps as `{"seconds": .., "nanos": ..}`; hand-written documents use
//! RFC 3339 strings. Both convert through [`chrono::DateTime<Utc>`].

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const NANOS_PER_SECOND: i32 = 1_000_000_000;

/// Errors converting timestamps.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimestampError {
    /// `nanos` must lie in `0..1_000_000_000`.
    #[error("nanos out of range: {0}")]
    NanosOutOfRange(i32),

    /// `seconds` is outside the range representable as a date.
    #[error("seconds out of range: {0}")]
    SecondsOutOfRange(i64),

    /// Text is not an RFC 3339 timestamp.
    #[error("invalid RFC 3339 timestamp '{input}': {cause}")]
    Parse {
        /// The rejected text.
        input: String,
        /// Parser message.
        cause: String,
    },
}

/// Seconds and nanoseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp {
    pub seconds: i64,
    pub nanos: i32,
}

impl Timestamp {
    /// Current wall-clock time.
    #[must_use]
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Whole seconds are floored; the remainder goes to `nanos`. A leap
    /// second's extra nanoseconds are clamped into range.
    #[must_use]
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        let nanos = dt.timestamp_subsec_nanos().min(999_999_999);
        Self {
            seconds: dt.timestamp(),
            nanos: i32::try_from(nanos).unwrap_or_default(),
        }
    }

    /// # Errors
    ///
    /// Returns [`TimestampError`] if `nanos` or `seconds` are out of range.
    pub fn to_datetime(self) -> Result<DateTime<Utc>, TimestampError> {
        if !(0..NANOS_PER_SECOND).contains(&self.nanos) {
            return Err(TimestampError::NanosOutOfRange(self.nanos));
        }
        let nanos =
            u32::try_from(self.nanos).map_err(|_| TimestampError::NanosOutOfRange(self.nanos))?;
        DateTime::from_timestamp(self.seconds, nanos)
            .ok_or(TimestampError::SecondsOutOfRange(self.seconds))
    }

    /// Parse an RFC 3339 string (`2024-01-01T00:00:00Z`).
    ///
    /// # Errors
    ///
    /// Returns [`TimestampError::Parse`] for malformed text.
    pub fn parse_rfc3339(text: &str) -> Result<Self, TimestampError> {
        DateTime::parse_from_rfc3339(text)
            .map(|dt| Self::from_datetime(dt.with_timezone(&Utc)))
            .map_err(|e| TimestampError::Parse {
                input: text.to_owned(),
                cause: e.to_string(),
            })
    }

    /// Format as RFC 3339 in UTC with a `Z` suffix.
    ///
    /// # Errors
    ///
    /// Returns [`TimestampError`] if the timestamp is out of range.
    pub fn to_rfc3339(self) -> Result<String, TimestampError> {
        Ok(self
            .to_datetime()?
            .to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::from_datetime(dt)
    }
}
