//! Calendar-date normalization.
//!
//! Every date the engine sees is reduced to a `NaiveDate` representing the
//! UTC calendar day. Time-of-day and offsets never survive normalization.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde_json::Value;

use crate::error::StreakError;

/// Canonical key format for a calendar day.
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// A date as supplied by a caller, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput {
    /// Canonical `YYYY-MM-DD` string (surrounding whitespace allowed)
    Key(String),
    /// Already-validated calendar date
    Date(NaiveDate),
    /// A point in time, truncated to its UTC calendar day
    Instant(DateTime<Utc>),
    /// Milliseconds since the Unix epoch
    Timestamp(i64),
}

impl From<&str> for DateInput {
    fn from(value: &str) -> Self {
        DateInput::Key(value.to_string())
    }
}

impl From<String> for DateInput {
    fn from(value: String) -> Self {
        DateInput::Key(value)
    }
}

impl From<NaiveDate> for DateInput {
    fn from(value: NaiveDate) -> Self {
        DateInput::Date(value)
    }
}

impl From<DateTime<Utc>> for DateInput {
    fn from(value: DateTime<Utc>) -> Self {
        DateInput::Instant(value)
    }
}

impl From<DateTime<FixedOffset>> for DateInput {
    fn from(value: DateTime<FixedOffset>) -> Self {
        DateInput::Instant(value.with_timezone(&Utc))
    }
}

/// Normalize `input` to its UTC calendar date.
///
/// `label` names the offending field in the error, e.g. `today` or
/// `dayStatuses[3].date`.
pub fn normalize_date(input: &DateInput, label: &str) -> Result<NaiveDate, StreakError> {
    match input {
        DateInput::Key(raw) => parse_date_key(raw, label),
        DateInput::Date(date) => Ok(*date),
        DateInput::Instant(instant) => Ok(instant.date_naive()),
        DateInput::Timestamp(millis) => DateTime::<Utc>::from_timestamp_millis(*millis)
            .map(|instant| instant.date_naive())
            .ok_or_else(|| StreakError::invalid_date(label, "not a valid point in time")),
    }
}

/// Normalize a date carried in a JSON value. Only strings are supported.
pub fn normalize_json_date(value: &Value, label: &str) -> Result<NaiveDate, StreakError> {
    match value {
        Value::String(raw) => parse_date_key(raw, label),
        _ => Err(StreakError::invalid_date(label, "unsupported date value")),
    }
}

/// Parse a strict `YYYY-MM-DD` key, rejecting impossible calendar days.
pub fn parse_date_key(raw: &str, label: &str) -> Result<NaiveDate, StreakError> {
    let trimmed = raw.trim();
    let bytes = trimmed.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(StreakError::invalid_date(
            label,
            format!("expected YYYY-MM-DD format, got {raw:?}"),
        ));
    }

    let component = |range: std::ops::Range<usize>| {
        trimmed[range]
            .parse::<u32>()
            .map_err(|e| StreakError::invalid_date(label, e.to_string()))
    };
    let year = component(0..4)? as i32;
    let month = component(5..7)?;
    let day = component(8..10)?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        StreakError::invalid_date(label, format!("{trimmed} is not a calendar date"))
    })
}

/// Format a calendar day as its canonical key.
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Today's UTC calendar date. Only the outermost caller should use this.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}
