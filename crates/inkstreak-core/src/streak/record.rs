//! Day records and the date-keyed index the engine walks over.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde_json::Value;

use super::date::{normalize_date, normalize_json_date, DateInput};
use crate::error::StreakError;

/// Activity for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayRecord {
    pub date: DateInput,
    pub written: bool,
    pub published: bool,
}

impl DayRecord {
    pub fn new(date: impl Into<DateInput>, written: bool, published: bool) -> Self {
        Self {
            date: date.into(),
            written,
            published,
        }
    }

    /// Both written and published.
    pub fn complete(date: impl Into<DateInput>) -> Self {
        Self::new(date, true, true)
    }
}

/// The two activity flags for an indexed day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayFlags {
    pub written: bool,
    pub published: bool,
}

impl DayFlags {
    pub fn is_complete(&self) -> bool {
        self.written && self.published
    }

    pub fn has_activity(&self) -> bool {
        self.written || self.published
    }
}

/// Records at or before `today`, keyed by calendar date.
#[derive(Debug, Clone, Default)]
pub struct DayIndex {
    days: HashMap<NaiveDate, DayFlags>,
    last_activity: Option<NaiveDate>,
}

impl DayIndex {
    /// Index typed records. The first invalid date aborts indexing.
    pub fn from_records(records: &[DayRecord], today: NaiveDate) -> Result<Self, StreakError> {
        let mut index = Self::default();
        for (i, record) in records.iter().enumerate() {
            let date = normalize_date(&record.date, &date_label(i))?;
            index.insert(
                date,
                today,
                DayFlags {
                    written: record.written,
                    published: record.published,
                },
            );
        }
        Ok(index)
    }

    /// Index records from untyped JSON, validating their shape first.
    ///
    /// `records` must be an array whose elements are objects carrying a
    /// `date` key. `written`/`published` accept any JSON value and are
    /// coerced by truthiness.
    pub fn from_json(records: &Value, today: NaiveDate) -> Result<Self, StreakError> {
        let items = records
            .as_array()
            .ok_or_else(|| StreakError::InvalidInput("dayStatuses must be an array".into()))?;

        let mut index = Self::default();
        for (i, item) in items.iter().enumerate() {
            let fields = item.as_object().ok_or_else(|| StreakError::MalformedRecord {
                index: i,
                reason: "day status must be an object".into(),
            })?;
            let raw_date = fields.get("date").ok_or_else(|| StreakError::MalformedRecord {
                index: i,
                reason: "missing a date field".into(),
            })?;

            let date = normalize_json_date(raw_date, &date_label(i))?;
            index.insert(
                date,
                today,
                DayFlags {
                    written: fields.get("written").is_some_and(is_truthy),
                    published: fields.get("published").is_some_and(is_truthy),
                },
            );
        }
        Ok(index)
    }

    fn insert(&mut self, date: NaiveDate, today: NaiveDate, flags: DayFlags) {
        if date > today {
            return;
        }
        self.days.insert(date, flags);
        if flags.has_activity() && self.last_activity.map_or(true, |last| date > last) {
            self.last_activity = Some(date);
        }
    }

    pub fn get(&self, date: NaiveDate) -> Option<DayFlags> {
        self.days.get(&date).copied()
    }

    /// Absent days are incomplete.
    pub fn is_complete(&self, date: NaiveDate) -> bool {
        self.get(date).is_some_and(|flags| flags.is_complete())
    }

    /// Most recent indexed day with any activity.
    pub fn last_activity(&self) -> Option<NaiveDate> {
        self.last_activity
    }

    /// Indexed complete days, oldest first.
    pub fn complete_days(&self) -> Vec<NaiveDate> {
        let mut days: Vec<NaiveDate> = self
            .days
            .iter()
            .filter(|(_, flags)| flags.is_complete())
            .map(|(date, _)| *date)
            .collect();
        days.sort_unstable();
        days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

fn date_label(index: usize) -> String {
    format!("dayStatuses[{index}].date")
}

/// Loose truthiness: null, false, 0, NaN and "" are false.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
