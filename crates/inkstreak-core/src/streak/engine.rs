//! Backward-walking streak engine.
//!
//! Starting at `today`, the engine steps one calendar day back per
//! iteration. A day is complete when both `written` and `published` are set;
//! absent days are incomplete. Up to [`MAX_GRACE_DAYS`] consecutive
//! incomplete days are tolerated. The next one ends the walk.
//!
//! Only the gap between `today` and the most recent complete day is reported
//! as grace usage. Shorter gaps further back are walked through silently.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::date::{normalize_date, normalize_json_date, today_utc, DateInput};
use super::record::{DayIndex, DayRecord};
use crate::error::StreakError;

/// Consecutive incomplete days tolerated before a streak breaks.
pub const MAX_GRACE_DAYS: u32 = 2;

/// Extra days the walk may look back beyond the number of indexed days.
const ITERATION_PADDING: usize = 366;

/// Snapshot of streak state as of `today`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakReport {
    pub streak_length: u32,
    pub last_complete_date: Option<NaiveDate>,
    pub last_activity_date: Option<NaiveDate>,
    pub days_used_in_grace: u32,
    pub days_remaining_in_grace: u32,
    pub trailing_misses: u32,
    pub is_in_grace: bool,
    pub grace_broken: bool,
    pub max_grace_days: u32,
    pub today: NaiveDate,
}

/// Coarse classification of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakHealth {
    /// Streak alive with no grace days consumed
    Healthy,
    /// Streak alive, riding on grace days
    Grace,
    /// No active streak
    Broken,
}

impl StreakHealth {
    pub fn label(&self) -> &'static str {
        match self {
            StreakHealth::Healthy => "healthy",
            StreakHealth::Grace => "grace",
            StreakHealth::Broken => "broken",
        }
    }
}

impl StreakReport {
    pub fn health(&self) -> StreakHealth {
        if self.streak_length == 0 {
            StreakHealth::Broken
        } else if self.is_in_grace {
            StreakHealth::Grace
        } else {
            StreakHealth::Healthy
        }
    }
}

/// Compute the streak report for `records` as of `today`.
pub fn compute_streak(
    records: &[DayRecord],
    today: &DateInput,
) -> Result<StreakReport, StreakError> {
    let today = normalize_date(today, "today")?;
    let index = DayIndex::from_records(records, today)?;
    Ok(walk(&index, today))
}

/// Compute the streak report with `today` taken from the system clock.
pub fn compute_streak_now(records: &[DayRecord]) -> Result<StreakReport, StreakError> {
    compute_streak(records, &DateInput::Date(today_utc()))
}

/// Compute the streak report from untyped JSON records.
///
/// Only an absent `today` falls back to the system clock; an explicit
/// `null` is an invalid date like any other non-string.
pub fn compute_streak_from_json(
    records: &Value,
    today: Option<&Value>,
) -> Result<StreakReport, StreakError> {
    let today = match today {
        None => today_utc(),
        Some(value) => normalize_json_date(value, "today")?,
    };
    let index = DayIndex::from_json(records, today)?;
    Ok(walk(&index, today))
}

/// Walk an already-built index backward from `today`.
pub fn walk(index: &DayIndex, today: NaiveDate) -> StreakReport {
    let mut streak_length = 0u32;
    let mut last_complete_date = None;
    let mut consecutive_misses = 0u32;
    let mut trailing_misses = None;
    let limit = index.len() + MAX_GRACE_DAYS as usize + ITERATION_PADDING;

    let mut current = Some(today);
    for _ in 0..limit {
        let Some(date) = current else {
            break;
        };

        if index.is_complete(date) {
            streak_length += 1;
            last_complete_date.get_or_insert(date);
            trailing_misses.get_or_insert(consecutive_misses);
            consecutive_misses = 0;
        } else {
            consecutive_misses += 1;
            if consecutive_misses > MAX_GRACE_DAYS {
                break;
            }
        }

        current = date.pred_opt();
    }

    let trailing_misses = trailing_misses.unwrap_or(consecutive_misses);
    let days_used_in_grace = trailing_misses.min(MAX_GRACE_DAYS);
    let days_remaining_in_grace = MAX_GRACE_DAYS.saturating_sub(days_used_in_grace);
    let is_in_grace =
        streak_length > 0 && trailing_misses > 0 && trailing_misses <= MAX_GRACE_DAYS;
    let grace_broken = trailing_misses > MAX_GRACE_DAYS;

    tracing::debug!(
        %today,
        streak_length,
        trailing_misses,
        indexed_days = index.len(),
        "streak walk finished"
    );

    StreakReport {
        streak_length,
        last_complete_date,
        last_activity_date: index.last_activity(),
        days_used_in_grace,
        days_remaining_in_grace,
        trailing_misses,
        is_in_grace,
        grace_broken,
        max_grace_days: MAX_GRACE_DAYS,
        today,
    }
}

/// Longest run of consecutive complete days at or before `today`.
///
/// No grace is applied: any incomplete day splits a run.
pub fn longest_streak(records: &[DayRecord], today: &DateInput) -> Result<u32, StreakError> {
    let today = normalize_date(today, "today")?;
    let index = DayIndex::from_records(records, today)?;
    Ok(longest_run(&index))
}

/// Longest run of consecutive complete days in `index`.
pub fn longest_run(index: &DayIndex) -> u32 {
    let mut longest = 0u32;
    let mut run = 0u32;
    let mut previous: Option<NaiveDate> = None;
    for date in index.complete_days() {
        run = match previous {
            Some(prev) if prev.succ_opt() == Some(date) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(date);
    }
    longest
}
