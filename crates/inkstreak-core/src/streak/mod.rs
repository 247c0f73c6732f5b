//! Streak computation: date normalization, record indexing and the
//! backward walk that produces a [`StreakReport`].

mod date;
mod engine;
mod record;

pub use date::{
    date_key, normalize_date, normalize_json_date, parse_date_key, today_utc, DateInput,
    DATE_KEY_FORMAT,
};
pub use engine::{
    compute_streak, compute_streak_from_json, compute_streak_now, longest_run, longest_streak,
    walk, StreakHealth, StreakReport, MAX_GRACE_DAYS,
};
pub use record::{DayFlags, DayIndex, DayRecord};
