//! # inkstreak Core Library
//!
//! Tracks daily writing activity (two flags per day: written, published) and
//! derives a streak with a bounded grace period for missed days.
//!
//! ## Architecture
//!
//! - **Streak Engine**: a pure function that walks backward from "today"
//!   over a sparse set of day records and reports streak length, grace usage
//!   and health. It holds no state and performs no I/O.
//! - **Storage**: a versioned JSON envelope for persisted day statuses, an
//!   [`ActivityStore`] trait with file and in-memory implementations, and
//!   TOML-based configuration
//! - **Book**: the editable day-status collection a front end works with
//!
//! ## Key Components
//!
//! - [`compute_streak`]: the engine entry point
//! - [`StreakReport`]: engine output
//! - [`DayStatusBook`]: repository-backed collection of day statuses
//! - [`Config`]: application configuration management

pub mod book;
pub mod error;
pub mod storage;
pub mod streak;

pub use book::{DayStatusBook, StatusUpdate};
pub use error::{ConfigError, CoreError, StorageError, StreakError};
pub use storage::{ActivityStore, Config, DayStatus, DayStatusMap, JsonFileStore, MemoryStore};
pub use streak::{
    compute_streak, compute_streak_from_json, compute_streak_now, longest_streak, DateInput,
    DayRecord, StreakHealth, StreakReport, MAX_GRACE_DAYS,
};
