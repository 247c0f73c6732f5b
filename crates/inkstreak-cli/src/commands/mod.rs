pub mod config;
pub mod day;
pub mod streak;

use inkstreak_core::{Config, DayStatusBook, JsonFileStore};
use serde::Serialize;

/// Open the day-status book at the configured location.
pub fn open_book(
    config: &Config,
) -> Result<DayStatusBook<JsonFileStore>, Box<dyn std::error::Error>> {
    Ok(DayStatusBook::from_config(config)?)
}

pub fn print_json<T: Serialize>(
    value: &T,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let out = if config.report.pretty_json {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}
