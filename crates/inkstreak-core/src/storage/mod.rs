mod config;
pub mod envelope;
pub mod store;

pub use config::{Config, LogConfig, ReportConfig, StorageConfig};
pub use envelope::{DayStatus, DayStatusMap, STORAGE_KEY, STORAGE_VERSION};
pub use store::{ActivityStore, JsonFileStore, MemoryStore};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the inkstreak data directory, creating it if needed.
///
/// `INKSTREAK_HOME` overrides the location outright. Otherwise the directory
/// is `~/.config/inkstreak`, or `~/.config/inkstreak-dev` when
/// `INKSTREAK_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("INKSTREAK_HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("INKSTREAK_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("inkstreak-dev")
            } else {
                base_dir.join("inkstreak")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
