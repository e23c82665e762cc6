mod config;
pub mod plan;

pub use config::{Config, PlannerConfig};
pub use plan::{Plan, PlanStore};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the slotfill data directory, creating it if needed.
///
/// `SLOTFILL_DATA_DIR` overrides the location. Otherwise this is
/// `~/.config/slotfill[-dev]/`, where SLOTFILL_ENV=dev selects the
/// development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("SLOTFILL_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("SLOTFILL_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("slotfill-dev")
            } else {
                base_dir.join("slotfill")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
