mod config;
pub mod routine;

pub use config::{Config, FilesConfig};
pub use routine::{load_routine, load_tasks, save_plan};

use std::path::PathBuf;

/// Returns `~/.config/weekplan[-dev]/` based on WEEKPLAN_ENV.
///
/// Set WEEKPLAN_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("WEEKPLAN_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("weekplan-dev")
    } else {
        base_dir.join("weekplan")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
