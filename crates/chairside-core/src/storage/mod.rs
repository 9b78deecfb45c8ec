pub mod config;
pub mod migrations;
pub mod salon_db;

pub use config::Config;
pub use salon_db::SalonDb;

use std::path::PathBuf;

/// Returns `~/.config/chairside[-dev]/` based on CHAIRSIDE_ENV.
///
/// Set CHAIRSIDE_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("CHAIRSIDE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("chairside-dev")
    } else {
        base_dir.join("chairside")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
