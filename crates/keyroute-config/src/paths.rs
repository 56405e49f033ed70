//! Platform-specific paths for keyroute configuration.
//!
//! - **User config**: `~/.config/keyroute/` (Linux), `~/Library/Application Support/keyroute/` (macOS), `%APPDATA%\keyroute\` (Windows)
//! - **User bindings**: `bindings.toml` inside the user config directory
//!
//! # Example
//!
//! ```rust,no_run
//! use keyroute_config::paths;
//!
//! let path = paths::user_bindings_path();
//! println!("Bindings: {}", path.display());
//! ```

use std::path::PathBuf;

use crate::error::ConfigError;

/// Application name used for directory paths.
const APP_NAME: &str = "keyroute";

/// File name of the user's binding table.
pub const BINDINGS_FILE: &str = "bindings.toml";

/// Returns the user-specific configuration directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the path of the user's binding table.
///
/// The file may not exist.
pub fn user_bindings_path() -> PathBuf {
    user_config_dir().join(BINDINGS_FILE)
}

/// Ensures the user config directory exists, creating it if necessary.
pub fn ensure_user_config_dir() -> Result<PathBuf, ConfigError> {
    let dir = user_config_dir();
    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| ConfigError::create_dir(&dir, e))?;
    }
    Ok(dir)
}
