//! Path utilities for the local auth store
//!
//! Centralizes filesystem path logic so the adapter layer never hardcodes
//! locations. Resolution order: explicit `ACCOUNT_SELECT_DATA_DIR`
//! override, then the platform per-user application data directory.

use std::path::PathBuf;

use crate::errors::AppError;

/// Environment variable overriding the data directory, mainly for tests
/// and sandboxed hosts.
pub const DATA_DIR_ENV: &str = "ACCOUNT_SELECT_DATA_DIR";

/// Gets the application data directory.
///
/// # Returns
/// * `Ok(PathBuf)` - `$ACCOUNT_SELECT_DATA_DIR`, `%APPDATA%\account-select`,
///   or `$HOME/.local/share/account-select`, whichever resolves first
/// * `Err(AppError)` - No candidate environment variable is set
///
/// # Side Effects
/// - Creates the directory (and parents) if it doesn't exist
pub fn data_dir() -> Result<PathBuf, AppError> {
    let dir = if let Ok(override_dir) = std::env::var(DATA_DIR_ENV) {
        PathBuf::from(override_dir)
    } else if let Ok(appdata) = std::env::var("APPDATA") {
        PathBuf::from(appdata).join("account-select")
    } else if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".local/share/account-select")
    } else {
        return Err(AppError::Other {
            message: "no data directory: set ACCOUNT_SELECT_DATA_DIR, APPDATA or HOME".to_string(),
            source: None,
        });
    };
    std::fs::create_dir_all(&dir).map_err(|e| AppError::IoError {
        path: dir.to_string_lossy().to_string(),
        source: e,
    })?;
    Ok(dir)
}

/// Gets the full path to the local auth store file.
///
/// # Side Effects
/// - Creates the data directory if it doesn't exist (via `data_dir`)
pub fn auth_store_path() -> Result<PathBuf, AppError> {
    Ok(data_dir()?.join("local_auth.json"))
}
