//! Platform-specific directory utilities.

use std::path::PathBuf;

const APP_NAME: &str = "infinity-room";

/// Log directory.
///
/// - macOS: `~/Library/Caches/infinity-room/logs`
/// - Linux: `~/.cache/infinity-room/logs` (or `$XDG_CACHE_HOME/infinity-room/logs`)
/// - Windows: `%LOCALAPPDATA%\infinity-room\logs`
/// - Fallback: `/tmp/infinity-room/logs`
pub fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp").join(APP_NAME))
        .join("logs")
}

/// Save data directory.
///
/// - macOS: `~/Library/Application Support/infinity-room`
/// - Linux: `~/.local/share/infinity-room` (or `$XDG_DATA_HOME/infinity-room`)
/// - Windows: `%APPDATA%\infinity-room`
/// - Fallback: `./save_data`
pub fn save_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}
