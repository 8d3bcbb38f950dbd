//! Platform-specific directories for logs and saves.
//!
//! - Linux: `~/.cache/rogue/logs` and `~/.local/share/rogue/saves`
//! - macOS: `~/Library/Caches/rogue/logs` and `~/Library/Application Support/rogue/saves`
//! - Windows: `%LOCALAPPDATA%\rogue\logs` and `%APPDATA%\rogue\saves`
use std::path::PathBuf;

use directories::ProjectDirs;

const APPLICATION: &str = "rogue";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", APPLICATION)
}

/// Falls back to `/tmp/rogue/logs` when no home directory is known.
pub fn log_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp").join(APPLICATION))
        .join("logs")
}

/// Falls back to `./save_data` when no home directory is known.
pub fn save_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join("saves"))
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}
