//! Configuration paths
//!
//! Uses the directories crate for platform-appropriate locations:
//! - Linux: `~/.config/gorpretest/`
//! - macOS: `~/Library/Application Support/gorpretest/`
//! - Windows: `%APPDATA%\gorpretest\`

use std::path::{Path, PathBuf};

/// Name used for the configuration directory
const APP_NAME: &str = "gorpretest";

/// Get the configuration directory path
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the configuration file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Make `path` absolute against the current directory
///
/// Does not touch the filesystem beyond reading the working directory,
/// so symlinks are preserved.
pub fn absolute(path: &Path) -> std::io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
