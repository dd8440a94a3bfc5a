//! Configuration file handling

use serde::Deserialize;

use super::paths::config_path;
use super::Result;

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Fixture file suffixes
    #[serde(default)]
    pub suffixes: Suffixes,

    /// Run loop settings
    #[serde(default)]
    pub run: RunSettings,
}

/// Fixture suffix overrides
///
/// Unset entries fall back to the built-in defaults.
#[derive(Debug, Deserialize, Default)]
pub struct Suffixes {
    /// Suffix of the file fed to the program's stdin
    pub input: Option<String>,

    /// Suffix of the file holding the expected stdout
    pub output: Option<String>,
}

/// Run loop settings
#[derive(Debug, Deserialize)]
pub struct RunSettings {
    /// Per-test timeout in seconds; no timeout when absent
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Wait for Enter after every failed test
    #[serde(default = "default_true")]
    pub pause_on_failure: bool,

    /// Ask "Continue? [Y/n]" before the first test
    #[serde(default = "default_true")]
    pub confirm: bool,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            pause_on_failure: default_true(),
            confirm: default_true(),
        }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = config_path() {
            if path.exists() {
                let content = std::fs::read_to_string(&path).map_err(|e| {
                    super::Error::FileRead {
                        path: path.display().to_string(),
                        error: e.to_string(),
                    }
                })?;
                return Self::parse(&content);
            }
        }
        Ok(Self::default())
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| super::Error::ConfigParse(e.to_string()))
    }
}
