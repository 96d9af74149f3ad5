//! Lab configuration, read from `~/.lab/config.json`.

use crate::error::LabError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable that overrides `log_filter`.
pub const LOG_ENV: &str = "LAB_LOG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    /// Frame interval for the terminal UI
    pub tick_rate_ms: u64,

    /// `tracing_subscriber` filter directive used when `LAB_LOG` is unset
    pub log_filter: String,

    /// Show the guided walkthrough panel beside the bench
    pub show_walkthrough: bool,

    /// Directory for the session, log and config files (None = ~/.lab)
    pub data_dir: Option<PathBuf>,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 50,
            log_filter: "lab=info".to_string(),
            show_walkthrough: true,
            data_dir: None,
        }
    }
}

impl LabConfig {
    /// Verbose logging on top of whatever the file configured (`--debug`).
    pub fn with_debug_logging(self) -> Self {
        Self {
            log_filter: "lab=debug".to_string(),
            ..self
        }
    }

    /// Resolved data directory.
    pub fn lab_dir(&self) -> io::Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_lab_dir(),
        }
    }

    pub fn session_path(&self) -> io::Result<PathBuf> {
        Ok(self.lab_dir()?.join("session.json"))
    }

    pub fn log_path(&self) -> io::Result<PathBuf> {
        Ok(self.lab_dir()?.join("lab.log"))
    }
}

/// `~/.lab`
pub fn default_lab_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    Ok(home_dir.join(".lab"))
}

/// Read a config file. A missing file yields the defaults; a file that
/// exists but does not parse is an error.
pub fn load_config_from(path: &Path) -> Result<LabConfig, LabError> {
    match fs::read_to_string(path) {
        Ok(json) => Ok(serde_json::from_str(&json)?),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(LabConfig::default()),
        Err(e) => Err(e.into()),
    }
}

/// Read a config file, falling back to the defaults when it is unusable.
/// The error is handed back so the caller can report it once logging or
/// stderr is available.
pub fn load_config_or_default(path: &Path) -> (LabConfig, Option<LabError>) {
    match load_config_from(path) {
        Ok(config) => (config, None),
        Err(e) => (LabConfig::default(), Some(e)),
    }
}

/// Load `~/.lab/config.json`. See [`load_config_or_default`].
pub fn load_config() -> (LabConfig, Option<LabError>) {
    match default_lab_dir() {
        Ok(dir) => load_config_or_default(&dir.join("config.json")),
        Err(e) => (LabConfig::default(), Some(e.into())),
    }
}
