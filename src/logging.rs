//! Tracing setup for the binary.
//!
//! The terminal belongs to the UI, so events go to `lab.log` in the data
//! directory instead of stdout.

use crate::config::{LabConfig, LOG_ENV};
use std::fs::{self, OpenOptions};
use std::io;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// `LAB_LOG` wins over the configured filter.
pub fn filter_for(config: &LabConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(&config.log_filter))
}

/// Install the global subscriber. Call once, before the UI starts.
pub fn init(config: &LabConfig) -> io::Result<()> {
    let path = config.log_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter_for(config))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e))?;

    tracing::info!(log = %path.display(), "logging started");
    Ok(())
}
