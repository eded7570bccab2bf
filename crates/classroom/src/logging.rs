//! Tracing setup.
//!
//! The terminal belongs to the UI, so events go to a log file in the data
//! directory. `RUST_LOG` overrides the verbosity flags.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Error raised when logging cannot be set up.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The log file could not be created or opened.
    #[error("cannot open log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A global subscriber is already installed.
    #[error("tracing subscriber already installed")]
    AlreadyInstalled,
}

/// Builds the filter: `RUST_LOG` if set and valid, else the config level.
#[must_use]
pub fn env_filter(config: &Config) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_directive()))
}

/// Installs the global subscriber writing to [`Config::log_file`].
///
/// Returns the log file path.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or a subscriber is already
/// installed. Callers run without logging in that case.
pub fn init(config: &Config) -> Result<PathBuf, LoggingError> {
    let path = config.log_file();
    let open_err = |source| LoggingError::Open {
        path: path.clone(),
        source,
    };

    fs::create_dir_all(&config.data_dir).map_err(open_err)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(open_err)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInstalled)?;

    Ok(path)
}
