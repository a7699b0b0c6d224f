//! Logging and tracing bootstrap
//!
//! Console layer for the operator plus a persistent, ANSI-free file layer for
//! post-hoc diagnosis. Initialized once per process, before the run starts.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::error::{Result, SetupError};

/// Default log file, written next to the working directory of the run
pub const DEFAULT_LOG_FILE: &str = "benchsetup.log";

/// Environment variable overriding the log filter (tracing `EnvFilter` syntax)
pub const LOG_ENV_VAR: &str = "BENCHSETUP_LOG";

/// Initialize the logging subsystem. Returns the log file path in use.
pub fn init(log_file: Option<&Path>, verbose: bool) -> Result<PathBuf> {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(default_level));

    let path = log_file
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| SetupError::Io {
            message: format!("failed to open log file {}: {e}", path.display()),
        })?;

    let console_layer = fmt::layer().with_target(false);
    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(Arc::new(file));

    Registry::default()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| SetupError::Io {
            message: format!("failed to initialize logging: {e}"),
        })?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        log_file = %path.display(),
        "benchsetup starting"
    );

    Ok(path)
}
