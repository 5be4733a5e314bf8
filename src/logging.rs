//! Diagnostic output.
//!
//! Logs always go to stderr: stdout carries protocol frames.

use crate::config::LogLevel;
use crate::error::{Error, Result};
use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber at `level`.
///
/// `RUST_LOG` directives are honoured in addition to the configured level.
pub fn init(level: LogLevel) -> Result<()> {
    let level: tracing::Level = level.into();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .try_init()
        .map_err(|e| Error::Config(format!("failed to install logger: {}", e)))
}
