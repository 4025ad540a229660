//! Error types for the simulation harness.
//!
//! Every failure the harness can observe is fatal: configuration problems
//! abort before the first tick, and anything raised by the device model or
//! the coverage writer aborts the run. The binary maps all of them to a
//! non-zero exit code.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, SimError>;

/// Errors raised while configuring or running a simulation.
#[derive(Debug, Error)]
pub enum SimError {
    /// Malformed configuration file, plus-argument or model selection.
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem failure outside the coverage writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A check inside the device model failed.
    #[error("assertion failed at time {time}: {message}")]
    Assertion {
        /// Simulated time at which the check fired.
        time: u64,
        /// Model-supplied description.
        message: String,
    },

    /// The coverage database could not be written.
    #[error("failed to write coverage to {}: {source}", path.display())]
    CoverageWrite {
        /// Destination that was being written.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },

    /// The configured tick bound was reached before the design finished.
    #[error("design did not finish within {limit} ticks")]
    TickLimitExceeded {
        /// The bound from `general.max_ticks`.
        limit: u64,
    },
}

impl SimError {
    /// Builds a configuration error from anything printable.
    pub fn config(msg: impl Into<String>) -> Self {
        SimError::Config(msg.into())
    }

    /// Builds an assertion failure at the given simulated time.
    pub fn assertion(time: u64, message: impl Into<String>) -> Self {
        SimError::Assertion {
            time,
            message: message.into(),
        }
    }
}

impl From<toml::de::Error> for SimError {
    fn from(err: toml::de::Error) -> Self {
        SimError::Config(err.to_string())
    }
}
