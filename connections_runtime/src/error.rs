//! Runtime error types.

use std::io;

use connections_kernel::generator::GeneratorError;
use thiserror::Error;

/// Persistence failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("value could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Failures surfaced by a game session.
///
/// Invalid moves are never errors; they are reported as unapplied
/// transitions. A failed write at the end of a game is not an error either:
/// the game moves on and the failure is kept on the session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("opening game store failed: {0}")]
    Store(#[from] StoreError),
    #[error("puzzle generation failed: {0}")]
    Generator(#[from] GeneratorError),
    #[error("game config rejected: {0}")]
    Config(String),
}

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file unreadable: {0}")]
    Io(#[from] io::Error),
    #[error("config JSON invalid: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("config rejected: {0}")]
    Invalid(String),
}
