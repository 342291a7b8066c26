//! Error types for the transfer stage.

use std::path::PathBuf;

use thiserror::Error;

/// Per-item transfer failures.
///
/// These never abort the run: the orchestrator logs them, bumps the failure
/// counter and moves on to the next item.
#[derive(Error, Debug)]
pub enum TransferError {
    /// An I/O error while copying or linking.
    #[error("Failed to {mode} {path}: {source}")]
    Io {
        mode: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
}
