//! Error types.
//!
//! Every error here is fatal: the process prints it and exits non-zero.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures of the persistence layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The data file exists but is not a valid task document.
    #[error("data file {} is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode task list: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write data file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Top-level error returned from the command handlers.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),

    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
