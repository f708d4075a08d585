use std::io;

use thiserror::Error;

use crate::preferences::PreferenceError;

/// Errors originating from `burrow-core` operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("filesystem I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid entry name: {0:?}")]
    InvalidName(String),

    #[error("preferences error: {0}")]
    Preferences(#[from] PreferenceError),

    #[error("navigator worker channel closed")]
    WorkerClosed,
}

pub type Result<T> = std::result::Result<T, Error>;
