//! Error types for pagesim.

use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong before or around a simulation run.
///
/// The engines themselves cannot fail once started; every variant here is
/// either a rejected configuration or an I/O problem at the edges.
#[derive(Debug, Error)]
pub enum Error {
    #[error("frame count must be at least 1, got {0}")]
    InvalidCapacity(usize),

    #[error("page universe must contain at least one page")]
    EmptyUniverse,

    #[error("working set of {working_set} pages does not fit in a universe of {universe}")]
    WorkingSetTooLarge { working_set: usize, universe: usize },

    #[error("working set must contain at least one page")]
    EmptyWorkingSet,

    #[error("working set dwell time must be at least 1 access")]
    ZeroDwell,

    #[error("write probability must be within [0, 1], got {0}")]
    InvalidWriteProbability(f64),

    #[error("frame range {min}..={max} is empty")]
    EmptyFrameRange { min: usize, max: usize },

    #[error("unrecognized replacement policy: {0}")]
    UnknownPolicy(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("bad arguments: {0}")]
    Args(#[from] pico_args::Error),

    #[error("could not install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}
