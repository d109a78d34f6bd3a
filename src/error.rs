//! Error type shared by the loader, renderer and report writers

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal failures. Missing input files, malformed lines and absent metric
/// columns are handled inline and never surface here.
#[derive(Debug, Error)]
pub enum TopicPlotError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("configuration error: {0}")]
    Config(String),
    #[error("dataset '{dataset}': column '{column}' holds non-numeric value {value}")]
    NonNumeric {
        dataset: String,
        column: String,
        value: String,
    },
    #[error("failed to render '{path}': {reason}")]
    Render { path: PathBuf, reason: String },
    #[error("failed to write summary: {0}")]
    Summary(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl TopicPlotError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        TopicPlotError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, TopicPlotError>;
