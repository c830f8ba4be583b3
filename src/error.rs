// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the alignment, fragmentation and I/O layers.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("{operation} needs at least {required} valid rows, {rows} remain")]
    DataIntegrity {
        operation: &'static str,
        rows: usize,
        required: usize,
    },
    #[error("cross-correlation peak is shared by lags {peaks:?}; refusing to pick one")]
    AlignmentAmbiguity { peaks: Vec<isize> },
    #[error("maneuver #{index} is missing field '{field}'")]
    MissingField { field: &'static str, index: usize },
    #[error("column '{0}' not found")]
    MissingColumn(String),
    #[error("column '{column}' has {found} rows, series has {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[cfg(feature = "hdf5")]
    #[error("{}: {message}", path.display())]
    Hdf5 { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

impl AnalysisError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AnalysisError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        AnalysisError::Csv {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        AnalysisError::Json {
            path: path.into(),
            source,
        }
    }
}
