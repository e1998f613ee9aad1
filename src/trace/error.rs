//! Error types for trace reading
//!
//! Every failure the reader can hit is terminal for the invocation: the CLI
//! reports it and exits with code 1. Missing *auxiliary* files are not errors,
//! see [`crate::trace::auxiliary`].

use std::path::PathBuf;
use thiserror::Error;

/// Result alias for trace operations
pub type TraceResult<T> = Result<T, TraceError>;

/// Errors raised while locating, reading or validating a trace file
#[derive(Debug, Error)]
pub enum TraceError {
    /// The input file does not exist
    #[error("trace file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The input holds no data rows (only comments, blank lines, or nothing)
    #[error("trace is empty: {0}")]
    Empty(String),

    /// A data row contains a token that is not a finite floating-point number
    #[error("line {line}: {message}")]
    Malformed {
        /// 1-based line number in the source
        line: usize,
        /// Description of the offending token
        message: String,
    },

    /// A data row has fewer columns than one time column plus one entity
    #[error("line {line}: found {found} columns, at least {required} required")]
    TooFewColumns {
        line: usize,
        found: usize,
        required: usize,
    },

    /// A data row has a different column count than the first row
    #[error("line {line}: expected {expected} columns, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// `columns - 1` is not a multiple of the entity stride
    #[error("{columns} state columns cannot be split into groups of {stride}")]
    StrideMismatch { columns: usize, stride: usize },

    /// Time went backwards between two consecutive rows
    #[error("line {line}: time decreases from {previous} to {current}")]
    NonMonotonicTime {
        line: usize,
        previous: f64,
        current: f64,
    },

    /// Any other I/O failure
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
