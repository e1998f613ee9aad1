//! Error types for derived-quantity computation

use thiserror::Error;

use crate::trace::EntityLayout;

/// Result alias for analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;

#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    /// A reduction was asked for on an empty signal
    #[error("signal is empty")]
    EmptySignal,

    /// Paired inputs of different lengths
    #[error("length mismatch: {left} versus {right} samples")]
    LengthMismatch { left: usize, right: usize },

    /// Sampling interval is zero, negative or not finite
    #[error("invalid time step {0}")]
    InvalidTimeStep(f64),

    /// The trace layout has no velocity columns
    #[error("{0} traces carry no velocities")]
    MissingVelocities(EntityLayout),

    /// Histogram bin count must be positive
    #[error("histogram needs at least one bin")]
    InvalidBins,
}
