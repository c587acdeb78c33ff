//! Error types for sketch operations

use thiserror::Error;

/// Result type for sketch operations.
pub type PlayResult<T> = Result<T, PlayError>;

/// Errors raised by the drawing toolkit.
///
/// These signal programming errors in a sketch (an impossible range, an empty
/// choice) rather than runtime conditions, so sketches usually just `?` them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlayError {
    /// Integer range whose upper bound is below its lower bound.
    #[error("Invalid range: to ({to}) is less than from ({from})")]
    InvalidRange { from: i64, to: i64 },

    /// Integer range that contains no values.
    #[error("Empty range: [{from}, {to}) contains no integers")]
    EmptyRange { from: i64, to: i64 },

    /// Weighted choice whose weights do not add up to something positive.
    #[error("Weights must have a positive total, got {0}")]
    NonPositiveWeight(f64),

    /// Sampling from an empty collection.
    #[error("Cannot sample from an empty collection")]
    EmptySample,

    /// Drawing a point sequence with no points.
    #[error("Cannot draw an empty point sequence")]
    EmptyPoints,

    /// Surface dimensions that are not finite and positive.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },

    /// Any other out-of-domain argument.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Failure reported by a sketch itself.
    #[error("Sketch failed: {0}")]
    Sketch(String),
}
