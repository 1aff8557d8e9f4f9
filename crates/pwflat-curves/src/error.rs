//! Error types for curve and bootstrap operations.
//!
//! All validation failures are reported before any curve or instrument is
//! mutated, so a failed operation never leaves partial state behind.

use pwflat_math::MathError;
use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve and bootstrap operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// Invalid input data.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },

    /// Parallel time/value arrays have different lengths.
    #[error("Mismatched lengths: {times} times vs {values} values")]
    MismatchedLengths {
        /// Number of times.
        times: usize,
        /// Number of values.
        values: usize,
    },

    /// Times are not strictly increasing.
    #[error("Non-monotonic times at index {index}: {prev:.6} >= {current:.6}")]
    NonMonotonicTimes {
        /// Index where monotonicity violation occurred.
        index: usize,
        /// Previous time value.
        prev: f64,
        /// Current time value.
        current: f64,
    },

    /// An instrument with no cash flows was used where a time is required.
    #[error("Instrument has no cash flows")]
    EmptyInstrument,

    /// Attempted to extend a curve or instrument with a non-increasing time.
    #[error("Cannot extend: time {requested:.6} is not past the current end {last:.6}")]
    ExtendNotIncreasing {
        /// Current last time.
        last: f64,
        /// Requested new time.
        requested: f64,
    },

    /// A closed-form branch required the logarithm of a non-positive value.
    ///
    /// This signals inconsistent price/cash-flow signs and is reported as an
    /// error rather than masked as NaN.
    #[error("Domain error: {reason}")]
    Domain {
        /// Description of the domain violation.
        reason: String,
    },

    /// The root-finding engine failed.
    #[error(transparent)]
    Math(#[from] MathError),
}

impl CurveError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates a domain error.
    #[must_use]
    pub fn domain(reason: impl Into<String>) -> Self {
        Self::Domain {
            reason: reason.into(),
        }
    }
}
