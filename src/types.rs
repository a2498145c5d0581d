//! Core types for QAM symbol mapping
//!
//! Complex baseband samples are represented with `num_complex::Complex64`:
//! the real part carries the in-phase (I) amplitude and the imaginary part
//! the quadrature (Q) amplitude of one constellation point.

use num_complex::Complex64;

/// Type alias for complex numbers using f64 precision
pub type Complex = Complex64;

/// Result type for modulation operations
pub type QamResult<T> = Result<T, QamError>;

/// Errors that can occur while building a constellation or mapping symbols
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QamError {
    /// The modulation order is not an exact power of 4.
    #[error("invalid modulation order {order}: must be 4^k for integer k >= 1 (4, 16, 64, ...)")]
    InvalidOrder { order: usize },

    /// The input data does not match the chosen mode and order.
    #[error("malformed input: {reason}")]
    MalformedInput { reason: String },

    /// An input-mode tag that names neither of the two supported modes.
    #[error("unsupported input mode {0:?}: expected \"bits\" or \"indices\"")]
    UnsupportedMode(String),

    /// A coding tag that names neither of the two supported codings.
    #[error("unsupported coding {0:?}: expected \"gray\" or \"binary\"")]
    UnsupportedCoding(String),

    /// A rail index escaped the [0, L) range after mapping. Indicates a
    /// table-construction bug; never expected in correct operation.
    #[error("rail index {index} out of range for rail cardinality {rail}")]
    InternalInvariantViolation { index: usize, rail: usize },
}
