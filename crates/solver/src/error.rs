//! Error types for the facerig-solver crate.

use facerig_matrix::MatrixError;

/// Error type for all fallible operations in the facerig-solver crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SolverError {
    /// Returned when the rule configuration text cannot be parsed.
    #[error("malformed rule configuration: {reason}")]
    MalformedConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a solver configuration parameter is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when an input or output array has the wrong length.
    #[error("length mismatch: expected {expected}, got {got} for {field}")]
    LengthMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
        /// Name of the mismatched array.
        field: &'static str,
    },

    /// Wrapped error from the matrix crate (e.g. conflicting rules make the
    /// cross-evaluation matrix singular).
    #[error(transparent)]
    Matrix(#[from] MatrixError),
}
