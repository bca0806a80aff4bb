//! Error types for the facerig-matrix crate.

/// Error type for all fallible operations in the facerig-matrix crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MatrixError {
    /// Returned when a vector or operand does not have the expected length.
    #[error("length mismatch: expected {expected}, got {got} for {field}")]
    LengthMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
        /// Name of the mismatched operand.
        field: &'static str,
    },

    /// Returned when an operation that requires a square matrix gets another shape.
    #[error("matrix must be square, got {rows}x{cols}")]
    NotSquare {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// Returned when nested rows do not all have the same length.
    #[error("ragged rows: row {row} has {got} columns, expected {expected}")]
    RaggedRows {
        /// Index of the offending row.
        row: usize,
        /// Column count of the first row.
        expected: usize,
        /// Column count of the offending row.
        got: usize,
    },

    /// Returned when inversion meets a diagonal entry too close to zero.
    #[error("matrix is singular: diagonal entry {row} is {value}")]
    Singular {
        /// Row of the vanishing diagonal entry.
        row: usize,
        /// Value of the diagonal entry after elimination.
        value: f64,
    },
}
