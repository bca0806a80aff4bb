//! Error types for the facerig-signals crate.

/// Error type for all fallible operations in the facerig-signals crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SignalsError {
    /// Returned when a value array does not match its name list.
    #[error("length mismatch: expected {expected}, got {got} for {field}")]
    LengthMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
        /// Name of the mismatched array.
        field: &'static str,
    },
}
