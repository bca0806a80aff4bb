//! Error types for the facerig-riglogic crate.

/// Error type for all fallible operations in the facerig-riglogic crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RigLogicError {
    /// Returned when a driver or output array has the wrong length.
    #[error("length mismatch: expected {expected}, got {got} for {field}")]
    LengthMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
        /// Name of the mismatched array.
        field: &'static str,
    },

    /// Returned by strict construction when names break the naming convention.
    #[error(
        "naming convention violated: {unclassified} unclassified, {orphaned} in-betweens without a driver, {unresolved} unresolved correctives (first: {first})"
    )]
    Validation {
        /// Names matching no pattern.
        unclassified: usize,
        /// In-betweens whose parent driver is missing or which duplicate another threshold.
        orphaned: usize,
        /// Correctives with a component that names no known shape.
        unresolved: usize,
        /// First offending name.
        first: String,
    },
}
