//! Construction-time options for the rule solver.

use facerig_matrix::{DEFAULT_EPS, DEFAULT_SPARSE_THRESHOLD};

use crate::error::SolverError;

/// Options applied while compiling a [`RuleSolver`](crate::RuleSolver).
///
/// # Example
///
/// ```
/// use facerig_solver::SolverConfig;
///
/// let config = SolverConfig::new()
///     .with_sparse_deltas(false)
///     .with_invert_eps(1e-8);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    /// Store the deltas matrix as sparse triples.
    sparse_deltas: bool,
    /// Entries with `|value| <= sparse_threshold` are dropped from sparse deltas.
    sparse_threshold: f64,
    /// Smallest diagonal magnitude accepted during inversion.
    invert_eps: f64,
}

impl SolverConfig {
    /// Creates the default configuration.
    ///
    /// Defaults: `sparse_deltas = true`, `sparse_threshold = 1e-3`,
    /// `invert_eps = 1e-5`.
    pub fn new() -> Self {
        Self {
            sparse_deltas: true,
            sparse_threshold: DEFAULT_SPARSE_THRESHOLD,
            invert_eps: DEFAULT_EPS,
        }
    }

    /// Chooses between sparse and dense storage for the deltas matrix.
    pub fn with_sparse_deltas(mut self, sparse_deltas: bool) -> Self {
        self.sparse_deltas = sparse_deltas;
        self
    }

    /// Sets the sparsification threshold.
    pub fn with_sparse_threshold(mut self, sparse_threshold: f64) -> Self {
        self.sparse_threshold = sparse_threshold;
        self
    }

    /// Sets the inversion singularity bound.
    pub fn with_invert_eps(mut self, invert_eps: f64) -> Self {
        self.invert_eps = invert_eps;
        self
    }

    /// Returns whether deltas are stored sparse.
    pub fn sparse_deltas(&self) -> bool {
        self.sparse_deltas
    }

    /// Returns the sparsification threshold.
    pub fn sparse_threshold(&self) -> f64 {
        self.sparse_threshold
    }

    /// Returns the inversion singularity bound.
    pub fn invert_eps(&self) -> f64 {
        self.invert_eps
    }

    /// Validates this configuration.
    ///
    /// Returns an error if `sparse_threshold` is negative or non-finite, or if
    /// `invert_eps` is non-positive or non-finite.
    pub fn validate(&self) -> Result<(), SolverError> {
        if !self.sparse_threshold.is_finite() || self.sparse_threshold < 0.0 {
            return Err(SolverError::InvalidConfig {
                reason: format!(
                    "sparse_threshold must be finite and >= 0, got {}",
                    self.sparse_threshold
                ),
            });
        }
        if !self.invert_eps.is_finite() || self.invert_eps <= 0.0 {
            return Err(SolverError::InvalidConfig {
                reason: format!(
                    "invert_eps must be finite and positive, got {}",
                    self.invert_eps
                ),
            });
        }
        Ok(())
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = SolverConfig::default();
        assert!(cfg.sparse_deltas());
        assert!((cfg.sparse_threshold() - 1e-3).abs() < f64::EPSILON);
        assert!((cfg.invert_eps() - 1e-5).abs() < f64::EPSILON);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_builder_chaining() {
        let cfg = SolverConfig::new()
            .with_sparse_deltas(false)
            .with_sparse_threshold(0.0)
            .with_invert_eps(1e-9);
        assert!(!cfg.sparse_deltas());
        assert_eq!(cfg.sparse_threshold(), 0.0);
        assert_eq!(cfg.invert_eps(), 1e-9);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_validate_sparse_threshold() {
        for bad in [-1e-3, f64::NAN, f64::INFINITY] {
            let result = SolverConfig::new().with_sparse_threshold(bad).validate();
            assert!(
                matches!(result, Err(SolverError::InvalidConfig { .. })),
                "threshold {bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_validate_invert_eps() {
        for bad in [0.0, -1.0, f64::NAN] {
            let result = SolverConfig::new().with_invert_eps(bad).validate();
            assert!(
                matches!(result, Err(SolverError::InvalidConfig { ref reason }) if reason.contains("invert_eps")),
                "eps {bad} should be rejected"
            );
        }
    }
}
