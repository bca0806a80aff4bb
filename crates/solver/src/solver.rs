//! Rule compilation and the per-frame evaluator.

use facerig_matrix::{DenseMatrix, Matrix, SparseMatrix};
use tracing::debug;

use crate::config::SolverConfig;
use crate::error::SolverError;
use crate::parse::{ParsedRules, parse_rules};
use crate::rule::Rule;

/// Storage for the compiled deltas matrix.
#[derive(Debug, Clone)]
enum Deltas {
    Dense(DenseMatrix),
    Sparse(SparseMatrix),
}

impl Deltas {
    fn as_matrix(&self) -> &dyn Matrix {
        match self {
            Self::Dense(m) => m,
            Self::Sparse(m) => m,
        }
    }
}

/// Maps tracked input signals to output blendshape weights through a
/// compiled rule set.
///
/// Built once from configuration text; afterwards only the internal
/// activation buffer changes, on every [`RuleSolver::eval`]. Each character
/// driven concurrently needs its own solver (clone one if the configuration
/// is shared).
#[derive(Debug, Clone)]
pub struct RuleSolver {
    input_signals: Vec<String>,
    output_signals: Vec<String>,
    rules: Vec<Rule>,
    deltas: Deltas,
    activations: Vec<f64>,
}

impl RuleSolver {
    /// Compiles `text` with the default [`SolverConfig`] (sparse deltas).
    ///
    /// # Errors
    ///
    /// See [`RuleSolver::with_config`].
    pub fn new(text: &str) -> Result<Self, SolverError> {
        Self::with_config(text, &SolverConfig::default())
    }

    /// Compiles `text` into a solver.
    ///
    /// Builds the per-rule peak and target matrices, evaluates every rule at
    /// every other rule's peak into a square cross-evaluation matrix `M`
    /// (unit diagonal), and precomputes `deltas = transpose(M⁻¹) × targets`
    /// so that feeding any rule's exact peak reproduces that rule's targets.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::InvalidConfig`] if `config` fails validation,
    /// [`SolverError::MalformedConfig`] if `text` cannot be parsed, and
    /// [`SolverError::Matrix`] if the rules conflict so that `M` cannot be
    /// inverted.
    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    pub fn with_config(text: &str, config: &SolverConfig) -> Result<Self, SolverError> {
        config.validate()?;
        let ParsedRules {
            rules,
            signals,
            targets,
        } = parse_rules(text)?;

        let n_rules = rules.len();
        let mut peaks = DenseMatrix::zeros(n_rules, signals.len());
        let mut target_weights = DenseMatrix::zeros(n_rules, targets.len());
        for (r, rule) in rules.iter().enumerate() {
            for d in rule.drivers() {
                peaks[(r, d.index)] = d.weight;
            }
            for t in rule.targets() {
                target_weights[(r, t.index)] = t.weight;
            }
        }

        let mut cross = DenseMatrix::zeros(n_rules, n_rules);
        for (r, rule) in rules.iter().enumerate() {
            for c in 0..n_rules {
                cross[(r, c)] = rule.eval(peaks.row(c));
            }
            debug_assert_eq!(cross[(r, r)], 1.0, "rule {r} is not active at its own peak");
        }

        cross.invert_with_eps(config.invert_eps())?;
        cross.transpose()?;
        let dense = cross.multiply(&target_weights)?;

        let deltas = if config.sparse_deltas() {
            let sparse = SparseMatrix::from_dense_with_threshold(&dense, config.sparse_threshold());
            debug!(
                nnz = sparse.nnz(),
                cells = n_rules * targets.len(),
                "compiled sparse deltas"
            );
            Deltas::Sparse(sparse)
        } else {
            Deltas::Dense(dense)
        };

        debug!(
            n_rules,
            n_inputs = signals.len(),
            n_outputs = targets.len(),
            "rule solver ready"
        );

        Ok(Self {
            input_signals: signals.into_names(),
            output_signals: targets.into_names(),
            rules,
            deltas,
            activations: vec![0.0; n_rules],
        })
    }

    /// Input signal names; position is the index expected by [`RuleSolver::eval`].
    pub fn input_signals(&self) -> &[String] {
        &self.input_signals
    }

    /// Output signal names; position is the index written by [`RuleSolver::eval`].
    pub fn output_signals(&self) -> &[String] {
        &self.output_signals
    }

    /// The compiled rules.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of compiled rules.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// The `rules × outputs` deltas matrix.
    pub fn deltas(&self) -> &dyn Matrix {
        self.deltas.as_matrix()
    }

    /// Returns `true` if the deltas matrix is stored sparse.
    pub fn is_sparse(&self) -> bool {
        matches!(self.deltas, Deltas::Sparse(_))
    }

    /// Activations computed by the most recent [`RuleSolver::eval`].
    pub fn activations(&self) -> &[f64] {
        &self.activations
    }

    /// Evaluates one frame.
    ///
    /// Computes every rule's activation from `signals`, multiplies the
    /// activation vector by the deltas matrix into `outputs`, and clamps each
    /// output to `[0, 1]`. Every element of `outputs` is overwritten.
    ///
    /// A rule whose activation is not finite (e.g. a NaN signal after lost
    /// tracking) counts as inactive, so outputs always stay in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::LengthMismatch`] if `signals` or `outputs` does
    /// not match [`RuleSolver::input_signals`] / [`RuleSolver::output_signals`].
    /// Nothing is written in that case.
    pub fn eval(&mut self, signals: &[f64], outputs: &mut [f64]) -> Result<(), SolverError> {
        if signals.len() != self.input_signals.len() {
            return Err(SolverError::LengthMismatch {
                expected: self.input_signals.len(),
                got: signals.len(),
                field: "signals",
            });
        }
        if outputs.len() != self.output_signals.len() {
            return Err(SolverError::LengthMismatch {
                expected: self.output_signals.len(),
                got: outputs.len(),
                field: "outputs",
            });
        }

        for (a, rule) in self.activations.iter_mut().zip(&self.rules) {
            let activation = rule.eval(signals);
            *a = if activation.is_finite() { activation } else { 0.0 };
        }
        self.deltas
            .as_matrix()
            .row_mult_into(&self.activations, outputs);
        for o in outputs.iter_mut() {
            *o = if o.is_nan() { 0.0 } else { o.clamp(0.0, 1.0) };
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const TWO_PEAKS: &str = r#"[
        { "drivers": { "s": 0.5 }, "targets": { "half": 1.0 } },
        { "drivers": { "s": 1.0 }, "targets": { "full": 1.0 } }
    ]"#;

    #[test]
    fn test_single_rule_round_trip() {
        let mut solver =
            RuleSolver::new(r#"[{ "drivers": { "x": 0.3 }, "targets": { "y": 1.0 } }]"#).unwrap();
        let mut out = [0.0];
        solver.eval(&[0.3], &mut out).unwrap();
        assert_abs_diff_eq!(out[0], 1.0, epsilon = 1e-9);
        solver.eval(&[0.0], &mut out).unwrap();
        assert_abs_diff_eq!(out[0], 0.0, epsilon = 1e-9);
        solver.eval(&[0.15], &mut out).unwrap();
        assert_abs_diff_eq!(out[0], 0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_two_peaks_on_one_signal() {
        let mut solver = RuleSolver::new(TWO_PEAKS).unwrap();
        assert_eq!(solver.output_signals(), ["half", "full"]);
        let mut out = [0.0; 2];

        solver.eval(&[0.5], &mut out).unwrap();
        assert_abs_diff_eq!(out[0], 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(out[1], 0.0, epsilon = 1e-9);

        solver.eval(&[1.0], &mut out).unwrap();
        assert_abs_diff_eq!(out[0], 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(out[1], 1.0, epsilon = 1e-9);

        solver.eval(&[0.75], &mut out).unwrap();
        assert_abs_diff_eq!(out[0], 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(out[1], 0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_deltas_shape_and_storage() {
        let solver = RuleSolver::new(TWO_PEAKS).unwrap();
        assert!(solver.is_sparse());
        assert_eq!(solver.deltas().rows(), solver.rule_count());
        assert_eq!(solver.deltas().cols(), solver.output_signals().len());
        // transpose(M⁻¹) with M = [[1, 0], [0.5, 1]]
        assert_abs_diff_eq!(solver.deltas().get(0, 1), -0.5, epsilon = 1e-12);

        let dense =
            RuleSolver::with_config(TWO_PEAKS, &SolverConfig::new().with_sparse_deltas(false))
                .unwrap();
        assert!(!dense.is_sparse());
        assert!(dense.deltas().approx_eq(solver.deltas(), 1e-3));
    }

    #[test]
    fn test_outputs_are_clamped() {
        let mut solver = RuleSolver::new(r#"{ "jawOpen": { "over": 2.0, "under": -1.0 } }"#)
            .unwrap();
        let mut out = [0.5; 2];
        solver.eval(&[1.0], &mut out).unwrap();
        assert_eq!(out, [1.0, 0.0]);
    }

    #[test]
    fn test_activations_are_exposed() {
        let mut solver = RuleSolver::new(TWO_PEAKS).unwrap();
        let mut out = [0.0; 2];
        solver.eval(&[0.25], &mut out).unwrap();
        assert_abs_diff_eq!(solver.activations()[0], 0.5);
        assert_abs_diff_eq!(solver.activations()[1], 0.25);
    }

    #[test]
    fn test_eval_length_mismatch() {
        let mut solver = RuleSolver::new(TWO_PEAKS).unwrap();
        let mut out = [0.0; 2];
        assert!(matches!(
            solver.eval(&[0.5, 0.5], &mut out),
            Err(SolverError::LengthMismatch {
                expected: 1,
                got: 2,
                field: "signals"
            })
        ));
        let mut short = [0.0; 1];
        assert!(matches!(
            solver.eval(&[0.5], &mut short),
            Err(SolverError::LengthMismatch {
                field: "outputs",
                ..
            })
        ));
    }

    #[test]
    fn test_conflicting_rules_are_singular() {
        // Two rules with the same peak evaluate identically everywhere
        let text = r#"[
            { "drivers": { "a": 1.0 }, "targets": { "x": 1.0 } },
            { "drivers": { "a": 1.0 }, "targets": { "y": 1.0 } }
        ]"#;
        assert!(matches!(
            RuleSolver::new(text),
            Err(SolverError::Matrix(facerig_matrix::MatrixError::Singular { .. }))
        ));
    }

    #[test]
    fn test_invalid_config_rejected_before_parse() {
        let cfg = SolverConfig::new().with_invert_eps(0.0);
        assert!(matches!(
            RuleSolver::with_config("not json", &cfg),
            Err(SolverError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_empty_rule_set() {
        let mut solver = RuleSolver::new("[]").unwrap();
        assert_eq!(solver.rule_count(), 0);
        solver.eval(&[], &mut []).unwrap();
    }
}
