//! Inspect command: summarise a compiled rule set.

use std::fmt::Write;

use anyhow::{Context, Result};

use facerig_solver::RuleSolver;

use crate::cli::InspectArgs;
use crate::config::FacerigConfig;

/// Fraction of non-zero entries in the solver's deltas matrix.
fn deltas_density(solver: &RuleSolver) -> f64 {
    let m = solver.deltas();
    let total = m.rows() * m.cols();
    if total == 0 {
        return 0.0;
    }
    let nnz = (0..m.rows())
        .flat_map(|r| (0..m.cols()).map(move |c| (r, c)))
        .filter(|&(r, c)| m.get(r, c) != 0.0)
        .count();
    nnz as f64 / total as f64
}

pub fn summary(solver: &RuleSolver) -> String {
    let mut s = String::new();
    // Writing to a String never fails
    let _ = writeln!(s, "rules:   {}", solver.rule_count());
    let _ = writeln!(
        s,
        "inputs:  {} [{}]",
        solver.input_signals().len(),
        solver.input_signals().join(", ")
    );
    let _ = writeln!(
        s,
        "outputs: {} [{}]",
        solver.output_signals().len(),
        solver.output_signals().join(", ")
    );
    let _ = writeln!(
        s,
        "deltas:  {}x{} {}, {:.1}% non-zero",
        solver.deltas().rows(),
        solver.deltas().cols(),
        if solver.is_sparse() { "sparse" } else { "dense" },
        100.0 * deltas_density(solver)
    );
    s
}

/// Print signal names, rule count and deltas density.
pub fn run(args: InspectArgs) -> Result<()> {
    let config = FacerigConfig::load(&args.config)?;
    let rules = &config.solver.rules;
    let text = std::fs::read_to_string(rules)
        .with_context(|| format!("failed to read rules: {}", rules.display()))?;
    let solver = RuleSolver::with_config(&text, &config.solver.to_solver_config())
        .with_context(|| format!("failed to compile rules: {}", rules.display()))?;
    print!("{}", summary(&solver));
    Ok(())
}
