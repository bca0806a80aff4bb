//! # facerig-solver
//!
//! Compiles a declarative rule configuration into a precomputed linear map
//! and evaluates it once per frame.
//!
//! ## Pipeline
//!
//! ```text
//! config text ──parse_rules()──▶ ParsedRules { rules, signals, targets }
//!                                     │
//!             peaks (rules × signals) │ targets (rules × outputs)
//!                                     ▼
//!   M[r, c] = rules[r].eval(peaks.row(c))     (unit diagonal)
//!   deltas  = transpose(M⁻¹) × targets        (optionally sparse)
//!                                     │
//! per frame:  activations[r] = rules[r].eval(signals)
//!             outputs = clamp01(activations × deltas)
//! ```
//!
//! ## Configuration shapes
//!
//! | Shape | First char | Layout |
//! |-------|------------|--------|
//! | V1 | `{` | `{ signal: { target: weight, … }, … }` |
//! | V2 | `[` | `[ { "drivers": { signal: weight }, "targets": { target: weight } }, … ]` |
//!
//! ## Quick start
//!
//! ```
//! use facerig_solver::RuleSolver;
//!
//! let config = r#"[{ "drivers": { "mouthSmile": 0.5 }, "targets": { "smile": 1.0 } }]"#;
//! let mut solver = RuleSolver::new(config).unwrap();
//! assert_eq!(solver.input_signals(), ["mouthSmile"]);
//!
//! let mut out = [0.0];
//! solver.eval(&[0.5], &mut out).unwrap();
//! assert!((out[0] - 1.0).abs() < 1e-9);
//! ```

mod config;
mod error;
mod parse;
mod rule;
mod solver;

pub use config::SolverConfig;
pub use error::SolverError;
pub use parse::{ConfigFormat, ParsedRules, parse_rules};
pub use rule::{Item, PEAK_TOLERANCE, Rule};
pub use solver::RuleSolver;
