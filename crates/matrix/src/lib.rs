//! # facerig-matrix
//!
//! Minimal matrix types behind the rule retargeting solver.
//!
//! ## Architecture
//!
//! ```text
//! Matrix (trait)            rows / cols / get / approx_eq / row_mult_into
//!   ├─ DenseMatrix          row-major grid, mutable, invert + transpose
//!   └─ SparseMatrix         (row, col, value) triples, read-only
//!
//! mult(v, m, out)           out = v × m, length-checked
//! ```
//!
//! ## Restricted inversion
//!
//! [`DenseMatrix::invert`] is Gauss-Jordan elimination on `[A | I]` **without
//! pivoting**. It only succeeds when every diagonal entry stays away from zero
//! during elimination, which holds for the cross-evaluation matrices built by
//! the rule solver (unit diagonal by construction). It is not a
//! general-purpose inverter.
//!
//! ## Quick start
//!
//! ```
//! use facerig_matrix::{DenseMatrix, Matrix, SparseMatrix, mult};
//!
//! let mut m = DenseMatrix::from_rows(vec![vec![1.0, 0.5], vec![0.0, 1.0]]).unwrap();
//! m.invert().unwrap();
//! assert!((m.get(0, 1) + 0.5).abs() < 1e-12);
//!
//! let sparse = SparseMatrix::from_dense(&m);
//! let mut out = [0.0; 2];
//! mult(&[1.0, 1.0], &sparse, &mut out).unwrap();
//! assert!((out[1] - 0.5).abs() < 1e-12);
//! ```

mod dense;
mod error;
mod matrix;
mod sparse;

pub use dense::DenseMatrix;
pub use error::MatrixError;
pub use matrix::{DEFAULT_EPS, Matrix, mult};
pub use sparse::{DEFAULT_SPARSE_THRESHOLD, SparseMatrix};
