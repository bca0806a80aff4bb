//! The shared matrix capability and the checked row-vector product.

use crate::error::MatrixError;

/// Default tolerance for [`Matrix::approx_eq`] and diagonal checks during inversion.
pub const DEFAULT_EPS: f64 = 1e-5;

/// Read access shared by dense and sparse matrices.
///
/// Element access is only valid for `row < rows()` and `col < cols()`;
/// implementations panic outside that range, like slice indexing.
pub trait Matrix {
    /// Number of rows.
    fn rows(&self) -> usize;

    /// Number of columns.
    fn cols(&self) -> usize;

    /// Returns the element at `(row, col)`.
    fn get(&self, row: usize, col: usize) -> f64;

    /// Computes `out = v × self` without checking lengths.
    ///
    /// Callers must guarantee `v.len() == rows()` and `out.len() == cols()`;
    /// use [`mult`] for the checked entry point. Every element of `out` is
    /// overwritten.
    fn row_mult_into(&self, v: &[f64], out: &mut [f64]);

    /// Returns `true` when both matrices have the same shape and every pair of
    /// elements differs by at most `eps`.
    fn approx_eq(&self, other: &dyn Matrix, eps: f64) -> bool {
        if self.rows() != other.rows() || self.cols() != other.cols() {
            return false;
        }
        (0..self.rows()).all(|r| {
            (0..self.cols()).all(|c| (self.get(r, c) - other.get(r, c)).abs() <= eps)
        })
    }
}

/// Computes `out = v × m` for a row vector `v`.
///
/// Dispatches to the matrix's own product routine, so sparse matrices only
/// touch their stored entries.
///
/// # Errors
///
/// Returns [`MatrixError::LengthMismatch`] if `v.len() != m.rows()` or
/// `out.len() != m.cols()`. Nothing is written in that case.
pub fn mult<M: Matrix + ?Sized>(v: &[f64], m: &M, out: &mut [f64]) -> Result<(), MatrixError> {
    if v.len() != m.rows() {
        return Err(MatrixError::LengthMismatch {
            expected: m.rows(),
            got: v.len(),
            field: "row vector",
        });
    }
    if out.len() != m.cols() {
        return Err(MatrixError::LengthMismatch {
            expected: m.cols(),
            got: out.len(),
            field: "result",
        });
    }
    m.row_mult_into(v, out);
    Ok(())
}
