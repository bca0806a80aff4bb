//! Coordinate-list sparse matrix built by thresholding a dense one.

use crate::dense::DenseMatrix;
use crate::matrix::Matrix;

/// Entries with `|value| <= DEFAULT_SPARSE_THRESHOLD` are dropped by [`SparseMatrix::from_dense`].
pub const DEFAULT_SPARSE_THRESHOLD: f64 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Entry {
    row: usize,
    col: usize,
    value: f64,
}

/// An immutable list of `(row, col, value)` triples.
///
/// Random access through [`Matrix::get`] is a linear scan; the product
/// routine only visits stored entries and is the intended hot path.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrix {
    rows: usize,
    cols: usize,
    threshold: f64,
    entries: Vec<Entry>,
}

impl SparseMatrix {
    /// Builds a sparse copy of `dense` using [`DEFAULT_SPARSE_THRESHOLD`].
    pub fn from_dense(dense: &DenseMatrix) -> Self {
        Self::from_dense_with_threshold(dense, DEFAULT_SPARSE_THRESHOLD)
    }

    /// Builds a sparse copy of `dense`, keeping entries with `|value| > threshold`.
    pub fn from_dense_with_threshold(dense: &DenseMatrix, threshold: f64) -> Self {
        let mut entries = Vec::new();
        for row in 0..dense.rows() {
            for (col, &value) in dense.row(row).iter().enumerate() {
                if value.abs() > threshold {
                    entries.push(Entry { row, col, value });
                }
            }
        }
        Self {
            rows: dense.rows(),
            cols: dense.cols(),
            threshold,
            entries,
        }
    }

    /// Number of stored (non-negligible) entries.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// The threshold this matrix was built with.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Matrix for SparseMatrix {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn get(&self, row: usize, col: usize) -> f64 {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        self.entries
            .iter()
            .find(|e| e.row == row && e.col == col)
            .map_or(0.0, |e| e.value)
    }

    fn row_mult_into(&self, v: &[f64], out: &mut [f64]) {
        out.fill(0.0);
        for e in &self.entries {
            out[e.col] += v[e.row] * e.value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn sample() -> DenseMatrix {
        DenseMatrix::from_rows(vec![
            vec![1.0, 0.0005, 0.0],
            vec![-0.002, 0.0, 0.75],
        ])
        .unwrap()
    }

    #[test]
    fn test_threshold_drops_small_entries() {
        let s = SparseMatrix::from_dense(&sample());
        // 1.0, -0.002, 0.75 survive; 0.0005 and zeros are dropped
        assert_eq!(s.nnz(), 3);
        assert_eq!(s.get(0, 1), 0.0);
        assert_eq!(s.get(1, 0), -0.002);
        assert_eq!(s.threshold(), DEFAULT_SPARSE_THRESHOLD);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let d = DenseMatrix::from_rows(vec![vec![1e-3, -1e-3, 2e-3]]).unwrap();
        let s = SparseMatrix::from_dense(&d);
        assert_eq!(s.nnz(), 1);
        assert_eq!(s.get(0, 2), 2e-3);
    }

    #[test]
    fn test_custom_threshold() {
        let s = SparseMatrix::from_dense_with_threshold(&sample(), 0.5);
        assert_eq!(s.nnz(), 2);
        assert_eq!(s.threshold(), 0.5);
    }

    #[test]
    fn test_shape_preserved() {
        let s = SparseMatrix::from_dense(&DenseMatrix::zeros(4, 7));
        assert_eq!((s.rows(), s.cols(), s.nnz()), (4, 7, 0));
    }

    #[test]
    fn test_row_mult_into_zeroes_result() {
        let s = SparseMatrix::from_dense(&sample());
        let mut out = [5.0; 3];
        s.row_mult_into(&[1.0, 2.0], &mut out);
        assert_abs_diff_eq!(out[0], 1.0 - 0.004);
        assert_abs_diff_eq!(out[1], 0.0);
        assert_abs_diff_eq!(out[2], 1.5);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_get_out_of_bounds() {
        let s = SparseMatrix::from_dense(&sample());
        let _ = s.get(0, 3);
    }
}
