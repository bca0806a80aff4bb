//! Row-major dense matrix with in-place restricted inversion.

use std::ops::{Index, IndexMut};

use crate::error::MatrixError;
use crate::matrix::{DEFAULT_EPS, Matrix};

/// A mutable `rows × cols` grid of `f64`, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl DenseMatrix {
    /// Creates a zero-filled matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Creates an `n × n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = 1.0;
        }
        m
    }

    /// Creates a matrix from nested rows.
    ///
    /// An empty outer vector yields a `0 × 0` matrix.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::RaggedRows`] if the rows differ in length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, MatrixError> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n_cols {
                return Err(MatrixError::RaggedRows {
                    row: i,
                    expected: n_cols,
                    got: row.len(),
                });
            }
            data.extend(row);
        }
        Ok(Self {
            rows: n_rows,
            cols: n_cols,
            data,
        })
    }

    /// Returns row `r` as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `r >= rows()`.
    pub fn row(&self, r: usize) -> &[f64] {
        assert!(r < self.rows, "row {r} out of bounds ({} rows)", self.rows);
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    /// Sets the element at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self[(row, col)] = value;
    }

    /// Returns `true` if the matrix has as many rows as columns.
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    fn require_square(&self) -> Result<(), MatrixError> {
        if self.is_square() {
            Ok(())
        } else {
            Err(MatrixError::NotSquare {
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Inverts the matrix in place using [`DEFAULT_EPS`] as the singularity bound.
    ///
    /// See [`DenseMatrix::invert_with_eps`].
    pub fn invert(&mut self) -> Result<(), MatrixError> {
        self.invert_with_eps(DEFAULT_EPS)
    }

    /// Inverts the matrix in place by Gauss-Jordan elimination on `[A | I]`.
    ///
    /// No row pivoting is performed. The elimination relies on the diagonal
    /// staying non-zero as rows are reduced top to bottom, which holds for
    /// matrices with a dominant unit diagonal (such as rule cross-evaluation
    /// matrices). Other invertible matrices may be rejected as singular.
    ///
    /// On error the matrix is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::NotSquare`] for non-square input and
    /// [`MatrixError::Singular`] when a reduced diagonal entry has absolute
    /// value below `eps`.
    pub fn invert_with_eps(&mut self, eps: f64) -> Result<(), MatrixError> {
        self.require_square()?;
        let n = self.rows;
        let width = 2 * n;

        // [A | I]
        let mut aug = vec![0.0; n * width];
        for r in 0..n {
            aug[r * width..r * width + n].copy_from_slice(self.row(r));
            aug[r * width + n + r] = 1.0;
        }

        // Forward elimination below the diagonal
        for i in 0..n {
            for c in 0..i {
                let a_ic = aug[i * width + c];
                if a_ic == 0.0 {
                    continue;
                }
                let factor = -a_ic / aug[c * width + c];
                add_scaled_row(&mut aug, width, c, i, factor);
            }
            let diag = aug[i * width + i];
            if !diag.is_finite() || diag.abs() < eps {
                return Err(MatrixError::Singular { row: i, value: diag });
            }
        }

        // Normalize every row by its diagonal
        for i in 0..n {
            let diag = aug[i * width + i];
            for v in &mut aug[i * width..(i + 1) * width] {
                *v /= diag;
            }
        }

        // Back substitution above the diagonal
        for i in (0..n).rev() {
            for c in (i + 1)..n {
                let a_ic = aug[i * width + c];
                if a_ic == 0.0 {
                    continue;
                }
                add_scaled_row(&mut aug, width, c, i, -a_ic);
            }
        }

        for r in 0..n {
            let src = &aug[r * width + n..(r + 1) * width];
            self.data[r * n..(r + 1) * n].copy_from_slice(src);
        }
        Ok(())
    }

    /// Transposes a square matrix in place.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::NotSquare`] for non-square input.
    pub fn transpose(&mut self) -> Result<(), MatrixError> {
        self.require_square()?;
        let n = self.rows;
        for r in 0..n {
            for c in (r + 1)..n {
                self.data.swap(r * n + c, c * n + r);
            }
        }
        Ok(())
    }

    /// Returns the product `self × other`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::LengthMismatch`] if `self.cols() != other.rows()`.
    pub fn multiply(&self, other: &DenseMatrix) -> Result<DenseMatrix, MatrixError> {
        if self.cols != other.rows {
            return Err(MatrixError::LengthMismatch {
                expected: self.cols,
                got: other.rows,
                field: "right operand rows",
            });
        }
        let mut out = DenseMatrix::zeros(self.rows, other.cols);
        for r in 0..self.rows {
            let out_row = &mut out.data[r * other.cols..(r + 1) * other.cols];
            for k in 0..self.cols {
                let a = self.data[r * self.cols + k];
                if a == 0.0 {
                    continue;
                }
                for (o, &b) in out_row.iter_mut().zip(other.row(k)) {
                    *o += a * b;
                }
            }
        }
        Ok(out)
    }
}

/// `row[dst] += row[src] * factor` over a row-major buffer of the given width.
fn add_scaled_row(data: &mut [f64], width: usize, src: usize, dst: usize, factor: f64) {
    debug_assert_ne!(src, dst);
    let (src_row, dst_row) = if src < dst {
        let (head, tail) = data.split_at_mut(dst * width);
        (&head[src * width..(src + 1) * width], &mut tail[..width])
    } else {
        let (head, tail) = data.split_at_mut(src * width);
        (&tail[..width], &mut head[dst * width..(dst + 1) * width])
    };
    for (d, &s) in dst_row.iter_mut().zip(src_row) {
        *d += s * factor;
    }
}

impl Index<(usize, usize)> for DenseMatrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        &self.data[row * self.cols + col]
    }
}

impl IndexMut<(usize, usize)> for DenseMatrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        &mut self.data[row * self.cols + col]
    }
}

impl Matrix for DenseMatrix {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn get(&self, row: usize, col: usize) -> f64 {
        self[(row, col)]
    }

    fn row_mult_into(&self, v: &[f64], out: &mut [f64]) {
        for (c, o) in out.iter_mut().enumerate() {
            let mut sum = 0.0;
            for (r, &x) in v.iter().enumerate() {
                sum += x * self.data[r * self.cols + c];
            }
            *o = sum;
        }
    }
}
