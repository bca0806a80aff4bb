//! Sparse and dense products agree within the sparsification threshold.

use facerig_matrix::{DEFAULT_SPARSE_THRESHOLD, DenseMatrix, Matrix, SparseMatrix, mult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_dense(rows: usize, cols: usize, rng: &mut StdRng) -> DenseMatrix {
    let mut m = DenseMatrix::zeros(rows, cols);
    for r in 0..rows {
        for c in 0..cols {
            // Roughly half the cells are exactly zero or negligible
            let v: f64 = rng.random_range(-1.0..1.0);
            m[(r, c)] = if v.abs() < 0.5 { v * 1e-4 } else { v };
        }
    }
    m
}

#[test]
fn sparse_product_matches_dense() {
    let mut rng = StdRng::seed_from_u64(11);
    for (rows, cols) in [(1, 1), (3, 5), (8, 4), (20, 30)] {
        let dense = random_dense(rows, cols, &mut rng);
        let sparse = SparseMatrix::from_dense(&dense);
        assert!(sparse.nnz() <= rows * cols);

        for _ in 0..10 {
            let v: Vec<f64> = (0..rows).map(|_| rng.random_range(0.0..1.0)).collect();
            let mut out_dense = vec![0.0; cols];
            let mut out_sparse = vec![0.0; cols];
            mult(&v, &dense, &mut out_dense).unwrap();
            mult(&v, &sparse, &mut out_sparse).unwrap();
            // Dropped cells are below 5e-5 and v is in [0, 1)
            for (d, s) in out_dense.iter().zip(&out_sparse) {
                assert!(
                    (d - s).abs() <= DEFAULT_SPARSE_THRESHOLD,
                    "dense {d} vs sparse {s} for {rows}x{cols}"
                );
            }
        }
    }
}

#[test]
fn sparse_elements_match_dense_above_threshold() {
    let mut rng = StdRng::seed_from_u64(5);
    let dense = random_dense(6, 6, &mut rng);
    let sparse = SparseMatrix::from_dense(&dense);
    assert!(sparse.approx_eq(&dense, DEFAULT_SPARSE_THRESHOLD));
}

#[test]
fn mult_checks_lengths_for_sparse() {
    let sparse = SparseMatrix::from_dense(&DenseMatrix::identity(3));
    let mut out = [0.0; 3];
    assert!(mult(&[1.0, 2.0], &sparse, &mut out).is_err());
    assert!(mult(&[1.0, 2.0, 3.0], &sparse, &mut out[..2]).is_err());
}
