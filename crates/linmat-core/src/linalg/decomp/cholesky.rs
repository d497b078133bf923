//! Cholesky decomposition for symmetric positive-definite matrices.
//!
//! Decomposes a symmetric positive-definite matrix `A` into `A = L L^T`
//! where `L` is lower triangular with positive diagonal entries. Only the
//! upper triangle of `A` is read.

use crate::error::{LinalgError, Result};
use crate::matrix::Matrix;

/// Result of a Cholesky decomposition.
#[derive(Debug, Clone)]
pub struct CholeskyDecomposition {
    /// Lower triangular factor, row-major n x n.
    l_data: Vec<f64>,
    n: usize,
}

impl CholeskyDecomposition {
    /// Decompose a symmetric positive-definite matrix.
    ///
    /// Returns [`LinalgError::NotPositiveDefinite`] the first time a
    /// diagonal pivot is not strictly positive.
    ///
    /// ```
    /// # use linmat_core::Matrix;
    /// # use linmat_core::linalg::decomp::CholeskyDecomposition;
    /// let a = Matrix::from_array(&[[4.0, 2.0], [2.0, 3.0]]);
    /// let chol = CholeskyDecomposition::decompose(&a).unwrap();
    /// let l = chol.l();
    /// assert!((l[(0, 0)] - 2.0).abs() < 1e-12);
    /// assert!((l[(1, 0)] - 1.0).abs() < 1e-12);
    /// ```
    pub fn decompose(a: &Matrix) -> Result<Self> {
        if !a.is_square() {
            return Err(LinalgError::NotSquare {
                rows: a.height(),
                cols: a.width(),
            });
        }
        let n = a.height();
        let src = a.as_slice();
        let mut l = vec![0.0; n * n];

        for i in 0..n {
            for j in i..n {
                let mut sum = src[i * n + j];
                for k in 0..i {
                    sum -= l[i * n + k] * l[j * n + k];
                }
                if i == j {
                    if sum <= 0.0 {
                        return Err(LinalgError::NotPositiveDefinite);
                    }
                    l[i * n + i] = sum.sqrt();
                } else {
                    l[j * n + i] = sum / l[i * n + i];
                }
            }
        }

        Ok(Self { l_data: l, n })
    }

    /// The lower triangular factor `L`.
    pub fn l(&self) -> Matrix {
        Matrix::from_parts(self.n, self.n, self.l_data.clone())
    }

    /// The upper triangular factor `L^T`.
    pub fn u(&self) -> Matrix {
        self.l().transpose()
    }

    /// Solve `A X = B` for every column of `B`.
    ///
    /// Since `A = L L^T`, solves `L Y = B` (forward) then `L^T X = Y`
    /// (backward).
    pub fn solve(&self, b: &Matrix) -> Result<Matrix> {
        let n = self.n;
        if b.height() != n {
            return Err(LinalgError::DimensionMismatch {
                expected: vec![n, b.width()],
                got: vec![b.height(), b.width()],
            });
        }
        let count = b.width();
        let l = &self.l_data;
        let mut x = b.as_slice().to_vec();

        for c in 0..count {
            // Forward substitution: L y = b
            for i in 0..n {
                for j in 0..i {
                    x[i * count + c] -= l[i * n + j] * x[j * count + c];
                }
                x[i * count + c] /= l[i * n + i];
            }
            // Back substitution: L^T x = y
            for i in (0..n).rev() {
                for j in (i + 1)..n {
                    x[i * count + c] -= l[j * n + i] * x[j * count + c];
                }
                x[i * count + c] /= l[i * n + i];
            }
        }

        Ok(Matrix::from_parts(n, count, x))
    }
}
