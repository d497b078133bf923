//! LU decomposition with partial pivoting.
//!
//! Decomposes an `m x n` matrix `A` into `PA = LU` where:
//! - `P` is a permutation matrix (stored as a pivot vector)
//! - `L` is lower triangular with unit diagonal
//! - `U` is upper triangular
//!
//! The factorization itself never fails: a zero pivot simply leaves the
//! column below it untouched. Singularity is reported by
//! [`LuDecomposition::is_non_singular`] and by [`LuDecomposition::solve`].

use crate::error::{LinalgError, Result};
use crate::matrix::Matrix;

/// Result of an LU decomposition with partial pivoting.
///
/// Stores the factorization `PA = LU` in compact form: `L` and `U` are
/// packed into a single matrix (the unit diagonal of `L` is implicit),
/// and the permutation is stored as a pivot index vector.
#[derive(Debug, Clone)]
pub struct LuDecomposition {
    /// Packed LU matrix: lower triangle holds L (without diagonal),
    /// upper triangle (including diagonal) holds U.
    lu: Vec<f64>,
    /// Row `i` of `PA` is row `pivots[i]` of `A`.
    pivots: Vec<usize>,
    m: usize,
    n: usize,
    /// Sign of the permutation (+1 or -1), for determinant computation.
    sign: f64,
}

impl LuDecomposition {
    /// Left-looking (Crout/Doolittle) elimination with partial pivoting.
    ///
    /// ```
    /// # use linmat_core::Matrix;
    /// # use linmat_core::linalg::decomp::LuDecomposition;
    /// let a = Matrix::from_array(&[[2.0, 1.0], [1.0, 4.0]]);
    /// let lu = LuDecomposition::decompose(&a);
    /// assert!((lu.det().unwrap() - 7.0).abs() < 1e-10);
    /// ```
    pub fn decompose(a: &Matrix) -> Self {
        let (m, n) = a.shape();
        let mut lu = a.as_slice().to_vec();
        let mut pivots: Vec<usize> = (0..m).collect();
        let mut sign = 1.0;
        let mut col = vec![0.0; m];

        for j in 0..n {
            // Work on a copy of column j.
            for i in 0..m {
                col[i] = lu[i * n + j];
            }

            // Apply the previous transformations.
            for i in 0..m {
                let kmax = i.min(j);
                let s = (0..kmax).fold(0.0, |acc, k| acc + lu[i * n + k] * col[k]);
                col[i] -= s;
                lu[i * n + j] = col[i];
            }

            // Find the pivot and swap rows if needed.
            let mut p = j;
            for i in (j + 1)..m {
                if col[i].abs() > col[p].abs() {
                    p = i;
                }
            }
            if p != j {
                for k in 0..n {
                    lu.swap(p * n + k, j * n + k);
                }
                pivots.swap(p, j);
                sign = -sign;
            }

            // Compute the multipliers.
            if j < m && lu[j * n + j] != 0.0 {
                let pivot = lu[j * n + j];
                for i in (j + 1)..m {
                    lu[i * n + j] /= pivot;
                }
            }
        }

        Self {
            lu,
            pivots,
            m,
            n,
            sign,
        }
    }

    /// Whether the matrix is square with no exactly-zero pivot.
    pub fn is_non_singular(&self) -> bool {
        self.m == self.n && (0..self.n).all(|j| self.lu[j * self.n + j] != 0.0)
    }

    /// `det(A) = sign * product(diag(U))`. Only defined for square input.
    pub fn det(&self) -> Result<f64> {
        if self.m != self.n {
            return Err(LinalgError::NotSquare {
                rows: self.m,
                cols: self.n,
            });
        }
        let n = self.n;
        Ok((0..n).fold(self.sign, |d, j| d * self.lu[j * n + j]))
    }

    /// The lower triangular factor `L` (`m x min(m, n)`, unit diagonal).
    pub fn l(&self) -> Matrix {
        let (m, n) = (self.m, self.n);
        let k = m.min(n);
        let mut data = vec![0.0; m * k];
        for i in 0..m {
            for j in 0..k.min(i + 1) {
                data[i * k + j] = if i == j { 1.0 } else { self.lu[i * n + j] };
            }
        }
        Matrix::from_parts(m, k, data)
    }

    /// The upper triangular factor `U` (`min(m, n) x n`).
    pub fn u(&self) -> Matrix {
        let n = self.n;
        let k = self.m.min(n);
        let mut data = vec![0.0; k * n];
        for i in 0..k {
            for j in i..n {
                data[i * n + j] = self.lu[i * n + j];
            }
        }
        Matrix::from_parts(k, n, data)
    }

    /// The permutation matrix `P` with `PA = LU`.
    pub fn p(&self) -> Matrix {
        let m = self.m;
        let mut data = vec![0.0; m * m];
        for (i, &pi) in self.pivots.iter().enumerate() {
            data[i * m + pi] = 1.0;
        }
        Matrix::from_parts(m, m, data)
    }

    /// The permutation pivot vector.
    pub fn pivots(&self) -> &[usize] {
        &self.pivots
    }

    /// Reorder the rows of `b` by the pivot vector, i.e. compute `P b`.
    pub fn permute_rows(&self, b: &Matrix) -> Result<Matrix> {
        if b.height() != self.m {
            return Err(LinalgError::DimensionMismatch {
                expected: vec![self.m, b.width()],
                got: vec![b.height(), b.width()],
            });
        }
        b.rows(&self.pivots)
    }

    /// Solve `A X = B` for every column of `B`.
    ///
    /// Fails with [`LinalgError::DimensionMismatch`] when `B` has the wrong
    /// number of rows and with [`LinalgError::Singular`] when a pivot is
    /// exactly zero.
    pub fn solve(&self, b: &Matrix) -> Result<Matrix> {
        let mut x = self.permute_rows(b)?;
        if !self.is_non_singular() {
            return Err(LinalgError::Singular);
        }

        let n = self.n;
        let count = b.width();
        let xs = x.as_mut_slice();

        // Forward substitution: L Y = P B
        for k in 0..n {
            for i in (k + 1)..n {
                let lik = self.lu[i * n + k];
                for j in 0..count {
                    xs[i * count + j] -= xs[k * count + j] * lik;
                }
            }
        }

        // Back substitution: U X = Y
        for k in (0..n).rev() {
            let ukk = self.lu[k * n + k];
            for j in 0..count {
                xs[k * count + j] /= ukk;
            }
            for i in 0..k {
                let uik = self.lu[i * n + k];
                for j in 0..count {
                    xs[i * count + j] -= xs[k * count + j] * uik;
                }
            }
        }

        Ok(x)
    }

    /// Compute the inverse by solving `A X = I`.
    pub fn inverse(&self) -> Result<Matrix> {
        self.solve(&Matrix::identity(self.m))
    }
}
