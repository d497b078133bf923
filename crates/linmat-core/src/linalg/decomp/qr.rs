//! QR decomposition via Householder reflections.
//!
//! Decomposes a matrix `A` (m x n, m >= n) into `A = QR` where:
//! - `Q` is m x n with orthonormal columns (`Q^T Q = I`)
//! - `R` is n x n upper triangular

use crate::error::{LinalgError, Result};
use crate::math::hypot;
use crate::matrix::Matrix;

/// Result of a QR decomposition via Householder reflections.
///
/// Stores the factorization `A = QR` in compact form: the Householder
/// vectors are stored in the lower triangle of the working matrix,
/// and `R` is stored in the upper triangle.
#[derive(Debug, Clone)]
pub struct QrDecomposition {
    /// Working matrix: strict upper triangle holds R, columns from the
    /// diagonal down hold the Householder vectors.
    qr: Vec<f64>,
    /// Diagonal of R stored separately (the Householder vectors
    /// overwrite the diagonal of the working matrix).
    r_diag: Vec<f64>,
    m: usize,
    n: usize,
}

#[allow(clippy::many_single_char_names)]
impl QrDecomposition {
    /// Perform QR decomposition on a matrix `A` (m x n, m >= n).
    ///
    /// ```
    /// # use linmat_core::Matrix;
    /// # use linmat_core::linalg::decomp::QrDecomposition;
    /// let a = Matrix::from_array(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]);
    /// let qr = QrDecomposition::decompose(&a).unwrap();
    /// let qtq = qr.q().transpose().matmul(&qr.q()).unwrap();
    /// let eye = Matrix::identity(2);
    /// for (a, b) in qtq.as_slice().iter().zip(eye.as_slice()) {
    ///     assert!((a - b).abs() < 1e-10);
    /// }
    /// ```
    pub fn decompose(a: &Matrix) -> Result<Self> {
        let (m, n) = a.shape();
        if m < n {
            return Err(LinalgError::InvalidArgument {
                reason: "QR decomposition requires m >= n (tall or square matrix)",
            });
        }

        let mut qr = a.as_slice().to_vec();
        let mut r_diag = vec![0.0; n];

        for k in 0..n {
            // 2-norm of the k-th column without under/overflow.
            let mut norm = (k..m).fold(0.0, |acc, i| hypot(acc, qr[i * n + k]));

            if norm != 0.0 {
                // Form the k-th Householder vector.
                if qr[k * n + k] < 0.0 {
                    norm = -norm;
                }
                for i in k..m {
                    qr[i * n + k] /= norm;
                }
                qr[k * n + k] += 1.0;

                // Apply the reflection to the remaining columns.
                for j in (k + 1)..n {
                    let mut s = 0.0;
                    for i in k..m {
                        s += qr[i * n + k] * qr[i * n + j];
                    }
                    s = -s / qr[k * n + k];
                    for i in k..m {
                        let v = qr[i * n + k];
                        qr[i * n + j] += s * v;
                    }
                }
            }

            r_diag[k] = -norm;
        }

        Ok(Self { qr, r_diag, m, n })
    }

    /// Whether no diagonal entry of `R` is exactly zero.
    pub fn is_full_rank(&self) -> bool {
        self.r_diag.iter().all(|&d| d != 0.0)
    }

    /// The upper triangular factor `R` (n x n).
    pub fn r(&self) -> Matrix {
        let n = self.n;
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            data[i * n + i] = self.r_diag[i];
            for j in (i + 1)..n {
                data[i * n + j] = self.qr[i * n + j];
            }
        }
        Matrix::from_parts(n, n, data)
    }

    /// The orthogonal factor `Q` (m x n).
    pub fn q(&self) -> Matrix {
        let (m, n) = (self.m, self.n);
        let mut q = vec![0.0; m * n];

        // Accumulate the reflections in reverse order.
        for k in (0..n).rev() {
            q[k * n + k] = 1.0;
            let vkk = self.qr[k * n + k];
            if vkk == 0.0 {
                continue;
            }
            for j in k..n {
                let mut s = 0.0;
                for i in k..m {
                    s += self.qr[i * n + k] * q[i * n + j];
                }
                s = -s / vkk;
                for i in k..m {
                    q[i * n + j] += s * self.qr[i * n + k];
                }
            }
        }

        Matrix::from_parts(m, n, q)
    }

    /// Least-squares solution of `A X = B` (`X` is n x `B.width()`).
    ///
    /// Fails with [`LinalgError::DimensionMismatch`] unless `B` has `m`
    /// rows and with [`LinalgError::RankDeficient`] when `A` is not of full
    /// column rank.
    pub fn solve(&self, b: &Matrix) -> Result<Matrix> {
        let (m, n) = (self.m, self.n);
        if b.height() != m {
            return Err(LinalgError::DimensionMismatch {
                expected: vec![m, b.width()],
                got: vec![b.height(), b.width()],
            });
        }
        if !self.is_full_rank() {
            return Err(LinalgError::RankDeficient);
        }

        let count = b.width();
        let mut x = b.as_slice().to_vec();

        // Y = Q^T B
        for k in 0..n {
            let vkk = self.qr[k * n + k];
            for j in 0..count {
                let mut s = 0.0;
                for i in k..m {
                    s += self.qr[i * n + k] * x[i * count + j];
                }
                s = -s / vkk;
                for i in k..m {
                    x[i * count + j] += s * self.qr[i * n + k];
                }
            }
        }

        // R X = Y
        for k in (0..n).rev() {
            for j in 0..count {
                x[k * count + j] /= self.r_diag[k];
            }
            for i in 0..k {
                let rik = self.qr[i * n + k];
                for j in 0..count {
                    x[i * count + j] -= x[k * count + j] * rik;
                }
            }
        }

        x.truncate(n * count);
        Ok(Matrix::from_parts(n, count, x))
    }
}

/// Solve the least-squares problem `min ||A x - b||_2` via QR decomposition.
///
/// ```
/// # use linmat_core::Matrix;
/// # use linmat_core::linalg::decomp;
/// // Overdetermined system: 3 equations, 2 unknowns
/// let a = Matrix::from_array(&[[1.0, 1.0], [1.0, 2.0], [1.0, 3.0]]);
/// let b = Matrix::from_column(&[1.0, 2.0, 2.0]);
/// let x = decomp::lstsq(&a, &b).unwrap();
/// assert!((x[(0, 0)] - 2.0 / 3.0).abs() < 1e-10);
/// assert!((x[(1, 0)] - 0.5).abs() < 1e-10);
/// ```
pub fn lstsq(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    QrDecomposition::decompose(a)?.solve(b)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn approx_eq(a: &[f64], b: &[f64], tol: f64) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| (x - y).abs() < tol)
    }

    #[test]
    fn test_qr_reconstruction_square() {
        let a = Matrix::from_array(&[[12.0, -51.0, 4.0], [6.0, 167.0, -68.0], [-4.0, 24.0, -41.0]]);
        let qr = QrDecomposition::decompose(&a).unwrap();
        let prod = qr.q().matmul(&qr.r()).unwrap();
        assert!(approx_eq(prod.as_slice(), a.as_slice(), 1e-10));
        // >>> np.abs(np.linalg.qr(A)[1].diagonal())
        // array([14., 175., 35.])
        let r = qr.r();
        assert!(approx_eq(
            &[r[(0, 0)].abs(), r[(1, 1)].abs(), r[(2, 2)].abs()],
            &[14.0, 175.0, 35.0],
            1e-10
        ));
    }

    #[test]
    fn test_qr_tall_orthonormal_columns() {
        let a = Matrix::from_array(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0], [7.0, 8.0]]);
        let qr = QrDecomposition::decompose(&a).unwrap();
        let q = qr.q();
        assert_eq!(q.shape(), (4, 2));
        assert_eq!(qr.r().shape(), (2, 2));
        let qtq = q.transpose().matmul(&q).unwrap();
        assert!(approx_eq(qtq.as_slice(), Matrix::identity(2).as_slice(), 1e-12));
        let prod = q.matmul(&qr.r()).unwrap();
        assert!(approx_eq(prod.as_slice(), a.as_slice(), 1e-12));
    }

    #[test]
    fn test_wide_rejected() {
        assert!(QrDecomposition::decompose(&Matrix::new(2, 3)).is_err());
    }

    #[test]
    fn test_rank_deficient() {
        let a = Matrix::from_array(&[[1.0, 2.0], [2.0, 4.0], [3.0, 6.0]]);
        let qr = QrDecomposition::decompose(&a).unwrap();
        assert!(!qr.is_full_rank() || qr.r()[(1, 1)].abs() < 1e-12);

        let z = Matrix::from_array(&[[1.0, 0.0], [0.0, 0.0], [0.0, 0.0]]);
        let qr = QrDecomposition::decompose(&z).unwrap();
        assert!(!qr.is_full_rank());
        let b = Matrix::from_column(&[1.0, 1.0, 1.0]);
        assert_eq!(qr.solve(&b).unwrap_err(), LinalgError::RankDeficient);
    }

    #[test]
    fn test_least_squares() {
        // >>> np.linalg.lstsq([[1,1],[1,2],[1,3],[1,4]], [6,5,7,10], rcond=None)[0]
        // array([3.5, 1.4])
        let a = Matrix::from_array(&[[1.0, 1.0], [1.0, 2.0], [1.0, 3.0], [1.0, 4.0]]);
        let b = Matrix::from_column(&[6.0, 5.0, 7.0, 10.0]);
        let x = lstsq(&a, &b).unwrap();
        assert_eq!(x.shape(), (2, 1));
        assert!(approx_eq(x.as_slice(), &[3.5, 1.4], 1e-10));
    }

    #[test]
    fn test_solve_dimension_mismatch() {
        let qr = QrDecomposition::decompose(&Matrix::identity(3)).unwrap();
        let b = Matrix::from_column(&[1.0, 2.0]);
        assert!(matches!(
            qr.solve(&b),
            Err(LinalgError::DimensionMismatch { .. })
        ));
    }
}
