//! Dense kernels: inner product, matrix-vector and matrix-matrix multiply.
//!
//! Everything is the plain textbook loop with one accumulator per output
//! element; there is no blocking or reordering.

use crate::error::{LinalgError, Result};
use crate::matrix::Matrix;
use crate::vector::Vector;

// ======================================================================
// Level 1 — vector operations, O(n)
// ======================================================================

/// Inner product `sum(x_i * y_i)` over the common prefix of two slices.
///
/// ```
/// # use linmat_core::linalg::dot;
/// assert_eq!(dot(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]), 32.0);
/// ```
pub fn dot(x: &[f64], y: &[f64]) -> f64 {
    debug_assert_eq!(x.len(), y.len());
    x.iter().zip(y).fold(0.0, |acc, (&a, &b)| acc + a * b)
}

// ======================================================================
// Level 2 — matrix-vector operations, O(n^2)
// ======================================================================

/// `y = A x` where `x` has length `A.width()`.
///
/// ```
/// # use linmat_core::{Matrix, linalg::gemv};
/// let a = Matrix::from_array(&[[1.0, 2.0], [3.0, 4.0]]);
/// assert_eq!(gemv(&a, &[5.0, 6.0]).unwrap(), vec![17.0, 39.0]);
/// ```
pub fn gemv(a: &Matrix, x: &[f64]) -> Result<Vec<f64>> {
    let (m, n) = a.shape();
    if x.len() != n {
        return Err(LinalgError::DimensionMismatch {
            expected: vec![n],
            got: vec![x.len()],
        });
    }
    let a_data = a.as_slice();
    Ok((0..m)
        .map(|i| dot(&a_data[i * n..(i + 1) * n], x))
        .collect())
}

/// `y = x^T A` where `x` has length `A.height()`; `y` has length `A.width()`.
pub fn gevm(x: &[f64], a: &Matrix) -> Result<Vec<f64>> {
    let (m, n) = a.shape();
    if x.len() != m {
        return Err(LinalgError::DimensionMismatch {
            expected: vec![m],
            got: vec![x.len()],
        });
    }
    let a_data = a.as_slice();
    let mut y = vec![0.0; n];
    for (j, yj) in y.iter_mut().enumerate() {
        let mut sum = 0.0;
        for (i, &xi) in x.iter().enumerate() {
            sum += xi * a_data[i * n + j];
        }
        *yj = sum;
    }
    Ok(y)
}

// ======================================================================
// Level 3 — matrix-matrix operations, O(n^3)
// ======================================================================

/// `C = A B`. Requires `A.width() == B.height()`.
///
/// ```
/// # use linmat_core::{Matrix, linalg::gemm};
/// let a = Matrix::from_array(&[[1.0, 2.0], [3.0, 4.0]]);
/// let b = Matrix::from_array(&[[5.0, 6.0], [7.0, 8.0]]);
/// let c = gemm(&a, &b).unwrap();
/// assert_eq!(c.as_slice(), &[19.0, 22.0, 43.0, 50.0]);
/// ```
#[allow(clippy::many_single_char_names)]
pub fn gemm(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    let (m, k) = a.shape();
    let n = b.width();
    if b.height() != k {
        return Err(LinalgError::DimensionMismatch {
            expected: vec![k, n],
            got: vec![b.height(), n],
        });
    }

    let a_data = a.as_slice();
    let b_data = b.as_slice();
    let mut c = vec![0.0; m * n];

    for i in 0..m {
        let a_row = i * k;
        for j in 0..n {
            let mut sum = 0.0;
            for p in 0..k {
                sum += a_data[a_row + p] * b_data[p * n + j];
            }
            c[i * n + j] = sum;
        }
    }

    Ok(Matrix::from_parts(m, n, c))
}

// ======================================================================
// Convenience methods on Matrix
// ======================================================================

impl Matrix {
    /// Matrix product `self * other`.
    ///
    /// Fails with [`LinalgError::DimensionMismatch`] unless
    /// `self.width() == other.height()`.
    pub fn matmul(&self, other: &Matrix) -> Result<Matrix> {
        gemm(self, other)
    }

    /// `self * v`, treating `v` as a column.
    pub fn mul_vector(&self, v: &Vector) -> Result<Vector> {
        gemv(self, v.as_slice()).map(Vector::from_vec)
    }

    /// `v^T * self`, treating `v` as a row.
    pub fn vector_mul(&self, v: &Vector) -> Result<Vector> {
        gevm(v.as_slice(), self).map(Vector::from_vec)
    }

    /// `self * x` for a raw slice.
    pub fn mul_slice(&self, x: &[f64]) -> Result<Vec<f64>> {
        gemv(self, x)
    }

    /// `x^T * self` for a raw slice.
    pub fn slice_mul(&self, x: &[f64]) -> Result<Vec<f64>> {
        gevm(x, self)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_dot() {
        assert_eq!(dot(&[], &[]), 0.0);
        assert_eq!(dot(&[1.0, -1.0], &[2.0, 2.0]), 0.0);
    }

    #[test]
    fn test_gemv_dimension_mismatch() {
        let a = Matrix::new(2, 3);
        assert!(gemv(&a, &[1.0, 2.0]).is_err());
    }

    #[test]
    fn test_gevm_uses_width_for_output() {
        // >>> np.array([1, 1]) @ np.array([[1, 2, 3], [4, 5, 6]])
        // array([5, 7, 9])
        let a = Matrix::from_array(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        assert_eq!(gevm(&[1.0, 1.0], &a).unwrap(), vec![5.0, 7.0, 9.0]);
        assert!(gevm(&[1.0, 1.0, 1.0], &a).is_err());
    }

    #[test]
    fn test_gemm_rectangular() {
        // >>> np.array([[1, 2, 3], [4, 5, 6]]) @ np.array([[7, 8], [9, 10], [11, 12]])
        // array([[ 58,  64],
        //        [139, 154]])
        let a = Matrix::from_array(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let b = Matrix::from_array(&[[7.0, 8.0], [9.0, 10.0], [11.0, 12.0]]);
        let c = gemm(&a, &b).unwrap();
        assert_eq!(c.shape(), (2, 2));
        assert_eq!(c.as_slice(), &[58.0, 64.0, 139.0, 154.0]);
    }

    #[test]
    fn test_gemm_inner_dimension_mismatch() {
        let a = Matrix::new(2, 3);
        let b = Matrix::new(2, 2);
        let err = a.matmul(&b).unwrap_err();
        assert!(matches!(err, LinalgError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_matrix_vector_products() {
        let a = Matrix::from_array(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]);
        let x = Vector::from_slice(&[1.0, 1.0]);
        assert_eq!(a.mul_vector(&x).unwrap().as_slice(), &[3.0, 7.0, 11.0]);
        let y = Vector::from_slice(&[1.0, 0.0, 1.0]);
        assert_eq!(a.vector_mul(&y).unwrap().as_slice(), &[6.0, 8.0]);
        assert!(a.mul_slice(&[1.0]).is_err());
        assert_eq!(a.slice_mul(&[0.0, 1.0, 0.0]).unwrap(), vec![3.0, 4.0]);
    }
}
