//! Gauss-Jordan elimination with full pivoting.

use crate::error::{LinalgError, Result};
use crate::matrix::Matrix;

impl Matrix {
    /// Solve `A x = rhs` by Gauss-Jordan elimination with full pivoting.
    ///
    /// Works on copies; `self` is left untouched. Fails with
    /// [`LinalgError::Singular`] as soon as the chosen pivot is exactly zero.
    ///
    /// ```
    /// # use linmat_core::Matrix;
    /// let a = Matrix::from_array(&[[2.0, 1.0], [1.0, 3.0]]);
    /// let x = a.gauss_elimination(&[3.0, 5.0]).unwrap();
    /// assert!((x[0] - 0.8).abs() < 1e-12);
    /// assert!((x[1] - 1.4).abs() < 1e-12);
    /// ```
    pub fn gauss_elimination(&self, rhs: &[f64]) -> Result<Vec<f64>> {
        if !self.is_square() {
            return Err(LinalgError::NotSquare {
                rows: self.height(),
                cols: self.width(),
            });
        }
        let n = self.width();
        if rhs.len() != n {
            return Err(LinalgError::DimensionMismatch {
                expected: vec![n],
                got: vec![rhs.len()],
            });
        }

        let mut a = self.as_slice().to_vec();
        let mut b = rhs.to_vec();
        let mut used = vec![false; n];

        for _ in 0..n {
            // Largest remaining element over unused rows and columns.
            let mut big = 0.0;
            let (mut irow, mut icol) = (0, 0);
            for j in (0..n).filter(|&j| !used[j]) {
                for k in (0..n).filter(|&k| !used[k]) {
                    let v = a[j * n + k].abs();
                    if v >= big {
                        big = v;
                        irow = j;
                        icol = k;
                    }
                }
            }
            used[icol] = true;

            // Move the pivot onto the diagonal.
            if irow != icol {
                for l in 0..n {
                    a.swap(irow * n + l, icol * n + l);
                }
                b.swap(irow, icol);
            }

            let pivot = a[icol * n + icol];
            if pivot == 0.0 {
                return Err(LinalgError::Singular);
            }
            let pivinv = 1.0 / pivot;
            a[icol * n + icol] = 1.0;
            for l in 0..n {
                a[icol * n + l] *= pivinv;
            }
            b[icol] *= pivinv;

            // Eliminate the pivot column from every other row.
            for ll in (0..n).filter(|&ll| ll != icol) {
                let dum = a[ll * n + icol];
                a[ll * n + icol] = 0.0;
                for l in 0..n {
                    a[ll * n + l] -= a[icol * n + l] * dum;
                }
                b[ll] -= b[icol] * dum;
            }
        }

        Ok(b)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn approx_eq(a: &[f64], b: &[f64], tol: f64) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| (x - y).abs() < tol)
    }

    #[test]
    fn test_matches_lu_solve() {
        // >>> np.linalg.solve([[1,2,3],[4,5,6],[7,8,10]], [1,2,3])
        // array([-0.33333333,  0.66666667,  0.        ])
        let a = Matrix::from_array(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 10.0]]);
        let x = a.gauss_elimination(&[1.0, 2.0, 3.0]).unwrap();
        assert!(approx_eq(&x, &[-1.0 / 3.0, 2.0 / 3.0, 0.0], 1e-12));
    }

    #[test]
    fn test_needs_row_exchange() {
        let a = Matrix::from_array(&[[0.0, 1.0], [1.0, 0.0]]);
        let x = a.gauss_elimination(&[2.0, 3.0]).unwrap();
        assert_eq!(x, vec![3.0, 2.0]);
    }

    #[test]
    fn test_input_untouched() {
        let a = Matrix::from_array(&[[2.0, 0.0], [0.0, 4.0]]);
        let before = a.clone();
        let _ = a.gauss_elimination(&[1.0, 1.0]).unwrap();
        assert_eq!(a, before);
    }

    #[test]
    fn test_errors() {
        let singular = Matrix::from_array(&[[1.0, 2.0], [2.0, 4.0]]);
        assert_eq!(
            singular.gauss_elimination(&[1.0, 1.0]).unwrap_err(),
            LinalgError::Singular
        );
        assert!(matches!(
            Matrix::new(2, 3).gauss_elimination(&[1.0, 1.0]),
            Err(LinalgError::NotSquare { .. })
        ));
        assert!(matches!(
            Matrix::identity(2).gauss_elimination(&[1.0]),
            Err(LinalgError::DimensionMismatch { .. })
        ));
    }
}
