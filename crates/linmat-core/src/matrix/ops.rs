//! Arithmetic on [`Matrix`].
//!
//! Matrix-matrix operations are named methods returning [`Result`], since
//! their operands can disagree in shape:
//! - `add_checked` / `sub_checked` / `hadamard` / `hadamard_div` (same shape)
//! - `matmul` (inner dimensions agree, see [`crate::linalg::gemm`])
//! - `pow` (square)
//!
//! Scalar broadcasting never fails and is also exposed through operators:
//! `Matrix op f64`, `f64 op Matrix` and `Neg`, on values and references.
//! `s - M` is element-wise `s - m_ij`; `M - s` is `M + (-s)`.

use core::ops::{Add, Div, Mul, Neg, Sub};

use crate::error::{LinalgError, Result};

use super::Matrix;

impl Matrix {
    fn zip_map<F>(&self, other: &Matrix, f: F) -> Result<Matrix>
    where
        F: Fn(f64, f64) -> f64,
    {
        if self.shape() != other.shape() {
            return Err(LinalgError::DimensionMismatch {
                expected: vec![self.height, self.width],
                got: vec![other.height, other.width],
            });
        }
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(Matrix::from_parts(self.height, self.width, data))
    }

    // ------------------------------------------------------------------
    // Matrix-matrix
    // ------------------------------------------------------------------

    /// Element-wise sum; shapes must match.
    pub fn add_checked(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_map(other, |a, b| a + b)
    }

    /// Element-wise difference; shapes must match.
    pub fn sub_checked(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_map(other, |a, b| a - b)
    }

    /// Element-wise product; shapes must match.
    pub fn hadamard(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_map(other, |a, b| a * b)
    }

    /// Element-wise quotient; shapes must match.
    pub fn hadamard_div(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_map(other, |a, b| a / b)
    }

    /// Integer power of a square matrix.
    ///
    /// `pow(0)` is the identity. Small exponents multiply repeatedly;
    /// larger ones use exponentiation by squaring.
    ///
    /// ```
    /// # use linmat_core::Matrix;
    /// let a = Matrix::from_array(&[[1.0, 1.0], [1.0, 0.0]]);
    /// // Fibonacci: [[F(n+1), F(n)], [F(n), F(n-1)]]
    /// let p = a.pow(10).unwrap();
    /// assert_eq!(p[(0, 1)], 55.0);
    /// ```
    pub fn pow(&self, n: u32) -> Result<Matrix> {
        if !self.is_square() {
            return Err(LinalgError::NotSquare {
                rows: self.height,
                cols: self.width,
            });
        }
        if n == 0 {
            return Ok(Matrix::identity(self.height));
        }

        let mut output = self.clone();
        if n < 5 {
            for _ in 1..n {
                output = output.matmul(self)?;
            }
            return Ok(output);
        }

        let mut base = self.clone();
        let mut remaining = n - 1;
        while remaining >= 1 {
            if remaining % 2 == 1 {
                output = output.matmul(&base)?;
            }
            remaining /= 2;
            if remaining == 0 {
                break;
            }
            base = base.matmul(&base)?;
        }
        Ok(output)
    }

    // ------------------------------------------------------------------
    // Matrix-scalar
    // ------------------------------------------------------------------

    /// `s * self`.
    pub fn scale(&self, s: f64) -> Matrix {
        self.map(|a| a * s)
    }

    /// `self / s`, computed as `self * (1 / s)`.
    pub fn div_scalar(&self, s: f64) -> Matrix {
        self.scale(1.0 / s)
    }

    /// `self + s`.
    pub fn add_scalar(&self, s: f64) -> Matrix {
        self.map(|a| a + s)
    }

    /// `self - s`, computed as `self + (-s)`.
    pub fn sub_scalar(&self, s: f64) -> Matrix {
        self.add_scalar(-s)
    }

    /// `s - self`.
    pub fn scalar_sub(&self, s: f64) -> Matrix {
        self.map(|a| s - a)
    }
}

// ======================================================================
// Scalar operators
// ======================================================================

macro_rules! impl_scalar_op {
    ($trait:ident, $method:ident, $inherent:ident) => {
        impl $trait<f64> for Matrix {
            type Output = Matrix;

            fn $method(self, rhs: f64) -> Matrix {
                self.$inherent(rhs)
            }
        }

        impl $trait<f64> for &Matrix {
            type Output = Matrix;

            fn $method(self, rhs: f64) -> Matrix {
                self.$inherent(rhs)
            }
        }
    };
}

impl_scalar_op!(Add, add, add_scalar);
impl_scalar_op!(Sub, sub, sub_scalar);
impl_scalar_op!(Mul, mul, scale);
impl_scalar_op!(Div, div, div_scalar);

macro_rules! impl_scalar_lhs_op {
    ($trait:ident, $method:ident, $inherent:ident) => {
        impl $trait<Matrix> for f64 {
            type Output = Matrix;

            fn $method(self, rhs: Matrix) -> Matrix {
                rhs.$inherent(self)
            }
        }

        impl $trait<&Matrix> for f64 {
            type Output = Matrix;

            fn $method(self, rhs: &Matrix) -> Matrix {
                rhs.$inherent(self)
            }
        }
    };
}

impl_scalar_lhs_op!(Add, add, add_scalar);
impl_scalar_lhs_op!(Sub, sub, scalar_sub);
impl_scalar_lhs_op!(Mul, mul, scale);

impl Neg for Matrix {
    type Output = Matrix;

    fn neg(self) -> Matrix {
        self.scale(-1.0)
    }
}

impl Neg for &Matrix {
    type Output = Matrix;

    fn neg(self) -> Matrix {
        self.scale(-1.0)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn m2(a: f64, b: f64, c: f64, d: f64) -> Matrix {
        Matrix::from_array(&[[a, b], [c, d]])
    }

    #[test]
    fn test_add_sub_checked() {
        let a = m2(1.0, 2.0, 3.0, 4.0);
        let b = m2(4.0, 3.0, 2.0, 1.0);
        assert_eq!(a.add_checked(&b).unwrap().as_slice(), &[5.0; 4]);
        assert_eq!(
            a.sub_checked(&b).unwrap().as_slice(),
            &[-3.0, -1.0, 1.0, 3.0]
        );
    }

    #[test]
    fn test_shape_mismatch() {
        let a = Matrix::new(2, 2);
        let b = Matrix::new(2, 3);
        let err = a.add_checked(&b).unwrap_err();
        assert_eq!(
            err,
            LinalgError::DimensionMismatch {
                expected: vec![2, 2],
                got: vec![2, 3]
            }
        );
        assert!(a.sub_checked(&b).is_err());
        assert!(a.hadamard(&b).is_err());
        assert!(a.hadamard_div(&b).is_err());
    }

    #[test]
    fn test_hadamard() {
        let a = m2(1.0, 2.0, 3.0, 4.0);
        let b = m2(2.0, 2.0, 2.0, 2.0);
        assert_eq!(a.hadamard(&b).unwrap().as_slice(), &[2.0, 4.0, 6.0, 8.0]);
        assert_eq!(
            a.hadamard_div(&b).unwrap().as_slice(),
            &[0.5, 1.0, 1.5, 2.0]
        );
    }

    #[test]
    fn test_scalar_ops_commute() {
        let a = m2(1.0, 2.0, 3.0, 4.0);
        assert_eq!(2.0 * &a, &a * 2.0);
        assert_eq!(1.0 + &a, &a + 1.0);
        assert_eq!((&a / 2.0).as_slice(), &[0.5, 1.0, 1.5, 2.0]);
        assert_eq!((&a - 1.0).as_slice(), &[0.0, 1.0, 2.0, 3.0]);
        assert_eq!((10.0 - &a).as_slice(), &[9.0, 8.0, 7.0, 6.0]);
        assert_eq!((-a).as_slice(), &[-1.0, -2.0, -3.0, -4.0]);
    }

    #[test]
    fn test_pow_small_and_large() {
        // >>> np.linalg.matrix_power([[1, 1], [1, 0]], 3)
        // array([[3, 2], [2, 1]])
        let a = m2(1.0, 1.0, 1.0, 0.0);
        assert_eq!(a.pow(3).unwrap().as_slice(), &[3.0, 2.0, 2.0, 1.0]);
        // >>> np.linalg.matrix_power([[1, 1], [1, 0]], 12)
        // array([[233, 144], [144,  89]])
        assert_eq!(a.pow(12).unwrap().as_slice(), &[233.0, 144.0, 144.0, 89.0]);
        for n in 1..9 {
            let mut expected = a.clone();
            for _ in 1..n {
                expected = expected.matmul(&a).unwrap();
            }
            assert_eq!(a.pow(n).unwrap(), expected, "power {n}");
        }
    }

    #[test]
    fn test_pow_zero_and_non_square() {
        let a = m2(2.0, 0.0, 0.0, 2.0);
        assert_eq!(a.pow(0).unwrap(), Matrix::identity(2));
        assert_eq!(a.pow(1).unwrap(), a);
        assert!(matches!(
            Matrix::new(2, 3).pow(2),
            Err(LinalgError::NotSquare { rows: 2, cols: 3 })
        ));
    }
}
