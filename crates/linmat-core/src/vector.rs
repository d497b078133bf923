//! Fixed-length dense vector of `f64`.
//!
//! The length of a [`Vector`] never changes after construction. Element-wise
//! operations between two vectors check lengths and return
//! [`LinalgError::DimensionMismatch`] on disagreement; scalar operations are
//! also available as operators.

use core::ops::{Add, Div, Index, IndexMut, Mul, Neg, Sub};

use crate::error::{LinalgError, Result};

/// An owned, fixed-length vector of `f64`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Vector {
    data: Vec<f64>,
}

impl Vector {
    /// A zero-filled vector of the given dimension.
    pub fn new(dimension: usize) -> Self {
        Self {
            data: vec![0.0; dimension],
        }
    }

    /// Copy a slice into a new vector.
    pub fn from_slice(data: &[f64]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    /// Take ownership of an existing `Vec`.
    pub fn from_vec(data: Vec<f64>) -> Self {
        Self { data }
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.data.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.data.iter()
    }

    fn check_index(&self, i: usize) -> Result<()> {
        if i >= self.data.len() {
            return Err(LinalgError::IndexOutOfRange {
                index: vec![i],
                shape: vec![self.data.len()],
            });
        }
        Ok(())
    }

    /// Bounds-checked read.
    pub fn get(&self, i: usize) -> Result<f64> {
        self.check_index(i)?;
        Ok(self.data[i])
    }

    /// Bounds-checked write.
    pub fn set(&mut self, i: usize, value: f64) -> Result<()> {
        self.check_index(i)?;
        self.data[i] = value;
        Ok(())
    }

    fn check_same_dimension(&self, other: &Vector) -> Result<()> {
        if self.dimension() != other.dimension() {
            return Err(LinalgError::DimensionMismatch {
                expected: vec![self.dimension()],
                got: vec![other.dimension()],
            });
        }
        Ok(())
    }

    fn zip_map<F>(&self, other: &Vector, f: F) -> Result<Vector>
    where
        F: Fn(f64, f64) -> f64,
    {
        self.check_same_dimension(other)?;
        Ok(Vector {
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }

    fn map<F>(&self, f: F) -> Vector
    where
        F: Fn(f64) -> f64,
    {
        Vector {
            data: self.data.iter().map(|&a| f(a)).collect(),
        }
    }

    // ------------------------------------------------------------------
    // Products and norms
    // ------------------------------------------------------------------

    /// Inner product.
    ///
    /// ```
    /// # use linmat_core::Vector;
    /// let a = Vector::from_slice(&[1.0, 2.0, 3.0]);
    /// let b = Vector::from_slice(&[4.0, 5.0, 6.0]);
    /// assert_eq!(a.dot(&b).unwrap(), 32.0);
    /// ```
    pub fn dot(&self, other: &Vector) -> Result<f64> {
        self.check_same_dimension(other)?;
        Ok(crate::linalg::dot(&self.data, &other.data))
    }

    /// Cross product of two 3-vectors.
    pub fn cross(&self, other: &Vector) -> Result<Vector> {
        if self.dimension() != 3 {
            return Err(LinalgError::InvalidArgument {
                reason: "cross product is only defined for 3-vectors",
            });
        }
        self.check_same_dimension(other)?;
        let (a, b) = (&self.data, &other.data);
        Ok(Vector {
            data: vec![
                a[1] * b[2] - a[2] * b[1],
                a[2] * b[0] - a[0] * b[2],
                a[0] * b[1] - a[1] * b[0],
            ],
        })
    }

    /// Euclidean length, `sqrt(self · self)`.
    pub fn norm(&self) -> f64 {
        crate::linalg::dot(&self.data, &self.data).sqrt()
    }

    /// `self / self.norm()`. A zero vector yields NaN components.
    pub fn normalised(&self) -> Vector {
        let n = self.norm();
        self.map(|a| a / n)
    }

    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    // ------------------------------------------------------------------
    // Element-wise arithmetic
    // ------------------------------------------------------------------

    pub fn add_checked(&self, other: &Vector) -> Result<Vector> {
        self.zip_map(other, |a, b| a + b)
    }

    pub fn sub_checked(&self, other: &Vector) -> Result<Vector> {
        self.zip_map(other, |a, b| a - b)
    }

    pub fn div_checked(&self, other: &Vector) -> Result<Vector> {
        self.zip_map(other, |a, b| a / b)
    }

    /// Element-wise `self[i] *= other[i]`.
    pub fn multiply_in_place(&mut self, other: &Vector) -> Result<()> {
        self.check_same_dimension(other)?;
        for (a, &b) in self.data.iter_mut().zip(&other.data) {
            *a *= b;
        }
        Ok(())
    }

    pub fn scale(&self, s: f64) -> Vector {
        self.map(|a| a * s)
    }

    pub fn add_scalar(&self, s: f64) -> Vector {
        self.map(|a| a + s)
    }

    /// `self[i] - s`.
    pub fn sub_scalar(&self, s: f64) -> Vector {
        self.map(|a| a - s)
    }

    /// `s - self[i]`.
    pub fn scalar_sub(&self, s: f64) -> Vector {
        self.map(|a| s - a)
    }

    /// `self[i] / s`.
    pub fn div_scalar(&self, s: f64) -> Vector {
        self.map(|a| a / s)
    }

    /// `s / self[i]`.
    pub fn scalar_div(&self, s: f64) -> Vector {
        self.map(|a| s / a)
    }

    /// Element-wise `min(s, self[i])`.
    pub fn min_with(&self, s: f64) -> Vector {
        self.map(|a| s.min(a))
    }

    // ------------------------------------------------------------------
    // Ranges
    // ------------------------------------------------------------------

    /// Copy of the elements from `start` to the end.
    pub fn range_from(&self, start: usize) -> Result<Vector> {
        if start > self.dimension() {
            return Err(LinalgError::IndexOutOfRange {
                index: vec![start],
                shape: vec![self.dimension()],
            });
        }
        Ok(Vector::from_slice(&self.data[start..]))
    }

    /// Copy of the elements `first..=last`.
    pub fn range(&self, first: usize, last: usize) -> Result<Vector> {
        if first > last || last >= self.dimension() {
            return Err(LinalgError::IndexOutOfRange {
                index: vec![first, last],
                shape: vec![self.dimension()],
            });
        }
        Ok(Vector::from_slice(&self.data[first..=last]))
    }

    // ------------------------------------------------------------------
    // Comparisons
    // ------------------------------------------------------------------

    fn compare<F>(&self, other: &Vector, f: F) -> Result<Vec<bool>>
    where
        F: Fn(f64, f64) -> bool,
    {
        self.check_same_dimension(other)?;
        Ok(self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&a, &b)| f(a, b))
            .collect())
    }

    pub fn gt(&self, other: &Vector) -> Result<Vec<bool>> {
        self.compare(other, |a, b| a > b)
    }

    pub fn ge(&self, other: &Vector) -> Result<Vec<bool>> {
        self.compare(other, |a, b| a >= b)
    }

    pub fn lt(&self, other: &Vector) -> Result<Vec<bool>> {
        self.compare(other, |a, b| a < b)
    }

    pub fn le(&self, other: &Vector) -> Result<Vec<bool>> {
        self.compare(other, |a, b| a <= b)
    }

    pub fn gt_scalar(&self, s: f64) -> Vec<bool> {
        self.data.iter().map(|&a| a > s).collect()
    }

    pub fn ge_scalar(&self, s: f64) -> Vec<bool> {
        self.data.iter().map(|&a| a >= s).collect()
    }

    pub fn lt_scalar(&self, s: f64) -> Vec<bool> {
        self.data.iter().map(|&a| a < s).collect()
    }

    pub fn le_scalar(&self, s: f64) -> Vec<bool> {
        self.data.iter().map(|&a| a <= s).collect()
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.data[i]
    }
}

impl IndexMut<usize> for Vector {
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        &mut self.data[i]
    }
}

impl From<Vec<f64>> for Vector {
    fn from(data: Vec<f64>) -> Self {
        Self { data }
    }
}

// ======================================================================
// Scalar operators
// ======================================================================

macro_rules! impl_vector_scalar_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait<f64> for Vector {
            type Output = Vector;

            fn $method(self, rhs: f64) -> Vector {
                self.map(|a| a $op rhs)
            }
        }

        impl $trait<f64> for &Vector {
            type Output = Vector;

            fn $method(self, rhs: f64) -> Vector {
                self.map(|a| a $op rhs)
            }
        }
    };
}

impl_vector_scalar_op!(Add, add, +);
impl_vector_scalar_op!(Sub, sub, -);
impl_vector_scalar_op!(Mul, mul, *);
impl_vector_scalar_op!(Div, div, /);

impl Mul<&Vector> for f64 {
    type Output = Vector;

    fn mul(self, rhs: &Vector) -> Vector {
        rhs.scale(self)
    }
}

impl Add<&Vector> for f64 {
    type Output = Vector;

    fn add(self, rhs: &Vector) -> Vector {
        rhs.add_scalar(self)
    }
}

impl Sub<&Vector> for f64 {
    type Output = Vector;

    fn sub(self, rhs: &Vector) -> Vector {
        rhs.scalar_sub(self)
    }
}

impl Neg for &Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        self.map(|a| -a)
    }
}
