//! Dense row-major matrix of `f64` values.
//!
//! The [`Matrix`] type owns its elements and never aliases caller memory:
//! every constructor copies its input. Decompositions requested through the
//! accessor methods in [`cache`](self) are memoized per instance and dropped
//! whenever the matrix is written to.

mod cache;
mod create;
mod display;
mod indexing;
mod norms;
mod ops;
mod view;

pub use cache::CorrelationComposition;
pub use view::TransposeView;

use core::ops::{Index, IndexMut};

use crate::error::{LinalgError, Result};
use crate::vector::Vector;

use cache::DecompositionCache;

/// A dense 2-D matrix of `f64` stored in row-major order.
///
/// The shape is fixed after construction; operations that produce a
/// different shape return a new matrix. Cloning copies the elements and
/// starts with an empty decomposition cache.
#[derive(Debug, Clone)]
pub struct Matrix {
    data: Vec<f64>,
    height: usize,
    width: usize,
    column_names: Option<Vec<String>>,
    cache: DecompositionCache,
}

impl Matrix {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Create a zero-filled `height x width` matrix.
    ///
    /// ```
    /// # use linmat_core::Matrix;
    /// let m = Matrix::new(2, 3);
    /// assert_eq!(m.shape(), (2, 3));
    /// assert!(m.as_slice().iter().all(|&x| x == 0.0));
    /// ```
    pub fn new(height: usize, width: usize) -> Self {
        Self::from_parts(height, width, vec![0.0; height * width])
    }

    /// Create a matrix from a flat row-major vector.
    ///
    /// Returns an error if `data.len() != height * width`.
    pub fn from_vec(height: usize, width: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != height * width {
            return Err(LinalgError::DimensionMismatch {
                expected: vec![height * width],
                got: vec![data.len()],
            });
        }
        Ok(Self::from_parts(height, width, data))
    }

    /// Create a matrix from rectangular rows.
    ///
    /// Returns an error if the rows do not all have the same length.
    ///
    /// ```
    /// # use linmat_core::Matrix;
    /// let m = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    /// assert_eq!(m[(1, 0)], 3.0);
    /// ```
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let width = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().find(|r| r.len() != width) {
            return Err(LinalgError::DimensionMismatch {
                expected: vec![width],
                got: vec![bad.len()],
            });
        }
        Ok(Self::from_parts(rows.len(), width, rows.concat()))
    }

    /// Create a matrix from fixed-size rows.
    ///
    /// ```
    /// # use linmat_core::Matrix;
    /// let m = Matrix::from_array(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    /// assert_eq!(m.shape(), (2, 3));
    /// ```
    pub fn from_array<const W: usize>(rows: &[[f64; W]]) -> Self {
        let data = rows.iter().flat_map(|r| r.iter().copied()).collect();
        Self::from_parts(rows.len(), W, data)
    }

    /// Create a matrix from rows of possibly different lengths.
    ///
    /// Every row is trimmed to the length of the shortest one.
    pub fn from_jagged(rows: &[Vec<f64>]) -> Self {
        let width = rows.iter().map(Vec::len).min().unwrap_or(0);
        let data = rows
            .iter()
            .flat_map(|r| r[..width].iter().copied())
            .collect();
        Self::from_parts(rows.len(), width, data)
    }

    /// Create a matrix from rectangular integer rows.
    pub fn from_i32_rows(rows: &[Vec<i32>]) -> Result<Self> {
        let width = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().find(|r| r.len() != width) {
            return Err(LinalgError::DimensionMismatch {
                expected: vec![width],
                got: vec![bad.len()],
            });
        }
        let data = rows
            .iter()
            .flat_map(|r| r.iter().map(|&x| f64::from(x)))
            .collect();
        Ok(Self::from_parts(rows.len(), width, data))
    }

    /// Create an `n x 1` column vector from a slice.
    pub fn from_column(data: &[f64]) -> Self {
        Self::from_parts(data.len(), 1, data.to_vec())
    }

    /// Create a `1 x n` row vector from a slice.
    pub fn from_row(data: &[f64]) -> Self {
        Self::from_parts(1, data.len(), data.to_vec())
    }

    /// Create a row vector when `as_row` is set, a column vector otherwise.
    pub fn from_slice(data: &[f64], as_row: bool) -> Self {
        if as_row {
            Self::from_row(data)
        } else {
            Self::from_column(data)
        }
    }

    /// Infallible constructor for call sites that already know the shape.
    pub(crate) fn from_parts(height: usize, width: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), height * width);
        Self {
            data,
            height,
            width,
            column_names: None,
            cache: DecompositionCache::default(),
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// `(height, width)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Whether the matrix holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.height == self.width
    }

    /// Exact equality of every mirrored pair `(i, j)` / `(j, i)`.
    ///
    /// Non-square matrices are never symmetric.
    #[allow(clippy::float_cmp)]
    pub fn is_symmetric(&self) -> bool {
        if !self.is_square() {
            return false;
        }
        let n = self.height;
        (0..n).all(|i| (0..i).all(|j| self.data[i * n + j] == self.data[j * n + i]))
    }

    /// A flat slice of all elements in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// A mutable flat slice of all elements. Clears cached decompositions.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        self.invalidate();
        &mut self.data
    }

    /// Consume the matrix and return the underlying row-major `Vec`.
    #[inline]
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Copy the elements out as one `Vec` per row.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        if self.width == 0 {
            return vec![Vec::new(); self.height];
        }
        self.data.chunks(self.width).map(<[f64]>::to_vec).collect()
    }

    /// Flatten a row or column vector.
    ///
    /// Fails unless the matrix has a single row or a single column.
    pub fn to_vec(&self) -> Result<Vec<f64>> {
        if self.width != 1 && self.height != 1 {
            return Err(LinalgError::InvalidArgument {
                reason: "only a row or column vector can be flattened",
            });
        }
        Ok(self.data.clone())
    }

    /// Flatten a row or column vector into a [`Vector`].
    pub fn to_vector(&self) -> Result<Vector> {
        self.to_vec().map(Vector::from_vec)
    }

    /// The single element of a `1 x 1` matrix.
    pub fn to_scalar(&self) -> Result<f64> {
        if self.shape() != (1, 1) {
            return Err(LinalgError::DimensionMismatch {
                expected: vec![1, 1],
                got: vec![self.height, self.width],
            });
        }
        Ok(self.data[0])
    }

    /// Optional column labels carried alongside the data.
    pub fn column_names(&self) -> Option<&[String]> {
        self.column_names.as_deref()
    }

    /// Attach (or clear) column labels. The label count must equal `width`.
    pub fn set_column_names(&mut self, names: Option<Vec<String>>) -> Result<()> {
        if let Some(n) = &names {
            if n.len() != self.width {
                return Err(LinalgError::DimensionMismatch {
                    expected: vec![self.width],
                    got: vec![n.len()],
                });
            }
        }
        self.column_names = names;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Element access
    // ------------------------------------------------------------------

    fn check_index(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.height || col >= self.width {
            return Err(LinalgError::IndexOutOfRange {
                index: vec![row, col],
                shape: vec![self.height, self.width],
            });
        }
        Ok(row * self.width + col)
    }

    /// The element at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        let flat = self.check_index(row, col)?;
        Ok(self.data[flat])
    }

    /// Overwrite the element at `(row, col)`, clearing cached decompositions.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        let flat = self.check_index(row, col)?;
        self.invalidate();
        self.data[flat] = value;
        Ok(())
    }

    /// Apply a function to every element in place.
    pub fn apply<F>(&mut self, f: F)
    where
        F: Fn(f64) -> f64,
    {
        self.invalidate();
        for x in &mut self.data {
            *x = f(*x);
        }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        assert!(
            row < self.height && col < self.width,
            "index ({row}, {col}) out of range for {}x{} matrix",
            self.height,
            self.width,
        );
        &self.data[row * self.width + col]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        assert!(
            row < self.height && col < self.width,
            "index ({row}, {col}) out of range for {}x{} matrix",
            self.height,
            self.width,
        );
        self.invalidate();
        &mut self.data[row * self.width + col]
    }
}

/// Shape and elements only; labels and cached state are ignored.
impl PartialEq for Matrix {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape() && self.data == other.data
    }
}

impl From<Vector> for Matrix {
    fn from(v: Vector) -> Self {
        let data = v.to_vec();
        Self::from_parts(data.len(), 1, data)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zero_filled() {
        let m = Matrix::new(3, 2);
        assert_eq!(m.shape(), (3, 2));
        assert_eq!(m.as_slice(), &[0.0; 6]);
    }

    #[test]
    fn test_from_vec_length_mismatch() {
        assert!(Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0]).is_err());
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let err = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(err, LinalgError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_from_jagged_trims_to_shortest_row() {
        let m = Matrix::from_jagged(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0], vec![6.0, 7.0, 8.0]]);
        assert_eq!(m.shape(), (3, 2));
        assert_eq!(m.as_slice(), &[1.0, 2.0, 4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn test_from_i32_rows() {
        let m = Matrix::from_i32_rows(&[vec![1, -2], vec![3, 4]]).unwrap();
        assert_eq!(m[(0, 1)], -2.0);
    }

    #[test]
    fn test_row_and_column_vectors() {
        let c = Matrix::from_slice(&[1.0, 2.0, 3.0], false);
        let r = Matrix::from_slice(&[1.0, 2.0, 3.0], true);
        assert_eq!(c.shape(), (3, 1));
        assert_eq!(r.shape(), (1, 3));
        assert_eq!(c.to_vec().unwrap(), r.to_vec().unwrap());
    }

    #[test]
    fn test_constructors_copy_input() {
        let mut src = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        let m = Matrix::from_rows(&src).unwrap();
        src[0][0] = 99.0;
        assert_eq!(m[(0, 0)], 1.0);
    }

    #[test]
    fn test_get_set_out_of_range() {
        let mut m = Matrix::new(2, 2);
        assert!(matches!(
            m.get(2, 0),
            Err(LinalgError::IndexOutOfRange { .. })
        ));
        assert!(m.set(0, 5, 1.0).is_err());
        m.set(1, 1, 7.0).unwrap();
        assert_eq!(m.get(1, 1).unwrap(), 7.0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_index_panics_out_of_range() {
        let m = Matrix::new(2, 2);
        let _ = m[(0, 2)];
    }

    #[test]
    fn test_is_symmetric() {
        let s = Matrix::from_array(&[[1.0, 2.0], [2.0, 3.0]]);
        let a = Matrix::from_array(&[[1.0, 2.0], [2.5, 3.0]]);
        assert!(s.is_symmetric());
        assert!(!a.is_symmetric());
        assert!(!Matrix::new(2, 3).is_symmetric());
    }

    #[test]
    fn test_to_vec_requires_vector_shape() {
        assert!(Matrix::new(2, 2).to_vec().is_err());
        assert_eq!(Matrix::from_row(&[1.0, 2.0]).to_vec().unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_to_scalar() {
        assert_eq!(Matrix::from_row(&[4.5]).to_scalar().unwrap(), 4.5);
        assert!(Matrix::from_row(&[1.0, 2.0]).to_scalar().is_err());
    }

    #[test]
    fn test_equality_ignores_labels() {
        let a = Matrix::from_array(&[[1.0, 2.0]]);
        let mut b = a.clone();
        b.set_column_names(Some(vec!["x".into(), "y".into()]))
            .unwrap();
        assert_eq!(a, b);
        assert!(b.set_column_names(Some(vec!["only".into()])).is_err());
    }

    #[test]
    fn test_to_rows() {
        let m = Matrix::from_array(&[[1.0, 2.0], [3.0, 4.0]]);
        assert_eq!(m.to_rows(), vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    }
}
