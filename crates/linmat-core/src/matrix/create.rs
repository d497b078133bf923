//! Matrix creation functions analogous to `np.zeros`, `np.eye`, `np.diag`.

use super::Matrix;

impl Matrix {
    /// Create a matrix filled with a constant value.
    pub fn filled(height: usize, width: usize, value: f64) -> Self {
        Self::from_parts(height, width, vec![value; height * width])
    }

    /// Create an `n x n` identity matrix.
    ///
    /// ```
    /// # use linmat_core::Matrix;
    /// let eye = Matrix::identity(3);
    /// assert_eq!(eye[(0, 0)], 1.0);
    /// assert_eq!(eye[(0, 1)], 0.0);
    /// ```
    pub fn identity(n: usize) -> Self {
        Self::diagonal(n, n, 1.0)
    }

    /// A `height x width` matrix with `value` on the main diagonal.
    ///
    /// Only the first `min(height, width)` diagonal entries exist.
    pub fn diagonal(height: usize, width: usize, value: f64) -> Self {
        let mut data = vec![0.0; height * width];
        for i in 0..height.min(width) {
            data[i * width + i] = value;
        }
        Self::from_parts(height, width, data)
    }

    /// A square matrix with `values` on the diagonal (`np.diag`).
    ///
    /// ```
    /// # use linmat_core::Matrix;
    /// let d = Matrix::diagonalise(&[4.0, 9.0]);
    /// assert_eq!(d.as_slice(), &[4.0, 0.0, 0.0, 9.0]);
    /// ```
    pub fn diagonalise(values: &[f64]) -> Self {
        let n = values.len();
        let mut data = vec![0.0; n * n];
        for (i, &v) in values.iter().enumerate() {
            data[i * n + i] = v;
        }
        Self::from_parts(n, n, data)
    }

    /// A `dimension x 1` column with every entry set to `value`.
    pub fn unit_vector(dimension: usize, value: f64) -> Self {
        Self::filled(dimension, 1, value)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let eye = Matrix::identity(3);
        assert_eq!(eye.shape(), (3, 3));
        assert_eq!(eye.trace(), 3.0);
        assert!(eye.is_symmetric());
    }

    #[test]
    fn test_rectangular_diagonal() {
        let d = Matrix::diagonal(2, 3, 5.0);
        assert_eq!(d.as_slice(), &[5.0, 0.0, 0.0, 0.0, 5.0, 0.0]);
        let d = Matrix::diagonal(3, 2, 1.0);
        assert_eq!(d.as_slice(), &[1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_unit_vector() {
        let u = Matrix::unit_vector(3, 2.5);
        assert_eq!(u.shape(), (3, 1));
        assert!(u.as_slice().iter().all(|&x| x == 2.5));
    }

    #[test]
    fn test_filled_empty() {
        let m = Matrix::filled(0, 4, 1.0);
        assert!(m.is_empty());
        assert_eq!(m.shape(), (0, 4));
    }
}
