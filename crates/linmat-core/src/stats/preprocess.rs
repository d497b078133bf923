//! Column preprocessing ahead of regression-style analysis.

use crate::error::Result;
use crate::matrix::Matrix;

/// Output of [`normalise_matrix`].
#[derive(Debug, Clone, PartialEq)]
pub struct Normalised {
    /// Centred and scaled copy of the input.
    pub matrix: Matrix,
    /// Column means of the input.
    pub means: Vec<f64>,
    /// Sample standard deviations (divisor `T - 1`) of the input columns.
    pub stdevs: Vec<f64>,
}

/// Prepend an intercept column of ones.
///
/// ```
/// # use linmat_core::Matrix;
/// # use linmat_core::stats::insert_constant_column;
/// let x = insert_constant_column(&Matrix::from_array(&[[2.0], [3.0]]));
/// assert_eq!(x.to_rows(), vec![vec![1.0, 2.0], vec![1.0, 3.0]]);
/// ```
pub fn insert_constant_column(m: &Matrix) -> Matrix {
    m.insert_column(1.0)
}

/// Copy of `m` without the listed columns.
pub fn drop_columns(m: &Matrix, columns: &[usize]) -> Matrix {
    m.drop_columns(columns)
}

/// Centre and scale every column, keeping the moments used.
///
/// Columns with zero standard deviation map to zeros. Needs at least two
/// rows.
pub fn normalise_matrix(m: &Matrix) -> Result<Normalised> {
    let matrix = m.normalised_centred()?;
    let means = (0..m.width())
        .map(|j| m.col_avg(j))
        .collect::<Result<Vec<_>>>()?;
    let stdevs = (0..m.width())
        .map(|j| m.col_stdev(j))
        .collect::<Result<Vec<_>>>()?;
    Ok(Normalised {
        matrix,
        means,
        stdevs,
    })
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_constant_column() {
        let m = Matrix::from_array(&[[5.0, 6.0], [7.0, 8.0]]);
        let x = insert_constant_column(&m);
        assert_eq!(x.shape(), (2, 3));
        assert_eq!(x.as_slice(), &[1.0, 5.0, 6.0, 1.0, 7.0, 8.0]);
        assert!(x.is_constant_column(0).unwrap());
    }

    #[test]
    fn test_drop_columns() {
        let m = Matrix::from_array(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let d = drop_columns(&m, &[0, 2]);
        assert_eq!(d.to_rows(), vec![vec![2.0], vec![5.0]]);
        assert_eq!(drop_columns(&m, &[]), m);
    }

    #[test]
    fn test_normalise_matrix() {
        let m = Matrix::from_array(&[[1.0, 4.0], [2.0, 4.0], [3.0, 4.0]]);
        let n = normalise_matrix(&m).unwrap();
        assert_eq!(n.means, vec![2.0, 4.0]);
        assert_eq!(n.stdevs, vec![1.0, 0.0]);
        assert_eq!(n.matrix.as_slice(), &[-1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_normalise_needs_two_rows() {
        assert!(normalise_matrix(&Matrix::from_array(&[[1.0, 2.0]])).is_err());
    }
}
