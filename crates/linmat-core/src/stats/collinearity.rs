//! Correlation and variance inflation factors.

use crate::error::Result;
use crate::matrix::Matrix;

/// Sample correlation of the columns: `X^T X / (T - 1)` where `X` is the
/// column-wise centred and scaled data. Needs at least two rows; constant
/// columns correlate as zero with everything, themselves included.
///
/// ```
/// # use linmat_core::Matrix;
/// # use linmat_core::stats::correlation_matrix;
/// let m = Matrix::from_array(&[[1.0, 2.0], [2.0, 4.0], [3.0, 6.0]]);
/// let c = correlation_matrix(&m).unwrap();
/// assert!((c[(0, 1)] - 1.0).abs() < 1e-12);
/// ```
pub fn correlation_matrix(m: &Matrix) -> Result<Matrix> {
    let x = m.normalised_centred()?;
    let scale = 1.0 / (m.height() - 1) as f64;
    Ok(x.transpose().matmul(&x)?.scale(scale))
}

/// Diagonal of the inverse correlation matrix of `m`'s columns.
///
/// A large factor means the column is well explained by the others.
pub fn variance_inflation_factors(m: &Matrix) -> Result<Vec<f64>> {
    inverse_diagonal(&correlation_matrix(m)?)
}

/// Diagonal of `c^-1`, or of the pseudoinverse when `c` is singular.
pub(crate) fn inverse_diagonal(c: &Matrix) -> Result<Vec<f64>> {
    let inv = if c.is_non_singular() {
        c.inverse()?
    } else {
        log::warn!(
            "{}x{} correlation matrix is singular, using the pseudoinverse",
            c.height(),
            c.width()
        );
        c.pseudo_inverse()?
    };
    Ok((0..inv.height()).map(|i| inv[(i, i)]).collect())
}

/// Shrinkage target for the two-decay covariance estimate.
///
/// No target is defined yet; always `None`.
pub fn shrinkage_target(_m: &Matrix) -> Option<Matrix> {
    None
}
