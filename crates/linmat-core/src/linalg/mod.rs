//! Linear algebra operations.
//!
//! Everything is implemented directly over the row-major storage of
//! [`Matrix`]; there are no BLAS/LAPACK bindings.
//!
//! | Level | Operations | Complexity |
//! |-------|-----------|------------|
//! | L1 | `dot` | O(n) |
//! | L2 | `gemv`, `gevm` (matrix-vector products) | O(n^2) |
//! | L3 | `gemm` (matrix-matrix product) | O(n^3) |
//!
//! Decompositions: [`LuDecomposition`], [`QrDecomposition`],
//! [`CholeskyDecomposition`], [`SvdDecomposition`], [`EigenDecomposition`].
//!
//! The free functions below decompose afresh on every call. The methods of
//! the same name on [`Matrix`] go through its per-instance cache.

pub mod blas;
pub mod decomp;
mod gauss;

pub use blas::{dot, gemm, gemv, gevm};
pub use decomp::CholeskyDecomposition;
pub use decomp::EigenDecomposition;
pub use decomp::LuDecomposition;
pub use decomp::QrDecomposition;
pub use decomp::SvdDecomposition;
pub use decomp::lstsq;

use crate::error::Result;
use crate::matrix::Matrix;

/// Singular values below this fraction of the largest one are treated as
/// zero by the pseudoinverse.
pub const PINV_RELATIVE_TOLERANCE: f64 = 1e-13;

/// Solve `A X = B`: LU for square `A`, QR least squares otherwise.
///
/// ```
/// # use linmat_core::Matrix;
/// # use linmat_core::linalg;
/// let a = Matrix::from_array(&[[2.0, 1.0], [1.0, 4.0]]);
/// let b = Matrix::from_column(&[5.0, 6.0]);
/// let x = linalg::solve(&a, &b).unwrap();
/// assert!((x[(0, 0)] - 2.0).abs() < 1e-10);
/// assert!((x[(1, 0)] - 1.0).abs() < 1e-10);
/// ```
pub fn solve(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    if a.is_square() {
        LuDecomposition::decompose(a).solve(b)
    } else {
        QrDecomposition::decompose(a)?.solve(b)
    }
}

/// Inverse of a square matrix. A rectangular `a` is solved in the
/// least-squares sense against the `height x width` identity.
///
/// ```
/// # use linmat_core::Matrix;
/// # use linmat_core::linalg;
/// let a = Matrix::from_array(&[[2.0, 1.0], [1.0, 4.0]]);
/// let inv = linalg::inv(&a).unwrap();
/// let eye = a.matmul(&inv).unwrap();
/// assert!((eye[(0, 0)] - 1.0).abs() < 1e-10);
/// assert!(eye[(0, 1)].abs() < 1e-10);
/// ```
pub fn inv(a: &Matrix) -> Result<Matrix> {
    solve(a, &Matrix::diagonal(a.height(), a.width(), 1.0))
}

/// Determinant of a square matrix.
///
/// ```
/// # use linmat_core::Matrix;
/// # use linmat_core::linalg;
/// let a = Matrix::from_array(&[[2.0, 1.0], [1.0, 4.0]]);
/// assert!((linalg::det(&a).unwrap() - 7.0).abs() < 1e-10);
/// ```
pub fn det(a: &Matrix) -> Result<f64> {
    LuDecomposition::decompose(a).det()
}

/// Moore-Penrose pseudoinverse `V S+ U^T`.
///
/// ```
/// # use linmat_core::Matrix;
/// # use linmat_core::linalg;
/// let a = Matrix::from_array(&[[1.0, 2.0], [2.0, 4.0]]);
/// let p = linalg::pinv(&a).unwrap();
/// // >>> np.linalg.pinv([[1, 2], [2, 4]])
/// // array([[0.04, 0.08], [0.08, 0.16]])
/// assert!((p[(0, 0)] - 0.04).abs() < 1e-12);
/// assert!((p[(1, 1)] - 0.16).abs() < 1e-12);
/// ```
pub fn pinv(a: &Matrix) -> Result<Matrix> {
    pinv_from_svd(&SvdDecomposition::decompose(a)?)
}

fn pinv_from_svd(svd: &SvdDecomposition) -> Result<Matrix> {
    let s = svd.singular_values();
    let thresh = PINV_RELATIVE_TOLERANCE * s.first().copied().unwrap_or(0.0);
    let s_plus: Vec<f64> = s
        .iter()
        .map(|&x| if x < thresh || x == 0.0 { 0.0 } else { 1.0 / x })
        .collect();

    // V S+ scales the columns of V.
    let mut vs = svd.v();
    let k = s_plus.len();
    for (idx, x) in vs.as_mut_slice().iter_mut().enumerate() {
        *x *= s_plus[idx % k];
    }
    vs.matmul(&svd.u().transpose())
}

impl Matrix {
    /// Solve `self * X = rhs` using the cached LU (square) or QR
    /// (rectangular) decomposition.
    pub fn solve(&self, rhs: &Matrix) -> Result<Matrix> {
        if self.is_square() {
            self.lu().solve(rhs)
        } else {
            self.qr()?.solve(rhs)
        }
    }

    /// `solve` against the `height x width` identity.
    pub fn inverse(&self) -> Result<Matrix> {
        self.solve(&Matrix::diagonal(self.height(), self.width(), 1.0))
    }

    /// Pseudoinverse through the cached SVD.
    pub fn pseudo_inverse(&self) -> Result<Matrix> {
        pinv_from_svd(self.svd()?)
    }
}
