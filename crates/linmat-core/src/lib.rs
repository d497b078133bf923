//! `linmat-core` — dense linear algebra over `f64`.
//!
//! Provides [`Vector`] and [`Matrix`], the LU / QR / SVD / Cholesky / eigen
//! decompositions, solvers built on them, and covariance and correlation
//! estimators for `T x J` data matrices.
//!
//! # Design
//!
//! - Row-major owned storage; every constructor copies its input.
//! - Decompositions requested through a [`Matrix`] are memoized per instance
//!   and discarded on the next write, so a `Matrix` is `Send` but not `Sync`.
//! - All fallible operations return [`Result`] with a [`LinalgError`].
//! - Diagnostics go through the [`log`] facade; nothing is printed.
//!
//! ```
//! use linmat_core::prelude::*;
//!
//! let a = Matrix::from_array(&[[4.0, 0.0], [0.0, 9.0]]);
//! let eig = a.eigen().unwrap();
//! assert_eq!(eig.real_eigenvalues(), &[4.0, 9.0]);
//! assert_eq!(a.determinant().unwrap(), 36.0);
//! ```

pub mod config;
pub mod error;
pub mod linalg;
pub mod math;
pub mod matrix;
pub mod stats;
pub mod vector;

// Re-export key types at crate root for convenience.
pub use config::CovarianceConfig;
pub use error::{LinalgError, Result};
pub use linalg::decomp::{
    CholeskyDecomposition, EigenDecomposition, EigenSolver, GeneralSolver, LuDecomposition,
    QrDecomposition, SvdDecomposition, SymmetricSolver,
};
pub use matrix::{CorrelationComposition, Matrix, TransposeView};
pub use vector::Vector;

/// Items intended for glob-import: `use linmat_core::prelude::*;`
pub mod prelude {
    pub use crate::config::CovarianceConfig;
    pub use crate::error::{LinalgError, Result};
    pub use crate::linalg::decomp::{
        CholeskyDecomposition, EigenDecomposition, EigenSolver, LuDecomposition,
        QrDecomposition, SvdDecomposition,
    };
    pub use crate::matrix::Matrix;
    pub use crate::vector::Vector;
}
