//! Matrix decompositions.
//!
//! | Decomposition | Module       | Factorization           |
//! |---------------|--------------|-------------------------|
//! | LU            | [`lu`]       | `PA = LU`               |
//! | QR            | [`qr`]       | `A = QR`                |
//! | Cholesky      | [`cholesky`] | `A = L L^T`             |
//! | SVD           | [`svd`]      | `A = U diag(s) V^T`     |
//! | Eigen         | [`eig`]      | `A V = V D`             |
//!
//! Every result is an owned snapshot of the input at decomposition time;
//! [`Matrix`](crate::Matrix) memoizes one of each per instance.

pub mod cholesky;
pub mod eig;
pub mod lu;
pub mod qr;
pub mod svd;

pub use cholesky::CholeskyDecomposition;
pub use eig::{EigenDecomposition, EigenSolver, GeneralSolver, SymmetricSolver};
pub use lu::LuDecomposition;
pub use qr::{QrDecomposition, lstsq};
pub use svd::{MAX_SVD_ITERATIONS, SvdDecomposition};
