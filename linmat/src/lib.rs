//! # linmat
//!
//! Dense linear algebra in pure Rust: matrices and vectors, LU, QR, SVD,
//! Cholesky and eigen decompositions, and covariance estimators.
//!
//! ## Feature Flags
//!
//! | Feature | Enables |
//! |---------|---------|
//! | `core` *(default)* | Matrices, decompositions, statistics |

#[cfg(feature = "core")]
pub use linmat_core as core;

/// Glob-import convenience: `use linmat::prelude::*;`
pub mod prelude {
    #[cfg(feature = "core")]
    pub use linmat_core::prelude::*;
}
