//! Per-instance memoization of decompositions.
//!
//! Each slot is filled at most once between writes. Any mutation of the
//! owning [`Matrix`] goes through [`Matrix::invalidate`], which empties
//! every slot; the next request recomputes from the current elements.
//!
//! The slots are [`OnceCell`]s, so a `Matrix` is `Send` but not `Sync`:
//! sharing one across threads needs external synchronisation.

use core::fmt;
use std::cell::OnceCell;

use crate::error::Result;
use crate::linalg::decomp::{
    CholeskyDecomposition, EigenDecomposition, LuDecomposition, QrDecomposition,
    SvdDecomposition,
};
use crate::stats;

use super::Matrix;

#[derive(Default)]
pub(super) struct DecompositionCache {
    lu: OnceCell<LuDecomposition>,
    qr: OnceCell<QrDecomposition>,
    svd: OnceCell<SvdDecomposition>,
    cholesky: OnceCell<CholeskyDecomposition>,
    eigen: OnceCell<EigenDecomposition>,
    eigen_assume_symmetric: OnceCell<EigenDecomposition>,
    correlation: OnceCell<Box<CorrelationComposition>>,
}

impl DecompositionCache {
    fn is_populated(&self) -> bool {
        self.lu.get().is_some()
            || self.qr.get().is_some()
            || self.svd.get().is_some()
            || self.cholesky.get().is_some()
            || self.eigen.get().is_some()
            || self.eigen_assume_symmetric.get().is_some()
            || self.correlation.get().is_some()
    }
}

/// A clone starts cold: results belong to the instance that computed them.
impl Clone for DecompositionCache {
    fn clone(&self) -> Self {
        Self::default()
    }
}

impl fmt::Debug for DecompositionCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecompositionCache")
            .field("lu", &self.lu.get().is_some())
            .field("qr", &self.qr.get().is_some())
            .field("svd", &self.svd.get().is_some())
            .field("cholesky", &self.cholesky.get().is_some())
            .field("eigen", &self.eigen.get().is_some())
            .field("eigen_assume_symmetric", &self.eigen_assume_symmetric.get().is_some())
            .field("correlation", &self.correlation.get().is_some())
            .finish()
    }
}

/// Fill `cell` from a fallible computation, keeping the first stored value.
fn get_or_try_init<'a, T, F>(
    cell: &'a OnceCell<T>,
    name: &str,
    shape: (usize, usize),
    f: F,
) -> Result<&'a T>
where
    F: FnOnce() -> Result<T>,
{
    if let Some(value) = cell.get() {
        return Ok(value);
    }
    let value = f()?;
    log::debug!("computed {name} for {}x{} matrix", shape.0, shape.1);
    Ok(cell.get_or_init(|| value))
}

/// Correlation matrix of a `T x J` data matrix, with its variance
/// inflation factors derived on first request.
#[derive(Debug)]
pub struct CorrelationComposition {
    correlation: Matrix,
    vif: OnceCell<Vec<f64>>,
}

impl CorrelationComposition {
    /// Compute the correlation matrix of `data`.
    pub fn new(data: &Matrix) -> Result<Self> {
        Ok(Self {
            correlation: stats::correlation_matrix(data)?,
            vif: OnceCell::new(),
        })
    }

    /// The `J x J` correlation matrix.
    pub fn correlation_matrix(&self) -> &Matrix {
        &self.correlation
    }

    /// Diagonal of the inverse correlation matrix, falling back to the
    /// pseudoinverse when the correlation matrix is singular.
    pub fn variance_inflation_factors(&self) -> Result<&[f64]> {
        let shape = self.correlation.shape();
        get_or_try_init(&self.vif, "variance inflation factors", shape, || {
            stats::inverse_diagonal(&self.correlation)
        })
        .map(Vec::as_slice)
    }
}

impl Matrix {
    /// Drop every memoized result. Called by all mutating methods.
    pub(crate) fn invalidate(&mut self) {
        if self.cache.is_populated() {
            log::trace!(
                "invalidating cached decompositions of {}x{} matrix",
                self.height,
                self.width
            );
            self.cache = DecompositionCache::default();
        }
    }

    /// LU decomposition, computed on first use.
    ///
    /// ```
    /// # use linmat_core::Matrix;
    /// let a = Matrix::from_array(&[[4.0, 3.0], [6.0, 3.0]]);
    /// assert!((a.lu().det().unwrap() - (-6.0)).abs() < 1e-12);
    /// // the second call reuses the stored factorization
    /// assert!(core::ptr::eq(a.lu(), a.lu()));
    /// ```
    pub fn lu(&self) -> &LuDecomposition {
        self.cache.lu.get_or_init(|| {
            log::debug!("computed LU for {}x{} matrix", self.height, self.width);
            LuDecomposition::decompose(self)
        })
    }

    /// QR decomposition, computed on first use.
    pub fn qr(&self) -> Result<&QrDecomposition> {
        get_or_try_init(&self.cache.qr, "QR", self.shape(), || {
            QrDecomposition::decompose(self)
        })
    }

    /// Singular value decomposition, computed on first use.
    pub fn svd(&self) -> Result<&SvdDecomposition> {
        get_or_try_init(&self.cache.svd, "SVD", self.shape(), || {
            SvdDecomposition::decompose(self)
        })
    }

    /// Cholesky decomposition, computed on first use.
    pub fn cholesky(&self) -> Result<&CholeskyDecomposition> {
        get_or_try_init(&self.cache.cholesky, "Cholesky", self.shape(), || {
            CholeskyDecomposition::decompose(self)
        })
    }

    /// Eigen decomposition, with the solver chosen by an exact symmetry
    /// test.
    pub fn eigen(&self) -> Result<&EigenDecomposition> {
        get_or_try_init(&self.cache.eigen, "eigen decomposition", self.shape(), || {
            EigenDecomposition::decompose(self)
        })
    }

    /// Eigen decomposition through the symmetric solver, skipping the
    /// symmetry test.
    pub fn eigen_assume_symmetric(&self) -> Result<&EigenDecomposition> {
        get_or_try_init(
            &self.cache.eigen_assume_symmetric,
            "symmetric eigen decomposition",
            self.shape(),
            || EigenDecomposition::decompose_assume_symmetric(self),
        )
    }

    fn correlation_composition(&self) -> Result<&CorrelationComposition> {
        get_or_try_init(&self.cache.correlation, "correlation", self.shape(), || {
            CorrelationComposition::new(self).map(Box::new)
        })
        .map(|boxed| &**boxed)
    }

    /// Correlation matrix of the columns, treating rows as observations.
    pub fn correlation_matrix(&self) -> Result<&Matrix> {
        Ok(self.correlation_composition()?.correlation_matrix())
    }

    /// Variance inflation factors of the columns.
    pub fn variance_inflation_factors(&self) -> Result<&[f64]> {
        self.correlation_composition()?.variance_inflation_factors()
    }

    /// Determinant via the cached LU decomposition.
    pub fn determinant(&self) -> Result<f64> {
        self.lu().det()
    }

    /// Square with no exactly-zero LU pivot.
    pub fn is_non_singular(&self) -> bool {
        self.lu().is_non_singular()
    }

    /// Full column rank according to the cached QR decomposition.
    pub fn is_full_rank(&self) -> Result<bool> {
        Ok(self.qr()?.is_full_rank())
    }
}
