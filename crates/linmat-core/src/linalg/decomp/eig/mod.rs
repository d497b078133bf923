//! Eigenvalue decomposition of real square matrices.
//!
//! Two solvers share the [`EigenSolver`] interface:
//!
//! | Solver              | Input     | Method                                   |
//! |---------------------|-----------|------------------------------------------|
//! | [`SymmetricSolver`] | `A = A^T` | Householder tridiagonalisation + QL      |
//! | [`GeneralSolver`]   | any       | Hessenberg reduction + real Schur (QR)   |
//!
//! [`EigenDecomposition::decompose`] picks one by an exact symmetry test.
//! For symmetric input `A = V D V^T` with orthogonal `V`; in general
//! `A V = V D` where `D` is block diagonal with 2 x 2 blocks for complex
//! conjugate pairs.

mod general;
mod symmetric;

pub use general::GeneralSolver;
pub use symmetric::{MAX_QL_ITERATIONS, SymmetricSolver};

use crate::error::{LinalgError, Result};
use crate::matrix::Matrix;

/// `2^-52`, the relative spacing used by the convergence tests.
pub(crate) const EPS: f64 = f64::EPSILON;

/// A strategy computing eigenvalues and eigenvectors of a square matrix.
pub trait EigenSolver {
    /// Decompose `a`, which must be square.
    fn solve(&self, a: &Matrix) -> Result<EigenDecomposition>;
}

/// Eigenvalues and eigenvectors of a real square matrix.
#[derive(Debug, Clone)]
pub struct EigenDecomposition {
    /// Real parts of the eigenvalues.
    real: Vec<f64>,
    /// Imaginary parts; conjugate pairs appear as `(+b, -b)` in
    /// consecutive slots.
    imag: Vec<f64>,
    /// Eigenvector matrix `V`, row-major n x n.
    vectors: Vec<f64>,
    n: usize,
    symmetric: bool,
}

impl EigenDecomposition {
    /// Decompose `a`, using the symmetric solver when `a` equals its
    /// transpose exactly.
    ///
    /// ```
    /// # use linmat_core::Matrix;
    /// # use linmat_core::linalg::decomp::EigenDecomposition;
    /// let a = Matrix::from_array(&[[2.0, 1.0], [1.0, 2.0]]);
    /// let eig = EigenDecomposition::decompose(&a).unwrap();
    /// assert!(eig.is_symmetric());
    /// let d = eig.real_eigenvalues();
    /// assert!((d[0] - 1.0).abs() < 1e-12);
    /// assert!((d[1] - 3.0).abs() < 1e-12);
    /// ```
    pub fn decompose(a: &Matrix) -> Result<Self> {
        check_input(a)?;
        if a.is_symmetric() {
            SymmetricSolver.solve(a)
        } else {
            GeneralSolver.solve(a)
        }
    }

    /// Decompose `a` with the symmetric solver without testing symmetry.
    /// Only the lower triangle of `a` is read.
    pub fn decompose_assume_symmetric(a: &Matrix) -> Result<Self> {
        SymmetricSolver.solve(a)
    }

    pub(super) fn from_parts(
        real: Vec<f64>,
        imag: Vec<f64>,
        vectors: Vec<f64>,
        n: usize,
        symmetric: bool,
    ) -> Self {
        Self {
            real,
            imag,
            vectors,
            n,
            symmetric,
        }
    }

    /// Whether the symmetric solver produced this decomposition.
    pub fn is_symmetric(&self) -> bool {
        self.symmetric
    }

    /// Real parts of the eigenvalues. Ascending for symmetric input.
    pub fn real_eigenvalues(&self) -> &[f64] {
        &self.real
    }

    /// Imaginary parts of the eigenvalues (all zero for symmetric input).
    pub fn imag_eigenvalues(&self) -> &[f64] {
        &self.imag
    }

    /// The eigenvector matrix `V`; column `j` belongs to eigenvalue `j`.
    pub fn eigenvectors(&self) -> Matrix {
        Matrix::from_parts(self.n, self.n, self.vectors.clone())
    }

    /// Block diagonal eigenvalue matrix `D` with `A V = V D`.
    ///
    /// A complex pair `a +- bi` occupies the 2 x 2 block
    /// `[[a, b], [-b, a]]`.
    pub fn d(&self) -> Matrix {
        let n = self.n;
        let mut x = vec![0.0; n * n];
        for i in 0..n {
            x[i * n + i] = self.real[i];
            let e = self.imag[i];
            if e > 0.0 {
                x[i * n + i + 1] = e;
            } else if e < 0.0 {
                x[i * n + i - 1] = e;
            }
        }
        Matrix::from_parts(n, n, x)
    }

    /// Real eigenvalues, largest first.
    pub fn real_eigenvalues_descending(&self) -> Vec<f64> {
        self.real.iter().rev().copied().collect()
    }

    /// Eigenvector matrix with its columns in reverse order, matching
    /// [`EigenDecomposition::real_eigenvalues_descending`].
    pub fn eigenvectors_descending(&self) -> Matrix {
        let n = self.n;
        let mut out = vec![0.0; n * n];
        for i in 0..n {
            for j in 0..n {
                out[i * n + (n - 1 - j)] = self.vectors[i * n + j];
            }
        }
        Matrix::from_parts(n, n, out)
    }

    /// Real parts of the (possibly complex) eigenvectors.
    ///
    /// For a conjugate pair in columns `j, j + 1` of `V` the eigenvector is
    /// `V[:, j] +- i V[:, j + 1]`, so both columns share the real part.
    pub fn real_eigenvectors(&self) -> Matrix {
        self.split_complex().0
    }

    /// Imaginary parts of the (possibly complex) eigenvectors.
    pub fn imag_eigenvectors(&self) -> Matrix {
        self.split_complex().1
    }

    fn split_complex(&self) -> (Matrix, Matrix) {
        let n = self.n;
        let mut re = self.vectors.clone();
        let mut im = vec![0.0; n * n];
        if !self.symmetric {
            let mut j = 0;
            while j < n {
                if self.imag[j] != 0.0 && j + 1 < n {
                    for i in 0..n {
                        let next = self.vectors[i * n + j + 1];
                        im[i * n + j] = next;
                        im[i * n + j + 1] = -next;
                        re[i * n + j + 1] = self.vectors[i * n + j];
                    }
                    j += 1;
                }
                j += 1;
            }
        }
        (Matrix::from_parts(n, n, re), Matrix::from_parts(n, n, im))
    }
}

/// Square with every element finite; returns the order.
pub(super) fn check_input(a: &Matrix) -> Result<usize> {
    if !a.is_square() {
        return Err(LinalgError::NotSquare {
            rows: a.height(),
            cols: a.width(),
        });
    }
    if a.as_slice().iter().any(|x| !x.is_finite()) {
        return Err(LinalgError::InvalidArgument {
            reason: "eigen decomposition of a matrix with non-finite elements",
        });
    }
    Ok(a.height())
}
