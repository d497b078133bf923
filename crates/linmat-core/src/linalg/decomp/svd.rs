//! Singular Value Decomposition (SVD).
//!
//! Decomposes a matrix `A` (m x n) into `A = U S V^T` where, with
//! `k = min(m, n)`:
//! - `U` is m x k with orthonormal columns
//! - `S` is k x k diagonal with non-negative entries in descending order
//! - `V` is n x k with orthonormal columns
//!
//! Implementation is Golub-Kahan-Reinsch: Householder reduction to
//! bidiagonal form followed by implicit-shift QR sweeps on the bidiagonal.

use crate::error::{LinalgError, Result};
use crate::math::{copysign, hypot};
use crate::matrix::Matrix;

/// Maximum number of QR sweeps spent on any single singular value.
pub const MAX_SVD_ITERATIONS: usize = 30;

/// Result of a Singular Value Decomposition.
#[derive(Debug, Clone)]
pub struct SvdDecomposition {
    /// Left singular vectors (m x k).
    u: Vec<f64>,
    /// Singular values in descending order (length k).
    s: Vec<f64>,
    /// Right singular vectors (n x k).
    v: Vec<f64>,
    m: usize,
    n: usize,
}

#[allow(clippy::many_single_char_names)]
impl SvdDecomposition {
    /// Compute the SVD of a matrix `A` (m x n).
    ///
    /// ```
    /// # use linmat_core::Matrix;
    /// # use linmat_core::linalg::decomp::SvdDecomposition;
    /// let a = Matrix::from_array(&[[3.0, 0.0], [0.0, 4.0]]);
    /// let svd = SvdDecomposition::decompose(&a).unwrap();
    /// let s = svd.singular_values();
    /// // Singular values of diag(3,4) are 4 and 3
    /// assert!((s[0] - 4.0).abs() < 1e-10);
    /// assert!((s[1] - 3.0).abs() < 1e-10);
    /// ```
    pub fn decompose(a: &Matrix) -> Result<Self> {
        let (m, n) = a.shape();
        if m >= n {
            let (u, s, v) = golub_reinsch(a.as_slice().to_vec(), m, n)?;
            Ok(Self { u, s, v, m, n })
        } else {
            // Wide input: A^T = U' S V'^T, hence A = V' S U'^T.
            let at = a.transpose();
            let (u, s, v) = golub_reinsch(at.into_vec(), n, m)?;
            Ok(Self {
                u: v,
                s,
                v: u,
                m,
                n,
            })
        }
    }

    /// Singular values in descending order.
    pub fn singular_values(&self) -> &[f64] {
        &self.s
    }

    /// Left singular vectors as an m x k matrix.
    pub fn u(&self) -> Matrix {
        Matrix::from_parts(self.m, self.s.len(), self.u.clone())
    }

    /// Right singular vectors as an n x k matrix.
    pub fn v(&self) -> Matrix {
        Matrix::from_parts(self.n, self.s.len(), self.v.clone())
    }

    /// The singular values on the diagonal of a k x k matrix.
    pub fn s(&self) -> Matrix {
        Matrix::diagonalise(&self.s)
    }

    /// Numerical rank: the number of singular values above
    /// `max(m, n) * s_max * EPSILON`.
    pub fn rank(&self) -> usize {
        let Some(&smax) = self.s.first() else {
            return 0;
        };
        let tol = self.m.max(self.n) as f64 * smax * f64::EPSILON;
        self.s.iter().filter(|&&x| x > tol).count()
    }

    /// Two-norm condition number, `s_max / s_min`.
    pub fn condition_number(&self) -> f64 {
        match (self.s.first(), self.s.last()) {
            (Some(&hi), Some(&lo)) => hi / lo,
            _ => f64::NAN,
        }
    }

    /// Largest singular value (the operator two-norm).
    pub fn norm2(&self) -> f64 {
        self.s.first().copied().unwrap_or(0.0)
    }
}

/// Decompose a tall (m >= n) row-major matrix, returning `(U, w, V)` with
/// `U` m x n, `V` n x n and `w` sorted descending.
#[allow(clippy::many_single_char_names, clippy::too_many_lines)]
fn golub_reinsch(mut a: Vec<f64>, m: usize, n: usize) -> Result<(Vec<f64>, Vec<f64>, Vec<f64>)> {
    let mut w = vec![0.0; n];
    let mut v = vec![0.0; n * n];
    let mut rv1 = vec![0.0; n];

    let (mut g, mut scale, mut anorm) = (0.0_f64, 0.0_f64, 0.0_f64);
    let mut l = 0;

    // ------------------------------------------------------------------
    // Householder reduction to bidiagonal form
    // ------------------------------------------------------------------
    for i in 0..n {
        l = i + 1;
        rv1[i] = scale * g;
        g = 0.0;
        scale = 0.0;
        let mut s = 0.0;

        if i < m {
            for k in i..m {
                scale += a[k * n + i].abs();
            }
            if scale != 0.0 {
                for k in i..m {
                    a[k * n + i] /= scale;
                    s += a[k * n + i] * a[k * n + i];
                }
                let f = a[i * n + i];
                g = -copysign(s.sqrt(), f);
                let h = f * g - s;
                a[i * n + i] = f - g;
                for j in l..n {
                    let mut s = 0.0;
                    for k in i..m {
                        s += a[k * n + i] * a[k * n + j];
                    }
                    let f = s / h;
                    for k in i..m {
                        a[k * n + j] += f * a[k * n + i];
                    }
                }
                for k in i..m {
                    a[k * n + i] *= scale;
                }
            }
        }
        w[i] = scale * g;

        g = 0.0;
        scale = 0.0;
        s = 0.0;
        if i < m && i + 1 != n {
            for k in l..n {
                scale += a[i * n + k].abs();
            }
            if scale != 0.0 {
                for k in l..n {
                    a[i * n + k] /= scale;
                    s += a[i * n + k] * a[i * n + k];
                }
                let f = a[i * n + l];
                g = -copysign(s.sqrt(), f);
                let h = f * g - s;
                a[i * n + l] = f - g;
                for k in l..n {
                    rv1[k] = a[i * n + k] / h;
                }
                for j in l..m {
                    let mut s = 0.0;
                    for k in l..n {
                        s += a[j * n + k] * a[i * n + k];
                    }
                    for k in l..n {
                        a[j * n + k] += s * rv1[k];
                    }
                }
                for k in l..n {
                    a[i * n + k] *= scale;
                }
            }
        }
        anorm = anorm.max(w[i].abs() + rv1[i].abs());
    }

    // ------------------------------------------------------------------
    // Accumulation of right-hand transformations
    // ------------------------------------------------------------------
    for i in (0..n).rev() {
        if i + 1 < n {
            if g != 0.0 {
                // Double division avoids possible underflow.
                for j in l..n {
                    v[j * n + i] = (a[i * n + j] / a[i * n + l]) / g;
                }
                for j in l..n {
                    let mut s = 0.0;
                    for k in l..n {
                        s += a[i * n + k] * v[k * n + j];
                    }
                    for k in l..n {
                        v[k * n + j] += s * v[k * n + i];
                    }
                }
            }
            for j in l..n {
                v[i * n + j] = 0.0;
                v[j * n + i] = 0.0;
            }
        }
        v[i * n + i] = 1.0;
        g = rv1[i];
        l = i;
    }

    // ------------------------------------------------------------------
    // Accumulation of left-hand transformations
    // ------------------------------------------------------------------
    for i in (0..m.min(n)).rev() {
        let l = i + 1;
        let mut g = w[i];
        for j in l..n {
            a[i * n + j] = 0.0;
        }
        if g != 0.0 {
            g = 1.0 / g;
            for j in l..n {
                let mut s = 0.0;
                for k in l..m {
                    s += a[k * n + i] * a[k * n + j];
                }
                let f = (s / a[i * n + i]) * g;
                for k in i..m {
                    a[k * n + j] += f * a[k * n + i];
                }
            }
            for j in i..m {
                a[j * n + i] *= g;
            }
        } else {
            for j in i..m {
                a[j * n + i] = 0.0;
            }
        }
        a[i * n + i] += 1.0;
    }

    // ------------------------------------------------------------------
    // Diagonalisation of the bidiagonal form
    // ------------------------------------------------------------------
    let negligible = |x: f64| x.abs() + anorm == anorm;

    for k in (0..n).rev() {
        let mut its = 0;
        loop {
            // Test for splitting. rv1[0] is always zero.
            let mut flag = true;
            let mut l = k;
            loop {
                if l == 0 || negligible(rv1[l]) {
                    flag = false;
                    break;
                }
                if negligible(w[l - 1]) {
                    break;
                }
                l -= 1;
            }

            if flag {
                // Cancellation of rv1[l] when l > 0.
                let nm = l - 1;
                let (mut c, mut s) = (0.0, 1.0);
                for i in l..=k {
                    let f = s * rv1[i];
                    rv1[i] *= c;
                    if negligible(f) {
                        break;
                    }
                    let g = w[i];
                    let h = hypot(f, g);
                    w[i] = h;
                    let h = 1.0 / h;
                    c = g * h;
                    s = -f * h;
                    for j in 0..m {
                        let y = a[j * n + nm];
                        let z = a[j * n + i];
                        a[j * n + nm] = y * c + z * s;
                        a[j * n + i] = z * c - y * s;
                    }
                }
            }

            let z = w[k];
            if l == k {
                // Convergence: make the singular value non-negative.
                if z < 0.0 {
                    w[k] = -z;
                    for j in 0..n {
                        v[j * n + k] = -v[j * n + k];
                    }
                }
                break;
            }

            its += 1;
            if its >= MAX_SVD_ITERATIONS {
                log::warn!("svd: no convergence after {MAX_SVD_ITERATIONS} iterations");
                return Err(LinalgError::NonConvergence {
                    algorithm: "svd",
                    iterations: MAX_SVD_ITERATIONS,
                });
            }

            // Shift from the bottom 2x2 minor.
            let mut x = w[l];
            let nm = k - 1;
            let mut y = w[nm];
            let mut g = rv1[nm];
            let mut h = rv1[k];
            let mut f = ((y - z) * (y + z) + (g - h) * (g + h)) / (2.0 * h * y);
            g = hypot(f, 1.0);
            f = ((x - z) * (x + z) + h * ((y / (f + copysign(g, f))) - h)) / x;

            // Next QR transformation.
            let (mut c, mut s) = (1.0, 1.0);
            for j in l..=nm {
                let i = j + 1;
                g = rv1[i];
                y = w[i];
                h = s * g;
                g *= c;
                let mut z = hypot(f, h);
                rv1[j] = z;
                c = f / z;
                s = h / z;
                f = x * c + g * s;
                g = g * c - x * s;
                h = y * s;
                y *= c;
                for jj in 0..n {
                    let x = v[jj * n + j];
                    let z = v[jj * n + i];
                    v[jj * n + j] = x * c + z * s;
                    v[jj * n + i] = z * c - x * s;
                }
                z = hypot(f, h);
                w[j] = z;
                if z != 0.0 {
                    z = 1.0 / z;
                    c = f * z;
                    s = h * z;
                }
                f = c * g + s * y;
                x = c * y - s * g;
                for jj in 0..m {
                    let y = a[jj * n + j];
                    let z = a[jj * n + i];
                    a[jj * n + j] = y * c + z * s;
                    a[jj * n + i] = z * c - y * s;
                }
            }
            rv1[l] = 0.0;
            rv1[k] = f;
            w[k] = x;
        }
    }

    // ------------------------------------------------------------------
    // Sort descending, permuting the columns of U and V to match
    // ------------------------------------------------------------------
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&p, &q| w[q].total_cmp(&w[p]));

    let mut u_sorted = vec![0.0; m * n];
    let mut v_sorted = vec![0.0; n * n];
    let mut w_sorted = vec![0.0; n];
    for (dst, &src) in order.iter().enumerate() {
        w_sorted[dst] = w[src];
        for r in 0..m {
            u_sorted[r * n + dst] = a[r * n + src];
        }
        for r in 0..n {
            v_sorted[r * n + dst] = v[r * n + src];
        }
    }

    Ok((u_sorted, w_sorted, v_sorted))
}
