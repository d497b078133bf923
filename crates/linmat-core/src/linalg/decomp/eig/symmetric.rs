//! Symmetric eigensolver: Householder tridiagonalisation (tred2) followed
//! by the implicit-shift QL algorithm (tql2), after EISPACK.

use crate::error::{LinalgError, Result};
use crate::math::hypot;
use crate::matrix::Matrix;

use super::{EPS, EigenDecomposition, EigenSolver, check_input};

/// Maximum number of QL sweeps spent on any single eigenvalue.
pub const MAX_QL_ITERATIONS: usize = 30;

/// Eigensolver for real symmetric matrices.
///
/// Eigenvalues come out ascending with the eigenvector columns reordered
/// to match; all imaginary parts are zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymmetricSolver;

impl EigenSolver for SymmetricSolver {
    fn solve(&self, a: &Matrix) -> Result<EigenDecomposition> {
        let n = check_input(a)?;
        let mut v = a.as_slice().to_vec();
        let mut d = vec![0.0; n];
        let mut e = vec![0.0; n];

        if n > 0 {
            tred2(&mut v, &mut d, &mut e, n);
            tql2(&mut v, &mut d, &mut e, n, MAX_QL_ITERATIONS)?;
        }
        log::trace!("symmetric eigen solve finished for {n}x{n} input");

        Ok(EigenDecomposition::from_parts(d, vec![0.0; n], v, n, true))
    }
}

/// Reduce the symmetric `v` to tridiagonal form, leaving the diagonal in
/// `d`, the sub-diagonal in `e[1..]` and the accumulated orthogonal
/// transformation in `v`.
#[allow(clippy::many_single_char_names)]
fn tred2(v: &mut [f64], d: &mut [f64], e: &mut [f64], n: usize) {
    for j in 0..n {
        d[j] = v[(n - 1) * n + j];
    }

    for i in (1..n).rev() {
        // Scale to avoid under/overflow.
        let scale: f64 = d[..i].iter().map(|x| x.abs()).sum();
        let mut h = 0.0;

        if scale == 0.0 {
            e[i] = d[i - 1];
            for j in 0..i {
                d[j] = v[(i - 1) * n + j];
                v[i * n + j] = 0.0;
                v[j * n + i] = 0.0;
            }
        } else {
            // Generate the Householder vector.
            for k in 0..i {
                d[k] /= scale;
                h += d[k] * d[k];
            }
            let mut f = d[i - 1];
            let mut g = h.sqrt();
            if f > 0.0 {
                g = -g;
            }
            e[i] = scale * g;
            h -= f * g;
            d[i - 1] = f - g;
            for x in &mut e[..i] {
                *x = 0.0;
            }

            // Apply the similarity transformation to the remaining columns.
            for j in 0..i {
                f = d[j];
                v[j * n + i] = f;
                g = e[j] + v[j * n + j] * f;
                for k in (j + 1)..i {
                    g += v[k * n + j] * d[k];
                    e[k] += v[k * n + j] * f;
                }
                e[j] = g;
            }
            f = 0.0;
            for j in 0..i {
                e[j] /= h;
                f += e[j] * d[j];
            }
            let hh = f / (h + h);
            for j in 0..i {
                e[j] -= hh * d[j];
            }
            for j in 0..i {
                f = d[j];
                g = e[j];
                for k in j..i {
                    v[k * n + j] -= f * e[k] + g * d[k];
                }
                d[j] = v[(i - 1) * n + j];
                v[i * n + j] = 0.0;
            }
        }
        d[i] = h;
    }

    // Accumulate transformations.
    for i in 0..n - 1 {
        v[(n - 1) * n + i] = v[i * n + i];
        v[i * n + i] = 1.0;
        let h = d[i + 1];
        if h != 0.0 {
            for k in 0..=i {
                d[k] = v[k * n + i + 1] / h;
            }
            for j in 0..=i {
                let mut g = 0.0;
                for k in 0..=i {
                    g += v[k * n + i + 1] * v[k * n + j];
                }
                for k in 0..=i {
                    v[k * n + j] -= g * d[k];
                }
            }
        }
        for k in 0..=i {
            v[k * n + i + 1] = 0.0;
        }
    }
    for j in 0..n {
        d[j] = v[(n - 1) * n + j];
        v[(n - 1) * n + j] = 0.0;
    }
    v[(n - 1) * n + n - 1] = 1.0;
    e[0] = 0.0;
}

/// Diagonalise the tridiagonal form produced by [`tred2`], then sort the
/// eigenvalues ascending. Each eigenvalue gets at most `max_iter` sweeps.
#[allow(clippy::many_single_char_names)]
fn tql2(v: &mut [f64], d: &mut [f64], e: &mut [f64], n: usize, max_iter: usize) -> Result<()> {
    for i in 1..n {
        e[i - 1] = e[i];
    }
    e[n - 1] = 0.0;

    let mut f = 0.0;
    let mut tst1: f64 = 0.0;

    for l in 0..n {
        // Find a small sub-diagonal element.
        tst1 = tst1.max(d[l].abs() + e[l].abs());
        let mut m = l;
        while m + 1 < n && e[m].abs() > EPS * tst1 {
            m += 1;
        }

        // If m == l, d[l] is already an eigenvalue.
        if m > l {
            let mut iter = 0;
            loop {
                iter += 1;
                if iter > max_iter {
                    log::warn!("tql2: eigenvalue {l} did not converge");
                    return Err(LinalgError::NonConvergence {
                        algorithm: "tql2",
                        iterations: max_iter,
                    });
                }

                // Implicit shift.
                let mut g = d[l];
                let mut p = (d[l + 1] - g) / (2.0 * e[l]);
                let mut r = hypot(p, 1.0);
                if p < 0.0 {
                    r = -r;
                }
                d[l] = e[l] / (p + r);
                d[l + 1] = e[l] * (p + r);
                let dl1 = d[l + 1];
                let mut h = g - d[l];
                for x in &mut d[l + 2..n] {
                    *x -= h;
                }
                f += h;

                // Implicit QL transformation.
                p = d[m];
                let mut c = 1.0;
                let mut c2 = c;
                let mut c3 = c;
                let el1 = e[l + 1];
                let mut s = 0.0;
                let mut s2 = 0.0;
                for i in (l..m).rev() {
                    c3 = c2;
                    c2 = c;
                    s2 = s;
                    g = c * e[i];
                    h = c * p;
                    r = hypot(p, e[i]);
                    e[i + 1] = s * r;
                    s = e[i] / r;
                    c = p / r;
                    p = c * d[i] - s * g;
                    d[i + 1] = h + s * (c * g + s * d[i]);

                    // Accumulate the rotation.
                    for k in 0..n {
                        h = v[k * n + i + 1];
                        v[k * n + i + 1] = s * v[k * n + i] + c * h;
                        v[k * n + i] = c * v[k * n + i] - s * h;
                    }
                }
                p = -s * s2 * c3 * el1 * e[l] / dl1;
                e[l] = s * p;
                d[l] = c * p;

                if e[l].abs() <= EPS * tst1 || e[l].is_nan() {
                    break;
                }
            }
        }
        d[l] += f;
        e[l] = 0.0;
    }

    // Selection sort, ascending, carrying the vector columns along.
    for i in 0..n - 1 {
        let mut k = i;
        let mut p = d[i];
        for j in (i + 1)..n {
            if d[j] < p {
                k = j;
                p = d[j];
            }
        }
        if k != i {
            d[k] = d[i];
            d[i] = p;
            for j in 0..n {
                v.swap(j * n + i, j * n + k);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn approx_eq(a: &[f64], b: &[f64], tol: f64) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| (x - y).abs() < tol)
    }

    #[test]
    fn test_identity() {
        let eig = SymmetricSolver.solve(&Matrix::identity(3)).unwrap();
        assert_eq!(eig.real_eigenvalues(), &[1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_2x2() {
        // >>> np.linalg.eigh([[2, 1], [1, 2]])[0]
        // array([1., 3.])
        let a = Matrix::from_array(&[[2.0, 1.0], [1.0, 2.0]]);
        let eig = SymmetricSolver.solve(&a).unwrap();
        assert!(approx_eq(eig.real_eigenvalues(), &[1.0, 3.0], 1e-12));
    }

    #[test]
    fn test_negative_eigenvalue() {
        // >>> np.linalg.eigh([[1, 2], [2, 1]])[0]
        // array([-1.,  3.])
        let a = Matrix::from_array(&[[1.0, 2.0], [2.0, 1.0]]);
        let eig = SymmetricSolver.solve(&a).unwrap();
        assert!(approx_eq(eig.real_eigenvalues(), &[-1.0, 3.0], 1e-12));
    }

    #[test]
    fn test_reconstruction_4x4() {
        let a = Matrix::from_array(&[
            [4.0, 1.0, -2.0, 2.0],
            [1.0, 2.0, 0.0, 1.0],
            [-2.0, 0.0, 3.0, -2.0],
            [2.0, 1.0, -2.0, -1.0],
        ]);
        let eig = SymmetricSolver.solve(&a).unwrap();
        let d = eig.real_eigenvalues();
        assert!(d.windows(2).all(|p| p[0] <= p[1]));
        // trace is preserved
        assert!((d.iter().sum::<f64>() - 8.0).abs() < 1e-10);

        // A = V D V^T
        let v = eig.eigenvectors();
        let vd = v.matmul(&eig.d()).unwrap();
        let back = vd.matmul(&v.transpose()).unwrap();
        assert!(approx_eq(back.as_slice(), a.as_slice(), 1e-10));

        // V^T V = I
        let vtv = v.transpose().matmul(&v).unwrap();
        assert!(approx_eq(vtv.as_slice(), Matrix::identity(4).as_slice(), 1e-10));
    }

    #[test]
    fn test_diagonalises() {
        let a = Matrix::from_array(&[[6.0, 2.0, 1.0], [2.0, 3.0, 1.0], [1.0, 1.0, 1.0]]);
        let eig = SymmetricSolver.solve(&a).unwrap();
        let v = eig.eigenvectors();
        let vtav = v.transpose().matmul(&a).unwrap().matmul(&v).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                if i != j {
                    assert!(vtav[(i, j)].abs() < 1e-10);
                }
            }
        }
        assert!(eig.imag_eigenvalues().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_sweep_limit_exhausted() {
        let a = Matrix::from_array(&[[2.0, 1.0], [1.0, 2.0]]);
        let n = 2;
        let mut v = a.as_slice().to_vec();
        let mut d = vec![0.0; n];
        let mut e = vec![0.0; n];
        tred2(&mut v, &mut d, &mut e, n);
        let err = tql2(&mut v, &mut d, &mut e, n, 0).unwrap_err();
        assert_eq!(
            err,
            LinalgError::NonConvergence {
                algorithm: "tql2",
                iterations: 0
            }
        );
    }

    #[test]
    fn test_non_finite_input_never_solves() {
        let a = Matrix::from_array(&[[1.0, f64::NAN], [f64::NAN, 3.0]]);
        assert!(SymmetricSolver.solve(&a).is_err());
        let b = Matrix::from_array(&[[f64::INFINITY, 1.0], [1.0, 3.0]]);
        assert!(SymmetricSolver.solve(&b).is_err());
    }
}
