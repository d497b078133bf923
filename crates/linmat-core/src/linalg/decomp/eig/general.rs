//! General (non-symmetric) eigensolver: orthogonal reduction to upper
//! Hessenberg form (orthes) followed by the double-shift QR algorithm to
//! real Schur form with eigenvector back-substitution (hqr2), after EISPACK.

use crate::error::{LinalgError, Result};
use crate::matrix::Matrix;

use super::{EPS, EigenDecomposition, EigenSolver, check_input};

/// Eigensolver for arbitrary real square matrices.
///
/// Complex conjugate pairs `a +- bi` are reported in consecutive slots
/// with imaginary parts `+b, -b`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeneralSolver;

impl GeneralSolver {
    /// Total QR sweeps allowed for an `n x n` input.
    pub fn iteration_limit(n: usize) -> usize {
        30 * n.max(10)
    }
}

impl EigenSolver for GeneralSolver {
    fn solve(&self, a: &Matrix) -> Result<EigenDecomposition> {
        let n = check_input(a)?;
        let mut h = a.as_slice().to_vec();
        let mut v = vec![0.0; n * n];
        let mut d = vec![0.0; n];
        let mut e = vec![0.0; n];

        if n > 0 {
            orthes(&mut h, &mut v, n);
            hqr2(&mut h, &mut v, &mut d, &mut e, n, Self::iteration_limit(n))?;
        }
        log::trace!("general eigen solve finished for {n}x{n} input");

        Ok(EigenDecomposition::from_parts(d, e, v, n, false))
    }
}

/// Reduce `h` to upper Hessenberg form, accumulating the orthogonal
/// similarity transformation into `v`.
fn orthes(h: &mut [f64], v: &mut [f64], n: usize) {
    let high = n - 1;
    let mut ort = vec![0.0; n];

    for m in 1..high {
        // Scale column.
        let scale: f64 = (m..=high).map(|i| h[i * n + m - 1].abs()).sum();
        if scale == 0.0 {
            continue;
        }

        // Compute the Householder transformation.
        let mut hh = 0.0;
        for i in (m..=high).rev() {
            ort[i] = h[i * n + m - 1] / scale;
            hh += ort[i] * ort[i];
        }
        let mut g = hh.sqrt();
        if ort[m] > 0.0 {
            g = -g;
        }
        hh -= ort[m] * g;
        ort[m] -= g;

        // H = (I - u u^T / h) H (I - u u^T / h)
        for j in m..n {
            let mut f = 0.0;
            for i in (m..=high).rev() {
                f += ort[i] * h[i * n + j];
            }
            f /= hh;
            for i in m..=high {
                h[i * n + j] -= f * ort[i];
            }
        }
        for i in 0..=high {
            let mut f = 0.0;
            for j in (m..=high).rev() {
                f += ort[j] * h[i * n + j];
            }
            f /= hh;
            for j in m..=high {
                h[i * n + j] -= f * ort[j];
            }
        }
        ort[m] *= scale;
        h[m * n + m - 1] = scale * g;
    }

    // Accumulate transformations.
    for i in 0..n {
        for j in 0..n {
            v[i * n + j] = if i == j { 1.0 } else { 0.0 };
        }
    }
    for m in (1..high).rev() {
        if h[m * n + m - 1] == 0.0 {
            continue;
        }
        for i in (m + 1)..=high {
            ort[i] = h[i * n + m - 1];
        }
        for j in m..=high {
            let mut g = 0.0;
            for i in m..=high {
                g += ort[i] * v[i * n + j];
            }
            // Double division avoids possible underflow.
            g = (g / ort[m]) / h[m * n + m - 1];
            for i in m..=high {
                v[i * n + j] += g * ort[i];
            }
        }
    }
}

/// Complex scalar division `(xr + i xi) / (yr + i yi)`.
fn cdiv(xr: f64, xi: f64, yr: f64, yi: f64) -> (f64, f64) {
    if yr.abs() > yi.abs() {
        let r = yi / yr;
        let d = yr + r * yi;
        ((xr + r * xi) / d, (xi - r * xr) / d)
    } else {
        let r = yr / yi;
        let d = yi + r * yr;
        ((r * xr + xi) / d, (r * xi - xr) / d)
    }
}

/// Reduce the Hessenberg `h` to real Schur form, storing eigenvalues in
/// `d` (real) and `e` (imaginary) and eigenvectors in `v`. At most `limit`
/// QR sweeps are spent in total.
#[allow(
    clippy::many_single_char_names,
    clippy::too_many_lines,
    clippy::cognitive_complexity
)]
fn hqr2(
    h: &mut [f64],
    v: &mut [f64],
    d: &mut [f64],
    e: &mut [f64],
    nn: usize,
    limit: usize,
) -> Result<()> {
    let at = |i: usize, j: usize| i * nn + j;
    let high = nn - 1;

    let mut exshift = 0.0;
    let mut p: f64;
    let mut q: f64;
    let mut w: f64;
    let mut x: f64;
    let mut y: f64;
    // carried across back-substitution rows
    let (mut r, mut s, mut z) = (0.0_f64, 0.0_f64, 0.0_f64);

    // Matrix norm, for the convergence and overflow tests.
    let mut norm = 0.0;
    for i in 0..nn {
        for j in i.saturating_sub(1)..nn {
            norm += h[at(i, j)].abs();
        }
    }

    // ------------------------------------------------------------------
    // Outer loop over eigenvalue index; `top` is one past the active row.
    // ------------------------------------------------------------------
    let mut top = nn;
    let mut iter = 0;
    let mut total = 0;
    while top > 0 {
        let n = top - 1;

        // Look for a single small sub-diagonal element.
        let mut l = n;
        while l > 0 {
            s = h[at(l - 1, l - 1)].abs() + h[at(l, l)].abs();
            if s == 0.0 {
                s = norm;
            }
            let sub = h[at(l, l - 1)];
            if sub == 0.0 || sub.abs() < EPS * s {
                break;
            }
            l -= 1;
        }

        if l == n {
            // One root found.
            h[at(n, n)] += exshift;
            d[n] = h[at(n, n)];
            e[n] = 0.0;
            top -= 1;
            iter = 0;
        } else if l + 1 == n {
            // Two roots found.
            w = h[at(n, n - 1)] * h[at(n - 1, n)];
            p = (h[at(n - 1, n - 1)] - h[at(n, n)]) / 2.0;
            q = p * p + w;
            z = q.abs().sqrt();
            h[at(n, n)] += exshift;
            h[at(n - 1, n - 1)] += exshift;
            x = h[at(n, n)];

            if q >= 0.0 {
                // Real pair.
                z = if p >= 0.0 { p + z } else { p - z };
                d[n - 1] = x + z;
                d[n] = d[n - 1];
                if z != 0.0 {
                    d[n] = x - w / z;
                }
                e[n - 1] = 0.0;
                e[n] = 0.0;
                x = h[at(n, n - 1)];
                s = x.abs() + z.abs();
                p = x / s;
                q = z / s;
                r = (p * p + q * q).sqrt();
                p /= r;
                q /= r;

                // Row modification.
                for j in (n - 1)..nn {
                    z = h[at(n - 1, j)];
                    h[at(n - 1, j)] = q * z + p * h[at(n, j)];
                    h[at(n, j)] = q * h[at(n, j)] - p * z;
                }
                // Column modification.
                for i in 0..=n {
                    z = h[at(i, n - 1)];
                    h[at(i, n - 1)] = q * z + p * h[at(i, n)];
                    h[at(i, n)] = q * h[at(i, n)] - p * z;
                }
                // Accumulate transformations.
                for i in 0..=high {
                    z = v[at(i, n - 1)];
                    v[at(i, n - 1)] = q * z + p * v[at(i, n)];
                    v[at(i, n)] = q * v[at(i, n)] - p * z;
                }
            } else {
                // Complex pair.
                d[n - 1] = x + p;
                d[n] = x + p;
                e[n - 1] = z;
                e[n] = -z;
            }
            top -= 2;
            iter = 0;
        } else {
            // No convergence yet. Form the shift.
            x = h[at(n, n)];
            y = h[at(n - 1, n - 1)];
            w = h[at(n, n - 1)] * h[at(n - 1, n)];

            // Wilkinson's original ad hoc shift.
            if iter == 10 {
                exshift += x;
                for i in 0..=n {
                    h[at(i, i)] -= x;
                }
                s = h[at(n, n - 1)].abs() + h[at(n - 1, n - 2)].abs();
                x = 0.75 * s;
                y = x;
                w = -0.4375 * s * s;
            }

            // MATLAB's ad hoc shift.
            if iter == 30 {
                s = (y - x) / 2.0;
                s = s * s + w;
                if s > 0.0 {
                    s = s.sqrt();
                    if y < x {
                        s = -s;
                    }
                    s = x - w / ((y - x) / 2.0 + s);
                    for i in 0..=n {
                        h[at(i, i)] -= s;
                    }
                    exshift += s;
                    x = 0.964;
                    y = x;
                    w = x;
                }
            }

            iter += 1;
            total += 1;
            if total > limit {
                log::warn!("hqr2: no convergence after {limit} iterations");
                return Err(LinalgError::NonConvergence {
                    algorithm: "hqr2",
                    iterations: limit,
                });
            }

            // Look for two consecutive small sub-diagonal elements.
            let mut m = n - 2;
            loop {
                z = h[at(m, m)];
                r = x - z;
                s = y - z;
                p = (r * s - w) / h[at(m + 1, m)] + h[at(m, m + 1)];
                q = h[at(m + 1, m + 1)] - z - r - s;
                r = h[at(m + 2, m + 1)];
                s = p.abs() + q.abs() + r.abs();
                p /= s;
                q /= s;
                r /= s;
                if m == l {
                    break;
                }
                let lhs = h[at(m, m - 1)].abs() * (q.abs() + r.abs());
                let rhs = EPS
                    * (p.abs()
                        * (h[at(m - 1, m - 1)].abs() + z.abs() + h[at(m + 1, m + 1)].abs()));
                if lhs < rhs {
                    break;
                }
                m -= 1;
            }

            for i in (m + 2)..=n {
                h[at(i, i - 2)] = 0.0;
                if i > m + 2 {
                    h[at(i, i - 3)] = 0.0;
                }
            }

            // Double QR step involving rows l..=n and columns m..=n.
            for k in m..n {
                let notlast = k != n - 1;
                if k != m {
                    p = h[at(k, k - 1)];
                    q = h[at(k + 1, k - 1)];
                    r = if notlast { h[at(k + 2, k - 1)] } else { 0.0 };
                    x = p.abs() + q.abs() + r.abs();
                    if x != 0.0 {
                        p /= x;
                        q /= x;
                        r /= x;
                    }
                }
                if x == 0.0 {
                    break;
                }
                s = (p * p + q * q + r * r).sqrt();
                if p < 0.0 {
                    s = -s;
                }
                if s == 0.0 {
                    continue;
                }
                if k != m {
                    h[at(k, k - 1)] = -s * x;
                } else if l != m {
                    h[at(k, k - 1)] = -h[at(k, k - 1)];
                }
                p += s;
                x = p / s;
                y = q / s;
                z = r / s;
                q /= p;
                r /= p;

                // Row modification.
                for j in k..nn {
                    p = h[at(k, j)] + q * h[at(k + 1, j)];
                    if notlast {
                        p += r * h[at(k + 2, j)];
                        h[at(k + 2, j)] -= p * z;
                    }
                    h[at(k, j)] -= p * x;
                    h[at(k + 1, j)] -= p * y;
                }
                // Column modification.
                for i in 0..=n.min(k + 3) {
                    p = x * h[at(i, k)] + y * h[at(i, k + 1)];
                    if notlast {
                        p += z * h[at(i, k + 2)];
                        h[at(i, k + 2)] -= p * r;
                    }
                    h[at(i, k)] -= p;
                    h[at(i, k + 1)] -= p * q;
                }
                // Accumulate transformations.
                for i in 0..=high {
                    p = x * v[at(i, k)] + y * v[at(i, k + 1)];
                    if notlast {
                        p += z * v[at(i, k + 2)];
                        v[at(i, k + 2)] -= p * r;
                    }
                    v[at(i, k)] -= p;
                    v[at(i, k + 1)] -= p * q;
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Back-substitute to find the vectors of the upper triangular form.
    // ------------------------------------------------------------------
    if norm == 0.0 {
        return Ok(());
    }

    for n in (0..nn).rev() {
        p = d[n];
        q = e[n];

        if q == 0.0 {
            // Real vector.
            let mut l = n;
            h[at(n, n)] = 1.0;
            for i in (0..n).rev() {
                w = h[at(i, i)] - p;
                r = 0.0;
                for j in l..=n {
                    r += h[at(i, j)] * h[at(j, n)];
                }
                if e[i] < 0.0 {
                    z = w;
                    s = r;
                    continue;
                }
                l = i;
                if e[i] == 0.0 {
                    h[at(i, n)] = if w != 0.0 { -r / w } else { -r / (EPS * norm) };
                } else {
                    // Solve real equations.
                    x = h[at(i, i + 1)];
                    y = h[at(i + 1, i)];
                    q = (d[i] - p) * (d[i] - p) + e[i] * e[i];
                    let t = (x * s - z * r) / q;
                    h[at(i, n)] = t;
                    h[at(i + 1, n)] = if x.abs() > z.abs() {
                        (-r - w * t) / x
                    } else {
                        (-s - y * t) / z
                    };
                }

                // Overflow control.
                let t = h[at(i, n)].abs();
                if (EPS * t) * t > 1.0 {
                    for j in i..=n {
                        h[at(j, n)] /= t;
                    }
                }
            }
        } else if q < 0.0 {
            // Complex vector; the last component is imaginary so the
            // matrix is triangular.
            let mut l = n - 1;
            if h[at(n, n - 1)].abs() > h[at(n - 1, n)].abs() {
                h[at(n - 1, n - 1)] = q / h[at(n, n - 1)];
                h[at(n - 1, n)] = -(h[at(n, n)] - p) / h[at(n, n - 1)];
            } else {
                let (cr, ci) = cdiv(0.0, -h[at(n - 1, n)], h[at(n - 1, n - 1)] - p, q);
                h[at(n - 1, n - 1)] = cr;
                h[at(n - 1, n)] = ci;
            }
            h[at(n, n - 1)] = 0.0;
            h[at(n, n)] = 1.0;

            for i in (0..n - 1).rev() {
                let mut ra = 0.0;
                let mut sa = 0.0;
                for j in l..=n {
                    ra += h[at(i, j)] * h[at(j, n - 1)];
                    sa += h[at(i, j)] * h[at(j, n)];
                }
                w = h[at(i, i)] - p;

                if e[i] < 0.0 {
                    z = w;
                    r = ra;
                    s = sa;
                    continue;
                }
                l = i;
                if e[i] == 0.0 {
                    let (cr, ci) = cdiv(-ra, -sa, w, q);
                    h[at(i, n - 1)] = cr;
                    h[at(i, n)] = ci;
                } else {
                    // Solve complex equations.
                    x = h[at(i, i + 1)];
                    y = h[at(i + 1, i)];
                    let mut vr = (d[i] - p) * (d[i] - p) + e[i] * e[i] - q * q;
                    let vi = (d[i] - p) * 2.0 * q;
                    if vr == 0.0 && vi == 0.0 {
                        vr = EPS * norm * (w.abs() + q.abs() + x.abs() + y.abs() + z.abs());
                    }
                    let (cr, ci) = cdiv(
                        x * r - z * ra + q * sa,
                        x * s - z * sa - q * ra,
                        vr,
                        vi,
                    );
                    h[at(i, n - 1)] = cr;
                    h[at(i, n)] = ci;
                    if x.abs() > z.abs() + q.abs() {
                        h[at(i + 1, n - 1)] = (-ra - w * h[at(i, n - 1)] + q * h[at(i, n)]) / x;
                        h[at(i + 1, n)] = (-sa - w * h[at(i, n)] - q * h[at(i, n - 1)]) / x;
                    } else {
                        let (cr, ci) = cdiv(-r - y * h[at(i, n - 1)], -s - y * h[at(i, n)], z, q);
                        h[at(i + 1, n - 1)] = cr;
                        h[at(i + 1, n)] = ci;
                    }
                }

                // Overflow control.
                let t = h[at(i, n - 1)].abs().max(h[at(i, n)].abs());
                if (EPS * t) * t > 1.0 {
                    for j in i..=n {
                        h[at(j, n - 1)] /= t;
                        h[at(j, n)] /= t;
                    }
                }
            }
        }
    }

    // Back transformation to the eigenvectors of the original matrix.
    for j in (0..nn).rev() {
        for i in 0..nn {
            z = 0.0;
            for k in 0..=j {
                z += v[at(i, k)] * h[at(k, j)];
            }
            v[at(i, j)] = z;
        }
    }
    Ok(())
}
