//! Scalar helpers and element-wise matrix math.
//!
//! The decompositions rely on [`hypot`] and [`copysign`] for overflow-safe
//! norms and sign transfer; the element-wise functions mirror `NumPy`'s
//! ufuncs (`np.abs`, `np.log`, ...) on [`Matrix`].

use crate::matrix::Matrix;

// ======================================================================
// Scalar helpers
// ======================================================================

/// `sqrt(a^2 + b^2)` without destructive underflow or overflow.
///
/// ```
/// # use linmat_core::math::hypot;
/// assert_eq!(hypot(3.0, 4.0), 5.0);
/// assert_eq!(hypot(1e200, 1e200), 1e200 * 2f64.sqrt());
/// ```
#[inline]
pub fn hypot(a: f64, b: f64) -> f64 {
    if a.abs() > b.abs() {
        let r = b / a;
        a.abs() * (1.0 + r * r).sqrt()
    } else if b != 0.0 {
        let r = a / b;
        b.abs() * (1.0 + r * r).sqrt()
    } else {
        0.0
    }
}

/// `|a|` carrying the sign of `b` (`b >= 0` counts as positive).
#[inline]
pub fn copysign(a: f64, b: f64) -> f64 {
    if b >= 0.0 { a.abs() } else { -a.abs() }
}

// ======================================================================
// Matrix methods
// ======================================================================

impl Matrix {
    /// Apply a function to every element, returning a new matrix.
    pub fn map<F>(&self, f: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        let data = self.as_slice().iter().map(|&x| f(x)).collect();
        Matrix::from_parts(self.height(), self.width(), data)
    }

    /// Element-wise absolute value.
    #[inline]
    pub fn abs(&self) -> Matrix {
        self.map(f64::abs)
    }

    /// Element-wise square root.
    #[inline]
    pub fn sqrt(&self) -> Matrix {
        self.map(f64::sqrt)
    }

    /// Element-wise natural exponential.
    #[inline]
    pub fn exp(&self) -> Matrix {
        self.map(f64::exp)
    }

    /// Element-wise natural logarithm.
    #[inline]
    pub fn ln(&self) -> Matrix {
        self.map(f64::ln)
    }

    /// Replace every element by its natural logarithm.
    pub fn ln_in_place(&mut self) -> &mut Self {
        self.apply(f64::ln);
        self
    }

    /// Replace each column by its first differences.
    ///
    /// Row 0 becomes zero; row `i` becomes `x[i] - x[i - 1]`.
    pub fn change_in_place(&mut self) -> &mut Self {
        let (h, w) = self.shape();
        if h == 0 {
            return self;
        }
        let data = self.as_mut_slice();
        // Walk bottom-up so each difference reads the untouched predecessor.
        for i in (1..h).rev() {
            for j in 0..w {
                data[i * w + j] -= data[(i - 1) * w + j];
            }
        }
        for x in &mut data[..w] {
            *x = 0.0;
        }
        self
    }

    /// Largest absolute element; `-inf` for an empty matrix.
    pub fn max_abs(&self) -> f64 {
        self.as_slice()
            .iter()
            .fold(f64::NEG_INFINITY, |acc, &x| acc.max(x.abs()))
    }
}
