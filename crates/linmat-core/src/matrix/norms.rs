//! Norms and per-row / per-column summary statistics.
//!
//! | Method             | Definition                         |
//! |--------------------|------------------------------------|
//! | `norm1`            | max over columns of `sum_i |a_ij|`  |
//! | `infinity_norm`    | max over rows of `sum_j |a_ij|`     |
//! | `norm2`            | `sqrt(sum a_ij^2)`                  |
//! | `frobenius_norm`   | same value, overflow-safe           |
//! | `sum_of_squares`   | `sum a_ij^2`                        |

use crate::error::{LinalgError, Result};
use crate::math::hypot;

use super::Matrix;

impl Matrix {
    // ------------------------------------------------------------------
    // Norms
    // ------------------------------------------------------------------

    /// Maximum absolute column sum.
    pub fn norm1(&self) -> f64 {
        (0..self.width)
            .map(|j| {
                (0..self.height)
                    .map(|i| self.data[i * self.width + j].abs())
                    .sum::<f64>()
            })
            .fold(0.0, f64::max)
    }

    /// Maximum absolute row sum.
    pub fn infinity_norm(&self) -> f64 {
        if self.width == 0 {
            return 0.0;
        }
        self.data
            .chunks(self.width)
            .map(|row| row.iter().map(|x| x.abs()).sum::<f64>())
            .fold(0.0, f64::max)
    }

    /// Square root of the sum of squares.
    pub fn norm2(&self) -> f64 {
        self.sum_of_squares().sqrt()
    }

    /// Frobenius norm accumulated through [`hypot`] so large entries do not
    /// overflow the intermediate sum.
    pub fn frobenius_norm(&self) -> f64 {
        self.data.iter().fold(0.0, |acc, &x| hypot(acc, x))
    }

    pub fn sum_of_squares(&self) -> f64 {
        self.data.iter().map(|x| x * x).sum()
    }

    // ------------------------------------------------------------------
    // Row / column statistics
    // ------------------------------------------------------------------

    pub fn row_sum(&self, i: usize) -> Result<f64> {
        Ok(self.row(i)?.sum())
    }

    pub fn col_sum(&self, j: usize) -> Result<f64> {
        Ok(self.column(j)?.sum())
    }

    pub fn row_avg(&self, i: usize) -> Result<f64> {
        Ok(self.row_sum(i)? / self.width as f64)
    }

    pub fn col_avg(&self, j: usize) -> Result<f64> {
        Ok(self.col_sum(j)? / self.height as f64)
    }

    /// Sample standard deviation (divisor `n - 1`) of row `i`.
    pub fn row_stdev(&self, i: usize) -> Result<f64> {
        Ok(sample_stdev(self.row(i)?.as_slice()))
    }

    /// Sample standard deviation (divisor `n - 1`) of column `j`.
    pub fn col_stdev(&self, j: usize) -> Result<f64> {
        Ok(sample_stdev(self.column(j)?.as_slice()))
    }

    /// Column-wise centred and scaled copy: `(x - mean) / stdev`.
    ///
    /// Columns with zero standard deviation become all zeros. Needs at
    /// least two rows.
    #[allow(clippy::float_cmp)]
    pub fn normalised_centred(&self) -> Result<Matrix> {
        if self.height < 2 {
            return Err(LinalgError::InvalidArgument {
                reason: "normalising columns needs at least two rows",
            });
        }
        let mut out = Matrix::new(self.height, self.width);
        for j in 0..self.width {
            let mean = self.col_avg(j)?;
            let stdev = self.col_stdev(j)?;
            if stdev == 0.0 {
                continue;
            }
            for i in 0..self.height {
                out.data[i * self.width + j] = (self.data[i * self.width + j] - mean) / stdev;
            }
        }
        Ok(out)
    }
}

/// Two-pass sample standard deviation; exactly zero for a constant slice.
#[allow(clippy::float_cmp)]
fn sample_stdev(values: &[f64]) -> f64 {
    let [first, rest @ ..] = values else {
        return f64::NAN;
    };
    if rest.is_empty() {
        return f64::NAN;
    }
    if rest.iter().all(|&x| x == *first) {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let ss: f64 = values.iter().map(|&x| (x - mean) * (x - mean)).sum();
    (ss / (n - 1.0)).sqrt()
}
