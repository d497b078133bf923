//! Variance-covariance estimators.

use crate::config::CovarianceConfig;
use crate::error::{LinalgError, Result};
use crate::matrix::Matrix;

fn require_rows(m: &Matrix, min: usize, reason: &'static str) -> Result<()> {
    if m.height() < min {
        return Err(LinalgError::InvalidArgument { reason });
    }
    Ok(())
}

/// Exponential weights `decay^(T - t - 1)` for `t = 0..T`, floored at the
/// smallest positive normal `f64` so no observation weighs exactly zero.
///
/// ```
/// # use linmat_core::stats::exponential_weights;
/// let w = exponential_weights(3, 0.5);
/// assert_eq!(w, vec![0.25, 0.5, 1.0]);
/// ```
pub fn exponential_weights(t: usize, decay: f64) -> Vec<f64> {
    let mut w = vec![1.0; t];
    for i in (0..t.saturating_sub(1)).rev() {
        w[i] = w[i + 1] * decay;
    }
    for x in &mut w {
        *x = x.max(f64::MIN_POSITIVE);
    }
    w
}

/// `E_w[x_i x_j] - mu_i mu_j` under the normalised weights `w`.
fn weighted_covariance(m: &Matrix, w: &[f64]) -> Matrix {
    let (t_len, j_len) = m.shape();
    let x = m.as_slice();
    let total: f64 = w.iter().sum();

    let mut mu = vec![0.0; j_len];
    for t in 0..t_len {
        for (j, acc) in mu.iter_mut().enumerate() {
            *acc += w[t] * x[t * j_len + j];
        }
    }
    for acc in &mut mu {
        *acc /= total;
    }

    let mut sigma = vec![0.0; j_len * j_len];
    for i in 0..j_len {
        for j in i..j_len {
            let mut s = 0.0;
            for t in 0..t_len {
                s += w[t] * x[t * j_len + i] * x[t * j_len + j];
            }
            let v = s / total - mu[i] * mu[j];
            sigma[i * j_len + j] = v;
            sigma[j * j_len + i] = v;
        }
    }
    Matrix::from_parts(j_len, j_len, sigma)
}

/// Maximum likelihood covariance `E[x_i x_j] - mu_i mu_j` (divisor `T`).
///
/// ```
/// # use linmat_core::Matrix;
/// # use linmat_core::stats::variance_covariance;
/// let m = Matrix::from_array(&[[1.0, 2.0], [3.0, 4.0], [5.0, 0.0]]);
/// let s = variance_covariance(&m).unwrap();
/// assert!((s[(0, 1)] + 4.0 / 3.0).abs() < 1e-12);
/// ```
pub fn variance_covariance(m: &Matrix) -> Result<Matrix> {
    require_rows(m, 1, "covariance needs at least one observation")?;
    Ok(weighted_covariance(m, &vec![1.0; m.height()]))
}

/// Covariance with linearly increasing weights `t / (T - 1)`; the first
/// row gets no weight and the last row weight 1.
pub fn variance_covariance_time_weighted(m: &Matrix) -> Result<Matrix> {
    require_rows(
        m,
        2,
        "time-weighted covariance needs at least two observations",
    )?;
    let last = (m.height() - 1) as f64;
    let w: Vec<f64> = (0..m.height()).map(|t| t as f64 / last).collect();
    Ok(weighted_covariance(m, &w))
}

/// Exponentially weighted covariance with the default decay of 0.97.
pub fn variance_covariance_ew(m: &Matrix) -> Result<Matrix> {
    variance_covariance_ew_with(m, &CovarianceConfig::default())
}

/// Exponentially weighted covariance using `config.decay`.
pub fn variance_covariance_ew_with(m: &Matrix, config: &CovarianceConfig) -> Result<Matrix> {
    config.validate()?;
    require_rows(m, 1, "covariance needs at least one observation")?;
    Ok(weighted_covariance(
        m,
        &exponential_weights(m.height(), config.decay),
    ))
}

/// Exponentially weighted covariance for weekly series.
pub fn variance_covariance_ew_weekly(m: &Matrix) -> Result<Matrix> {
    variance_covariance_ew_with(m, &CovarianceConfig::weekly())
}

/// Two-decay covariance with the default factors (0.97 short, 0.997 long).
pub fn variance_covariance_two_decay(m: &Matrix) -> Result<Matrix> {
    variance_covariance_two_decay_with(m, &CovarianceConfig::default())
}

/// Zero-mean covariance under the long decay, rescaled so each variance
/// matches the zero-mean second moment under the short decay:
///
/// `S_ij = L_ij * sqrt(s_i s_j / (l_i l_j))`
///
/// where `L` is the long-decay second-moment matrix and `s_i`, `l_i` are
/// the short- and long-decay second moments of column `i`. A column that is
/// identically zero yields NaN in its row and column.
#[allow(clippy::many_single_char_names)]
pub fn variance_covariance_two_decay_with(
    m: &Matrix,
    config: &CovarianceConfig,
) -> Result<Matrix> {
    config.validate()?;
    require_rows(m, 1, "covariance needs at least one observation")?;
    let (t_len, j_len) = m.shape();
    let x = m.as_slice();
    let w_short = exponential_weights(t_len, config.short_decay);
    let w_long = exponential_weights(t_len, config.long_decay);
    let acc_short: f64 = w_short.iter().sum();
    let acc_long: f64 = w_long.iter().sum();

    let second_moment = |w: &[f64], acc: f64, i: usize, j: usize| -> f64 {
        let mut s = 0.0;
        for t in 0..t_len {
            s += w[t] * x[t * j_len + i] * x[t * j_len + j];
        }
        s / acc
    };

    let short: Vec<f64> = (0..j_len)
        .map(|j| second_moment(&w_short, acc_short, j, j))
        .collect();
    let long: Vec<f64> = (0..j_len)
        .map(|j| second_moment(&w_long, acc_long, j, j))
        .collect();

    let mut sigma = vec![0.0; j_len * j_len];
    for i in 0..j_len {
        for j in i..j_len {
            let l = if i == j {
                long[i]
            } else {
                second_moment(&w_long, acc_long, i, j)
            };
            let v = l * (short[i] * short[j] / (long[i] * long[j])).sqrt();
            sigma[i * j_len + j] = v;
            sigma[j * j_len + i] = v;
        }
    }
    Ok(Matrix::from_parts(j_len, j_len, sigma))
}

/// Covariance that skips missing (NaN) observations.
///
/// Means use the non-NaN entries of each column; the second moment of a
/// pair uses only rows where both entries are present. Pairs with no common
/// observation come out NaN.
pub fn variance_covariance_nan(m: &Matrix) -> Result<Matrix> {
    require_rows(m, 1, "covariance needs at least one observation")?;
    let (t_len, j_len) = m.shape();
    let x = m.as_slice();

    let mu: Vec<f64> = (0..j_len)
        .map(|j| {
            let (sum, count) = (0..t_len)
                .map(|t| x[t * j_len + j])
                .filter(|v| !v.is_nan())
                .fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
            sum / count as f64
        })
        .collect();

    let mut sigma = vec![0.0; j_len * j_len];
    for i in 0..j_len {
        for j in i..j_len {
            let (sum, count) = (0..t_len)
                .map(|t| x[t * j_len + i] * x[t * j_len + j])
                .filter(|v| !v.is_nan())
                .fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
            let v = sum / count as f64 - mu[i] * mu[j];
            sigma[i * j_len + j] = v;
            sigma[j * j_len + i] = v;
        }
    }
    Ok(Matrix::from_parts(j_len, j_len, sigma))
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn approx_eq(a: &[f64], b: &[f64], tol: f64) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| (x - y).abs() < tol)
    }

    fn sample() -> Matrix {
        Matrix::from_array(&[[1.0, 2.0], [3.0, 4.0], [5.0, 0.0]])
    }

    #[test]
    fn test_mle_covariance() {
        // >>> np.cov([[1, 3, 5], [2, 4, 0]], bias=True)
        // array([[ 2.66666667, -1.33333333],
        //        [-1.33333333,  2.66666667]])
        let s = variance_covariance(&sample()).unwrap();
        assert!(approx_eq(
            s.as_slice(),
            &[8.0 / 3.0, -4.0 / 3.0, -4.0 / 3.0, 8.0 / 3.0],
            1e-12
        ));
        assert!(s.is_symmetric());
    }

    #[test]
    fn test_single_observation_has_zero_variance() {
        let s = variance_covariance(&Matrix::from_array(&[[3.0, 7.0]])).unwrap();
        assert_eq!(s.as_slice(), &[0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_empty_input_rejected() {
        let empty = Matrix::new(0, 2);
        assert!(variance_covariance(&empty).is_err());
        assert!(variance_covariance_ew(&empty).is_err());
        assert!(variance_covariance_nan(&empty).is_err());
        assert!(variance_covariance_two_decay(&empty).is_err());
        assert!(variance_covariance_time_weighted(&Matrix::new(1, 2)).is_err());
    }

    #[test]
    fn test_time_weighted() {
        // two rows: all weight on the last one
        let m = Matrix::from_array(&[[1.0, 2.0], [3.0, 5.0]]);
        let s = variance_covariance_time_weighted(&m).unwrap();
        assert!(approx_eq(s.as_slice(), &[0.0; 4], 1e-12));

        // weights 0, 0.5, 1 on x = 1, 3, 5: mean 13/3, E[x^2] = 59/3
        let s = variance_covariance_time_weighted(&sample()).unwrap();
        assert!((s[(0, 0)] - (59.0 / 3.0 - 169.0 / 9.0)).abs() < 1e-12);
    }

    #[test]
    fn test_exponential_weights() {
        let w = exponential_weights(4, 0.97);
        assert_eq!(w[3], 1.0);
        assert!((w[0] - 0.97f64.powi(3)).abs() < 1e-15);
        assert!(exponential_weights(0, 0.97).is_empty());
        // underflow is floored
        let tiny = exponential_weights(2000, 0.1);
        assert!(tiny[0] > 0.0);
    }

    #[test]
    fn test_ew_with_unit_decay_matches_mle() {
        let flat = CovarianceConfig::new(1.0, 1.0, 1.0);
        let ew = variance_covariance_ew_with(&sample(), &flat).unwrap();
        let mle = variance_covariance(&sample()).unwrap();
        assert!(approx_eq(ew.as_slice(), mle.as_slice(), 1e-12));
    }

    #[test]
    fn test_ew_favours_recent_rows() {
        let m = Matrix::from_array(&[[10.0], [-10.0], [1.0], [-1.0]]);
        let ew = variance_covariance_ew_with(&m, &CovarianceConfig::new(0.1, 0.97, 0.997)).unwrap();
        let mle = variance_covariance(&m).unwrap();
        assert!(ew[(0, 0)] < mle[(0, 0)]);
        let weekly = variance_covariance_ew_weekly(&m).unwrap();
        let default = variance_covariance_ew(&m).unwrap();
        assert_eq!(weekly, default);
    }

    #[test]
    fn test_ew_rejects_bad_config() {
        let bad = CovarianceConfig::new(0.0, 0.97, 0.997);
        assert!(matches!(
            variance_covariance_ew_with(&sample(), &bad),
            Err(LinalgError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_two_decay_variances_follow_short_decay() {
        let m = sample();
        let s = variance_covariance_two_decay(&m).unwrap();
        let w = exponential_weights(3, 0.97);
        let acc: f64 = w.iter().sum();
        let short0 = (w[0] * 1.0 + w[1] * 9.0 + w[2] * 25.0) / acc;
        assert!((s[(0, 0)] - short0).abs() < 1e-12);
        assert!(s.is_symmetric());

        // equal decays reduce to the zero-mean second moment
        let same = CovarianceConfig::new(0.97, 0.97, 0.97);
        let s = variance_covariance_two_decay_with(&m, &same).unwrap();
        let cross = (w[0] * 2.0 + w[1] * 12.0) / acc;
        assert!((s[(0, 1)] - cross).abs() < 1e-12);
    }

    #[test]
    fn test_nan_free_input_matches_mle() {
        let a = variance_covariance_nan(&sample()).unwrap();
        let b = variance_covariance(&sample()).unwrap();
        assert!(approx_eq(a.as_slice(), b.as_slice(), 1e-12));
    }

    #[test]
    fn test_nan_pairwise() {
        let m = Matrix::from_array(&[[1.0, f64::NAN], [3.0, 4.0], [5.0, 0.0]]);
        let s = variance_covariance_nan(&m).unwrap();
        // mu = (3, 2); the pair uses rows 1 and 2 only
        assert!((s[(0, 0)] - 8.0 / 3.0).abs() < 1e-12);
        assert!((s[(1, 1)] - 4.0).abs() < 1e-12);
        assert!(s[(0, 1)].abs() < 1e-12);

        let all_missing = Matrix::from_array(&[[f64::NAN, 1.0], [f64::NAN, 2.0]]);
        let s = variance_covariance_nan(&all_missing).unwrap();
        assert!(s[(0, 0)].is_nan());
        assert!((s[(1, 1)] - 0.25).abs() < 1e-12);
    }
}
