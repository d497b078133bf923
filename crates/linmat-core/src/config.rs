use serde::{Deserialize, Serialize};

use crate::error::{LinalgError, Result};

/// Decay factors for the exponentially weighted covariance estimators.
///
/// Observation `t` of `T` gets weight `decay^(T - t - 1)`, so the most
/// recent row always weighs 1.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct CovarianceConfig {
    /// Decay used by `variance_covariance_ew_with`.
    pub decay: f64,
    /// Short decay of the two-decay estimator; sets the variance level.
    pub short_decay: f64,
    /// Long decay of the two-decay estimator; sets the correlation shape.
    pub long_decay: f64,
}

impl Default for CovarianceConfig {
    fn default() -> Self {
        Self {
            decay: 0.97,
            short_decay: 0.97,
            long_decay: 0.997,
        }
    }
}

impl CovarianceConfig {
    pub fn new(decay: f64, short_decay: f64, long_decay: f64) -> Self {
        Self {
            decay,
            short_decay,
            long_decay,
        }
    }

    /// Preset for weekly return series.
    pub fn weekly() -> Self {
        Self {
            decay: 0.97,
            ..Self::default()
        }
    }

    /// Every factor must lie in `(0, 1]`.
    pub fn validate(&self) -> Result<()> {
        let in_range = |x: f64| x > 0.0 && x <= 1.0;
        if !in_range(self.decay) {
            return Err(LinalgError::InvalidArgument {
                reason: "decay must lie in (0, 1]",
            });
        }
        if !in_range(self.short_decay) {
            return Err(LinalgError::InvalidArgument {
                reason: "short_decay must lie in (0, 1]",
            });
        }
        if !in_range(self.long_decay) {
            return Err(LinalgError::InvalidArgument {
                reason: "long_decay must lie in (0, 1]",
            });
        }
        Ok(())
    }
}
