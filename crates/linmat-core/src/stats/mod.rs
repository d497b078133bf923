//! Statistics over a `T x J` data matrix: `T` observations (rows, oldest
//! first) of `J` series (columns).
//!
//! | Function                              | Estimator                              |
//! |---------------------------------------|----------------------------------------|
//! | [`variance_covariance`]               | maximum likelihood, divisor `T`        |
//! | [`variance_covariance_time_weighted`] | linear weights `t / (T - 1)`           |
//! | [`variance_covariance_ew`]            | exponential weights `decay^(T-t-1)`    |
//! | [`variance_covariance_two_decay`]     | long-decay shape, short-decay scale    |
//! | [`variance_covariance_nan`]           | pairwise complete observations         |
//! | [`correlation_matrix`]                | sample correlation, divisor `T - 1`    |
//!
//! Every covariance estimator is the biased (MLE) one; none rescales by
//! `T / (T - 1)`.

mod collinearity;
mod covariance;
mod preprocess;

pub use collinearity::{correlation_matrix, shrinkage_target, variance_inflation_factors};
pub(crate) use collinearity::inverse_diagonal;
pub use covariance::{
    exponential_weights, variance_covariance, variance_covariance_ew, variance_covariance_ew_weekly,
    variance_covariance_ew_with, variance_covariance_nan, variance_covariance_time_weighted,
    variance_covariance_two_decay, variance_covariance_two_decay_with,
};
pub use preprocess::{Normalised, drop_columns, insert_constant_column, normalise_matrix};
