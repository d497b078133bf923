//! End-to-end scenarios through the public API.

use linmat_core::prelude::*;
use linmat_core::{linalg, stats};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn approx_eq(a: &[f64], b: &[f64], tol: f64) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| (x - y).abs() < tol)
}

// ---------------------------------------------------------------------------
// Decompositions
// ---------------------------------------------------------------------------

#[test]
fn diagonal_eigen_decomposition() {
    init_logging();
    let a = Matrix::from_array(&[[4.0, 0.0], [0.0, 9.0]]);
    let eig = a.eigen().unwrap();
    assert!(eig.is_symmetric());
    assert_eq!(eig.real_eigenvalues(), &[4.0, 9.0]);
    assert_eq!(eig.imag_eigenvalues(), &[0.0, 0.0]);
    let v = eig.eigenvectors();
    assert!(approx_eq(v.abs().as_slice(), &[1.0, 0.0, 0.0, 1.0], 1e-14));
}

#[test]
fn non_finite_input_has_no_eigen_decomposition() {
    init_logging();
    let general = Matrix::from_array(&[[1.0, f64::NAN], [2.0, 3.0]]);
    assert!(matches!(
        general.eigen(),
        Err(LinalgError::InvalidArgument { .. })
    ));
    let sym = Matrix::from_array(&[[1.0, f64::NAN], [f64::NAN, 3.0]]);
    assert!(matches!(
        sym.eigen(),
        Err(LinalgError::InvalidArgument { .. })
    ));
    assert!(matches!(
        general.svd(),
        Err(LinalgError::NonConvergence { algorithm: "svd", .. })
    ));
}

#[test]
fn identity_determinant_and_inverse() {
    init_logging();
    let eye = Matrix::identity(3);
    assert_eq!(eye.determinant().unwrap(), 1.0);
    assert_eq!(eye.inverse().unwrap(), eye);
    assert_eq!(linalg::det(&eye).unwrap(), 1.0);
}

#[test]
fn singular_matrix_is_reported() {
    init_logging();
    let a = Matrix::from_array(&[[1.0, 2.0], [2.0, 4.0]]);
    assert!(!a.is_non_singular());
    assert_eq!(a.determinant().unwrap(), 0.0);
    assert_eq!(a.inverse().unwrap_err(), LinalgError::Singular);
    // the pseudoinverse still exists
    let p = a.pseudo_inverse().unwrap();
    assert!(approx_eq(p.as_slice(), &[0.04, 0.08, 0.08, 0.16], 1e-12));
}

#[test]
fn solve_diagonal_against_identity() {
    init_logging();
    let a = Matrix::from_array(&[[2.0, 0.0], [0.0, 4.0]]);
    let x = a.solve(&Matrix::identity(2)).unwrap();
    assert_eq!(x.as_slice(), &[0.5, 0.0, 0.0, 0.25]);
}

#[test]
fn product_shape_mismatch() {
    let a = Matrix::new(2, 3);
    let b = Matrix::new(2, 2);
    assert!(matches!(
        a.matmul(&b),
        Err(LinalgError::DimensionMismatch { .. })
    ));
}

// ---------------------------------------------------------------------------
// Caching
// ---------------------------------------------------------------------------

#[test]
fn writes_refresh_cached_results() {
    init_logging();
    let mut a = Matrix::from_array(&[[2.0, 1.0], [1.0, 2.0]]);
    assert!((a.determinant().unwrap() - 3.0).abs() < 1e-12);
    let before = a.svd().unwrap().singular_values().to_vec();

    a.set(0, 1, 0.0).unwrap();
    a.set(1, 0, 0.0).unwrap();
    assert!((a.determinant().unwrap() - 4.0).abs() < 1e-12);
    let after = a.svd().unwrap().singular_values().to_vec();
    assert!(approx_eq(&before, &[3.0, 1.0], 1e-12));
    assert!(approx_eq(&after, &[2.0, 2.0], 1e-12));
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

#[test]
fn regression_workflow() {
    init_logging();
    let data = Matrix::from_array(&[
        [1.0, 2.0, 0.5],
        [2.0, 1.0, 1.5],
        [3.0, 4.0, 1.0],
        [4.0, 3.0, 3.0],
        [5.0, 6.0, 2.0],
    ]);
    let normalised = stats::normalise_matrix(&data).unwrap();
    assert_eq!(normalised.means, vec![3.0, 3.2, 1.6]);

    let vif = data.variance_inflation_factors().unwrap();
    assert_eq!(vif.len(), 3);
    assert!(vif.iter().all(|&v| v >= 1.0 - 1e-12));
    assert!(approx_eq(
        vif,
        &stats::variance_inflation_factors(&data).unwrap(),
        1e-12
    ));

    let design = stats::insert_constant_column(&data);
    assert_eq!(design.shape(), (5, 4));
    assert!(design.is_full_rank().unwrap());
}

#[test]
fn covariance_estimators_agree_on_flat_weights() {
    let data = Matrix::from_array(&[[1.0, 2.0], [3.0, 4.0], [5.0, 0.0]]);
    let mle = stats::variance_covariance(&data).unwrap();
    let flat = CovarianceConfig::new(1.0, 1.0, 1.0);
    let ew = stats::variance_covariance_ew_with(&data, &flat).unwrap();
    let nan = stats::variance_covariance_nan(&data).unwrap();
    assert!(approx_eq(mle.as_slice(), ew.as_slice(), 1e-12));
    assert!(approx_eq(mle.as_slice(), nan.as_slice(), 1e-12));
    assert!(stats::shrinkage_target(&data).is_none());
}
