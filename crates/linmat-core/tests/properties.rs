//! Property-based checks of the decomposition identities.

use linmat_core::Matrix;
use proptest::prelude::*;

fn close(a: &Matrix, b: &Matrix, tol: f64) -> bool {
    a.shape() == b.shape()
        && a
            .as_slice()
            .iter()
            .zip(b.as_slice())
            .all(|(x, y)| (x - y).abs() < tol)
}

fn max_abs(m: &Matrix) -> f64 {
    m.as_slice().iter().fold(0.0_f64, |acc, x| acc.max(x.abs()))
}

fn any_matrix() -> impl Strategy<Value = Matrix> {
    (1usize..6, 1usize..6).prop_flat_map(|(h, w)| {
        proptest::collection::vec(-10.0_f64..10.0, h * w)
            .prop_map(move |data| Matrix::from_vec(h, w, data).unwrap())
    })
}

fn square_matrix(n: usize) -> impl Strategy<Value = Matrix> {
    proptest::collection::vec(-10.0_f64..10.0, n * n)
        .prop_map(move |data| Matrix::from_vec(n, n, data).unwrap())
}

fn tall_matrix() -> impl Strategy<Value = Matrix> {
    (1usize..5, 0usize..3).prop_flat_map(|(n, extra)| {
        let m = n + extra;
        proptest::collection::vec(-10.0_f64..10.0, m * n)
            .prop_map(move |data| Matrix::from_vec(m, n, data).unwrap())
    })
}

fn spd_matrix(n: usize) -> impl Strategy<Value = Matrix> {
    // A^T A + n I is symmetric positive definite
    square_matrix(n).prop_map(move |a| {
        let ata = a.transpose().matmul(&a).unwrap();
        ata.add_checked(&Matrix::identity(n).scale(n as f64)).unwrap()
    })
}

fn symmetric_matrix(n: usize) -> impl Strategy<Value = Matrix> {
    square_matrix(n).prop_map(|a| a.add_checked(&a.transpose()).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn transpose_involution(m in any_matrix()) {
        prop_assert_eq!(m.transpose().transpose(), m.clone());
        let view = m.transpose_view();
        prop_assert_eq!(view.to_matrix(), m.transpose());
    }

    #[test]
    fn spd_inverse_is_two_sided(a in spd_matrix(4)) {
        let inv = a.inverse().unwrap();
        let eye = Matrix::identity(4);
        prop_assert!(close(&a.matmul(&inv).unwrap(), &eye, 1e-9));
        prop_assert!(close(&inv.matmul(&a).unwrap(), &eye, 1e-9));
    }

    #[test]
    fn lu_reproduces_permuted_input(a in square_matrix(4)) {
        let lu = a.lu();
        let pa = lu.p().matmul(&a).unwrap();
        let prod = lu.l().matmul(&lu.u()).unwrap();
        prop_assert!(close(&pa, &prod, 1e-9));
    }

    #[test]
    fn qr_reconstructs_with_orthonormal_q(a in tall_matrix()) {
        let qr = a.qr().unwrap();
        let q = qr.q();
        prop_assert!(close(&q.matmul(&qr.r()).unwrap(), &a, 1e-9));
        let qtq = q.transpose().matmul(&q).unwrap();
        prop_assert!(close(&qtq, &Matrix::identity(a.width()), 1e-9));
    }

    #[test]
    fn svd_reconstructs_sorted(a in any_matrix()) {
        let svd = a.svd().unwrap();
        let s = svd.singular_values();
        prop_assert!(s.iter().all(|&x| x >= 0.0));
        prop_assert!(s.windows(2).all(|p| p[0] >= p[1]));
        let back = svd
            .u()
            .matmul(&svd.s())
            .unwrap()
            .matmul(&svd.v().transpose())
            .unwrap();
        prop_assert!(close(&back, &a, 1e-8));
    }

    #[test]
    fn cholesky_reconstructs(a in spd_matrix(4)) {
        let ch = a.cholesky().unwrap();
        let llt = ch.l().matmul(&ch.u()).unwrap();
        prop_assert!(close(&llt, &a, 1e-9));
    }

    #[test]
    fn symmetric_eigen_diagonalises(a in symmetric_matrix(4)) {
        let eig = a.eigen().unwrap();
        prop_assert!(eig.is_symmetric());
        let v = eig.eigenvectors();
        let vtav = v.transpose().matmul(&a).unwrap().matmul(&v).unwrap();
        prop_assert!(close(&vtav, &eig.d(), 1e-8));
        let d = eig.real_eigenvalues();
        prop_assert!(d.windows(2).all(|p| p[0] <= p[1]));
    }

    #[test]
    fn general_eigen_satisfies_av_eq_vd(a in square_matrix(4)) {
        let eig = a.eigen().unwrap();
        let v = eig.eigenvectors();
        let av = a.matmul(&v).unwrap();
        let vd = v.matmul(&eig.d()).unwrap();
        // residual scales with |A| |V|; eigenvectors are not normalised
        let tol = 1e-10 * (1.0 + max_abs(&a)) * (1.0 + max_abs(&v));
        prop_assert!(close(&av, &vd, tol));
        // complex eigenvalues come in conjugate pairs
        let im = eig.imag_eigenvalues();
        let sum: f64 = im.iter().sum();
        prop_assert!(sum.abs() < 1e-9 * (1.0 + max_abs(&a)));
    }

    #[test]
    fn gauss_elimination_agrees_with_lu(a in spd_matrix(3), b in proptest::collection::vec(-10.0_f64..10.0, 3)) {
        let x = a.gauss_elimination(&b).unwrap();
        let y = a.solve(&Matrix::from_column(&b)).unwrap();
        for i in 0..3 {
            prop_assert!((x[i] - y[(i, 0)]).abs() < 1e-9);
        }
    }
}
