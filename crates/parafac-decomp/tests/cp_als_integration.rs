//! Integration tests for CP-ALS
//!
//! End-to-end runs through the public API: reference scenarios, recovery of
//! exact low-rank tensors, stopping behaviour and error reporting.

use parafac_core::DenseND;
use parafac_decomp::{
    cp_als, cp_als_with, decompose, frobenius_error, recompose, CpError, CpOptions,
    DegeneratePolicy, InitStrategy, StopReason,
};
use scirs2_core::ndarray_ext::{array, Array1, Array2};

fn low_rank_tensor(shape: &[usize], rank: usize) -> (DenseND<f64>, Vec<Array2<f64>>) {
    let factors: Vec<Array2<f64>> = shape
        .iter()
        .enumerate()
        .map(|(m, &size)| {
            Array2::from_shape_fn((size, rank), |(i, r)| {
                1.0 + ((i * (r + 2) + m * 3 + r * r) % 5) as f64 * 0.4
            })
        })
        .collect();
    let weights = Array1::from_shape_fn(rank, |r| 2.0 + r as f64);
    let tensor = recompose(&factors, &weights, shape).unwrap();
    (tensor, factors)
}

#[test]
fn test_reference_ones_tensor() {
    // ones (2,2,2), rank 3, 20 epochs, constant-1 initialization
    let tensor = DenseND::<f64>::ones(&[2, 2, 2]);
    let cp = decompose(&tensor, 3, 20).unwrap();

    assert!(cp.epochs >= 1 && cp.epochs <= 20);
    assert!(cp.error.is_finite());
    assert!(cp.error >= 0.0);
    assert!(cp.error < 1e-8, "error {}", cp.error);
    assert_eq!(cp.max_epochs, 20);
    assert_eq!(cp.weights.len(), 3);
    for factor in &cp.factors {
        assert_eq!(factor.dim(), (2, 3));
    }

    let approx = cp.reconstruct(&[2, 2, 2]).unwrap();
    assert_eq!(approx.shape(), &[2, 2, 2]);
    for &x in approx.iter() {
        assert!((x - 1.0).abs() < 1e-8);
    }
}

#[test]
fn test_ones_tensor_symmetric_components() {
    // Identical starting columns stay identical: every component carries a
    // third of the tensor
    let tensor = DenseND::<f64>::ones(&[2, 2, 2]);
    let cp = decompose(&tensor, 3, 20).unwrap();

    let expected = 2.0 * 2.0_f64.sqrt() / 3.0;
    for &w in cp.weights.iter() {
        assert!((w - expected).abs() < 1e-10, "weight {}", w);
    }
    for factor in &cp.factors {
        for &x in factor.iter() {
            assert!((x - 0.5_f64.sqrt()).abs() < 1e-10);
        }
    }
}

#[test]
fn test_rank_one_recovery() {
    let u = array![[1.0], [2.0], [3.0]];
    let v = array![[1.0], [-0.5]];
    let w = array![[0.5], [1.0], [2.0], [0.25]];
    let tensor = recompose(&[u, v, w], &array![1.0], &[3, 2, 4]).unwrap();

    let cp = decompose(&tensor, 1, 20).unwrap();
    assert!(cp.error < 1e-9, "error {}", cp.error);
    assert!(cp.epochs <= 5, "took {} epochs", cp.epochs);
    assert_eq!(cp.stop_reason, StopReason::Converged);
}

#[test]
fn test_low_rank_fit_improves_with_epochs() {
    let (tensor, _) = low_rank_tensor(&[6, 5, 4], 2);
    let short = cp_als(&tensor, 2, 2, InitStrategy::Uniform { seed: Some(42) }).unwrap();
    let long = cp_als(&tensor, 2, 200, InitStrategy::Uniform { seed: Some(42) }).unwrap();

    assert!(long.error <= short.error + 1e-12);
    let norm = tensor.frobenius_norm();
    assert!(long.fit(norm) > 0.9, "fit {}", long.fit(norm));
}

#[test]
fn test_svd_initialization() {
    let (tensor, _) = low_rank_tensor(&[5, 4, 3], 2);
    let cp = cp_als(&tensor, 2, 100, InitStrategy::Svd).unwrap();

    let norm = tensor.frobenius_norm();
    assert!(cp.fit(norm) > 0.9, "fit {}", cp.fit(norm));
}

#[test]
fn test_svd_init_rank_two_ones_tensor() {
    // HOSVD factors have orthogonal columns, so every normal-equation matrix
    // is diagonal
    let tensor = DenseND::<f64>::ones(&[2, 2, 2]);
    let cp = cp_als(&tensor, 2, 20, InitStrategy::Svd).unwrap();

    assert!(cp.error < 1e-8, "error {}", cp.error);
    assert!(cp.weights.iter().any(|&w| w > 0.0));
}

#[test]
fn test_one_way_tensor_higher_rank() {
    let vector = DenseND::from_vec(vec![1.0, 2.0, 3.0], &[3]).unwrap();
    let cp = decompose(&vector, 2, 5).unwrap();

    assert_eq!(cp.factors[0].dim(), (3, 2));
    assert!(cp.error < 1e-10, "error {}", cp.error);
    let approx = cp.reconstruct(&[3]).unwrap();
    assert_eq!(approx.shape(), &[3]);
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let tensor = DenseND::<f64>::random_uniform_seeded(&[4, 4, 4], 0.0, 1.0, 8);
    let init = InitStrategy::Normal { seed: Some(21) };
    let a = cp_als(&tensor, 2, 10, init).unwrap();
    let b = cp_als(&tensor, 2, 10, init).unwrap();

    assert_eq!(a.cost_history, b.cost_history);
    assert_eq!(a.factors, b.factors);
    assert_eq!(a.weights, b.weights);
}

#[test]
fn test_reported_error_matches_reconstruction() {
    let tensor = DenseND::<f64>::random_uniform_seeded(&[3, 4, 5], 0.0, 1.0, 12);
    let cp = cp_als(&tensor, 2, 30, InitStrategy::Uniform { seed: Some(3) }).unwrap();

    let approx = cp.reconstruct(tensor.shape()).unwrap();
    let error = frobenius_error(&tensor, &approx).unwrap();
    assert!((error - cp.error).abs() < 1e-12);
    assert_eq!(cp.cost_history.last().copied(), Some(cp.error));
}

#[test]
fn test_four_way_tensor() {
    let (tensor, _) = low_rank_tensor(&[3, 2, 4, 3], 1);
    let cp = cp_als(&tensor, 1, 50, InitStrategy::Uniform { seed: Some(1) }).unwrap();
    assert!(cp.error < 1e-8, "error {}", cp.error);
    assert_eq!(cp.n_modes(), 4);
}

#[test]
fn test_matrix_decomposition() {
    // A 2-way CP model is a rank-R matrix factorization
    let m = DenseND::from_vec(vec![1.0, 2.0, 3.0, 2.0, 4.0, 6.0], &[2, 3]).unwrap();
    let cp = decompose(&m, 1, 20).unwrap();
    assert!(cp.error < 1e-10, "error {}", cp.error);
}

#[test]
fn test_tolerance_stops_early() {
    let tensor = DenseND::<f64>::random_uniform_seeded(&[5, 5, 5], 0.0, 1.0, 4);
    let loose = CpOptions::new(3, 500)
        .with_init(InitStrategy::Uniform { seed: Some(2) })
        .with_tol(1.0);
    let cp = cp_als_with(&tensor, &loose).unwrap();

    assert_eq!(cp.stop_reason, StopReason::Converged);
    assert!(cp.epochs < 500);
}

#[test]
fn test_frobenius_error_shape_mismatch() {
    let a = DenseND::<f64>::zeros(&[2, 2]);
    let b = DenseND::<f64>::zeros(&[3, 3]);
    let err = frobenius_error(&a, &b).unwrap_err();
    assert!(err.is_shape_mismatch());
}

#[test]
fn test_recompose_shape_mismatch() {
    let factors = vec![Array2::<f64>::ones((2, 2)); 3];
    let err = recompose(&factors, &Array1::ones(2), &[2, 2]).unwrap_err();
    assert!(matches!(err, CpError::ShapeMismatch(_)));
}

#[test]
fn test_invalid_arguments() {
    let tensor = DenseND::<f64>::ones(&[2, 2, 2]);
    assert!(matches!(decompose(&tensor, 0, 20), Err(CpError::InvalidRank(0))));
    assert!(matches!(decompose(&tensor, 2, 0), Err(CpError::InvalidEpochs(0))));

    let bad_rcond = CpOptions::new(2, 5).with_pinv_rcond(f64::NAN);
    assert!(matches!(
        cp_als_with(&tensor, &bad_rcond),
        Err(CpError::InvalidTolerance(_))
    ));
}

#[test]
fn test_degenerate_policies() {
    let zeros = DenseND::<f64>::zeros(&[3, 2, 2]);

    let kept = decompose(&zeros, 2, 5).unwrap();
    assert_eq!(kept.error, 0.0);
    assert!(kept.degenerate.iter().all(|d| d.epoch >= 1 && d.component < 2));

    let strict = CpOptions::new(2, 5).with_degenerate_policy(DegeneratePolicy::Fail);
    assert!(matches!(
        cp_als_with(&zeros, &strict),
        Err(CpError::DegenerateFactor { .. })
    ));
}
