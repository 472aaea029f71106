//! Property-based tests for CP-ALS
//!
//! These tests verify invariants that hold for every tensor shape and rank.

#[cfg(test)]
mod tests {
    use crate::{cp_als, recompose, CpOptions, InitStrategy, StopReason};
    use crate::{cp_als_with, frobenius_error};
    use parafac_core::DenseND;
    use proptest::prelude::*;
    use scirs2_core::ndarray_ext::{Array1, Array2};

    fn shape_strategy() -> impl Strategy<Value = Vec<usize>> {
        prop::collection::vec(3usize..6, 2..=3)
    }

    fn seeded_factors(shape: &[usize], rank: usize, seed: u64) -> Vec<Array2<f64>> {
        shape
            .iter()
            .enumerate()
            .map(|(m, &size)| {
                Array2::from_shape_fn((size, rank), |(i, r)| {
                    let h = (i as u64 * 7 + r as u64 * 13 + m as u64 * 29 + seed) % 23;
                    h as f64 / 11.0 + 0.1
                })
            })
            .collect()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn recompose_then_error_is_zero(
            shape in shape_strategy(),
            rank in 1usize..4,
            seed in 0u64..1000
        ) {
            let factors = seeded_factors(&shape, rank, seed);
            let weights = Array1::from_shape_fn(rank, |r| 1.0 + r as f64);

            let a = recompose(&factors, &weights, &shape).unwrap();
            let b = recompose(&factors, &weights, &shape).unwrap();

            prop_assert_eq!(a.shape(), &shape[..]);
            prop_assert!(frobenius_error(&a, &b).unwrap() < 1e-9);
        }

        #[test]
        fn cost_history_is_non_increasing(
            shape in shape_strategy(),
            rank in 1usize..4,
            seed in 0u64..1000
        ) {
            let tensor = DenseND::<f64>::random_uniform_seeded(&shape, 0.0, 1.0, seed);
            let cp = cp_als(&tensor, rank, 15, InitStrategy::Uniform { seed: Some(seed) }).unwrap();

            let scale = tensor.frobenius_norm().max(1.0);
            for pair in cp.cost_history.windows(2) {
                prop_assert!(
                    pair[1] <= pair[0] + 1e-8 * scale,
                    "cost rose from {} to {}",
                    pair[0],
                    pair[1]
                );
            }
        }

        #[test]
        fn epochs_never_exceed_budget(
            shape in shape_strategy(),
            rank in 1usize..4,
            max_epochs in 1usize..6,
            seed in 0u64..1000
        ) {
            let tensor = DenseND::<f64>::random_uniform_seeded(&shape, 0.0, 1.0, seed);
            let options = CpOptions::new(rank, max_epochs)
                .with_init(InitStrategy::Normal { seed: Some(seed) });
            let cp = cp_als_with(&tensor, &options).unwrap();

            prop_assert!(cp.epochs >= 1 && cp.epochs <= max_epochs);
            prop_assert_eq!(cp.cost_history.len(), cp.epochs);
            if cp.stop_reason == StopReason::EpochBudgetExhausted {
                prop_assert_eq!(cp.epochs, max_epochs);
            }
        }

        #[test]
        fn result_shapes_match_tensor(
            shape in shape_strategy(),
            rank in 1usize..4,
            seed in 0u64..1000
        ) {
            let tensor = DenseND::<f64>::random_uniform_seeded(&shape, 0.0, 1.0, seed);
            let cp = cp_als(&tensor, rank, 5, InitStrategy::Uniform { seed: Some(seed) }).unwrap();

            prop_assert_eq!(cp.factors.len(), shape.len());
            for (factor, &size) in cp.factors.iter().zip(&shape) {
                prop_assert_eq!(factor.dim(), (size, rank));
            }
            prop_assert_eq!(cp.weights.len(), rank);

            let approx = cp.reconstruct(&shape).unwrap();
            let error = frobenius_error(&tensor, &approx).unwrap();
            prop_assert!((error - cp.error).abs() < 1e-9);
        }
    }
}
