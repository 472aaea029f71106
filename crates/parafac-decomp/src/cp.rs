//! CP-ALS (Canonical Polyadic decomposition via Alternating Least Squares)
//!
//! The CP decomposition factorizes a tensor X into a sum of rank-1 tensors:
//!
//! X ≈ Σᵣ λᵣ (u₁ᵣ ∘ u₂ᵣ ∘ ... ∘ uₙᵣ)
//!
//! Where:
//! - R is the CP rank
//! - λᵣ are the component weights
//! - uᵢᵣ are unit-norm factor vectors forming factor matrices Uᵢ ∈ ℝ^(Iᵢ×R)
//!
//! One epoch updates every factor matrix in increasing mode order, each with
//! the others held fixed (see [`ModeUpdate`]), then measures the Frobenius
//! error of the reconstruction. Iteration continues while that error keeps
//! decreasing and the epoch budget lasts.
//!
//! # SciRS2 Integration
//!
//! All array operations use `scirs2_core::ndarray_ext`.
//! Linear algebra operations use `scirs2_linalg` through `parafac-kernels`.

use crate::error::CpError;
use crate::init::{initialize_factors, InitStrategy};
use crate::metric::frobenius_error;
use crate::mode_update::ModeUpdate;
use crate::options::{CpOptions, DegeneratePolicy};
use crate::recompose::recompose;
use parafac_core::DenseND;
use parafac_kernels::column_norms;
use scirs2_core::ndarray_ext::{Array1, Array2, ScalarOperand};
use scirs2_core::numeric::{Float, NumAssign};
use std::iter::Sum;
use std::time::Instant;
use tracing::{debug, info, info_span, trace, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Why the ALS loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StopReason {
    /// The cost failed to decrease by more than the tolerance
    Converged,
    /// `max_epochs` sweeps were performed while the cost was still decreasing
    EpochBudgetExhausted,
    /// The wall-clock budget ran out between epochs
    TimeLimit,
}

/// A factor column that had zero (or non-finite) norm after its update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DegenerateColumn {
    /// 1-based epoch in which the column collapsed
    pub epoch: usize,
    pub mode: usize,
    pub component: usize,
}

/// CP decomposition result
///
/// Represents a tensor as a weighted sum of R rank-1 tensors.
#[derive(Debug, Clone)]
pub struct CpDecomp<T> {
    /// Weight of each rank-1 component, taken from the column norms of the
    /// last factor updated
    pub weights: Array1<T>,

    /// Factor matrices, one for each mode
    /// Each matrix has shape (Iₙ, R) with unit-norm columns (zero columns
    /// for degenerate components)
    pub factors: Vec<Array2<T>>,

    /// Frobenius norm of the residual after the last epoch
    pub error: T,

    /// Number of epochs performed
    pub epochs: usize,

    /// Epoch budget the run was given
    pub max_epochs: usize,

    pub stop_reason: StopReason,

    /// Error after each epoch, in order
    pub cost_history: Vec<T>,

    /// Columns that collapsed to zero during the run
    pub degenerate: Vec<DegenerateColumn>,
}

impl<T> CpDecomp<T>
where
    T: Float,
{
    /// Number of components
    pub fn rank(&self) -> usize {
        self.weights.len()
    }

    pub fn n_modes(&self) -> usize {
        self.factors.len()
    }

    /// Whether the run stopped because the cost stopped decreasing
    pub fn converged(&self) -> bool {
        self.stop_reason == StopReason::Converged
    }

    /// Fit relative to the norm of the decomposed tensor: `1 - error / ‖X‖`
    ///
    /// A zero tensor has fit 1 when the error is zero and 0 otherwise.
    pub fn fit(&self, tensor_norm: T) -> T {
        if tensor_norm > T::zero() {
            T::one() - self.error / tensor_norm
        } else if self.error == T::zero() {
            T::one()
        } else {
            T::zero()
        }
    }

    /// Reconstruct the tensor from the factors and weights
    ///
    /// # Complexity
    ///
    /// Time: O(R × ∏ᵢ Iᵢ)
    /// Space: O(∏ᵢ Iᵢ)
    pub fn reconstruct(&self, shape: &[usize]) -> Result<DenseND<T>, CpError> {
        recompose(&self.factors, &self.weights, shape)
    }
}

/// Compute a CP-ALS decomposition with the given initialization
///
/// Shorthand for [`cp_als_with`] using default tolerance, pseudo-inverse
/// cutoff and degenerate-column policy.
///
/// # Examples
///
/// ```
/// use parafac_core::DenseND;
/// use parafac_decomp::{cp_als, InitStrategy};
///
/// let tensor = DenseND::<f64>::random_uniform_seeded(&[6, 5, 4], 0.0, 1.0, 1);
/// let cp = cp_als(&tensor, 3, 50, InitStrategy::Uniform { seed: Some(7) }).unwrap();
///
/// assert_eq!(cp.factors[0].shape(), &[6, 3]);
/// assert!(cp.epochs <= 50);
/// ```
pub fn cp_als<T>(
    tensor: &DenseND<T>,
    rank: usize,
    max_epochs: usize,
    init: InitStrategy,
) -> Result<CpDecomp<T>, CpError>
where
    T: Float
        + NumAssign
        + Sum
        + ScalarOperand
        + Send
        + Sync
        + std::fmt::Debug
        + std::fmt::Display
        + 'static,
{
    cp_als_with(tensor, &CpOptions::new(rank, max_epochs).with_init(init))
}

/// Decompose with constant-1 initialization and all defaults
///
/// # Examples
///
/// ```
/// use parafac_core::DenseND;
/// use parafac_decomp::decompose;
///
/// let tensor = DenseND::<f64>::ones(&[2, 2, 2]);
/// let cp = decompose(&tensor, 3, 20).unwrap();
///
/// assert!(cp.epochs <= 20);
/// assert_eq!(cp.reconstruct(&[2, 2, 2]).unwrap().shape(), &[2, 2, 2]);
/// ```
pub fn decompose<T>(
    tensor: &DenseND<T>,
    rank: usize,
    max_epochs: usize,
) -> Result<CpDecomp<T>, CpError>
where
    T: Float
        + NumAssign
        + Sum
        + ScalarOperand
        + Send
        + Sync
        + std::fmt::Debug
        + std::fmt::Display
        + 'static,
{
    cp_als_with(tensor, &CpOptions::new(rank, max_epochs))
}

/// Compute a CP-ALS decomposition
///
/// # Arguments
///
/// * `tensor` - Input tensor to decompose
/// * `options` - Rank, epoch budget, initialization and stopping controls
///
/// # Errors
///
/// Returns error if:
/// - the rank is 0 ([`CpError::InvalidRank`])
/// - the epoch budget is 0 ([`CpError::InvalidEpochs`])
/// - the tensor has no modes or an empty mode ([`CpError::ShapeMismatch`])
/// - the tolerance or pseudo-inverse cutoff is negative or NaN
///   ([`CpError::InvalidTolerance`])
/// - a column collapses under [`DegeneratePolicy::Fail`]
/// - the error becomes non-finite ([`CpError::NonFiniteCost`])
///
/// A rank larger than some mode size is accepted; the pseudo-inverse absorbs
/// the resulting rank deficiency.
///
/// # Complexity
///
/// Time: O(N × R × ∏ᵢ Iᵢ) per epoch
/// Space: O(∏ᵢ Iᵢ + R × ∏ᵢ Iᵢ / min Iᵢ) for the reconstruction and the
/// Khatri-Rao product
pub fn cp_als_with<T>(tensor: &DenseND<T>, options: &CpOptions) -> Result<CpDecomp<T>, CpError>
where
    T: Float
        + NumAssign
        + Sum
        + ScalarOperand
        + Send
        + Sync
        + std::fmt::Debug
        + std::fmt::Display
        + 'static,
{
    validate(tensor, options)?;

    let shape = tensor.shape();
    let rank = options.rank;
    let max_epochs = options.max_epochs;
    let tol = T::from(options.tol).ok_or(CpError::InvalidTolerance(options.tol))?;

    let span = info_span!("cp_als", shape = ?shape, rank, max_epochs);
    let _guard = span.enter();

    let mut factors = initialize_factors(tensor, rank, options.init)?;
    let mut weights = Array1::<T>::zeros(rank);

    let mut cost = T::infinity();
    let mut epoch = 0;
    let mut cost_history = Vec::with_capacity(max_epochs);
    let mut degenerate = Vec::new();
    let started = Instant::now();

    let stop_reason = loop {
        for update in ModeUpdate::sweep(tensor.rank()) {
            let mode = update.mode();
            let mut updated = update.solve(tensor, &factors, options.pinv_rcond)?;

            for component in normalize_columns(&mut updated, &mut weights) {
                if options.degenerate_policy == DegeneratePolicy::Fail {
                    return Err(CpError::DegenerateFactor { mode, component });
                }
                warn!(
                    epoch = epoch + 1,
                    mode, component, "factor column collapsed to zero; weight set to 0"
                );
                degenerate.push(DegenerateColumn {
                    epoch: epoch + 1,
                    mode,
                    component,
                });
            }

            factors[mode] = updated;
            trace!(epoch = epoch + 1, mode, "mode updated");
        }

        let approx = recompose(&factors, &weights, shape)?;
        let prev_cost = cost;
        cost = frobenius_error(tensor, &approx)?;
        epoch += 1;

        if !cost.is_finite() {
            return Err(CpError::NonFiniteCost { epoch });
        }
        cost_history.push(cost);
        debug!(epoch, cost = %cost, delta = %(prev_cost - cost), "epoch complete");

        if !(cost < prev_cost - tol) {
            break StopReason::Converged;
        }
        if epoch >= max_epochs {
            break StopReason::EpochBudgetExhausted;
        }
        if let Some(limit) = options.time_limit {
            if started.elapsed() >= limit {
                break StopReason::TimeLimit;
            }
        }
    };

    info!(epochs = epoch, error = %cost, stop_reason = ?stop_reason, "cp_als finished");

    Ok(CpDecomp {
        weights,
        factors,
        error: cost,
        epochs: epoch,
        max_epochs,
        stop_reason,
        cost_history,
        degenerate,
    })
}

fn validate<T>(tensor: &DenseND<T>, options: &CpOptions) -> Result<(), CpError>
where
    T: Float,
{
    if options.rank == 0 {
        return Err(CpError::InvalidRank(options.rank));
    }
    if options.max_epochs == 0 {
        return Err(CpError::InvalidEpochs(options.max_epochs));
    }
    if tensor.rank() == 0 {
        return Err(CpError::ShapeMismatch(
            "cannot decompose a tensor with no modes".to_string(),
        ));
    }
    if let Some(mode) = tensor.shape().iter().position(|&s| s == 0) {
        return Err(CpError::ShapeMismatch(format!(
            "mode {} of shape {:?} is empty",
            mode,
            tensor.shape()
        )));
    }
    if options.tol.is_nan() || options.tol < 0.0 {
        return Err(CpError::InvalidTolerance(options.tol));
    }
    if options.pinv_rcond.is_nan() || options.pinv_rcond < 0.0 {
        return Err(CpError::InvalidTolerance(options.pinv_rcond));
    }
    Ok(())
}

/// Scale each column of `factor` to unit norm, storing the norms in `weights`
///
/// Columns with zero or non-finite norm are zeroed, get weight 0 and are
/// returned by index.
fn normalize_columns<T>(factor: &mut Array2<T>, weights: &mut Array1<T>) -> Vec<usize>
where
    T: Float,
{
    let norms = column_norms(&factor.view());
    let mut collapsed = Vec::new();

    for ((r, mut column), &norm) in factor.columns_mut().into_iter().enumerate().zip(&norms) {
        if norm > T::zero() && norm.is_finite() {
            column.mapv_inplace(|x| x / norm);
            weights[r] = norm;
        } else {
            column.fill(T::zero());
            weights[r] = T::zero();
            collapsed.push(r);
        }
    }

    collapsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use scirs2_core::ndarray_ext::array;
    use std::time::Duration;

    fn rank_one_tensor() -> (DenseND<f64>, Vec<Array2<f64>>) {
        let factors = vec![
            array![[1.0], [2.0], [3.0]],
            array![[0.5], [-1.0]],
            array![[2.0], [1.0], [0.0], [1.5]],
        ];
        let tensor = recompose(&factors, &array![1.0], &[3, 2, 4]).unwrap();
        (tensor, factors)
    }

    #[test]
    fn test_normalize_columns() {
        let mut factor = array![[3.0, 0.0], [4.0, 0.0]];
        let mut weights = Array1::<f64>::zeros(2);
        let collapsed = normalize_columns(&mut factor, &mut weights);

        assert_eq!(collapsed, vec![1]);
        assert_eq!(weights, array![5.0, 0.0]);
        assert_eq!(factor, array![[0.6, 0.0], [0.8, 0.0]]);
    }

    #[test]
    fn test_normalize_non_finite_column() {
        let mut factor = array![[f64::NAN], [1.0]];
        let mut weights = Array1::<f64>::ones(1);
        let collapsed = normalize_columns(&mut factor, &mut weights);
        assert_eq!(collapsed, vec![0]);
        assert_eq!(weights[0], 0.0);
        assert!(factor.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_ones_tensor_reference_run() {
        let tensor = DenseND::<f64>::ones(&[2, 2, 2]);
        let cp = decompose(&tensor, 3, 20).unwrap();

        assert!(cp.epochs <= 20);
        assert!(cp.error.is_finite() && cp.error >= 0.0);
        assert!(cp.error < 1e-8, "error {}", cp.error);
        assert_eq!(cp.rank(), 3);
        assert_eq!(cp.n_modes(), 3);
        assert_eq!(cp.cost_history.len(), cp.epochs);
        assert_eq!(cp.reconstruct(&[2, 2, 2]).unwrap().shape(), &[2, 2, 2]);
    }

    #[test]
    fn test_rank_one_recovery() {
        let (tensor, _) = rank_one_tensor();
        let cp = cp_als(&tensor, 1, 50, InitStrategy::Uniform { seed: Some(3) }).unwrap();

        assert!(cp.error < 1e-8, "error {}", cp.error);
        let norm = tensor.frobenius_norm();
        assert!((cp.fit(norm) - 1.0).abs() < 1e-8);
    }

    #[test]
    fn test_factor_columns_are_unit_norm() {
        let tensor = DenseND::<f64>::random_uniform_seeded(&[4, 3, 5], 0.0, 1.0, 11);
        let cp = cp_als(&tensor, 2, 10, InitStrategy::Normal { seed: Some(5) }).unwrap();

        for factor in &cp.factors {
            for col in factor.columns() {
                let norm = col.iter().map(|x| x * x).sum::<f64>().sqrt();
                assert!((norm - 1.0).abs() < 1e-10 || norm == 0.0);
            }
        }
    }

    #[test]
    fn test_epoch_budget_exhausted() {
        let tensor = DenseND::<f64>::random_uniform_seeded(&[5, 4, 3], 0.0, 1.0, 2);
        let cp = cp_als(&tensor, 3, 1, InitStrategy::Uniform { seed: Some(1) }).unwrap();

        // The first epoch always decreases the cost from +inf
        assert_eq!(cp.epochs, 1);
        assert_eq!(cp.max_epochs, 1);
        assert_eq!(cp.stop_reason, StopReason::EpochBudgetExhausted);
        assert!(!cp.converged());
    }

    #[test]
    fn test_time_limit() {
        let tensor = DenseND::<f64>::random_uniform_seeded(&[5, 4, 3], 0.0, 1.0, 2);
        let options = CpOptions::new(3, 1000)
            .with_init(InitStrategy::Uniform { seed: Some(1) })
            .with_time_limit(Duration::ZERO);
        let cp = cp_als_with(&tensor, &options).unwrap();

        assert_eq!(cp.epochs, 1);
        assert_eq!(cp.stop_reason, StopReason::TimeLimit);
    }

    #[test]
    fn test_validation_errors() {
        let tensor = DenseND::<f64>::ones(&[2, 2]);

        assert!(matches!(decompose(&tensor, 0, 10), Err(CpError::InvalidRank(0))));
        assert!(matches!(decompose(&tensor, 1, 0), Err(CpError::InvalidEpochs(0))));

        let empty_mode = DenseND::<f64>::zeros(&[2, 0, 3]);
        assert!(matches!(decompose(&empty_mode, 1, 10), Err(CpError::ShapeMismatch(_))));

        let negative_tol = CpOptions::new(1, 10).with_tol(-1e-3);
        assert!(matches!(
            cp_als_with(&tensor, &negative_tol),
            Err(CpError::InvalidTolerance(_))
        ));
    }

    #[test]
    fn test_rank_larger_than_modes_is_allowed() {
        let tensor = DenseND::<f64>::random_uniform_seeded(&[2, 2, 2], 0.0, 1.0, 4);
        let cp = cp_als(&tensor, 5, 5, InitStrategy::Uniform { seed: Some(9) }).unwrap();
        assert_eq!(cp.factors[0].dim(), (2, 5));
        assert!(cp.error.is_finite());
    }

    #[test]
    fn test_zero_tensor_degenerate_keep_zero() {
        let tensor = DenseND::<f64>::zeros(&[2, 3]);
        let cp = decompose(&tensor, 2, 10).unwrap();

        assert_eq!(cp.error, 0.0);
        assert!(cp.weights.iter().all(|&w| w == 0.0));
        assert!(!cp.degenerate.is_empty());
        assert_eq!(
            cp.degenerate[0],
            DegenerateColumn {
                epoch: 1,
                mode: 0,
                component: 0
            }
        );
    }

    #[test]
    fn test_zero_tensor_degenerate_fail() {
        let tensor = DenseND::<f64>::zeros(&[2, 3]);
        let options = CpOptions::new(2, 10).with_degenerate_policy(DegeneratePolicy::Fail);
        let err = cp_als_with(&tensor, &options).unwrap_err();
        assert!(matches!(
            err,
            CpError::DegenerateFactor {
                mode: 0,
                component: 0
            }
        ));
    }

    #[test]
    fn test_fit_of_zero_tensor() {
        let tensor = DenseND::<f64>::zeros(&[2, 2]);
        let cp = decompose(&tensor, 1, 3).unwrap();
        assert_eq!(cp.fit(0.0), 1.0);
    }

    #[test]
    fn test_f32_support() {
        let tensor = DenseND::<f32>::ones(&[3, 3, 3]);
        let cp = decompose(&tensor, 1, 10).unwrap();
        assert!(cp.error < 1e-4);
    }
}
