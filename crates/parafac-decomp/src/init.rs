//! Factor matrix initialization
//!
//! ALS only finds a local optimum, so the starting factors matter. The
//! constant strategy is deterministic and is the default; the random
//! strategies accept an optional seed so runs can be reproduced.

use crate::error::CpError;
use parafac_core::DenseND;
use scirs2_core::ndarray_ext::{Array2, ScalarOperand};
use scirs2_core::numeric::{Float, NumAssign};
use scirs2_core::random::{
    rngs::StdRng, thread_rng, Distribution, RandNormal as Normal, Rng, SeedableRng,
};
use scirs2_linalg::svd;
use std::iter::Sum;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Standard deviation of the noise filling SVD factor columns beyond the
/// available singular vectors
const SVD_PADDING_STD: f64 = 0.01;

/// Initialization strategy for CP-ALS
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InitStrategy {
    /// Every entry equals the given constant
    ///
    /// All columns start identical, so a fit with rank > 1 may stay on a
    /// symmetric fixed point where the columns never separate.
    Constant(f64),
    /// Entries drawn from U[0, 1)
    Uniform { seed: Option<u64> },
    /// Entries drawn from N(0, 1)
    Normal { seed: Option<u64> },
    /// Leading left singular vectors of each mode-n unfolding (HOSVD)
    Svd,
}

impl Default for InitStrategy {
    fn default() -> Self {
        InitStrategy::Constant(1.0)
    }
}

/// Build one `(shape[n], rank)` factor matrix per mode
///
/// # Errors
///
/// [`CpError::Linalg`] if an SVD fails and [`CpError::Tensor`] if an
/// unfolding fails or a constant cannot be represented in `T`.
pub fn initialize_factors<T>(
    tensor: &DenseND<T>,
    rank: usize,
    init: InitStrategy,
) -> Result<Vec<Array2<T>>, CpError>
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
    let shape = tensor.shape();

    match init {
        InitStrategy::Constant(c) => {
            let value = T::from(c)
                .ok_or_else(|| CpError::Tensor(format!("constant {} is not representable", c)))?;
            Ok(shape
                .iter()
                .map(|&size| Array2::from_elem((size, rank), value))
                .collect())
        }
        InitStrategy::Uniform { seed } => match seed {
            Some(seed) => uniform_factors(shape, rank, &mut StdRng::seed_from_u64(seed)),
            None => uniform_factors(shape, rank, &mut thread_rng()),
        },
        InitStrategy::Normal { seed } => match seed {
            Some(seed) => normal_factors(shape, rank, 1.0, &mut StdRng::seed_from_u64(seed)),
            None => normal_factors(shape, rank, 1.0, &mut thread_rng()),
        },
        InitStrategy::Svd => svd_factors(tensor, rank),
    }
}

fn uniform_factors<T, R>(
    shape: &[usize],
    rank: usize,
    rng: &mut R,
) -> Result<Vec<Array2<T>>, CpError>
where
    T: Float,
    R: Rng,
{
    shape
        .iter()
        .map(|&size| random_factor(size, rank, || rng.random::<f64>()))
        .collect()
}

fn normal_factors<T, R>(
    shape: &[usize],
    rank: usize,
    std: f64,
    rng: &mut R,
) -> Result<Vec<Array2<T>>, CpError>
where
    T: Float,
    R: Rng,
{
    let normal = normal_distribution(std)?;
    shape
        .iter()
        .map(|&size| random_factor(size, rank, || normal.sample(&mut *rng)))
        .collect()
}

fn normal_distribution(std: f64) -> Result<Normal<f64>, CpError> {
    Normal::new(0.0, std)
        .map_err(|e| CpError::Tensor(format!("invalid normal distribution N(0, {}²): {}", std, e)))
}

fn random_factor<T, F>(rows: usize, rank: usize, mut sample: F) -> Result<Array2<T>, CpError>
where
    T: Float,
    F: FnMut() -> f64,
{
    let values: Vec<T> = (0..rows * rank)
        .map(|_| T::from(sample()).unwrap_or_else(T::zero))
        .collect();
    Array2::from_shape_vec((rows, rank), values)
        .map_err(|e| CpError::ShapeMismatch(format!("factor ({}, {}): {}", rows, rank, e)))
}

/// HOSVD initialization
///
/// Column `r` of factor `n` is the `r`-th left singular vector of the mode-n
/// unfolding. When `rank` exceeds the number of singular vectors, the
/// remaining columns are small Gaussian noise from a fixed seed, so the
/// strategy stays deterministic.
fn svd_factors<T>(tensor: &DenseND<T>, rank: usize) -> Result<Vec<Array2<T>>, CpError>
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
    let normal = normal_distribution(SVD_PADDING_STD)?;
    let mut rng = StdRng::seed_from_u64(0);
    let mut factors = Vec::with_capacity(tensor.rank());

    for (mode, &mode_size) in tensor.shape().iter().enumerate() {
        let unfolded = tensor.unfold(mode).map_err(CpError::tensor)?;
        let (u, _s, _vt) = svd(&unfolded.view(), false, None)?;

        let available = rank.min(u.ncols());
        let mut factor = Array2::<T>::zeros((mode_size, rank));
        for i in 0..mode_size {
            for j in 0..rank {
                factor[[i, j]] = if j < available {
                    u[[i, j]]
                } else {
                    T::from(normal.sample(&mut rng)).unwrap_or_else(T::zero)
                };
            }
        }
        factors.push(factor);
    }

    Ok(factors)
}
