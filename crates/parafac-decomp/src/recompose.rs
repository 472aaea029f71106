//! Reconstruction of a dense tensor from CP factors
//!
//! X̂ = Σᵣ λᵣ (a₁ᵣ ∘ a₂ᵣ ∘ ... ∘ aₙᵣ)

use crate::error::CpError;
use parafac_core::DenseND;
use parafac_kernels::weighted_outer_product;
use scirs2_core::ndarray_ext::{Array, Array1, Array2, IxDyn};
use scirs2_core::numeric::Float;

/// Rebuild a tensor of shape `shape` from factor matrices and weights
///
/// Components are accumulated in increasing order; each one is the outer
/// product of column `r` of every factor (mode order), scaled by `weights[r]`.
///
/// # Errors
///
/// [`CpError::ShapeMismatch`] if the factor list is empty, its length differs
/// from `shape.len()`, a factor's row count differs from its mode size, the
/// factors disagree on column count, or `weights.len()` differs from it.
///
/// # Complexity
///
/// Time: O(R × ∏ᵢ Iᵢ)
/// Space: O(∏ᵢ Iᵢ)
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::{array, Array2};
/// use parafac_decomp::recompose;
///
/// let factors = vec![Array2::<f64>::ones((2, 1)); 3];
/// let tensor = recompose(&factors, &array![2.0], &[2, 2, 2]).unwrap();
/// assert_eq!(tensor.shape(), &[2, 2, 2]);
/// assert!(tensor.iter().all(|&x| x == 2.0));
/// ```
pub fn recompose<T>(
    factors: &[Array2<T>],
    weights: &Array1<T>,
    shape: &[usize],
) -> Result<DenseND<T>, CpError>
where
    T: Float,
{
    let rank = check_model(factors, weights, shape)?;

    let mut acc = Array::<T, IxDyn>::zeros(IxDyn(shape));
    for r in 0..rank {
        let columns: Vec<_> = factors.iter().map(|f| f.column(r)).collect();
        let component = weighted_outer_product(&columns, weights[r])?;
        acc.zip_mut_with(&component, |out, &value| *out = *out + value);
    }

    Ok(DenseND::from_array(acc))
}

/// Validate factors and weights against `shape`, returning the rank
fn check_model<T>(
    factors: &[Array2<T>],
    weights: &Array1<T>,
    shape: &[usize],
) -> Result<usize, CpError> {
    if factors.is_empty() {
        return Err(CpError::ShapeMismatch(
            "cannot recompose from an empty factor list".to_string(),
        ));
    }
    if factors.len() != shape.len() {
        return Err(CpError::ShapeMismatch(format!(
            "{} factor matrices for a tensor with {} modes",
            factors.len(),
            shape.len()
        )));
    }

    let rank = factors[0].ncols();
    for (mode, (factor, &size)) in factors.iter().zip(shape).enumerate() {
        if factor.nrows() != size {
            return Err(CpError::ShapeMismatch(format!(
                "factor {} has {} rows, mode size is {}",
                mode,
                factor.nrows(),
                size
            )));
        }
        if factor.ncols() != rank {
            return Err(CpError::ShapeMismatch(format!(
                "factor {} has {} columns, factor 0 has {}",
                mode,
                factor.ncols(),
                rank
            )));
        }
    }
    if weights.len() != rank {
        return Err(CpError::ShapeMismatch(format!(
            "{} weights for rank {}",
            weights.len(),
            rank
        )));
    }

    Ok(rank)
}
