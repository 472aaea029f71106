//! Outer products for tensor construction
//!
//! For vectors v₁, v₂, ..., vₙ the outer product is the tensor
//! `T[i₁, i₂, ..., iₙ] = v₁[i₁] × v₂[i₂] × ... × vₙ[iₙ]`. Reconstructing a
//! CP model is a weighted sum of such tensors, one per component.

use crate::error::{KernelError, KernelResult};
use scirs2_core::ndarray_ext::{Array, ArrayView1, IxDyn};
use scirs2_core::numeric::Num;

/// Compute the outer product of multiple vectors to form an N-D tensor
///
/// The result has shape `[v₁.len(), ..., vₙ.len()]` in row-major order; the
/// last vector's index varies fastest.
///
/// # Errors
///
/// [`KernelError::EmptyInput`] if `vectors` is empty.
///
/// # Complexity
///
/// Time: O(∏ᵢ Iᵢ)
/// Space: O(∏ᵢ Iᵢ)
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use parafac_kernels::outer_product;
///
/// let v1 = array![1.0, 2.0];
/// let v2 = array![3.0, 4.0];
/// let v3 = array![5.0, 6.0];
///
/// let tensor = outer_product(&[v1.view(), v2.view(), v3.view()]).unwrap();
/// assert_eq!(tensor.shape(), &[2, 2, 2]);
/// assert_eq!(tensor[[1, 0, 1]], 36.0);  // 2*3*6
/// ```
pub fn outer_product<T>(vectors: &[ArrayView1<T>]) -> KernelResult<Array<T, IxDyn>>
where
    T: Clone + Num,
{
    weighted_outer_product(vectors, T::one())
}

/// Compute a scaled outer product `weight * (v₁ ∘ v₂ ∘ ... ∘ vₙ)`
///
/// The weight seeds the product chain, so it is applied once per element.
///
/// # Errors
///
/// [`KernelError::EmptyInput`] if `vectors` is empty.
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use parafac_kernels::weighted_outer_product;
///
/// let u = array![1.0, 2.0];
/// let v = array![3.0, 4.0, 5.0];
/// let m = weighted_outer_product(&[u.view(), v.view()], 0.5).unwrap();
/// assert_eq!(m.shape(), &[2, 3]);
/// assert_eq!(m[[1, 2]], 5.0);  // 0.5*2*5
/// ```
pub fn weighted_outer_product<T>(
    vectors: &[ArrayView1<T>],
    weight: T,
) -> KernelResult<Array<T, IxDyn>>
where
    T: Clone + Num,
{
    if vectors.is_empty() {
        return Err(KernelError::empty_input("outer_product", "vectors"));
    }

    let shape: Vec<usize> = vectors.iter().map(|v| v.len()).collect();
    let total: usize = shape.iter().product();

    let mut data = vec![weight];
    for v in vectors {
        let mut next = Vec::with_capacity(data.len() * v.len());
        for d in &data {
            for x in v.iter() {
                next.push(d.clone() * x.clone());
            }
        }
        data = next;
    }
    debug_assert_eq!(data.len(), total);

    Array::from_shape_vec(IxDyn(&shape), data)
        .map_err(|e| KernelError::operation_error("outer_product", e.to_string()))
}
