//! Small matrix helpers shared by the kernels and the ALS engine

use scirs2_core::ndarray_ext::{Array1, ArrayView2};
use scirs2_core::numeric::Float;

/// Frobenius norm of a matrix: `sqrt(Σᵢⱼ aᵢⱼ²)`
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use parafac_kernels::frobenius_norm;
///
/// let a = array![[3.0, 0.0], [0.0, 4.0]];
/// assert_eq!(frobenius_norm(&a.view()), 5.0);
/// ```
pub fn frobenius_norm<T>(a: &ArrayView2<T>) -> T
where
    T: Float,
{
    a.iter().fold(T::zero(), |acc, &x| acc + x * x).sqrt()
}

/// Euclidean norm of every column
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use parafac_kernels::column_norms;
///
/// let a = array![[3.0, 1.0], [4.0, 0.0]];
/// assert_eq!(column_norms(&a.view()).to_vec(), vec![5.0, 1.0]);
/// ```
pub fn column_norms<T>(a: &ArrayView2<T>) -> Array1<T>
where
    T: Float,
{
    Array1::from_iter(
        a.columns()
            .into_iter()
            .map(|col| col.iter().fold(T::zero(), |acc, &x| acc + x * x).sqrt()),
    )
}
