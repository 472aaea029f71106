//! Kronecker product
//!
//! For matrices A (m×n) and B (p×q), the result C = A ⊗ B has size (mp×nq).
//! The ALS sweep only needs the column-wise variant ([`crate::khatri_rao`]);
//! the full product is kept for testing the Khatri-Rao identities against.

use scirs2_core::ndarray_ext::{s, Array2, ArrayView2};
use scirs2_core::numeric::Num;

/// Compute the Kronecker product of two matrices
///
/// The resulting matrix has the block structure:
/// ```text
/// [ a11*B  a12*B  ...  a1n*B ]
/// [ a21*B  a22*B  ...  a2n*B ]
/// [  ...    ...   ...   ...  ]
/// [ am1*B  am2*B  ...  amn*B ]
/// ```
///
/// # Complexity
///
/// Time: O(m * n * p * q)
/// Space: O(m * n * p * q)
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use parafac_kernels::kronecker;
///
/// let a = array![[1.0, 2.0], [3.0, 4.0]];
/// let b = array![[5.0, 6.0], [7.0, 8.0]];
/// let c = kronecker(&a.view(), &b.view());
/// assert_eq!(c.shape(), &[4, 4]);
/// assert_eq!(c[[0, 2]], 10.0);  // 2*5
/// assert_eq!(c[[3, 3]], 32.0);  // 4*8
/// ```
pub fn kronecker<T>(a: &ArrayView2<T>, b: &ArrayView2<T>) -> Array2<T>
where
    T: Clone + Num,
{
    let (m, n) = a.dim();
    let (p, q) = b.dim();

    let mut result = Array2::<T>::zeros((m * p, n * q));

    for ((i, j), a_val) in a.indexed_iter() {
        let mut block = result.slice_mut(s![i * p..(i + 1) * p, j * q..(j + 1) * q]);
        block.zip_mut_with(b, |out, b_val| {
            *out = a_val.clone() * b_val.clone();
        });
    }

    result
}
