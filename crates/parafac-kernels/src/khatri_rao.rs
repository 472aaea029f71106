//! Khatri-Rao product (column-wise Kronecker product)
//!
//! For matrices A (I × K) and B (J × K), the Khatri-Rao product C = A ⊙ B has
//! size (I*J × K) where column k of C is the Kronecker product of column k of
//! A and column k of B. Row `i * J + j` of C holds `A[i, k] * B[j, k]`, so the
//! left operand's row index varies slowest.
//!
//! The 1×1 left operand `[[1]]` is the identity seed: `[[1]] ⊙ B = B` for any
//! column count. Folding from the seed gives the usual product of a whole
//! sequence of factor matrices.

use crate::error::{KernelError, KernelResult};
use scirs2_core::ndarray_ext::{Array2, ArrayView2};
use scirs2_core::numeric::Num;

/// Compute the Khatri-Rao product of two matrices
///
/// # Arguments
///
/// * `a` - Left matrix with shape (I, K), or the seed `[[1]]`
/// * `b` - Right matrix with shape (J, K)
///
/// # Errors
///
/// [`KernelError::ColumnMismatch`] if the column counts differ and `a` is not
/// the seed. Any other 1×1 operand is an ordinary one-column matrix.
///
/// A genuine 1×1 factor holding exactly one is indistinguishable from the
/// seed, so it is accepted against any column count.
///
/// # Complexity
///
/// Time: O(I * J * K)
/// Space: O(I * J * K)
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use parafac_kernels::khatri_rao;
///
/// let a = array![[1.0, 2.0], [3.0, 4.0]];
/// let b = array![[5.0, 6.0], [7.0, 8.0]];
/// let c = khatri_rao(&a.view(), &b.view()).unwrap();
/// assert_eq!(c.shape(), &[4, 2]);
///
/// // First column: [1*5, 1*7, 3*5, 3*7]
/// assert_eq!(c.column(0).to_vec(), vec![5.0, 7.0, 15.0, 21.0]);
/// ```
pub fn khatri_rao<T>(a: &ArrayView2<T>, b: &ArrayView2<T>) -> KernelResult<Array2<T>>
where
    T: Clone + Num,
{
    if a.dim() == (1, 1) && a[[0, 0]].is_one() {
        return Ok(b.to_owned());
    }

    let (i, k1) = a.dim();
    let (j, k2) = b.dim();

    if k1 != k2 {
        return Err(KernelError::column_mismatch("khatri_rao", k1, k2));
    }

    let mut result = Array2::<T>::zeros((i * j, k1));

    for col_idx in 0..k1 {
        let a_col = a.column(col_idx);
        let b_col = b.column(col_idx);
        let mut out_col = result.column_mut(col_idx);

        for (row_a_idx, a_val) in a_col.iter().enumerate() {
            for (row_b_idx, b_val) in b_col.iter().enumerate() {
                out_col[row_a_idx * j + row_b_idx] = a_val.clone() * b_val.clone();
            }
        }
    }

    Ok(result)
}

/// The 1×1 identity seed for [`khatri_rao_fold`]
pub fn khatri_rao_seed<T>() -> Array2<T>
where
    T: Clone + Num,
{
    Array2::<T>::ones((1, 1))
}

/// Left fold of [`khatri_rao`] over a sequence of matrices
///
/// Computes `((([[1]] ⊙ M₀) ⊙ M₁) ⊙ ...) ⊙ Mₖ`. The first matrix in the
/// sequence ends up with the slowest-varying row index. An empty sequence
/// returns the seed itself.
///
/// # Errors
///
/// [`KernelError::ColumnMismatch`] if the matrices disagree on column count.
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::Array2;
/// use parafac_kernels::khatri_rao_fold;
///
/// let a = Array2::<f64>::ones((3, 2));
/// let b = Array2::<f64>::ones((4, 2));
/// let c = Array2::<f64>::ones((5, 2));
/// let kr = khatri_rao_fold([a.view(), b.view(), c.view()]).unwrap();
/// assert_eq!(kr.shape(), &[60, 2]);
/// ```
pub fn khatri_rao_fold<'a, T, I>(matrices: I) -> KernelResult<Array2<T>>
where
    T: Clone + Num + 'a,
    I: IntoIterator<Item = ArrayView2<'a, T>>,
{
    matrices
        .into_iter()
        .try_fold(khatri_rao_seed::<T>(), |acc, m| khatri_rao(&acc.view(), &m))
}
