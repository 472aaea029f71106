//! Hadamard (element-wise) product
//!
//! For matrices A and B of the same shape, C = A ⊙ B where c_ij = a_ij * b_ij.
//! CP-ALS uses it to combine the Gram matrices of all factor matrices but one.
//!
//! # SciRS2 Integration
//!
//! All array operations use `scirs2_core::ndarray_ext`.

use crate::error::{KernelError, KernelResult};
use scirs2_core::ndarray_ext::{Array2, ArrayView2, ArrayViewMut2, Zip};
use scirs2_core::numeric::Num;

/// Compute the Hadamard (element-wise) product of two matrices
///
/// # Arguments
///
/// * `a` - First matrix with shape (m, n)
/// * `b` - Second matrix with shape (m, n)
///
/// # Errors
///
/// [`KernelError::IncompatibleShapes`] if the shapes differ. No broadcasting
/// is performed.
///
/// # Complexity
///
/// Time: O(m * n)
/// Space: O(m * n)
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use parafac_kernels::hadamard;
///
/// let a = array![[1.0, 2.0], [3.0, 4.0]];
/// let b = array![[5.0, 6.0], [7.0, 8.0]];
/// let c = hadamard(&a.view(), &b.view()).unwrap();
/// assert_eq!(c[[0, 0]], 5.0);   // 1*5
/// assert_eq!(c[[1, 1]], 32.0);  // 4*8
/// ```
pub fn hadamard<T>(a: &ArrayView2<T>, b: &ArrayView2<T>) -> KernelResult<Array2<T>>
where
    T: Clone + Num,
{
    check_same_shape(a.shape(), b.shape())?;
    Ok(a * b)
}

/// In-place Hadamard product: `a = a ⊙ b`
///
/// # Errors
///
/// [`KernelError::IncompatibleShapes`] if the shapes differ; `a` is left
/// untouched in that case.
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use parafac_kernels::hadamard_inplace;
///
/// let mut a = array![[1.0, 2.0], [3.0, 4.0]];
/// let b = array![[5.0, 6.0], [7.0, 8.0]];
/// hadamard_inplace(&mut a.view_mut(), &b.view()).unwrap();
/// assert_eq!(a[[0, 1]], 12.0);
/// ```
pub fn hadamard_inplace<T>(a: &mut ArrayViewMut2<T>, b: &ArrayView2<T>) -> KernelResult<()>
where
    T: Clone + Num,
{
    check_same_shape(a.shape(), b.shape())?;
    Zip::from(&mut *a).and(b).for_each(|a_elem, b_elem| {
        *a_elem = a_elem.clone() * b_elem.clone();
    });
    Ok(())
}

fn check_same_shape(shape_a: &[usize], shape_b: &[usize]) -> KernelResult<()> {
    if shape_a != shape_b {
        return Err(KernelError::incompatible_shapes(
            "hadamard",
            shape_a.to_vec(),
            shape_b.to_vec(),
            "Element-wise multiplication requires same shape",
        ));
    }
    Ok(())
}
