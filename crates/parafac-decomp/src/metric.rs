//! Reconstruction error metric

use crate::error::CpError;
use parafac_core::DenseND;
use scirs2_core::numeric::Float;
use std::iter::Sum;

/// Frobenius norm of the difference `a - b`
///
/// # Errors
///
/// [`CpError::ShapeMismatch`] if the shapes differ. No broadcasting.
///
/// # Examples
///
/// ```
/// use parafac_core::DenseND;
/// use parafac_decomp::frobenius_error;
///
/// let a = DenseND::<f64>::ones(&[2, 2]);
/// let b = DenseND::<f64>::zeros(&[2, 2]);
/// assert_eq!(frobenius_error(&a, &b).unwrap(), 2.0);
///
/// let c = DenseND::<f64>::zeros(&[3, 3]);
/// assert!(frobenius_error(&a, &c).is_err());
/// ```
pub fn frobenius_error<T>(a: &DenseND<T>, b: &DenseND<T>) -> Result<T, CpError>
where
    T: Float + Sum,
{
    if !a.same_shape(b) {
        return Err(CpError::ShapeMismatch(format!(
            "cannot compare tensors of shapes {:?} and {:?}",
            a.shape(),
            b.shape()
        )));
    }
    a.frobenius_distance(b).map_err(CpError::tensor)
}
