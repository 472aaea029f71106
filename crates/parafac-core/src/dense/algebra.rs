//! Frobenius norms
//!
//! No broadcasting: the distance requires identical shapes and reports a
//! mismatch instead of guessing.

use super::types::DenseND;
use scirs2_core::numeric::{Float, Num};
use std::iter::Sum;

impl<T> DenseND<T>
where
    T: Clone + Num,
{
    /// Frobenius norm: square root of the sum of squared elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use parafac_core::DenseND;
    ///
    /// let t = DenseND::from_vec(vec![3.0, 4.0], &[1, 2]).unwrap();
    /// assert!((t.frobenius_norm() - 5.0_f64).abs() < 1e-12);
    /// ```
    pub fn frobenius_norm(&self) -> T
    where
        T: Float + Sum,
    {
        self.data.iter().map(|&x| x * x).sum::<T>().sqrt()
    }

    /// Frobenius norm of `self - other` without allocating the difference.
    ///
    /// # Errors
    ///
    /// Returns an error if the shapes differ.
    pub fn frobenius_distance(&self, other: &Self) -> anyhow::Result<T>
    where
        T: Float + Sum,
    {
        if !self.same_shape(other) {
            anyhow::bail!(
                "Cannot compare tensors of shapes {:?} and {:?}",
                self.shape(),
                other.shape()
            );
        }
        let sum_sq: T = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(&a, &b)| (a - b) * (a - b))
            .sum();
        Ok(sum_sq.sqrt())
    }
}
