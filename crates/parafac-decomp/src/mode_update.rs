//! The mode-n least-squares update of CP-ALS
//!
//! With every factor but `Fₙ` held fixed, the optimal `Fₙ` solves the normal
//! equations
//!
//! ```text
//! Fₙ = X(n) · K · V⁺
//! K  = F_{N-1} ⊙ ... ⊙ F_{n+1} ⊙ F_{n-1} ⊙ ... ⊙ F₀     (Khatri-Rao)
//! V  = ∗_{i≠n} FᵢᵀFᵢ                                    (Hadamard of Grams)
//! ```
//!
//! `X(n) · K` is only correct when the unfolding's column index and the
//! Khatri-Rao row index flatten the other modes the same way. Both are driven
//! by [`ModeUpdate::other_modes`]: decreasing mode order, first listed mode
//! slowest.

use crate::error::CpError;
use parafac_core::DenseND;
use parafac_kernels::{gram, hadamard_inplace, khatri_rao_fold, pinv};
use scirs2_core::ndarray_ext::{Array2, ScalarOperand};
use scirs2_core::numeric::{Float, NumAssign};
use std::iter::Sum;

/// Update of one factor matrix inside an ALS sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeUpdate {
    mode: usize,
    n_modes: usize,
}

impl ModeUpdate {
    /// Update for `mode` of an `n_modes`-way tensor
    pub fn new(mode: usize, n_modes: usize) -> Self {
        debug_assert!(mode < n_modes);
        Self { mode, n_modes }
    }

    /// All updates of one sweep, in increasing mode order
    pub fn sweep(n_modes: usize) -> impl Iterator<Item = ModeUpdate> {
        (0..n_modes).map(move |mode| ModeUpdate::new(mode, n_modes))
    }

    pub fn mode(&self) -> usize {
        self.mode
    }

    /// Modes other than `self.mode()`, from `N-1` down to `0`
    ///
    /// This order fixes both the Khatri-Rao fold and the unfolding columns.
    pub fn other_modes(&self) -> impl Iterator<Item = usize> {
        let mode = self.mode;
        (0..self.n_modes).rev().filter(move |&m| m != mode)
    }

    /// `V = ones ∗ F₀ᵀF₀ ∗ ... ` over every mode but this one, in increasing order
    pub fn gram_hadamard<T>(&self, factors: &[Array2<T>]) -> Result<Array2<T>, CpError>
    where
        T: Float + 'static,
    {
        let rank = factors[self.mode].ncols();
        let mut v = Array2::<T>::ones((rank, rank));
        for (i, factor) in factors.iter().enumerate() {
            if i == self.mode {
                continue;
            }
            hadamard_inplace(&mut v.view_mut(), &gram(&factor.view()).view())?;
        }
        Ok(v)
    }

    /// Khatri-Rao product of the other factors in [`ModeUpdate::other_modes`] order
    ///
    /// A one-way tensor has no other modes; the empty product is then a
    /// `1 × rank` row of ones.
    pub fn khatri_rao<T>(&self, factors: &[Array2<T>]) -> Result<Array2<T>, CpError>
    where
        T: Float,
    {
        if self.n_modes == 1 {
            return Ok(Array2::ones((1, factors[self.mode].ncols())));
        }
        Ok(khatri_rao_fold(
            self.other_modes().map(|m| factors[m].view()),
        )?)
    }

    /// Mode-n unfolding with columns in [`ModeUpdate::other_modes`] order
    pub fn unfold<T>(&self, tensor: &DenseND<T>) -> Result<Array2<T>, CpError>
    where
        T: Float,
    {
        let col_modes: Vec<usize> = self.other_modes().collect();
        tensor
            .matricize(self.mode, &col_modes)
            .map_err(CpError::tensor)
    }

    /// Solve for the new (unnormalized) factor `X(n) · K · V⁺`
    ///
    /// `factors` must already hold the latest values of every other mode.
    pub fn solve<T>(
        &self,
        tensor: &DenseND<T>,
        factors: &[Array2<T>],
        rcond: f64,
    ) -> Result<Array2<T>, CpError>
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
        let v = self.gram_hadamard(factors)?;
        let v_pinv = pinv(&v.view(), rcond)?;
        let kr = self.khatri_rao(factors)?;
        let unfolded = self.unfold(tensor)?;

        if unfolded.ncols() != kr.nrows() {
            return Err(CpError::ShapeMismatch(format!(
                "mode-{} unfolding has {} columns, Khatri-Rao product has {} rows",
                self.mode,
                unfolded.ncols(),
                kr.nrows()
            )));
        }

        Ok(unfolded.dot(&kr).dot(&v_pinv))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recompose;
    use scirs2_core::ndarray_ext::{array, Array1};

    #[test]
    fn test_other_modes_order() {
        let update = ModeUpdate::new(1, 4);
        assert_eq!(update.other_modes().collect::<Vec<_>>(), vec![3, 2, 0]);

        let first = ModeUpdate::new(0, 3);
        assert_eq!(first.other_modes().collect::<Vec<_>>(), vec![2, 1]);

        let single = ModeUpdate::new(0, 1);
        assert_eq!(single.other_modes().count(), 0);
    }

    #[test]
    fn test_sweep_is_increasing() {
        let modes: Vec<usize> = ModeUpdate::sweep(3).map(|u| u.mode()).collect();
        assert_eq!(modes, vec![0, 1, 2]);
    }

    #[test]
    fn test_gram_hadamard_of_ones() {
        // FᵢᵀFᵢ of a 2×3 ones matrix is 2·ones(3,3); two such modes give 4·ones
        let factors = vec![Array2::<f64>::ones((2, 3)); 3];
        let v = ModeUpdate::new(0, 3).gram_hadamard(&factors).unwrap();
        assert!(v.iter().all(|&x| x == 4.0));
    }

    #[test]
    fn test_single_mode_uses_seed() {
        // One-way tensor: K = [[1]], V = ones
        let factors = vec![Array2::<f64>::ones((3, 1))];
        let update = ModeUpdate::new(0, 1);
        assert_eq!(update.khatri_rao(&factors).unwrap(), array![[1.0]]);
        assert_eq!(update.gram_hadamard(&factors).unwrap(), array![[1.0]]);
    }

    #[test]
    fn test_single_mode_higher_rank() {
        let factors = vec![Array2::<f64>::ones((3, 2))];
        let update = ModeUpdate::new(0, 1);
        assert_eq!(update.khatri_rao(&factors).unwrap(), Array2::<f64>::ones((1, 2)));

        // x · 1ᵀ · ones(2,2)⁺ splits the vector evenly over both columns
        let tensor = DenseND::from_vec(vec![1.0, 2.0, 3.0], &[3]).unwrap();
        let solved = update
            .solve(&tensor, &factors, parafac_kernels::DEFAULT_PINV_RCOND)
            .unwrap();
        assert_eq!(solved.dim(), (3, 2));
        for (i, row) in solved.rows().into_iter().enumerate() {
            for &x in row.iter() {
                assert!((x - (i as f64 + 1.0) / 2.0).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn test_solve_recovers_exact_factor() {
        let factors = vec![
            array![[1.0, 0.5], [0.2, 1.0], [0.3, -0.4]],
            array![[1.0, 0.0], [0.5, 1.0]],
            array![[0.7, 0.1], [0.2, 0.9], [1.0, 1.0], [0.0, 0.3]],
        ];
        let weights = Array1::<f64>::ones(2);
        let tensor = recompose(&factors, &weights, &[3, 2, 4]).unwrap();

        for update in ModeUpdate::sweep(3) {
            let solved = update
                .solve(&tensor, &factors, parafac_kernels::DEFAULT_PINV_RCOND)
                .unwrap();
            for (a, b) in solved.iter().zip(factors[update.mode()].iter()) {
                assert!((a - b).abs() < 1e-8, "mode {}: {} vs {}", update.mode(), a, b);
            }
        }
    }
}
