//! Configuration for [`crate::cp_als_with`]

use crate::init::InitStrategy;
use parafac_kernels::DEFAULT_PINV_RCOND;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What to do when a freshly updated factor column has zero norm
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DegeneratePolicy {
    /// Leave the column at zero, set its weight to zero and record it
    #[default]
    KeepZero,
    /// Abort with [`crate::CpError::DegenerateFactor`]
    Fail,
}

/// Options for a CP-ALS run
///
/// `tol` is the minimum cost decrease required to keep iterating. The default
/// of `0.0` continues for as long as the cost strictly decreases.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use parafac_decomp::{CpOptions, DegeneratePolicy, InitStrategy};
///
/// let opts = CpOptions::new(3, 50)
///     .with_init(InitStrategy::Uniform { seed: Some(7) })
///     .with_tol(1e-9)
///     .with_degenerate_policy(DegeneratePolicy::Fail)
///     .with_time_limit(Duration::from_secs(5));
/// assert_eq!(opts.rank, 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CpOptions {
    /// Number of rank-1 components
    pub rank: usize,
    /// Upper bound on full sweeps over all modes
    pub max_epochs: usize,
    /// Factor initialization
    pub init: InitStrategy,
    /// Minimum cost decrease per epoch to continue
    pub tol: f64,
    /// Relative singular-value cutoff for the pseudo-inverse
    pub pinv_rcond: f64,
    /// Handling of zero-norm factor columns
    pub degenerate_policy: DegeneratePolicy,
    /// Wall-clock budget, checked between epochs
    pub time_limit: Option<Duration>,
}

impl Default for CpOptions {
    fn default() -> Self {
        Self {
            rank: 1,
            max_epochs: 100,
            init: InitStrategy::default(),
            tol: 0.0,
            pinv_rcond: DEFAULT_PINV_RCOND,
            degenerate_policy: DegeneratePolicy::default(),
            time_limit: None,
        }
    }
}

impl CpOptions {
    /// Options with the given rank and epoch budget, defaults elsewhere
    pub fn new(rank: usize, max_epochs: usize) -> Self {
        Self {
            rank,
            max_epochs,
            ..Default::default()
        }
    }

    pub fn with_init(mut self, init: InitStrategy) -> Self {
        self.init = init;
        self
    }

    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    pub fn with_pinv_rcond(mut self, rcond: f64) -> Self {
        self.pinv_rcond = rcond;
        self
    }

    pub fn with_degenerate_policy(mut self, policy: DegeneratePolicy) -> Self {
        self.degenerate_policy = policy;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}
