//! # parafac - CANDECOMP/PARAFAC tensor decomposition
//!
//! This is the **meta crate** that re-exports the parafac components for
//! convenient access.
//!
//! ## Quick Start
//!
//! ```
//! use parafac::prelude::*;
//!
//! let tensor = DenseND::<f64>::ones(&[2, 2, 2]);
//! let cp = decompose(&tensor, 3, 20)?;
//!
//! assert!(cp.epochs <= 20);
//! assert!(cp.error < 1e-8);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Components
//!
//! ### Dense Tensors ([`core`])
//!
//! The N-way tensor type with reshape, permute and matricization.
//!
//! ```
//! use parafac::core::DenseND;
//!
//! let tensor = DenseND::<f64>::ones(&[2, 3, 4]);
//! let x1 = tensor.matricize(1, &[2, 0]).unwrap();
//! assert_eq!(x1.shape(), &[3, 8]);
//! ```
//!
//! ### Kernels ([`kernels`])
//!
//! Khatri-Rao, Kronecker, Hadamard, Gram, pseudo-inverse and outer products.
//!
//! ```
//! use parafac::kernels::khatri_rao;
//! use scirs2_core::ndarray_ext::Array2;
//!
//! let a = Array2::<f64>::ones((10, 5));
//! let b = Array2::<f64>::ones((8, 5));
//! let kr = khatri_rao(&a.view(), &b.view()).unwrap();
//! assert_eq!(kr.shape(), &[80, 5]);
//! ```
//!
//! ### CP-ALS ([`decomp`])
//!
//! The alternating least squares engine, initialization strategies,
//! recomposition and the reconstruction error metric.
//!
//! ```
//! use parafac::core::DenseND;
//! use parafac::decomp::{cp_als_with, CpOptions, InitStrategy, StopReason};
//!
//! let tensor = DenseND::<f64>::random_uniform_seeded(&[6, 6, 6], 0.0, 1.0, 1);
//! let options = CpOptions::new(3, 50)
//!     .with_init(InitStrategy::Svd)
//!     .with_tol(1e-10);
//! let cp = cp_als_with(&tensor, &options).unwrap();
//! assert!(cp.epochs <= 50);
//! assert!(matches!(
//!     cp.stop_reason,
//!     StopReason::Converged | StopReason::EpochBudgetExhausted
//! ));
//! ```
//!
//! ## Features
//!
//! - `tracing-subscriber` (default): [`decomp::tracing_support::init_tracing`]
//!   installs a log subscriber
//! - `serde`: Serialize options and run reports

#![deny(warnings)]

pub use parafac_core as core;
pub use parafac_decomp as decomp;
pub use parafac_kernels as kernels;

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! # Example
    //!
    //! ```
    //! use parafac::prelude::*;
    //!
    //! let tensor = DenseND::<f64>::zeros(&[3, 4, 5]);
    //! let options = CpOptions::new(2, 10).with_degenerate_policy(DegeneratePolicy::KeepZero);
    //! let cp = cp_als_with(&tensor, &options).unwrap();
    //! assert_eq!(cp.error, 0.0);
    //! ```

    // Core types
    pub use crate::core::DenseND;

    // Decomposition
    pub use crate::decomp::{
        cp_als, cp_als_with, decompose, frobenius_error, recompose, CpDecomp, CpError, CpOptions,
        DegenerateColumn, DegeneratePolicy, InitStrategy, StopReason,
    };

    // Common kernels
    pub use crate::kernels::{gram, hadamard, khatri_rao, khatri_rao_fold, kronecker, pinv};
}
