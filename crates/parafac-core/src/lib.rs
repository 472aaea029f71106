//! # parafac-core
//!
//! Dense N-dimensional tensor type used by the PARAFAC decomposition stack.
//!
//! This crate provides the array capability the ALS engine is written against:
//!
//! - **Dense tensor representation** ([`DenseND`]) over `scirs2_core` arrays
//! - **Creation** of constant, zero, one and seeded random tensors
//! - **Shape operations** (reshape, permute) for tensor manipulation
//! - **Matricization** (unfold/fold and general [`DenseND::matricize`]) for
//!   the mode-n updates of CP-ALS
//! - **Norms and differences** for reconstruction error
//!
//! ## SciRS2 Integration
//!
//! All array storage, numeric traits and random number generation come from
//! `scirs2-core`. Direct use of `ndarray`, `rand` or `num-traits` is not
//! permitted in this workspace.
//!
//! ## Memory Layout
//!
//! Tensors use C-contiguous (row-major) layout: the last mode varies fastest.
//!
//! ## Quick Start
//!
//! ```
//! use parafac_core::DenseND;
//!
//! let tensor = DenseND::<f64>::ones(&[2, 3, 4]);
//! assert_eq!(tensor.shape(), &[2, 3, 4]);
//! assert_eq!(tensor.rank(), 3);
//!
//! // Mode-1 unfolding: mode 1 indexes rows, modes 0 and 2 the columns
//! let unfolded = tensor.unfold(1).unwrap();
//! assert_eq!(unfolded.shape(), &[3, 8]);
//!
//! // Custom column order: mode 2 slowest, mode 0 fastest
//! let m = tensor.matricize(1, &[2, 0]).unwrap();
//! assert_eq!(m.shape(), &[3, 8]);
//! ```
//!
//! ## Error Handling
//!
//! Shape operations return `anyhow::Result`:
//!
//! ```
//! use parafac_core::DenseND;
//!
//! let tensor = DenseND::<f64>::zeros(&[2, 3]);
//! assert!(tensor.reshape(&[7]).is_err());
//! assert!(tensor.unfold(10).is_err());
//! ```

#![deny(warnings)]

pub mod dense;


pub use dense::DenseND;
