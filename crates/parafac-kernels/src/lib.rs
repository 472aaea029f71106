//! # parafac-kernels
//!
//! Matrix kernels behind CP-ALS (CANDECOMP/PARAFAC via Alternating Least
//! Squares).
//!
//! ## Overview
//!
//! Each ALS mode update needs a small, fixed set of operations:
//!
//! - **Hadamard product** - element-wise product of the factor Gram matrices
//! - **Gram matrix** - `FᵀF` for each factor matrix
//! - **Pseudo-inverse** - Moore–Penrose inverse of the combined Gram matrix,
//!   tolerant of singular and rank-deficient systems
//! - **Khatri-Rao product** - column-wise Kronecker product of the other
//!   factors, folded from a 1×1 seed
//! - **Outer product** - rank-1 tensors for reconstruction
//!
//! The full **Kronecker product** is included as the reference the
//! Khatri-Rao identities are checked against.
//!
//! ## Quick Start
//!
//! ```rust
//! use scirs2_core::ndarray_ext::Array2;
//! use parafac_kernels::{gram, hadamard, khatri_rao_fold, pinv, DEFAULT_PINV_RCOND};
//!
//! let a = Array2::<f64>::ones((3, 2));
//! let b = Array2::<f64>::ones((4, 2));
//!
//! // Khatri-Rao of a sequence of factors
//! let kr = khatri_rao_fold([a.view(), b.view()]).unwrap();
//! assert_eq!(kr.shape(), &[12, 2]);
//!
//! // Normal-equation matrix and its pseudo-inverse
//! let v = hadamard(&gram(&a.view()).view(), &gram(&b.view()).view()).unwrap();
//! let v_pinv = pinv(&v.view(), DEFAULT_PINV_RCOND).unwrap();
//! assert_eq!(v_pinv.shape(), &[2, 2]);
//! ```
//!
//! ## Errors
//!
//! Kernels never panic on bad operands; they return [`KernelError`] through
//! [`KernelResult`].
//!
//! ## SciRS2 Integration
//!
//! This crate uses `scirs2-core` for all array operations and `scirs2-linalg`
//! for the SVD. Direct use of `ndarray`, `rand`, or `num-traits` is not
//! permitted.

#![deny(warnings)]

pub mod error;
pub mod hadamard;
pub mod khatri_rao;
pub mod kronecker;
pub mod linalg;
pub mod outer;
pub mod utils;


// Re-exports
pub use error::{KernelError, KernelResult};
pub use hadamard::*;
pub use khatri_rao::*;
pub use kronecker::*;
pub use linalg::*;
pub use outer::*;
pub use utils::*;
