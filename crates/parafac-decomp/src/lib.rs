//! # parafac-decomp - CP decomposition via Alternating Least Squares
//!
//! Factorizes an N-way dense tensor into a weighted sum of rank-1 components:
//!
//! ```text
//! X ≈ Σᵣ λᵣ (a₁ᵣ ∘ a₂ᵣ ∘ ... ∘ aₙᵣ)
//! ```
//!
//! **Entry points:**
//! - [`decompose`]: constant-1 initialization, default stopping rule
//! - [`cp_als`]: choice of [`InitStrategy`]
//! - [`cp_als_with`]: full control through [`CpOptions`]
//! - [`recompose`]: rebuild a tensor from factors and weights
//! - [`frobenius_error`]: reconstruction error metric
//!
//! ## Quick Start
//!
//! ```
//! use parafac_core::DenseND;
//! use parafac_decomp::{decompose, frobenius_error, StopReason};
//!
//! let tensor = DenseND::<f64>::ones(&[2, 2, 2]);
//! let cp = decompose(&tensor, 3, 20)?;
//!
//! println!("error {:.3e} after {} epochs ({:?})", cp.error, cp.epochs, cp.stop_reason);
//!
//! let approx = cp.reconstruct(tensor.shape())?;
//! assert_eq!(approx.shape(), &[2, 2, 2]);
//! assert!((frobenius_error(&tensor, &approx)? - cp.error).abs() < 1e-12);
//! # Ok::<(), parafac_decomp::CpError>(())
//! ```
//!
//! ## Stopping rule
//!
//! An epoch updates every mode once and then measures the Frobenius error.
//! Iteration continues while the error decreased by more than
//! [`CpOptions::tol`] (default `0`) and fewer than `max_epochs` epochs ran.
//! Running out of epochs is a normal outcome reported as
//! [`StopReason::EpochBudgetExhausted`].
//!
//! ## Logging
//!
//! Progress is reported through `tracing`. Enable output with
//! [`tracing_support::init_tracing`] or any other subscriber.
//!
//! ## SciRS2 Integration
//!
//! All array operations use `scirs2_core::ndarray_ext` and all SVDs come from
//! `scirs2_linalg`.

#![deny(warnings)]

pub mod cp;
pub mod error;
pub mod init;
pub mod metric;
pub mod mode_update;
pub mod options;
pub mod recompose;
pub mod tracing_support;

#[cfg(test)]
mod property_tests;

pub use cp::*;
pub use error::CpError;
pub use init::{initialize_factors, InitStrategy};
pub use metric::frobenius_error;
pub use mode_update::ModeUpdate;
pub use options::{CpOptions, DegeneratePolicy};
pub use recompose::recompose;
