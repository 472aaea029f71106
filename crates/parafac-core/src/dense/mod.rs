//! Dense tensor implementation and operations
//!
//! The `DenseND` type lives in [`types`]; operations are grouped by concern
//! in private sub-modules that add inherent `impl` blocks.

pub mod types;

mod algebra;
mod creation;
mod shape_ops;

pub mod densend_traits;

pub use types::DenseND;
