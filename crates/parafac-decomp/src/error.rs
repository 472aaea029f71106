//! Error type for CP decomposition

use parafac_kernels::KernelError;
use scirs2_linalg::LinalgError;
use thiserror::Error;

/// Errors raised by the ALS engine, reconstruction and the error metric
#[derive(Error, Debug)]
pub enum CpError {
    #[error("Invalid rank: {0} (must be at least 1)")]
    InvalidRank(usize),

    #[error("Invalid epoch budget: {0} (must be at least 1)")]
    InvalidEpochs(usize),

    #[error("Invalid tolerance: {0}")]
    InvalidTolerance(f64),

    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// A factor column had zero (or non-finite) norm under [`crate::DegeneratePolicy::Fail`]
    #[error("Degenerate factor: component {component} of mode {mode} has zero norm")]
    DegenerateFactor { mode: usize, component: usize },

    #[error("Reconstruction error became non-finite at epoch {epoch}")]
    NonFiniteCost { epoch: usize },

    #[error("Kernel error: {0}")]
    Kernel(#[from] KernelError),

    #[error("Linear algebra error: {0}")]
    Linalg(#[from] LinalgError),

    /// Failure reported by a `DenseND` shape operation
    #[error("Tensor error: {0}")]
    Tensor(String),
}

impl CpError {
    /// Whether this error reports inconsistent shapes, from the engine or a kernel
    pub fn is_shape_mismatch(&self) -> bool {
        match self {
            CpError::ShapeMismatch(_) => true,
            CpError::Kernel(e) => e.is_shape_mismatch(),
            _ => false,
        }
    }

    pub(crate) fn tensor(err: anyhow::Error) -> Self {
        CpError::Tensor(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_errors_convert() {
        let err: CpError = KernelError::column_mismatch("khatri_rao", 2, 3).into();
        assert!(err.is_shape_mismatch());
        assert!(err.to_string().contains("khatri_rao"));
    }

    #[test]
    fn test_shape_mismatch_classification() {
        assert!(CpError::ShapeMismatch("x".into()).is_shape_mismatch());
        assert!(!CpError::InvalidRank(0).is_shape_mismatch());
        assert!(!CpError::Kernel(KernelError::empty_input("outer_product", "vectors"))
            .is_shape_mismatch());
    }

    #[test]
    fn test_degenerate_factor_display() {
        let err = CpError::DegenerateFactor {
            mode: 1,
            component: 2,
        };
        assert_eq!(
            err.to_string(),
            "Degenerate factor: component 2 of mode 1 has zero norm"
        );
    }
}
