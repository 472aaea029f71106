//! Error types for kernel operations
//!
//! Every kernel validates its operands and reports violations through
//! [`KernelError`] instead of panicking, so callers can surface exactly which
//! shape contract was broken.

use std::fmt;

/// Error type for tensor kernel operations
#[derive(Debug, Clone, PartialEq)]
pub enum KernelError {
    /// Operands must have identical shapes (Hadamard, element-wise ops)
    IncompatibleShapes {
        operation: String,
        shape_a: Vec<usize>,
        shape_b: Vec<usize>,
        reason: String,
    },

    /// Operands must share the same number of columns (Khatri-Rao)
    ColumnMismatch {
        operation: String,
        left_cols: usize,
        right_cols: usize,
    },

    /// Empty input not allowed
    EmptyInput {
        operation: String,
        parameter: String,
    },

    /// Mode index out of range
    InvalidMode {
        mode: usize,
        max_mode: usize,
        context: String,
    },

    /// Generic operation error with context (e.g. a failed SVD)
    OperationError { operation: String, message: String },
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::IncompatibleShapes {
                operation,
                shape_a,
                shape_b,
                reason,
            } => write!(
                f,
                "{}: incompatible shapes {:?} and {:?}: {}",
                operation, shape_a, shape_b, reason
            ),

            KernelError::ColumnMismatch {
                operation,
                left_cols,
                right_cols,
            } => write!(
                f,
                "{}: column count mismatch - left operand has {} columns, right operand has {}",
                operation, left_cols, right_cols
            ),

            KernelError::EmptyInput {
                operation,
                parameter,
            } => write!(
                f,
                "{}: empty input not allowed for parameter '{}'",
                operation, parameter
            ),

            KernelError::InvalidMode {
                mode,
                max_mode,
                context,
            } => write!(
                f,
                "Invalid mode {}: must be < {}. {}",
                mode, max_mode, context
            ),

            KernelError::OperationError { operation, message } => {
                write!(f, "{}: {}", operation, message)
            }
        }
    }
}

impl std::error::Error for KernelError {}

/// Result type for kernel operations
pub type KernelResult<T> = Result<T, KernelError>;

impl KernelError {
    /// Create an incompatible shapes error
    pub fn incompatible_shapes(
        operation: impl Into<String>,
        shape_a: Vec<usize>,
        shape_b: Vec<usize>,
        reason: impl Into<String>,
    ) -> Self {
        KernelError::IncompatibleShapes {
            operation: operation.into(),
            shape_a,
            shape_b,
            reason: reason.into(),
        }
    }

    /// Create a column mismatch error
    pub fn column_mismatch(operation: impl Into<String>, left_cols: usize, right_cols: usize) -> Self {
        KernelError::ColumnMismatch {
            operation: operation.into(),
            left_cols,
            right_cols,
        }
    }

    /// Create an empty input error
    pub fn empty_input(operation: impl Into<String>, parameter: impl Into<String>) -> Self {
        KernelError::EmptyInput {
            operation: operation.into(),
            parameter: parameter.into(),
        }
    }

    /// Create an invalid mode error
    pub fn invalid_mode(mode: usize, max_mode: usize, context: impl Into<String>) -> Self {
        KernelError::InvalidMode {
            mode,
            max_mode,
            context: context.into(),
        }
    }

    /// Create a generic operation error
    pub fn operation_error(operation: impl Into<String>, message: impl Into<String>) -> Self {
        KernelError::OperationError {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Whether this error reports violated operand shapes
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(
            self,
            KernelError::IncompatibleShapes { .. } | KernelError::ColumnMismatch { .. }
        )
    }
}
