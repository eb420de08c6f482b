// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The error type of table operations.

extern crate alloc;

use alloc::string::String;

use tessera_core::{BackendError, ExprError, SchemaError, Value};
use thiserror::Error;

/// Errors returned by table construction, operators and exports.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    /// A relation had the wrong shape for the operation.
    #[error(transparent)]
    Schema(#[from] SchemaError),
    /// The backend failed to evaluate a request.
    #[error(transparent)]
    Backend(BackendError),
    /// An operand cannot be combined with the other.
    #[error("invalid operand: {reason}")]
    InvalidOperand {
        /// What was wrong with the operand.
        reason: String,
    },
    /// A coordinate column held something other than an integer.
    #[error("coordinate {0:?} is not an integer")]
    Coordinate(Value),
    /// The dense grid spanning the table's cells does not fit in memory indices.
    #[error("grid of {rows} x {columns} cells is too large")]
    GridTooLarge {
        /// Row span.
        rows: u64,
        /// Column span.
        columns: u64,
    },
}

impl TableError {
    pub(crate) fn invalid_operand(reason: impl Into<String>) -> Self {
        Self::InvalidOperand {
            reason: reason.into(),
        }
    }
}

impl From<BackendError> for TableError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Schema(e) => Self::Schema(e),
            BackendError::ArityMismatch { op, left, right } => Self::InvalidOperand {
                reason: alloc::format!(
                    "{op} requires operands of equal width, got {left} and {right} columns"
                ),
            },
            other => Self::Backend(other),
        }
    }
}

impl From<ExprError> for TableError {
    fn from(err: ExprError) -> Self {
        Self::Backend(BackendError::Expr(err))
    }
}
