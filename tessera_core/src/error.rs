// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types shared by relations, expressions and backends.

extern crate alloc;

use alloc::sync::Arc;

use thiserror::Error;

/// A relation does not have the triple-grouped shape an operation requires.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The column count is not a multiple of 3.
    #[error("relation must have a column count that is a multiple of 3, got {columns}")]
    NotTriples {
        /// Offending column count.
        columns: usize,
    },
    /// A single `(i, j, v)` relation was required but the relation is tagged.
    #[error("expected a canonical (i, j, v) relation, got {arity} columns")]
    NotCanonical {
        /// Column count of the tagged relation.
        arity: usize,
    },
    /// A row does not match the width of its schema.
    #[error("row has {found} values but the schema has {expected} columns")]
    RowWidth {
        /// Schema width.
        expected: usize,
        /// Row width.
        found: usize,
    },
    /// A positional column reference is past the end of the relation.
    #[error("column position {position} is out of range for {columns} columns")]
    ColumnPosition {
        /// Requested position.
        position: usize,
        /// Column count of the relation.
        columns: usize,
    },
}

/// Evaluating an [`Expr`](crate::Expr) against a row failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExprError {
    /// The expression references a column the schema does not have.
    #[error("unknown column `{0}`")]
    UnknownColumn(Arc<str>),
    /// An operator was applied to operands it does not accept.
    #[error("type mismatch: {op} cannot be applied to {lhs} and {rhs}")]
    TypeMismatch {
        /// Operator symbol.
        op: &'static str,
        /// Kind of the left operand.
        lhs: &'static str,
        /// Kind of the right operand.
        rhs: &'static str,
    },
    /// Integer arithmetic overflowed.
    #[error("integer overflow in {op}")]
    Overflow {
        /// Operator symbol.
        op: &'static str,
    },
}

/// A backend could not execute a relational operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// Expression evaluation failed.
    #[error(transparent)]
    Expr(#[from] ExprError),
    /// The operation produced or received a malformed relation.
    #[error(transparent)]
    Schema(#[from] SchemaError),
    /// The operands of a set operation have different widths.
    #[error("{op} requires operands of equal width, got {left} and {right} columns")]
    ArityMismatch {
        /// Operation name.
        op: &'static str,
        /// Width of the left operand.
        left: usize,
        /// Width of the right operand.
        right: usize,
    },
}
