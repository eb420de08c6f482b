// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The relation backend seam.

use core::fmt::Debug;

use crate::error::BackendError;
use crate::expr::Expr;
use crate::relation::Relation;

/// Binary set operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetOp {
    /// Concatenation keeping duplicates (`UNION ALL`).
    UnionAll,
    /// Rows of the left operand absent from the right (`EXCEPT`, set semantics).
    Except,
    /// Rows present in both operands (`INTERSECT`, set semantics).
    Intersect,
}

impl SetOp {
    /// Lowercase operation name, used in errors and logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::UnionAll => "union",
            Self::Except => "except",
            Self::Intersect => "intersect",
        }
    }
}

/// A set-oriented query engine the table algebra issues declarative requests to.
///
/// Implementations own the execution strategy; callers only rely on the result relations.
/// Column naming of results is positional: the algebra layer renames every result through
/// [`normalize`](crate::normalize), so a backend may label output columns however it likes as
/// long as the width and order are right.
///
/// Backends are cheap handles (`Clone`). Every table carries the handle it was built with, and
/// binary operations run on the left operand's backend.
pub trait Backend: Clone + Debug {
    /// Takes ownership of a client-side relation and returns the backend-native form.
    fn materialize(&self, relation: Relation) -> Result<Relation, BackendError>;

    /// Rows of `input` for which `predicate` evaluates to `true`.
    fn select(&self, input: &Relation, predicate: &Expr) -> Result<Relation, BackendError>;

    /// One output column per expression, duplicates removed.
    fn project(&self, input: &Relation, exprs: &[Expr]) -> Result<Relation, BackendError>;

    /// A set operation over two relations of equal width.
    fn set_op(&self, op: SetOp, left: &Relation, right: &Relation)
    -> Result<Relation, BackendError>;

    /// Cross product: every pairing of a left row with a right row, left columns first.
    fn product(&self, left: &Relation, right: &Relation) -> Result<Relation, BackendError>;
}
