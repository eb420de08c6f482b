// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row and column lookups, half-plane slices and extremal queries.
//!
//! Lookups by index are plain selections. Lookups by value are self-joins: pair every cell with
//! every other, keep pairs whose first cell holds the value and whose second cell stands in the
//! wanted position relative to it, then project the second cell. Extremal queries are
//! anti-joins: a table minus every cell that has a strictly smaller (or larger) competitor.

use tessera_core::{Backend, CompareOp, Expr, Value, col, lit};

use crate::base::{difference, product, project, select};
use crate::error::TableError;
use crate::table::Table;

/// Where a lookup is anchored.
#[derive(Debug, Clone, PartialEq)]
pub enum Locator {
    /// Every cell holding this value is an anchor.
    Value(Value),
    /// A literal row or column index.
    Index(i64),
}

impl Locator {
    /// Anchors on cells holding `value`.
    #[must_use]
    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    /// Anchors on a literal index.
    #[must_use]
    pub fn index(index: i64) -> Self {
        Self::Index(index)
    }
}

#[derive(Debug, Clone, Copy)]
enum Axis {
    Row,
    Column,
}

impl Axis {
    fn name(self) -> &'static str {
        match self {
            Self::Row => "i",
            Self::Column => "j",
        }
    }

    fn of(self) -> Expr {
        col(self.name())
    }

    fn of_copy(self, n: usize) -> Expr {
        col(&alloc::format!("{}{n}", self.name()))
    }
}

/// `[i2, j2, v2]`: the second copy of a self-join.
pub(crate) fn second() -> [Expr; 3] {
    [col("i2"), col("j2"), col("v2")]
}

/// Cells whose `axis` coordinate stands in relation `op` to the anchor.
///
/// For a value anchor, the relation is to the coordinate of any cell holding the value.
fn locate<B: Backend>(
    table: &Table<B>,
    axis: Axis,
    op: CompareOp,
    at: Locator,
) -> Result<Table<B>, TableError> {
    table.require_canonical()?;
    match at {
        Locator::Index(k) => select(table, &axis.of().compare(op, lit(k))),
        Locator::Value(v) => {
            let pairs = product(table, table)?;
            let anchored = col("v1")
                .eq(v)
                .and(axis.of_copy(2).compare(op, axis.of_copy(1)));
            project(&select(&pairs, &anchored)?, &second())
        }
    }
}

/// Cells for which no other cell's `axis` coordinate stands in relation `op` to theirs.
fn extremal<B: Backend>(
    table: &Table<B>,
    axis: Axis,
    op: CompareOp,
) -> Result<Table<B>, TableError> {
    table.require_canonical()?;
    let pairs = product(table, table)?;
    let beaten = select(&pairs, &axis.of_copy(1).compare(op, axis.of_copy(2)))?;
    difference(table, &project(&beaten, &second())?)
}

/// The row at an index, or every row containing a cell with the value.
pub fn row<B: Backend>(table: &Table<B>, at: Locator) -> Result<Table<B>, TableError> {
    locate(table, Axis::Row, CompareOp::Eq, at)
}

/// The column at an index, or every column containing a cell with the value.
pub fn column<B: Backend>(table: &Table<B>, at: Locator) -> Result<Table<B>, TableError> {
    locate(table, Axis::Column, CompareOp::Eq, at)
}

/// Cells strictly above the index, or above any cell holding the value.
pub fn above<B: Backend>(table: &Table<B>, at: Locator) -> Result<Table<B>, TableError> {
    locate(table, Axis::Row, CompareOp::Lt, at)
}

/// Cells strictly below the index, or below any cell holding the value.
pub fn below<B: Backend>(table: &Table<B>, at: Locator) -> Result<Table<B>, TableError> {
    locate(table, Axis::Row, CompareOp::Gt, at)
}

/// Cells strictly left of the index, or left of any cell holding the value.
pub fn left<B: Backend>(table: &Table<B>, at: Locator) -> Result<Table<B>, TableError> {
    locate(table, Axis::Column, CompareOp::Lt, at)
}

/// Cells strictly right of the index, or right of any cell holding the value.
pub fn right<B: Backend>(table: &Table<B>, at: Locator) -> Result<Table<B>, TableError> {
    locate(table, Axis::Column, CompareOp::Gt, at)
}

/// The cells in the smallest occupied row.
///
/// Every cell tied at the minimum is kept.
pub fn top<B: Backend>(table: &Table<B>) -> Result<Table<B>, TableError> {
    extremal(table, Axis::Row, CompareOp::Lt)
}

/// The cells in the largest occupied row.
pub fn bottom<B: Backend>(table: &Table<B>) -> Result<Table<B>, TableError> {
    extremal(table, Axis::Row, CompareOp::Gt)
}

/// The cells in the smallest occupied column.
pub fn leftmost<B: Backend>(table: &Table<B>) -> Result<Table<B>, TableError> {
    extremal(table, Axis::Column, CompareOp::Lt)
}

/// The cells in the largest occupied column.
pub fn rightmost<B: Backend>(table: &Table<B>) -> Result<Table<B>, TableError> {
    extremal(table, Axis::Column, CompareOp::Gt)
}
