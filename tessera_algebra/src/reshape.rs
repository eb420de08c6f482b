// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural edits: transposition, translation, concatenation, insertion and deletion.

use tessera_core::{Backend, col};

use crate::base::{product, project, union};
use crate::error::TableError;
use crate::locate::{
    Locator, above, below, bottom, column, left, leftmost, right, rightmost, row, top,
};
use crate::table::Table;

/// Swaps rows and columns.
pub fn transpose<B: Backend>(table: &Table<B>) -> Result<Table<B>, TableError> {
    table.require_canonical()?;
    project(table, &[col("j"), col("i"), col("v")])
}

/// Translates every cell by `di` rows and `dj` columns.
///
/// Fails with an overflow error if a coordinate leaves the `i64` range.
pub fn move_by<B: Backend>(table: &Table<B>, di: i64, dj: i64) -> Result<Table<B>, TableError> {
    table.require_canonical()?;
    project(table, &[col("i") + di, col("j") + dj, col("v")])
}

/// Translates the table so its top row and leftmost column sit at 0.
pub fn origin<B: Backend>(table: &Table<B>) -> Result<Table<B>, TableError> {
    let anchored = product(&product(table, &top(table)?)?, &leftmost(table)?)?;
    project(
        &anchored,
        &[col("i1") - col("i2"), col("j1") - col("j3"), col("v1")],
    )
}

/// Stacks `lower` directly beneath `upper`.
///
/// The top row of `lower` lands one row past the bottom row of `upper`; columns are unchanged.
/// If either table is empty the other is returned as is.
pub fn concat_vertically<B: Backend>(
    upper: &Table<B>,
    lower: &Table<B>,
) -> Result<Table<B>, TableError> {
    upper.require_canonical()?;
    lower.require_canonical()?;
    if upper.is_empty() {
        return Ok(lower.clone());
    }
    if lower.is_empty() {
        return Ok(upper.clone());
    }
    let anchored = product(&product(&bottom(upper)?, &top(lower)?)?, lower)?;
    let shifted = project(
        &anchored,
        &[
            col("i3") + (col("i1") - col("i2")) + 1,
            col("j3"),
            col("v3"),
        ],
    )?;
    union(upper, &shifted)
}

/// Places `right` directly to the right of `left`.
pub fn concat_horizontally<B: Backend>(
    left: &Table<B>,
    right: &Table<B>,
) -> Result<Table<B>, TableError> {
    transpose(&concat_vertically(&transpose(left)?, &transpose(right)?)?)
}

/// Translates `payload` so its leftmost column sits at `index`. Rows are unchanged.
fn columns_from<B: Backend>(payload: &Table<B>, index: i64) -> Result<Table<B>, TableError> {
    let anchored = product(payload, &leftmost(payload)?)?;
    project(
        &anchored,
        &[col("i1"), col("j1") - col("j2") + index, col("v1")],
    )
}

/// Translates `payload` so its top row sits at `index`. Columns are unchanged.
fn rows_from<B: Backend>(payload: &Table<B>, index: i64) -> Result<Table<B>, TableError> {
    let anchored = product(payload, &top(payload)?)?;
    project(
        &anchored,
        &[col("i1") - col("i2") + index, col("j1"), col("v1")],
    )
}

/// Inserts `payload` so that it starts at column `index`, pushing later columns right.
///
/// The payload is placed after the last column left of `index`. When nothing lies left of
/// `index` the payload is moved to start at column `index`.
pub fn insert_column<B: Backend>(
    table: &Table<B>,
    payload: &Table<B>,
    index: i64,
) -> Result<Table<B>, TableError> {
    let head = left(table, Locator::Index(index))?;
    let head = if head.is_empty() {
        columns_from(payload, index)?
    } else {
        concat_horizontally(&head, payload)?
    };
    let tail = right(table, Locator::Index(index.saturating_sub(1)))?;
    concat_horizontally(&head, &tail)
}

/// Inserts `payload` so that it starts at row `index`, pushing later rows down.
///
/// When nothing lies above `index` the payload is moved to start at row `index`.
pub fn insert_row<B: Backend>(
    table: &Table<B>,
    payload: &Table<B>,
    index: i64,
) -> Result<Table<B>, TableError> {
    let head = above(table, Locator::Index(index))?;
    let head = if head.is_empty() {
        rows_from(payload, index)?
    } else {
        concat_vertically(&head, payload)?
    };
    let tail = below(table, Locator::Index(index.saturating_sub(1)))?;
    concat_vertically(&head, &tail)
}

/// Removes column `index` and closes the gap.
///
/// When nothing lies left of `index`, the remaining columns shift left by one.
pub fn delete_column<B: Backend>(
    table: &Table<B>,
    index: i64,
) -> Result<Table<B>, TableError> {
    let head = left(table, Locator::Index(index))?;
    let tail = right(table, Locator::Index(index))?;
    if head.is_empty() {
        return move_by(&tail, 0, -1);
    }
    concat_horizontally(&head, &tail)
}

/// Removes row `index` and closes the gap.
///
/// When nothing lies above `index`, the remaining rows shift up by one.
pub fn delete_row<B: Backend>(table: &Table<B>, index: i64) -> Result<Table<B>, TableError> {
    let head = above(table, Locator::Index(index))?;
    let tail = below(table, Locator::Index(index))?;
    if head.is_empty() {
        return move_by(&tail, -1, 0);
    }
    concat_vertically(&head, &tail)
}

/// Inserts a copy of column `index` right after the original.
pub fn duplicate_column<B: Backend>(
    table: &Table<B>,
    index: i64,
) -> Result<Table<B>, TableError> {
    insert_column(table, &column(table, Locator::Index(index))?, index)
}

/// Inserts a copy of row `index` right after the original.
pub fn duplicate_row<B: Backend>(table: &Table<B>, index: i64) -> Result<Table<B>, TableError> {
    insert_row(table, &row(table, Locator::Index(index))?, index)
}

/// Row span of the table, paired with every cell.
///
/// Each output cell is `(bottom - top + 1, j, v)` for an input cell `(i, j, v)`. Cells that
/// share a column and a value collapse into one.
pub fn height<B: Backend>(table: &Table<B>) -> Result<Table<B>, TableError> {
    let spanned = product(&product(&top(table)?, &bottom(table)?)?, table)?;
    project(
        &spanned,
        &[col("i2") - col("i1") + 1, col("j3"), col("v3")],
    )
}

/// Column span of the table, paired with every cell.
///
/// Each output cell is `(rightmost - leftmost + 1, i, v)` for an input cell `(i, j, v)`.
pub fn width<B: Backend>(table: &Table<B>) -> Result<Table<B>, TableError> {
    let spanned = product(&product(&leftmost(table)?, &rightmost(table)?)?, table)?;
    project(
        &spanned,
        &[col("j2") - col("j1") + 1, col("i3"), col("v3")],
    )
}
