// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Joins between tables: value matching, row alignment and folding.

use tessera_core::{Backend, col, lit};

use crate::base::{product, project, select};
use crate::error::TableError;
use crate::locate::top;
use crate::reshape::{concat_horizontally, origin, width};
use crate::table::Table;

/// Pairs every cell of `left` with every cell of `right` holding an equal value.
///
/// The result is tagged: `i1, j1, v1` from `left` and `i2, j2, v2` from `right`.
pub fn match_values<B: Backend>(
    left: &Table<B>,
    right: &Table<B>,
) -> Result<Table<B>, TableError> {
    left.require_canonical()?;
    right.require_canonical()?;
    select(&product(left, right)?, &col("v1").eq(col("v2")))
}

/// Moves each row of `table` to the row it is matched with.
///
/// `matching` pairs rows of some other table (`i1`) with rows of `table` (`i2`), as produced by
/// [`match_values`]. A row of `table` matched several times is copied to every partner row;
/// unmatched rows are dropped.
pub fn align_rows<B: Backend>(
    matching: &Table<B>,
    table: &Table<B>,
) -> Result<Table<B>, TableError> {
    if matching.arity() != 6 {
        return Err(TableError::invalid_operand(alloc::format!(
            "row matching must pair two tables (6 columns), got {} columns",
            matching.arity()
        )));
    }
    table.require_canonical()?;
    let paired = select(&product(matching, table)?, &col("i2").eq(col("i3")))?;
    project(&paired, &[col("i1"), col("j3"), col("v3")])
}

/// Appends the rows of `right` to the right of the `left` rows they are matched with.
pub fn join_rows<B: Backend>(
    matching: &Table<B>,
    left: &Table<B>,
    right: &Table<B>,
) -> Result<Table<B>, TableError> {
    concat_horizontally(left, &align_rows(matching, right)?)
}

/// Translates `table` vertically so its top row lines up with the top row of `anchor`.
pub fn align_tops<B: Backend>(
    anchor: &Table<B>,
    table: &Table<B>,
) -> Result<Table<B>, TableError> {
    let tops = product(&product(&top(anchor)?, &top(table)?)?, table)?;
    project(
        &tops,
        &[col("i1") + (col("i3") - col("i2")), col("j3"), col("v3")],
    )
}

/// Places `right` to the right of `left` with their top rows aligned.
pub fn concat_align_tops<B: Backend>(
    left: &Table<B>,
    right: &Table<B>,
) -> Result<Table<B>, TableError> {
    concat_horizontally(left, &align_tops(left, right)?)
}

/// Unpivots a cross-tab into a tall three-column table.
///
/// `indices` holds the row labels (one column), `columns` the column labels (one row) and
/// `values` the body. Every body cell becomes one output row `[index, column, value]`, ordered
/// row-major through the body.
pub fn fold<B: Backend>(
    indices: &Table<B>,
    columns: &Table<B>,
    values: &Table<B>,
) -> Result<Table<B>, TableError> {
    let labels = product(
        &product(&origin(indices)?, &origin(columns)?)?,
        &width(columns)?,
    )?;
    let position = col("i1") * col("i3") + col("j2");
    let index_labels = project(&labels, &[position.clone(), lit(0), col("v1")])?;
    let column_labels = project(&labels, &[position, lit(0), col("v2")])?;

    let body = product(&origin(values)?, &width(values)?)?;
    let cells = project(&body, &[col("i1") * col("i2") + col("j1"), lit(0), col("v1")])?;

    concat_horizontally(&concat_horizontally(&index_labels, &column_labels)?, &cells)
}
