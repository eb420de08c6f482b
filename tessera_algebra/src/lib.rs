// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spreadsheet edits as relational algebra.
//!
//! A [`Table`] is a sparse set of `(i, j, v)` cells held by a relation [`Backend`]. Six base
//! operators act on tables:
//! - [`select`], [`project`] (with set semantics and column normalization),
//! - [`union`] (keeps duplicates), [`difference`], [`intersect`], and
//! - [`product`], whose result is a tagged `i1, j1, v1, i2, j2, v2` table.
//!
//! Every structural edit in this crate is a composition of those operators. Row and column
//! lookups by value are self-joins; "top row" or "leftmost column" are anti-joins that keep the
//! cells with no smaller competitor; concatenation translates one operand against the other's
//! extremal row; insertion and deletion split a table and concatenate the pieces.
//!
//! ```
//! use tessera_algebra::{Locator, Table, below, select};
//! use tessera_core::{Value, col};
//!
//! let t = Table::from_grid([
//!     ["desc", "a"],
//!     ["school", "b"],
//!     ["1", "2"],
//!     ["3", "4"],
//! ])?;
//!
//! let school = select(&t, &col("v").eq("school"))?;
//! assert_eq!(school.to_tuples()?, [(1, 0, Value::from("school"))]);
//!
//! let body = below(&t, Locator::value("school"))?;
//! assert_eq!(
//!     body.to_grid(Value::Null)?,
//!     [["1", "2"], ["3", "4"]].map(|r| r.map(Value::from).to_vec()).to_vec(),
//! );
//! # Ok::<(), tessera_algebra::TableError>(())
//! ```

#![no_std]

extern crate alloc;

mod algebra;
#[cfg(test)]
mod algebra_tests;
mod base;
mod error;
mod grid;
mod join;
mod labeled;
mod locate;
mod reshape;
mod table;

pub use base::{difference, intersect, product, project, select, union};
pub use error::TableError;
pub use grid::GridOptions;
pub use join::{align_rows, align_tops, concat_align_tops, fold, join_rows, match_values};
pub use labeled::{LabeledArray, LabeledOptions};
pub use locate::{
    Locator, above, below, bottom, column, left, leftmost, right, rightmost, row, top,
};
pub use reshape::{
    concat_horizontally, concat_vertically, delete_column, delete_row, duplicate_column,
    duplicate_row, height, insert_column, insert_row, move_by, origin, transpose, width,
};
pub use table::Table;

pub use tessera_core::{Backend, MemoryBackend};
