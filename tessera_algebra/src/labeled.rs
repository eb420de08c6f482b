// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Labeled two-dimensional arrays (dataframe-shaped input and output).

extern crate alloc;

use alloc::vec::Vec;

use tessera_core::Value;

/// A dense 2-D array with row and column labels.
///
/// Labels are carried for the caller's benefit; table coordinates come from positions in
/// `values`, never from labels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabeledArray {
    /// Row labels, one per row of `values`.
    pub index: Vec<Value>,
    /// Column labels, one per column of `values`.
    pub columns: Vec<Value>,
    /// Row-major cells.
    pub values: Vec<Vec<Value>>,
}

impl LabeledArray {
    /// Wraps row-major cells with positional integer labels.
    #[must_use]
    pub fn new(values: Vec<Vec<Value>>) -> Self {
        let width = values.iter().map(Vec::len).max().unwrap_or(0);
        Self {
            index: (0..).take(values.len()).map(Value::Int).collect(),
            columns: (0..).take(width).map(Value::Int).collect(),
            values,
        }
    }

    /// Replaces the row labels.
    #[must_use]
    pub fn with_index(mut self, index: Vec<Value>) -> Self {
        self.index = index;
        self
    }

    /// Replaces the column labels.
    #[must_use]
    pub fn with_columns(mut self, columns: Vec<Value>) -> Self {
        self.columns = columns;
        self
    }

    /// `(rows, columns)` of the cell array.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (
            self.values.len(),
            self.values.iter().map(Vec::len).max().unwrap_or(0),
        )
    }

    /// The cell at a position, if present.
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<&Value> {
        self.values.get(row)?.get(column)
    }
}

/// Options for building a table from a [`LabeledArray`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabeledOptions {
    /// Coordinate assigned to the first row and the first column.
    pub start: i64,
    /// Skip missing cells (`Null` or NaN).
    pub skip_na: bool,
}

impl LabeledOptions {
    /// Default options: start at 0 and skip missing cells.
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: 0,
            skip_na: true,
        }
    }

    /// Sets the starting coordinate.
    #[must_use]
    pub fn with_start(mut self, start: i64) -> Self {
        self.start = start;
        self
    }

    /// Sets whether missing cells are skipped.
    #[must_use]
    pub fn with_skip_na(mut self, skip_na: bool) -> Self {
        self.skip_na = skip_na;
        self
    }
}

impl Default for LabeledOptions {
    fn default() -> Self {
        Self::new()
    }
}
