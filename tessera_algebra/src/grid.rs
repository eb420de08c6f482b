// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversions between dense grids and sparse triples.

extern crate alloc;

use alloc::vec::Vec;

use hashbrown::HashSet;
use tessera_core::{Triple, Value};

use crate::error::TableError;

/// Options for building a table from a grid of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridOptions {
    /// Coordinate assigned to the first row and the first column.
    pub start: i64,
    /// Skip `Null` and empty-string cells instead of storing them.
    pub skip_blanks: bool,
}

impl GridOptions {
    /// Default options: start at 0 and skip blanks.
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: 0,
            skip_blanks: true,
        }
    }

    /// Sets the starting coordinate.
    #[must_use]
    pub fn with_start(mut self, start: i64) -> Self {
        self.start = start;
        self
    }

    /// Sets whether blank cells are skipped.
    #[must_use]
    pub fn with_skip_blanks(mut self, skip_blanks: bool) -> Self {
        self.skip_blanks = skip_blanks;
        self
    }
}

impl Default for GridOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Assigns positional coordinates to every cell, dropping the ones `skip` rejects.
pub(crate) fn grid_to_triples<R, C>(
    rows: R,
    start: i64,
    skip: impl Fn(&Value) -> bool,
) -> Vec<Triple>
where
    R: IntoIterator<Item = C>,
    C: IntoIterator,
    C::Item: Into<Value>,
{
    let mut out = Vec::new();
    for (i, row) in (start..).zip(rows) {
        for (j, cell) in (start..).zip(row) {
            let v = cell.into();
            if !skip(&v) {
                out.push((i, j, v));
            }
        }
    }
    out
}

/// Largest dense grid, in bytes of cell storage, that export will allocate.
const MAX_GRID_BYTES: usize = isize::MAX as usize;

fn span(lo: i64, hi: i64) -> Option<usize> {
    let n = hi.abs_diff(lo).checked_add(1)?;
    usize::try_from(n).ok()
}

/// Rebuilds a dense grid from triples.
///
/// The grid's top-left corner is `anchor` when given, otherwise the minimum row and column.
/// Cells above or left of the anchor are dropped. When two triples share a coordinate, the one
/// later in `triples` wins.
pub(crate) fn triples_to_grid(
    triples: &[Triple],
    fill: &Value,
    anchor: Option<(i64, i64)>,
) -> Result<Vec<Vec<Value>>, TableError> {
    let (i0, j0) = match anchor {
        Some(a) => a,
        None => {
            let (Some(i0), Some(j0)) = (
                triples.iter().map(|t| t.0).min(),
                triples.iter().map(|t| t.1).min(),
            ) else {
                return Ok(Vec::new());
            };
            (i0, j0)
        }
    };
    let inside: Vec<&Triple> = triples
        .iter()
        .filter(|(i, j, _)| *i >= i0 && *j >= j0)
        .collect();
    if inside.len() < triples.len() {
        log::warn!(
            "dropping {} cells above or left of the grid anchor ({i0}, {j0})",
            triples.len() - inside.len()
        );
    }
    let (Some(i1), Some(j1)) = (
        inside.iter().map(|t| t.0).max(),
        inside.iter().map(|t| t.1).max(),
    ) else {
        return Ok(Vec::new());
    };
    let too_large = || TableError::GridTooLarge {
        rows: i1.abs_diff(i0).saturating_add(1),
        columns: j1.abs_diff(j0).saturating_add(1),
    };
    let (Some(rows), Some(columns)) = (span(i0, i1), span(j0, j1)) else {
        return Err(too_large());
    };
    let bytes = rows
        .checked_mul(columns)
        .and_then(|cells| cells.checked_mul(size_of::<Value>()));
    if bytes.is_none_or(|b| b > MAX_GRID_BYTES) {
        return Err(too_large());
    }

    let mut grid = Vec::new();
    grid.try_reserve_exact(rows).map_err(|_| too_large())?;
    for _ in 0..rows {
        let mut line = Vec::new();
        line.try_reserve_exact(columns).map_err(|_| too_large())?;
        line.resize(columns, fill.clone());
        grid.push(line);
    }
    let mut written: HashSet<(i64, i64)> = HashSet::with_capacity(inside.len());
    for (i, j, v) in inside {
        if !written.insert((*i, *j)) {
            log::debug!("cell ({i}, {j}) is stored more than once; keeping the later value");
        }
        // Offsets are bounded by `rows`/`columns`, which already fit in usize.
        let (Some(r), Some(c)) = (span(i0, *i), span(j0, *j)) else {
            continue;
        };
        grid[r - 1][c - 1] = v.clone();
    }
    Ok(grid)
}
