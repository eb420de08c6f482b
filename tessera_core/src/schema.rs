// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Column naming and normalization.
//!
//! Every relation a table holds groups its columns in triples. With a single triple the columns
//! are named `i, j, v`; with `T >= 2` triples they are tagged `i1, j1, v1, ..., iT, jT, vT` in
//! left-to-right order. Normalization is a purely positional rename, which is what lets a
//! product of a relation with itself be filtered and re-projected without name collisions.

extern crate alloc;

use alloc::format;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::error::SchemaError;
use crate::relation::Relation;

const ATTRIBUTES: [&str; 3] = ["i", "j", "v"];

/// Ordered column names of a relation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Schema {
    columns: Vec<Arc<str>>,
}

impl Schema {
    /// Creates a schema from arbitrary column names.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// The canonical `i, j, v` schema.
    #[must_use]
    pub fn canonical() -> Self {
        Self::new(ATTRIBUTES)
    }

    /// The normalized schema for `tables` triples.
    ///
    /// One triple yields `i, j, v`; more yield `i1, j1, v1, i2, ...`.
    #[must_use]
    pub fn tagged(tables: usize) -> Self {
        if tables == 1 {
            return Self::canonical();
        }
        let columns = (1..=tables)
            .flat_map(|n| ATTRIBUTES.iter().map(move |a| format!("{a}{n}")))
            .map(Arc::<str>::from);
        Self::new(columns)
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` if there are no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column names in order.
    #[must_use]
    pub fn columns(&self) -> &[Arc<str>] {
        &self.columns
    }

    /// Position of a column by name.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| &**c == name)
    }

    /// Number of triples, or an error if the width is not a multiple of 3.
    pub fn tables(&self) -> Result<usize, SchemaError> {
        let columns = self.len();
        if columns == 0 || columns % 3 != 0 {
            return Err(SchemaError::NotTriples { columns });
        }
        Ok(columns / 3)
    }

    /// Returns `true` if this is exactly the `i, j, v` schema.
    #[must_use]
    pub fn is_canonical(&self) -> bool {
        self.columns.len() == 3
            && self
                .columns
                .iter()
                .zip(ATTRIBUTES)
                .all(|(c, a)| &**c == a)
    }

    /// If the columns are a permutation of `{i, j, v}`, returns the positions of `i`, `j` and
    /// `v` in that order.
    #[must_use]
    pub fn triple_permutation(&self) -> Option<[usize; 3]> {
        if self.columns.len() != 3 {
            return None;
        }
        let [i, j, v] = ATTRIBUTES.map(|a| self.index_of(a));
        Some([i?, j?, v?])
    }
}

/// Renames a relation's columns to the normalized triple sequence.
///
/// Rows are untouched; only the schema changes. Fails with [`SchemaError::NotTriples`] if the
/// column count is not a positive multiple of 3.
pub fn normalize(relation: Relation) -> Result<Relation, SchemaError> {
    let tables = relation.schema().tables()?;
    let schema = Schema::tagged(tables);
    if *relation.schema() == schema {
        return Ok(relation);
    }
    Ok(relation.with_schema(schema))
}
