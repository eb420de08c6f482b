// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Owned relation representation exchanged with backends.

extern crate alloc;

use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::error::SchemaError;
use crate::schema::Schema;
use crate::value::Value;

/// One tuple of a relation.
///
/// Inline capacity covers a two-way product without spilling.
pub type Row = SmallVec<[Value; 6]>;

/// One occupied cell: row index, column index and value.
pub type Triple = (i64, i64, Value);

/// A schema plus rows of matching width.
///
/// Row order is the fetch order of whichever backend produced the relation. It carries no
/// meaning for equality but is preserved so exports are deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct Relation {
    schema: Schema,
    rows: Vec<Row>,
}

impl Relation {
    /// Creates a relation, checking every row against the schema width.
    pub fn new(schema: Schema, rows: Vec<Row>) -> Result<Self, SchemaError> {
        let expected = schema.len();
        if let Some(row) = rows.iter().find(|r| r.len() != expected) {
            return Err(SchemaError::RowWidth {
                expected,
                found: row.len(),
            });
        }
        Ok(Self { schema, rows })
    }

    /// Creates a relation with no rows.
    #[must_use]
    pub fn empty(schema: Schema) -> Self {
        Self {
            schema,
            rows: Vec::new(),
        }
    }

    /// Creates a canonical `i, j, v` relation from triples.
    pub fn from_triples<I>(triples: I) -> Self
    where
        I: IntoIterator<Item = Triple>,
    {
        let rows = triples
            .into_iter()
            .map(|(i, j, v)| Row::from_iter([Value::Int(i), Value::Int(j), v]))
            .collect();
        Self {
            schema: Schema::canonical(),
            rows,
        }
    }

    /// The schema.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Rows in fetch order.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Consumes the relation, returning its rows.
    #[must_use]
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.schema.len()
    }

    /// Replaces the schema, keeping rows. Widths must already agree.
    pub(crate) fn with_schema(self, schema: Schema) -> Self {
        debug_assert_eq!(schema.len(), self.schema.len(), "schema width changed");
        Self {
            schema,
            rows: self.rows,
        }
    }

    /// Reorders columns by position. `order[k]` is the source column of output column `k`.
    ///
    /// `order` must name one source column per column of `schema`, and every position must
    /// exist in this relation.
    pub fn reorder(&self, order: &[usize], schema: Schema) -> Result<Self, SchemaError> {
        if order.len() != schema.len() {
            return Err(SchemaError::RowWidth {
                expected: schema.len(),
                found: order.len(),
            });
        }
        if let Some(&position) = order.iter().find(|&&k| k >= self.arity()) {
            return Err(SchemaError::ColumnPosition {
                position,
                columns: self.arity(),
            });
        }
        let rows = self
            .rows
            .iter()
            .map(|r| order.iter().map(|&k| r[k].clone()).collect())
            .collect();
        Ok(Self { schema, rows })
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    fn cell_relation() -> Relation {
        Relation::new(
            Schema::new(["v", "i", "j"]),
            vec![Row::from_iter([Value::from("x"), Value::Int(2), Value::Int(5)])],
        )
        .unwrap()
    }

    #[test]
    fn reorder_moves_columns() {
        let out = cell_relation().reorder(&[1, 2, 0], Schema::canonical()).unwrap();
        assert_eq!(out.schema(), &Schema::canonical());
        assert_eq!(
            out.rows()[0].as_slice(),
            [Value::Int(2), Value::Int(5), Value::from("x")]
        );
    }

    #[test]
    fn reorder_rejects_short_order() {
        assert_eq!(
            cell_relation().reorder(&[0], Schema::canonical()),
            Err(SchemaError::RowWidth {
                expected: 3,
                found: 1
            })
        );
    }

    #[test]
    fn reorder_rejects_missing_position() {
        assert_eq!(
            cell_relation().reorder(&[0, 1, 3], Schema::canonical()),
            Err(SchemaError::ColumnPosition {
                position: 3,
                columns: 3
            })
        );
    }

    #[test]
    fn new_checks_row_width() {
        let err = Relation::new(Schema::canonical(), vec![Row::from_iter([Value::Int(0)])]);
        assert_eq!(
            err,
            Err(SchemaError::RowWidth {
                expected: 3,
                found: 1
            })
        );
    }
}
