// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The table entity and its conversions.

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashSet;
use tessera_core::{
    Backend, MemoryBackend, Relation, Row, Schema, SchemaError, Triple, Value, normalize,
};

use crate::error::TableError;
use crate::grid::{GridOptions, grid_to_triples, triples_to_grid};
use crate::labeled::{LabeledArray, LabeledOptions};

/// An immutable sparse table of `(i, j, v)` cells.
///
/// A table owns one normalized relation: canonical (`i, j, v`) for anything built from a grid,
/// or tagged (`i1, j1, v1, i2, ...`) for the result of a [`product`](crate::product) and of
/// selections over it. Operators never mutate their inputs; each returns a new table on the
/// left operand's backend.
///
/// Equality is set equality of rows: order and duplicate multiplicity are ignored.
#[derive(Clone, Debug)]
pub struct Table<B: Backend = MemoryBackend> {
    backend: B,
    relation: Relation,
}

impl Table {
    /// Builds a table from rows of cells on the in-memory backend, skipping blank cells.
    pub fn from_grid<R, C>(rows: R) -> Result<Self, TableError>
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<Value>,
    {
        Self::from_grid_with(MemoryBackend, rows, GridOptions::new())
    }

    /// Builds a table from a labeled array on the in-memory backend, skipping missing cells.
    pub fn from_labeled_array(array: &LabeledArray) -> Result<Self, TableError> {
        Self::from_labeled_array_with(MemoryBackend, array, LabeledOptions::new())
    }

    /// Adopts a relation on the in-memory backend.
    ///
    /// See [`Table::from_relation_with`].
    pub fn from_relation(relation: Relation) -> Result<Self, TableError> {
        Self::from_relation_with(MemoryBackend, relation)
    }

    /// Builds a canonical table directly from triples on the in-memory backend.
    pub fn from_triples<I>(triples: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = Triple>,
    {
        Self::from_triples_with(MemoryBackend, triples)
    }
}

impl<B: Backend> Table<B> {
    /// Builds a table from rows of cells.
    ///
    /// Cell `(r, c)` of the grid lands at `(start + r, start + c)`.
    pub fn from_grid_with<R, C>(
        backend: B,
        rows: R,
        options: GridOptions,
    ) -> Result<Self, TableError>
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<Value>,
    {
        let skip_blanks = options.skip_blanks;
        let triples = grid_to_triples(rows, options.start, |v| skip_blanks && v.is_blank());
        Self::from_triples_with(backend, triples)
    }

    /// Builds a table from a labeled array. Coordinates come from positions, not labels.
    pub fn from_labeled_array_with(
        backend: B,
        array: &LabeledArray,
        options: LabeledOptions,
    ) -> Result<Self, TableError> {
        let skip_na = options.skip_na;
        let triples = grid_to_triples(
            array.values.iter().map(|r| r.iter().cloned()),
            options.start,
            |v| skip_na && v.is_na(),
        );
        Self::from_triples_with(backend, triples)
    }

    /// Adopts a relation.
    ///
    /// A relation whose columns are a permutation of `i, j, v` is reordered to `i, j, v`. Any
    /// other relation is normalized positionally, which fails with [`SchemaError::NotTriples`]
    /// unless its width is a positive multiple of 3.
    pub fn from_relation_with(backend: B, relation: Relation) -> Result<Self, TableError> {
        let relation = match relation.schema().triple_permutation() {
            Some(order) if !relation.schema().is_canonical() => {
                relation.reorder(&order, Schema::canonical())?
            }
            _ => relation,
        };
        Self::wrap(backend, relation)
    }

    /// Builds a canonical table directly from triples.
    pub fn from_triples_with<I>(backend: B, triples: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = Triple>,
    {
        Self::wrap(backend, Relation::from_triples(triples))
    }

    /// Normalizes a relation and hands it to the backend.
    pub(crate) fn wrap(backend: B, relation: Relation) -> Result<Self, TableError> {
        let relation = backend.materialize(normalize(relation)?)?;
        Ok(Self { backend, relation })
    }

    /// The backend this table runs on.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The underlying relation.
    #[must_use]
    pub fn relation(&self) -> &Relation {
        &self.relation
    }

    /// Rows in backend fetch order.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        self.relation.rows()
    }

    /// Number of stored rows (cells, for a canonical table).
    #[must_use]
    pub fn len(&self) -> usize {
        self.relation.len()
    }

    /// Returns `true` if no rows are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.relation.is_empty()
    }

    /// Column count: 3 for a canonical table, `3 * T` for a tagged one.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.relation.arity()
    }

    /// Returns `true` if this table holds a single `(i, j, v)` relation.
    #[must_use]
    pub fn is_canonical(&self) -> bool {
        self.relation.schema().is_canonical()
    }

    /// Fails unless this table is canonical.
    pub(crate) fn require_canonical(&self) -> Result<(), TableError> {
        if self.is_canonical() {
            Ok(())
        } else {
            Err(SchemaError::NotCanonical {
                arity: self.arity(),
            }
            .into())
        }
    }

    /// The triples in backend fetch order.
    pub fn to_tuples(&self) -> Result<Vec<Triple>, TableError> {
        self.require_canonical()?;
        self.rows()
            .iter()
            .map(|r| {
                let i = r[0].as_int().ok_or_else(|| TableError::Coordinate(r[0].clone()))?;
                let j = r[1].as_int().ok_or_else(|| TableError::Coordinate(r[1].clone()))?;
                Ok((i, j, r[2].clone()))
            })
            .collect()
    }

    /// A dense grid spanning the occupied rows and columns, with gaps set to `fill`.
    ///
    /// The grid starts at the minimum row and column. An empty table gives an empty grid.
    /// When two cells share a coordinate, the one later in fetch order wins.
    pub fn to_grid(&self, fill: impl Into<Value>) -> Result<Vec<Vec<Value>>, TableError> {
        triples_to_grid(&self.to_tuples()?, &fill.into(), None)
    }

    /// Like [`Table::to_grid`], but the grid's top-left cell is pinned to `(i0, j0)`.
    ///
    /// Cells above or left of the anchor are dropped.
    pub fn to_grid_anchored(
        &self,
        fill: impl Into<Value>,
        i0: i64,
        j0: i64,
    ) -> Result<Vec<Vec<Value>>, TableError> {
        triples_to_grid(&self.to_tuples()?, &fill.into(), Some((i0, j0)))
    }

    /// The dense grid as a labeled array with positional labels.
    pub fn to_labeled_array(&self, fill: impl Into<Value>) -> Result<LabeledArray, TableError> {
        Ok(LabeledArray::new(self.to_grid(fill)?))
    }
}

impl<B: Backend> PartialEq for Table<B> {
    fn eq(&self, other: &Self) -> bool {
        if self.arity() != other.arity() {
            return false;
        }
        let a: HashSet<&Row> = self.rows().iter().collect();
        let b: HashSet<&Row> = other.rows().iter().collect();
        a == b
    }
}

impl<B: Backend> fmt::Display for Table<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Tagged tables and spans too wide for a dense grid print their raw rows.
        let lines = match self.to_grid(Value::Null) {
            Ok(grid) => grid,
            Err(
                TableError::Schema(SchemaError::NotCanonical { .. })
                | TableError::GridTooLarge { .. },
            ) => self.rows().iter().map(|r| r.to_vec()).collect(),
            Err(err) => return writeln!(f, "invalid table: {err}"),
        };
        for line in lines {
            let mut first = true;
            for cell in line {
                if !first {
                    f.write_str(" | ")?;
                }
                first = false;
                write!(f, "{cell}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::ToString;
    use alloc::vec;

    use super::*;

    fn s(x: &str) -> Value {
        Value::from(x)
    }

    #[test]
    fn grid_ingest_skips_blanks_and_offsets() {
        let t = Table::from_grid_with(
            MemoryBackend,
            [[Some("a"), None], [Some(""), Some("b")]],
            GridOptions::new().with_start(1),
        )
        .unwrap();
        assert_eq!(t.to_tuples().unwrap(), [(1, 1, s("a")), (2, 2, s("b"))]);
    }

    #[test]
    fn blanks_can_be_kept() {
        let t = Table::from_grid_with(
            MemoryBackend,
            [[Some("a"), None]],
            GridOptions::new().with_skip_blanks(false),
        )
        .unwrap();
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn labeled_array_skips_na_but_keeps_empty_strings() {
        let array = LabeledArray::new(vec![
            vec![Value::Float(f64::NAN), s("")],
            vec![Value::Null, Value::Int(4)],
        ])
        .with_columns(vec![s("x"), s("y")]);
        let t = Table::from_labeled_array(&array).unwrap();
        assert_eq!(t.to_tuples().unwrap(), [(0, 1, s("")), (1, 1, Value::Int(4))]);
    }

    #[test]
    fn relation_with_permuted_ijv_is_reordered() {
        let rel = Relation::new(
            Schema::new(["v", "i", "j"]),
            vec![Row::from_iter([s("x"), Value::Int(2), Value::Int(5)])],
        )
        .unwrap();
        let t = Table::from_relation(rel).unwrap();
        assert!(t.is_canonical());
        assert_eq!(t.to_tuples().unwrap(), [(2, 5, s("x"))]);
    }

    #[test]
    fn relation_with_arbitrary_columns_is_normalized() {
        let rel = Relation::new(
            Schema::new(["a", "b", "c", "d", "e", "f"]),
            vec![Row::from_iter((0..6).map(Value::Int))],
        )
        .unwrap();
        let t = Table::from_relation(rel).unwrap();
        assert_eq!(t.relation().schema(), &Schema::tagged(2));
        assert_eq!(
            t.to_tuples(),
            Err(TableError::Schema(SchemaError::NotCanonical { arity: 6 }))
        );
    }

    #[test]
    fn relation_with_partial_triple_is_rejected() {
        let rel = Relation::empty(Schema::new(["a", "b"]));
        assert_eq!(
            Table::from_relation(rel).unwrap_err(),
            TableError::Schema(SchemaError::NotTriples { columns: 2 })
        );
    }

    #[test]
    fn equality_ignores_order_and_multiplicity() {
        let a = Table::from_triples([(0, 0, s("x")), (0, 1, s("y"))]).unwrap();
        let b = Table::from_triples([(0, 1, s("y")), (0, 0, s("x")), (0, 0, s("x"))]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_table_exports_empty_grid() {
        let t = Table::from_grid(Vec::<Vec<Value>>::new()).unwrap();
        assert!(t.to_grid(Value::Null).unwrap().is_empty());
    }

    #[test]
    fn labeled_export_uses_positional_labels() {
        let t = Table::from_triples([(5, 5, s("x")), (6, 7, s("y"))]).unwrap();
        let array = t.to_labeled_array(s(".")).unwrap();
        assert_eq!(array.shape(), (2, 3));
        assert_eq!(array.index, [Value::Int(0), Value::Int(1)]);
        assert_eq!(array.get(1, 2), Some(&s("y")));
        assert_eq!(array.get(0, 1), Some(&s(".")));
    }

    #[test]
    fn wide_sparse_table_fails_grid_export() {
        let t = Table::from_triples([(0, 0, s("a")), (0, 1 << 62, s("b"))]).unwrap();
        assert_eq!(
            t.to_grid(Value::Null),
            Err(TableError::GridTooLarge {
                rows: 1,
                columns: (1 << 62) + 1,
            })
        );
        assert_eq!(t.to_string(), "0 | 0 | a\n0 | 4611686018427387904 | b\n");
    }

    #[test]
    fn display_lists_rows_of_tagged_tables() {
        let t = Table::from_triples([(0, 1, s("x"))]).unwrap();
        let pair = crate::product(&t, &t).unwrap();
        assert_eq!(pair.to_string(), "0 | 1 | x | 0 | 1 | x\n");
    }

    #[test]
    fn display_reports_bad_coordinates() {
        let rel = Relation::new(
            Schema::canonical(),
            vec![Row::from_iter([s("x"), Value::Int(0), s("v")])],
        )
        .unwrap();
        let t = Table::from_relation(rel).unwrap();
        assert_eq!(t.to_tuples(), Err(TableError::Coordinate(s("x"))));
        let shown = t.to_string();
        assert!(shown.starts_with("invalid table: coordinate"), "{shown}");
    }

    #[test]
    fn display_renders_grid_rows() {
        let t = Table::from_grid([["a", "b"], ["", "d"]]).unwrap();
        assert_eq!(t.to_string(), "a | b\n | d\n");
    }
}
