// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The base operators. Everything else in this crate is built from these.

use tessera_core::{Backend, Expr, SchemaError, SetOp};

use crate::error::TableError;
use crate::table::Table;

/// Keeps the rows for which `predicate` is `true`.
///
/// The predicate sees the table's own column names: `i, j, v` for a canonical table, `i1, j1,
/// v1, i2, ...` after a [`product`].
pub fn select<B: Backend>(table: &Table<B>, predicate: &Expr) -> Result<Table<B>, TableError> {
    let relation = table.backend().select(table.relation(), predicate)?;
    Table::wrap(table.backend().clone(), relation)
}

/// Evaluates one expression per output column, removes duplicate rows and renormalizes.
///
/// The expression count must be a positive multiple of 3.
pub fn project<B: Backend>(table: &Table<B>, exprs: &[Expr]) -> Result<Table<B>, TableError> {
    if exprs.is_empty() || exprs.len() % 3 != 0 {
        return Err(SchemaError::NotTriples {
            columns: exprs.len(),
        }
        .into());
    }
    let relation = table.backend().project(table.relation(), exprs)?;
    Table::wrap(table.backend().clone(), relation)
}

fn set_op<B: Backend>(
    op: SetOp,
    left: &Table<B>,
    right: &Table<B>,
) -> Result<Table<B>, TableError> {
    let relation = left
        .backend()
        .set_op(op, left.relation(), right.relation())?;
    Table::wrap(left.backend().clone(), relation)
}

/// All rows of `left` followed by all rows of `right`. Duplicates are kept.
pub fn union<B: Backend>(left: &Table<B>, right: &Table<B>) -> Result<Table<B>, TableError> {
    set_op(SetOp::UnionAll, left, right)
}

/// Rows of `left` that do not appear in `right`, as a set.
pub fn difference<B: Backend>(left: &Table<B>, right: &Table<B>) -> Result<Table<B>, TableError> {
    set_op(SetOp::Except, left, right)
}

/// Rows present in both tables, as a set.
pub fn intersect<B: Backend>(left: &Table<B>, right: &Table<B>) -> Result<Table<B>, TableError> {
    set_op(SetOp::Intersect, left, right)
}

/// Cross product.
///
/// A product of a table with `a` triples and one with `b` triples has `a + b` triples, the left
/// operand's first. `product(t, t)` therefore exposes `i1, j1, v1` for one copy and `i2, j2, v2`
/// for the other.
pub fn product<B: Backend>(left: &Table<B>, right: &Table<B>) -> Result<Table<B>, TableError> {
    let relation = left.backend().product(left.relation(), right.relation())?;
    Table::wrap(left.backend().clone(), relation)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use tessera_core::{Schema, Value, col};

    use super::*;

    fn school() -> Table {
        Table::from_grid([["desc", "a"], ["school", "b"], ["1", "2"], ["3", "4"]]).unwrap()
    }

    #[test]
    fn select_by_value() {
        let t = select(&school(), &col("v").eq("school")).unwrap();
        assert_eq!(t.to_tuples().unwrap(), [(1, 0, Value::from("school"))]);
    }

    #[test]
    fn product_is_tagged_and_projects_back() {
        let t = school();
        let pair = product(&t, &t).unwrap();
        assert_eq!(pair.relation().schema(), &Schema::tagged(2));
        assert_eq!(pair.len(), 64);

        let same_row = col("i1").eq(col("i2")).and(col("j1").lt(col("j2")));
        let same_row_right = select(&pair, &same_row).unwrap();
        let out = project(&same_row_right, &[col("i1"), col("j2"), col("v1")]).unwrap();
        let expected = Table::from_triples(
            [(0, "desc"), (1, "school"), (2, "1"), (3, "3")]
                .map(|(i, v)| (i, 1, Value::from(v))),
        )
        .unwrap();
        assert_eq!(out, expected);
    }

    #[test]
    fn triple_product_normalizes_to_three_tables() {
        let t = school();
        let triple = product(&product(&t, &t).unwrap(), &t).unwrap();
        assert_eq!(triple.relation().schema(), &Schema::tagged(3));
    }

    #[test]
    fn project_requires_whole_triples() {
        let err = project(&school(), &[col("i"), col("j")]).unwrap_err();
        assert_eq!(err, TableError::Schema(SchemaError::NotTriples { columns: 2 }));
    }

    #[test]
    fn set_ops_reject_mismatched_arity() {
        let t = school();
        let pair = product(&t, &t).unwrap();
        assert!(matches!(
            union(&t, &pair),
            Err(TableError::InvalidOperand { .. })
        ));
    }

    #[test]
    fn union_keeps_duplicates_difference_does_not() {
        let t = school();
        let twice = union(&t, &t).unwrap();
        assert_eq!(twice.len(), 16);
        assert_eq!(twice, t);
        assert!(difference(&twice, &t).unwrap().is_empty());
        assert_eq!(intersect(&twice, &t).unwrap().len(), 8);
    }
}
