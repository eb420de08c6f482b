// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate std;

use alloc::vec::Vec;

use tessera_core::{Backend, BackendError, Expr, MemoryBackend, Relation, SetOp, Value, col};

use crate::{
    Locator, Table, above, below, bottom, column, concat_vertically, delete_column, delete_row,
    height, insert_column, insert_row, left, move_by, right, row, select, top, transpose, width,
};

/// Hands every result back in reverse fetch order.
#[derive(Clone, Debug, Default)]
struct ReversingBackend(MemoryBackend);

impl ReversingBackend {
    fn reversed(relation: Relation) -> Result<Relation, BackendError> {
        let schema = relation.schema().clone();
        let mut rows = relation.into_rows();
        rows.reverse();
        Ok(Relation::new(schema, rows)?)
    }
}

impl Backend for ReversingBackend {
    fn materialize(&self, relation: Relation) -> Result<Relation, BackendError> {
        Self::reversed(self.0.materialize(relation)?)
    }

    fn select(&self, relation: &Relation, predicate: &Expr) -> Result<Relation, BackendError> {
        self.0.select(relation, predicate)
    }

    fn project(&self, relation: &Relation, exprs: &[Expr]) -> Result<Relation, BackendError> {
        self.0.project(relation, exprs)
    }

    fn set_op(
        &self,
        op: SetOp,
        left: &Relation,
        right: &Relation,
    ) -> Result<Relation, BackendError> {
        self.0.set_op(op, left, right)
    }

    fn product(&self, left: &Relation, right: &Relation) -> Result<Relation, BackendError> {
        self.0.product(left, right)
    }
}

fn school() -> Table {
    Table::from_grid([["desc", "a"], ["school", "b"], ["1", "2"], ["3", "4"]]).unwrap()
}

fn ragged() -> Table {
    Table::from_triples([
        (2, 1, Value::from("p")),
        (2, 4, Value::from("q")),
        (3, 2, Value::Int(7)),
        (5, 1, Value::Float(0.5)),
        (5, 3, Value::from("r")),
    ])
    .unwrap()
}

fn s(x: &str) -> Value {
    Value::from(x)
}

fn sorted<B: Backend>(t: &Table<B>) -> Vec<(i64, i64, Value)> {
    let mut tuples = t.to_tuples().unwrap();
    tuples.sort();
    tuples
}

#[test]
fn transpose_is_an_involution() {
    for t in [school(), ragged(), Table::from_triples([]).unwrap()] {
        assert_eq!(transpose(&transpose(&t).unwrap()).unwrap(), t);
    }
}

#[test]
fn lookups_by_value_agree_with_lookups_by_index() {
    let t = school();
    for (i, j, v) in t.to_tuples().unwrap() {
        assert_eq!(
            row(&t, Locator::Value(v.clone())).unwrap(),
            row(&t, Locator::Index(i)).unwrap(),
            "row of {v}"
        );
        assert_eq!(
            column(&t, Locator::Value(v.clone())).unwrap(),
            column(&t, Locator::Index(j)).unwrap(),
            "column of {v}"
        );
        assert_eq!(
            below(&t, Locator::Value(v.clone())).unwrap(),
            below(&t, Locator::Index(i)).unwrap(),
            "below {v}"
        );
        assert_eq!(
            left(&t, Locator::Value(v.clone())).unwrap(),
            left(&t, Locator::Index(j)).unwrap(),
            "left of {v}"
        );
    }
}

#[test]
fn value_lookup_unions_every_anchor() {
    let t = Table::from_grid([["x", "y"], ["z", "x"], ["w", "w"]]).unwrap();
    let rows = row(&t, Locator::value("x")).unwrap();
    let first_two = row(&t, Locator::Index(0))
        .unwrap()
        .union(&row(&t, Locator::Index(1)).unwrap())
        .unwrap();
    assert_eq!(rows, first_two);
    assert!(above(&t, Locator::value("missing")).unwrap().is_empty());
    // Anchors sit in columns 0 and 1, so everything right of column 0 qualifies.
    assert_eq!(right(&t, Locator::value("x")).unwrap(), column(&t, Locator::Index(1)).unwrap());
}

#[test]
fn insert_then_delete_column_is_identity() {
    let t = school();
    let payload = Table::from_grid([["p"], ["q"], ["r"], ["s"]]).unwrap();
    for k in 0..=2 {
        let inserted = insert_column(&t, &payload, k).unwrap();
        assert_eq!(inserted.len(), t.len() + payload.len(), "insert at {k}");
        assert_eq!(delete_column(&inserted, k).unwrap(), t, "round trip at {k}");
    }
}

#[test]
fn insert_then_delete_row_is_identity() {
    let t = school();
    let payload = Table::from_grid([["p", "q"]]).unwrap();
    for k in 0..=4 {
        let inserted = insert_row(&t, &payload, k).unwrap();
        assert_eq!(delete_row(&inserted, k).unwrap(), t, "round trip at {k}");
    }
}

#[test]
fn height_and_width_report_the_rectangle() {
    let t = Table::from_grid([["a", "b", "c"], ["d", "e", "f"]]).unwrap();
    let h = height(&t).unwrap().to_tuples().unwrap();
    assert_eq!(h.len(), 6);
    assert!(h.iter().all(|(n, _, _)| *n == 2), "{h:?}");
    let w = width(&t).unwrap().to_tuples().unwrap();
    assert_eq!(w.len(), 6);
    assert!(w.iter().all(|(n, _, _)| *n == 3), "{w:?}");
}

#[test]
fn vertical_concat_places_rows_adjacent() {
    let upper = ragged();
    let lower = move_by(&school(), -10, 3).unwrap();
    let joined = concat_vertically(&upper, &lower).unwrap();

    let bottom_row = bottom(&upper).unwrap().to_tuples().unwrap()[0].0;
    let top_row = top(&lower).unwrap().to_tuples().unwrap()[0].0;
    let expected: Vec<_> = lower
        .to_tuples()
        .unwrap()
        .into_iter()
        .map(|(i, j, v)| (bottom_row + 1 + (i - top_row), j, v))
        .collect();
    let added = joined.difference(&upper).unwrap();
    assert_eq!(added, Table::from_triples(expected).unwrap());
}

#[test]
fn matching_is_a_natural_join_on_value() {
    let a = school();
    let b = Table::from_grid([["4", "school"], ["zzz", "1"]]).unwrap();
    let m = a.matching(&b).unwrap();

    let mut expected = Vec::new();
    for (i1, j1, v1) in a.to_tuples().unwrap() {
        for (i2, j2, v2) in b.to_tuples().unwrap() {
            if v1 == v2 {
                expected.push([i1, j1, i2, j2]);
            }
        }
    }
    let mut got: Vec<_> = m
        .rows()
        .iter()
        .map(|r| {
            assert_eq!(r[2], r[5], "joined values differ");
            [r[0].as_int(), r[1].as_int(), r[3].as_int(), r[4].as_int()].map(Option::unwrap)
        })
        .collect();
    got.sort_unstable();
    expected.sort_unstable();
    assert_eq!(got, expected);
}

#[test]
fn school_scenario() {
    let t = school();
    assert_eq!(
        select(&t, &col("v").eq("school")).unwrap().to_tuples().unwrap(),
        [(1, 0, s("school"))]
    );
    assert_eq!(
        below(&t, Locator::value("school")).unwrap().to_grid(Value::Null).unwrap(),
        [[s("1"), s("2")], [s("3"), s("4")]]
    );
}

#[test]
fn method_chain_matches_free_functions() {
    let t = school();
    let top_half = Table::from_grid([["desc", "a"], ["school", "b"]]).unwrap();
    let bottom_half = Table::from_grid([["1", "2"], ["3", "4"]]).unwrap();
    assert_eq!(top_half.vconcat(&bottom_half).unwrap(), t);
    assert_eq!(t.intersect(&top_half).unwrap(), top_half);
    assert_eq!(t.product(&t).unwrap().arity(), 6);
}

#[test]
fn results_do_not_depend_on_fetch_order() {
    let backend = ReversingBackend::default();
    let grid = [["desc", "a"], ["school", "b"], ["1", "2"], ["3", "4"]];
    let t = Table::from_grid_with(backend, grid, crate::GridOptions::new()).unwrap();
    let mem = school();

    let body = below(&t, Locator::value("school")).unwrap();
    assert_eq!(
        body.to_grid(Value::Null).unwrap(),
        below(&mem, Locator::value("school")).unwrap().to_grid(Value::Null).unwrap()
    );
    let moved = insert_column(&t, &column(&t, Locator::Index(0)).unwrap(), 1).unwrap();
    let expected = insert_column(&mem, &column(&mem, Locator::Index(0)).unwrap(), 1).unwrap();
    assert_eq!(sorted(&moved), sorted(&expected));
}
