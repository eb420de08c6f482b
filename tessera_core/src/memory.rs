// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory reference backend.

extern crate alloc;

use alloc::format;
use alloc::sync::Arc;
use alloc::vec::Vec;

use hashbrown::HashSet;

use crate::backend::{Backend, SetOp};
use crate::error::BackendError;
use crate::expr::{Expr, bind_all, eval_all};
use crate::relation::{Relation, Row};
use crate::schema::Schema;

/// A straightforward interpreter over owned rows.
///
/// No indexing and no planning: selection is a scan, product is a nested loop, and the set
/// operations hash the right operand. Output keeps input order, with deduplication keeping the
/// first occurrence, so results are deterministic for a given input order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryBackend;

impl MemoryBackend {
    /// Creates the backend.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn positional_schema(width: usize) -> Schema {
    Schema::new((0..width).map(|k| Arc::<str>::from(format!("c{k}"))))
}

fn check_widths(op: SetOp, left: &Relation, right: &Relation) -> Result<(), BackendError> {
    if left.arity() != right.arity() {
        return Err(BackendError::ArityMismatch {
            op: op.name(),
            left: left.arity(),
            right: right.arity(),
        });
    }
    Ok(())
}

impl Backend for MemoryBackend {
    fn materialize(&self, relation: Relation) -> Result<Relation, BackendError> {
        log::trace!(
            "materialize: {} rows x {} columns",
            relation.len(),
            relation.arity()
        );
        Ok(relation)
    }

    fn select(&self, input: &Relation, predicate: &Expr) -> Result<Relation, BackendError> {
        let predicate = predicate.bind(input.schema())?;
        let mut rows = Vec::new();
        for row in input.rows() {
            if predicate.matches(row)? {
                rows.push(row.clone());
            }
        }
        log::trace!("select: {} of {} rows kept", rows.len(), input.len());
        Ok(Relation::new(input.schema().clone(), rows)?)
    }

    fn project(&self, input: &Relation, exprs: &[Expr]) -> Result<Relation, BackendError> {
        let bound = bind_all(exprs, input.schema())?;
        let mut seen: HashSet<Row> = HashSet::with_capacity(input.len());
        let mut rows = Vec::new();
        for row in input.rows() {
            let out: Row = eval_all(&bound, row)?;
            if seen.insert(out.clone()) {
                rows.push(out);
            }
        }
        log::trace!(
            "project: {} rows into {} distinct over {} columns",
            input.len(),
            rows.len(),
            exprs.len()
        );
        Ok(Relation::new(positional_schema(exprs.len()), rows)?)
    }

    fn set_op(
        &self,
        op: SetOp,
        left: &Relation,
        right: &Relation,
    ) -> Result<Relation, BackendError> {
        check_widths(op, left, right)?;
        let rows: Vec<Row> = match op {
            SetOp::UnionAll => left.rows().iter().chain(right.rows()).cloned().collect(),
            SetOp::Except | SetOp::Intersect => {
                let other: HashSet<&Row> = right.rows().iter().collect();
                let keep_present = op == SetOp::Intersect;
                let mut seen: HashSet<&Row> = HashSet::new();
                left.rows()
                    .iter()
                    .filter(|r| other.contains(r) == keep_present && seen.insert(*r))
                    .cloned()
                    .collect()
            }
        };
        log::trace!(
            "{}: {} and {} rows into {}",
            op.name(),
            left.len(),
            right.len(),
            rows.len()
        );
        Ok(Relation::new(left.schema().clone(), rows)?)
    }

    fn product(&self, left: &Relation, right: &Relation) -> Result<Relation, BackendError> {
        let width = left.arity() + right.arity();
        let mut rows = Vec::with_capacity(left.len() * right.len());
        for l in left.rows() {
            for r in right.rows() {
                let mut row = Row::with_capacity(width);
                row.extend(l.iter().cloned());
                row.extend(r.iter().cloned());
                rows.push(row);
            }
        }
        log::trace!(
            "product: {} x {} rows over {} columns",
            left.len(),
            right.len(),
            width
        );
        Ok(Relation::new(positional_schema(width), rows)?)
    }
}
