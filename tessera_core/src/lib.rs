// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Relation primitives for sparse two-dimensional tables.
//!
//! A table cell is a triple `(i, j, v)`: row, column and value. This crate provides the pieces
//! every higher layer builds on:
//! - [`Value`], the scalar stored in a cell (and in coordinate columns),
//! - [`Schema`] and [`Relation`], a set of named-column tuples whose width is a multiple of 3,
//! - [`normalize`], the positional renaming that keeps products composable,
//! - [`Expr`], a typed expression tree for predicates and projections, and
//! - the [`Backend`] trait with [`MemoryBackend`] as the reference implementation.
//!
//! The crate is `no_std` and only needs `alloc`.

#![no_std]

extern crate alloc;

mod backend;
mod error;
mod expr;
mod memory;
mod relation;
mod schema;
mod value;

pub use backend::{Backend, SetOp};
pub use error::{BackendError, ExprError, SchemaError};
pub use expr::{ArithOp, BoundExpr, CompareOp, Expr, col, lit};
pub use memory::MemoryBackend;
pub use relation::{Relation, Row, Triple};
pub use schema::{Schema, normalize};
pub use value::Value;
