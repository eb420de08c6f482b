// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Method-style combinators on [`Table`].
//!
//! These are thin aliases for the free functions, so chains read left to right:
//!
//! ```
//! use tessera_algebra::Table;
//! use tessera_core::Value;
//!
//! let names = Table::from_grid([["desc", "a"], ["school", "b"]])?;
//! let body = Table::from_grid([["1", "2"], ["3", "4"]])?;
//! let wide = names.hconcat(&body)?;
//! let tall = names.vconcat(&body)?;
//! assert_eq!(wide.to_grid(Value::Null)?.len(), 2);
//! assert_eq!(tall.to_grid(Value::Null)?.len(), 4);
//! # Ok::<(), tessera_algebra::TableError>(())
//! ```

use tessera_core::Backend;

use crate::error::TableError;
use crate::table::Table;
use crate::{base, join, reshape};

impl<B: Backend> Table<B> {
    /// See [`union`](crate::union).
    pub fn union(&self, other: &Self) -> Result<Self, TableError> {
        base::union(self, other)
    }

    /// See [`difference`](crate::difference).
    pub fn difference(&self, other: &Self) -> Result<Self, TableError> {
        base::difference(self, other)
    }

    /// See [`intersect`](crate::intersect).
    pub fn intersect(&self, other: &Self) -> Result<Self, TableError> {
        base::intersect(self, other)
    }

    /// See [`product`](crate::product).
    pub fn product(&self, other: &Self) -> Result<Self, TableError> {
        base::product(self, other)
    }

    /// Stacks `other` beneath `self`. See [`concat_vertically`](crate::concat_vertically).
    pub fn vconcat(&self, other: &Self) -> Result<Self, TableError> {
        reshape::concat_vertically(self, other)
    }

    /// Places `other` right of `self`. See [`concat_horizontally`](crate::concat_horizontally).
    pub fn hconcat(&self, other: &Self) -> Result<Self, TableError> {
        reshape::concat_horizontally(self, other)
    }

    /// See [`match_values`](crate::match_values).
    pub fn matching(&self, other: &Self) -> Result<Self, TableError> {
        join::match_values(self, other)
    }
}
