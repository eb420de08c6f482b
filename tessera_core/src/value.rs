// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cell scalars.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};

/// A scalar stored in a relation column.
///
/// Coordinates are stored as [`Value::Int`]; cell values can be any variant.
///
/// `Value` is totally ordered so relations can use set semantics. Variants order as
/// `Null < Bool < Int < Float < Str`, and floats use [`f64::total_cmp`]. As set members
/// `Int(1)` and `Float(1.0)` are distinct; numeric comparison across the two only happens
/// inside expression evaluation.
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// An absent or unknown value.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A double-precision float.
    Float(f64),
    /// A shared string.
    Str(Arc<str>),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` for `Null` and for the empty string.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Str(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Returns `true` for `Null` and for a NaN float.
    #[must_use]
    pub fn is_na(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    /// Returns the integer payload, if any.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the string payload, if any.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the numeric payload widened to `f64`, if any.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Int(_) => 2,
            Self::Float(_) => 3,
            Self::Str(_) => 4,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Null, Self::Null) => Ordering::Equal,
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => a.total_cmp(b),
            (Self::Str(a), Self::Str(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            Self::Null => {}
            Self::Bool(b) => b.hash(state),
            Self::Int(i) => i.hash(state),
            // `total_cmp` equality is bit equality.
            Self::Float(f) => f.to_bits().hash(state),
            Self::Str(s) => s.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(Arc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(Arc::from(s))
    }
}

impl From<Arc<str>> for Value {
    fn from(s: Arc<str>) -> Self {
        Self::Str(s)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn variants_order_by_rank_then_payload() {
        let mut values: Vec<Value> = vec![
            Value::from("b"),
            Value::Float(0.5),
            Value::Int(3),
            Value::Null,
            Value::from("a"),
            Value::Int(-1),
            Value::Bool(true),
        ];
        values.sort();
        assert_eq!(
            values,
            vec![
                Value::Null,
                Value::Bool(true),
                Value::Int(-1),
                Value::Int(3),
                Value::Float(0.5),
                Value::from("a"),
                Value::from("b"),
            ]
        );
    }

    #[test]
    fn int_and_float_are_distinct_set_members() {
        assert_ne!(Value::Int(1), Value::Float(1.0));
    }

    #[test]
    fn blank_and_na_detection() {
        assert!(Value::Null.is_blank());
        assert!(Value::from("").is_blank());
        assert!(!Value::from(" ").is_blank());
        assert!(Value::Float(f64::NAN).is_na());
        assert!(!Value::from("").is_na());
    }

    #[test]
    fn none_converts_to_null() {
        let v: Value = Option::<&str>::None.into();
        assert!(v.is_null());
        let v: Value = Some(7_i64).into();
        assert_eq!(v, Value::Int(7));
    }
}
