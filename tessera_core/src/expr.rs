// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed expressions for predicates and projections.
//!
//! Expressions reference columns by name (`i`, `j`, `v`, or the tagged `i1`, `j1`, `v1`, ...).
//! Before evaluation they are bound against a [`Schema`], which resolves names to positions once
//! per operation instead of once per row.
//!
//! Semantics follow SQL where it matters for table algebra:
//! - comparisons involving `Null` yield `Null`, and a filter only keeps rows whose predicate is
//!   `true`;
//! - `Int` and `Float` compare and combine numerically;
//! - equality between unrelated kinds (say a string and an integer) is `false` and ordering
//!   between them is `Null`, so a value predicate can run over a column of mixed kinds.

extern crate alloc;

use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use core::ops;

use crate::error::ExprError;
use crate::schema::Schema;
use crate::value::Value;

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    /// `=`
    Eq,
    /// `<>`
    NotEq,
    /// `<`
    Lt,
    /// `<=`
    LtEq,
    /// `>`
    Gt,
    /// `>=`
    GtEq,
}

impl CompareOp {
    fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
        }
    }

    fn holds(self, ord: Ordering) -> bool {
        match self {
            Self::Eq => ord == Ordering::Equal,
            Self::NotEq => ord != Ordering::Equal,
            Self::Lt => ord == Ordering::Less,
            Self::LtEq => ord != Ordering::Greater,
            Self::Gt => ord == Ordering::Greater,
            Self::GtEq => ord != Ordering::Less,
        }
    }
}

/// Arithmetic operators for coordinate expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
}

impl ArithOp {
    fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
        }
    }
}

/// An expression over the columns of one row.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A column reference by name.
    Column(Arc<str>),
    /// A constant.
    Literal(Value),
    /// A comparison yielding `Bool` or `Null`.
    Compare {
        /// Operator.
        op: CompareOp,
        /// Left operand.
        lhs: Box<Expr>,
        /// Right operand.
        rhs: Box<Expr>,
    },
    /// Integer or float arithmetic.
    Arith {
        /// Operator.
        op: ArithOp,
        /// Left operand.
        lhs: Box<Expr>,
        /// Right operand.
        rhs: Box<Expr>,
    },
    /// Three-valued conjunction.
    And(Box<Expr>, Box<Expr>),
    /// Three-valued disjunction.
    Or(Box<Expr>, Box<Expr>),
    /// Three-valued negation.
    Not(Box<Expr>),
}

/// References a column by name.
pub fn col(name: &str) -> Expr {
    Expr::Column(Arc::from(name))
}

/// A literal value.
pub fn lit(value: impl Into<Value>) -> Expr {
    Expr::Literal(value.into())
}

impl Expr {
    /// `self <op> rhs`, for callers that pick the operator at runtime.
    #[must_use]
    pub fn compare(self, op: CompareOp, rhs: impl Into<Self>) -> Self {
        Self::Compare {
            op,
            lhs: Box::new(self),
            rhs: Box::new(rhs.into()),
        }
    }

    fn arith(self, op: ArithOp, rhs: Self) -> Self {
        Self::Arith {
            op,
            lhs: Box::new(self),
            rhs: Box::new(rhs),
        }
    }

    /// `self = rhs`
    #[must_use]
    pub fn eq(self, rhs: impl Into<Self>) -> Self {
        self.compare(CompareOp::Eq, rhs)
    }

    /// `self <> rhs`
    #[must_use]
    pub fn not_eq(self, rhs: impl Into<Self>) -> Self {
        self.compare(CompareOp::NotEq, rhs)
    }

    /// `self < rhs`
    #[must_use]
    pub fn lt(self, rhs: impl Into<Self>) -> Self {
        self.compare(CompareOp::Lt, rhs)
    }

    /// `self <= rhs`
    #[must_use]
    pub fn lt_eq(self, rhs: impl Into<Self>) -> Self {
        self.compare(CompareOp::LtEq, rhs)
    }

    /// `self > rhs`
    #[must_use]
    pub fn gt(self, rhs: impl Into<Self>) -> Self {
        self.compare(CompareOp::Gt, rhs)
    }

    /// `self >= rhs`
    #[must_use]
    pub fn gt_eq(self, rhs: impl Into<Self>) -> Self {
        self.compare(CompareOp::GtEq, rhs)
    }

    /// `self AND rhs`
    #[must_use]
    pub fn and(self, rhs: Self) -> Self {
        Self::And(Box::new(self), Box::new(rhs))
    }

    /// `self OR rhs`
    #[must_use]
    pub fn or(self, rhs: Self) -> Self {
        Self::Or(Box::new(self), Box::new(rhs))
    }

    /// Resolves column names against `schema`.
    pub fn bind(&self, schema: &Schema) -> Result<BoundExpr, ExprError> {
        let bound = match self {
            Self::Column(name) => {
                let idx = schema
                    .index_of(name)
                    .ok_or_else(|| ExprError::UnknownColumn(name.clone()))?;
                BoundExpr::Column(idx)
            }
            Self::Literal(v) => BoundExpr::Literal(v.clone()),
            Self::Compare { op, lhs, rhs } => BoundExpr::Compare {
                op: *op,
                lhs: Box::new(lhs.bind(schema)?),
                rhs: Box::new(rhs.bind(schema)?),
            },
            Self::Arith { op, lhs, rhs } => BoundExpr::Arith {
                op: *op,
                lhs: Box::new(lhs.bind(schema)?),
                rhs: Box::new(rhs.bind(schema)?),
            },
            Self::And(a, b) => {
                BoundExpr::And(Box::new(a.bind(schema)?), Box::new(b.bind(schema)?))
            }
            Self::Or(a, b) => BoundExpr::Or(Box::new(a.bind(schema)?), Box::new(b.bind(schema)?)),
            Self::Not(e) => BoundExpr::Not(Box::new(e.bind(schema)?)),
        };
        Ok(bound)
    }
}

impl From<Value> for Expr {
    fn from(v: Value) -> Self {
        Self::Literal(v)
    }
}

impl From<i64> for Expr {
    fn from(v: i64) -> Self {
        lit(v)
    }
}

impl From<i32> for Expr {
    fn from(v: i32) -> Self {
        lit(v)
    }
}

impl From<f64> for Expr {
    fn from(v: f64) -> Self {
        lit(v)
    }
}

impl From<bool> for Expr {
    fn from(v: bool) -> Self {
        lit(v)
    }
}

impl From<&str> for Expr {
    fn from(v: &str) -> Self {
        lit(v)
    }
}

impl<R: Into<Self>> ops::Add<R> for Expr {
    type Output = Self;

    fn add(self, rhs: R) -> Self {
        self.arith(ArithOp::Add, rhs.into())
    }
}

impl<R: Into<Self>> ops::Sub<R> for Expr {
    type Output = Self;

    fn sub(self, rhs: R) -> Self {
        self.arith(ArithOp::Sub, rhs.into())
    }
}

impl<R: Into<Self>> ops::Mul<R> for Expr {
    type Output = Self;

    fn mul(self, rhs: R) -> Self {
        self.arith(ArithOp::Mul, rhs.into())
    }
}

impl ops::Not for Expr {
    type Output = Self;

    fn not(self) -> Self {
        Self::Not(Box::new(self))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Column(name) => f.write_str(name),
            Self::Literal(Value::Str(s)) => write!(f, "'{s}'"),
            Self::Literal(Value::Null) => f.write_str("NULL"),
            Self::Literal(v) => write!(f, "{v}"),
            Self::Compare { op, lhs, rhs } => write!(f, "{lhs} {} {rhs}", op.symbol()),
            Self::Arith { op, lhs, rhs } => write!(f, "({lhs} {} {rhs})", op.symbol()),
            Self::And(a, b) => write!(f, "({a} AND {b})"),
            Self::Or(a, b) => write!(f, "({a} OR {b})"),
            Self::Not(e) => write!(f, "NOT {e}"),
        }
    }
}

/// An expression whose column references are resolved to positions.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundExpr {
    /// Column at a position.
    Column(usize),
    /// A constant.
    Literal(Value),
    /// See [`Expr::Compare`].
    Compare {
        /// Operator.
        op: CompareOp,
        /// Left operand.
        lhs: Box<BoundExpr>,
        /// Right operand.
        rhs: Box<BoundExpr>,
    },
    /// See [`Expr::Arith`].
    Arith {
        /// Operator.
        op: ArithOp,
        /// Left operand.
        lhs: Box<BoundExpr>,
        /// Right operand.
        rhs: Box<BoundExpr>,
    },
    /// See [`Expr::And`].
    And(Box<BoundExpr>, Box<BoundExpr>),
    /// See [`Expr::Or`].
    Or(Box<BoundExpr>, Box<BoundExpr>),
    /// See [`Expr::Not`].
    Not(Box<BoundExpr>),
}

impl BoundExpr {
    /// Evaluates against one row.
    ///
    /// The row must come from a relation with the schema this expression was bound to.
    pub fn eval(&self, row: &[Value]) -> Result<Value, ExprError> {
        match self {
            Self::Column(idx) => Ok(row[*idx].clone()),
            Self::Literal(v) => Ok(v.clone()),
            Self::Compare { op, lhs, rhs } => Ok(compare(*op, &lhs.eval(row)?, &rhs.eval(row)?)),
            Self::Arith { op, lhs, rhs } => arith(*op, &lhs.eval(row)?, &rhs.eval(row)?),
            Self::And(a, b) => {
                let a = truth(a.eval(row)?, "AND")?;
                if a == Some(false) {
                    return Ok(Value::Bool(false));
                }
                let b = truth(b.eval(row)?, "AND")?;
                Ok(match (a, b) {
                    (_, Some(false)) => Value::Bool(false),
                    (Some(true), Some(true)) => Value::Bool(true),
                    _ => Value::Null,
                })
            }
            Self::Or(a, b) => {
                let a = truth(a.eval(row)?, "OR")?;
                if a == Some(true) {
                    return Ok(Value::Bool(true));
                }
                let b = truth(b.eval(row)?, "OR")?;
                Ok(match (a, b) {
                    (_, Some(true)) => Value::Bool(true),
                    (Some(false), Some(false)) => Value::Bool(false),
                    _ => Value::Null,
                })
            }
            Self::Not(e) => {
                let e = truth(e.eval(row)?, "NOT")?;
                Ok(e.map_or(Value::Null, |b| Value::Bool(!b)))
            }
        }
    }

    /// Evaluates as a filter: only `true` keeps the row.
    pub fn matches(&self, row: &[Value]) -> Result<bool, ExprError> {
        Ok(matches!(self.eval(row)?, Value::Bool(true)))
    }
}

/// Evaluates each expression against a row, producing the projected row.
pub(crate) fn eval_all<R>(exprs: &[BoundExpr], row: &[Value]) -> Result<R, ExprError>
where
    R: FromIterator<Value>,
{
    exprs.iter().map(|e| e.eval(row)).collect()
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Int(_) => "int",
        Value::Float(_) => "float",
        Value::Str(_) => "string",
    }
}

fn truth(v: Value, op: &'static str) -> Result<Option<bool>, ExprError> {
    match v {
        Value::Bool(b) => Ok(Some(b)),
        Value::Null => Ok(None),
        other => Err(ExprError::TypeMismatch {
            op,
            lhs: kind(&other),
            rhs: "bool",
        }),
    }
}

fn compare(op: CompareOp, a: &Value, b: &Value) -> Value {
    let ord = match (a, b) {
        (Value::Null, _) | (_, Value::Null) => return Value::Null,
        (Value::Int(x), Value::Int(y)) => Some(x.cmp(y)),
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x.partial_cmp(&y),
                _ => None,
            }
        }
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        (Value::Str(x), Value::Str(y)) => Some(x.cmp(y)),
        _ => None,
    };
    match (ord, op) {
        (Some(ord), _) => Value::Bool(op.holds(ord)),
        (None, CompareOp::Eq) => Value::Bool(false),
        (None, CompareOp::NotEq) => Value::Bool(true),
        (None, _) => Value::Null,
    }
}

fn arith(op: ArithOp, a: &Value, b: &Value) -> Result<Value, ExprError> {
    match (a, b) {
        (Value::Null, _) | (_, Value::Null) => Ok(Value::Null),
        (Value::Int(x), Value::Int(y)) => {
            let out = match op {
                ArithOp::Add => x.checked_add(*y),
                ArithOp::Sub => x.checked_sub(*y),
                ArithOp::Mul => x.checked_mul(*y),
            };
            out.map(Value::Int)
                .ok_or(ExprError::Overflow { op: op.symbol() })
        }
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            let (Some(x), Some(y)) = (a.as_f64(), b.as_f64()) else {
                return Ok(Value::Null);
            };
            Ok(Value::Float(match op {
                ArithOp::Add => x + y,
                ArithOp::Sub => x - y,
                ArithOp::Mul => x * y,
            }))
        }
        _ => Err(ExprError::TypeMismatch {
            op: op.symbol(),
            lhs: kind(a),
            rhs: kind(b),
        }),
    }
}

/// Binds a list of expressions against one schema.
pub(crate) fn bind_all(exprs: &[Expr], schema: &Schema) -> Result<Vec<BoundExpr>, ExprError> {
    exprs.iter().map(|e| e.bind(schema)).collect()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    fn row() -> Vec<Value> {
        vec![Value::Int(1), Value::Int(0), Value::from("school")]
    }

    fn eval(e: &Expr) -> Result<Value, ExprError> {
        e.bind(&Schema::canonical())?.eval(&row())
    }

    #[test]
    fn string_equality_over_value_column() {
        assert_eq!(eval(&col("v").eq("school")), Ok(Value::Bool(true)));
        assert_eq!(eval(&col("v").eq(1)), Ok(Value::Bool(false)));
    }

    #[test]
    fn cross_kind_ordering_is_null() {
        assert_eq!(eval(&col("v").lt(3)), Ok(Value::Null));
        assert_eq!(eval(&!col("v").lt(3)), Ok(Value::Null));
    }

    #[test]
    fn coordinate_arithmetic() {
        assert_eq!(eval(&(col("i") + 2 - col("j") * 3)), Ok(Value::Int(3)));
        assert_eq!(eval(&(col("i") + 0.5)), Ok(Value::Float(1.5)));
        assert_eq!(eval(&(lit(i64::MAX) + col("i"))), Err(ExprError::Overflow { op: "+" }));
    }

    #[test]
    fn arithmetic_on_strings_is_a_type_error() {
        assert!(matches!(
            eval(&(col("v") + 1)),
            Err(ExprError::TypeMismatch { op: "+", .. })
        ));
    }

    #[test]
    fn kleene_logic() {
        let null_cmp = col("v").lt(3);
        assert_eq!(eval(&null_cmp.clone().and(lit(false))), Ok(Value::Bool(false)));
        assert_eq!(eval(&null_cmp.clone().or(lit(true))), Ok(Value::Bool(true)));
        assert_eq!(eval(&null_cmp.and(lit(true))), Ok(Value::Null));
    }

    #[test]
    fn unknown_column_fails_at_bind() {
        assert_eq!(
            col("i2").bind(&Schema::canonical()),
            Err(ExprError::UnknownColumn(Arc::from("i2")))
        );
    }

    #[test]
    fn display_reads_like_sql() {
        let e = col("v1").eq("x").and(col("i2").gt(col("i1")));
        assert_eq!(alloc::format!("{e}"), "(v1 = 'x' AND i2 > i1)");
    }
}
