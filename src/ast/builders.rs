//! Ergonomic AST builders.
//!
//! ```ignore
//! use pushdown::ast::builders::*;
//! let p = and([eq(col_a, int(1)), is_null(col_b)]);
//! ```

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::ast::{
    AggregateCall, AggregateFunction, CompareOp, Expr, IntervalKind, Literal, OrderByItem,
    Predicate, ScalarCall, ScalarFunction,
};

fn compare(op: CompareOp, left: impl Into<Expr>, right: impl Into<Expr>) -> Expr {
    Predicate::Compare {
        op,
        left: Box::new(left.into()),
        right: Box::new(right.into()),
    }
    .into()
}

/// `left = right`
pub fn eq(left: impl Into<Expr>, right: impl Into<Expr>) -> Expr {
    compare(CompareOp::Equal, left, right)
}

pub fn ne(left: impl Into<Expr>, right: impl Into<Expr>) -> Expr {
    compare(CompareOp::NotEqual, left, right)
}

pub fn lt(left: impl Into<Expr>, right: impl Into<Expr>) -> Expr {
    compare(CompareOp::Less, left, right)
}

pub fn lte(left: impl Into<Expr>, right: impl Into<Expr>) -> Expr {
    compare(CompareOp::LessEqual, left, right)
}

pub fn gt(left: impl Into<Expr>, right: impl Into<Expr>) -> Expr {
    compare(CompareOp::Greater, left, right)
}

pub fn gte(left: impl Into<Expr>, right: impl Into<Expr>) -> Expr {
    compare(CompareOp::GreaterEqual, left, right)
}

pub fn and(items: impl IntoIterator<Item = Expr>) -> Expr {
    Predicate::And(items.into_iter().collect()).into()
}

pub fn or(items: impl IntoIterator<Item = Expr>) -> Expr {
    Predicate::Or(items.into_iter().collect()).into()
}

pub fn not(expr: impl Into<Expr>) -> Expr {
    Predicate::Not(Box::new(expr.into())).into()
}

pub fn like(expr: impl Into<Expr>, pattern: impl Into<Expr>) -> Expr {
    Predicate::Like {
        expr: Box::new(expr.into()),
        pattern: Box::new(pattern.into()),
        escape: None,
    }
    .into()
}

pub fn like_escape(
    expr: impl Into<Expr>,
    pattern: impl Into<Expr>,
    escape: impl Into<Expr>,
) -> Expr {
    Predicate::Like {
        expr: Box::new(expr.into()),
        pattern: Box::new(pattern.into()),
        escape: Some(Box::new(escape.into())),
    }
    .into()
}

pub fn between(expr: impl Into<Expr>, low: impl Into<Expr>, high: impl Into<Expr>) -> Expr {
    Predicate::Between {
        expr: Box::new(expr.into()),
        low: Box::new(low.into()),
        high: Box::new(high.into()),
    }
    .into()
}

pub fn is_in(expr: impl Into<Expr>, values: impl IntoIterator<Item = Expr>) -> Expr {
    Predicate::InList {
        expr: Box::new(expr.into()),
        values: values.into_iter().collect(),
    }
    .into()
}

pub fn is_null(expr: impl Into<Expr>) -> Expr {
    Predicate::IsNull {
        expr: Box::new(expr.into()),
        negated: false,
    }
    .into()
}

pub fn is_not_null(expr: impl Into<Expr>) -> Expr {
    Predicate::IsNull {
        expr: Box::new(expr.into()),
        negated: true,
    }
    .into()
}

/// Create an exact integer literal
pub fn int(value: i64) -> Expr {
    Literal::from(value).into()
}

/// Create an exact decimal literal
pub fn decimal(value: Decimal) -> Expr {
    Literal::ExactNumeric(value).into()
}

/// Create a double literal
pub fn double(value: f64) -> Expr {
    Literal::Double(value).into()
}

/// Create a string literal
pub fn text(value: &str) -> Expr {
    Literal::from(value).into()
}

/// Create a boolean literal
pub fn boolean(value: bool) -> Expr {
    Literal::Bool(value).into()
}

/// Create a NULL literal
pub fn null() -> Expr {
    Literal::Null.into()
}

pub fn date(value: NaiveDate) -> Expr {
    Literal::Date(value).into()
}

pub fn timestamp(value: NaiveDateTime) -> Expr {
    Literal::Timestamp(value).into()
}

pub fn interval(value: &str, kind: IntervalKind) -> Expr {
    Literal::Interval {
        value: value.to_string(),
        kind,
    }
    .into()
}

/// Scalar function or operator call.
pub fn scalar(function: ScalarFunction, args: impl IntoIterator<Item = Expr>) -> Expr {
    ScalarCall {
        function,
        args: args.into_iter().collect(),
    }
    .into()
}

/// Plain aggregate call.
pub fn aggregate(function: AggregateFunction, args: impl IntoIterator<Item = Expr>) -> Expr {
    AggregateCall {
        function,
        args: args.into_iter().collect(),
        distinct: false,
        order_by: Vec::new(),
        separator: None,
    }
    .into()
}

/// Aggregate over distinct values.
pub fn aggregate_distinct(
    function: AggregateFunction,
    args: impl IntoIterator<Item = Expr>,
) -> Expr {
    AggregateCall {
        function,
        args: args.into_iter().collect(),
        distinct: true,
        order_by: Vec::new(),
        separator: None,
    }
    .into()
}

/// `COUNT(*)`
pub fn count_star() -> Expr {
    aggregate(AggregateFunction::Count, Vec::new())
}

/// Group concatenation with optional ordering and separator.
pub fn group_concat(
    expr: impl Into<Expr>,
    distinct: bool,
    order_by: Vec<OrderByItem>,
    separator: Option<&str>,
) -> Expr {
    AggregateCall {
        function: AggregateFunction::GroupConcat,
        args: vec![expr.into()],
        distinct,
        order_by,
        separator: separator.map(str::to_string),
    }
    .into()
}

/// Ascending key with the given null placement.
pub fn asc(expr: impl Into<Expr>, nulls_last: bool) -> OrderByItem {
    OrderByItem {
        expr: expr.into(),
        ascending: true,
        nulls_last,
    }
}

/// Descending key with the given null placement.
pub fn desc(expr: impl Into<Expr>, nulls_last: bool) -> OrderByItem {
    OrderByItem {
        expr: expr.into(),
        ascending: false,
        nulls_last,
    }
}
