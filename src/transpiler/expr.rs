//! Expression rendering.
//!
//! Whether a node sits directly in the select list changes how columns,
//! numeric literals and precision-sensitive calls render, so the position
//! is threaded through the recursion.

use super::conditions::render_predicate;
use super::rewrite::{rewrite_aggregate, rewrite_scalar};
use super::traits::{AggregateSql, SqlGenerator};
use crate::ast::{AggregateCall, ColumnRef, Expr, Literal, OrderByItem, ScalarCall};
use crate::error::{PushdownError, PushdownResult};

/// Where an expression is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// An item of the select list itself.
    SelectListDirect,
    /// Anywhere else: inside an expression, predicate, group-by or order-by.
    Nested,
}

pub fn render_expr(
    expr: &Expr,
    generator: &dyn SqlGenerator,
    position: Position,
) -> PushdownResult<String> {
    match expr {
        Expr::Column(column) => Ok(render_column(column, generator, position)),
        Expr::Literal(literal) => render_literal(literal, generator, position),
        Expr::Predicate(predicate) => render_predicate(predicate, generator),
        Expr::Scalar(call) => render_scalar(call, generator, position),
        Expr::Aggregate(call) => render_aggregate(call, generator, position),
    }
}

/// Render each expression in nested position.
pub fn render_nested(exprs: &[Expr], generator: &dyn SqlGenerator) -> PushdownResult<Vec<String>> {
    exprs
        .iter()
        .map(|e| render_expr(e, generator, Position::Nested))
        .collect()
}

/// Render an operand of an operator or function call.
///
/// Predicates are parenthesized unless they already delimit themselves, so
/// `(A = B) IS NULL` never degrades to `A = B IS NULL`.
pub fn render_operand(expr: &Expr, generator: &dyn SqlGenerator) -> PushdownResult<String> {
    let sql = render_expr(expr, generator, Position::Nested)?;
    match expr {
        Expr::Predicate(predicate) if !predicate.is_self_delimited() => Ok(format!("({})", sql)),
        _ => Ok(sql),
    }
}

/// Render each expression as an operand.
pub fn render_operands(exprs: &[Expr], generator: &dyn SqlGenerator) -> PushdownResult<Vec<String>> {
    exprs.iter().map(|e| render_operand(e, generator)).collect()
}

/// `qualifier.column`, without any projection.
pub fn plain_column(column: &ColumnRef, generator: &dyn SqlGenerator) -> String {
    let descriptor = generator.descriptor();
    format!(
        "{}.{}",
        descriptor.quote_if_needed(column.qualifier()),
        descriptor.quote_if_needed(&column.metadata.name)
    )
}

pub fn render_column(column: &ColumnRef, generator: &dyn SqlGenerator, position: Position) -> String {
    let sql = plain_column(column, generator);
    if position == Position::SelectListDirect {
        if let Some(projected) = generator.project_column(&column.metadata, &sql) {
            return projected;
        }
    }
    sql
}

fn render_literal(
    literal: &Literal,
    generator: &dyn SqlGenerator,
    position: Position,
) -> PushdownResult<String> {
    let sql = match literal {
        Literal::Null => "NULL".to_string(),
        Literal::Bool(b) => generator.bool_literal(*b),
        Literal::ExactNumeric(d) => d.to_string(),
        Literal::Double(f) if !f.is_finite() => {
            return Err(PushdownError::invalid_ast(
                "double literal",
                format!("{} has no SQL representation", f),
            ));
        }
        Literal::Double(f) => format!("{:?}", f),
        Literal::Date(d) => generator.date_literal(*d),
        Literal::Timestamp(ts) => generator.timestamp_literal(*ts),
        Literal::String(s) => generator.descriptor().string_literal(s),
        Literal::Interval { value, kind } => generator.interval_literal(value, *kind),
    };
    let numeric = matches!(literal, Literal::ExactNumeric(_) | Literal::Double(_));
    if numeric && position == Position::SelectListDirect {
        return Ok(generator.select_list_numeric(sql));
    }
    Ok(sql)
}

fn check_arity(
    node: &'static str,
    name: &str,
    (min, max): (usize, Option<usize>),
    got: usize,
) -> PushdownResult<()> {
    let ok = got >= min && max.is_none_or(|max| got <= max);
    if ok {
        return Ok(());
    }
    let expected = match max {
        Some(max) if max == min => format!("{}", min),
        Some(max) => format!("{} to {}", min, max),
        None => format!("at least {}", min),
    };
    Err(PushdownError::invalid_ast(
        node,
        format!("{} expects {} argument(s), got {}", name, expected, got),
    ))
}

fn render_scalar(
    call: &ScalarCall,
    generator: &dyn SqlGenerator,
    position: Position,
) -> PushdownResult<String> {
    check_arity(
        "scalar function",
        call.function.name(),
        generator.descriptor().scalar_arity(call.function),
        call.args.len(),
    )?;
    let args = render_operands(&call.args, generator)?;
    let sql = rewrite_scalar(generator, call.function, &args);
    let descriptor = generator.descriptor();
    if position == Position::SelectListDirect && descriptor.needs_scalar_cast(call.function) {
        return Ok(format!("CAST({} AS {})", sql, descriptor.double_type));
    }
    Ok(sql)
}

fn render_aggregate(
    call: &AggregateCall,
    generator: &dyn SqlGenerator,
    position: Position,
) -> PushdownResult<String> {
    check_arity(
        "aggregate function",
        call.function.name(),
        call.function.arity(),
        call.args.len(),
    )?;
    if call.distinct && call.args.is_empty() {
        return Err(PushdownError::invalid_ast(
            "aggregate function",
            format!("DISTINCT {} requires an argument", call.function.name()),
        ));
    }
    let args = render_operands(&call.args, generator)?;
    let order_by = if call.order_by.is_empty() {
        None
    } else {
        Some(render_order_by(&call.order_by, generator)?)
    };
    let sql = rewrite_aggregate(
        generator,
        &AggregateSql {
            function: call.function,
            args: &args,
            distinct: call.distinct,
            order_by: order_by.as_deref(),
            separator: call.separator.as_deref(),
        },
    );
    let descriptor = generator.descriptor();
    if position == Position::SelectListDirect && descriptor.needs_aggregate_cast(call.function) {
        return Ok(format!("CAST({} AS {})", sql, descriptor.double_type));
    }
    Ok(sql)
}

/// Comma-separated ordering keys, without the `ORDER BY` keyword.
///
/// Where `NULLS FIRST/LAST` cannot be written and the requested placement
/// differs from the default, a leading `CASE` key forces it.
pub fn render_order_by(items: &[OrderByItem], generator: &dyn SqlGenerator) -> PushdownResult<String> {
    let descriptor = generator.descriptor();
    let mut keys = Vec::with_capacity(items.len());
    for item in items {
        let expr = render_expr(&item.expr, generator, Position::Nested)?;
        let direction = if item.ascending { "ASC" } else { "DESC" };
        if descriptor.supports_null_ordering_clause() {
            let nulls = if item.nulls_last { "LAST" } else { "FIRST" };
            keys.push(format!("{} {} NULLS {}", expr, direction, nulls));
            continue;
        }
        if descriptor.default_null_sorting().nulls_last(item.ascending) != item.nulls_last {
            let (null_key, value_key) = if item.nulls_last { (1, 0) } else { (0, 1) };
            keys.push(format!(
                "CASE WHEN {} IS NULL THEN {} ELSE {} END",
                expr, null_key, value_key
            ));
        }
        keys.push(format!("{} {}", expr, direction));
    }
    Ok(keys.join(", "))
}
