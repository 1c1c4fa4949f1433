//! Predicate rendering.

use super::expr::{Position, render_expr, render_nested, render_operand, render_operands};
use super::traits::SqlGenerator;
use crate::ast::{Expr, Predicate};
use crate::error::{PushdownError, PushdownResult};

pub fn render_predicate(
    predicate: &Predicate,
    generator: &dyn SqlGenerator,
) -> PushdownResult<String> {
    match predicate {
        Predicate::And(items) => junction("AND", items, generator),
        Predicate::Or(items) => junction("OR", items, generator),
        Predicate::Not(expr) => Ok(format!("NOT ({})", nested(expr, generator)?)),
        Predicate::Compare { op, left, right } => Ok(format!(
            "{} {} {}",
            operand(left, generator)?,
            op.sql_symbol(),
            operand(right, generator)?
        )),
        Predicate::Like {
            expr,
            pattern,
            escape,
        } => {
            let mut sql = format!("{} LIKE {}", operand(expr, generator)?, operand(pattern, generator)?);
            if let Some(escape) = escape {
                sql.push_str(&format!(" ESCAPE {}", operand(escape, generator)?));
            }
            Ok(sql)
        }
        Predicate::Between { expr, low, high } => Ok(format!(
            "{} BETWEEN {} AND {}",
            operand(expr, generator)?,
            operand(low, generator)?,
            operand(high, generator)?
        )),
        Predicate::InList { expr, values } => {
            if values.is_empty() {
                return Err(PushdownError::invalid_ast("IN", "empty value list"));
            }
            Ok(format!(
                "{} IN ({})",
                operand(expr, generator)?,
                render_operands(values, generator)?.join(", ")
            ))
        }
        Predicate::IsNull { expr, negated } => {
            let op = if *negated { "IS NOT NULL" } else { "IS NULL" };
            Ok(format!("{} {}", operand(expr, generator)?, op))
        }
    }
}

fn nested(expr: &Expr, generator: &dyn SqlGenerator) -> PushdownResult<String> {
    render_expr(expr, generator, Position::Nested)
}

fn operand(expr: &Expr, generator: &dyn SqlGenerator) -> PushdownResult<String> {
    render_operand(expr, generator)
}

/// `(a AND b AND ...)`; a single operand renders bare.
fn junction(keyword: &'static str, items: &[Expr], generator: &dyn SqlGenerator) -> PushdownResult<String> {
    let parts = render_nested(items, generator)?;
    match parts.len() {
        0 => Err(PushdownError::invalid_ast(keyword, "no operands")),
        1 => Ok(parts.into_iter().next().unwrap_or_default()),
        _ => Ok(format!("({})", parts.join(&format!(" {} ", keyword)))),
    }
}
