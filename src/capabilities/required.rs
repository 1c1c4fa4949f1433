//! Capabilities a query needs in order to be pushed down.

use super::{
    AggregateCapability, CapabilitySet, LiteralCapability, MainCapability, PredicateCapability,
};
use crate::ast::{
    AggregateCall, AggregateFunction, CompareOp, Expr, Literal, Predicate, Select, SelectList,
};

/// Collect every token `select` uses.
pub fn required_capabilities(select: &Select) -> CapabilitySet {
    let mut caps = CapabilitySet::default();

    if let SelectList::Exprs(exprs) = &select.select_list {
        let token = if exprs.iter().all(Expr::is_column) {
            MainCapability::SelectListProjection
        } else {
            MainCapability::SelectListExpressions
        };
        caps.main.insert(token);
        exprs.iter().for_each(|e| collect(e, &mut caps));
    }

    if let Some(filter) = &select.where_clause {
        caps.main.insert(MainCapability::FilterExpressions);
        collect(filter, &mut caps);
    }

    if !select.group_by.is_empty() {
        let token = if select.group_by.iter().all(Expr::is_column) {
            MainCapability::AggregateGroupByColumn
        } else {
            MainCapability::AggregateGroupByExpression
        };
        caps.main.insert(token);
        select.group_by.iter().for_each(|e| collect(e, &mut caps));
    } else if select.has_aggregates() {
        caps.main.insert(MainCapability::AggregateSingleGroup);
    }

    if let Some(having) = &select.having {
        caps.main.insert(MainCapability::AggregateHaving);
        collect(having, &mut caps);
    }

    for item in &select.order_by {
        let token = if item.expr.is_column() {
            MainCapability::OrderByColumn
        } else {
            MainCapability::OrderByExpression
        };
        caps.main.insert(token);
        collect(&item.expr, &mut caps);
    }

    if let Some(limit) = &select.limit {
        caps.main.insert(MainCapability::Limit);
        if limit.offset.is_some() {
            caps.main.insert(MainCapability::LimitWithOffset);
        }
    }

    caps
}

fn collect(expr: &Expr, caps: &mut CapabilitySet) {
    match expr {
        Expr::Column(_) => {}
        Expr::Literal(lit) => {
            caps.literals.insert(literal_token(lit));
        }
        Expr::Predicate(p) => {
            caps.predicates.insert(predicate_token(p));
            if let Predicate::Like {
                escape: Some(_), ..
            } = p.as_ref()
            {
                caps.predicates.insert(PredicateCapability::Like);
            }
            p.operands().into_iter().for_each(|e| collect(e, caps));
        }
        Expr::Scalar(call) => {
            caps.scalar_functions.insert(call.function);
            call.args.iter().for_each(|e| collect(e, caps));
        }
        Expr::Aggregate(call) => {
            caps.aggregate_functions.extend(aggregate_tokens(call));
            call.args.iter().for_each(|e| collect(e, caps));
            call.order_by.iter().for_each(|o| collect(&o.expr, caps));
        }
    }
}

fn literal_token(lit: &Literal) -> LiteralCapability {
    match lit {
        Literal::Null => LiteralCapability::Null,
        Literal::Bool(_) => LiteralCapability::Bool,
        Literal::ExactNumeric(_) => LiteralCapability::ExactNumeric,
        Literal::Double(_) => LiteralCapability::Double,
        Literal::Date(_) => LiteralCapability::Date,
        Literal::Timestamp(_) => LiteralCapability::Timestamp,
        Literal::String(_) => LiteralCapability::String,
        Literal::Interval { .. } => LiteralCapability::Interval,
    }
}

fn predicate_token(p: &Predicate) -> PredicateCapability {
    match p {
        Predicate::And(_) => PredicateCapability::And,
        Predicate::Or(_) => PredicateCapability::Or,
        Predicate::Not(_) => PredicateCapability::Not,
        Predicate::Compare { op, .. } => match op {
            CompareOp::Equal => PredicateCapability::Equal,
            CompareOp::NotEqual => PredicateCapability::NotEqual,
            CompareOp::Less => PredicateCapability::Less,
            CompareOp::LessEqual => PredicateCapability::LessEqual,
            CompareOp::Greater => PredicateCapability::Greater,
            CompareOp::GreaterEqual => PredicateCapability::GreaterEqual,
        },
        Predicate::Like { escape: None, .. } => PredicateCapability::Like,
        Predicate::Like { escape: Some(_), .. } => PredicateCapability::LikeEscape,
        Predicate::Between { .. } => PredicateCapability::Between,
        Predicate::InList { .. } => PredicateCapability::InConstList,
        Predicate::IsNull { negated: false, .. } => PredicateCapability::IsNull,
        Predicate::IsNull { negated: true, .. } => PredicateCapability::IsNotNull,
    }
}

fn aggregate_tokens(call: &AggregateCall) -> Vec<AggregateCapability> {
    use AggregateCapability as A;
    match call.function {
        AggregateFunction::Count if call.args.is_empty() => vec![A::CountStar],
        AggregateFunction::Count if call.distinct => vec![A::CountDistinct],
        AggregateFunction::Count => vec![A::Count],
        AggregateFunction::Sum if call.distinct => vec![A::SumDistinct],
        AggregateFunction::Sum => vec![A::Sum],
        AggregateFunction::Avg if call.distinct => vec![A::AvgDistinct],
        AggregateFunction::Avg => vec![A::Avg],
        AggregateFunction::Min => vec![A::Min],
        AggregateFunction::Max => vec![A::Max],
        AggregateFunction::Median => vec![A::Median],
        AggregateFunction::Stddev => vec![A::Stddev],
        AggregateFunction::Variance => vec![A::Variance],
        AggregateFunction::GroupConcat => {
            let mut tokens = vec![A::GroupConcat];
            if call.distinct {
                tokens.push(A::GroupConcatDistinct);
            }
            if call.separator.is_some() {
                tokens.push(A::GroupConcatSeparator);
            }
            if !call.order_by.is_empty() {
                tokens.push(A::GroupConcatOrderBy);
            }
            tokens
        }
    }
}
