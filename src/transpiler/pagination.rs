//! Row limiting.
//!
//! Four mutually exclusive strategies; each dialect declares exactly one.

use crate::error::{PushdownError, PushdownResult};

/// How a dialect limits rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitStrategy {
    /// `... LIMIT n [OFFSET m]`
    Trailing,
    /// `... FETCH FIRST n ROWS ONLY`
    FetchFirst,
    /// `SELECT TOP n ...`
    Top,
    /// Nested subqueries filtered on `ROWNUM`.
    RowNum,
}

impl LimitStrategy {
    /// Whether an offset can be expressed.
    pub fn supports_offset(self) -> bool {
        matches!(self, LimitStrategy::Trailing | LimitStrategy::RowNum)
    }
}

/// What the limit rewrite needs from the inner query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InnerRequest {
    /// Emit `TOP n` after `SELECT`.
    pub top: Option<u64>,
    /// Alias select-list items `c0, c1, ...`, expanding `*`.
    pub positional_aliases: bool,
}

/// The rendered inner query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InnerQuery {
    pub sql: String,
    /// Number of select-list items; meaningful when aliases were requested.
    pub column_count: usize,
}

pub const LIMIT_SUBSELECT: &str = "LIMIT_SUBSELECT";
pub const ROWNUM_SUB: &str = "ROWNUM_SUB";

/// Positional alias of the select-list item at `index`.
pub fn positional_alias(index: usize) -> String {
    format!("c{}", index)
}

/// Apply `strategy` to the query produced by `build_inner`.
pub fn rewrite_limit(
    strategy: LimitStrategy,
    build_inner: impl Fn(InnerRequest) -> PushdownResult<InnerQuery>,
    count: u64,
    offset: Option<u64>,
) -> PushdownResult<String> {
    if offset.is_some() && !strategy.supports_offset() {
        return Err(PushdownError::invalid_ast(
            "limit",
            format!("{:?} pagination cannot express an offset", strategy),
        ));
    }

    match strategy {
        LimitStrategy::Trailing => {
            let inner = build_inner(InnerRequest::default())?;
            Ok(match offset {
                Some(offset) => format!("{} LIMIT {} OFFSET {}", inner.sql, count, offset),
                None => format!("{} LIMIT {}", inner.sql, count),
            })
        }
        LimitStrategy::FetchFirst => {
            let inner = build_inner(InnerRequest::default())?;
            Ok(format!("{} FETCH FIRST {} ROWS ONLY", inner.sql, count))
        }
        LimitStrategy::Top => {
            let inner = build_inner(InnerRequest {
                top: Some(count),
                ..InnerRequest::default()
            })?;
            Ok(inner.sql)
        }
        LimitStrategy::RowNum => match offset {
            None => {
                let inner = build_inner(InnerRequest::default())?;
                Ok(format!(
                    "SELECT {sub}.* FROM ({inner}) {sub} WHERE ROWNUM <= {count}",
                    sub = LIMIT_SUBSELECT,
                    inner = inner.sql,
                    count = count
                ))
            }
            Some(offset) => {
                let upper = count.checked_add(offset).ok_or_else(|| {
                    PushdownError::invalid_ast("limit", "count plus offset overflows")
                })?;
                let inner = build_inner(InnerRequest {
                    positional_aliases: true,
                    ..InnerRequest::default()
                })?;
                let outer_columns = (0..inner.column_count)
                    .map(positional_alias)
                    .collect::<Vec<_>>()
                    .join(", ");
                Ok(format!(
                    "SELECT {cols} FROM (SELECT {sub}.*, ROWNUM {rn} FROM ({inner}) {sub} WHERE ROWNUM <= {upper}) WHERE {rn} > {offset}",
                    cols = outer_columns,
                    sub = LIMIT_SUBSELECT,
                    rn = ROWNUM_SUB,
                    inner = inner.sql,
                    upper = upper,
                    offset = offset
                ))
            }
        },
    }
}
