//! Transpiler traits and utilities.

use chrono::{NaiveDate, NaiveDateTime};

use super::descriptor::DialectDescriptor;
use crate::ast::{AggregateFunction, ColumnMetadata, IntervalKind, ScalarFunction};
use crate::types::{CanonicalType, RemoteType};

/// SQL reserved words that must be quoted when used as identifiers.
pub const RESERVED_WORDS: &[&str] = &[
    "order",
    "group",
    "user",
    "table",
    "select",
    "from",
    "where",
    "join",
    "left",
    "right",
    "inner",
    "outer",
    "on",
    "and",
    "or",
    "not",
    "null",
    "true",
    "false",
    "limit",
    "offset",
    "as",
    "in",
    "is",
    "like",
    "between",
    "having",
    "union",
    "all",
    "distinct",
    "case",
    "when",
    "then",
    "else",
    "end",
    "create",
    "alter",
    "drop",
    "insert",
    "update",
    "delete",
    "index",
    "key",
    "primary",
    "foreign",
    "references",
    "default",
    "constraint",
    "check",
    "date",
    "timestamp",
    "time",
    "level",
    "rownum",
    "size",
    "comment",
    "number",
    "value",
    "values",
];

pub fn is_reserved_word(identifier: &str) -> bool {
    let lower = identifier.to_ascii_lowercase();
    RESERVED_WORDS.contains(&lower.as_str())
}

/// An aggregate call with its arguments already rendered.
#[derive(Debug, Clone, Copy)]
pub struct AggregateSql<'a> {
    pub function: AggregateFunction,
    pub args: &'a [String],
    pub distinct: bool,
    /// Rendered `ORDER BY` keys, without the keyword.
    pub order_by: Option<&'a str>,
    /// Raw separator text, unquoted.
    pub separator: Option<&'a str>,
}

impl AggregateSql<'_> {
    /// First argument, `*` when there is none.
    pub fn arg(&self) -> &str {
        self.args.first().map(String::as_str).unwrap_or("*")
    }

    /// `DISTINCT ` when requested.
    pub fn distinct_prefix(&self) -> &'static str {
        if self.distinct { "DISTINCT " } else { "" }
    }

    /// Explicit order keys, else the concatenated expression itself.
    pub fn order_or_self(&self) -> &str {
        self.order_by.unwrap_or_else(|| self.arg())
    }

    /// The separator, defaulting to a comma.
    pub fn separator_or_default(&self) -> &str {
        self.separator.unwrap_or(",")
    }
}

/// Trait for dialect-specific SQL generation.
///
/// Everything with a sensible default is a provided method; a dialect
/// overrides only where its syntax or types differ.
pub trait SqlGenerator: Send + Sync {
    fn descriptor(&self) -> &DialectDescriptor;

    /// Claim a remote type before the shared base mapping runs.
    fn map_type(&self, _remote: &RemoteType) -> Option<CanonicalType> {
        None
    }

    /// Wrap a column that sits directly in the select list.
    /// `None` leaves the rendered column untouched.
    fn project_column(&self, _column: &ColumnMetadata, _sql: &str) -> Option<String> {
        None
    }

    /// Override a scalar function whose syntax is not a plain renamed call.
    fn rewrite_scalar(&self, _function: ScalarFunction, _args: &[String]) -> Option<String> {
        None
    }

    /// Override an aggregate whose syntax is not a plain renamed call.
    fn rewrite_aggregate(&self, _call: &AggregateSql<'_>) -> Option<String> {
        None
    }

    /// Get the boolean literal (TRUE/FALSE vs 1/0).
    fn bool_literal(&self, val: bool) -> String {
        if val { "TRUE".to_string() } else { "FALSE".to_string() }
    }

    fn date_literal(&self, date: NaiveDate) -> String {
        format!("DATE '{}'", date.format("%Y-%m-%d"))
    }

    fn timestamp_literal(&self, ts: NaiveDateTime) -> String {
        format!("TIMESTAMP '{}'", ts.format("%Y-%m-%d %H:%M:%S%.3f"))
    }

    fn interval_literal(&self, value: &str, kind: IntervalKind) -> String {
        let value = self.descriptor().string_literal(value);
        match kind {
            IntervalKind::YearToMonth { precision } => {
                format!("INTERVAL {} YEAR({}) TO MONTH", value, precision)
            }
            IntervalKind::DayToSecond {
                precision,
                fraction,
            } => format!(
                "INTERVAL {} DAY({}) TO SECOND({})",
                value, precision, fraction
            ),
        }
    }

    /// Numeric literal written directly into the select list.
    fn select_list_numeric(&self, sql: String) -> String {
        sql
    }
}
