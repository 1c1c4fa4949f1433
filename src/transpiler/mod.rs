//! SQL generation for remote dialects.
//!
//! Converts a SELECT AST into SQL text for one target database.

pub mod conditions;
pub mod descriptor;
pub mod dialect;
pub mod expr;
pub mod pagination;
pub mod rewrite;
pub mod select;
pub mod sql;
pub mod traits;

#[cfg(test)]
mod tests;

use crate::ast::Select;
use crate::error::PushdownResult;
pub use descriptor::{CaseHandling, DialectDescriptor, NullSorting, QuoteStyle};
pub use dialect::{Dialect, SqlDialect};
pub use pagination::LimitStrategy;
pub use traits::SqlGenerator;

/// Trait for converting AST nodes to SQL.
pub trait ToSql {
    /// Convert this node to a SQL string for the given dialect.
    fn to_sql_with_dialect(&self, dialect: &SqlDialect) -> PushdownResult<String>;
}

impl ToSql for Select {
    fn to_sql_with_dialect(&self, dialect: &SqlDialect) -> PushdownResult<String> {
        dialect.generate(self)
    }
}
