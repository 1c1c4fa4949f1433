//! # pushdown — SQL generation for remote databases
//!
//! Renders a relational SELECT tree as SQL text for one of thirteen target
//! dialects, declares per dialect which constructs can be pushed down, and
//! maps remote column types into a fixed canonical type system.
//!
//! ## Quick Example
//!
//! ```rust
//! use pushdown::prelude::*;
//!
//! let orders = TableRef::new("orders")
//!     .schema("sales")
//!     .column(ColumnMetadata::new("id", CanonicalType::decimal(10, 0), "numeric"))
//!     .column(ColumnMetadata::new("note", CanonicalType::max_varchar(Charset::Utf8), "text"));
//! let id = orders.col(0).unwrap();
//!
//! let select = Select::from(orders).filter(gt(id, int(100))).limit(5);
//! let dialect = SqlDialect::of(Dialect::PostgreSql).unwrap();
//! assert_eq!(
//!     generate(&select, &dialect).unwrap(),
//!     "SELECT * FROM sales.orders WHERE orders.id > 100 LIMIT 5"
//! );
//! ```
//!
//! ## Components
//!
//! | Module         | Role                                              |
//! |----------------|---------------------------------------------------|
//! | `types`        | canonical types, remote type mapping              |
//! | `capabilities` | capability tokens and the per-dialect registry    |
//! | `transpiler`   | descriptors, rewrite engine, SELECT visitor       |
//! | `config`       | dialect properties loaded from TOML               |

pub mod ast;
pub mod capabilities;
pub mod config;
pub mod error;
pub mod transpiler;
pub mod types;

pub mod prelude {
    pub use crate::ast::builders::*;
    pub use crate::ast::*;
    pub use crate::capabilities::{CapabilitySet, capabilities_for, required_capabilities};
    pub use crate::config::{DialectProperties, SchemaNotes};
    pub use crate::error::*;
    pub use crate::generate;
    pub use crate::transpiler::{Dialect, SqlDialect, ToSql};
    pub use crate::types::{CanonicalType, Charset, RemoteType};
}

/// Generate SQL for `select` in `dialect`.
///
/// # Example
///
/// ```
/// use pushdown::prelude::*;
///
/// let select = Select::from(TableRef::new("T")).any_column();
/// let dialect = SqlDialect::of(Dialect::Oracle).unwrap();
/// assert_eq!(generate(&select, &dialect).unwrap(), "SELECT 1 FROM T");
/// ```
pub fn generate(
    select: &ast::Select,
    dialect: &transpiler::SqlDialect,
) -> error::PushdownResult<String> {
    dialect.generate(select)
}
