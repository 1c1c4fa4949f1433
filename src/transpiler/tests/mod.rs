//! Transpiler test modules.
//!
//! Tests are organized by category:
//! - `core`: SELECT clauses, literals, NULL ordering, AST errors
//! - `dialects`: quoting and table qualification per dialect
//! - `functions`: rewrites and precision casts
//! - `pagination`: the four row-limit strategies end to end
//! - `capabilities`: every declared token has a rendering path

mod core;
mod pagination;

use crate::ast::{ColumnMetadata, TableRef};
use crate::config::{DialectProperties, SchemaNotes};
use crate::transpiler::{Dialect, SqlDialect};
use crate::types::{CanonicalType, Charset};

/// `SHOP.SALES.ORDERS` with four columns in ordinal order.
pub(super) fn orders() -> TableRef {
    TableRef::new("ORDERS")
        .catalog("SHOP")
        .schema("SALES")
        .column(ColumnMetadata::new("ID", CanonicalType::decimal(10, 0), "INTEGER"))
        .column(ColumnMetadata::new("AMOUNT", CanonicalType::decimal(12, 2), "DECIMAL"))
        .column(ColumnMetadata::new("NOTE", CanonicalType::varchar(200, Charset::Utf8), "VARCHAR"))
        .column(ColumnMetadata::new("CREATED", CanonicalType::Date, "DATE"))
}

/// The same table spelled in lower case, for folding-to-lower dialects.
pub(super) fn lower_orders() -> TableRef {
    TableRef::new("orders")
        .schema("sales")
        .column(ColumnMetadata::new("id", CanonicalType::decimal(10, 0), "integer"))
        .column(ColumnMetadata::new("amount", CanonicalType::decimal(12, 2), "numeric"))
        .column(ColumnMetadata::new("note", CanonicalType::varchar(200, Charset::Utf8), "varchar"))
        .column(ColumnMetadata::new("created", CanonicalType::Date, "date"))
}

/// Schema notes of an upper-casing, double-quoting driver.
pub(super) fn ansi_notes() -> SchemaNotes {
    SchemaNotes {
        identifier_quote: "\"".to_string(),
        stores_upper_case_identifiers: true,
        supports_mixed_case_quoted_identifiers: true,
        nulls_are_sorted_high: true,
        supports_schemas_in_data_manipulation: true,
        ..SchemaNotes::default()
    }
}

pub(super) fn dialect(dialect: Dialect) -> SqlDialect {
    match dialect {
        Dialect::Generic => SqlDialect::new(
            dialect,
            &DialectProperties::default().with_schema_notes(ansi_notes()),
        )
        .unwrap(),
        _ => SqlDialect::of(dialect).unwrap(),
    }
}
