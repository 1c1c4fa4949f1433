//! One generator per target: descriptor data, function overrides, column
//! projections, type claims and the capability table.

pub mod athena;
pub mod db2;
pub mod generic;
pub mod hive;
pub mod impala;
pub mod mysql;
pub mod native;
pub mod oracle;
pub mod postgres;
pub mod redshift;
pub mod sqlserver;
pub mod sybase;
pub mod teradata;

/// Scalar functions every dialect renders as `NAME(args)` or an operator.
pub(crate) fn all_scalars() -> impl Iterator<Item = crate::ast::ScalarFunction> {
    crate::ast::ScalarFunction::ALL.iter().copied()
}

/// The literal tokens every relational target writes the same way.
pub(crate) fn standard_literals() -> [crate::capabilities::LiteralCapability; 6] {
    use crate::capabilities::LiteralCapability::*;
    [Null, Date, Timestamp, Double, ExactNumeric, String]
}
