use super::super::descriptor::{CaseHandling, DialectDescriptor, NullSorting, QuoteStyle};
use super::super::rewrite::{DateAdd, infix, trim_from, trim_side, with_default_arg};
use super::super::traits::SqlGenerator;
use super::{all_scalars, standard_literals};
use crate::ast::{AggregateFunction, ColumnMetadata, ScalarFunction};
use crate::capabilities::{
    AggregateCapability, CapabilitySet, LiteralCapability, MainCapability, standard_aggregates,
    standard_main, standard_predicates,
};
use crate::types::{CanonicalType, RemoteType, codes};

const SPATIAL: &[&str] = &[
    "GEOMETRY",
    "POINT",
    "LINESTRING",
    "POLYGON",
    "MULTIPOINT",
    "MULTILINESTRING",
    "MULTIPOLYGON",
    "GEOMETRYCOLLECTION",
];

static DESCRIPTOR: DialectDescriptor = DialectDescriptor {
    quote_style: QuoteStyle::Backtick,
    unquoted_case: CaseHandling::CaseSensitive,
    quoted_case: CaseHandling::CaseSensitive,
    // Databases are catalogs; there are no schemas.
    requires_catalog_qualified_names: true,
    requires_schema_qualified_names: false,
    null_sorting: NullSorting::Low,
    null_ordering_clause: false,
    // LENGTH counts bytes.
    scalar_aliases: &[(ScalarFunction::Length, "CHAR_LENGTH")],
    aggregate_aliases: &[
        (AggregateFunction::Stddev, "STDDEV_SAMP"),
        (AggregateFunction::Variance, "VAR_SAMP"),
    ],
    ..DialectDescriptor::standard("MYSQL")
};

pub struct MysqlGenerator;

fn is_spatial(name: &str) -> bool {
    SPATIAL.iter().any(|t| t.eq_ignore_ascii_case(name))
}

impl SqlGenerator for MysqlGenerator {
    fn descriptor(&self) -> &DialectDescriptor {
        &DESCRIPTOR
    }

    fn map_type(&self, remote: &RemoteType) -> Option<CanonicalType> {
        if is_spatial(&remote.type_name) {
            return Some(CanonicalType::geometry(0));
        }
        match remote.type_code {
            // Up to 64 bits: at most 20 decimal digits.
            codes::BIT if remote.size > 1 => Some(CanonicalType::decimal(20, 0)),
            _ if remote.is_named("YEAR") => Some(CanonicalType::decimal(4, 0)),
            _ => None,
        }
    }

    fn project_column(&self, column: &ColumnMetadata, sql: &str) -> Option<String> {
        if is_spatial(&column.type_name) {
            return Some(format!("ST_AsText({})", sql));
        }
        let numeric_bits =
            column.is_native("BIT") && matches!(column.data_type, CanonicalType::Decimal { .. });
        if numeric_bits || column.is_native("YEAR") {
            return Some(format!("CAST({} AS UNSIGNED)", sql));
        }
        None
    }

    fn rewrite_scalar(&self, function: ScalarFunction, args: &[String]) -> Option<String> {
        match function {
            ScalarFunction::Trim => Some(trim_from(args)),
            ScalarFunction::Ltrim => Some(trim_side("LTRIM", "LEADING", args)),
            ScalarFunction::Rtrim => Some(trim_side("RTRIM", "TRAILING", args)),
            ScalarFunction::Lpad => Some(with_default_arg("LPAD", args, 3, "' '")),
            ScalarFunction::Rpad => Some(with_default_arg("RPAD", args, 3, "' '")),
            ScalarFunction::Replace => Some(with_default_arg("REPLACE", args, 3, "''")),
            ScalarFunction::Trunc => Some(with_default_arg("TRUNCATE", args, 2, "0")),
            ScalarFunction::Div => Some(infix("DIV", args)),
            ScalarFunction::BitAnd => Some(infix("&", args)),
            ScalarFunction::BitOr => Some(infix("|", args)),
            ScalarFunction::BitXor => Some(infix("^", args)),
            _ => DateAdd::parse(function, args).map(|add| add.interval_call("DATE_ADD")),
        }
    }

    fn bool_literal(&self, val: bool) -> String {
        if val { "1".to_string() } else { "0".to_string() }
    }
}

pub(crate) fn capabilities() -> CapabilitySet {
    CapabilitySet::default()
        .main(standard_main())
        .main([MainCapability::Limit, MainCapability::LimitWithOffset])
        .predicates(standard_predicates())
        .literals(standard_literals())
        .literals([LiteralCapability::Bool])
        .scalars(all_scalars())
        .aggregates(standard_aggregates())
        .aggregates([
            AggregateCapability::Stddev,
            AggregateCapability::Variance,
            AggregateCapability::GroupConcat,
            AggregateCapability::GroupConcatDistinct,
            AggregateCapability::GroupConcatSeparator,
            AggregateCapability::GroupConcatOrderBy,
        ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_type_claims() {
        let g = MysqlGenerator;
        assert_eq!(
            g.map_type(&RemoteType::new(codes::BINARY, 0, 0, "POINT")),
            Some(CanonicalType::geometry(0))
        );
        assert_eq!(
            g.map_type(&RemoteType::new(codes::BIT, 12, 0, "BIT")),
            Some(CanonicalType::decimal(20, 0))
        );
        assert_eq!(g.map_type(&RemoteType::new(codes::BIT, 1, 0, "BIT")), None);
        assert_eq!(
            g.map_type(&RemoteType::new(codes::DATE, 4, 0, "YEAR")),
            Some(CanonicalType::decimal(4, 0))
        );
    }

    #[test]
    fn test_rewrites() {
        let g = MysqlGenerator;
        assert_eq!(
            g.rewrite_scalar(ScalarFunction::Ltrim, &args(&["`t`.`s`", "'x'"])).as_deref(),
            Some("TRIM(LEADING 'x' FROM `t`.`s`)")
        );
        assert_eq!(
            g.rewrite_scalar(ScalarFunction::Trunc, &args(&["a"])).as_deref(),
            Some("TRUNCATE(a, 0)")
        );
        assert_eq!(
            g.rewrite_scalar(ScalarFunction::Lpad, &args(&["a", "5"])).as_deref(),
            Some("LPAD(a, 5, ' ')")
        );
        assert_eq!(
            g.rewrite_scalar(ScalarFunction::AddHours, &args(&["a", "5"])).as_deref(),
            Some("DATE_ADD(a, INTERVAL 5 HOUR)")
        );
        assert_eq!(
            g.rewrite_scalar(ScalarFunction::Div, &args(&["a", "b"])).as_deref(),
            Some("(a DIV b)")
        );
    }
}
