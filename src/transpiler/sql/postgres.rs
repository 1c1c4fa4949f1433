use super::super::descriptor::{CaseHandling, DialectDescriptor};
use super::super::rewrite::{DateAdd, extract, infix, trim_from, with_default_arg};
use super::super::traits::{AggregateSql, SqlGenerator};
use super::{all_scalars, standard_literals};
use crate::ast::{AggregateFunction, ColumnMetadata, ScalarFunction};
use crate::capabilities::{
    AggregateCapability, CapabilitySet, LiteralCapability, MainCapability, standard_aggregates,
    standard_main, standard_predicates,
};
use crate::types::{CanonicalType, Charset, RemoteType, codes};

/// Types reported as `OTHER` that cast to text losslessly.
const TEXT_CASTABLE: &[&str] = &[
    "json", "jsonb", "uuid", "interval", "xml", "cidr", "inet", "macaddr", "macaddr8", "point",
    "line", "lseg", "box", "path", "polygon", "circle", "tsvector", "tsquery", "varbit", "citext",
];

/// Aggregates whose result precision the driver reports as `(0,0)`.
pub(crate) const PRECISION_LOSS_AGGREGATES: &[AggregateFunction] = &[
    AggregateFunction::Avg,
    AggregateFunction::Sum,
    AggregateFunction::Stddev,
    AggregateFunction::Variance,
    AggregateFunction::Median,
];

/// Scalars whose result precision the driver reports as `(0,0)`.
pub(crate) const PRECISION_LOSS_SCALARS: &[ScalarFunction] = &[
    ScalarFunction::Sqrt,
    ScalarFunction::Ln,
    ScalarFunction::Exp,
    ScalarFunction::Power,
    ScalarFunction::Round,
    ScalarFunction::Trunc,
];

static DESCRIPTOR: DialectDescriptor = DialectDescriptor {
    unquoted_case: CaseHandling::FoldLower,
    scalar_aliases: &[(ScalarFunction::Instr, "STRPOS")],
    cast_aggregates: PRECISION_LOSS_AGGREGATES,
    cast_scalars: PRECISION_LOSS_SCALARS,
    double_type: "DOUBLE PRECISION",
    ..DialectDescriptor::standard("POSTGRESQL")
};

pub struct PostgresGenerator;

fn is_text_castable(name: &str) -> bool {
    TEXT_CASTABLE.iter().any(|t| t.eq_ignore_ascii_case(name))
}

impl SqlGenerator for PostgresGenerator {
    fn descriptor(&self) -> &DialectDescriptor {
        &DESCRIPTOR
    }

    fn map_type(&self, remote: &RemoteType) -> Option<CanonicalType> {
        match remote.type_code {
            codes::OTHER if is_text_castable(&remote.type_name) => {
                Some(CanonicalType::max_varchar(Charset::Utf8))
            }
            codes::OTHER if remote.is_named("geometry") => Some(CanonicalType::geometry(0)),
            codes::BIT if remote.size > 1 => {
                Some(CanonicalType::varchar(i64::from(remote.size), Charset::Ascii))
            }
            codes::TIMESTAMP if remote.is_named("timestamptz") => {
                Some(CanonicalType::timestamp(true))
            }
            _ => None,
        }
    }

    fn project_column(&self, column: &ColumnMetadata, sql: &str) -> Option<String> {
        if is_text_castable(&column.type_name) {
            return Some(format!("CAST({} AS VARCHAR)", sql));
        }
        if column.is_native("bit") && matches!(column.data_type, CanonicalType::Varchar { .. }) {
            return Some(format!("CAST({} AS VARCHAR)", sql));
        }
        if column.is_native("geometry") {
            return Some(format!("ST_AsText({})", sql));
        }
        None
    }

    fn rewrite_scalar(&self, function: ScalarFunction, args: &[String]) -> Option<String> {
        match function {
            ScalarFunction::Trim => Some(trim_from(args)),
            ScalarFunction::BitAnd => Some(infix("&", args)),
            ScalarFunction::BitOr => Some(infix("|", args)),
            ScalarFunction::BitXor => Some(infix("#", args)),
            ScalarFunction::Replace => Some(with_default_arg("REPLACE", args, 3, "''")),
            ScalarFunction::Year => Some(extract("YEAR", args)),
            ScalarFunction::Month => Some(extract("MONTH", args)),
            ScalarFunction::Day => Some(extract("DAY", args)),
            _ => DateAdd::parse(function, args).map(|add| add.interval_literal("")),
        }
    }

    fn rewrite_aggregate(&self, call: &AggregateSql<'_>) -> Option<String> {
        match call.function {
            AggregateFunction::Median => Some(format!(
                "PERCENTILE_CONT(0.5) WITHIN GROUP (ORDER BY {})",
                call.arg()
            )),
            AggregateFunction::GroupConcat => {
                Some(format!(
                    "STRING_AGG({}CAST({} AS TEXT), {} ORDER BY {})",
                    call.distinct_prefix(),
                    call.arg(),
                    DESCRIPTOR.string_literal(call.separator_or_default()),
                    call.order_or_self()
                ))
            }
            _ => None,
        }
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
        // `/` truncates integers.
        .without_scalars([ScalarFunction::FloatDiv])
        .aggregates(standard_aggregates())
        .aggregates([
            AggregateCapability::Median,
            AggregateCapability::Stddev,
            AggregateCapability::Variance,
            AggregateCapability::GroupConcat,
            AggregateCapability::GroupConcatSeparator,
            AggregateCapability::GroupConcatOrderBy,
        ])
}
