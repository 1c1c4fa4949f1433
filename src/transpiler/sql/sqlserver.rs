use chrono::{NaiveDate, NaiveDateTime};

use super::super::descriptor::{CaseHandling, DialectDescriptor, NullSorting, QuoteStyle};
use super::super::pagination::LimitStrategy;
use super::super::rewrite::{DateAdd, floored_division, infix, swapped, trim_from, with_default_arg};
use super::super::traits::{AggregateSql, SqlGenerator};
use super::{all_scalars, standard_literals};
use crate::ast::{AggregateFunction, ColumnMetadata, ScalarFunction};
use crate::capabilities::{
    AggregateCapability, CapabilitySet, MainCapability, standard_aggregates, standard_main,
    standard_predicates,
};
use crate::types::{CanonicalType, Charset, RemoteType};

const SQL_VARIANT: i32 = -150;
const DATETIMEOFFSET: i32 = -155;
const GEOMETRY: i32 = -157;
const GEOGRAPHY: i32 = -158;

const HIERARCHYID_TEXT_SIZE: i64 = 4000;
const UNIQUEIDENTIFIER_SIZE: i64 = 36;

/// Length of a `SUBSTRING` that runs to the end of the string.
pub(crate) const SUBSTRING_TO_END: &str = "2147483647";

static DESCRIPTOR: DialectDescriptor = DialectDescriptor {
    quote_style: QuoteStyle::Bracket,
    unquoted_case: CaseHandling::CaseSensitive,
    quoted_case: CaseHandling::CaseSensitive,
    requires_catalog_qualified_names: true,
    requires_schema_qualified_names: true,
    null_sorting: NullSorting::Low,
    null_ordering_clause: false,
    limit_strategy: LimitStrategy::Top,
    scalar_aliases: &[
        (ScalarFunction::Length, "LEN"),
        (ScalarFunction::Ceil, "CEILING"),
        (ScalarFunction::Ln, "LOG"),
    ],
    aggregate_aliases: &[
        (AggregateFunction::Stddev, "STDEV"),
        (AggregateFunction::Variance, "VAR"),
    ],
    // The character-set forms need SQL Server 2022.
    scalar_max_args: &[(ScalarFunction::Ltrim, 1), (ScalarFunction::Rtrim, 1)],
    ..DialectDescriptor::standard("SQLSERVER")
};

pub struct SqlServerGenerator;

impl SqlGenerator for SqlServerGenerator {
    fn descriptor(&self) -> &DialectDescriptor {
        &DESCRIPTOR
    }

    fn map_type(&self, remote: &RemoteType) -> Option<CanonicalType> {
        if remote.is_named("hierarchyid") {
            return Some(CanonicalType::varchar(HIERARCHYID_TEXT_SIZE, Charset::Utf8));
        }
        if remote.is_named("xml") {
            return Some(CanonicalType::max_varchar(Charset::Utf8));
        }
        if remote.is_named("uniqueidentifier") {
            return Some(CanonicalType::char(UNIQUEIDENTIFIER_SIZE, Charset::Ascii));
        }
        match remote.type_code {
            GEOMETRY => Some(CanonicalType::geometry(0)),
            GEOGRAPHY => Some(CanonicalType::max_varchar(Charset::Utf8)),
            DATETIMEOFFSET => Some(CanonicalType::timestamp(false)),
            SQL_VARIANT => Some(CanonicalType::Unsupported),
            _ => None,
        }
    }

    fn project_column(&self, column: &ColumnMetadata, sql: &str) -> Option<String> {
        match column.type_name.to_ascii_lowercase().as_str() {
            "hierarchyid" => Some(format!("CAST({} AS NVARCHAR(4000))", sql)),
            "geometry" | "geography" => Some(format!("{}.STAsText()", sql)),
            "xml" => Some(format!("CAST({} AS NVARCHAR(MAX))", sql)),
            "datetimeoffset" => Some(format!("CAST({} AS DATETIME2)", sql)),
            _ => None,
        }
    }

    fn rewrite_scalar(&self, function: ScalarFunction, args: &[String]) -> Option<String> {
        rewrite_transact_sql(function, args).or_else(|| match function {
            ScalarFunction::Trim => Some(trim_from(args)),
            ScalarFunction::Trunc => match args {
                [value] => Some(format!("ROUND({}, 0, 1)", value)),
                [value, digits] => Some(format!("ROUND({}, {}, 1)", value, digits)),
                _ => None,
            },
            ScalarFunction::CurrentDate => Some("CAST(GETDATE() AS DATE)".to_string()),
            // CONCAT takes two or more arguments.
            ScalarFunction::Concat => Some(with_default_arg("CONCAT", args, 2, "''")),
            _ => None,
        })
    }

    fn rewrite_aggregate(&self, call: &AggregateSql<'_>) -> Option<String> {
        match call.function {
            AggregateFunction::GroupConcat => Some(format!(
                "STRING_AGG(CAST({} AS NVARCHAR(MAX)), {}) WITHIN GROUP (ORDER BY {})",
                call.arg(),
                DESCRIPTOR.string_literal(call.separator_or_default()),
                call.order_or_self()
            )),
            _ => None,
        }
    }

    fn bool_literal(&self, val: bool) -> String {
        if val { "1".to_string() } else { "0".to_string() }
    }

    fn date_literal(&self, date: NaiveDate) -> String {
        format!("CAST('{}' AS DATE)", date.format("%Y-%m-%d"))
    }

    fn timestamp_literal(&self, ts: NaiveDateTime) -> String {
        format!("CAST('{}' AS DATETIME2)", ts.format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Rewrites shared by the Transact-SQL family.
pub(crate) fn rewrite_transact_sql(function: ScalarFunction, args: &[String]) -> Option<String> {
    match function {
        ScalarFunction::Substr => Some(with_default_arg("SUBSTRING", args, 3, SUBSTRING_TO_END)),
        ScalarFunction::Instr => Some(swapped("CHARINDEX", args)),
        ScalarFunction::Round => Some(with_default_arg("ROUND", args, 2, "0")),
        ScalarFunction::Replace => Some(with_default_arg("REPLACE", args, 3, "''")),
        ScalarFunction::Mod => Some(infix("%", args)),
        ScalarFunction::Div => Some(floored_division("DECIMAL(36, 0)", true, args)),
        ScalarFunction::BitAnd => Some(infix("&", args)),
        ScalarFunction::BitOr => Some(infix("|", args)),
        ScalarFunction::BitXor => Some(infix("^", args)),
        _ => DateAdd::parse(function, args).map(|add| add.dateadd_call("DATEADD")),
    }
}

pub(crate) fn capabilities() -> CapabilitySet {
    CapabilitySet::default()
        .main(standard_main())
        .main([MainCapability::Limit])
        .predicates(standard_predicates())
        .literals(standard_literals())
        .scalars(all_scalars())
        // `/` truncates integers; no LPAD/RPAD; LTRIM/RTRIM strip blanks only.
        .without_scalars([
            ScalarFunction::FloatDiv,
            ScalarFunction::Ltrim,
            ScalarFunction::Rtrim,
            ScalarFunction::Lpad,
            ScalarFunction::Rpad,
        ])
        .aggregates(standard_aggregates())
        .aggregates([
            AggregateCapability::Stddev,
            AggregateCapability::Variance,
            AggregateCapability::GroupConcat,
            AggregateCapability::GroupConcatSeparator,
            AggregateCapability::GroupConcatOrderBy,
        ])
}
