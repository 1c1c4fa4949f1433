use chrono::{NaiveDate, NaiveDateTime};

use super::super::descriptor::{CaseHandling, DialectDescriptor, NullSorting, QuoteStyle};
use super::super::pagination::LimitStrategy;
use super::super::rewrite::{infix, text_operands};
use super::super::traits::SqlGenerator;
use super::sqlserver::rewrite_transact_sql;
use super::{all_scalars, standard_literals};
use crate::ast::{AggregateFunction, ColumnMetadata, ScalarFunction};
use crate::capabilities::{
    AggregateCapability, CapabilitySet, MainCapability, standard_aggregates, standard_main,
    standard_predicates,
};
use crate::types::{CanonicalType, Charset, RemoteType};

/// Widest `VARCHAR` an expression can convert to.
const MAX_TEXT: &str = "VARCHAR(16384)";

/// Types with no transportable representation; projected as a marker string.
const UNTRANSPORTABLE: &[&str] = &["image", "binary", "varbinary", "timestamp"];

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
        (ScalarFunction::Length, "CHAR_LENGTH"),
        (ScalarFunction::Ceil, "CEILING"),
        (ScalarFunction::Ln, "LOG"),
    ],
    aggregate_aliases: &[
        (AggregateFunction::Stddev, "STDDEV_SAMP"),
        (AggregateFunction::Variance, "VAR_SAMP"),
    ],
    scalar_max_args: &[(ScalarFunction::Ltrim, 1), (ScalarFunction::Rtrim, 1)],
    ..DialectDescriptor::standard("SYBASE")
};

pub struct SybaseGenerator;

fn untransportable(name: &str) -> Option<&'static str> {
    UNTRANSPORTABLE
        .iter()
        .copied()
        .find(|t| t.eq_ignore_ascii_case(name))
}

/// `+` adds numbers, so operands are converted to text first.
fn concat_as_text(args: &[String]) -> String {
    infix("+", &text_operands(args, |arg| format!("CONVERT({}, {})", MAX_TEXT, arg)))
}

/// `'IMAGE NOT SUPPORTED'`, without quotes.
fn marker(type_name: &str) -> String {
    format!("{} NOT SUPPORTED", type_name.to_ascii_uppercase())
}

impl SqlGenerator for SybaseGenerator {
    fn descriptor(&self) -> &DialectDescriptor {
        &DESCRIPTOR
    }

    fn map_type(&self, remote: &RemoteType) -> Option<CanonicalType> {
        let name = untransportable(&remote.type_name)?;
        Some(CanonicalType::varchar(
            marker(name).len() as i64,
            Charset::Utf8,
        ))
    }

    fn project_column(&self, column: &ColumnMetadata, _sql: &str) -> Option<String> {
        let name = untransportable(&column.type_name)?;
        Some(DESCRIPTOR.string_literal(&marker(name)))
    }

    fn rewrite_scalar(&self, function: ScalarFunction, args: &[String]) -> Option<String> {
        match (function, args) {
            // An empty replacement string means one space here; NULL deletes.
            (ScalarFunction::Replace, [value, search]) => {
                Some(format!("STR_REPLACE({}, {}, NULL)", value, search))
            }
            (ScalarFunction::Replace, _) => Some(format!("STR_REPLACE({})", args.join(", "))),
            (ScalarFunction::Concat, _) => Some(concat_as_text(args)),
            (ScalarFunction::Year, [value]) => Some(format!("DATEPART(YEAR, {})", value)),
            (ScalarFunction::Month, [value]) => Some(format!("DATEPART(MONTH, {})", value)),
            (ScalarFunction::Day, [value]) => Some(format!("DATEPART(DAY, {})", value)),
            (ScalarFunction::CurrentDate, _) => Some("CURRENT_DATE()".to_string()),
            (ScalarFunction::CurrentTimestamp, _) => Some("GETDATE()".to_string()),
            _ => rewrite_transact_sql(function, args),
        }
    }

    fn bool_literal(&self, val: bool) -> String {
        if val { "1".to_string() } else { "0".to_string() }
    }

    fn date_literal(&self, date: NaiveDate) -> String {
        format!("CAST('{}' AS DATE)", date.format("%Y-%m-%d"))
    }

    fn timestamp_literal(&self, ts: NaiveDateTime) -> String {
        format!("CAST('{}' AS DATETIME)", ts.format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

pub(crate) fn capabilities() -> CapabilitySet {
    CapabilitySet::default()
        .main(standard_main())
        .main([MainCapability::Limit])
        .predicates(standard_predicates())
        .literals(standard_literals())
        .scalars(all_scalars())
        // `/` truncates integers; no TRIM, TRUNC or padding functions, and
        // LTRIM/RTRIM strip blanks only.
        .without_scalars([
            ScalarFunction::FloatDiv,
            ScalarFunction::Trim,
            ScalarFunction::Ltrim,
            ScalarFunction::Rtrim,
            ScalarFunction::Trunc,
            ScalarFunction::Lpad,
            ScalarFunction::Rpad,
        ])
        .aggregates(standard_aggregates())
        .aggregates([AggregateCapability::Stddev, AggregateCapability::Variance])
}
