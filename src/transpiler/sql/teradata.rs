use super::super::descriptor::{DialectDescriptor, NullSorting};
use super::super::pagination::LimitStrategy;
use super::super::rewrite::{
    DateAdd, DateUnit, extract, infix, scaled, trim_from, trim_side, with_default_arg,
};
use super::super::traits::SqlGenerator;
use super::{all_scalars, standard_literals};
use crate::ast::{AggregateFunction, ColumnMetadata, ScalarFunction};
use crate::capabilities::{
    AggregateCapability, CapabilitySet, LiteralCapability, MainCapability, standard_aggregates,
    standard_main, standard_predicates,
};
use crate::types::{CanonicalType, Charset, RemoteType, codes};

const LOB_TEXT_SIZE: i64 = 64000;
const INTERVAL_TEXT_SIZE: i64 = 30;
const PERIOD_TEXT_SIZE: i64 = 100;

/// Largest interval leading-field precision.
const INTERVAL_PRECISION: &str = "(4)";

static DESCRIPTOR: DialectDescriptor = DialectDescriptor {
    null_sorting: NullSorting::Low,
    null_ordering_clause: false,
    limit_strategy: LimitStrategy::Top,
    scalar_aliases: &[
        (ScalarFunction::BitAnd, "BITAND"),
        (ScalarFunction::BitOr, "BITOR"),
        (ScalarFunction::BitXor, "BITXOR"),
    ],
    aggregate_aliases: &[
        (AggregateFunction::Stddev, "STDDEV_SAMP"),
        (AggregateFunction::Variance, "VAR_SAMP"),
    ],
    ..DialectDescriptor::standard("TERADATA")
};

pub struct TeradataGenerator;

/// The text form a type reported under the overloaded `OTHER` code travels in.
fn other_as_text(name: &str) -> Option<i64> {
    let upper = name.to_ascii_uppercase();
    if upper == "XML" || upper == "JSON" {
        Some(LOB_TEXT_SIZE)
    } else if upper.starts_with("INTERVAL") {
        Some(INTERVAL_TEXT_SIZE)
    } else if upper.starts_with("PERIOD") {
        Some(PERIOD_TEXT_SIZE)
    } else {
        None
    }
}

fn is_geometry(name: &str) -> bool {
    name.eq_ignore_ascii_case("ST_GEOMETRY") || name.to_ascii_uppercase().ends_with(".ST_GEOMETRY")
}

impl SqlGenerator for TeradataGenerator {
    fn descriptor(&self) -> &DialectDescriptor {
        &DESCRIPTOR
    }

    fn map_type(&self, remote: &RemoteType) -> Option<CanonicalType> {
        if remote.type_code != codes::OTHER {
            return None;
        }
        if is_geometry(&remote.type_name) {
            return Some(CanonicalType::geometry(0));
        }
        Some(match other_as_text(&remote.type_name) {
            Some(size) => CanonicalType::varchar(size, Charset::Utf8),
            None => CanonicalType::Unsupported,
        })
    }

    fn project_column(&self, column: &ColumnMetadata, sql: &str) -> Option<String> {
        if is_geometry(&column.type_name) {
            return Some(format!("{}.ST_AsText()", sql));
        }
        let size = other_as_text(&column.type_name)?;
        Some(format!("CAST({} AS VARCHAR({}))", sql, size))
    }

    fn rewrite_scalar(&self, function: ScalarFunction, args: &[String]) -> Option<String> {
        match (function, args) {
            (ScalarFunction::Trim, _) => Some(trim_from(args)),
            (ScalarFunction::Ltrim, _) => Some(trim_side("LTRIM", "LEADING", args)),
            (ScalarFunction::Rtrim, _) => Some(trim_side("RTRIM", "TRAILING", args)),
            (ScalarFunction::Replace, _) => Some(with_default_arg("OREPLACE", args, 3, "''")),
            (ScalarFunction::Instr, [string, search]) => {
                Some(format!("POSITION({} IN {})", search, string))
            }
            (ScalarFunction::Mod, _) => Some(infix("MOD", args)),
            (ScalarFunction::Power, _) => Some(infix("**", args)),
            (ScalarFunction::Concat, _) => Some(infix("||", args)),
            (ScalarFunction::Year, _) => Some(extract("YEAR", args)),
            (ScalarFunction::Month, _) => Some(extract("MONTH", args)),
            (ScalarFunction::Day, _) => Some(extract("DAY", args)),
            _ => DateAdd::parse(function, args).map(date_add),
        }
    }

    fn bool_literal(&self, val: bool) -> String {
        if val { "1".to_string() } else { "0".to_string() }
    }
}

/// Month arithmetic must clamp to the month's end, which intervals do not.
fn date_add(add: DateAdd<'_>) -> String {
    match add.unit {
        DateUnit::Month => format!("ADD_MONTHS({}, {})", add.value, add.amount),
        DateUnit::Year => format!("ADD_MONTHS({}, {})", add.value, scaled(12, add.amount)),
        _ => add.interval_literal(INTERVAL_PRECISION),
    }
}

pub(crate) fn capabilities() -> CapabilitySet {
    CapabilitySet::default()
        .main(standard_main())
        .main([MainCapability::Limit])
        .predicates(standard_predicates())
        .literals(standard_literals())
        .literals([LiteralCapability::Interval])
        .scalars(all_scalars())
        // `/` truncates integers; there is no floored quotient. `||` pads
        // numbers to their display format.
        .without_scalars([
            ScalarFunction::FloatDiv,
            ScalarFunction::Div,
            ScalarFunction::Concat,
        ])
        .aggregates(standard_aggregates())
        .aggregates([AggregateCapability::Stddev, AggregateCapability::Variance])
}
