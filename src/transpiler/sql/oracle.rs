use super::super::descriptor::DialectDescriptor;
use super::super::pagination::LimitStrategy;
use super::super::rewrite::{
    DateAdd, DateUnit, call, extract, floored_division, infix, listagg, scaled, trim_from,
    weeks_as_days,
};
use super::super::traits::{AggregateSql, SqlGenerator};
use super::{all_scalars, standard_literals};
use crate::ast::{AggregateFunction, ColumnMetadata, ScalarFunction};
use crate::capabilities::{
    AggregateCapability, CapabilitySet, LiteralCapability, MainCapability, standard_aggregates,
    standard_main, standard_predicates,
};
use crate::config::{DecimalOverride, DialectProperties};
use crate::error::PushdownResult;
use crate::types::base::{NUMERIC_TEXT_SIZE, TIME_TEXT_SIZE, fit_decimal, numeric};
use crate::types::{CanonicalType, Charset, NumericFallback, RemoteType, codes};

// Vendor type codes reported by the Oracle driver.
const BINARY_FLOAT: i32 = 100;
const BINARY_DOUBLE: i32 = 101;
const TIMESTAMP_TZ: i32 = -101;
const TIMESTAMP_LTZ: i32 = -102;
const INTERVAL_YM: i32 = -103;
const INTERVAL_DS: i32 = -104;

/// Scale the driver reports for `NUMBER` and `FLOAT` without precision.
pub const UNSPECIFIED_SCALE: i32 = -127;

const ROWID_SIZE: i64 = 18;
const UROWID_SIZE: i64 = 4000;

static DESCRIPTOR: DialectDescriptor = DialectDescriptor {
    limit_strategy: LimitStrategy::RowNum,
    numeric_fallback: NumericFallback::Varchar,
    ..DialectDescriptor::standard("ORACLE")
};

pub struct OracleGenerator {
    number_override: Option<DecimalOverride>,
}

impl OracleGenerator {
    pub fn new(properties: &DialectProperties) -> PushdownResult<Self> {
        Ok(Self {
            number_override: properties.number_override()?,
        })
    }

    /// `NUMBER` columns: the configured decimal when the precision cannot
    /// be represented, else text.
    fn map_number(&self, precision: i32, scale: i32) -> CanonicalType {
        let representable = scale != UNSPECIFIED_SCALE && fit_decimal(precision, scale).is_some();
        if representable {
            return numeric(precision, scale, NumericFallback::Varchar);
        }
        match self.number_override {
            Some(o) => CanonicalType::decimal(o.precision, o.scale),
            None if scale == UNSPECIFIED_SCALE => {
                CanonicalType::varchar(i64::from(NUMERIC_TEXT_SIZE), Charset::Utf8)
            }
            None => numeric(precision, scale, NumericFallback::Varchar),
        }
    }

    fn is_override(&self, data_type: CanonicalType) -> bool {
        self.number_override.is_some_and(|o| {
            data_type
                == CanonicalType::Decimal {
                    precision: o.precision,
                    scale: o.scale,
                }
        })
    }
}

impl SqlGenerator for OracleGenerator {
    fn descriptor(&self) -> &DialectDescriptor {
        &DESCRIPTOR
    }

    fn map_type(&self, remote: &RemoteType) -> Option<CanonicalType> {
        let mapped = match remote.type_code {
            codes::NUMERIC | codes::DECIMAL if remote.is_named("FLOAT") => CanonicalType::Double,
            codes::NUMERIC | codes::DECIMAL => self.map_number(remote.size, remote.scale),
            BINARY_FLOAT | BINARY_DOUBLE => CanonicalType::Double,
            TIMESTAMP_TZ | INTERVAL_YM | INTERVAL_DS => {
                CanonicalType::varchar(TIME_TEXT_SIZE, Charset::Utf8)
            }
            TIMESTAMP_LTZ => CanonicalType::timestamp(true),
            codes::ROWID => CanonicalType::varchar(ROWID_SIZE, Charset::Ascii),
            _ if remote.is_named("UROWID") => CanonicalType::varchar(UROWID_SIZE, Charset::Ascii),
            codes::BINARY | codes::VARBINARY if remote.is_named("RAW") => {
                CanonicalType::varchar(i64::from(remote.size) * 2, Charset::Ascii)
            }
            _ if remote.upper_name().ends_with("SDO_GEOMETRY") => CanonicalType::geometry(0),
            _ => return None,
        };
        Some(mapped)
    }

    fn project_column(&self, column: &ColumnMetadata, sql: &str) -> Option<String> {
        let name = column.native_upper();
        match name.as_str() {
            "NUMBER" => match column.data_type {
                CanonicalType::Decimal { precision, scale } if self.is_override(column.data_type) => {
                    Some(format!("CAST({} AS DECIMAL({}, {}))", sql, precision, scale))
                }
                CanonicalType::Varchar { .. } => Some(format!("TO_CHAR({})", sql)),
                _ => None,
            },
            "CLOB" | "NCLOB" => Some(format!("TO_CHAR({})", sql)),
            "ROWID" | "UROWID" => Some(format!("ROWIDTOCHAR({})", sql)),
            "RAW" => Some(format!("RAWTOHEX({})", sql)),
            _ if name.ends_with("WITH LOCAL TIME ZONE") => {
                Some(format!("CAST({} AS TIMESTAMP)", sql))
            }
            _ if name.ends_with("WITH TIME ZONE") || name.starts_with("INTERVAL") => {
                Some(format!("TO_CHAR({})", sql))
            }
            _ if name.ends_with("SDO_GEOMETRY") => {
                Some(format!("SDO_UTIL.TO_WKTGEOMETRY({})", sql))
            }
            _ => None,
        }
    }

    fn rewrite_scalar(&self, function: ScalarFunction, args: &[String]) -> Option<String> {
        use ScalarFunction::*;
        match (function, args) {
            (Trim, _) => Some(trim_from(args)),
            (Div, _) => Some(floored_division("NUMBER(36, 0)", false, args)),
            (BitAnd, _) => Some(call("BITAND", args)),
            (BitOr, [a, b]) => Some(format!("({} + {} - BITAND({}, {}))", a, b, a, b)),
            (BitXor, [a, b]) => Some(format!("({} + {} - 2 * BITAND({}, {}))", a, b, a, b)),
            (Concat, _) => Some(infix("||", args)),
            (Year, _) => Some(extract("YEAR", args)),
            (Month, _) => Some(extract("MONTH", args)),
            (Day, _) => Some(extract("DAY", args)),
            _ => DateAdd::parse(function, args).map(date_add),
        }
    }

    fn rewrite_aggregate(&self, call: &AggregateSql<'_>) -> Option<String> {
        match call.function {
            AggregateFunction::GroupConcat => {
                Some(listagg(call, |s| DESCRIPTOR.string_literal(s)))
            }
            _ => None,
        }
    }

    fn bool_literal(&self, val: bool) -> String {
        if val { "1".to_string() } else { "0".to_string() }
    }

    /// Numbers in the select list travel as text, like `NUMBER` columns.
    fn select_list_numeric(&self, sql: String) -> String {
        format!("TO_CHAR({})", sql)
    }
}

/// Days are plain numbers; sub-day units need a day-to-second interval.
fn date_add(add: DateAdd<'_>) -> String {
    let DateAdd {
        unit,
        value,
        amount,
    } = add;
    match unit {
        DateUnit::Day => format!("({} + {})", value, amount),
        DateUnit::Week => format!("({} + {})", value, weeks_as_days(amount)),
        DateUnit::Hour | DateUnit::Minute | DateUnit::Second => format!(
            "({} + NUMTODSINTERVAL({}, '{}'))",
            value,
            amount,
            unit.keyword()
        ),
        DateUnit::Month => format!("ADD_MONTHS({}, {})", value, amount),
        DateUnit::Year => format!("ADD_MONTHS({}, {})", value, scaled(12, amount)),
    }
}

pub(crate) fn capabilities() -> CapabilitySet {
    CapabilitySet::default()
        .main(standard_main())
        .main([MainCapability::Limit, MainCapability::LimitWithOffset])
        .predicates(standard_predicates())
        .literals(standard_literals())
        .literals([LiteralCapability::Interval])
        .scalars(all_scalars())
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

#[cfg(test)]
mod tests {
    use super::*;

    fn oracle() -> OracleGenerator {
        OracleGenerator {
            number_override: None,
        }
    }

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_unspecified_number_is_text() {
        let g = oracle();
        let number = RemoteType::new(codes::NUMERIC, 0, UNSPECIFIED_SCALE, "NUMBER");
        assert_eq!(
            g.map_type(&number),
            Some(CanonicalType::varchar(128, Charset::Utf8))
        );
        let float = RemoteType::new(codes::NUMERIC, 126, UNSPECIFIED_SCALE, "FLOAT");
        assert_eq!(g.map_type(&float), Some(CanonicalType::Double));
    }

    #[test]
    fn test_number_override() {
        let g = OracleGenerator::new(&DialectProperties::default().with_number_override("10,2"))
            .unwrap();
        let wide = RemoteType::new(codes::NUMERIC, 40, 0, "NUMBER");
        assert_eq!(g.map_type(&wide), Some(CanonicalType::decimal(10, 2)));
        let normal = RemoteType::new(codes::NUMERIC, 12, 3, "NUMBER");
        assert_eq!(g.map_type(&normal), Some(CanonicalType::decimal(12, 3)));

        let column = ColumnMetadata::new("N", CanonicalType::decimal(10, 2), "NUMBER");
        assert_eq!(
            g.project_column(&column, "T.N").as_deref(),
            Some("CAST(T.N AS DECIMAL(10, 2))")
        );
    }

    #[test]
    fn test_wide_number_without_override() {
        let wide = RemoteType::new(codes::NUMERIC, 40, 0, "NUMBER");
        assert_eq!(
            oracle().map_type(&wide),
            Some(CanonicalType::varchar(42, Charset::Utf8))
        );
    }

    #[test]
    fn test_raw_doubles_size() {
        let raw = RemoteType::new(codes::VARBINARY, 16, 0, "RAW");
        assert_eq!(
            oracle().map_type(&raw),
            Some(CanonicalType::varchar(32, Charset::Ascii))
        );
    }

    #[test]
    fn test_projections() {
        let g = oracle();
        let clob = ColumnMetadata::new("C", CanonicalType::max_varchar(Charset::Utf8), "CLOB");
        assert_eq!(g.project_column(&clob, "T.C").as_deref(), Some("TO_CHAR(T.C)"));
        let ltz = ColumnMetadata::new(
            "TS",
            CanonicalType::timestamp(true),
            "TIMESTAMP(6) WITH LOCAL TIME ZONE",
        );
        assert_eq!(
            g.project_column(&ltz, "T.TS").as_deref(),
            Some("CAST(T.TS AS TIMESTAMP)")
        );
        let tz = ColumnMetadata::new(
            "TS",
            CanonicalType::varchar(100, Charset::Utf8),
            "TIMESTAMP(6) WITH TIME ZONE",
        );
        assert_eq!(g.project_column(&tz, "T.TS").as_deref(), Some("TO_CHAR(T.TS)"));
        let int = ColumnMetadata::new("I", CanonicalType::decimal(10, 0), "NUMBER");
        assert_eq!(g.project_column(&int, "T.I"), None);
    }

    #[test]
    fn test_bitwise_derivations() {
        let g = oracle();
        let a = args(&["a", "b"]);
        assert_eq!(
            g.rewrite_scalar(ScalarFunction::BitOr, &a).as_deref(),
            Some("(a + b - BITAND(a, b))")
        );
        assert_eq!(
            g.rewrite_scalar(ScalarFunction::BitXor, &a).as_deref(),
            Some("(a + b - 2 * BITAND(a, b))")
        );
    }

    #[test]
    fn test_date_arithmetic() {
        let g = oracle();
        let a = args(&["T.D", "2"]);
        assert_eq!(
            g.rewrite_scalar(ScalarFunction::AddDays, &a).as_deref(),
            Some("(T.D + 2)")
        );
        assert_eq!(
            g.rewrite_scalar(ScalarFunction::AddWeeks, &a).as_deref(),
            Some("(T.D + 14)")
        );
        assert_eq!(
            g.rewrite_scalar(ScalarFunction::AddHours, &a).as_deref(),
            Some("(T.D + NUMTODSINTERVAL(2, 'HOUR'))")
        );
        assert_eq!(
            g.rewrite_scalar(ScalarFunction::AddYears, &a).as_deref(),
            Some("ADD_MONTHS(T.D, 24)")
        );
    }
}
