use super::super::descriptor::DialectDescriptor;
use super::super::pagination::LimitStrategy;
use super::super::rewrite::{DateAdd, infix, listagg, swapped, trim_from, with_default_arg};
use super::super::traits::{AggregateSql, SqlGenerator};
use super::{all_scalars, standard_literals};
use crate::ast::{AggregateFunction, ColumnMetadata, ScalarFunction};
use crate::capabilities::{
    AggregateCapability, CapabilitySet, MainCapability, standard_aggregates, standard_main,
    standard_predicates,
};
use crate::types::{CanonicalType, Charset, RemoteType, codes};

const DECFLOAT: i32 = -360;

/// Text length of `VARCHAR(timestamp)`.
const TIMESTAMP_TEXT_SIZE: i64 = 32;

static DESCRIPTOR: DialectDescriptor = DialectDescriptor {
    limit_strategy: LimitStrategy::FetchFirst,
    scalar_aliases: &[
        (ScalarFunction::BitAnd, "BITAND"),
        (ScalarFunction::BitOr, "BITOR"),
        (ScalarFunction::BitXor, "BITXOR"),
    ],
    aggregate_aliases: &[
        (AggregateFunction::Stddev, "STDDEV_SAMP"),
        (AggregateFunction::Variance, "VARIANCE_SAMP"),
    ],
    ..DialectDescriptor::standard("DB2")
};

pub struct Db2Generator;

fn is_bit_data(name: &str) -> bool {
    name.to_ascii_uppercase().ends_with("FOR BIT DATA")
}

impl SqlGenerator for Db2Generator {
    fn descriptor(&self) -> &DialectDescriptor {
        &DESCRIPTOR
    }

    fn map_type(&self, remote: &RemoteType) -> Option<CanonicalType> {
        // Bit data travels as hex: two characters per byte.
        let hex_size = i64::from(remote.size) * 2;
        match remote.type_code {
            DECFLOAT => Some(CanonicalType::Double),
            codes::SQLXML => Some(CanonicalType::max_varchar(Charset::Utf8)),
            _ if remote.is_named("XML") => Some(CanonicalType::max_varchar(Charset::Utf8)),
            codes::TIMESTAMP => Some(CanonicalType::varchar(TIMESTAMP_TEXT_SIZE, Charset::Utf8)),
            codes::BINARY if is_bit_data(&remote.type_name) => {
                Some(CanonicalType::char(hex_size, Charset::Ascii))
            }
            codes::VARBINARY if is_bit_data(&remote.type_name) => {
                Some(CanonicalType::varchar(hex_size, Charset::Ascii))
            }
            _ => None,
        }
    }

    fn project_column(&self, column: &ColumnMetadata, sql: &str) -> Option<String> {
        let name = column.native_upper();
        match name.as_str() {
            "DECFLOAT" => Some(format!("CAST({} AS DOUBLE)", sql)),
            "XML" => Some(format!("XMLSERIALIZE(CONTENT {} AS CLOB)", sql)),
            "TIMESTAMP" => Some(format!("VARCHAR({})", sql)),
            _ if is_bit_data(&name) => Some(format!("HEX({})", sql)),
            _ => None,
        }
    }

    fn rewrite_scalar(&self, function: ScalarFunction, args: &[String]) -> Option<String> {
        match function {
            ScalarFunction::Trim => Some(trim_from(args)),
            ScalarFunction::Concat => Some(infix("||", args)),
            ScalarFunction::Instr => Some(swapped("LOCATE", args)),
            ScalarFunction::Replace => Some(with_default_arg("REPLACE", args, 3, "''")),
            _ => DateAdd::parse(function, args).map(DateAdd::labeled_duration),
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
}

pub(crate) fn capabilities() -> CapabilitySet {
    CapabilitySet::default()
        .main(standard_main())
        .main([MainCapability::Limit])
        .predicates(standard_predicates())
        .literals(standard_literals())
        .scalars(all_scalars())
        // `/` truncates integers; there is no floored quotient.
        .without_scalars([ScalarFunction::FloatDiv, ScalarFunction::Div])
        .aggregates(standard_aggregates())
        .aggregates([
            AggregateCapability::Median,
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

    #[test]
    fn test_bit_data_doubles_size() {
        let g = Db2Generator;
        assert_eq!(
            g.map_type(&RemoteType::new(codes::BINARY, 8, 0, "CHAR () FOR BIT DATA")),
            Some(CanonicalType::char(16, Charset::Ascii))
        );
        assert_eq!(
            g.map_type(&RemoteType::new(codes::VARBINARY, 100, 0, "VARCHAR () FOR BIT DATA")),
            Some(CanonicalType::varchar(200, Charset::Ascii))
        );
        assert_eq!(g.map_type(&RemoteType::new(codes::VARBINARY, 100, 0, "BLOB")), None);
    }

    #[test]
    fn test_projections() {
        let g = Db2Generator;
        let ts = ColumnMetadata::new("TS", CanonicalType::varchar(32, Charset::Utf8), "TIMESTAMP");
        assert_eq!(g.project_column(&ts, "T.TS").as_deref(), Some("VARCHAR(T.TS)"));
        let dec = ColumnMetadata::new("D", CanonicalType::Double, "DECFLOAT");
        assert_eq!(g.project_column(&dec, "T.D").as_deref(), Some("CAST(T.D AS DOUBLE)"));
        let bits = ColumnMetadata::new(
            "B",
            CanonicalType::char(16, Charset::Ascii),
            "CHAR () FOR BIT DATA",
        );
        assert_eq!(g.project_column(&bits, "T.B").as_deref(), Some("HEX(T.B)"));
    }

    #[test]
    fn test_labeled_durations() {
        let args = vec!["T.D".to_string(), "2".to_string()];
        assert_eq!(
            Db2Generator.rewrite_scalar(ScalarFunction::AddMonths, &args).as_deref(),
            Some("(T.D + 2 MONTHS)")
        );
    }
}
