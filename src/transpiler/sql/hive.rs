use super::super::descriptor::{CaseHandling, DialectDescriptor, NullSorting, QuoteStyle};
use super::super::rewrite::{DateAdd, infix, with_default_arg};
use super::super::traits::{AggregateSql, SqlGenerator};
use super::{all_scalars, standard_literals};
use crate::ast::{AggregateFunction, ColumnMetadata, ScalarFunction};
use crate::capabilities::{
    AggregateCapability, CapabilitySet, LiteralCapability, MainCapability, standard_aggregates,
    standard_main, standard_predicates,
};
use crate::types::{CanonicalType, Charset, RemoteType, codes};

/// Complex types the driver hands over as JSON text.
const COMPLEX: &[&str] = &["array", "map", "struct", "uniontype"];

static DESCRIPTOR: DialectDescriptor = DialectDescriptor {
    quote_style: QuoteStyle::Backtick,
    unquoted_case: CaseHandling::FoldLower,
    quoted_case: CaseHandling::FoldLower,
    null_sorting: NullSorting::Low,
    aggregate_aliases: &[
        (AggregateFunction::Stddev, "STDDEV_SAMP"),
        (AggregateFunction::Variance, "VAR_SAMP"),
    ],
    scalar_max_args: &[
        (ScalarFunction::Trim, 1),
        (ScalarFunction::Ltrim, 1),
        (ScalarFunction::Rtrim, 1),
    ],
    ..DialectDescriptor::standard("HIVE")
};

pub struct HiveGenerator;

fn is_complex(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    COMPLEX.iter().any(|t| lower.starts_with(t))
}

impl SqlGenerator for HiveGenerator {
    fn descriptor(&self) -> &DialectDescriptor {
        &DESCRIPTOR
    }

    fn map_type(&self, remote: &RemoteType) -> Option<CanonicalType> {
        match remote.type_code {
            codes::BINARY | codes::VARBINARY => Some(CanonicalType::max_varchar(Charset::Ascii)),
            codes::ARRAY | codes::STRUCT | codes::JAVA_OBJECT | codes::OTHER
                if is_complex(&remote.type_name) =>
            {
                Some(CanonicalType::max_varchar(Charset::Utf8))
            }
            _ => None,
        }
    }

    fn project_column(&self, column: &ColumnMetadata, sql: &str) -> Option<String> {
        if column.is_native("binary") {
            return Some(format!("BASE64({})", sql));
        }
        None
    }

    fn rewrite_scalar(&self, function: ScalarFunction, args: &[String]) -> Option<String> {
        match function {
            ScalarFunction::Lpad => Some(with_default_arg("LPAD", args, 3, "' '")),
            ScalarFunction::Rpad => Some(with_default_arg("RPAD", args, 3, "' '")),
            ScalarFunction::Replace => Some(with_default_arg("REPLACE", args, 3, "''")),
            ScalarFunction::Div => Some(infix("DIV", args)),
            ScalarFunction::Mod => Some(infix("%", args)),
            ScalarFunction::BitAnd => Some(infix("&", args)),
            ScalarFunction::BitOr => Some(infix("|", args)),
            ScalarFunction::BitXor => Some(infix("^", args)),
            _ => DateAdd::parse(function, args).map(|add| add.interval_literal("")),
        }
    }

    fn rewrite_aggregate(&self, call: &AggregateSql<'_>) -> Option<String> {
        match call.function {
            AggregateFunction::GroupConcat => {
                let collect = if call.distinct { "COLLECT_SET" } else { "COLLECT_LIST" };
                Some(format!(
                    "CONCAT_WS({}, {}({}))",
                    DESCRIPTOR.string_literal(call.separator_or_default()),
                    collect,
                    call.arg()
                ))
            }
            _ => None,
        }
    }
}

pub(crate) fn capabilities() -> CapabilitySet {
    CapabilitySet::default()
        .main(standard_main())
        .main([MainCapability::Limit])
        .predicates(standard_predicates())
        .literals(standard_literals())
        .literals([LiteralCapability::Bool])
        .scalars(all_scalars())
        // TRUNC only truncates dates; the trims strip blanks only.
        .without_scalars([
            ScalarFunction::Trunc,
            ScalarFunction::Trim,
            ScalarFunction::Ltrim,
            ScalarFunction::Rtrim,
        ])
        .aggregates(standard_aggregates())
        .aggregates([
            AggregateCapability::Stddev,
            AggregateCapability::Variance,
            AggregateCapability::GroupConcat,
            AggregateCapability::GroupConcatDistinct,
            AggregateCapability::GroupConcatSeparator,
        ])
}
