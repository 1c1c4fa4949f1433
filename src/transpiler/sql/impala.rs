use super::super::descriptor::{CaseHandling, DialectDescriptor, QuoteStyle};
use super::super::rewrite::{call, infix, text_operands, with_default_arg};
use super::super::traits::{AggregateSql, SqlGenerator};
use super::{all_scalars, standard_literals};
use crate::ast::{AggregateFunction, ScalarFunction};
use crate::capabilities::{
    AggregateCapability, CapabilitySet, LiteralCapability, MainCapability, standard_aggregates,
    standard_main, standard_predicates,
};
use crate::types::{CanonicalType, Charset, RemoteType};

static DESCRIPTOR: DialectDescriptor = DialectDescriptor {
    quote_style: QuoteStyle::Backtick,
    unquoted_case: CaseHandling::FoldLower,
    quoted_case: CaseHandling::FoldLower,
    scalar_aliases: &[
        (ScalarFunction::Trim, "BTRIM"),
        (ScalarFunction::Trunc, "TRUNCATE"),
        (ScalarFunction::BitAnd, "BITAND"),
        (ScalarFunction::BitOr, "BITOR"),
        (ScalarFunction::BitXor, "BITXOR"),
        (ScalarFunction::AddSeconds, "SECONDS_ADD"),
        (ScalarFunction::AddMinutes, "MINUTES_ADD"),
        (ScalarFunction::AddHours, "HOURS_ADD"),
        (ScalarFunction::AddDays, "DAYS_ADD"),
        (ScalarFunction::AddWeeks, "WEEKS_ADD"),
        (ScalarFunction::AddMonths, "MONTHS_ADD"),
        (ScalarFunction::AddYears, "YEARS_ADD"),
    ],
    aggregate_aliases: &[
        (AggregateFunction::Stddev, "STDDEV_SAMP"),
        (AggregateFunction::Variance, "VARIANCE_SAMP"),
    ],
    ..DialectDescriptor::standard("IMPALA")
};

pub struct ImpalaGenerator;

impl SqlGenerator for ImpalaGenerator {
    fn descriptor(&self) -> &DialectDescriptor {
        &DESCRIPTOR
    }

    fn map_type(&self, remote: &RemoteType) -> Option<CanonicalType> {
        // STRING is unbounded whatever size the driver reports.
        if remote.is_named("STRING") {
            return Some(CanonicalType::max_varchar(Charset::Utf8));
        }
        None
    }

    fn rewrite_scalar(&self, function: ScalarFunction, args: &[String]) -> Option<String> {
        match function {
            ScalarFunction::Lpad => Some(with_default_arg("LPAD", args, 3, "' '")),
            ScalarFunction::Rpad => Some(with_default_arg("RPAD", args, 3, "' '")),
            ScalarFunction::Replace => Some(with_default_arg("REPLACE", args, 3, "''")),
            ScalarFunction::Div => Some(infix("DIV", args)),
            ScalarFunction::Concat => Some(call(
                "CONCAT",
                &text_operands(args, |arg| format!("CAST({} AS STRING)", arg)),
            )),
            _ => None,
        }
    }

    fn rewrite_aggregate(&self, call: &AggregateSql<'_>) -> Option<String> {
        match call.function {
            AggregateFunction::GroupConcat => Some(format!(
                "GROUP_CONCAT({}{}, {})",
                call.distinct_prefix(),
                call.arg(),
                DESCRIPTOR.string_literal(call.separator_or_default())
            )),
            _ => None,
        }
    }
}

pub(crate) fn capabilities() -> CapabilitySet {
    CapabilitySet::default()
        .main(standard_main())
        // OFFSET is only accepted together with ORDER BY.
        .main([MainCapability::Limit])
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
        ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transpiler::rewrite::rewrite_scalar;
    use crate::types::codes;

    #[test]
    fn test_string_is_unbounded() {
        assert_eq!(
            ImpalaGenerator.map_type(&RemoteType::new(codes::VARCHAR, 32767, 0, "STRING")),
            Some(CanonicalType::max_varchar(Charset::Utf8))
        );
    }

    #[test]
    fn test_date_functions_are_aliases() {
        let args = vec!["t.d".to_string(), "3".to_string()];
        assert_eq!(
            rewrite_scalar(&ImpalaGenerator, ScalarFunction::AddWeeks, &args),
            "WEEKS_ADD(t.d, 3)"
        );
        assert_eq!(
            rewrite_scalar(&ImpalaGenerator, ScalarFunction::Trim, &args),
            "BTRIM(t.d, 3)"
        );
    }
}
