use super::super::descriptor::{CaseHandling, DialectDescriptor, NullSorting};
use super::super::rewrite::{DateAdd, text_operands, trim_from, with_default_arg};
use super::super::traits::{AggregateSql, SqlGenerator};
use super::{all_scalars, standard_literals};
use crate::ast::{AggregateFunction, ColumnMetadata, ScalarFunction};
use crate::capabilities::{
    AggregateCapability, CapabilitySet, LiteralCapability, MainCapability, standard_aggregates,
    standard_main, standard_predicates,
};
use crate::types::{CanonicalType, Charset, RemoteType};

static DESCRIPTOR: DialectDescriptor = DialectDescriptor {
    unquoted_case: CaseHandling::FoldLower,
    quoted_case: CaseHandling::FoldLower,
    null_sorting: NullSorting::AtEnd,
    scalar_aliases: &[
        (ScalarFunction::Instr, "STRPOS"),
        (ScalarFunction::Trunc, "TRUNCATE"),
        (ScalarFunction::BitAnd, "BITWISE_AND"),
        (ScalarFunction::BitOr, "BITWISE_OR"),
        (ScalarFunction::BitXor, "BITWISE_XOR"),
    ],
    ..DialectDescriptor::standard("ATHENA")
};

pub struct AthenaGenerator;

impl SqlGenerator for AthenaGenerator {
    fn descriptor(&self) -> &DialectDescriptor {
        &DESCRIPTOR
    }

    fn map_type(&self, remote: &RemoteType) -> Option<CanonicalType> {
        if remote.is_named("json") {
            return Some(CanonicalType::max_varchar(Charset::Utf8));
        }
        None
    }

    fn project_column(&self, column: &ColumnMetadata, sql: &str) -> Option<String> {
        if column.is_native("json") {
            return Some(format!("JSON_FORMAT({})", sql));
        }
        None
    }

    fn rewrite_scalar(&self, function: ScalarFunction, args: &[String]) -> Option<String> {
        match function {
            ScalarFunction::Trim => Some(trim_from(args)),
            // CONCAT takes two or more strings.
            ScalarFunction::Concat => Some(with_default_arg(
                "CONCAT",
                &text_operands(args, |arg| format!("CAST({} AS VARCHAR)", arg)),
                2,
                "''",
            )),
            ScalarFunction::Lpad => Some(with_default_arg("LPAD", args, 3, "' '")),
            ScalarFunction::Rpad => Some(with_default_arg("RPAD", args, 3, "' '")),
            _ => DateAdd::parse(function, args).map(|add| add.quoted_unit_call("DATE_ADD")),
        }
    }

    fn rewrite_aggregate(&self, call: &AggregateSql<'_>) -> Option<String> {
        match call.function {
            AggregateFunction::GroupConcat => {
                Some(format!(
                    "ARRAY_JOIN(ARRAY_AGG({}{} ORDER BY {}), {})",
                    call.distinct_prefix(),
                    call.arg(),
                    call.order_or_self(),
                    DESCRIPTOR.string_literal(call.separator_or_default())
                ))
            }
            _ => None,
        }
    }
}

pub(crate) fn capabilities() -> CapabilitySet {
    CapabilitySet::default()
        .main(standard_main())
        // OFFSET precedes LIMIT in this grammar; only plain limits are pushed.
        .main([MainCapability::Limit])
        .predicates(standard_predicates())
        .literals(standard_literals())
        .literals([LiteralCapability::Bool])
        .scalars(all_scalars())
        // `/` truncates integers; there is no floored quotient.
        .without_scalars([ScalarFunction::FloatDiv, ScalarFunction::Div])
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

    #[test]
    fn test_array_join() {
        let args = vec!["t.tag".to_string()];
        let call = AggregateSql {
            function: AggregateFunction::GroupConcat,
            args: &args,
            distinct: true,
            order_by: Some("t.tag DESC NULLS LAST"),
            separator: None,
        };
        assert_eq!(
            AthenaGenerator.rewrite_aggregate(&call).as_deref(),
            Some("ARRAY_JOIN(ARRAY_AGG(DISTINCT t.tag ORDER BY t.tag DESC NULLS LAST), ',')")
        );
    }

    #[test]
    fn test_array_join_orders_by_the_expression_by_default() {
        let args = vec!["t.tag".to_string()];
        let call = AggregateSql {
            function: AggregateFunction::GroupConcat,
            args: &args,
            distinct: false,
            order_by: None,
            separator: Some(";"),
        };
        assert_eq!(
            AthenaGenerator.rewrite_aggregate(&call).as_deref(),
            Some("ARRAY_JOIN(ARRAY_AGG(t.tag ORDER BY t.tag), ';')")
        );
    }

    #[test]
    fn test_date_add_quotes_unit() {
        let args = vec!["t.ts".to_string(), "3".to_string()];
        assert_eq!(
            AthenaGenerator.rewrite_scalar(ScalarFunction::AddMinutes, &args).as_deref(),
            Some("DATE_ADD('minute', 3, t.ts)")
        );
    }
}
