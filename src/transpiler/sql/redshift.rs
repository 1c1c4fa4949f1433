use super::super::descriptor::{CaseHandling, DialectDescriptor};
use super::super::rewrite::{
    DateAdd, extract, infix, listagg, text_operands, trim_from, with_default_arg,
};
use super::super::traits::{AggregateSql, SqlGenerator};
use super::postgres::{PRECISION_LOSS_AGGREGATES, PRECISION_LOSS_SCALARS};
use super::{all_scalars, standard_literals};
use crate::ast::{AggregateFunction, ColumnMetadata, ScalarFunction};
use crate::capabilities::{
    AggregateCapability, CapabilitySet, LiteralCapability, MainCapability, standard_aggregates,
    standard_main, standard_predicates,
};
use crate::types::{CanonicalType, Charset, RemoteType, codes};

static DESCRIPTOR: DialectDescriptor = DialectDescriptor {
    unquoted_case: CaseHandling::FoldLower,
    // Quoted identifiers fold too unless case sensitivity is enabled.
    quoted_case: CaseHandling::FoldLower,
    scalar_aliases: &[(ScalarFunction::Instr, "STRPOS")],
    cast_aggregates: PRECISION_LOSS_AGGREGATES,
    cast_scalars: PRECISION_LOSS_SCALARS,
    double_type: "FLOAT",
    ..DialectDescriptor::standard("REDSHIFT")
};

pub struct RedshiftGenerator;

impl SqlGenerator for RedshiftGenerator {
    fn descriptor(&self) -> &DialectDescriptor {
        &DESCRIPTOR
    }

    fn map_type(&self, remote: &RemoteType) -> Option<CanonicalType> {
        if remote.is_named("super") {
            return Some(CanonicalType::max_varchar(Charset::Utf8));
        }
        if remote.is_named("geometry") {
            return Some(CanonicalType::geometry(0));
        }
        match remote.type_code {
            codes::TIMESTAMP if remote.is_named("timestamptz") => {
                Some(CanonicalType::timestamp(true))
            }
            _ => None,
        }
    }

    fn project_column(&self, column: &ColumnMetadata, sql: &str) -> Option<String> {
        if column.is_native("super") {
            return Some(format!("JSON_SERIALIZE({})", sql));
        }
        if column.is_native("geometry") {
            return Some(format!("ST_AsText({})", sql));
        }
        None
    }

    fn rewrite_scalar(&self, function: ScalarFunction, args: &[String]) -> Option<String> {
        match function {
            ScalarFunction::Trim => Some(trim_from(args)),
            ScalarFunction::Concat => Some(infix(
                "||",
                &text_operands(args, |arg| format!("CAST({} AS VARCHAR(MAX))", arg)),
            )),
            ScalarFunction::BitAnd => Some(infix("&", args)),
            ScalarFunction::BitOr => Some(infix("|", args)),
            ScalarFunction::BitXor => Some(infix("#", args)),
            ScalarFunction::Replace => Some(with_default_arg("REPLACE", args, 3, "''")),
            ScalarFunction::Year => Some(extract("YEAR", args)),
            ScalarFunction::Month => Some(extract("MONTH", args)),
            ScalarFunction::Day => Some(extract("DAY", args)),
            _ => DateAdd::parse(function, args).map(|add| add.dateadd_call("DATEADD")),
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
}

pub(crate) fn capabilities() -> CapabilitySet {
    CapabilitySet::default()
        .main(standard_main())
        .main([MainCapability::Limit, MainCapability::LimitWithOffset])
        .predicates(standard_predicates())
        .literals(standard_literals())
        .literals([LiteralCapability::Bool])
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
