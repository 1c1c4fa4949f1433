//! Capability tokens and the per-dialect registry.
//!
//! A dialect's capability set is a closed-world promise to the planner:
//! every declared token has a rendering path in that dialect. The registry
//! is built once and shared.

mod required;

pub use required::required_capabilities;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::LazyLock;

use crate::ast::ScalarFunction;
use crate::transpiler::dialect::Dialect;

/// Query shape tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MainCapability {
    SelectListProjection,
    SelectListExpressions,
    FilterExpressions,
    AggregateSingleGroup,
    AggregateGroupByColumn,
    AggregateGroupByExpression,
    AggregateHaving,
    OrderByColumn,
    OrderByExpression,
    Limit,
    LimitWithOffset,
}

impl MainCapability {
    pub const ALL: &'static [MainCapability] = &[
        Self::SelectListProjection,
        Self::SelectListExpressions,
        Self::FilterExpressions,
        Self::AggregateSingleGroup,
        Self::AggregateGroupByColumn,
        Self::AggregateGroupByExpression,
        Self::AggregateHaving,
        Self::OrderByColumn,
        Self::OrderByExpression,
        Self::Limit,
        Self::LimitWithOffset,
    ];
}

/// Predicate tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PredicateCapability {
    And,
    Or,
    Not,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Like,
    LikeEscape,
    Between,
    InConstList,
    IsNull,
    IsNotNull,
}

impl PredicateCapability {
    pub const ALL: &'static [PredicateCapability] = &[
        Self::And,
        Self::Or,
        Self::Not,
        Self::Equal,
        Self::NotEqual,
        Self::Less,
        Self::LessEqual,
        Self::Greater,
        Self::GreaterEqual,
        Self::Like,
        Self::LikeEscape,
        Self::Between,
        Self::InConstList,
        Self::IsNull,
        Self::IsNotNull,
    ];
}

/// Literal tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LiteralCapability {
    Null,
    Bool,
    Date,
    Timestamp,
    Double,
    ExactNumeric,
    String,
    Interval,
}

impl LiteralCapability {
    pub const ALL: &'static [LiteralCapability] = &[
        Self::Null,
        Self::Bool,
        Self::Date,
        Self::Timestamp,
        Self::Double,
        Self::ExactNumeric,
        Self::String,
        Self::Interval,
    ];
}

/// Aggregate tokens, including the flavours a planner must check separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AggregateCapability {
    Count,
    CountStar,
    CountDistinct,
    Sum,
    SumDistinct,
    Min,
    Max,
    Avg,
    AvgDistinct,
    Median,
    Stddev,
    Variance,
    GroupConcat,
    GroupConcatDistinct,
    GroupConcatSeparator,
    GroupConcatOrderBy,
}

impl AggregateCapability {
    pub const ALL: &'static [AggregateCapability] = &[
        Self::Count,
        Self::CountStar,
        Self::CountDistinct,
        Self::Sum,
        Self::SumDistinct,
        Self::Min,
        Self::Max,
        Self::Avg,
        Self::AvgDistinct,
        Self::Median,
        Self::Stddev,
        Self::Variance,
        Self::GroupConcat,
        Self::GroupConcatDistinct,
        Self::GroupConcatSeparator,
        Self::GroupConcatOrderBy,
    ];
}

/// Five independent token sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilitySet {
    pub main: BTreeSet<MainCapability>,
    pub predicates: BTreeSet<PredicateCapability>,
    pub literals: BTreeSet<LiteralCapability>,
    pub scalar_functions: BTreeSet<ScalarFunction>,
    pub aggregate_functions: BTreeSet<AggregateCapability>,
}

impl CapabilitySet {
    /// Every token.
    pub fn all() -> Self {
        Self::default()
            .main(MainCapability::ALL.iter().copied())
            .predicates(PredicateCapability::ALL.iter().copied())
            .literals(LiteralCapability::ALL.iter().copied())
            .scalars(ScalarFunction::ALL.iter().copied())
            .aggregates(AggregateCapability::ALL.iter().copied())
    }

    pub fn main(mut self, tokens: impl IntoIterator<Item = MainCapability>) -> Self {
        self.main.extend(tokens);
        self
    }

    pub fn predicates(mut self, tokens: impl IntoIterator<Item = PredicateCapability>) -> Self {
        self.predicates.extend(tokens);
        self
    }

    pub fn literals(mut self, tokens: impl IntoIterator<Item = LiteralCapability>) -> Self {
        self.literals.extend(tokens);
        self
    }

    pub fn scalars(mut self, tokens: impl IntoIterator<Item = ScalarFunction>) -> Self {
        self.scalar_functions.extend(tokens);
        self
    }

    pub fn aggregates(mut self, tokens: impl IntoIterator<Item = AggregateCapability>) -> Self {
        self.aggregate_functions.extend(tokens);
        self
    }

    pub fn without_scalars(mut self, tokens: impl IntoIterator<Item = ScalarFunction>) -> Self {
        for token in tokens {
            self.scalar_functions.remove(&token);
        }
        self
    }

    /// Whether every token of `other` is declared here.
    pub fn contains_all(&self, other: &CapabilitySet) -> bool {
        other.main.is_subset(&self.main)
            && other.predicates.is_subset(&self.predicates)
            && other.literals.is_subset(&self.literals)
            && other.scalar_functions.is_subset(&self.scalar_functions)
            && other.aggregate_functions.is_subset(&self.aggregate_functions)
    }

    /// Tokens of `required` not declared here.
    pub fn missing(&self, required: &CapabilitySet) -> CapabilitySet {
        CapabilitySet {
            main: required.main.difference(&self.main).copied().collect(),
            predicates: required.predicates.difference(&self.predicates).copied().collect(),
            literals: required.literals.difference(&self.literals).copied().collect(),
            scalar_functions: required
                .scalar_functions
                .difference(&self.scalar_functions)
                .copied()
                .collect(),
            aggregate_functions: required
                .aggregate_functions
                .difference(&self.aggregate_functions)
                .copied()
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.main.is_empty()
            && self.predicates.is_empty()
            && self.literals.is_empty()
            && self.scalar_functions.is_empty()
            && self.aggregate_functions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.main.len()
            + self.predicates.len()
            + self.literals.len()
            + self.scalar_functions.len()
            + self.aggregate_functions.len()
    }
}

/// Tokens nearly every relational target supports.
pub(crate) fn standard_predicates() -> impl Iterator<Item = PredicateCapability> {
    PredicateCapability::ALL.iter().copied()
}

/// Query shapes every dialect except the generic one supports.
pub(crate) fn standard_main() -> [MainCapability; 9] {
    use MainCapability::*;
    [
        SelectListProjection,
        SelectListExpressions,
        FilterExpressions,
        AggregateSingleGroup,
        AggregateGroupByColumn,
        AggregateGroupByExpression,
        AggregateHaving,
        OrderByColumn,
        OrderByExpression,
    ]
}

/// The core aggregates every non-generic dialect renders.
pub(crate) fn standard_aggregates() -> [AggregateCapability; 9] {
    use AggregateCapability::*;
    [
        Count,
        CountStar,
        CountDistinct,
        Sum,
        SumDistinct,
        Min,
        Max,
        Avg,
        AvgDistinct,
    ]
}

/// The arithmetic operators.
pub(crate) fn arithmetic() -> [ScalarFunction; 4] {
    use ScalarFunction::*;
    [Add, Sub, Mult, Neg]
}

static REGISTRY: LazyLock<[CapabilitySet; Dialect::ALL.len()]> =
    LazyLock::new(|| Dialect::ALL.map(|d| d.declared_capabilities()));

/// The capability set of `dialect`.
pub fn capabilities_for(dialect: Dialect) -> &'static CapabilitySet {
    // `Dialect::ALL` lists variants in declaration order.
    &REGISTRY[dialect as usize]
}
