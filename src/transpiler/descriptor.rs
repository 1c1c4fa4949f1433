//! Immutable per-target rendering configuration.

use regex::Regex;
use std::sync::LazyLock;

use super::pagination::LimitStrategy;
use super::traits::is_reserved_word;
use crate::ast::{AggregateFunction, ScalarFunction};
use crate::types::NumericFallback;

static UPPER_IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Z0-9_]*$").expect("valid identifier pattern"));
static LOWER_IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9_]*$").expect("valid identifier pattern"));
static MIXED_IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("valid identifier pattern"));

/// How a target treats identifier case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseHandling {
    FoldUpper,
    FoldLower,
    CaseSensitive,
}

/// Where NULLs sort when no explicit order is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullSorting {
    /// NULLs compare greater than every value.
    High,
    /// NULLs compare less than every value.
    Low,
    AtStart,
    AtEnd,
}

impl NullSorting {
    /// Whether NULLs come last for a key sorted in the given direction.
    pub fn nulls_last(self, ascending: bool) -> bool {
        match self {
            NullSorting::High => ascending,
            NullSorting::Low => !ascending,
            NullSorting::AtStart => false,
            NullSorting::AtEnd => true,
        }
    }
}

/// Identifier quoting characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    /// `"id"`, embedded quotes doubled.
    Double,
    /// `` `id` ``, embedded backticks doubled.
    Backtick,
    /// `[id]`, no internal escaping.
    Bracket,
}

impl QuoteStyle {
    /// Wrap and escape.
    pub fn quote(self, identifier: &str) -> String {
        match self {
            QuoteStyle::Double => format!("\"{}\"", identifier.replace('"', "\"\"")),
            QuoteStyle::Backtick => format!("`{}`", identifier.replace('`', "``")),
            QuoteStyle::Bracket => format!("[{}]", identifier),
        }
    }

    /// Inverse of [`QuoteStyle::quote`]. `None` if `quoted` is not wrapped.
    pub fn unquote(self, quoted: &str) -> Option<String> {
        match self {
            QuoteStyle::Double => quoted
                .strip_prefix('"')?
                .strip_suffix('"')
                .map(|s| s.replace("\"\"", "\"")),
            QuoteStyle::Backtick => quoted
                .strip_prefix('`')?
                .strip_suffix('`')
                .map(|s| s.replace("``", "`")),
            QuoteStyle::Bracket => quoted
                .strip_prefix('[')?
                .strip_suffix(']')
                .map(str::to_string),
        }
    }
}

/// Everything about a target that is data rather than behaviour.
#[derive(Debug, Clone)]
pub struct DialectDescriptor {
    pub name: &'static str,
    pub quote_style: QuoteStyle,
    pub unquoted_case: CaseHandling,
    pub quoted_case: CaseHandling,
    pub requires_catalog_qualified_names: bool,
    pub requires_schema_qualified_names: bool,
    pub null_sorting: NullSorting,
    /// `NULLS FIRST` / `NULLS LAST` can be written.
    pub null_ordering_clause: bool,
    pub limit_strategy: LimitStrategy,
    pub numeric_fallback: NumericFallback,
    pub scalar_aliases: &'static [(ScalarFunction, &'static str)],
    pub aggregate_aliases: &'static [(AggregateFunction, &'static str)],
    /// Functions the target accepts with fewer arguments than the generic form.
    pub scalar_max_args: &'static [(ScalarFunction, usize)],
    /// Aggregates whose result precision the driver reports as `(0,0)`.
    pub cast_aggregates: &'static [AggregateFunction],
    /// Scalars whose result precision the driver reports as `(0,0)`.
    pub cast_scalars: &'static [ScalarFunction],
    /// Target of the precision-loss cast.
    pub double_type: &'static str,
}

impl DialectDescriptor {
    /// Baseline every dialect starts from.
    pub const fn standard(name: &'static str) -> Self {
        Self {
            name,
            quote_style: QuoteStyle::Double,
            unquoted_case: CaseHandling::FoldUpper,
            quoted_case: CaseHandling::CaseSensitive,
            requires_catalog_qualified_names: false,
            requires_schema_qualified_names: true,
            null_sorting: NullSorting::High,
            null_ordering_clause: true,
            limit_strategy: LimitStrategy::Trailing,
            numeric_fallback: NumericFallback::Double,
            scalar_aliases: &[],
            aggregate_aliases: &[],
            scalar_max_args: &[],
            cast_aggregates: &[],
            cast_scalars: &[],
            double_type: "DOUBLE PRECISION",
        }
    }

    /// Always wrap and escape.
    pub fn quote(&self, identifier: &str) -> String {
        self.quote_style.quote(identifier)
    }

    /// Leave simple, non-reserved identifiers bare; quote the rest.
    pub fn quote_if_needed(&self, identifier: &str) -> String {
        let simple = match self.unquoted_case {
            CaseHandling::FoldUpper => &*UPPER_IDENTIFIER,
            CaseHandling::FoldLower => &*LOWER_IDENTIFIER,
            CaseHandling::CaseSensitive => &*MIXED_IDENTIFIER,
        };
        if simple.is_match(identifier) && !is_reserved_word(identifier) {
            identifier.to_string()
        } else {
            self.quote(identifier)
        }
    }

    pub fn unquoted_case_handling(&self) -> CaseHandling {
        self.unquoted_case
    }

    pub fn quoted_case_handling(&self) -> CaseHandling {
        self.quoted_case
    }

    pub fn requires_catalog_qualified_names(&self) -> bool {
        self.requires_catalog_qualified_names
    }

    pub fn requires_schema_qualified_names(&self) -> bool {
        self.requires_schema_qualified_names
    }

    pub fn default_null_sorting(&self) -> NullSorting {
        self.null_sorting
    }

    pub fn supports_null_ordering_clause(&self) -> bool {
        self.null_ordering_clause
    }

    pub fn limit_strategy(&self) -> LimitStrategy {
        self.limit_strategy
    }

    pub fn numeric_fallback(&self) -> NumericFallback {
        self.numeric_fallback
    }

    /// Single-quoted string literal with embedded quotes doubled.
    pub fn string_literal(&self, value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }

    pub fn scalar_function_alias(&self, function: ScalarFunction) -> Option<&'static str> {
        self.scalar_aliases
            .iter()
            .find(|(f, _)| *f == function)
            .map(|(_, name)| *name)
    }

    pub fn aggregate_function_alias(&self, function: AggregateFunction) -> Option<&'static str> {
        self.aggregate_aliases
            .iter()
            .find(|(f, _)| *f == function)
            .map(|(_, name)| *name)
    }

    /// Spelling of a scalar function: its alias, else the generic name.
    pub fn scalar_name(&self, function: ScalarFunction) -> &'static str {
        self.scalar_function_alias(function)
            .unwrap_or_else(|| function.name())
    }

    /// Spelling of an aggregate function: its alias, else the generic name.
    pub fn aggregate_name(&self, function: AggregateFunction) -> &'static str {
        self.aggregate_function_alias(function)
            .unwrap_or_else(|| function.name())
    }

    /// Accepted argument counts of a scalar function on this target.
    pub fn scalar_arity(&self, function: ScalarFunction) -> (usize, Option<usize>) {
        let (min, max) = function.arity();
        match self.scalar_max_args.iter().find(|(f, _)| *f == function) {
            Some(&(_, limit)) => (min, Some(max.map_or(limit, |max| max.min(limit)))),
            None => (min, max),
        }
    }

    pub fn needs_aggregate_cast(&self, function: AggregateFunction) -> bool {
        self.cast_aggregates.contains(&function)
    }

    pub fn needs_scalar_cast(&self, function: ScalarFunction) -> bool {
        self.cast_scalars.contains(&function)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_styles() {
        assert_eq!(QuoteStyle::Double.quote("a\"b"), "\"a\"\"b\"");
        assert_eq!(QuoteStyle::Backtick.quote("a`b"), "`a``b`");
        assert_eq!(QuoteStyle::Bracket.quote("a]b"), "[a]b]");
        assert_eq!(QuoteStyle::Bracket.unquote("[a]b]").as_deref(), Some("a]b"));
        assert_eq!(QuoteStyle::Double.unquote("abc"), None);
    }

    #[test]
    fn test_quote_if_needed_follows_case_folding() {
        let upper = DialectDescriptor::standard("UPPER");
        assert_eq!(upper.quote_if_needed("ORDERS"), "ORDERS");
        assert_eq!(upper.quote_if_needed("orders"), "\"orders\"");
        assert_eq!(upper.quote_if_needed("Order-1"), "\"Order-1\"");
        assert_eq!(upper.quote_if_needed("ORDER"), "\"ORDER\"");
        assert_eq!(upper.quote_if_needed("1ABC"), "\"1ABC\"");

        let lower = DialectDescriptor {
            unquoted_case: CaseHandling::FoldLower,
            ..DialectDescriptor::standard("LOWER")
        };
        assert_eq!(lower.quote_if_needed("orders"), "orders");
        assert_eq!(lower.quote_if_needed("ORDERS"), "\"ORDERS\"");
    }

    #[test]
    fn test_null_sorting() {
        assert!(NullSorting::High.nulls_last(true));
        assert!(!NullSorting::High.nulls_last(false));
        assert!(!NullSorting::Low.nulls_last(true));
        assert!(NullSorting::AtEnd.nulls_last(false));
        assert!(!NullSorting::AtStart.nulls_last(true));
    }

    #[test]
    fn test_scalar_arity_narrowed() {
        let d = DialectDescriptor {
            scalar_max_args: &[(ScalarFunction::Ltrim, 1)],
            ..DialectDescriptor::standard("X")
        };
        assert_eq!(d.scalar_arity(ScalarFunction::Ltrim), (1, Some(1)));
        assert_eq!(d.scalar_arity(ScalarFunction::Rtrim), (1, Some(2)));
        assert_eq!(d.scalar_arity(ScalarFunction::Concat), (1, None));
    }

    #[test]
    fn test_string_literal() {
        let d = DialectDescriptor::standard("X");
        assert_eq!(d.string_literal("it's"), "'it''s'");
    }
}
