//! A dialect built entirely from driver-reported schema notes.
//!
//! Only what every ANSI target agrees on is declared, so the planner pushes
//! little; construction fails when the notes leave quoting, identifier case
//! or NULL sorting undeterminable.

use super::super::descriptor::{CaseHandling, DialectDescriptor, NullSorting, QuoteStyle};
use super::super::traits::SqlGenerator;
use crate::capabilities::{
    CapabilitySet, LiteralCapability, arithmetic, standard_aggregates, standard_main,
    standard_predicates,
};
use crate::config::{DialectProperties, SchemaNotes};
use crate::error::{PushdownError, PushdownResult};

const NAME: &str = "GENERIC";

pub struct GenericGenerator {
    descriptor: DialectDescriptor,
}

impl GenericGenerator {
    pub fn new(properties: &DialectProperties) -> PushdownResult<Self> {
        let notes = properties
            .schema_notes
            .as_ref()
            .ok_or_else(|| PushdownError::malformed(NAME, "schema notes are required"))?;
        let descriptor = DialectDescriptor {
            quote_style: quote_style(notes)?,
            unquoted_case: unquoted_case(notes)?,
            quoted_case: quoted_case(notes)?,
            requires_catalog_qualified_names: notes.supports_catalogs_in_data_manipulation,
            requires_schema_qualified_names: notes.supports_schemas_in_data_manipulation,
            null_sorting: null_sorting(notes)?,
            null_ordering_clause: false,
            ..DialectDescriptor::standard(NAME)
        };
        tracing::debug!("Generic dialect from schema notes: {:?}", descriptor);
        Ok(Self { descriptor })
    }
}

impl SqlGenerator for GenericGenerator {
    fn descriptor(&self) -> &DialectDescriptor {
        &self.descriptor
    }
}

fn quote_style(notes: &SchemaNotes) -> PushdownResult<QuoteStyle> {
    match notes.identifier_quote.trim() {
        "\"" => Ok(QuoteStyle::Double),
        "`" => Ok(QuoteStyle::Backtick),
        "[" | "[]" => Ok(QuoteStyle::Bracket),
        "" => Err(PushdownError::malformed(NAME, "identifier quoting is unsupported")),
        other => Err(PushdownError::malformed(
            NAME,
            format!("unknown identifier quote '{}'", other),
        )),
    }
}

fn unquoted_case(notes: &SchemaNotes) -> PushdownResult<CaseHandling> {
    case_handling(
        notes.supports_mixed_case_identifiers,
        notes.stores_upper_case_identifiers,
        notes.stores_lower_case_identifiers,
        notes.stores_mixed_case_identifiers,
    )
    .ok_or_else(|| PushdownError::malformed(NAME, "unquoted identifier case is undeterminable"))
}

fn quoted_case(notes: &SchemaNotes) -> PushdownResult<CaseHandling> {
    case_handling(
        notes.supports_mixed_case_quoted_identifiers,
        notes.stores_upper_case_quoted_identifiers,
        notes.stores_lower_case_quoted_identifiers,
        notes.stores_mixed_case_quoted_identifiers,
    )
    .ok_or_else(|| PushdownError::malformed(NAME, "quoted identifier case is undeterminable"))
}

fn case_handling(
    supports_mixed: bool,
    stores_upper: bool,
    stores_lower: bool,
    stores_mixed: bool,
) -> Option<CaseHandling> {
    if supports_mixed {
        Some(CaseHandling::CaseSensitive)
    } else if stores_upper {
        Some(CaseHandling::FoldUpper)
    } else if stores_lower {
        Some(CaseHandling::FoldLower)
    } else if stores_mixed {
        Some(CaseHandling::CaseSensitive)
    } else {
        None
    }
}

fn null_sorting(notes: &SchemaNotes) -> PushdownResult<NullSorting> {
    let flags = [
        (notes.nulls_are_sorted_high, NullSorting::High),
        (notes.nulls_are_sorted_low, NullSorting::Low),
        (notes.nulls_are_sorted_at_start, NullSorting::AtStart),
        (notes.nulls_are_sorted_at_end, NullSorting::AtEnd),
    ];
    let mut set = flags.iter().filter(|(on, _)| *on).map(|(_, sorting)| *sorting);
    match (set.next(), set.next()) {
        (Some(sorting), None) => Ok(sorting),
        (None, _) => Err(PushdownError::malformed(NAME, "NULL sorting is not reported")),
        (Some(_), Some(_)) => Err(PushdownError::malformed(
            NAME,
            "NULL sorting is reported more than once",
        )),
    }
}

pub(crate) fn capabilities() -> CapabilitySet {
    use LiteralCapability::*;
    CapabilitySet::default()
        .main(standard_main())
        .predicates(standard_predicates())
        .literals([Null, Double, ExactNumeric, String])
        .scalars(arithmetic())
        .aggregates(standard_aggregates())
}
