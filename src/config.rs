//! Dialect properties.
//!
//! Loaded from TOML by the host:
//!
//! ```toml
//! cast_number_to_decimal = "10,2"
//!
//! [schema_notes]
//! identifier_quote = "\""
//! stores_upper_case_identifiers = true
//! nulls_are_sorted_high = true
//! ```

use serde::Deserialize;

use crate::error::{PushdownError, PushdownResult};
use crate::types::MAX_DECIMAL_PRECISION;

/// Per-dialect settings supplied by the host.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DialectProperties {
    /// `"precision,scale"` used for numerics whose precision is unknown or
    /// too large.
    pub cast_number_to_decimal: Option<String>,
    /// Driver metadata the generic dialect is built from.
    pub schema_notes: Option<SchemaNotes>,
}

impl DialectProperties {
    /// Parse properties from TOML text.
    pub fn from_toml_str(content: &str) -> PushdownResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn with_number_override(mut self, raw: impl Into<String>) -> Self {
        self.cast_number_to_decimal = Some(raw.into());
        self
    }

    pub fn with_schema_notes(mut self, notes: SchemaNotes) -> Self {
        self.schema_notes = Some(notes);
        self
    }

    /// The parsed numeric override, if configured.
    pub fn number_override(&self) -> PushdownResult<Option<DecimalOverride>> {
        self.cast_number_to_decimal
            .as_deref()
            .map(DecimalOverride::parse)
            .transpose()
    }
}

/// Decimal type forced onto numerics the canonical type system cannot hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalOverride {
    pub precision: u32,
    pub scale: u32,
}

impl DecimalOverride {
    const PROPERTY: &'static str = "cast_number_to_decimal";

    /// Parse `"precision,scale"`, echoing the raw value on failure.
    pub fn parse(raw: &str) -> PushdownResult<Self> {
        let invalid = |reason: &str| PushdownError::property(Self::PROPERTY, raw, reason);

        let (precision, scale) = raw
            .split_once(',')
            .ok_or_else(|| invalid("expected 'precision,scale'"))?;
        let precision: u32 = precision
            .trim()
            .parse()
            .map_err(|_| invalid("precision is not a non-negative integer"))?;
        let scale: u32 = scale
            .trim()
            .parse()
            .map_err(|_| invalid("scale is not a non-negative integer"))?;

        if precision == 0 || precision > MAX_DECIMAL_PRECISION {
            return Err(invalid(&format!(
                "precision must be between 1 and {}",
                MAX_DECIMAL_PRECISION
            )));
        }
        if scale > precision {
            return Err(invalid("scale exceeds precision"));
        }
        Ok(Self { precision, scale })
    }
}

/// Identifier and NULL-ordering facts reported by a JDBC-style driver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SchemaNotes {
    /// Quote string; a blank string means quoting is unsupported.
    pub identifier_quote: String,
    pub stores_upper_case_identifiers: bool,
    pub stores_lower_case_identifiers: bool,
    pub stores_mixed_case_identifiers: bool,
    pub supports_mixed_case_identifiers: bool,
    pub stores_upper_case_quoted_identifiers: bool,
    pub stores_lower_case_quoted_identifiers: bool,
    pub stores_mixed_case_quoted_identifiers: bool,
    pub supports_mixed_case_quoted_identifiers: bool,
    pub nulls_are_sorted_high: bool,
    pub nulls_are_sorted_low: bool,
    pub nulls_are_sorted_at_start: bool,
    pub nulls_are_sorted_at_end: bool,
    pub supports_catalogs_in_data_manipulation: bool,
    pub supports_schemas_in_data_manipulation: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_override() {
        assert_eq!(
            DecimalOverride::parse("10,2").unwrap(),
            DecimalOverride { precision: 10, scale: 2 }
        );
        assert_eq!(
            DecimalOverride::parse(" 36 , 0 ").unwrap(),
            DecimalOverride { precision: 36, scale: 0 }
        );
    }

    #[test]
    fn test_parse_override_errors_echo_value() {
        for raw in ["10;2", "ten,2", "10,-1", "37,2", "0,0", "5,6"] {
            let err = DecimalOverride::parse(raw).unwrap_err();
            assert!(
                err.to_string().contains(&format!("'{}'", raw)),
                "{} should echo {}",
                err,
                raw
            );
        }
    }

    #[test]
    fn test_from_toml() {
        let props = DialectProperties::from_toml_str(
            r#"
            cast_number_to_decimal = "18,4"

            [schema_notes]
            identifier_quote = "`"
            stores_lower_case_identifiers = true
            nulls_are_sorted_low = true
            "#,
        )
        .unwrap();
        assert_eq!(
            props.number_override().unwrap(),
            Some(DecimalOverride { precision: 18, scale: 4 })
        );
        let notes = props.schema_notes.unwrap();
        assert_eq!(notes.identifier_quote, "`");
        assert!(notes.stores_lower_case_identifiers);
        assert!(!notes.stores_upper_case_identifiers);
    }

    #[test]
    fn test_from_toml_rejects_garbage() {
        assert!(matches!(
            DialectProperties::from_toml_str("cast_number_to_decimal = 12"),
            Err(PushdownError::Toml(_))
        ));
        assert!(DialectProperties::from_toml_str("unknown_key = true").is_err());
    }
}
