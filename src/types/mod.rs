//! Canonical column types and remote type descriptors.
//!
//! Every remote column is described by a [`RemoteType`] (the raw driver
//! metadata) and mapped by its dialect into exactly one [`CanonicalType`].

pub mod base;
pub mod codes;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest decimal precision the canonical type system can hold.
pub const MAX_DECIMAL_PRECISION: u32 = 36;
/// Largest varchar size.
pub const MAX_VARCHAR_SIZE: u32 = 2_000_000;
/// Largest char size. Wider chars become varchars.
pub const MAX_CHAR_SIZE: u32 = 2_000;

/// Character set of a string type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Charset {
    Utf8,
    Ascii,
}

/// The fixed internal type system every remote column maps into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CanonicalType {
    Boolean,
    Decimal { precision: u32, scale: u32 },
    Double,
    Varchar { size: u32, charset: Charset },
    Char { size: u32, charset: Charset },
    Date,
    Timestamp { local_time_zone: bool },
    IntervalYearToMonth { precision: u32 },
    IntervalDayToSecond { precision: u32, fraction: u32 },
    Geometry { srid: u32 },
    Unsupported,
}

impl CanonicalType {
    /// Decimal with precision and scale capped to what the type system holds.
    pub fn decimal(precision: u32, scale: u32) -> Self {
        let precision = precision.clamp(1, MAX_DECIMAL_PRECISION);
        Self::Decimal {
            precision,
            scale: scale.min(precision),
        }
    }

    /// Varchar of the given size. Non-positive sizes mean "unbounded".
    pub fn varchar(size: i64, charset: Charset) -> Self {
        Self::Varchar {
            size: cap_size(size, MAX_VARCHAR_SIZE),
            charset,
        }
    }

    /// Varchar of the largest size.
    pub fn max_varchar(charset: Charset) -> Self {
        Self::Varchar {
            size: MAX_VARCHAR_SIZE,
            charset,
        }
    }

    /// Char of the given size, becoming a varchar when too wide.
    pub fn char(size: i64, charset: Charset) -> Self {
        if size > i64::from(MAX_CHAR_SIZE) {
            return Self::varchar(size, charset);
        }
        Self::Char {
            size: size.max(1) as u32,
            charset,
        }
    }

    pub fn timestamp(local_time_zone: bool) -> Self {
        Self::Timestamp { local_time_zone }
    }

    pub fn geometry(srid: u32) -> Self {
        Self::Geometry { srid }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported)
    }
}

fn cap_size(size: i64, max: u32) -> u32 {
    if size <= 0 || size > i64::from(max) {
        max
    } else {
        size as u32
    }
}

impl fmt::Display for CanonicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let charset = |c: &Charset| match c {
            Charset::Utf8 => "UTF8",
            Charset::Ascii => "ASCII",
        };
        match self {
            Self::Boolean => write!(f, "BOOLEAN"),
            Self::Decimal { precision, scale } => write!(f, "DECIMAL({}, {})", precision, scale),
            Self::Double => write!(f, "DOUBLE"),
            Self::Varchar { size, charset: c } => write!(f, "VARCHAR({}) {}", size, charset(c)),
            Self::Char { size, charset: c } => write!(f, "CHAR({}) {}", size, charset(c)),
            Self::Date => write!(f, "DATE"),
            Self::Timestamp { local_time_zone: false } => write!(f, "TIMESTAMP"),
            Self::Timestamp { local_time_zone: true } => {
                write!(f, "TIMESTAMP WITH LOCAL TIME ZONE")
            }
            Self::IntervalYearToMonth { precision } => {
                write!(f, "INTERVAL YEAR({}) TO MONTH", precision)
            }
            Self::IntervalDayToSecond { precision, fraction } => {
                write!(f, "INTERVAL DAY({}) TO SECOND({})", precision, fraction)
            }
            Self::Geometry { srid } => write!(f, "GEOMETRY({})", srid),
            Self::Unsupported => write!(f, "UNSUPPORTED"),
        }
    }
}

/// What a numeric column becomes when its precision exceeds
/// [`MAX_DECIMAL_PRECISION`] or is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericFallback {
    Double,
    Varchar,
}

/// Raw per-column type metadata reported by a remote driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteType {
    pub type_code: i32,
    /// Size for strings, precision for numerics.
    pub size: i32,
    pub scale: i32,
    /// Native type name, e.g. `NUMBER`, `hierarchyid`.
    pub type_name: String,
}

impl RemoteType {
    pub fn new(type_code: i32, size: i32, scale: i32, type_name: impl Into<String>) -> Self {
        Self {
            type_code,
            size,
            scale,
            type_name: type_name.into(),
        }
    }

    /// Case-insensitive check of the native type name.
    pub fn is_named(&self, name: &str) -> bool {
        self.type_name.eq_ignore_ascii_case(name)
    }

    /// Upper-cased native type name.
    pub fn upper_name(&self) -> String {
        self.type_name.to_ascii_uppercase()
    }
}
