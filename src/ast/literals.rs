use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Interval literal flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntervalKind {
    /// `'y-m'` text.
    YearToMonth { precision: u32 },
    /// `'d hh:mi:ss.fff'` text.
    DayToSecond { precision: u32, fraction: u32 },
}

/// Literal values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Null,
    Bool(bool),
    ExactNumeric(Decimal),
    Double(f64),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
    String(String),
    Interval { value: String, kind: IntervalKind },
}

impl Literal {
    /// Integer literal as text, used by rewrites that inline amounts.
    pub fn as_integer_text(&self) -> Option<String> {
        match self {
            Literal::ExactNumeric(d) if d.fract().is_zero() => Some(d.trunc().to_string()),
            _ => None,
        }
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Literal::Bool(b)
    }
}

impl From<i64> for Literal {
    fn from(n: i64) -> Self {
        Literal::ExactNumeric(Decimal::from(n))
    }
}

impl From<i32> for Literal {
    fn from(n: i32) -> Self {
        Literal::ExactNumeric(Decimal::from(n))
    }
}

impl From<Decimal> for Literal {
    fn from(d: Decimal) -> Self {
        Literal::ExactNumeric(d)
    }
}

impl From<f64> for Literal {
    fn from(f: f64) -> Self {
        Literal::Double(f)
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::String(s.to_string())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::String(s)
    }
}

impl From<NaiveDate> for Literal {
    fn from(d: NaiveDate) -> Self {
        Literal::Date(d)
    }
}

impl From<NaiveDateTime> for Literal {
    fn from(ts: NaiveDateTime) -> Self {
        Literal::Timestamp(ts)
    }
}
