//! Generic function identities.
//!
//! The generic spelling returned by `name()` is what the native dialect
//! renders verbatim; every other dialect aliases or rewrites it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar function and operator identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScalarFunction {
    // Arithmetic operators
    Add,
    Sub,
    Mult,
    FloatDiv,
    Neg,
    // Numeric
    Div,
    Mod,
    Abs,
    Ceil,
    Floor,
    Round,
    Trunc,
    Power,
    Sqrt,
    Sign,
    Ln,
    Exp,
    BitAnd,
    BitOr,
    BitXor,
    // String
    Concat,
    Lower,
    Upper,
    Length,
    Substr,
    Trim,
    Ltrim,
    Rtrim,
    Replace,
    Lpad,
    Rpad,
    Instr,
    // Date and time
    AddDays,
    AddWeeks,
    AddMonths,
    AddYears,
    AddHours,
    AddMinutes,
    AddSeconds,
    CurrentDate,
    CurrentTimestamp,
    Year,
    Month,
    Day,
}

impl ScalarFunction {
    pub const ALL: &'static [ScalarFunction] = &[
        Self::Add,
        Self::Sub,
        Self::Mult,
        Self::FloatDiv,
        Self::Neg,
        Self::Div,
        Self::Mod,
        Self::Abs,
        Self::Ceil,
        Self::Floor,
        Self::Round,
        Self::Trunc,
        Self::Power,
        Self::Sqrt,
        Self::Sign,
        Self::Ln,
        Self::Exp,
        Self::BitAnd,
        Self::BitOr,
        Self::BitXor,
        Self::Concat,
        Self::Lower,
        Self::Upper,
        Self::Length,
        Self::Substr,
        Self::Trim,
        Self::Ltrim,
        Self::Rtrim,
        Self::Replace,
        Self::Lpad,
        Self::Rpad,
        Self::Instr,
        Self::AddDays,
        Self::AddWeeks,
        Self::AddMonths,
        Self::AddYears,
        Self::AddHours,
        Self::AddMinutes,
        Self::AddSeconds,
        Self::CurrentDate,
        Self::CurrentTimestamp,
        Self::Year,
        Self::Month,
        Self::Day,
    ];

    /// Generic spelling.
    pub fn name(self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mult => "MULT",
            Self::FloatDiv => "FLOAT_DIV",
            Self::Neg => "NEG",
            Self::Div => "DIV",
            Self::Mod => "MOD",
            Self::Abs => "ABS",
            Self::Ceil => "CEIL",
            Self::Floor => "FLOOR",
            Self::Round => "ROUND",
            Self::Trunc => "TRUNC",
            Self::Power => "POWER",
            Self::Sqrt => "SQRT",
            Self::Sign => "SIGN",
            Self::Ln => "LN",
            Self::Exp => "EXP",
            Self::BitAnd => "BIT_AND",
            Self::BitOr => "BIT_OR",
            Self::BitXor => "BIT_XOR",
            Self::Concat => "CONCAT",
            Self::Lower => "LOWER",
            Self::Upper => "UPPER",
            Self::Length => "LENGTH",
            Self::Substr => "SUBSTR",
            Self::Trim => "TRIM",
            Self::Ltrim => "LTRIM",
            Self::Rtrim => "RTRIM",
            Self::Replace => "REPLACE",
            Self::Lpad => "LPAD",
            Self::Rpad => "RPAD",
            Self::Instr => "INSTR",
            Self::AddDays => "ADD_DAYS",
            Self::AddWeeks => "ADD_WEEKS",
            Self::AddMonths => "ADD_MONTHS",
            Self::AddYears => "ADD_YEARS",
            Self::AddHours => "ADD_HOURS",
            Self::AddMinutes => "ADD_MINUTES",
            Self::AddSeconds => "ADD_SECONDS",
            Self::CurrentDate => "CURRENT_DATE",
            Self::CurrentTimestamp => "CURRENT_TIMESTAMP",
            Self::Year => "YEAR",
            Self::Month => "MONTH",
            Self::Day => "DAY",
        }
    }

    /// Accepted argument count as `(min, max)`; `None` means unbounded.
    pub fn arity(self) -> (usize, Option<usize>) {
        match self {
            Self::CurrentDate | Self::CurrentTimestamp => (0, Some(0)),
            Self::Neg
            | Self::Abs
            | Self::Ceil
            | Self::Floor
            | Self::Sqrt
            | Self::Sign
            | Self::Ln
            | Self::Exp
            | Self::Lower
            | Self::Upper
            | Self::Length
            | Self::Year
            | Self::Month
            | Self::Day => (1, Some(1)),
            Self::Round | Self::Trunc | Self::Trim | Self::Ltrim | Self::Rtrim => (1, Some(2)),
            Self::Substr | Self::Replace | Self::Lpad | Self::Rpad => (2, Some(3)),
            Self::Concat => (1, None),
            Self::Add
            | Self::Sub
            | Self::Mult
            | Self::FloatDiv
            | Self::Div
            | Self::Mod
            | Self::Power
            | Self::BitAnd
            | Self::BitOr
            | Self::BitXor
            | Self::Instr
            | Self::AddDays
            | Self::AddWeeks
            | Self::AddMonths
            | Self::AddYears
            | Self::AddHours
            | Self::AddMinutes
            | Self::AddSeconds => (2, Some(2)),
        }
    }

    /// Infix operator symbol for the arithmetic identities.
    pub fn infix_operator(self) -> Option<&'static str> {
        match self {
            Self::Add => Some("+"),
            Self::Sub => Some("-"),
            Self::Mult => Some("*"),
            Self::FloatDiv => Some("/"),
            _ => None,
        }
    }

    /// Functions written as bare keywords without parentheses.
    pub fn is_keyword(self) -> bool {
        matches!(self, Self::CurrentDate | Self::CurrentTimestamp)
    }
}

impl fmt::Display for ScalarFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Aggregate function identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AggregateFunction {
    Count,
    Sum,
    Min,
    Max,
    Avg,
    Median,
    Stddev,
    Variance,
    GroupConcat,
}

impl AggregateFunction {
    pub const ALL: &'static [AggregateFunction] = &[
        Self::Count,
        Self::Sum,
        Self::Min,
        Self::Max,
        Self::Avg,
        Self::Median,
        Self::Stddev,
        Self::Variance,
        Self::GroupConcat,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Count => "COUNT",
            Self::Sum => "SUM",
            Self::Min => "MIN",
            Self::Max => "MAX",
            Self::Avg => "AVG",
            Self::Median => "MEDIAN",
            Self::Stddev => "STDDEV",
            Self::Variance => "VARIANCE",
            Self::GroupConcat => "GROUP_CONCAT",
        }
    }

    /// Accepted argument count. `COUNT` with no arguments is `COUNT(*)`.
    pub fn arity(self) -> (usize, Option<usize>) {
        match self {
            Self::Count => (0, None),
            _ => (1, Some(1)),
        }
    }
}

impl fmt::Display for AggregateFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_exhaustive() {
        assert_eq!(ScalarFunction::ALL.len(), 44);
        assert_eq!(AggregateFunction::ALL.len(), 9);
    }

    #[test]
    fn test_arity() {
        assert_eq!(ScalarFunction::Trim.arity(), (1, Some(2)));
        assert_eq!(ScalarFunction::CurrentDate.arity(), (0, Some(0)));
        assert_eq!(AggregateFunction::Count.arity(), (0, None));
        assert_eq!(AggregateFunction::Sum.arity(), (1, Some(1)));
    }
}
