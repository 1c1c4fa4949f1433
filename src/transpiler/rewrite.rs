//! Function rewrite engine.
//!
//! A dialect's override (if any) is consulted first; everything it leaves
//! alone renders as the aliased or generic positional call. The building
//! blocks below are pure `(args) -> String` rules the dialects compose.

use super::traits::{AggregateSql, SqlGenerator};
use crate::ast::{AggregateFunction, ScalarFunction};

/// Render a scalar function through `generator`.
pub fn rewrite_scalar(
    generator: &dyn SqlGenerator,
    function: ScalarFunction,
    args: &[String],
) -> String {
    generator
        .rewrite_scalar(function, args)
        .unwrap_or_else(|| default_scalar(generator, function, args))
}

/// Render an aggregate function through `generator`.
pub fn rewrite_aggregate(generator: &dyn SqlGenerator, call: &AggregateSql<'_>) -> String {
    generator
        .rewrite_aggregate(call)
        .unwrap_or_else(|| default_aggregate(generator, call))
}

/// Aliased or generic rendering of a scalar function.
pub fn default_scalar(
    generator: &dyn SqlGenerator,
    function: ScalarFunction,
    args: &[String],
) -> String {
    if let Some(op) = function.infix_operator() {
        return infix(op, args);
    }
    if function == ScalarFunction::Neg {
        return negate(args);
    }
    let name = generator.descriptor().scalar_name(function);
    if function.is_keyword() {
        return name.to_string();
    }
    call(name, args)
}

/// Aliased or generic rendering of an aggregate function.
pub fn default_aggregate(generator: &dyn SqlGenerator, call: &AggregateSql<'_>) -> String {
    let descriptor = generator.descriptor();
    match call.function {
        AggregateFunction::Count if call.args.is_empty() => "COUNT(*)".to_string(),
        AggregateFunction::GroupConcat => {
            group_concat_separator_clause(descriptor.aggregate_name(call.function), call, |s| {
                descriptor.string_literal(s)
            })
        }
        function => format!(
            "{}({}{})",
            descriptor.aggregate_name(function),
            call.distinct_prefix(),
            call.args.join(", ")
        ),
    }
}

/// `NAME(a, b, ...)`
pub fn call(name: &str, args: &[String]) -> String {
    format!("{}({})", name, args.join(", "))
}

/// `(a op b op ...)`
pub fn infix(op: &str, args: &[String]) -> String {
    format!("({})", args.join(&format!(" {} ", op)))
}

/// `-(a)`. Parenthesized so a negative operand never forms `--`.
pub fn negate(args: &[String]) -> String {
    format!("-({})", args.join(", "))
}

/// `TRIM(a)` or, with a character set, `TRIM(chars FROM a)`.
pub fn trim_from(args: &[String]) -> String {
    match args {
        [value, chars] => format!("TRIM({} FROM {})", chars, value),
        _ => call("TRIM", args),
    }
}

/// Concatenation operands converted to text, leaving string literals bare.
/// Needed where concatenation rejects numbers or adds them.
pub fn text_operands(args: &[String], convert: impl Fn(&str) -> String) -> Vec<String> {
    args.iter()
        .map(|arg| {
            if arg.starts_with('\'') {
                arg.clone()
            } else {
                convert(arg)
            }
        })
        .collect()
}

/// One-sided trim: the named call, or `TRIM(LEADING|TRAILING chars FROM a)`.
pub fn trim_side(name: &str, side: &str, args: &[String]) -> String {
    match args {
        [value, chars] => format!("TRIM({} {} FROM {})", side, chars, value),
        _ => call(name, args),
    }
}

/// Fill an omitted trailing argument.
pub fn with_default_arg(name: &str, args: &[String], arity: usize, default: &str) -> String {
    let mut args = args.to_vec();
    if args.len() < arity {
        args.push(default.to_string());
    }
    call(name, &args)
}

/// `CHARINDEX(sub, str)` style: the two arguments swapped.
pub fn swapped(name: &str, args: &[String]) -> String {
    match args {
        [a, b] => call(name, &[b.clone(), a.clone()]),
        _ => call(name, args),
    }
}

/// `EXTRACT(YEAR FROM a)`
pub fn extract(field: &str, args: &[String]) -> String {
    format!("EXTRACT({} FROM {})", field, args.join(", "))
}

/// Integer division as a floored quotient cast to an integral type.
pub fn floored_division(cast_type: &str, floor_divisor: bool, args: &[String]) -> String {
    match args {
        [a, b] if floor_divisor => format!("CAST(FLOOR({} / FLOOR({})) AS {})", a, b, cast_type),
        [a, b] => format!("CAST(FLOOR({} / {}) AS {})", a, b, cast_type),
        _ => call("DIV", args),
    }
}

/// Whether rendered SQL is a bare integer literal.
pub fn is_integer_literal(sql: &str) -> bool {
    let digits = sql.strip_prefix('-').unwrap_or(sql);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// `(factor * n)`, folded when `n` is a literal.
pub fn scaled(factor: i64, amount: &str) -> String {
    if is_integer_literal(amount) {
        if let Some(product) = amount.parse::<i64>().ok().and_then(|n| n.checked_mul(factor)) {
            return product.to_string();
        }
    }
    format!("({} * {})", factor, amount)
}

/// `(7 * n)`, folded when `n` is a literal.
pub fn weeks_as_days(amount: &str) -> String {
    scaled(7, amount)
}

/// Units of the date arithmetic functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl DateUnit {
    pub fn of(function: ScalarFunction) -> Option<DateUnit> {
        match function {
            ScalarFunction::AddSeconds => Some(DateUnit::Second),
            ScalarFunction::AddMinutes => Some(DateUnit::Minute),
            ScalarFunction::AddHours => Some(DateUnit::Hour),
            ScalarFunction::AddDays => Some(DateUnit::Day),
            ScalarFunction::AddWeeks => Some(DateUnit::Week),
            ScalarFunction::AddMonths => Some(DateUnit::Month),
            ScalarFunction::AddYears => Some(DateUnit::Year),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            DateUnit::Second => "SECOND",
            DateUnit::Minute => "MINUTE",
            DateUnit::Hour => "HOUR",
            DateUnit::Day => "DAY",
            DateUnit::Week => "WEEK",
            DateUnit::Month => "MONTH",
            DateUnit::Year => "YEAR",
        }
    }
}

/// Date arithmetic request: `value + amount unit`.
#[derive(Debug, Clone, Copy)]
pub struct DateAdd<'a> {
    pub unit: DateUnit,
    pub value: &'a str,
    pub amount: &'a str,
}

impl<'a> DateAdd<'a> {
    /// Split a date arithmetic call into its parts.
    pub fn parse(function: ScalarFunction, args: &'a [String]) -> Option<Self> {
        let unit = DateUnit::of(function)?;
        match args {
            [value, amount] => Some(Self {
                unit,
                value: value.as_str(),
                amount: amount.as_str(),
            }),
            _ => None,
        }
    }

    /// Weeks as seven days, for targets without a week unit.
    pub fn weeks_to_days(self) -> (DateUnit, String) {
        match self.unit {
            DateUnit::Week => (DateUnit::Day, weeks_as_days(self.amount)),
            unit => (unit, self.amount.to_string()),
        }
    }

    /// `(value + n DAYS)` labeled durations.
    pub fn labeled_duration(self) -> String {
        let (unit, amount) = self.weeks_to_days();
        let amount = if is_integer_literal(&amount) || amount.starts_with('(') {
            amount
        } else {
            format!("({})", amount)
        };
        format!("({} + {} {}S)", self.value, amount, unit.keyword())
    }

    /// `DATEADD(DAY, n, value)`
    pub fn dateadd_call(self, name: &str) -> String {
        format!("{}({}, {}, {})", name, self.unit.keyword(), self.amount, self.value)
    }

    /// `DATE_ADD('day', n, value)`
    pub fn quoted_unit_call(self, name: &str) -> String {
        format!(
            "{}('{}', {}, {})",
            name,
            self.unit.keyword().to_ascii_lowercase(),
            self.amount,
            self.value
        )
    }

    /// `DATE_ADD(value, INTERVAL n DAY)`
    pub fn interval_call(self, name: &str) -> String {
        format!(
            "{}({}, INTERVAL {} {})",
            name,
            self.value,
            self.amount,
            self.unit.keyword()
        )
    }

    /// `(value + INTERVAL 'n' DAY)`; non-literal amounts scale a unit
    /// interval. Weeks become days. `precision` is appended to the unit.
    pub fn interval_literal(self, precision: &str) -> String {
        let (unit, amount) = self.weeks_to_days();
        if is_integer_literal(&amount) {
            format!(
                "({} + INTERVAL '{}' {}{})",
                self.value,
                amount,
                unit.keyword(),
                precision
            )
        } else {
            format!(
                "({} + {} * INTERVAL '1' {}{})",
                self.value,
                amount,
                unit.keyword(),
                precision
            )
        }
    }
}

/// `NAME([DISTINCT ]expr ORDER BY keys SEPARATOR 'sep')`
pub fn group_concat_separator_clause(
    name: &str,
    call: &AggregateSql<'_>,
    quote: impl Fn(&str) -> String,
) -> String {
    format!(
        "{}({}{} ORDER BY {} SEPARATOR {})",
        name,
        call.distinct_prefix(),
        call.arg(),
        call.order_or_self(),
        quote(call.separator_or_default())
    )
}

/// `LISTAGG([DISTINCT ]expr, 'sep') WITHIN GROUP (ORDER BY keys)`
pub fn listagg(call: &AggregateSql<'_>, quote: impl Fn(&str) -> String) -> String {
    format!(
        "LISTAGG({}{}, {}) WITHIN GROUP (ORDER BY {})",
        call.distinct_prefix(),
        call.arg(),
        quote(call.separator_or_default()),
        call.order_or_self()
    )
}
