use serde::{Deserialize, Serialize};

use super::functions::{AggregateFunction, ScalarFunction};
use super::literals::Literal;
use crate::types::CanonicalType;

/// Column metadata captured when the remote schema was read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMetadata {
    pub name: String,
    pub data_type: CanonicalType,
    /// Native type name, e.g. `CLOB` or `hierarchyid`.
    pub type_name: String,
}

impl ColumnMetadata {
    pub fn new(
        name: impl Into<String>,
        data_type: CanonicalType,
        type_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            data_type,
            type_name: type_name.into(),
        }
    }

    /// Case-insensitive check of the native type name.
    pub fn is_native(&self, name: &str) -> bool {
        self.type_name.eq_ignore_ascii_case(name)
    }

    /// Upper-cased native type name.
    pub fn native_upper(&self) -> String {
        self.type_name.to_ascii_uppercase()
    }
}

/// Reference to a column of the queried table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRef {
    pub table: String,
    pub table_alias: Option<String>,
    pub ordinal: usize,
    pub metadata: ColumnMetadata,
}

impl ColumnRef {
    /// Name the column is qualified with: the table alias, else the table.
    pub fn qualifier(&self) -> &str {
        self.table_alias.as_deref().unwrap_or(&self.table)
    }
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompareOp {
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl CompareOp {
    pub fn sql_symbol(self) -> &'static str {
        match self {
            CompareOp::Equal => "=",
            CompareOp::NotEqual => "<>",
            CompareOp::Less => "<",
            CompareOp::LessEqual => "<=",
            CompareOp::Greater => ">",
            CompareOp::GreaterEqual => ">=",
        }
    }
}

/// Boolean-valued nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    And(Vec<Expr>),
    Or(Vec<Expr>),
    Not(Box<Expr>),
    Compare {
        op: CompareOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Like {
        expr: Box<Expr>,
        pattern: Box<Expr>,
        escape: Option<Box<Expr>>,
    },
    Between {
        expr: Box<Expr>,
        low: Box<Expr>,
        high: Box<Expr>,
    },
    InList {
        expr: Box<Expr>,
        values: Vec<Expr>,
    },
    IsNull {
        expr: Box<Expr>,
        negated: bool,
    },
}

/// A scalar function or arithmetic operator call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarCall {
    pub function: ScalarFunction,
    pub args: Vec<Expr>,
}

/// An aggregate call. An empty `order_by` means no ordering was requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateCall {
    pub function: AggregateFunction,
    pub args: Vec<Expr>,
    #[serde(default)]
    pub distinct: bool,
    #[serde(default)]
    pub order_by: Vec<OrderByItem>,
    #[serde(default)]
    pub separator: Option<String>,
}

/// One ordering key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderByItem {
    pub expr: Expr,
    pub ascending: bool,
    pub nulls_last: bool,
}

/// Expressions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Column(ColumnRef),
    Literal(Literal),
    Predicate(Box<Predicate>),
    Scalar(ScalarCall),
    Aggregate(AggregateCall),
}

impl Expr {
    pub fn is_column(&self) -> bool {
        matches!(self, Expr::Column(_))
    }

    /// Whether an aggregate call appears anywhere in this expression.
    pub fn contains_aggregate(&self) -> bool {
        match self {
            Expr::Aggregate(_) => true,
            Expr::Column(_) | Expr::Literal(_) => false,
            Expr::Scalar(call) => call.args.iter().any(Expr::contains_aggregate),
            Expr::Predicate(p) => p.operands().iter().any(|e| e.contains_aggregate()),
        }
    }
}

impl Predicate {
    /// Whether the rendered predicate is already wrapped in parentheses.
    ///
    /// Junctions of two or more operands are; a single-operand junction
    /// renders as its operand.
    pub fn is_self_delimited(&self) -> bool {
        match self {
            Predicate::And(items) | Predicate::Or(items) => match items.as_slice() {
                [Expr::Predicate(inner)] => inner.is_self_delimited(),
                _ => true,
            },
            _ => false,
        }
    }

    /// Direct child expressions, in rendering order.
    pub fn operands(&self) -> Vec<&Expr> {
        match self {
            Predicate::And(items) | Predicate::Or(items) => items.iter().collect(),
            Predicate::Not(e) => vec![e.as_ref()],
            Predicate::Compare { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            Predicate::Like {
                expr,
                pattern,
                escape,
            } => {
                let mut v = vec![expr.as_ref(), pattern.as_ref()];
                if let Some(esc) = escape {
                    v.push(esc.as_ref());
                }
                v
            }
            Predicate::Between { expr, low, high } => {
                vec![expr.as_ref(), low.as_ref(), high.as_ref()]
            }
            Predicate::InList { expr, values } => {
                let mut v = vec![expr.as_ref()];
                v.extend(values.iter());
                v
            }
            Predicate::IsNull { expr, .. } => vec![expr.as_ref()],
        }
    }
}

impl From<Literal> for Expr {
    fn from(lit: Literal) -> Self {
        Expr::Literal(lit)
    }
}

impl From<ColumnRef> for Expr {
    fn from(col: ColumnRef) -> Self {
        Expr::Column(col)
    }
}

impl From<Predicate> for Expr {
    fn from(p: Predicate) -> Self {
        Expr::Predicate(Box::new(p))
    }
}

impl From<ScalarCall> for Expr {
    fn from(call: ScalarCall) -> Self {
        Expr::Scalar(call)
    }
}

impl From<AggregateCall> for Expr {
    fn from(call: AggregateCall) -> Self {
        Expr::Aggregate(call)
    }
}
