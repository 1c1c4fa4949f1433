use serde::{Deserialize, Serialize};

use super::expr::{ColumnMetadata, ColumnRef, Expr, OrderByItem};

/// The queried table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRef {
    pub catalog: Option<String>,
    pub schema: Option<String>,
    pub name: String,
    pub alias: Option<String>,
    /// Columns in declared ordinal order.
    #[serde(default)]
    pub columns: Vec<ColumnMetadata>,
}

impl TableRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            catalog: None,
            schema: None,
            name: name.into(),
            alias: None,
            columns: Vec::new(),
        }
    }

    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn catalog(mut self, catalog: impl Into<String>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn column(mut self, metadata: ColumnMetadata) -> Self {
        self.columns.push(metadata);
        self
    }

    /// Reference to the column at `ordinal`, if the table declares it.
    pub fn col(&self, ordinal: usize) -> Option<ColumnRef> {
        self.columns.get(ordinal).map(|metadata| ColumnRef {
            table: self.name.clone(),
            table_alias: self.alias.clone(),
            ordinal,
            metadata: metadata.clone(),
        })
    }

    /// Reference to the column called `name`, if the table declares it.
    pub fn col_named(&self, name: &str) -> Option<ColumnRef> {
        let ordinal = self.columns.iter().position(|c| c.name == name)?;
        self.col(ordinal)
    }

    /// References to every column in ordinal order.
    pub fn all_columns(&self) -> Vec<ColumnRef> {
        (0..self.columns.len()).filter_map(|i| self.col(i)).collect()
    }
}

/// What the query projects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SelectList {
    /// `*`
    Star,
    /// Any single column; only the row count matters.
    AnyColumn,
    Exprs(Vec<Expr>),
}

/// Row limit with optional offset.
///
/// `count` is absent only when an offset was given without a limit; such a
/// statement fails to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limit {
    pub count: Option<u64>,
    pub offset: Option<u64>,
}

/// A single-table SELECT statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Select {
    pub select_list: SelectList,
    pub from: TableRef,
    pub where_clause: Option<Expr>,
    #[serde(default)]
    pub group_by: Vec<Expr>,
    pub having: Option<Expr>,
    #[serde(default)]
    pub order_by: Vec<OrderByItem>,
    pub limit: Option<Limit>,
}

impl Select {
    /// `SELECT * FROM table`.
    pub fn from(table: TableRef) -> Self {
        Self {
            select_list: SelectList::Star,
            from: table,
            where_clause: None,
            group_by: Vec::new(),
            having: None,
            order_by: Vec::new(),
            limit: None,
        }
    }

    pub fn columns(mut self, exprs: impl IntoIterator<Item = impl Into<Expr>>) -> Self {
        self.select_list = SelectList::Exprs(exprs.into_iter().map(Into::into).collect());
        self
    }

    pub fn any_column(mut self) -> Self {
        self.select_list = SelectList::AnyColumn;
        self
    }

    pub fn filter(mut self, predicate: impl Into<Expr>) -> Self {
        self.where_clause = Some(predicate.into());
        self
    }

    pub fn group_by(mut self, keys: impl IntoIterator<Item = impl Into<Expr>>) -> Self {
        self.group_by = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn having(mut self, predicate: impl Into<Expr>) -> Self {
        self.having = Some(predicate.into());
        self
    }

    pub fn order_by(mut self, items: impl IntoIterator<Item = OrderByItem>) -> Self {
        self.order_by = items.into_iter().collect();
        self
    }

    pub fn limit(mut self, count: u64) -> Self {
        let offset = self.limit.and_then(|l| l.offset);
        self.limit = Some(Limit {
            count: Some(count),
            offset,
        });
        self
    }

    /// Skip `offset` rows. Needs a [`Select::limit`] as well, set before or
    /// after.
    pub fn offset(mut self, offset: u64) -> Self {
        let count = self.limit.and_then(|l| l.count);
        self.limit = Some(Limit {
            count,
            offset: Some(offset),
        });
        self
    }

    /// Whether any aggregate occurs in the select list or HAVING clause.
    pub fn has_aggregates(&self) -> bool {
        let in_list = match &self.select_list {
            SelectList::Exprs(exprs) => exprs.iter().any(Expr::contains_aggregate),
            _ => false,
        };
        in_list || self.having.as_ref().is_some_and(Expr::contains_aggregate)
    }
}
