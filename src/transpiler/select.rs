//! SELECT statement rendering.

use super::expr::{Position, plain_column, render_column, render_expr, render_nested, render_order_by};
use super::pagination::{InnerQuery, InnerRequest, positional_alias, rewrite_limit};
use super::traits::SqlGenerator;
use crate::ast::{Limit, Select, SelectList, TableRef};
use crate::error::{PushdownError, PushdownResult};

/// Generate SQL for a SELECT statement.
pub fn build_select(select: &Select, generator: &dyn SqlGenerator) -> PushdownResult<String> {
    match select.limit {
        None => Ok(build_inner(select, generator, InnerRequest::default())?.sql),
        Some(Limit { count: None, .. }) => Err(PushdownError::invalid_ast(
            "limit",
            "an offset needs a row count",
        )),
        Some(Limit {
            count: Some(count),
            offset,
        }) => rewrite_limit(
            generator.descriptor().limit_strategy(),
            |request| build_inner(select, generator, request),
            count,
            offset,
        ),
    }
}

/// The statement without any row limit.
fn build_inner(
    select: &Select,
    generator: &dyn SqlGenerator,
    request: InnerRequest,
) -> PushdownResult<InnerQuery> {
    let mut sql = String::from("SELECT ");

    if let Some(top) = request.top {
        sql.push_str(&format!("TOP {} ", top));
    }

    let items = select_list(select, generator, request.positional_aliases)?;
    let column_count = items.len();
    sql.push_str(&items.join(", "));

    sql.push_str(" FROM ");
    sql.push_str(&table_reference(&select.from, generator));

    if let Some(filter) = &select.where_clause {
        sql.push_str(" WHERE ");
        sql.push_str(&render_expr(filter, generator, Position::Nested)?);
    }

    if !select.group_by.is_empty() {
        sql.push_str(" GROUP BY ");
        sql.push_str(&render_nested(&select.group_by, generator)?.join(", "));
    }

    if let Some(having) = &select.having {
        sql.push_str(" HAVING ");
        sql.push_str(&render_expr(having, generator, Position::Nested)?);
    }

    if !select.order_by.is_empty() {
        sql.push_str(" ORDER BY ");
        sql.push_str(&render_order_by(&select.order_by, generator)?);
    }

    Ok(InnerQuery { sql, column_count })
}

/// Select-list items, aliased `c0, c1, ...` on request.
fn select_list(
    select: &Select,
    generator: &dyn SqlGenerator,
    positional_aliases: bool,
) -> PushdownResult<Vec<String>> {
    let items = match &select.select_list {
        SelectList::Star if positional_aliases || has_projection_hazard(&select.from, generator) => {
            expand_star(&select.from, generator)?
        }
        SelectList::Star => return Ok(vec!["*".to_string()]),
        SelectList::AnyColumn => vec!["1".to_string()],
        SelectList::Exprs(exprs) => {
            if exprs.is_empty() {
                return Err(PushdownError::invalid_ast("select list", "no expressions"));
            }
            exprs
                .iter()
                .map(|e| render_expr(e, generator, Position::SelectListDirect))
                .collect::<PushdownResult<Vec<_>>>()?
        }
    };

    if !positional_aliases {
        return Ok(items);
    }
    Ok(items
        .into_iter()
        .enumerate()
        .map(|(i, item)| format!("{} AS {}", item, positional_alias(i)))
        .collect())
}

/// Whether any column of `table` renders differently when projected.
fn has_projection_hazard(table: &TableRef, generator: &dyn SqlGenerator) -> bool {
    table.all_columns().iter().any(|column| {
        generator
            .project_column(&column.metadata, &plain_column(column, generator))
            .is_some()
    })
}

/// `*` as one projected item per column, in ordinal order.
fn expand_star(table: &TableRef, generator: &dyn SqlGenerator) -> PushdownResult<Vec<String>> {
    if table.columns.is_empty() {
        return Err(PushdownError::invalid_ast(
            "select list",
            format!("cannot expand * without column metadata for {}", table.name),
        ));
    }
    Ok(table
        .all_columns()
        .iter()
        .map(|column| render_column(column, generator, Position::SelectListDirect))
        .collect())
}

/// `[catalog.][schema.]table[ alias]`, qualified only as the dialect requires.
fn table_reference(table: &TableRef, generator: &dyn SqlGenerator) -> String {
    let descriptor = generator.descriptor();
    let mut parts = Vec::with_capacity(3);

    let catalog = table
        .catalog
        .as_deref()
        .filter(|_| descriptor.requires_catalog_qualified_names());
    let schema = table
        .schema
        .as_deref()
        .filter(|_| descriptor.requires_schema_qualified_names());

    if let Some(catalog) = catalog {
        parts.push(descriptor.quote_if_needed(catalog));
        // `catalog..table` selects the default schema.
        if schema.is_none() && descriptor.requires_schema_qualified_names() {
            parts.push(String::new());
        }
    }
    if let Some(schema) = schema {
        parts.push(descriptor.quote_if_needed(schema));
    }
    parts.push(descriptor.quote_if_needed(&table.name));

    let mut sql = parts.join(".");
    if let Some(alias) = &table.alias {
        sql.push(' ');
        sql.push_str(&descriptor.quote_if_needed(alias));
    }
    sql
}
