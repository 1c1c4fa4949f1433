//! SELECT clause tests.

use chrono::NaiveDate;
use pretty_assertions::assert_eq;

use super::{dialect, orders};
use crate::ast::builders::*;
use crate::ast::{Expr, IntervalKind, Select, TableRef};
use crate::error::PushdownError;
use crate::transpiler::{Dialect, ToSql};

fn native(select: &Select) -> String {
    select.to_sql_with_dialect(&dialect(Dialect::Native)).unwrap()
}

#[test]
fn test_select_star() {
    assert_eq!(native(&Select::from(orders())), "SELECT * FROM SALES.ORDERS");
}

#[test]
fn test_select_any_column() {
    let select = Select::from(orders()).any_column();
    assert_eq!(native(&select), "SELECT 1 FROM SALES.ORDERS");
}

#[test]
fn test_select_columns() {
    let t = orders();
    let select = Select::from(t.clone()).columns([t.col(0).unwrap(), t.col(2).unwrap()]);
    assert_eq!(native(&select), "SELECT ORDERS.ID, ORDERS.NOTE FROM SALES.ORDERS");
}

#[test]
fn test_table_alias_qualifies_columns() {
    let t = orders().alias("O");
    let select = Select::from(t.clone()).columns([t.col_named("AMOUNT").unwrap()]);
    assert_eq!(native(&select), "SELECT O.AMOUNT FROM SALES.ORDERS O");
}

#[test]
fn test_where_junctions() {
    let t = orders();
    let id = t.col(0).unwrap();
    let note = t.col(2).unwrap();
    let select = Select::from(t).filter(and([
        gt(id, int(100)),
        or([is_null(note.clone()), like(note, text("A%"))]),
    ]));
    assert_eq!(
        native(&select),
        "SELECT * FROM SALES.ORDERS WHERE (ORDERS.ID > 100 AND (ORDERS.NOTE IS NULL OR ORDERS.NOTE LIKE 'A%'))"
    );
}

#[test]
fn test_single_operand_junction_renders_bare() {
    let t = orders();
    let id = t.col(0).unwrap();
    let select = Select::from(t).filter(and([is_not_null(id)]));
    assert_eq!(
        native(&select),
        "SELECT * FROM SALES.ORDERS WHERE ORDERS.ID IS NOT NULL"
    );
}

#[test]
fn test_other_predicates() {
    let t = orders();
    let id = t.col(0).unwrap();
    let note = t.col(2).unwrap();
    let select = Select::from(t).filter(and([
        not(between(id.clone(), int(1), int(10))),
        is_in(id.clone(), [int(1), int(2), int(3)]),
        ne(id.clone(), int(7)),
        lte(id, int(50)),
        like_escape(note, text("50!%%"), text("!")),
    ]));
    assert_eq!(
        native(&select),
        "SELECT * FROM SALES.ORDERS WHERE (NOT (ORDERS.ID BETWEEN 1 AND 10) AND ORDERS.ID IN (1, 2, 3) \
         AND ORDERS.ID <> 7 AND ORDERS.ID <= 50 AND ORDERS.NOTE LIKE '50!%%' ESCAPE '!')"
    );
}

#[test]
fn test_predicate_operands_are_parenthesized() {
    let t = orders();
    let id = t.col(0).unwrap();
    let amount = t.col(1).unwrap();
    let same = || eq(id.clone(), amount.clone());
    let select = Select::from(t.clone()).filter(and([
        is_null(same()),
        eq(same(), boolean(false)),
        eq(or([same(), is_null(id.clone())]), boolean(true)),
        eq(and([same()]), boolean(true)),
        not(same()),
    ]));
    assert_eq!(
        native(&select),
        "SELECT * FROM SALES.ORDERS WHERE ((ORDERS.ID = ORDERS.AMOUNT) IS NULL \
         AND (ORDERS.ID = ORDERS.AMOUNT) = FALSE \
         AND (ORDERS.ID = ORDERS.AMOUNT OR ORDERS.ID IS NULL) = TRUE \
         AND (ORDERS.ID = ORDERS.AMOUNT) = TRUE \
         AND NOT (ORDERS.ID = ORDERS.AMOUNT))"
    );

    let postgres = dialect(Dialect::PostgreSql);
    let select = Select::from(t).any_column().filter(is_null(same()));
    assert_eq!(
        select.to_sql_with_dialect(&postgres).unwrap(),
        "SELECT 1 FROM \"SALES\".\"ORDERS\" WHERE (\"ORDERS\".\"ID\" = \"ORDERS\".\"AMOUNT\") IS NULL"
    );
}

#[test]
fn test_group_by_having() {
    let t = orders();
    let note = t.col(2).unwrap();
    let select = Select::from(t)
        .columns([Expr::from(note.clone()), count_star()])
        .group_by([note])
        .having(gt(count_star(), int(1)));
    assert_eq!(
        native(&select),
        "SELECT ORDERS.NOTE, COUNT(*) FROM SALES.ORDERS GROUP BY ORDERS.NOTE HAVING COUNT(*) > 1"
    );
}

#[test]
fn test_aggregate_flavours() {
    let t = orders();
    let id = t.col(0).unwrap();
    let amount = t.col(1).unwrap();
    let select = Select::from(t).columns([
        aggregate_distinct(crate::ast::AggregateFunction::Count, [Expr::from(id)]),
        aggregate(crate::ast::AggregateFunction::Sum, [Expr::from(amount)]),
    ]);
    assert_eq!(
        native(&select),
        "SELECT COUNT(DISTINCT ORDERS.ID), SUM(ORDERS.AMOUNT) FROM SALES.ORDERS"
    );
}

#[test]
fn test_order_by_with_nulls_clause() {
    let t = orders();
    let id = t.col(0).unwrap();
    let note = t.col(2).unwrap();
    let select = Select::from(t).order_by([asc(id, true), desc(note, false)]);
    assert_eq!(
        native(&select),
        "SELECT * FROM SALES.ORDERS ORDER BY ORDERS.ID ASC NULLS LAST, ORDERS.NOTE DESC NULLS FIRST"
    );
}

#[test]
fn test_order_by_emulates_null_placement() {
    // NULLs sort low and NULLS FIRST/LAST cannot be written.
    let mysql = dialect(Dialect::MySql);
    let t = orders();
    let id = t.col(0).unwrap();

    let select = Select::from(t.clone()).order_by([asc(id.clone(), true)]);
    assert_eq!(
        select.to_sql_with_dialect(&mysql).unwrap(),
        "SELECT * FROM SHOP.ORDERS ORDER BY CASE WHEN ORDERS.ID IS NULL THEN 1 ELSE 0 END, ORDERS.ID ASC"
    );

    let select = Select::from(t.clone()).order_by([desc(id.clone(), false)]);
    assert_eq!(
        select.to_sql_with_dialect(&mysql).unwrap(),
        "SELECT * FROM SHOP.ORDERS ORDER BY CASE WHEN ORDERS.ID IS NULL THEN 0 ELSE 1 END, ORDERS.ID DESC"
    );

    // Already the default placement: no extra key.
    let select = Select::from(t).order_by([asc(id.clone(), false), desc(id, true)]);
    assert_eq!(
        select.to_sql_with_dialect(&mysql).unwrap(),
        "SELECT * FROM SHOP.ORDERS ORDER BY ORDERS.ID ASC, ORDERS.ID DESC"
    );
}

#[test]
fn test_literals() {
    let t = orders();
    let created = t.col(3).unwrap();
    let id = t.col(0).unwrap();
    let day = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
    let noon = day.and_hms_opt(12, 30, 0).unwrap();
    let select = Select::from(t).filter(or([
        eq(created.clone(), date(day)),
        eq(created.clone(), timestamp(noon)),
        eq(id.clone(), double(1.5)),
        eq(id.clone(), boolean(true)),
        eq(id, null()),
        eq(
            created,
            interval("3-2", IntervalKind::YearToMonth { precision: 2 }),
        ),
    ]));
    assert_eq!(
        native(&select),
        "SELECT * FROM SALES.ORDERS WHERE (ORDERS.CREATED = DATE '2024-01-31' \
         OR ORDERS.CREATED = TIMESTAMP '2024-01-31 12:30:00.000' OR ORDERS.ID = 1.5 \
         OR ORDERS.ID = TRUE OR ORDERS.ID = NULL OR ORDERS.CREATED = INTERVAL '3-2' YEAR(2) TO MONTH)"
    );
}

#[test]
fn test_string_literal_escaping() {
    let t = orders();
    let note = t.col(2).unwrap();
    let select = Select::from(t).filter(eq(note, text("it's")));
    assert_eq!(
        native(&select),
        "SELECT * FROM SALES.ORDERS WHERE ORDERS.NOTE = 'it''s'"
    );
}

#[test]
fn test_identifiers_quoted_when_needed() {
    let select = Select::from(TableRef::new("Order-1").schema("ORDER"));
    assert_eq!(native(&select), "SELECT * FROM \"ORDER\".\"Order-1\"");
}

#[test]
fn test_invalid_ast() {
    let t = orders();
    let id = t.col(0).unwrap();
    let cases = vec![
        Select::from(t.clone()).filter(is_in(id.clone(), Vec::new())),
        Select::from(t.clone()).filter(and(Vec::new())),
        Select::from(t.clone()).columns(Vec::<Expr>::new()),
        Select::from(t.clone()).columns([scalar(crate::ast::ScalarFunction::Abs, Vec::new())]),
        Select::from(t.clone()).columns([aggregate(crate::ast::AggregateFunction::Sum, Vec::new())]),
        Select::from(t.clone()).columns([aggregate_distinct(crate::ast::AggregateFunction::Count, Vec::new())]),
        Select::from(t).filter(eq(id, double(f64::NAN))),
    ];
    let native = dialect(Dialect::Native);
    for select in cases {
        let err = select.to_sql_with_dialect(&native).unwrap_err();
        assert!(matches!(err, PushdownError::InvalidAst { .. }), "{}", err);
    }
}

#[test]
fn test_arity_error_names_the_function() {
    let t = orders();
    let id = t.col(0).unwrap();
    let select = Select::from(t).columns([scalar(
        crate::ast::ScalarFunction::Substr,
        [Expr::from(id)],
    )]);
    let err = select
        .to_sql_with_dialect(&dialect(Dialect::Native))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid AST at scalar function: SUBSTR expects 2 to 3 argument(s), got 1"
    );
}
