//! Row limits through every strategy.

use pretty_assertions::assert_eq;

use super::{dialect, orders};
use crate::ast::builders::*;
use crate::ast::{Select, TableRef};
use crate::error::PushdownError;
use crate::transpiler::{Dialect, LimitStrategy, ToSql};

#[test]
fn test_each_dialect_declares_one_strategy() {
    let expected = [
        (Dialect::Db2, LimitStrategy::FetchFirst),
        (Dialect::MySql, LimitStrategy::Trailing),
        (Dialect::Oracle, LimitStrategy::RowNum),
        (Dialect::SqlServer, LimitStrategy::Top),
        (Dialect::Sybase, LimitStrategy::Top),
        (Dialect::Teradata, LimitStrategy::Top),
        (Dialect::PostgreSql, LimitStrategy::Trailing),
    ];
    for (d, strategy) in expected {
        assert_eq!(dialect(d).descriptor().limit_strategy(), strategy, "{}", d);
    }
}

#[test]
fn test_trailing_limit() {
    let select = Select::from(orders()).limit(5);
    assert_eq!(
        select.to_sql_with_dialect(&dialect(Dialect::Native)).unwrap(),
        "SELECT * FROM SALES.ORDERS LIMIT 5"
    );
    let select = select.offset(20);
    assert_eq!(
        select.to_sql_with_dialect(&dialect(Dialect::MySql)).unwrap(),
        "SELECT * FROM SHOP.ORDERS LIMIT 5 OFFSET 20"
    );
}

#[test]
fn test_limit_follows_order_by() {
    let t = orders();
    let id = t.col(0).unwrap();
    let select = Select::from(t).order_by([desc(id, false)]).limit(3);
    assert_eq!(
        select.to_sql_with_dialect(&dialect(Dialect::Native)).unwrap(),
        "SELECT * FROM SALES.ORDERS ORDER BY ORDERS.ID DESC NULLS FIRST LIMIT 3"
    );
    assert_eq!(
        select.to_sql_with_dialect(&dialect(Dialect::Db2)).unwrap(),
        "SELECT * FROM SALES.ORDERS ORDER BY ORDERS.ID DESC NULLS FIRST FETCH FIRST 3 ROWS ONLY"
    );
}

#[test]
fn test_top() {
    let t = orders();
    let select = Select::from(t.clone()).columns([t.col(0).unwrap()]).limit(10);
    assert_eq!(
        select.to_sql_with_dialect(&dialect(Dialect::SqlServer)).unwrap(),
        "SELECT TOP 10 ORDERS.ID FROM SHOP.SALES.ORDERS"
    );
    assert_eq!(
        select.to_sql_with_dialect(&dialect(Dialect::Teradata)).unwrap(),
        "SELECT TOP 10 ORDERS.ID FROM SALES.ORDERS"
    );
}

#[test]
fn test_offset_without_offset_support_is_rejected() {
    let select = Select::from(orders()).limit(10).offset(5);
    for d in [Dialect::Db2, Dialect::SqlServer, Dialect::Sybase, Dialect::Teradata] {
        let err = select.to_sql_with_dialect(&dialect(d)).unwrap_err();
        assert!(matches!(err, PushdownError::InvalidAst { node: "limit", .. }), "{}", d);
    }
}

#[test]
fn test_rownum_limit_without_offset() {
    let select = Select::from(orders()).limit(5);
    assert_eq!(
        select.to_sql_with_dialect(&dialect(Dialect::Oracle)).unwrap(),
        "SELECT LIMIT_SUBSELECT.* FROM (SELECT * FROM SALES.ORDERS) LIMIT_SUBSELECT WHERE ROWNUM <= 5"
    );
}

#[test]
fn test_rownum_offset_expands_star_in_ordinal_order() {
    let t = orders();
    let id = t.col(0).unwrap();
    let select = Select::from(t).order_by([asc(id, true)]).limit(10).offset(20);
    assert_eq!(
        select.to_sql_with_dialect(&dialect(Dialect::Oracle)).unwrap(),
        "SELECT c0, c1, c2, c3 FROM (SELECT LIMIT_SUBSELECT.*, ROWNUM ROWNUM_SUB FROM \
         (SELECT ORDERS.ID AS c0, ORDERS.AMOUNT AS c1, ORDERS.NOTE AS c2, ORDERS.CREATED AS c3 \
         FROM SALES.ORDERS ORDER BY ORDERS.ID ASC NULLS LAST) LIMIT_SUBSELECT WHERE ROWNUM <= 30) \
         WHERE ROWNUM_SUB > 20"
    );
}

#[test]
fn test_rownum_offset_aliases_expressions() {
    let t = orders();
    let id = t.col(0).unwrap();
    let select = Select::from(t)
        .columns([count_star()])
        .group_by([id])
        .limit(1)
        .offset(1);
    assert_eq!(
        select.to_sql_with_dialect(&dialect(Dialect::Oracle)).unwrap(),
        "SELECT c0 FROM (SELECT LIMIT_SUBSELECT.*, ROWNUM ROWNUM_SUB FROM \
         (SELECT COUNT(*) AS c0 FROM SALES.ORDERS GROUP BY ORDERS.ID) LIMIT_SUBSELECT \
         WHERE ROWNUM <= 2) WHERE ROWNUM_SUB > 1"
    );
}

#[test]
fn test_rownum_offset_needs_column_metadata() {
    let select = Select::from(TableRef::new("BARE")).limit(10).offset(5);
    assert!(matches!(
        select.to_sql_with_dialect(&dialect(Dialect::Oracle)),
        Err(PushdownError::InvalidAst { node: "select list", .. })
    ));
}

#[test]
fn test_offset_without_limit_is_rejected() {
    let select = Select::from(orders()).offset(5);
    for d in [Dialect::MySql, Dialect::Oracle, Dialect::Native] {
        assert!(matches!(
            select.to_sql_with_dialect(&dialect(d)),
            Err(PushdownError::InvalidAst { node: "limit", .. })
        ));
    }
    // Either order of the two calls gives the same statement.
    let select = Select::from(orders()).offset(5).limit(2);
    assert_eq!(
        select.to_sql_with_dialect(&dialect(Dialect::MySql)).unwrap(),
        "SELECT * FROM SHOP.ORDERS LIMIT 2 OFFSET 5"
    );
}
