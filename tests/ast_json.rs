//! Query trees handed over as JSON by a host planner.

use pretty_assertions::assert_eq;
use pushdown::prelude::*;

const PLAN: &str = r#"{
    "select_list": "Star",
    "from": {
        "schema": "SALES",
        "name": "ORDERS",
        "columns": [
            {
                "name": "ID",
                "data_type": { "type": "DECIMAL", "precision": 10, "scale": 0 },
                "type_name": "INTEGER"
            },
            {
                "name": "NOTE",
                "data_type": { "type": "VARCHAR", "size": 200, "charset": "UTF8" },
                "type_name": "VARCHAR"
            }
        ]
    },
    "where_clause": {
        "Predicate": {
            "Compare": {
                "op": "GREATER",
                "left": {
                    "Column": {
                        "table": "ORDERS",
                        "ordinal": 0,
                        "metadata": {
                            "name": "ID",
                            "data_type": { "type": "DECIMAL", "precision": 10, "scale": 0 },
                            "type_name": "INTEGER"
                        }
                    }
                },
                "right": { "Literal": { "Double": 100.5 } }
            }
        }
    },
    "limit": { "count": 5 }
}"#;

#[test]
fn test_plan_from_json() {
    let select: Select = serde_json::from_str(PLAN).unwrap();
    assert_eq!(select.from.columns.len(), 2);
    assert_eq!(select.limit, Some(Limit {
            count: Some(5),
            offset: None
        }));

    let postgres = SqlDialect::of(Dialect::PostgreSql).unwrap();
    assert_eq!(
        generate(&select, &postgres).unwrap(),
        "SELECT * FROM \"SALES\".\"ORDERS\" WHERE \"ORDERS\".\"ID\" > 100.5 LIMIT 5"
    );
    let oracle = SqlDialect::of(Dialect::Oracle).unwrap();
    assert_eq!(
        generate(&select, &oracle).unwrap(),
        "SELECT LIMIT_SUBSELECT.* FROM (SELECT * FROM SALES.ORDERS WHERE ORDERS.ID > 100.5) \
         LIMIT_SUBSELECT WHERE ROWNUM <= 5"
    );
}

#[test]
fn test_built_plan_survives_json() {
    let t = TableRef::new("ORDERS")
        .schema("SALES")
        .column(ColumnMetadata::new("ID", CanonicalType::decimal(10, 0), "INTEGER"))
        .column(ColumnMetadata::new("NOTE", CanonicalType::varchar(200, Charset::Utf8), "VARCHAR"));
    let id = t.col(0).unwrap();
    let note = t.col(1).unwrap();
    let select = Select::from(t)
        .columns([
            Expr::from(note.clone()),
            group_concat(id.clone(), true, vec![desc(id, true)], Some("|")),
        ])
        .group_by([note])
        .limit(3);

    let json = serde_json::to_string(&select).unwrap();
    assert!(json.contains("\"GROUP_CONCAT\""));
    let back: Select = serde_json::from_str(&json).unwrap();
    assert_eq!(back, select);

    let native = SqlDialect::of(Dialect::Native).unwrap();
    assert_eq!(generate(&back, &native).unwrap(), generate(&select, &native).unwrap());
}

#[test]
fn test_unknown_operator_is_rejected() {
    let bad = PLAN.replace("\"GREATER\"", "\"ROUGHLY\"");
    assert!(serde_json::from_str::<Select>(&bad).is_err());
}
