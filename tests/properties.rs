//! Property tests for quoting, literals and pagination bounds.

use proptest::prelude::*;
use pushdown::prelude::*;
use pushdown::transpiler::rewrite::scaled;

fn dialects() -> Vec<SqlDialect> {
    Dialect::ALL
        .into_iter()
        .filter(|d| *d != Dialect::Generic)
        .map(|d| SqlDialect::of(d).unwrap())
        .collect()
}

fn table() -> TableRef {
    TableRef::new("T")
        .column(ColumnMetadata::new("A", CanonicalType::decimal(10, 0), "INTEGER"))
        .column(ColumnMetadata::new("B", CanonicalType::varchar(50, Charset::Utf8), "VARCHAR"))
}

/// The numeric bound written right after `marker` in `sql`.
fn bound_after(sql: &str, marker: &str) -> u64 {
    let start = sql.find(marker).unwrap() + marker.len();
    let digits = sql[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect::<String>();
    digits.parse().unwrap()
}

/// Rows `0..rows` that survive the two ROWNUM filters of `sql`. The inner
/// query numbers rows from 1 in order and stops at the upper bound; the
/// outer query drops numbers up to the lower bound.
fn run_rownum_window(sql: &str, rows: u64) -> Vec<u64> {
    let upper = bound_after(sql, "WHERE ROWNUM <= ");
    let lower = bound_after(sql, "WHERE ROWNUM_SUB > ");
    (0..rows)
        .map(|row| (row, row + 1))
        .take_while(|&(_, rownum)| rownum <= upper)
        .filter(|&(_, rownum)| rownum > lower)
        .map(|(row, _)| row)
        .collect()
}

proptest! {
    #[test]
    fn quoting_round_trips(identifier in "\\PC{1,24}") {
        for dialect in dialects() {
            let descriptor = dialect.descriptor();
            let quoted = descriptor.quote(&identifier);
            prop_assert_eq!(
                descriptor.quote_style.unquote(&quoted),
                Some(identifier.clone()),
                "{}", dialect.dialect()
            );

            let maybe = descriptor.quote_if_needed(&identifier);
            let recovered = descriptor.quote_style.unquote(&maybe).unwrap_or(maybe);
            prop_assert_eq!(&recovered, &identifier);
        }
    }

    #[test]
    fn string_literals_are_escaped(value in "\\PC{0,32}") {
        let t = table();
        let b = t.col(1).unwrap();
        let select = Select::from(t).any_column().filter(eq(b, text(&value)));
        let expected = format!("'{}'", value.replace('\'', "''"));
        for dialect in dialects() {
            let sql = generate(&select, &dialect).unwrap();
            prop_assert!(sql.ends_with(&expected), "{}: {}", dialect.dialect(), sql);
        }
    }

    #[test]
    fn rownum_window_matches_count_and_offset(
        rows in 0u64..300,
        count in 0u64..300,
        offset in 0u64..300,
    ) {
        let oracle = SqlDialect::of(Dialect::Oracle).unwrap();
        let select = Select::from(table()).limit(count).offset(offset);
        let sql = generate(&select, &oracle).unwrap();
        prop_assert!(sql.starts_with("SELECT c0, c1 FROM "));

        let kept = run_rownum_window(&sql, rows);
        let expected = (offset..(offset + count).min(rows)).collect::<Vec<_>>();
        prop_assert_eq!(kept.len() as u64, count.min(rows.saturating_sub(offset)));
        prop_assert_eq!(kept, expected);
    }

    #[test]
    fn trailing_and_top_limits(count in 0u64..u64::MAX, offset in 0u64..u64::MAX) {
        let select = Select::from(table()).limit(count);
        let native = SqlDialect::of(Dialect::Native).unwrap();
        let sqlserver = SqlDialect::of(Dialect::SqlServer).unwrap();
        prop_assert_eq!(
            generate(&select, &native).unwrap(),
            format!("SELECT * FROM T LIMIT {}", count)
        );
        prop_assert_eq!(
            generate(&select, &sqlserver).unwrap(),
            format!("SELECT TOP {} * FROM T", count)
        );
        let with_offset = select.offset(offset);
        prop_assert!(generate(&with_offset, &sqlserver).is_err());
        let expected_tail = format!("LIMIT {} OFFSET {}", count, offset);
        prop_assert!(
            generate(&with_offset, &native)
                .unwrap()
                .ends_with(&expected_tail)
        );
    }

    #[test]
    fn scaled_literals_fold(n in -1_000_000i64..1_000_000) {
        prop_assert_eq!(scaled(12, &n.to_string()), (12 * n).to_string());
    }
}
