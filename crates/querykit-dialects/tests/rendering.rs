//! Rendering of the same expressions across dialects.

use querykit_dialects::{MySqlDialect, PostgresDialect, SqliteDialect};
use querykit_expr::dialect::{Dialect, StandardDialect};
use querykit_expr::kind::{DateTime, Duration, Integer, Number, Text};
use querykit_expr::relation::RelationRef;
use querykit_expr::window::{self, WindowFrameBound, WindowFrameType};
use querykit_expr::{Expr, Period, SqlExpression};

fn all_dialects() -> Vec<Box<dyn Dialect>> {
    vec![
        Box::new(StandardDialect::new()),
        Box::new(PostgresDialect::new()),
        Box::new(SqliteDialect::new()),
        Box::new(MySqlDialect::new()),
    ]
}

fn sales() -> RelationRef {
    RelationRef::new("sales")
}

fn amount() -> Expr<Integer> {
    Expr::column(&sales(), "amount")
}

#[test]
fn test_null_comparison_is_a_null_check_everywhere() {
    let cond = amount().is(Expr::<Integer>::null());
    for d in all_dialects() {
        let sql = cond.to_sql(d.as_ref());
        assert!(sql.ends_with("amount\" IS NULL)") || sql.ends_with("amount` IS NULL)"), "{sql}");
    }
}

#[test]
fn test_value_operator_with_null_is_null_everywhere() {
    let sum = amount().plus(Expr::<Integer>::null()).times(3);
    for d in all_dialects() {
        assert_eq!(sum.to_sql(d.as_ref()), "NULL");
    }
}

#[test]
fn test_groups_frame_downgrade_on_mysql() {
    let framed = window::dense_rank()
        .all_rows()
        .order_by(amount(), [])
        .groups()
        .unbounded_preceding()
        .current_row()
        .to_expression();
    assert!(framed
        .to_sql(&MySqlDialect::new())
        .ends_with("RANGE BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW)"));
    assert!(framed
        .to_sql(&PostgresDialect::new())
        .ends_with("GROUPS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW)"));
}

#[test]
fn test_groups_frame_with_offsets_is_kept_on_mysql() {
    let framed = window::rank()
        .all_rows()
        .order_by(amount(), [])
        .groups()
        .offset_preceding(1)
        .current_row()
        .to_expression();
    assert!(framed
        .to_sql(&MySqlDialect::new())
        .ends_with("GROUPS BETWEEN 1 PRECEDING AND CURRENT ROW)"));
}

#[test]
fn test_frame_exhaustiveness_rows_and_range() {
    use WindowFrameBound::{CurrentRow, Following, Preceding, UnboundedFollowing, UnboundedPreceding};
    let bounds = [UnboundedPreceding, Preceding(2), CurrentRow, Following(2), UnboundedFollowing];
    let d = PostgresDialect::new();
    let region = Expr::<Integer>::column(&sales(), "region");
    for frame_type in [WindowFrameType::Rows, WindowFrameType::Range] {
        for (i, start) in bounds.iter().enumerate() {
            for end in &bounds[i..] {
                let framed = amount()
                    .sum()
                    .over()
                    .partition_by([region.clone()])
                    .order_by(amount(), [])
                    .between(frame_type, *start, *end);
                let legal = *start != UnboundedFollowing && *end != UnboundedPreceding;
                assert_eq!(framed.is_ok(), legal, "{start:?} .. {end:?}");
                if let Ok(framed) = framed {
                    assert_eq!(
                        framed.to_expression().to_sql(&d),
                        format!(
                            "SUM(\"sales\".\"amount\") OVER (PARTITION BY \"sales\".\"region\" \
                             ORDER BY \"sales\".\"amount\" ASC {} BETWEEN {} AND {})",
                            frame_type.sql_keyword(),
                            start.to_sql(),
                            end.to_sql()
                        )
                    );
                }
            }
        }
    }
}

#[test]
fn test_mode_strict_on_mysql() {
    let mode = amount().mode_strict().unwrap();
    let sql = mode.to_sql(&MySqlDialect::new());
    assert!(sql.starts_with("(SELECT CASE WHEN `qk_mode"));
    assert!(sql.contains("AS `mode_frequency`"));
    assert!(sql.contains("LIMIT 1 OFFSET 1) AS `qk_mode"));
    assert!(sql.ends_with("ON 1 = 1)"));
}

#[test]
fn test_standard_deviation_native_or_emulated() {
    let dev = amount().standard_deviation();
    assert_eq!(
        dev.to_sql(&PostgresDialect::new()),
        "STDDEV_SAMP(\"sales\".\"amount\")"
    );
    assert!(dev.to_sql(&SqliteDialect::new()).starts_with("SQRT("));
}

#[test]
fn test_duration_fields_per_dialect() {
    let age = Expr::<Duration>::column(&sales(), "age");
    assert_eq!(
        age.days().to_sql(&PostgresDialect::new()),
        "EXTRACT(DAY FROM \"sales\".\"age\")"
    );
    assert!(age
        .days()
        .to_sql(&SqliteDialect::new())
        .contains("INSTR(CAST(\"sales\".\"age\" AS TEXT), 'M')"));
    assert_eq!(
        Expr::<Duration>::value(Period::days(2)).to_sql(&PostgresDialect::new()),
        "INTERVAL '0 years 0 months 2 days 0 hours 0 minutes 0 seconds'"
    );
}

#[test]
fn test_datetime_formatting_per_dialect() {
    let at = Expr::<DateTime>::column(&sales(), "at");
    assert_eq!(
        at.to_text().to_sql(&MySqlDialect::new()),
        "DATE_FORMAT(`sales`.`at`, '%Y-%m-%d %H:%i:%s')"
    );
    assert_eq!(
        at.to_text().to_sql(&PostgresDialect::new()),
        "TO_CHAR(\"sales\".\"at\", 'YYYY-MM-DD HH24:MI:SS')"
    );
}

#[test]
fn test_number_cast_per_dialect() {
    let ratio: Expr<Number> = amount().to_number();
    assert_eq!(
        ratio.to_sql(&SqliteDialect::new()),
        "CAST(\"sales\".\"amount\" AS REAL)"
    );
    assert_eq!(ratio.to_sql(&MySqlDialect::new()), "CAST(`sales`.`amount` AS DOUBLE)");
}

#[test]
fn test_text_position_per_dialect() {
    let label = Expr::<Text>::column(&sales(), "label");
    let starts = label.starts_with("ab");
    assert_eq!(
        starts.to_sql(&SqliteDialect::new()),
        "(INSTR(\"sales\".\"label\", 'ab') = 1)"
    );
    assert_eq!(
        starts.to_sql(&StandardDialect::new()),
        "(POSITION('ab' IN \"sales\".\"label\") = 1)"
    );
}
