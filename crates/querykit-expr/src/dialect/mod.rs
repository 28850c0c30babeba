//! The dialect adapter contract.
//!
//! A [`Dialect`] supplies every spelling the renderer needs: identifier
//! quoting, literal formatting, function names, one transform per
//! non-portable operator, capability predicates and the alias formatter used
//! by the mode compiler. Transforms receive already rendered operand text.
//!
//! Default method bodies follow ANSI SQL and the common PostgreSQL/SQLite
//! spellings; concrete dialects override what differs.

mod standard;

pub use standard::StandardDialect;

use std::fmt;

use crate::aggregate::AggregateFunc;
use crate::fallback::Capability;
use crate::kind::Family;
use crate::ops::{ArithmeticOp, CompareOp, DatePart, ScalarFunction};
use crate::period::{Period, PeriodField};
use crate::point::Point;
use crate::value::Value;

/// The default prefix of synthetic table aliases.
pub const DEFAULT_ALIAS_PREFIX: &str = "qk";

/// A database dialect.
pub trait Dialect: fmt::Debug + Send + Sync {
    /// The dialect name (e.g. "postgresql").
    fn name(&self) -> &'static str;

    /// Returns `true` if the native rendering of `capability` can be used.
    fn supports(&self, capability: Capability) -> bool;

    // ── Identifiers and literals ─────────────────────────────────────

    fn quote_identifier(&self, ident: &str) -> String {
        format!("\"{}\"", ident.replace('"', "\"\""))
    }

    fn quote_string(&self, s: &str) -> String {
        format!("'{}'", s.replace('\'', "''"))
    }

    fn null_literal(&self) -> &'static str {
        "NULL"
    }

    fn true_literal(&self) -> &'static str {
        "TRUE"
    }

    fn false_literal(&self) -> &'static str {
        "FALSE"
    }

    /// Formats a literal value.
    ///
    /// Periods and points come out as their canonical text here; their
    /// native literals go through [`duration_literal`](Self::duration_literal)
    /// and [`point_literal`](Self::point_literal).
    fn format_literal(&self, value: &Value) -> String {
        match value {
            Value::Null => self.null_literal().to_string(),
            Value::Bool(true) => self.true_literal().to_string(),
            Value::Bool(false) => self.false_literal().to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) if f.is_finite() => format!("{f:?}"),
            Value::Float(_) => self.null_literal().to_string(),
            Value::String(s) => self.quote_string(s),
            Value::Bytes(bytes) => {
                let hex: String = bytes.iter().map(|b| format!("{b:02X}")).collect();
                format!("X'{hex}'")
            }
            Value::Date(_) | Value::DateTime(_) | Value::DateTimeTz(_) => format!(
                "TIMESTAMP {}",
                self.quote_string(&value.canonical_text().unwrap_or_default())
            ),
            Value::Time(t) => format!("TIME {}", self.quote_string(&t.format("%H:%M:%S").to_string())),
            Value::Period(p) => self.quote_string(&p.to_canonical()),
            Value::Point(p) => self.quote_string(&p.to_wkt()),
            Value::Uuid(u) => self.quote_string(&u.to_string()),
            Value::Json(j) => self.quote_string(&j.to_string()),
        }
    }

    fn null_check(&self, operand: &str) -> String {
        format!("({operand} IS NULL)")
    }

    fn not_null_check(&self, operand: &str) -> String {
        format!("({operand} IS NOT NULL)")
    }

    fn cast_to_text(&self, operand: &str) -> String {
        format!("CAST({operand} AS TEXT)")
    }

    fn cast_to_integer(&self, operand: &str) -> String {
        format!("CAST({operand} AS INTEGER)")
    }

    fn cast_to_real(&self, operand: &str) -> String {
        format!("CAST({operand} AS DOUBLE PRECISION)")
    }

    fn concat(&self, parts: &[String]) -> String {
        format!("({})", parts.join(" || "))
    }

    fn limit_clause(&self, limit: u64, offset: Option<u64>) -> String {
        match offset {
            Some(offset) => format!("LIMIT {limit} OFFSET {offset}"),
            None => format!("LIMIT {limit}"),
        }
    }

    fn sort_key(&self, operand: &str, descending: bool) -> String {
        format!("{operand} {}", if descending { "DESC" } else { "ASC" })
    }

    // ── Synthetic aliases ────────────────────────────────────────────

    fn alias_prefix(&self) -> &str {
        DEFAULT_ALIAS_PREFIX
    }

    fn max_identifier_length(&self) -> usize {
        63
    }

    /// Turns an alias seed into a legal identifier. Pure: the same seed
    /// always yields the same alias.
    fn derived_table_alias(&self, seed: &str) -> String {
        let mut alias: String = format!("{}_{seed}", self.alias_prefix())
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
            .collect();
        alias.truncate(self.max_identifier_length());
        alias
    }

    // ── Function names ───────────────────────────────────────────────

    fn count_function(&self) -> &'static str {
        "COUNT"
    }

    fn aggregate_function(&self, func: AggregateFunc) -> &'static str {
        match func {
            AggregateFunc::Count => self.count_function(),
            other => other.sql_name(),
        }
    }

    fn rank_function(&self) -> &'static str {
        "RANK"
    }

    fn dense_rank_function(&self) -> &'static str {
        "DENSE_RANK"
    }

    fn row_number_function(&self) -> &'static str {
        "ROW_NUMBER"
    }

    fn ntile_function(&self) -> &'static str {
        "NTILE"
    }

    fn percent_rank_function(&self) -> &'static str {
        "PERCENT_RANK"
    }

    fn cume_dist_function(&self) -> &'static str {
        "CUME_DIST"
    }

    fn lag_function(&self) -> &'static str {
        "LAG"
    }

    fn lead_function(&self) -> &'static str {
        "LEAD"
    }

    fn first_value_function(&self) -> &'static str {
        "FIRST_VALUE"
    }

    fn last_value_function(&self) -> &'static str {
        "LAST_VALUE"
    }

    fn nth_value_function(&self) -> &'static str {
        "NTH_VALUE"
    }

    fn scalar_function(&self, func: ScalarFunction) -> &'static str {
        func.sql_name()
    }

    /// Lays out a scalar function call.
    fn scalar_call(&self, func: ScalarFunction, args: &[String]) -> String {
        format!("{}({})", self.scalar_function(func), args.join(", "))
    }

    // ── Operator transforms ──────────────────────────────────────────

    fn comparison(&self, _family: Family, op: CompareOp, left: &str, right: &str) -> String {
        format!("({left} {} {right})", op.sql_operator())
    }

    fn arithmetic(&self, _family: Family, op: ArithmeticOp, left: &str, right: &str) -> String {
        format!("({left} {} {right})", op.sql_operator())
    }

    fn text_like(&self, operand: &str, pattern: &str) -> String {
        format!("({operand} LIKE {pattern})")
    }

    fn like_ignore_case(&self, operand: &str, pattern: &str) -> String {
        format!("({operand} ILIKE {pattern})")
    }

    fn date_part(&self, part: DatePart, operand: &str) -> String {
        format!("EXTRACT({} FROM {operand})", part.sql_unit())
    }

    /// Formats a date-time as `YYYY-MM-DD HH:MM:SS` text.
    fn format_datetime(&self, operand: &str) -> String {
        format!("TO_CHAR({operand}, 'YYYY-MM-DD HH24:MI:SS')")
    }

    fn duration_part(&self, field: PeriodField, operand: &str) -> String {
        format!("EXTRACT({} FROM {operand})", field.sql_unit())
    }

    fn duration_comparison(&self, op: CompareOp, left: &str, right: &str) -> String {
        self.comparison(Family::Duration, op, left, right)
    }

    fn duration_literal(&self, period: &Period) -> String {
        format!(
            "INTERVAL '{} years {} months {} days {} hours {} minutes {} seconds'",
            period.years, period.months, period.days, period.hours, period.minutes, period.seconds
        )
    }

    fn point_literal(&self, point: &Point) -> String {
        format!("ST_GeomFromText({})", self.quote_string(&point.to_wkt()))
    }

    fn point_x(&self, operand: &str) -> String {
        format!("ST_X({operand})")
    }

    fn point_y(&self, operand: &str) -> String {
        format!("ST_Y({operand})")
    }

    fn point_equals(&self, left: &str, right: &str) -> String {
        format!("ST_Equals({left}, {right})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Bare;

    impl Dialect for Bare {
        fn name(&self) -> &'static str {
            "bare"
        }

        fn supports(&self, _capability: Capability) -> bool {
            false
        }
    }

    #[test]
    fn test_quoting() {
        assert_eq!(Bare.quote_identifier("a\"b"), "\"a\"\"b\"");
        assert_eq!(Bare.quote_string("it's"), "'it''s'");
    }

    #[test]
    fn test_format_literal_defaults() {
        assert_eq!(Bare.format_literal(&Value::Float(2.0)), "2.0");
        assert_eq!(Bare.format_literal(&Value::Float(f64::NAN)), "NULL");
        assert_eq!(Bare.format_literal(&Value::Bytes(vec![0xAB, 0x01])), "X'AB01'");
        assert_eq!(Bare.format_literal(&Value::Bool(false)), "FALSE");
        let dt = chrono::NaiveDate::from_ymd_opt(2020, 2, 29)
            .unwrap()
            .and_hms_opt(23, 59, 1)
            .unwrap();
        assert_eq!(
            Bare.format_literal(&Value::DateTime(dt)),
            "TIMESTAMP '2020-02-29 23:59:01'"
        );
    }

    #[test]
    fn test_derived_table_alias_sanitizes_and_truncates() {
        assert_eq!(Bare.derived_table_alias("Mode1-a0"), "qk_mode1_a0");
        let long = "x".repeat(100);
        assert_eq!(Bare.derived_table_alias(&long).len(), 63);
    }

    #[test]
    fn test_limit_clause() {
        assert_eq!(Bare.limit_clause(1, None), "LIMIT 1");
        assert_eq!(Bare.limit_clause(1, Some(1)), "LIMIT 1 OFFSET 1");
    }

    #[test]
    fn test_aggregate_function_uses_count_provider() {
        assert_eq!(Bare.aggregate_function(AggregateFunc::Count), "COUNT");
        assert_eq!(Bare.aggregate_function(AggregateFunc::Avg), "AVG");
    }
}
