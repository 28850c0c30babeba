//! SQLite dialect.
//!
//! SQLite stores date-times, periods and points as text in their canonical
//! layouts, so every missing construct is served by the text emulations:
//!
//! - no `EXTRACT`: date parts are sliced out of `YYYY-MM-DD HH:MM:SS`;
//! - no interval type: periods are compared field by field;
//! - no geometry: points are parsed out of their WKT text;
//! - no `ILIKE` and no standard deviation aggregate.
//!
//! Booleans are the integers 1 and 0.

use querykit_expr::dialect::{Dialect, DEFAULT_ALIAS_PREFIX};
use querykit_expr::fallback::Capability;
use querykit_expr::ops::ScalarFunction;
use querykit_expr::value::Value;

/// The SQLite dialect.
#[derive(Debug, Clone)]
pub struct SqliteDialect {
    alias_prefix: String,
}

impl Default for SqliteDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl SqliteDialect {
    pub fn new() -> Self {
        Self {
            alias_prefix: DEFAULT_ALIAS_PREFIX.to_string(),
        }
    }

    pub fn with_alias_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.alias_prefix = prefix.into();
        self
    }
}

impl Dialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::DateTimeFormatting | Capability::GroupsFrames => true,
            Capability::DatePartExtraction
            | Capability::NativeDuration
            | Capability::NativeSpatial
            | Capability::CaseInsensitiveLike
            | Capability::StandardDeviation => false,
        }
    }

    fn true_literal(&self) -> &'static str {
        "1"
    }

    fn false_literal(&self) -> &'static str {
        "0"
    }

    fn format_literal(&self, value: &Value) -> String {
        match value {
            Value::Date(_) | Value::DateTime(_) | Value::DateTimeTz(_) => {
                self.quote_string(&value.canonical_text().unwrap_or_default())
            }
            Value::Time(t) => self.quote_string(&t.format("%H:%M:%S").to_string()),
            Value::Bool(b) => if *b { self.true_literal() } else { self.false_literal() }.to_string(),
            Value::Null => self.null_literal().to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) if f.is_finite() => format!("{f:?}"),
            Value::Float(_) => self.null_literal().to_string(),
            Value::String(s) => self.quote_string(s),
            Value::Bytes(bytes) => {
                let hex: String = bytes.iter().map(|b| format!("{b:02X}")).collect();
                format!("X'{hex}'")
            }
            Value::Period(p) => self.quote_string(&p.to_canonical()),
            Value::Point(p) => self.quote_string(&p.to_wkt()),
            Value::Uuid(u) => self.quote_string(&u.to_string()),
            Value::Json(j) => self.quote_string(&j.to_string()),
        }
    }

    fn cast_to_real(&self, operand: &str) -> String {
        format!("CAST({operand} AS REAL)")
    }

    fn alias_prefix(&self) -> &str {
        &self.alias_prefix
    }

    fn scalar_function(&self, func: ScalarFunction) -> &'static str {
        match func {
            // The multi-argument forms of MAX and MIN are scalar.
            ScalarFunction::Greatest => "MAX",
            ScalarFunction::Least => "MIN",
            other => other.sql_name(),
        }
    }

    fn format_datetime(&self, operand: &str) -> String {
        format!("strftime('%Y-%m-%d %H:%M:%S', {operand})")
    }

    fn like_ignore_case(&self, operand: &str, pattern: &str) -> String {
        format!("(LOWER({operand}) LIKE LOWER({pattern}))")
    }
}
