//! MySQL dialect.

use querykit_expr::dialect::{Dialect, DEFAULT_ALIAS_PREFIX};
use querykit_expr::fallback::Capability;
use querykit_expr::kind::Family;
use querykit_expr::ops::{ArithmeticOp, ScalarFunction};

/// The MySQL dialect (8.0 or later).
#[derive(Debug, Clone)]
pub struct MySqlDialect {
    alias_prefix: String,
}

impl Default for MySqlDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl MySqlDialect {
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

impl Dialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::DatePartExtraction
            | Capability::DateTimeFormatting
            | Capability::NativeSpatial
            | Capability::StandardDeviation => true,
            Capability::NativeDuration
            | Capability::GroupsFrames
            | Capability::CaseInsensitiveLike => false,
        }
    }

    fn quote_identifier(&self, ident: &str) -> String {
        format!("`{}`", ident.replace('`', "``"))
    }

    fn quote_string(&self, s: &str) -> String {
        format!("'{}'", s.replace('\\', "\\\\").replace('\'', "''"))
    }

    fn cast_to_text(&self, operand: &str) -> String {
        format!("CAST({operand} AS CHAR)")
    }

    fn cast_to_integer(&self, operand: &str) -> String {
        format!("CAST({operand} AS SIGNED)")
    }

    fn cast_to_real(&self, operand: &str) -> String {
        format!("CAST({operand} AS DOUBLE)")
    }

    fn concat(&self, parts: &[String]) -> String {
        format!("CONCAT({})", parts.join(", "))
    }

    fn alias_prefix(&self) -> &str {
        &self.alias_prefix
    }

    fn max_identifier_length(&self) -> usize {
        64
    }

    fn scalar_function(&self, func: ScalarFunction) -> &'static str {
        match func {
            ScalarFunction::Length => "CHAR_LENGTH",
            other => other.sql_name(),
        }
    }

    // `/` on integers yields a decimal in MySQL.
    fn arithmetic(&self, family: Family, op: ArithmeticOp, left: &str, right: &str) -> String {
        match (family, op) {
            (Family::Integer, ArithmeticOp::Divide) => format!("({left} DIV {right})"),
            _ => format!("({left} {} {right})", op.sql_operator()),
        }
    }

    fn format_datetime(&self, operand: &str) -> String {
        format!("DATE_FORMAT({operand}, '%Y-%m-%d %H:%i:%s')")
    }

    fn like_ignore_case(&self, operand: &str, pattern: &str) -> String {
        format!("(LOWER({operand}) LIKE LOWER({pattern}))")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use querykit_expr::kind::{Duration, Integer, Text};
    use querykit_expr::relation::RelationRef;
    use querykit_expr::{Expr, SqlExpression};

    fn mysql() -> MySqlDialect {
        MySqlDialect::new()
    }

    fn marque() -> RelationRef {
        RelationRef::new("marque")
    }

    #[test]
    fn test_backtick_quoting() {
        let uid = Expr::<Integer>::column(&marque(), "uid");
        assert_eq!(uid.to_sql(&mysql()), "`marque`.`uid`");
        assert_eq!(mysql().quote_identifier("a`b"), "`a``b`");
    }

    #[test]
    fn test_string_escaping() {
        assert_eq!(mysql().quote_string("it's a\\b"), "'it''s a\\\\b'");
    }

    #[test]
    fn test_concat_and_length() {
        let label = Expr::<Text>::column(&marque(), "label");
        assert_eq!(
            label.append("x").length().to_sql(&mysql()),
            "CHAR_LENGTH(CONCAT(`marque`.`label`, 'x'))"
        );
    }

    #[test]
    fn test_integer_division() {
        let uid = Expr::<Integer>::column(&marque(), "uid");
        assert_eq!(uid.divided_by(2).to_sql(&mysql()), "(`marque`.`uid` DIV 2)");
    }

    #[test]
    fn test_duration_is_emulated() {
        let age = Expr::<Duration>::column(&marque(), "age");
        let days = age.days().to_sql(&mysql());
        assert!(days.starts_with("CAST(SUBSTR(CAST(`marque`.`age` AS CHAR)"));
        assert!(days.ends_with("AS SIGNED)"));
    }

    #[test]
    fn test_groups_frames_unsupported() {
        assert!(!mysql().supports(Capability::GroupsFrames));
        assert_eq!(mysql().max_identifier_length(), 64);
        assert_eq!(mysql().derived_table_alias("Mode1_A0"), "qk_mode1_a0");
    }
}
