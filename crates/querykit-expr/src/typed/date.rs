//! Date-time expressions.
//!
//! Field extraction uses `EXTRACT` where available. Otherwise the value is
//! cast to its canonical `YYYY-MM-DD HH:MM:SS` text and the field is sliced
//! out by position.

use super::Expr;
use crate::fallback::Capability;
use crate::kind::{DateTime, Integer, Text};
use crate::node::Node;
use crate::ops::{CastTarget, DatePart, NativeOp, ScalarFunction};

/// Length of the canonical text, `YYYY-MM-DD HH:MM:SS`.
const CANONICAL_LENGTH: i64 = 19;

impl Expr<DateTime> {
    fn canonical_slice(&self, start: i64, length: i64) -> Node {
        Node::func(
            ScalarFunction::Substr,
            vec![
                Node::cast(CastTarget::Text, self.node.clone()),
                Node::literal(start),
                Node::literal(length),
            ],
        )
    }

    fn part(&self, part: DatePart) -> Expr<Integer> {
        let native = Node::native(NativeOp::DatePart(part), vec![self.node.clone()]);
        let (start, length) = part.canonical_slice();
        let emulated = Node::cast(CastTarget::Integer, self.canonical_slice(start, length));
        Expr::from_node(Node::fallback(
            Capability::DatePartExtraction,
            native,
            emulated,
        ))
    }

    pub fn year(&self) -> Expr<Integer> {
        self.part(DatePart::Year)
    }

    pub fn month(&self) -> Expr<Integer> {
        self.part(DatePart::Month)
    }

    pub fn day(&self) -> Expr<Integer> {
        self.part(DatePart::Day)
    }

    pub fn hour(&self) -> Expr<Integer> {
        self.part(DatePart::Hour)
    }

    pub fn minute(&self) -> Expr<Integer> {
        self.part(DatePart::Minute)
    }

    pub fn second(&self) -> Expr<Integer> {
        self.part(DatePart::Second)
    }

    /// The value as `YYYY-MM-DD HH:MM:SS` text.
    pub fn to_text(&self) -> Expr<Text> {
        let native = Node::native(NativeOp::FormatDateTime, vec![self.node.clone()]);
        let emulated = self.canonical_slice(1, CANONICAL_LENGTH);
        Expr::from_node(Node::fallback(
            Capability::DateTimeFormatting,
            native,
            emulated,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::StandardDialect;
    use crate::node::SqlExpression;
    use crate::relation::RelationRef;

    fn std_dialect() -> StandardDialect {
        StandardDialect::new()
    }

    fn emulating() -> StandardDialect {
        StandardDialect::new().emulating_everything()
    }

    fn created() -> Expr<DateTime> {
        Expr::column(&RelationRef::new("t"), "created")
    }

    #[test]
    fn test_native_extraction() {
        let d = std_dialect();
        assert_eq!(created().year().to_sql(&d), "EXTRACT(YEAR FROM \"t\".\"created\")");
        assert_eq!(created().second().to_sql(&d), "EXTRACT(SECOND FROM \"t\".\"created\")");
    }

    #[test]
    fn test_emulated_extraction_slices_canonical_text() {
        let d = emulating();
        assert_eq!(
            created().month().to_sql(&d),
            "CAST(SUBSTRING(CAST(\"t\".\"created\" AS VARCHAR(4000)) FROM 6 FOR 2) AS INTEGER)"
        );
        assert_eq!(
            created().minute().to_sql(&d),
            "CAST(SUBSTRING(CAST(\"t\".\"created\" AS VARCHAR(4000)) FROM 15 FOR 2) AS INTEGER)"
        );
    }

    #[test]
    fn test_to_text_fallback() {
        let native = std_dialect().with_capability(Capability::DateTimeFormatting, true);
        assert_eq!(
            created().to_text().to_sql(&native),
            "TO_CHAR(\"t\".\"created\", 'YYYY-MM-DD HH24:MI:SS')"
        );
        assert_eq!(
            created().to_text().to_sql(&std_dialect()),
            "SUBSTRING(CAST(\"t\".\"created\" AS VARCHAR(4000)) FROM 1 FOR 19)"
        );
    }

    #[test]
    fn test_null_datetime_part_is_null() {
        let e = Expr::<DateTime>::null().day();
        assert!(e.requires_null_guard());
        assert_eq!(e.to_sql(&std_dialect()), "NULL");
        assert_eq!(e.to_sql(&emulating()), "NULL");
    }

    #[test]
    fn test_datetime_literal_comparison() {
        let at = chrono::NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        assert_eq!(
            created().is_less_than(at).to_sql(&std_dialect()),
            "(\"t\".\"created\" < TIMESTAMP '2024-01-02 03:04:05')"
        );
    }
}
