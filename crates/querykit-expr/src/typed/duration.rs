//! Duration expressions.
//!
//! Without a native interval type a duration is stored as the canonical
//! text of a [`Period`](crate::period::Period), `P1Y2M3D4h5n6s`. Each field
//! sits between two markers, so the emulations locate the markers with
//! `INSTR` and slice the digits in between.

use super::Expr;
use crate::fallback::Capability;
use crate::kind::{Duration, Family, Integer};
use crate::node::Node;
use crate::ops::{ArithmeticOp, CastTarget, CompareOp, LogicalOp, NativeOp, ScalarFunction};
use crate::period::PeriodField;

fn canonical_text(node: &Node) -> Node {
    Node::cast(CastTarget::Text, node.clone())
}

fn marker_position(text: &Node, marker: &str) -> Node {
    Node::func(
        ScalarFunction::Position,
        vec![text.clone(), Node::literal(marker)],
    )
}

fn integer(op: ArithmeticOp, left: Node, right: Node) -> Node {
    Node::arithmetic(Family::Integer, op, left, right)
}

/// `CAST(SUBSTR(t, INSTR(t, open) + 1, INSTR(t, close) - INSTR(t, open) - 1) AS INTEGER)`.
fn emulated_field(node: &Node, field: PeriodField) -> Node {
    let text = canonical_text(node);
    let open = marker_position(&text, field.opening_marker());
    let close = marker_position(&text, field.closing_marker());
    let start = integer(ArithmeticOp::Add, open.clone(), Node::literal(1_i64));
    let length = integer(
        ArithmeticOp::Subtract,
        integer(ArithmeticOp::Subtract, close, open),
        Node::literal(1_i64),
    );
    Node::cast(
        CastTarget::Integer,
        Node::func(ScalarFunction::Substr, vec![text, start, length]),
    )
}

fn field(node: &Node, field: PeriodField) -> Node {
    Node::fallback(
        Capability::NativeDuration,
        Node::native(NativeOp::PeriodField(field), vec![node.clone()]),
        emulated_field(node, field),
    )
}

fn field_compare(op: CompareOp, left: &Node, right: &Node, field: PeriodField) -> Node {
    Node::compare(
        Family::Integer,
        op,
        emulated_field(left, field),
        emulated_field(right, field),
    )
}

/// `left < right` comparing fields from the most significant down.
fn lexicographic_less(left: &Node, right: &Node) -> Node {
    let mut fields = PeriodField::ALL.iter().rev();
    let Some(&last) = fields.next() else {
        return Node::literal(false);
    };
    fields.fold(field_compare(CompareOp::Lt, left, right, last), |rest, &f| {
        Node::or(
            field_compare(CompareOp::Lt, left, right, f),
            Node::and(field_compare(CompareOp::Eq, left, right, f), rest),
        )
    })
}

fn text_compare(op: CompareOp, left: &Node, right: &Node) -> Node {
    Node::compare(
        Family::Text,
        op,
        canonical_text(left),
        canonical_text(right),
    )
}

/// Builds a comparison of two durations.
///
/// The emulation compares field by field without normalizing, so
/// `P0Y12M...` and `P1Y0M...` are different and ordered by their year
/// field.
pub(crate) fn period_comparison(op: CompareOp, left: Node, right: Node) -> Node {
    let emulated = match op {
        CompareOp::Eq | CompareOp::NotEq | CompareOp::Like => text_compare(op, &left, &right),
        CompareOp::Lt => lexicographic_less(&left, &right),
        CompareOp::Gt => lexicographic_less(&right, &left),
        CompareOp::Le => Node::logical(
            LogicalOp::Or,
            vec![
                lexicographic_less(&left, &right),
                text_compare(CompareOp::Eq, &left, &right),
            ],
        ),
        CompareOp::Ge => Node::logical(
            LogicalOp::Or,
            vec![
                lexicographic_less(&right, &left),
                text_compare(CompareOp::Eq, &left, &right),
            ],
        ),
    };
    let native = Node::native(NativeOp::PeriodCompare(op), vec![left, right]);
    Node::fallback(Capability::NativeDuration, native, emulated)
}

impl Expr<Duration> {
    fn part(&self, f: PeriodField) -> Expr<Integer> {
        Expr::from_node(field(&self.node, f))
    }

    pub fn years(&self) -> Expr<Integer> {
        self.part(PeriodField::Years)
    }

    pub fn months(&self) -> Expr<Integer> {
        self.part(PeriodField::Months)
    }

    pub fn days(&self) -> Expr<Integer> {
        self.part(PeriodField::Days)
    }

    pub fn hours(&self) -> Expr<Integer> {
        self.part(PeriodField::Hours)
    }

    pub fn minutes(&self) -> Expr<Integer> {
        self.part(PeriodField::Minutes)
    }

    pub fn seconds(&self) -> Expr<Integer> {
        self.part(PeriodField::Seconds)
    }
}
