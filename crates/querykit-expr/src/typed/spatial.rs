//! Two-dimensional point expressions.
//!
//! Without a geometry type a point is stored as WKT text, `POINT (x y)`.

use super::Expr;
use crate::fallback::Capability;
use crate::kind::{Family, Number, Point2D};
use crate::node::Node;
use crate::ops::{ArithmeticOp, CastTarget, CompareOp, NativeOp, ScalarFunction};
use crate::point::WKT_COORDINATES_START;

fn wkt(node: &Node) -> Node {
    Node::cast(CastTarget::Text, node.clone())
}

/// `x y)`: the text after `POINT (`.
fn coordinates(node: &Node) -> Node {
    Node::func(
        ScalarFunction::Substr,
        vec![wkt(node), Node::literal(WKT_COORDINATES_START)],
    )
}

fn separator(coordinates: &Node) -> Node {
    Node::func(
        ScalarFunction::Position,
        vec![coordinates.clone(), Node::literal(" ")],
    )
}

fn emulated_x(node: &Node) -> Node {
    let rest = coordinates(node);
    let length = Node::arithmetic(
        Family::Integer,
        ArithmeticOp::Subtract,
        separator(&rest),
        Node::literal(1_i64),
    );
    Node::cast(
        CastTarget::Real,
        Node::func(
            ScalarFunction::Substr,
            vec![rest, Node::literal(1_i64), length],
        ),
    )
}

fn emulated_y(node: &Node) -> Node {
    let rest = coordinates(node);
    let start = Node::arithmetic(
        Family::Integer,
        ArithmeticOp::Add,
        separator(&rest),
        Node::literal(1_i64),
    );
    let tail = Node::func(ScalarFunction::Substr, vec![rest, start]);
    Node::cast(
        CastTarget::Real,
        Node::func(
            ScalarFunction::Replace,
            vec![tail, Node::literal(")"), Node::literal("")],
        ),
    )
}

fn equals(left: Node, right: Node) -> Node {
    let emulated = Node::compare(Family::Text, CompareOp::Eq, wkt(&left), wkt(&right));
    let native = Node::native(NativeOp::PointEquals, vec![left, right]);
    Node::fallback(Capability::NativeSpatial, native, emulated)
}

/// Builds a comparison of two points. Only equality is meaningful.
pub(crate) fn point_comparison(op: CompareOp, left: Node, right: Node) -> Node {
    match op {
        CompareOp::Eq => equals(left, right),
        CompareOp::NotEq => Node::not(equals(left, right)),
        other => Node::compare(Family::Point2D, other, left, right),
    }
}

impl Expr<Point2D> {
    pub fn x(&self) -> Expr<Number> {
        Expr::from_node(Node::fallback(
            Capability::NativeSpatial,
            Node::native(NativeOp::PointX, vec![self.node.clone()]),
            emulated_x(&self.node),
        ))
    }

    pub fn y(&self) -> Expr<Number> {
        Expr::from_node(Node::fallback(
            Capability::NativeSpatial,
            Node::native(NativeOp::PointY, vec![self.node.clone()]),
            emulated_y(&self.node),
        ))
    }
}
