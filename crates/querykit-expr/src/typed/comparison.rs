//! Equality and range comparison, shared by every comparable kind.

use super::Expr;
use crate::aggregate::{Aggregate, AggregateFunc};
use crate::kind::{Boolean, EqualityComparable, Kind, RangeComparable};
use crate::node::Node;
use crate::ops::{CompareOp, LogicalOp, ScalarFunction};

/// Builds a comparison between two operands of kind `K`.
///
/// When either side is null the plain comparison node is built, so that the
/// null guard turns it into a null check; otherwise the kind decides.
pub(crate) fn compare_nodes<K: Kind>(op: CompareOp, left: Node, right: Node) -> Node {
    if left.is_null_terminal() || right.is_null_terminal() {
        Node::compare(K::FAMILY, op, left, right)
    } else {
        K::comparison(op, left, right)
    }
}

impl<K: EqualityComparable> Expr<K> {
    fn compared(&self, op: CompareOp, other: impl Into<Self>) -> Expr<Boolean> {
        Expr::from_node(compare_nodes::<K>(op, self.node.clone(), other.into().node))
    }

    /// `self = other`; with a null `other`, `self IS NULL`.
    pub fn is(&self, other: impl Into<Self>) -> Expr<Boolean> {
        self.compared(CompareOp::Eq, other)
    }

    /// `NOT (self = other) AND self IS NOT NULL`.
    ///
    /// A null `self` never satisfies the test, unlike a bare `<>`. With a null
    /// terminator on either side the test is the false literal.
    pub fn is_not(&self, other: impl Into<Self>) -> Expr<Boolean> {
        let other = other.into();
        if self.node.is_null_terminal() || other.node.is_null_terminal() {
            return Expr::from_node(Node::literal(false));
        }
        Expr::from_node(Node::and(
            Node::not(self.is(other).node),
            self.is_not_null().node,
        ))
    }

    /// Membership in a list. Null entries match a null `self`.
    pub fn is_in<T: Into<Self>>(&self, values: impl IntoIterator<Item = T>) -> Expr<Boolean> {
        let (nulls, values): (Vec<Node>, Vec<Node>) = values
            .into_iter()
            .map(|v| v.into().node)
            .partition(Node::is_null_terminal);

        let mut alternatives = Vec::new();
        if !values.is_empty() {
            alternatives.push(self.membership(values));
        }
        if !nulls.is_empty() {
            alternatives.push(self.is_null().node);
        }
        Expr::from_node(if alternatives.is_empty() {
            Node::literal(false)
        } else {
            Node::logical(LogicalOp::Or, alternatives)
        })
    }

    /// The negation of [`is_in`](Self::is_in), false for a null `self`.
    pub fn is_not_in<T: Into<Self>>(&self, values: impl IntoIterator<Item = T>) -> Expr<Boolean> {
        Expr::from_node(Node::and(
            Node::not(self.is_in(values).node),
            self.is_not_null().node,
        ))
    }

    fn membership(&self, values: Vec<Node>) -> Node {
        if K::PLAIN_EQUALITY {
            Node::in_list(self.node.clone(), values, false)
        } else {
            let comparisons = values
                .into_iter()
                .map(|v| compare_nodes::<K>(CompareOp::Eq, self.node.clone(), v))
                .collect();
            Node::logical(LogicalOp::Or, comparisons)
        }
    }
}

impl<K: RangeComparable> Expr<K> {
    pub fn is_less_than(&self, other: impl Into<Self>) -> Expr<Boolean> {
        self.compared(CompareOp::Lt, other)
    }

    pub fn is_less_than_or_equal(&self, other: impl Into<Self>) -> Expr<Boolean> {
        self.compared(CompareOp::Le, other)
    }

    pub fn is_greater_than(&self, other: impl Into<Self>) -> Expr<Boolean> {
        self.compared(CompareOp::Gt, other)
    }

    pub fn is_greater_than_or_equal(&self, other: impl Into<Self>) -> Expr<Boolean> {
        self.compared(CompareOp::Ge, other)
    }

    /// `self < other`, falling back to `tie` when the two are equal.
    ///
    /// Used for keyset paging over a sort key that is not unique.
    pub fn is_less_than_or_tie(
        &self,
        other: impl Into<Self>,
        tie: impl Into<Expr<Boolean>>,
    ) -> Expr<Boolean> {
        let other = other.into();
        Expr::from_node(Node::or(
            self.is_less_than(other.clone()).node,
            Node::and(self.is(other).node, tie.into().node),
        ))
    }

    /// `self > other`, falling back to `tie` when the two are equal.
    pub fn is_greater_than_or_tie(
        &self,
        other: impl Into<Self>,
        tie: impl Into<Expr<Boolean>>,
    ) -> Expr<Boolean> {
        let other = other.into();
        Expr::from_node(Node::or(
            self.is_greater_than(other.clone()).node,
            Node::and(self.is(other).node, tie.into().node),
        ))
    }

    /// `lower <= self < upper`.
    pub fn is_between(&self, lower: impl Into<Self>, upper: impl Into<Self>) -> Expr<Boolean> {
        Expr::from_node(Node::and(
            self.is_greater_than_or_equal(lower).node,
            self.is_less_than(upper).node,
        ))
    }

    /// `lower <= self <= upper`.
    pub fn is_between_inclusive(
        &self,
        lower: impl Into<Self>,
        upper: impl Into<Self>,
    ) -> Expr<Boolean> {
        Expr::from_node(Node::and(
            self.is_greater_than_or_equal(lower).node,
            self.is_less_than_or_equal(upper).node,
        ))
    }

    /// `lower < self < upper`.
    pub fn is_between_exclusive(
        &self,
        lower: impl Into<Self>,
        upper: impl Into<Self>,
    ) -> Expr<Boolean> {
        Expr::from_node(Node::and(
            self.is_greater_than(lower).node,
            self.is_less_than(upper).node,
        ))
    }

    /// The smaller of the two values.
    #[must_use]
    pub fn least(&self, other: impl Into<Self>) -> Self {
        Self::from_node(Node::func(
            ScalarFunction::Least,
            vec![self.node.clone(), other.into().node],
        ))
    }

    /// The larger of the two values.
    #[must_use]
    pub fn greatest(&self, other: impl Into<Self>) -> Self {
        Self::from_node(Node::func(
            ScalarFunction::Greatest,
            vec![self.node.clone(), other.into().node],
        ))
    }

    pub fn min(&self) -> Aggregate<K> {
        Aggregate::new(AggregateFunc::Min, self.node.clone(), false)
    }

    pub fn max(&self) -> Aggregate<K> {
        Aggregate::new(AggregateFunc::Max, self.node.clone(), false)
    }
}
