//! Text expressions.

use super::Expr;
use crate::fallback::Capability;
use crate::kind::{Boolean, Integer, Kind, Text};
use crate::node::Node;
use crate::ops::{CompareOp, NativeOp, ScalarFunction};

impl Expr<Text> {
    fn call(&self, func: ScalarFunction) -> Node {
        Node::func(func, vec![self.node.clone()])
    }

    #[must_use]
    pub fn lowercase(&self) -> Self {
        Self::from_node(self.call(ScalarFunction::Lower))
    }

    #[must_use]
    pub fn uppercase(&self) -> Self {
        Self::from_node(self.call(ScalarFunction::Upper))
    }

    #[must_use]
    pub fn trim(&self) -> Self {
        Self::from_node(self.call(ScalarFunction::Trim))
    }

    /// The number of characters.
    pub fn length(&self) -> Expr<Integer> {
        Expr::from_node(self.call(ScalarFunction::Length))
    }

    #[must_use]
    pub fn append(&self, other: impl Into<Self>) -> Self {
        Self::from_node(Node::concat(vec![self.node.clone(), other.into().node]))
    }

    /// `length` characters starting at the 1-based `start`.
    #[must_use]
    pub fn substring(&self, start: impl Into<Expr<Integer>>, length: impl Into<Expr<Integer>>) -> Self {
        Self::from_node(Node::func(
            ScalarFunction::Substr,
            vec![self.node.clone(), start.into().node, length.into().node],
        ))
    }

    /// Everything from the 1-based `start` on.
    #[must_use]
    pub fn suffix_from(&self, start: impl Into<Expr<Integer>>) -> Self {
        Self::from_node(Node::func(
            ScalarFunction::Substr,
            vec![self.node.clone(), start.into().node],
        ))
    }

    #[must_use]
    pub fn replace(&self, from: impl Into<Self>, to: impl Into<Self>) -> Self {
        Self::from_node(Node::func(
            ScalarFunction::Replace,
            vec![self.node.clone(), from.into().node, to.into().node],
        ))
    }

    /// The 1-based position of `needle`, 0 when absent.
    pub fn position_of(&self, needle: impl Into<Self>) -> Expr<Integer> {
        Expr::from_node(Node::func(
            ScalarFunction::Position,
            vec![self.node.clone(), needle.into().node],
        ))
    }

    /// `self LIKE pattern`.
    pub fn is_like(&self, pattern: impl Into<Self>) -> Expr<Boolean> {
        Expr::from_node(Node::compare(
            Text::FAMILY,
            CompareOp::Like,
            self.node.clone(),
            pattern.into().node,
        ))
    }

    /// Case-insensitive `LIKE`; `LOWER(self) LIKE LOWER(pattern)` where the
    /// dialect has no `ILIKE`.
    pub fn is_like_ignore_case(&self, pattern: impl Into<Self>) -> Expr<Boolean> {
        let pattern = pattern.into();
        let native = Node::native(
            NativeOp::LikeIgnoreCase,
            vec![self.node.clone(), pattern.node.clone()],
        );
        let emulated = Node::compare(
            Text::FAMILY,
            CompareOp::Like,
            self.call(ScalarFunction::Lower),
            pattern.call(ScalarFunction::Lower),
        );
        Expr::from_node(Node::fallback(
            Capability::CaseInsensitiveLike,
            native,
            emulated,
        ))
    }

    /// True when `needle` occurs in the text.
    pub fn contains(&self, needle: impl Into<Self>) -> Expr<Boolean> {
        Expr::from_node(Node::compare(
            Integer::FAMILY,
            CompareOp::Gt,
            self.position_of(needle).node,
            Node::literal(0_i64),
        ))
    }

    pub fn starts_with(&self, prefix: impl Into<Self>) -> Expr<Boolean> {
        Expr::from_node(Node::compare(
            Integer::FAMILY,
            CompareOp::Eq,
            self.position_of(prefix).node,
            Node::literal(1_i64),
        ))
    }
}
