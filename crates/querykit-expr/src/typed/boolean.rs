//! Boolean expressions.

use std::ops;

use super::Expr;
use crate::kind::{Boolean, Kind};
use crate::node::Node;
use crate::ops::{CompareOp, LogicalOp};

impl Expr<Boolean> {
    /// The constant `TRUE`.
    pub fn always_true() -> Self {
        Self::value(true)
    }

    /// The constant `FALSE`.
    pub fn always_false() -> Self {
        Self::value(false)
    }

    #[must_use]
    pub fn and(&self, other: impl Into<Self>) -> Self {
        Self::from_node(Node::and(self.node.clone(), other.into().node))
    }

    #[must_use]
    pub fn or(&self, other: impl Into<Self>) -> Self {
        Self::from_node(Node::or(self.node.clone(), other.into().node))
    }

    /// `AND` over any number of conditions; `TRUE` for none.
    pub fn all_of(conditions: impl IntoIterator<Item = Self>) -> Self {
        Self::from_node(Node::logical(
            LogicalOp::And,
            conditions.into_iter().map(|c| c.node).collect(),
        ))
    }

    /// `OR` over any number of conditions; `FALSE` for none.
    pub fn any_of(conditions: impl IntoIterator<Item = Self>) -> Self {
        Self::from_node(Node::logical(
            LogicalOp::Or,
            conditions.into_iter().map(|c| c.node).collect(),
        ))
    }

    #[must_use]
    pub fn not(&self) -> Self {
        Self::from_node(Node::not(self.node.clone()))
    }

    /// True when exactly one side is true.
    #[must_use]
    pub fn xor(&self, other: impl Into<Self>) -> Self {
        Self::from_node(Node::compare(
            Boolean::FAMILY,
            CompareOp::NotEq,
            self.node.clone(),
            other.into().node,
        ))
    }

    /// `CASE WHEN self THEN then ELSE otherwise END`.
    pub fn if_then_else<K: Kind>(&self, then: impl Into<Expr<K>>, otherwise: impl Into<Expr<K>>) -> Expr<K> {
        Expr::from_node(Node::case(
            vec![(self.node.clone(), then.into().node)],
            Some(otherwise.into().node),
        ))
    }
}

impl ops::BitAnd for Expr<Boolean> {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self::from_node(Node::and(self.node, rhs.node))
    }
}

impl ops::BitOr for Expr<Boolean> {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self::from_node(Node::or(self.node, rhs.node))
    }
}

impl ops::Not for Expr<Boolean> {
    type Output = Self;

    fn not(self) -> Self {
        Self::from_node(Node::not(self.node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::StandardDialect;
    use crate::kind::{Integer, Text};
    use crate::node::SqlExpression;
    use crate::relation::RelationRef;

    fn std_dialect() -> StandardDialect {
        StandardDialect::new()
    }

    fn flag(name: &str) -> Expr<Boolean> {
        Expr::column(&RelationRef::new("t"), name)
    }

    #[test]
    fn test_and_or_not() {
        let d = std_dialect();
        assert_eq!(flag("a").and(flag("b")).to_sql(&d), "(\"t\".\"a\" AND \"t\".\"b\")");
        assert_eq!(flag("a").or(false).to_sql(&d), "(\"t\".\"a\" OR FALSE)");
        assert_eq!(flag("a").not().to_sql(&d), "(NOT \"t\".\"a\")");
    }

    #[test]
    fn test_operators() {
        let d = std_dialect();
        let e = (flag("a") & flag("b")) | !flag("c");
        assert_eq!(
            e.to_sql(&d),
            "((\"t\".\"a\" AND \"t\".\"b\") OR (NOT \"t\".\"c\"))"
        );
    }

    #[test]
    fn test_all_and_any_of_empty() {
        let d = std_dialect();
        assert_eq!(Expr::all_of(Vec::new()).to_sql(&d), "TRUE");
        assert_eq!(Expr::any_of(Vec::new()).to_sql(&d), "FALSE");
        assert_eq!(
            Expr::any_of([flag("a"), flag("b"), flag("c")]).to_sql(&d),
            "(\"t\".\"a\" OR \"t\".\"b\" OR \"t\".\"c\")"
        );
    }

    #[test]
    fn test_xor() {
        assert_eq!(
            flag("a").xor(flag("b")).to_sql(&std_dialect()),
            "(\"t\".\"a\" <> \"t\".\"b\")"
        );
    }

    #[test]
    fn test_if_then_else() {
        let uid = Expr::<Integer>::column(&RelationRef::new("t"), "uid");
        let label: Expr<Text> = uid.is_greater_than(10).if_then_else("big", "small");
        assert_eq!(
            label.to_sql(&std_dialect()),
            "CASE WHEN (\"t\".\"uid\" > 10) THEN 'big' ELSE 'small' END"
        );
    }

    #[test]
    fn test_constants() {
        let d = std_dialect();
        assert_eq!(Expr::always_true().to_sql(&d), "TRUE");
        assert_eq!(Expr::always_false().to_sql(&d), "FALSE");
    }
}
