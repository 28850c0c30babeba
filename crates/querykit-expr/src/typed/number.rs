//! Integer and real-number expressions.

use std::ops;

use super::Expr;
use crate::aggregate::{self, Aggregate, AggregateFunc};
use crate::kind::{Integer, Number, Numeric, Text};
use crate::node::Node;
use crate::ops::{ArithmeticOp, CastTarget, ScalarFunction, UnaryOp};

impl<K: Numeric> Expr<K> {
    fn arithmetic(&self, op: ArithmeticOp, other: impl Into<Self>) -> Self {
        Self::from_node(Node::arithmetic(
            K::FAMILY,
            op,
            self.node.clone(),
            other.into().node,
        ))
    }

    #[must_use]
    pub fn plus(&self, other: impl Into<Self>) -> Self {
        self.arithmetic(ArithmeticOp::Add, other)
    }

    #[must_use]
    pub fn minus(&self, other: impl Into<Self>) -> Self {
        self.arithmetic(ArithmeticOp::Subtract, other)
    }

    #[must_use]
    pub fn times(&self, other: impl Into<Self>) -> Self {
        self.arithmetic(ArithmeticOp::Multiply, other)
    }

    /// Division. Integer operands divide as integers.
    #[must_use]
    pub fn divided_by(&self, other: impl Into<Self>) -> Self {
        self.arithmetic(ArithmeticOp::Divide, other)
    }

    #[must_use]
    pub fn modulus(&self, other: impl Into<Self>) -> Self {
        self.arithmetic(ArithmeticOp::Modulus, other)
    }

    #[must_use]
    pub fn negated(&self) -> Self {
        Self::from_node(Node::unary(UnaryOp::Negate, self.node.clone()))
    }

    #[must_use]
    pub fn abs(&self) -> Self {
        Self::from_node(Node::func(ScalarFunction::Abs, vec![self.node.clone()]))
    }

    pub fn to_number(&self) -> Expr<Number> {
        Expr::from_node(Node::cast(CastTarget::Real, self.node.clone()))
    }

    pub fn to_text(&self) -> Expr<Text> {
        Expr::from_node(Node::cast(CastTarget::Text, self.node.clone()))
    }

    pub fn sum(&self) -> Aggregate<K> {
        Aggregate::new(AggregateFunc::Sum, self.node.clone(), false)
    }

    pub fn average(&self) -> Aggregate<Number> {
        Aggregate::new(AggregateFunc::Avg, self.node.clone(), false)
    }

    /// Sample standard deviation, emulated from sums where the dialect has
    /// no aggregate for it.
    pub fn standard_deviation(&self) -> Expr<Number> {
        aggregate::standard_deviation(self.node.clone())
    }
}

impl Expr<Number> {
    /// Rounds to `digits` decimal places.
    #[must_use]
    pub fn round(&self, digits: i64) -> Self {
        Self::from_node(Node::func(
            ScalarFunction::Round,
            vec![self.node.clone(), Node::literal(digits)],
        ))
    }

    /// Truncates toward zero.
    pub fn to_integer(&self) -> Expr<Integer> {
        Expr::from_node(Node::cast(CastTarget::Integer, self.node.clone()))
    }
}

macro_rules! arithmetic_operator {
    ($trait:ident, $method:ident, $op:ident) => {
        impl<K: Numeric, R: Into<Self>> ops::$trait<R> for Expr<K> {
            type Output = Self;

            fn $method(self, rhs: R) -> Self {
                Self::from_node(Node::arithmetic(
                    K::FAMILY,
                    ArithmeticOp::$op,
                    self.node,
                    rhs.into().node,
                ))
            }
        }
    };
}

arithmetic_operator!(Add, add, Add);
arithmetic_operator!(Sub, sub, Subtract);
arithmetic_operator!(Mul, mul, Multiply);
arithmetic_operator!(Div, div, Divide);
arithmetic_operator!(Rem, rem, Modulus);

impl<K: Numeric> ops::Neg for Expr<K> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::from_node(Node::unary(UnaryOp::Negate, self.node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::StandardDialect;
    use crate::fallback::Capability;
    use crate::node::SqlExpression;
    use crate::relation::RelationRef;

    fn std_dialect() -> StandardDialect {
        StandardDialect::new()
    }

    fn price() -> Expr<Number> {
        Expr::column(&RelationRef::new("t"), "price")
    }

    fn qty() -> Expr<Integer> {
        Expr::column(&RelationRef::new("t"), "qty")
    }

    #[test]
    fn test_arithmetic_methods() {
        let d = std_dialect();
        assert_eq!(qty().plus(1).to_sql(&d), "(\"t\".\"qty\" + 1)");
        assert_eq!(qty().minus(1).to_sql(&d), "(\"t\".\"qty\" - 1)");
        assert_eq!(price().times(2.5).to_sql(&d), "(\"t\".\"price\" * 2.5)");
        assert_eq!(price().divided_by(4).to_sql(&d), "(\"t\".\"price\" / 4)");
        assert_eq!(qty().modulus(3).to_sql(&d), "MOD(\"t\".\"qty\", 3)");
        assert_eq!(qty().negated().to_sql(&d), "(-\"t\".\"qty\")");
        assert_eq!(qty().abs().to_sql(&d), "ABS(\"t\".\"qty\")");
    }

    #[test]
    fn test_operator_overloads() {
        let d = std_dialect();
        let e = (qty() + 1) * qty() - 2;
        assert_eq!(
            e.to_sql(&d),
            "(((\"t\".\"qty\" + 1) * \"t\".\"qty\") - 2)"
        );
        assert_eq!((-qty()).to_sql(&d), "(-\"t\".\"qty\")");
        assert_eq!((qty() % 2).to_sql(&d), "MOD(\"t\".\"qty\", 2)");
    }

    #[test]
    fn test_null_operand_nulls_the_chain() {
        let e = qty().plus(None::<i64>).times(3);
        assert!(e.requires_null_guard());
        assert_eq!(e.to_sql(&std_dialect()), "NULL");
    }

    #[test]
    fn test_integer_widens_to_number() {
        let total = price().plus(qty());
        assert_eq!(
            total.to_sql(&std_dialect()),
            "(\"t\".\"price\" + CAST(\"t\".\"qty\" AS DOUBLE PRECISION))"
        );
    }

    #[test]
    fn test_round_and_truncate() {
        let d = std_dialect();
        assert_eq!(price().round(2).to_sql(&d), "ROUND(\"t\".\"price\", 2)");
        assert_eq!(price().to_integer().to_sql(&d), "CAST(\"t\".\"price\" AS INTEGER)");
    }

    #[test]
    fn test_aggregates() {
        let d = std_dialect();
        assert_eq!(qty().sum().to_sql(&d), "SUM(\"t\".\"qty\")");
        assert_eq!(qty().average().to_sql(&d), "AVG(\"t\".\"qty\")");
        assert!(qty().sum().is_aggregate());
    }

    #[test]
    fn test_standard_deviation_native_and_emulated() {
        let native = std_dialect();
        let sd = qty().standard_deviation();
        assert!(sd.is_aggregate());
        assert_eq!(sd.to_sql(&native), "STDDEV_SAMP(\"t\".\"qty\")");
        let emulated = std_dialect().with_capability(Capability::StandardDeviation, false);
        let sql = sd.to_sql(&emulated);
        assert!(sql.starts_with("SQRT("));
        assert!(sql.contains("COUNT(CAST(\"t\".\"qty\" AS DOUBLE PRECISION))"));
    }

    #[test]
    fn test_to_text() {
        assert_eq!(
            qty().to_text().to_sql(&std_dialect()),
            "CAST(\"t\".\"qty\" AS VARCHAR(4000))"
        );
    }
}
