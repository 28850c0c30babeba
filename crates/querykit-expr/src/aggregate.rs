//! Aggregate functions.
//!
//! An [`Aggregate<K>`] is an ordinary expression of kind `K` that also
//! knows how to become a window function: [`Aggregate::over`] starts the
//! window builder with the framable category.

use crate::fallback::Capability;
use crate::kind::{Integer, Kind, Number};
use crate::node::{Node, SqlExpression};
use crate::ops::{ArithmeticOp, CastTarget, ScalarFunction};
use crate::typed::Expr;
use crate::window::builder::{Framable, Unpartitioned};
use crate::window::WindowFunction;

/// The aggregate functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateFunc {
    Count,
    Sum,
    Avg,
    Min,
    Max,
    /// Sample standard deviation.
    StdDev,
}

impl AggregateFunc {
    pub const fn sql_name(self) -> &'static str {
        match self {
            Self::Count => "COUNT",
            Self::Sum => "SUM",
            Self::Avg => "AVG",
            Self::Min => "MIN",
            Self::Max => "MAX",
            Self::StdDev => "STDDEV_SAMP",
        }
    }
}

/// An aggregate producing a `K`.
#[derive(Debug, Clone)]
pub struct Aggregate<K: Kind> {
    expr: Expr<K>,
}

impl<K: Kind> Aggregate<K> {
    pub(crate) fn new(func: AggregateFunc, operand: Node, distinct: bool) -> Self {
        Self::from_node(Node::aggregate(func, operand, distinct))
    }

    const fn from_node(node: Node) -> Self {
        Self {
            expr: Expr::from_node(node),
        }
    }

    pub const fn expr(&self) -> &Expr<K> {
        &self.expr
    }

    pub fn into_expr(self) -> Expr<K> {
        self.expr
    }

    /// Uses the aggregate as a window function.
    pub fn over(&self) -> Unpartitioned<Expr<K>, Framable> {
        Unpartitioned::new(WindowFunction::Aggregate(self.expr.node().clone()))
    }
}

impl<K: Kind> SqlExpression for Aggregate<K> {
    fn node(&self) -> &Node {
        self.expr.node()
    }
}

impl<K: Kind> From<Aggregate<K>> for Expr<K> {
    fn from(aggregate: Aggregate<K>) -> Self {
        aggregate.expr
    }
}

impl<K: Kind> From<Aggregate<K>> for Node {
    fn from(aggregate: Aggregate<K>) -> Self {
        aggregate.expr.into_node()
    }
}

/// `COUNT(*)`: the number of rows, nulls included. Zero over no rows.
pub fn count_all() -> Aggregate<Integer> {
    Aggregate::from_node(Node::count_all())
}

/// Sample standard deviation of `operand`.
///
/// Without a native aggregate this is
/// `SQRT((SUM(x*x) - SUM(x)*SUM(x)/COUNT(x)) / (COUNT(x) - 1))` over `x`
/// cast to a real, which is null for fewer than two rows on most engines
/// (division by zero).
pub(crate) fn standard_deviation(operand: Node) -> Expr<Number> {
    let native = Node::aggregate(AggregateFunc::StdDev, operand.clone(), false);

    let x = Node::cast(CastTarget::Real, operand);
    let real = |op, l, r| Node::arithmetic(Number::FAMILY, op, l, r);
    let sum = |n| Node::aggregate(AggregateFunc::Sum, n, false);
    let count = Node::aggregate(AggregateFunc::Count, x.clone(), false);

    let sum_of_squares = sum(real(ArithmeticOp::Multiply, x.clone(), x.clone()));
    let square_of_sum = real(ArithmeticOp::Multiply, sum(x.clone()), sum(x));
    let variance = real(
        ArithmeticOp::Divide,
        real(
            ArithmeticOp::Subtract,
            sum_of_squares,
            real(ArithmeticOp::Divide, square_of_sum, count.clone()),
        ),
        real(ArithmeticOp::Subtract, count, Node::literal(1.0)),
    );
    let emulated = Node::func(ScalarFunction::Sqrt, vec![variance]);

    Expr::from_node(Node::fallback(Capability::StandardDeviation, native, emulated))
}
