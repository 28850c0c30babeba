//! Window functions.
//!
//! A window starts from a function ([`rank`], [`Expr::lag`],
//! [`Aggregate::over`](crate::aggregate::Aggregate::over), ...) and goes
//! through the stages of [`builder`] until it is framed.
//!
//! # Examples
//!
//! ```
//! use querykit_expr::dialect::StandardDialect;
//! use querykit_expr::kind::Integer;
//! use querykit_expr::node::SqlExpression;
//! use querykit_expr::relation::RelationRef;
//! use querykit_expr::typed::Expr;
//! use querykit_expr::window;
//!
//! let sales = RelationRef::new("sales");
//! let region = Expr::<Integer>::column(&sales, "region");
//! let amount = Expr::<Integer>::column(&sales, "amount");
//! let ranked = window::rank()
//!     .partition_by([region])
//!     .order_by(amount.descending(), [])
//!     .default_frame()
//!     .to_expression();
//! assert_eq!(
//!     ranked.to_sql(&StandardDialect::new()),
//!     "RANK() OVER (PARTITION BY \"sales\".\"region\" ORDER BY \"sales\".\"amount\" DESC \
//!      ROWS BETWEEN UNBOUNDED PRECEDING AND UNBOUNDED FOLLOWING)"
//! );
//! ```

pub mod builder;
mod frame;
mod function;

pub use frame::{WindowFrame, WindowFrameBound, WindowFrameType};
pub use function::WindowFunction;

use crate::kind::{Integer, Kind, Number};
use crate::node::{Node, SqlExpression};
use crate::render::RenderContext;
use crate::sort::SortKey;
use crate::typed::Expr;

use self::builder::{Ordered, Unpartitioned};

/// A complete window: function, partition, ordering and frame.
#[derive(Debug, Clone)]
pub struct WindowNode {
    pub(crate) function: WindowFunction,
    pub(crate) partition: Vec<Node>,
    pub(crate) order: Vec<SortKey>,
    pub(crate) frame: WindowFrame,
}

impl WindowNode {
    pub const fn function(&self) -> &WindowFunction {
        &self.function
    }

    pub fn partition(&self) -> &[Node] {
        &self.partition
    }

    pub fn order(&self) -> &[SortKey] {
        &self.order
    }

    pub const fn frame(&self) -> &WindowFrame {
        &self.frame
    }

    /// Function operands, then partition keys, then sort keys.
    pub fn children(&self) -> Vec<&Node> {
        let mut children = self.function.children();
        children.extend(self.partition.iter());
        children.extend(self.order.iter().map(SortKey::node));
        children
    }

    /// `call OVER ([PARTITION BY ..] ORDER BY .. frame)`.
    pub fn render(&self, ctx: &RenderContext<'_>) -> String {
        let mut over = String::new();
        if !self.partition.is_empty() {
            let keys: Vec<String> = self.partition.iter().map(|n| n.render(ctx)).collect();
            over.push_str("PARTITION BY ");
            over.push_str(&keys.join(", "));
            over.push(' ');
        }
        let order: Vec<String> = self.order.iter().map(|k| k.render(ctx)).collect();
        over.push_str("ORDER BY ");
        over.push_str(&order.join(", "));
        over.push(' ');
        over.push_str(&self.frame.render(ctx));
        format!("{} OVER ({over})", self.function.render(ctx))
    }
}

/// What a framed window turns into.
pub trait FromWindowResult {
    fn from_window_result(node: Node) -> Self;
}

impl<K: Kind> FromWindowResult for Expr<K> {
    fn from_window_result(node: Node) -> Self {
        Self::from_node(node)
    }
}

fn ordered<K: Kind>(function: WindowFunction) -> Unpartitioned<Expr<K>, Ordered> {
    Unpartitioned::new(function)
}

/// `RANK()`: rank with gaps after ties.
pub fn rank() -> Unpartitioned<Expr<Integer>, Ordered> {
    ordered(WindowFunction::Rank)
}

/// `DENSE_RANK()`: rank without gaps.
pub fn dense_rank() -> Unpartitioned<Expr<Integer>, Ordered> {
    ordered(WindowFunction::DenseRank)
}

pub fn row_number() -> Unpartitioned<Expr<Integer>, Ordered> {
    ordered(WindowFunction::RowNumber)
}

/// `NTILE(n)`: the bucket number of the row among `n` buckets.
pub fn ntile(n: u64) -> Unpartitioned<Expr<Integer>, Ordered> {
    ordered(WindowFunction::Ntile(n))
}

pub fn percent_rank() -> Unpartitioned<Expr<Number>, Ordered> {
    ordered(WindowFunction::PercentRank)
}

pub fn cume_dist() -> Unpartitioned<Expr<Number>, Ordered> {
    ordered(WindowFunction::CumeDist)
}

impl<K: Kind> Expr<K> {
    /// The value of the previous row, null on the first row.
    pub fn lag(&self) -> Unpartitioned<Self, Ordered> {
        ordered(WindowFunction::Lag {
            operand: self.node().clone(),
            offset: 1,
            default: None,
        })
    }

    /// The value `offset` rows back, `default` when there is none.
    pub fn lag_with(&self, offset: u64, default: impl Into<Self>) -> Unpartitioned<Self, Ordered> {
        ordered(WindowFunction::Lag {
            operand: self.node().clone(),
            offset,
            default: WindowFunction::offset_default(default.into().into_node()),
        })
    }

    /// The value of the next row, null on the last row.
    pub fn lead(&self) -> Unpartitioned<Self, Ordered> {
        ordered(WindowFunction::Lead {
            operand: self.node().clone(),
            offset: 1,
            default: None,
        })
    }

    pub fn lead_with(&self, offset: u64, default: impl Into<Self>) -> Unpartitioned<Self, Ordered> {
        ordered(WindowFunction::Lead {
            operand: self.node().clone(),
            offset,
            default: WindowFunction::offset_default(default.into().into_node()),
        })
    }

    pub fn first_value(&self) -> Unpartitioned<Self, Ordered> {
        ordered(WindowFunction::FirstValue(self.node().clone()))
    }

    pub fn last_value(&self) -> Unpartitioned<Self, Ordered> {
        ordered(WindowFunction::LastValue(self.node().clone()))
    }

    /// The value of the `n`th row of the frame, counting from 1.
    pub fn nth_value(&self, n: u64) -> Unpartitioned<Self, Ordered> {
        ordered(WindowFunction::NthValue(self.node().clone(), n))
    }
}
