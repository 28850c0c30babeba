//! Typed expressions.
//!
//! [`Expr<K>`] is the single expression type of the public API. The kind
//! marker `K` decides which operations exist; the wrapped [`Node`] carries
//! the tree. Every operation takes `&self` and builds a new expression, so
//! an expression can be reused in several places of a query.
//!
//! # Examples
//!
//! ```
//! use querykit_expr::dialect::StandardDialect;
//! use querykit_expr::kind::Integer;
//! use querykit_expr::node::SqlExpression;
//! use querykit_expr::relation::RelationRef;
//! use querykit_expr::typed::Expr;
//!
//! let marque = RelationRef::new("marque");
//! let uid = Expr::<Integer>::column(&marque, "uid");
//! let filter = uid.is_greater_than(3).and(uid.is_not(7));
//! assert_eq!(
//!     filter.to_sql(&StandardDialect::new()),
//!     "((\"marque\".\"uid\" > 3) AND ((NOT (\"marque\".\"uid\" = 7)) AND (\"marque\".\"uid\" IS NOT NULL)))"
//! );
//! ```

pub mod boolean;
pub mod comparison;
pub mod date;
pub mod duration;
pub mod number;
pub mod spatial;
pub mod text;

use std::fmt;
use std::marker::PhantomData;

use querykit_core::QueryKitResult;

use crate::aggregate::{Aggregate, AggregateFunc};
use crate::dialect::Dialect;
use crate::kind::{Boolean, DateTime, Duration, Integer, Kind, Number, Point2D, Text};
use crate::mode;
use crate::node::{Node, SqlExpression};
use crate::ops::ScalarFunction;
use crate::period::Period;
use crate::point::Point;
use crate::relation::{ColumnRef, RelationRef};
use crate::render::RenderContext;
use crate::sort::SortKey;
use crate::value::Value;

/// An expression of kind `K`.
#[derive(Clone)]
pub struct Expr<K: Kind> {
    node: Node,
    kind: PhantomData<K>,
}

impl<K: Kind> fmt::Debug for Expr<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Expr")
            .field("kind", &K::FAMILY)
            .field("node", &self.node)
            .finish()
    }
}

/// Host values that can become literals of kind `K`.
pub trait Literal<K: Kind>: Into<Value> {}

impl<K: Kind, T: Literal<K>> Literal<K> for Option<T> {}

impl<K: Kind> Expr<K> {
    /// Wraps a node. The caller vouches that the node produces a `K`.
    pub(crate) const fn from_node(node: Node) -> Self {
        Self {
            node,
            kind: PhantomData,
        }
    }

    pub fn into_node(self) -> Node {
        self.node
    }

    /// The null terminator of this kind.
    pub fn null() -> Self {
        Self::from_node(Node::null())
    }

    /// A literal. `None` yields the null terminator.
    pub fn value(value: impl Literal<K>) -> Self {
        Self::from_node(Node::literal(value))
    }

    pub fn column(relation: &RelationRef, name: impl Into<String>) -> Self {
        Self::from_node(Node::column(ColumnRef::new(relation.clone(), name)))
    }

    pub fn is_null(&self) -> Expr<Boolean> {
        Expr::from_node(Node::null_check(self.node.clone(), false))
    }

    pub fn is_not_null(&self) -> Expr<Boolean> {
        Expr::from_node(Node::null_check(self.node.clone(), true))
    }

    /// `COALESCE(self, default)`.
    pub fn if_null(&self, default: impl Into<Self>) -> Self {
        Self::from_node(Node::func(
            ScalarFunction::Coalesce,
            vec![self.node.clone(), default.into().node],
        ))
    }

    /// Counts the non-null values.
    pub fn count(&self) -> Aggregate<Integer> {
        Aggregate::new(AggregateFunc::Count, self.node.clone(), false)
    }

    /// Counts the distinct non-null values.
    pub fn count_distinct_values(&self) -> Aggregate<Integer> {
        Aggregate::new(AggregateFunc::Count, self.node.clone(), true)
    }

    pub fn ascending(&self) -> SortKey {
        SortKey::ascending(self.node.clone())
    }

    pub fn descending(&self) -> SortKey {
        SortKey::descending(self.node.clone())
    }

    /// Names this expression so it can be selected and grouped on.
    ///
    /// Fails for aggregates, window functions and expressions that read no
    /// column, none of which can be a grouping column.
    pub fn as_expression_column(&self, alias: impl Into<String>) -> QueryKitResult<ExpressionColumn<K>> {
        mode::ensure_groupable(&self.node, K::FAMILY, "expression column")?;
        Ok(ExpressionColumn {
            expr: self.clone(),
            alias: alias.into(),
        })
    }
}

impl<K: Kind> SqlExpression for Expr<K> {
    fn node(&self) -> &Node {
        &self.node
    }
}

impl<K: Kind> From<Expr<K>> for Node {
    fn from(expr: Expr<K>) -> Self {
        expr.node
    }
}

impl<K: Kind> From<&Expr<K>> for Node {
    fn from(expr: &Expr<K>) -> Self {
        expr.node.clone()
    }
}

/// An expression selected under a name.
#[derive(Debug, Clone)]
pub struct ExpressionColumn<K: Kind> {
    expr: Expr<K>,
    alias: String,
}

impl<K: Kind> ExpressionColumn<K> {
    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub const fn expression(&self) -> &Expr<K> {
        &self.expr
    }

    /// `<expr> AS <alias>`.
    pub fn to_select_item(&self, dialect: &dyn Dialect) -> String {
        format!(
            "{} AS {}",
            self.expr.node.render(&RenderContext::new(dialect)),
            dialect.quote_identifier(&self.alias)
        )
    }
}

// ── Literal conversions ────────────────────────────────────────────────

macro_rules! literals {
    ($kind:ty: $($host:ty),+ $(,)?) => {
        $(
            impl Literal<$kind> for $host {}

            impl From<$host> for Expr<$kind> {
                fn from(v: $host) -> Self {
                    Self::value(v)
                }
            }

            impl From<Option<$host>> for Expr<$kind> {
                fn from(v: Option<$host>) -> Self {
                    Self::value(v)
                }
            }
        )+
    };
}

literals!(Boolean: bool);
literals!(Integer: i16, i32, i64, u32);
literals!(Number: f32, f64, i32, i64);
literals!(Text: &str, String, uuid::Uuid);
literals!(DateTime: chrono::NaiveDate, chrono::NaiveDateTime, chrono::DateTime<chrono::Utc>);
literals!(Duration: Period, chrono::Duration);
literals!(Point2D: Point);

impl From<Expr<Integer>> for Expr<Number> {
    fn from(expr: Expr<Integer>) -> Self {
        expr.to_number()
    }
}
