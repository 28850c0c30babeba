//! Expression kinds.
//!
//! Every typed expression is an [`Expr<K>`](crate::typed::Expr) where `K` is
//! one of the zero-sized markers below. The marker decides which operations
//! exist (through the [`EqualityComparable`] and [`RangeComparable`] traits
//! and per-kind `impl` blocks) and how comparisons are built.

use std::fmt;

use crate::node::Node;
use crate::ops::CompareOp;

/// The data family of a value, passed to dialect transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Boolean,
    Integer,
    Number,
    Text,
    DateTime,
    Duration,
    Point2D,
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Boolean => "Boolean",
            Self::Integer => "Integer",
            Self::Number => "Number",
            Self::Text => "Text",
            Self::DateTime => "DateTime",
            Self::Duration => "Duration",
            Self::Point2D => "Point2D",
        };
        f.write_str(name)
    }
}

/// A kind marker.
pub trait Kind: Copy + Default + fmt::Debug + Send + Sync + 'static {
    const FAMILY: Family;

    /// Whether `=` and `IN` work on values of this kind as they are.
    const PLAIN_EQUALITY: bool = true;

    /// Builds a comparison between two non-null operands of this kind.
    fn comparison(op: CompareOp, left: Node, right: Node) -> Node {
        Node::compare(Self::FAMILY, op, left, right)
    }
}

/// Kinds supporting `is`, `is_not` and `is_in`.
pub trait EqualityComparable: Kind {}

/// Kinds with a total order.
pub trait RangeComparable: EqualityComparable {}

/// Kinds supporting arithmetic and numeric aggregates.
pub trait Numeric: RangeComparable {}

macro_rules! kind_marker {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub struct $name;
    };
}

kind_marker!(
    /// True, false or unknown.
    Boolean
);
kind_marker!(
    /// Whole numbers.
    Integer
);
kind_marker!(
    /// Real numbers.
    Number
);
kind_marker!(
    /// Character strings.
    Text
);
kind_marker!(
    /// Date-times.
    DateTime
);
kind_marker!(
    /// Calendar durations, see [`Period`](crate::period::Period).
    Duration
);
kind_marker!(
    /// Points in the plane.
    Point2D
);

impl Kind for Boolean {
    const FAMILY: Family = Family::Boolean;
}
impl Kind for Integer {
    const FAMILY: Family = Family::Integer;
}
impl Kind for Number {
    const FAMILY: Family = Family::Number;
}
impl Kind for Text {
    const FAMILY: Family = Family::Text;
}
impl Kind for DateTime {
    const FAMILY: Family = Family::DateTime;
}

impl Kind for Duration {
    const FAMILY: Family = Family::Duration;

    fn comparison(op: CompareOp, left: Node, right: Node) -> Node {
        crate::typed::duration::period_comparison(op, left, right)
    }
}

impl Kind for Point2D {
    const FAMILY: Family = Family::Point2D;
    const PLAIN_EQUALITY: bool = false;

    fn comparison(op: CompareOp, left: Node, right: Node) -> Node {
        crate::typed::spatial::point_comparison(op, left, right)
    }
}

impl EqualityComparable for Boolean {}
impl EqualityComparable for Integer {}
impl EqualityComparable for Number {}
impl EqualityComparable for Text {}
impl EqualityComparable for DateTime {}
impl EqualityComparable for Duration {}
impl EqualityComparable for Point2D {}

impl RangeComparable for Integer {}
impl RangeComparable for Number {}
impl RangeComparable for Text {}
impl RangeComparable for DateTime {}
impl RangeComparable for Duration {}

impl Numeric for Integer {}
impl Numeric for Number {}
