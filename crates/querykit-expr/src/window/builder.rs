//! The staged window builder.
//!
//! Each stage is a separate type and each step consumes the stage it is
//! called on, so a window can only be rendered after it has been partitioned
//! (possibly over all rows), sorted and framed:
//!
//! ```text
//! Unpartitioned -> Partitioned -> Sorted -> FrameStart -> From* -> Framed
//! ```
//!
//! The end stages (`FromUnboundedPreceding`, `FromPreceding`,
//! `FromCurrentRow`, `FromFollowing`) only offer end bounds that do not
//! precede their start bound. Offsets in the same direction are compared
//! when the end bound is given.
//!
//! `O` is the expression the window produces; `C` is the category of the
//! function, [`Framable`] for aggregates and [`Ordered`] for ranking and
//! offset functions. Only framable windows may skip sorting.

use std::fmt;
use std::marker::PhantomData;

use querykit_core::QueryKitResult;

use super::frame::{WindowFrame, WindowFrameBound, WindowFrameType};
use super::function::WindowFunction;
use super::{FromWindowResult, WindowNode};
use crate::kind::Family;
use crate::node::Node;
use crate::ops::CompareOp;
use crate::sort::SortKey;

/// Aggregates used as window functions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Framable;

/// Ranking and offset functions, which need an ordering.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ordered;

type Marker<O, C> = PhantomData<fn() -> (O, C)>;

/// What every stage after partitioning carries.
#[derive(Debug, Clone)]
struct Parts {
    function: WindowFunction,
    partition: Vec<Node>,
    order: Vec<SortKey>,
}

impl Parts {
    fn framed<O>(self, frame: WindowFrame) -> Framed<O> {
        Framed {
            window: WindowNode {
                function: self.function,
                partition: self.partition,
                order: self.order,
                frame,
            },
            marker: PhantomData,
        }
    }
}

macro_rules! stage_debug {
    ($($stage:ident<$($param:ident),+>),+ $(,)?) => {
        $(
            impl<$($param),+> fmt::Debug for $stage<$($param),+> {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.debug_struct(stringify!($stage)).finish_non_exhaustive()
                }
            }
        )+
    };
}

/// A window function before `PARTITION BY`.
pub struct Unpartitioned<O, C> {
    function: WindowFunction,
    marker: Marker<O, C>,
}

impl<O, C> Unpartitioned<O, C> {
    pub(crate) const fn new(function: WindowFunction) -> Self {
        Self {
            function,
            marker: PhantomData,
        }
    }

    /// `PARTITION BY keys`. An empty list means one partition.
    pub fn partition_by<N: Into<Node>>(self, keys: impl IntoIterator<Item = N>) -> Partitioned<O, C> {
        Partitioned {
            function: self.function,
            partition: keys.into_iter().map(Into::into).collect(),
            marker: PhantomData,
        }
    }

    /// One partition holding every row.
    pub fn all_rows(self) -> Partitioned<O, C> {
        self.partition_by(Vec::<Node>::new())
    }
}

/// A partitioned window, waiting for `ORDER BY`.
pub struct Partitioned<O, C> {
    function: WindowFunction,
    partition: Vec<Node>,
    marker: Marker<O, C>,
}

impl<O, C> Partitioned<O, C> {
    /// `ORDER BY first, rest...`.
    pub fn order_by(
        self,
        first: impl Into<SortKey>,
        rest: impl IntoIterator<Item = SortKey>,
    ) -> Sorted<O, C> {
        let order = std::iter::once(first.into()).chain(rest).collect();
        Sorted {
            parts: Parts {
                function: self.function,
                partition: self.partition,
                order,
            },
            marker: PhantomData,
        }
    }
}

impl<O> Partitioned<O, Framable> {
    /// No meaningful order: sorts by a constant, so every row of the
    /// partition is a peer of every other.
    pub fn unsorted(self) -> Sorted<O, Framable> {
        let constant = Node::compare(
            Family::Integer,
            CompareOp::Eq,
            Node::literal(1_i64),
            Node::literal(1_i64),
        );
        self.order_by(SortKey::ascending(constant), [])
    }
}

/// A sorted window, waiting for its frame type.
pub struct Sorted<O, C> {
    parts: Parts,
    marker: Marker<O, C>,
}

impl<O, C> Sorted<O, C> {
    fn frame_type(self, frame_type: WindowFrameType) -> FrameStart<O> {
        FrameStart {
            parts: self.parts,
            frame_type,
            marker: PhantomData,
        }
    }

    pub fn rows(self) -> FrameStart<O> {
        self.frame_type(WindowFrameType::Rows)
    }

    pub fn range(self) -> FrameStart<O> {
        self.frame_type(WindowFrameType::Range)
    }

    /// Peer-group frames. Rendered as RANGE by dialects without GROUPS when
    /// neither bound is an offset.
    ///
    /// A GROUPS frame with an offset bound has no RANGE equivalent and is
    /// rendered as GROUPS everywhere, so it is not portable to MySQL, which
    /// rejects it. Such a frame logs a warning when rendered for a dialect
    /// without GROUPS support.
    pub fn groups(self) -> FrameStart<O> {
        self.frame_type(WindowFrameType::Groups)
    }

    /// A frame from bounds only known at runtime.
    pub fn between(
        self,
        frame_type: WindowFrameType,
        start: WindowFrameBound,
        end: WindowFrameBound,
    ) -> QueryKitResult<Framed<O>> {
        let frame = WindowFrame::try_new(frame_type, start, end)?;
        Ok(self.parts.framed(frame))
    }

    /// `ROWS BETWEEN UNBOUNDED PRECEDING AND UNBOUNDED FOLLOWING`.
    pub fn default_frame(self) -> Framed<O> {
        self.rows().unbounded_preceding().unbounded_following()
    }

    /// `ROWS BETWEEN CURRENT ROW AND CURRENT ROW`.
    pub fn only_current_row(self) -> Framed<O> {
        self.rows().current_row().current_row()
    }

    /// `ROWS BETWEEN n PRECEDING AND CURRENT ROW`.
    pub fn offset_preceding_and_current_row(self, n: u64) -> Framed<O> {
        self.rows().offset_preceding(n).current_row()
    }
}

/// A window with a frame type, waiting for the start bound.
pub struct FrameStart<O> {
    parts: Parts,
    frame_type: WindowFrameType,
    marker: PhantomData<fn() -> O>,
}

impl<O> FrameStart<O> {
    fn starting_at(self, start: WindowFrameBound) -> FrameEnd<O> {
        FrameEnd {
            parts: self.parts,
            frame_type: self.frame_type,
            start,
            marker: PhantomData,
        }
    }

    pub fn unbounded_preceding(self) -> FromUnboundedPreceding<O> {
        FromUnboundedPreceding(self.starting_at(WindowFrameBound::UnboundedPreceding))
    }

    pub fn offset_preceding(self, n: u64) -> FromPreceding<O> {
        FromPreceding(self.starting_at(WindowFrameBound::Preceding(n)))
    }

    pub fn current_row(self) -> FromCurrentRow<O> {
        FromCurrentRow(self.starting_at(WindowFrameBound::CurrentRow))
    }

    pub fn offset_following(self, n: u64) -> FromFollowing<O> {
        FromFollowing(self.starting_at(WindowFrameBound::Following(n)))
    }
}

/// The state shared by the end stages.
struct FrameEnd<O> {
    parts: Parts,
    frame_type: WindowFrameType,
    start: WindowFrameBound,
    marker: PhantomData<fn() -> O>,
}

impl<O> FrameEnd<O> {
    /// Ends a frame whose bound order the end stage has already ensured.
    fn ending_at(self, end: WindowFrameBound) -> Framed<O> {
        self.parts
            .framed(WindowFrame::ordered(self.frame_type, self.start, end))
    }

    /// Ends a frame whose bounds still need comparing.
    fn checked(self, end: WindowFrameBound) -> QueryKitResult<Framed<O>> {
        let frame = WindowFrame::try_new(self.frame_type, self.start, end)?;
        Ok(self.parts.framed(frame))
    }
}

/// Started at `UNBOUNDED PRECEDING`: every end bound but that one.
pub struct FromUnboundedPreceding<O>(FrameEnd<O>);

impl<O> FromUnboundedPreceding<O> {
    pub fn offset_preceding(self, n: u64) -> Framed<O> {
        self.0.ending_at(WindowFrameBound::Preceding(n))
    }

    pub fn current_row(self) -> Framed<O> {
        self.0.ending_at(WindowFrameBound::CurrentRow)
    }

    pub fn offset_following(self, n: u64) -> Framed<O> {
        self.0.ending_at(WindowFrameBound::Following(n))
    }

    pub fn unbounded_following(self) -> Framed<O> {
        self.0.ending_at(WindowFrameBound::UnboundedFollowing)
    }
}

/// Started at `n PRECEDING`.
pub struct FromPreceding<O>(FrameEnd<O>);

impl<O> FromPreceding<O> {
    /// Fails when `m` is greater than the start offset.
    pub fn offset_preceding(self, m: u64) -> QueryKitResult<Framed<O>> {
        self.0.checked(WindowFrameBound::Preceding(m))
    }

    pub fn current_row(self) -> Framed<O> {
        self.0.ending_at(WindowFrameBound::CurrentRow)
    }

    pub fn offset_following(self, n: u64) -> Framed<O> {
        self.0.ending_at(WindowFrameBound::Following(n))
    }

    pub fn unbounded_following(self) -> Framed<O> {
        self.0.ending_at(WindowFrameBound::UnboundedFollowing)
    }
}

/// Started at `CURRENT ROW`.
pub struct FromCurrentRow<O>(FrameEnd<O>);

impl<O> FromCurrentRow<O> {
    pub fn current_row(self) -> Framed<O> {
        self.0.ending_at(WindowFrameBound::CurrentRow)
    }

    pub fn offset_following(self, n: u64) -> Framed<O> {
        self.0.ending_at(WindowFrameBound::Following(n))
    }

    pub fn unbounded_following(self) -> Framed<O> {
        self.0.ending_at(WindowFrameBound::UnboundedFollowing)
    }
}

/// Started at `n FOLLOWING`.
pub struct FromFollowing<O>(FrameEnd<O>);

impl<O> FromFollowing<O> {
    /// Fails when `m` is less than the start offset.
    pub fn offset_following(self, m: u64) -> QueryKitResult<Framed<O>> {
        self.0.checked(WindowFrameBound::Following(m))
    }

    pub fn unbounded_following(self) -> Framed<O> {
        self.0.ending_at(WindowFrameBound::UnboundedFollowing)
    }
}

/// A complete window specification.
pub struct Framed<O> {
    window: WindowNode,
    marker: PhantomData<fn() -> O>,
}

impl<O> Framed<O> {
    pub const fn frame(&self) -> &WindowFrame {
        &self.window.frame
    }

    pub fn into_node(self) -> Node {
        Node::window(self.window)
    }
}

impl<O: FromWindowResult> Framed<O> {
    /// The window as an expression of its result kind.
    #[allow(clippy::wrong_self_convention)]
    pub fn to_expression(self) -> O {
        O::from_window_result(self.into_node())
    }
}

impl<O> Clone for Framed<O> {
    fn clone(&self) -> Self {
        Self {
            window: self.window.clone(),
            marker: PhantomData,
        }
    }
}

stage_debug!(
    Unpartitioned<O, C>,
    Partitioned<O, C>,
    Sorted<O, C>,
    FrameStart<O>,
    FromUnboundedPreceding<O>,
    FromPreceding<O>,
    FromCurrentRow<O>,
    FromFollowing<O>,
    Framed<O>,
);
