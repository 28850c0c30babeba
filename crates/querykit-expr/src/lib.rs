//! # querykit-expr
//!
//! Typed SQL expression trees. An [`Expr<K>`](typed::Expr) is built through
//! operations that only exist for its kind `K`, and rendered to SQL text for
//! a [`Dialect`](dialect::Dialect). Constructs a dialect cannot express
//! natively are written as a portable emulation chosen at render time.
//!
//! ## Architecture
//!
//! Every expression wraps an untyped [`Node`](node::Node). Nodes are
//! immutable; their null-propagation and aggregate flags are computed once,
//! when the node is built. Rendering walks the tree once and asks the
//! dialect for every spelling.
//!
//! ## Module Overview
//!
//! - [`node`] - The [`Node`](node::Node) tree and the [`SqlExpression`](node::SqlExpression) protocol
//! - [`typed`] - [`Expr<K>`](typed::Expr) and the per-kind operations
//! - [`aggregate`] - Aggregates and the `COUNT(*)` entry point
//! - [`mode`] - The simple and strict mode compilers
//! - [`window`] - Window functions and the staged window builder
//! - [`dialect`] - The [`Dialect`](dialect::Dialect) contract and the ANSI default
//! - [`fallback`] - Capabilities and native-or-emulated selection

// - format_push_string: format! with push_str is clearer than write! for SQL generation
// - doc_markdown: SQL keywords in docs do not need backticks
// - return_self_not_must_use: builder methods are self-documenting
#![allow(clippy::format_push_string)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::unnecessary_literal_bound)]
#![allow(clippy::match_same_arms)]

pub mod aggregate;
pub mod dialect;
pub mod fallback;
pub mod kind;
pub mod mode;
pub mod node;
mod null_guard;
pub mod ops;
pub mod period;
pub mod point;
pub mod relation;
pub mod render;
pub mod sort;
pub mod subquery;
pub mod typed;
pub mod value;
pub mod window;

// Re-export the most commonly used types at the crate root.
pub use aggregate::{count_all, Aggregate};
pub use dialect::{Dialect, StandardDialect};
pub use fallback::Capability;
pub use kind::{Boolean, DateTime, Duration, Integer, Kind, Number, Point2D, Text};
pub use node::{Node, SqlExpression};
pub use period::Period;
pub use point::Point;
pub use relation::{ColumnRef, RelationRef};
pub use sort::SortKey;
pub use typed::Expr;
pub use value::Value;
