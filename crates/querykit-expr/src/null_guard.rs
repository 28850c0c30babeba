//! Null safety.
//!
//! An expression compared with, or computed from, an explicit null does not
//! render the operator at all:
//!
//! - a comparison with a null operand becomes a null check of the other
//!   operand (`a = NULL` renders as `(a IS NULL)`, `a <> NULL` as
//!   `(a IS NOT NULL)`);
//! - a value operator with a null operand becomes the null literal, and is
//!   itself treated as null by its parents;
//! - connectives, null checks, `CASE`, `COALESCE`, aggregates, windows and
//!   mode subqueries render structurally, since their operands already
//!   carry the guarded rendering.
//!
//! Both halves, flag propagation and render-time short circuit, live here
//! and apply to every node kind.

use crate::node::{Node, NodeKind};
use crate::ops::{CompareOp, NativeOp, ScalarFunction, UnaryOp};
use crate::render::RenderContext;

/// How a node reacts to a null operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GuardClass {
    /// Renders as a null check of the non-null operand.
    Predicate,
    /// Renders as the null literal.
    Value,
    /// Renders normally.
    Structural,
}

pub(crate) const fn classify(kind: &NodeKind) -> GuardClass {
    match kind {
        NodeKind::Compare { .. } => GuardClass::Predicate,
        NodeKind::Native { op, .. } if op.is_predicate() => GuardClass::Predicate,
        NodeKind::Unary {
            op: UnaryOp::Negate,
            ..
        }
        | NodeKind::Arithmetic { .. }
        | NodeKind::Cast { .. }
        | NodeKind::Concat(_)
        | NodeKind::Native { .. } => GuardClass::Value,
        NodeKind::Func { func, .. } if !matches!(func, ScalarFunction::Coalesce) => {
            GuardClass::Value
        }
        _ => GuardClass::Structural,
    }
}

/// The null-related flags of a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct GuardFlags {
    pub(crate) requires_guard: bool,
    pub(crate) terminal: bool,
}

/// Computes the null-related flags of a node from its operands.
pub(crate) fn propagate(kind: &NodeKind, children: &[&Node]) -> GuardFlags {
    if matches!(kind, NodeKind::Null) {
        return GuardFlags {
            requires_guard: true,
            terminal: true,
        };
    }

    let requires_guard = children
        .iter()
        .any(|c| c.is_null_terminal() || c.requires_null_guard());

    let terminal = match kind {
        NodeKind::Fallback {
            native, emulated, ..
        } => native.is_null_terminal() && emulated.is_null_terminal(),
        kind if classify(kind) == GuardClass::Value => {
            children.iter().any(|c| c.is_null_terminal())
        }
        _ => false,
    };

    GuardFlags {
        requires_guard,
        terminal,
    }
}

/// Renders the guarded form of `node` if its guard fires.
///
/// Returns `None` when the node should render normally.
pub(crate) fn short_circuit(node: &Node, ctx: &RenderContext<'_>) -> Option<String> {
    if !node.requires_null_guard() {
        return None;
    }
    let dialect = ctx.dialect();
    match classify(node.kind()) {
        GuardClass::Value if node.is_null_terminal() => Some(dialect.null_literal().to_string()),
        GuardClass::Predicate => {
            let (left, right, negated) = predicate_operands(node.kind())?;
            let subject = if right.is_null_terminal() {
                left
            } else if left.is_null_terminal() {
                right
            } else {
                return None;
            };
            let rendered = subject.render(ctx);
            tracing::trace!(kind = node.kind().describe(), "null guard fired");
            Some(if negated {
                dialect.not_null_check(&rendered)
            } else {
                dialect.null_check(&rendered)
            })
        }
        _ => None,
    }
}

fn predicate_operands(kind: &NodeKind) -> Option<(&Node, &Node, bool)> {
    match kind {
        NodeKind::Compare {
            op, left, right, ..
        } => Some((left.as_ref(), right.as_ref(), *op == CompareOp::NotEq)),
        NodeKind::Native { op, args } => match args.as_slice() {
            [left, right] => Some((
                left,
                right,
                matches!(op, NativeOp::PeriodCompare(CompareOp::NotEq)),
            )),
            _ => None,
        },
        _ => None,
    }
}
