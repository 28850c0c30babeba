//! Native-or-emulated rendering.
//!
//! Operations that are not portable are built as a pair: the native node,
//! spelled by the dialect, and an emulation assembled from portable
//! primitives (`SUBSTR`, `INSTR`, `CAST`, concatenation, boolean logic) over
//! the canonical text form of the value. The dialect's capability predicate
//! is asked before the native node is used.

use std::fmt;

use crate::node::Node;
use crate::render::RenderContext;

/// Optional features a dialect may lack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Capability {
    /// `EXTRACT(<field> FROM <datetime>)`.
    DatePartExtraction,
    /// Formatting a date-time as `YYYY-MM-DD HH:MM:SS` text.
    DateTimeFormatting,
    /// An interval type with field extraction and comparison.
    NativeDuration,
    /// A geometry type with `ST_X`, `ST_Y` and `ST_Equals`.
    NativeSpatial,
    /// `GROUPS` window frames.
    GroupsFrames,
    /// `ILIKE`.
    CaseInsensitiveLike,
    /// A sample standard deviation aggregate.
    StandardDeviation,
}

impl Capability {
    pub const ALL: [Self; 7] = [
        Self::DatePartExtraction,
        Self::DateTimeFormatting,
        Self::NativeDuration,
        Self::NativeSpatial,
        Self::GroupsFrames,
        Self::CaseInsensitiveLike,
        Self::StandardDeviation,
    ];
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Picks the node to render for a [`Fallback`](crate::node::NodeKind::Fallback).
pub(crate) fn choose<'n>(
    ctx: &RenderContext<'_>,
    capability: Capability,
    native: &'n Node,
    emulated: &'n Node,
) -> &'n Node {
    if probe(ctx, capability) {
        native
    } else {
        emulated
    }
}

/// Picks between two renderings that are not nodes (literals).
pub(crate) fn choose_text(
    ctx: &RenderContext<'_>,
    capability: Capability,
    native: impl FnOnce() -> String,
    emulated: impl FnOnce() -> String,
) -> String {
    if probe(ctx, capability) {
        native()
    } else {
        emulated()
    }
}

fn probe(ctx: &RenderContext<'_>, capability: Capability) -> bool {
    let dialect = ctx.dialect();
    let supported = dialect.supports(capability);
    tracing::debug!(
        dialect = dialect.name(),
        %capability,
        path = if supported { "native" } else { "emulated" },
        "capability probe"
    );
    supported
}
