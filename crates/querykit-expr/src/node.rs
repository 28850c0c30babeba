//! The expression node protocol.
//!
//! A [`Node`] is one operation of an expression tree. It owns its operands
//! and carries flags that are computed once, from the operands, when the
//! node is built. There are no setters: a node is never modified after
//! construction, so a tree can be rendered any number of times, against any
//! dialect, from any thread.
//!
//! Nodes are created through the smart constructors on [`Node`]. Typed code
//! does not touch them directly; it goes through [`Expr<K>`](crate::typed::Expr).

use crate::aggregate::AggregateFunc;
use crate::dialect::Dialect;
use crate::fallback::Capability;
use crate::kind::Family;
use crate::mode::{ModeSimple, ModeStrict};
use crate::null_guard;
use crate::ops::{ArithmeticOp, CastTarget, CompareOp, LogicalOp, NativeOp, ScalarFunction, UnaryOp};
use crate::relation::{ColumnRef, RelationSet};
use crate::render::RenderContext;
use crate::value::Value;
use crate::window::WindowNode;

/// The protocol every expression object implements.
///
/// `Clone` is a supertrait: every expression can be copied, and the copy
/// renders identically to the original.
pub trait SqlExpression: Clone {
    /// The root node of the expression.
    fn node(&self) -> &Node;

    /// Renders the expression for a dialect.
    fn to_sql(&self, dialect: &dyn Dialect) -> String {
        let _span = querykit_core::logging::render_span(dialect.name()).entered();
        self.node().render(&RenderContext::new(dialect))
    }

    /// Returns `true` if the expression contains an aggregate outside of a
    /// window, i.e. it needs a `GROUP BY` when selected next to plain columns.
    fn is_aggregate(&self) -> bool {
        self.node().flags.aggregate
    }

    /// The relations the expression reads from.
    fn referenced_relations(&self) -> RelationSet {
        let mut relations = RelationSet::new();
        self.node().collect_relations(&mut relations);
        relations
    }

    /// Returns `true` if no column of any relation appears in the tree.
    fn is_purely_computed(&self) -> bool {
        self.node().purely_computed()
    }

    /// Returns `true` if a null terminator appears somewhere below (or at)
    /// the root, so that rendering takes the null-guard path somewhere.
    fn requires_null_guard(&self) -> bool {
        self.node().flags.null_guard
    }

    /// A structurally equal, independently owned copy.
    #[must_use]
    fn deep_clone(&self) -> Self {
        self.clone()
    }
}

/// The operation a node performs.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// The null terminator: an unconditional null.
    Null,
    Literal(Value),
    Column(ColumnRef),
    Unary {
        op: UnaryOp,
        operand: Box<Node>,
    },
    Arithmetic {
        family: Family,
        op: ArithmeticOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    Compare {
        family: Family,
        op: CompareOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    Logical {
        op: LogicalOp,
        operands: Vec<Node>,
    },
    NullCheck {
        negated: bool,
        operand: Box<Node>,
    },
    InList {
        negated: bool,
        operand: Box<Node>,
        list: Vec<Node>,
    },
    Func {
        func: ScalarFunction,
        args: Vec<Node>,
    },
    Cast {
        target: CastTarget,
        operand: Box<Node>,
    },
    Concat(Vec<Node>),
    Case {
        whens: Vec<(Node, Node)>,
        default: Option<Box<Node>>,
    },
    /// An operation spelled entirely by the dialect.
    Native {
        op: NativeOp,
        args: Vec<Node>,
    },
    /// A native rendering and its portable emulation; the dialect's
    /// capability decides between them at render time.
    Fallback {
        capability: Capability,
        native: Box<Node>,
        emulated: Box<Node>,
    },
    /// An aggregate call. `COUNT(*)` has no operand.
    Aggregate {
        func: AggregateFunc,
        operand: Option<Box<Node>>,
        distinct: bool,
    },
    Window(Box<WindowNode>),
    ModeSimple(Box<ModeSimple>),
    ModeStrict(Box<ModeStrict>),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct NodeFlags {
    pub(crate) null_guard: bool,
    pub(crate) null_terminal: bool,
    pub(crate) aggregate: bool,
    pub(crate) window: bool,
}

/// One node of an expression tree.
#[derive(Debug, Clone)]
pub struct Node {
    kind: NodeKind,
    flags: NodeFlags,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        let children = kind.children();
        let null_guard = null_guard::propagate(&kind, &children);
        let aggregate = match &kind {
            NodeKind::Aggregate { .. } | NodeKind::ModeSimple(_) | NodeKind::ModeStrict(_) => true,
            NodeKind::Window(_) => false,
            _ => children.iter().any(|c| c.flags.aggregate),
        };
        let window = matches!(kind, NodeKind::Window(_)) || children.iter().any(|c| c.flags.window);
        let flags = NodeFlags {
            null_guard: null_guard.requires_guard,
            null_terminal: null_guard.terminal,
            aggregate,
            window,
        };
        Self { kind, flags }
    }

    // ── Leaves ───────────────────────────────────────────────────────

    /// The null terminator.
    pub fn null() -> Self {
        Self::new(NodeKind::Null)
    }

    /// A literal. `Value::Null` becomes the null terminator.
    pub fn literal(value: impl Into<Value>) -> Self {
        match value.into() {
            Value::Null => Self::null(),
            value => Self::new(NodeKind::Literal(value)),
        }
    }

    pub fn column(column: ColumnRef) -> Self {
        Self::new(NodeKind::Column(column))
    }

    // ── Operators ────────────────────────────────────────────────────

    pub fn unary(op: UnaryOp, operand: Self) -> Self {
        Self::new(NodeKind::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    pub fn not(operand: Self) -> Self {
        Self::unary(UnaryOp::Not, operand)
    }

    pub fn arithmetic(family: Family, op: ArithmeticOp, left: Self, right: Self) -> Self {
        Self::new(NodeKind::Arithmetic {
            family,
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn compare(family: Family, op: CompareOp, left: Self, right: Self) -> Self {
        Self::new(NodeKind::Compare {
            family,
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// An `AND`/`OR` over the operands. A single operand is returned as is.
    pub fn logical(op: LogicalOp, mut operands: Vec<Self>) -> Self {
        if operands.len() == 1 {
            if let Some(only) = operands.pop() {
                return only;
            }
        }
        Self::new(NodeKind::Logical { op, operands })
    }

    pub fn and(left: Self, right: Self) -> Self {
        Self::logical(LogicalOp::And, vec![left, right])
    }

    pub fn or(left: Self, right: Self) -> Self {
        Self::logical(LogicalOp::Or, vec![left, right])
    }

    /// `operand IS NULL`, or `IS NOT NULL` when `negated`.
    pub fn null_check(operand: Self, negated: bool) -> Self {
        Self::new(NodeKind::NullCheck {
            negated,
            operand: Box::new(operand),
        })
    }

    pub fn in_list(operand: Self, list: Vec<Self>, negated: bool) -> Self {
        Self::new(NodeKind::InList {
            negated,
            operand: Box::new(operand),
            list,
        })
    }

    pub fn func(func: ScalarFunction, args: Vec<Self>) -> Self {
        Self::new(NodeKind::Func { func, args })
    }

    pub fn cast(target: CastTarget, operand: Self) -> Self {
        Self::new(NodeKind::Cast {
            target,
            operand: Box::new(operand),
        })
    }

    pub fn concat(parts: Vec<Self>) -> Self {
        Self::new(NodeKind::Concat(parts))
    }

    pub fn case(whens: Vec<(Self, Self)>, default: Option<Self>) -> Self {
        Self::new(NodeKind::Case {
            whens,
            default: default.map(Box::new),
        })
    }

    pub fn native(op: NativeOp, args: Vec<Self>) -> Self {
        Self::new(NodeKind::Native { op, args })
    }

    /// A node rendering `native` when the dialect supports `capability`
    /// and `emulated` otherwise.
    pub fn fallback(capability: Capability, native: Self, emulated: Self) -> Self {
        Self::new(NodeKind::Fallback {
            capability,
            native: Box::new(native),
            emulated: Box::new(emulated),
        })
    }

    // ── Aggregates, windows, mode ────────────────────────────────────

    pub fn aggregate(func: AggregateFunc, operand: Self, distinct: bool) -> Self {
        Self::new(NodeKind::Aggregate {
            func,
            operand: Some(Box::new(operand)),
            distinct,
        })
    }

    /// `COUNT(*)`.
    pub fn count_all() -> Self {
        Self::new(NodeKind::Aggregate {
            func: AggregateFunc::Count,
            operand: None,
            distinct: false,
        })
    }

    pub fn window(window: WindowNode) -> Self {
        Self::new(NodeKind::Window(Box::new(window)))
    }

    pub fn mode_simple(mode: ModeSimple) -> Self {
        Self::new(NodeKind::ModeSimple(Box::new(mode)))
    }

    pub fn mode_strict(mode: ModeStrict) -> Self {
        Self::new(NodeKind::ModeStrict(Box::new(mode)))
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub const fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Returns `true` if this node renders as the null literal.
    pub const fn is_null_terminal(&self) -> bool {
        self.flags.null_terminal
    }

    pub const fn requires_null_guard(&self) -> bool {
        self.flags.null_guard
    }

    pub const fn is_aggregate(&self) -> bool {
        self.flags.aggregate
    }

    /// Returns `true` if a window function appears anywhere in the tree.
    pub const fn contains_window(&self) -> bool {
        self.flags.window
    }

    /// The direct operands.
    pub fn children(&self) -> Vec<&Self> {
        self.kind.children()
    }

    pub fn referenced_relations(&self) -> RelationSet {
        let mut relations = RelationSet::new();
        self.collect_relations(&mut relations);
        relations
    }

    fn collect_relations(&self, out: &mut RelationSet) {
        if let NodeKind::Column(column) = &self.kind {
            out.insert(column.relation().clone());
        }
        for child in self.kind.children() {
            child.collect_relations(out);
        }
    }

    fn purely_computed(&self) -> bool {
        match &self.kind {
            NodeKind::Column(_) => false,
            kind => kind.children().iter().all(|c| c.purely_computed()),
        }
    }
}

impl NodeKind {
    /// The direct operands, in rendering order.
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Self::Null | Self::Literal(_) | Self::Column(_) => Vec::new(),
            Self::Unary { operand, .. }
            | Self::NullCheck { operand, .. }
            | Self::Cast { operand, .. } => vec![operand.as_ref()],
            Self::Arithmetic { left, right, .. } | Self::Compare { left, right, .. } => {
                vec![left.as_ref(), right.as_ref()]
            }
            Self::Logical { operands, .. } | Self::Concat(operands) => operands.iter().collect(),
            Self::Func { args, .. } | Self::Native { args, .. } => args.iter().collect(),
            Self::InList { operand, list, .. } => {
                std::iter::once(operand.as_ref()).chain(list.iter()).collect()
            }
            Self::Case { whens, default } => whens
                .iter()
                .flat_map(|(when, then)| [when, then])
                .chain(default.as_deref())
                .collect(),
            Self::Fallback {
                native, emulated, ..
            } => vec![native.as_ref(), emulated.as_ref()],
            Self::Aggregate { operand, .. } => operand.as_deref().into_iter().collect(),
            Self::Window(window) => window.children(),
            Self::ModeSimple(mode) => vec![mode.expression()],
            Self::ModeStrict(mode) => vec![mode.expression()],
        }
    }

    /// A short name for diagnostics.
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Literal(_) => "literal",
            Self::Column(_) => "column",
            Self::Unary { .. } => "unary",
            Self::Arithmetic { .. } => "arithmetic",
            Self::Compare { .. } => "comparison",
            Self::Logical { .. } => "logical",
            Self::NullCheck { .. } => "null check",
            Self::InList { .. } => "IN list",
            Self::Func { .. } => "function",
            Self::Cast { .. } => "cast",
            Self::Concat(_) => "concatenation",
            Self::Case { .. } => "CASE",
            Self::Native { .. } => "native",
            Self::Fallback { .. } => "fallback",
            Self::Aggregate { .. } => "aggregate",
            Self::Window(_) => "window",
            Self::ModeSimple(_) => "mode",
            Self::ModeStrict(_) => "strict mode",
        }
    }
}

impl SqlExpression for Node {
    fn node(&self) -> &Node {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::StandardDialect;
    use crate::relation::RelationRef;

    fn std_dialect() -> StandardDialect {
        StandardDialect::new()
    }

    fn col(table: &str, name: &str) -> Node {
        Node::column(ColumnRef::new(RelationRef::new(table), name))
    }

    #[test]
    fn test_literal_none_is_null_terminator() {
        let n = Node::literal(None::<i64>);
        assert!(matches!(n.kind(), NodeKind::Null));
        assert!(n.is_null_terminal());
        assert!(n.requires_null_guard());
    }

    #[test]
    fn test_literal_flags() {
        let n = Node::literal(5_i64);
        assert!(!n.is_null_terminal());
        assert!(!n.requires_null_guard());
        assert!(!n.is_aggregate());
        assert!(n.is_purely_computed());
    }

    #[test]
    fn test_relations_union() {
        let n = Node::arithmetic(
            Family::Integer,
            ArithmeticOp::Add,
            col("a", "x"),
            Node::arithmetic(
                Family::Integer,
                ArithmeticOp::Multiply,
                col("b", "y"),
                col("a", "z"),
            ),
        );
        let names: Vec<String> = n
            .referenced_relations()
            .iter()
            .map(|r| r.name().to_string())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
        assert!(!n.is_purely_computed());
    }

    #[test]
    fn test_literals_have_no_relations() {
        let n = Node::compare(
            Family::Integer,
            CompareOp::Eq,
            Node::literal(1_i64),
            Node::null(),
        );
        assert!(n.referenced_relations().is_empty());
        assert!(n.is_purely_computed());
    }

    #[test]
    fn test_aggregate_flag_propagates_to_parents() {
        let count = Node::aggregate(AggregateFunc::Count, col("t", "x"), false);
        assert!(count.is_aggregate());
        let plus = Node::arithmetic(
            Family::Integer,
            ArithmeticOp::Add,
            count,
            Node::literal(1_i64),
        );
        assert!(plus.is_aggregate());
    }

    #[test]
    fn test_count_all_is_aggregate_without_guard() {
        let n = Node::count_all();
        assert!(n.is_aggregate());
        assert!(!n.requires_null_guard());
        assert_eq!(n.to_sql(&std_dialect()), "COUNT(*)");
    }

    #[test]
    fn test_logical_single_operand_collapses() {
        let n = Node::logical(LogicalOp::And, vec![Node::literal(true)]);
        assert!(matches!(n.kind(), NodeKind::Literal(Value::Bool(true))));
    }

    #[test]
    fn test_clone_renders_identically() {
        let n = Node::case(
            vec![(
                Node::compare(Family::Integer, CompareOp::Gt, col("t", "x"), Node::literal(3_i64)),
                Node::literal("big"),
            )],
            Some(Node::literal("small")),
        );
        let d = std_dialect();
        assert_eq!(n.deep_clone().to_sql(&d), n.to_sql(&d));
    }

    #[test]
    fn test_case_children_order() {
        let n = Node::case(
            vec![(Node::literal(true), Node::literal(1_i64))],
            Some(Node::literal(2_i64)),
        );
        assert_eq!(n.children().len(), 3);
        assert_eq!(n.kind().describe(), "CASE");
    }
}
