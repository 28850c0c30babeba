//! Rendering expression trees to SQL text.
//!
//! Rendering walks the tree once, asking the dialect for every spelling.
//! The null guard is consulted before a node's own rendering.

use std::fmt;

use crate::dialect::Dialect;
use crate::fallback::{self, Capability};
use crate::node::{Node, NodeKind};
use crate::null_guard;
use crate::ops::{CastTarget, CompareOp, LogicalOp, NativeOp, UnaryOp};
use crate::relation::{AliasMap, ColumnRef, RelationRef};
use crate::value::Value;

/// Everything a node needs while rendering.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    dialect: &'a dyn Dialect,
    aliases: Option<&'a AliasMap>,
}

impl fmt::Debug for RenderContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderContext")
            .field("dialect", &self.dialect.name())
            .field("aliases", &self.aliases)
            .finish()
    }
}

impl<'a> RenderContext<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self {
            dialect,
            aliases: None,
        }
    }

    /// A context in which columns of the mapped relations are qualified
    /// with their synthetic alias instead of their own name.
    #[must_use]
    pub fn with_aliases(&self, aliases: &'a AliasMap) -> Self {
        Self {
            dialect: self.dialect,
            aliases: Some(aliases),
        }
    }

    pub fn dialect(&self) -> &'a dyn Dialect {
        self.dialect
    }

    /// The quoted name a column of `relation` is qualified with.
    pub fn qualifier(&self, relation: &RelationRef) -> String {
        match self.aliases.and_then(|m| m.get(relation)) {
            Some(seed) => self
                .dialect
                .quote_identifier(&self.dialect.derived_table_alias(seed)),
            None => self.dialect.quote_identifier(relation.reference_name()),
        }
    }

    /// The quoted, qualified name of a column.
    pub fn column(&self, column: &ColumnRef) -> String {
        format!(
            "{}.{}",
            self.qualifier(column.relation()),
            self.dialect.quote_identifier(column.name())
        )
    }

    /// A relation as it appears in a FROM clause, renamed to the alias
    /// formatted from `seed`.
    pub fn from_item(&self, relation: &RelationRef, seed: &str) -> String {
        let d = self.dialect;
        let table = match relation.schema() {
            Some(schema) => format!(
                "{}.{}",
                d.quote_identifier(schema),
                d.quote_identifier(relation.name())
            ),
            None => d.quote_identifier(relation.name()),
        };
        format!(
            "{table} AS {}",
            d.quote_identifier(&d.derived_table_alias(seed))
        )
    }
}

impl Node {
    /// Renders this node and its operands.
    pub fn render(&self, ctx: &RenderContext<'_>) -> String {
        if let Some(guarded) = null_guard::short_circuit(self, ctx) {
            return guarded;
        }
        let d = ctx.dialect();
        let all = |nodes: &[Self]| -> Vec<String> { nodes.iter().map(|n| n.render(ctx)).collect() };

        match self.kind() {
            NodeKind::Null => d.null_literal().to_string(),
            NodeKind::Literal(value) => render_literal(ctx, value),
            NodeKind::Column(column) => ctx.column(column),
            NodeKind::Unary { op, operand } => {
                let inner = operand.render(ctx);
                match op {
                    UnaryOp::Not => format!("(NOT {inner})"),
                    UnaryOp::Negate => format!("(-{inner})"),
                }
            }
            NodeKind::Arithmetic {
                family,
                op,
                left,
                right,
            } => d.arithmetic(*family, *op, &left.render(ctx), &right.render(ctx)),
            NodeKind::Compare {
                family,
                op,
                left,
                right,
            } => {
                let (l, r) = (left.render(ctx), right.render(ctx));
                match op {
                    CompareOp::Like => d.text_like(&l, &r),
                    _ => d.comparison(*family, *op, &l, &r),
                }
            }
            NodeKind::Logical { op, operands } => {
                if operands.is_empty() {
                    return match op {
                        LogicalOp::And => d.true_literal().to_string(),
                        LogicalOp::Or => d.false_literal().to_string(),
                    };
                }
                let sep = format!(" {} ", op.sql_keyword());
                format!("({})", all(operands).join(&sep))
            }
            NodeKind::NullCheck { negated, operand } => {
                let inner = operand.render(ctx);
                if *negated {
                    d.not_null_check(&inner)
                } else {
                    d.null_check(&inner)
                }
            }
            NodeKind::InList {
                negated,
                operand,
                list,
            } => {
                let keyword = if *negated { "NOT IN" } else { "IN" };
                format!(
                    "({} {keyword} ({}))",
                    operand.render(ctx),
                    all(list).join(", ")
                )
            }
            NodeKind::Func { func, args } => d.scalar_call(*func, &all(args)),
            NodeKind::Cast { target, operand } => {
                let inner = operand.render(ctx);
                match target {
                    CastTarget::Text => d.cast_to_text(&inner),
                    CastTarget::Integer => d.cast_to_integer(&inner),
                    CastTarget::Real => d.cast_to_real(&inner),
                }
            }
            NodeKind::Concat(parts) => d.concat(&all(parts)),
            NodeKind::Case { whens, default } => {
                let mut sql = String::from("CASE");
                for (when, then) in whens {
                    sql.push_str(" WHEN ");
                    sql.push_str(&when.render(ctx));
                    sql.push_str(" THEN ");
                    sql.push_str(&then.render(ctx));
                }
                if let Some(default) = default {
                    sql.push_str(" ELSE ");
                    sql.push_str(&default.render(ctx));
                }
                sql.push_str(" END");
                sql
            }
            NodeKind::Native { op, args } => render_native(ctx, *op, &all(args)),
            NodeKind::Fallback {
                capability,
                native,
                emulated,
            } => fallback::choose(ctx, *capability, native, emulated).render(ctx),
            NodeKind::Aggregate {
                func,
                operand,
                distinct,
            } => match operand {
                None => format!("{}(*)", d.count_function()),
                Some(operand) => {
                    let distinct = if *distinct { "DISTINCT " } else { "" };
                    format!(
                        "{}({distinct}{})",
                        d.aggregate_function(*func),
                        operand.render(ctx)
                    )
                }
            },
            NodeKind::Window(window) => window.render(ctx),
            NodeKind::ModeSimple(mode) => mode.render(ctx),
            NodeKind::ModeStrict(mode) => mode.render(ctx),
        }
    }
}

fn render_literal(ctx: &RenderContext<'_>, value: &Value) -> String {
    let d = ctx.dialect();
    match value {
        Value::Period(period) => fallback::choose_text(
            ctx,
            Capability::NativeDuration,
            || d.duration_literal(period),
            || d.format_literal(value),
        ),
        Value::Point(point) => fallback::choose_text(
            ctx,
            Capability::NativeSpatial,
            || d.point_literal(point),
            || d.format_literal(value),
        ),
        _ => d.format_literal(value),
    }
}

fn render_native(ctx: &RenderContext<'_>, op: NativeOp, args: &[String]) -> String {
    let d = ctx.dialect();
    let arg = |i: usize| args.get(i).map_or_else(|| d.null_literal(), String::as_str);
    match op {
        NativeOp::DatePart(part) => d.date_part(part, arg(0)),
        NativeOp::FormatDateTime => d.format_datetime(arg(0)),
        NativeOp::PeriodField(field) => d.duration_part(field, arg(0)),
        NativeOp::PeriodCompare(cmp) => d.duration_comparison(cmp, arg(0), arg(1)),
        NativeOp::PointX => d.point_x(arg(0)),
        NativeOp::PointY => d.point_y(arg(0)),
        NativeOp::PointEquals => d.point_equals(arg(0), arg(1)),
        NativeOp::LikeIgnoreCase => d.like_ignore_case(arg(0), arg(1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::StandardDialect;
    use crate::kind::Family;
    use crate::node::SqlExpression;
    use crate::ops::{ArithmeticOp, ScalarFunction};
    use crate::period::Period;

    fn std_dialect() -> StandardDialect {
        StandardDialect::new()
    }

    fn col(table: &str, name: &str) -> Node {
        Node::column(ColumnRef::new(RelationRef::new(table), name))
    }

    #[test]
    fn test_column_uses_alias_of_relation() {
        let rel = RelationRef::new("marque").with_alias("m");
        let n = Node::column(ColumnRef::new(rel, "uid"));
        assert_eq!(n.to_sql(&std_dialect()), "\"m\".\"uid\"");
    }

    #[test]
    fn test_alias_map_overrides_qualifier() {
        let rel = RelationRef::new("marque");
        let mut aliases = AliasMap::new();
        aliases.insert(rel.clone(), "mode7_s0".to_string());
        let d = std_dialect();
        let ctx = RenderContext::new(&d).with_aliases(&aliases);
        let n = Node::column(ColumnRef::new(rel, "uid"));
        assert_eq!(n.render(&ctx), "\"qk_mode7_s0\".\"uid\"");
    }

    #[test]
    fn test_from_item_with_schema() {
        let d = std_dialect();
        let ctx = RenderContext::new(&d);
        let rel = RelationRef::new("marque").with_schema("fleet");
        assert_eq!(
            ctx.from_item(&rel, "mode1_a0"),
            "\"fleet\".\"marque\" AS \"qk_mode1_a0\""
        );
    }

    #[test]
    fn test_arithmetic_and_unary() {
        let n = Node::unary(
            UnaryOp::Negate,
            Node::arithmetic(
                Family::Integer,
                ArithmeticOp::Add,
                col("t", "a"),
                Node::literal(2_i64),
            ),
        );
        assert_eq!(n.to_sql(&std_dialect()), "(-(\"t\".\"a\" + 2))");
    }

    #[test]
    fn test_empty_logical() {
        let and = Node::logical(LogicalOp::And, Vec::new());
        let or = Node::logical(LogicalOp::Or, Vec::new());
        assert_eq!(and.to_sql(&std_dialect()), "TRUE");
        assert_eq!(or.to_sql(&std_dialect()), "FALSE");
    }

    #[test]
    fn test_in_list() {
        let n = Node::in_list(
            col("t", "a"),
            vec![Node::literal(1_i64), Node::literal(2_i64)],
            true,
        );
        assert_eq!(n.to_sql(&std_dialect()), "(\"t\".\"a\" NOT IN (1, 2))");
    }

    #[test]
    fn test_case_rendering() {
        let n = Node::case(
            vec![(Node::literal(true), Node::literal("y"))],
            Some(Node::literal("n")),
        );
        assert_eq!(n.to_sql(&std_dialect()), "CASE WHEN TRUE THEN 'y' ELSE 'n' END");
    }

    #[test]
    fn test_distinct_aggregate() {
        let n = Node::aggregate(crate::aggregate::AggregateFunc::Count, col("t", "a"), true);
        assert_eq!(n.to_sql(&std_dialect()), "COUNT(DISTINCT \"t\".\"a\")");
    }

    #[test]
    fn test_period_literal_native_and_emulated() {
        let n = Node::literal(Period::days(3));
        let native = std_dialect();
        assert_eq!(
            n.to_sql(&native),
            "(INTERVAL '0-0' YEAR TO MONTH + INTERVAL '3 0:0:0' DAY TO SECOND)"
        );
        let emulated = std_dialect().with_capability(Capability::NativeDuration, false);
        assert_eq!(n.to_sql(&emulated), "'P0Y0M3D0h0n0s'");
    }

    #[test]
    fn test_function_call() {
        let n = Node::func(ScalarFunction::Upper, vec![col("t", "name")]);
        assert_eq!(n.to_sql(&std_dialect()), "UPPER(\"t\".\"name\")");
    }
}
