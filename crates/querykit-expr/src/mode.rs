//! The mode compiler.
//!
//! No SQL engine has a portable "most frequent value" aggregate, so the
//! mode of an expression is compiled into scalar subqueries over fresh,
//! privately aliased copies of the relations the expression reads.
//!
//! - [`ModeSimple`]: the top value by frequency. When several values share
//!   the highest frequency, which one is returned depends on the engine.
//! - [`ModeStrict`]: the top value only when it is unique. Subquery A takes
//!   the most frequent (value, frequency) pair, subquery B the runner-up,
//!   and the result is null when both frequencies are equal. An empty
//!   relation gives null as well.
//!
//! Alias seeds are assigned when the node is built, from a process-wide
//! counter, and are stored in the node; rendering only formats them.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use querykit_core::{QueryKitError, QueryKitResult};

use crate::aggregate::AggregateFunc;
use crate::kind::{EqualityComparable, Family};
use crate::node::{Node, SqlExpression};
use crate::render::RenderContext;
use crate::sort::SortKey;
use crate::subquery::{AliasedRelation, Projection, SelectSubqueryBuilder, SubqueryBuilder, SubquerySpec};
use crate::typed::Expr;

static NEXT_MODE_ID: AtomicU64 = AtomicU64::new(1);

/// Output column of the value in the strict-mode subqueries.
pub const MODE_VALUE_COLUMN: &str = "mode_value";
/// Output column of the frequency in the strict-mode subqueries.
pub const MODE_FREQUENCY_COLUMN: &str = "mode_frequency";

fn next_mode_id() -> u64 {
    NEXT_MODE_ID.fetch_add(1, Ordering::Relaxed)
}

/// Rejects expressions that cannot be grouped on: aggregates, window
/// functions, and expressions that read no relation.
pub(crate) fn ensure_groupable(node: &Node, family: Family, operation: &str) -> QueryKitResult<()> {
    let kind = if node.is_aggregate() {
        format!("aggregate {family}")
    } else if node.contains_window() {
        format!("window {family}")
    } else if node.referenced_relations().is_empty() {
        format!("relation-free {family}")
    } else {
        return Ok(());
    };
    tracing::debug!(%kind, operation, "refusing conversion");
    Err(QueryKitError::unsupported(kind, operation))
}

/// Fresh copies of the relations `node` reads, seeded `mode<id>_<role><n>`.
fn aliased_relations(node: &Node, id: u64, role: &str) -> Vec<AliasedRelation> {
    node.referenced_relations()
        .into_iter()
        .enumerate()
        .map(|(index, relation)| AliasedRelation {
            relation,
            seed: format!("mode{id}_{role}{index}"),
        })
        .collect()
}

fn frequency(node: &Node) -> Node {
    Node::aggregate(AggregateFunc::Count, node.clone(), false)
}

/// A grouped, frequency-ordered, single-row subquery over fresh relations.
fn ranked_spec(node: &Node, id: u64, role: &str) -> SubquerySpec {
    let mut spec = SubquerySpec::over(aliased_relations(node, id, role));
    spec.group_by.push(node.clone());
    spec.order_by.push(SortKey::descending(frequency(node)));
    spec
}

/// The most frequent value, ties broken by the engine.
#[derive(Debug, Clone)]
pub struct ModeSimple {
    expression: Node,
    subquery: SubquerySpec,
    builder: Arc<dyn SubqueryBuilder>,
}

impl ModeSimple {
    fn new(expression: Node, builder: Arc<dyn SubqueryBuilder>) -> Self {
        let id = next_mode_id();
        let mut subquery = ranked_spec(&expression, id, "s");
        subquery.projection.push(Projection::unnamed(expression.clone()));
        tracing::debug!(id, relations = subquery.relations.len(), "compiled mode_simple");
        Self {
            expression,
            subquery,
            builder,
        }
    }

    /// The expression whose mode is computed.
    pub const fn expression(&self) -> &Node {
        &self.expression
    }

    pub const fn subquery(&self) -> &SubquerySpec {
        &self.subquery
    }

    pub fn render(&self, ctx: &RenderContext<'_>) -> String {
        format!("({})", self.builder.build(&self.subquery, ctx))
    }
}

/// The most frequent value if it is unique, null otherwise.
#[derive(Debug, Clone)]
pub struct ModeStrict {
    expression: Node,
    first: SubquerySpec,
    second: SubquerySpec,
    first_seed: String,
    second_seed: String,
    builder: Arc<dyn SubqueryBuilder>,
}

impl ModeStrict {
    fn new(expression: Node, builder: Arc<dyn SubqueryBuilder>) -> Self {
        let id = next_mode_id();
        let ranked = |role: &str| {
            let mut spec = ranked_spec(&expression, id, role);
            spec.projection = vec![
                Projection::named(expression.clone(), MODE_VALUE_COLUMN),
                Projection::named(frequency(&expression), MODE_FREQUENCY_COLUMN),
            ];
            spec
        };
        let first = ranked("a");
        let mut second = ranked("b");
        second.offset = Some(1);
        tracing::debug!(id, relations = first.relations.len(), "compiled mode_strict");
        Self {
            first,
            second,
            first_seed: format!("mode{id}_a"),
            second_seed: format!("mode{id}_b"),
            expression,
            builder,
        }
    }

    /// The expression whose mode is computed.
    pub const fn expression(&self) -> &Node {
        &self.expression
    }

    /// The subqueries for the most frequent and the runner-up value.
    pub const fn subqueries(&self) -> (&SubquerySpec, &SubquerySpec) {
        (&self.first, &self.second)
    }

    pub fn render(&self, ctx: &RenderContext<'_>) -> String {
        let d = ctx.dialect();
        let a = d.quote_identifier(&d.derived_table_alias(&self.first_seed));
        let b = d.quote_identifier(&d.derived_table_alias(&self.second_seed));
        let value = d.quote_identifier(MODE_VALUE_COLUMN);
        let freq = d.quote_identifier(MODE_FREQUENCY_COLUMN);
        format!(
            "(SELECT CASE WHEN {a}.{freq} = {b}.{freq} THEN {null} ELSE {a}.{value} END \
             FROM ({first}) AS {a} LEFT JOIN ({second}) AS {b} ON 1 = 1)",
            null = d.null_literal(),
            first = self.builder.build(&self.first, ctx),
            second = self.builder.build(&self.second, ctx),
        )
    }
}

impl<K: EqualityComparable> Expr<K> {
    /// The most frequent value. Ties are broken by the engine.
    pub fn mode_simple(&self) -> QueryKitResult<Self> {
        self.mode_simple_with(Arc::new(SelectSubqueryBuilder))
    }

    pub fn mode_simple_with(&self, builder: Arc<dyn SubqueryBuilder>) -> QueryKitResult<Self> {
        ensure_groupable(self.node(), K::FAMILY, "mode_simple")?;
        Ok(Self::from_node(Node::mode_simple(ModeSimple::new(
            self.node().clone(),
            builder,
        ))))
    }

    /// The most frequent value, or null when the top frequency is shared.
    pub fn mode_strict(&self) -> QueryKitResult<Self> {
        self.mode_strict_with(Arc::new(SelectSubqueryBuilder))
    }

    pub fn mode_strict_with(&self, builder: Arc<dyn SubqueryBuilder>) -> QueryKitResult<Self> {
        ensure_groupable(self.node(), K::FAMILY, "mode_strict")?;
        Ok(Self::from_node(Node::mode_strict(ModeStrict::new(
            self.node().clone(),
            builder,
        ))))
    }
}
