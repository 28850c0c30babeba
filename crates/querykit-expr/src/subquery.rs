//! Subquery construction for the mode compiler.
//!
//! The mode compiler decides what a subquery selects, groups and orders by;
//! a [`SubqueryBuilder`] decides how that is laid out as text. The default
//! [`SelectSubqueryBuilder`] writes a plain `SELECT`.

use std::fmt;

use crate::node::Node;
use crate::relation::{AliasMap, RelationRef};
use crate::render::RenderContext;
use crate::sort::SortKey;

/// A relation copy and the seed of its synthetic alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasedRelation {
    pub relation: RelationRef,
    pub seed: String,
}

/// One selected expression.
#[derive(Debug, Clone)]
pub struct Projection {
    pub node: Node,
    /// The output column name, if the outer query refers to it.
    pub name: Option<String>,
}

impl Projection {
    pub const fn unnamed(node: Node) -> Self {
        Self { node, name: None }
    }

    pub fn named(node: Node, name: impl Into<String>) -> Self {
        Self {
            node,
            name: Some(name.into()),
        }
    }
}

/// Everything needed to write one subquery.
#[derive(Debug, Clone)]
pub struct SubquerySpec {
    pub relations: Vec<AliasedRelation>,
    /// Relation to alias seed, for qualifying columns inside the subquery.
    pub aliases: AliasMap,
    pub projection: Vec<Projection>,
    pub group_by: Vec<Node>,
    pub order_by: Vec<SortKey>,
    pub limit: u64,
    pub offset: Option<u64>,
}

impl SubquerySpec {
    /// A spec over `relations`, each read through its own alias.
    pub fn over(relations: Vec<AliasedRelation>) -> Self {
        let aliases = relations
            .iter()
            .map(|r| (r.relation.clone(), r.seed.clone()))
            .collect();
        Self {
            relations,
            aliases,
            projection: Vec::new(),
            group_by: Vec::new(),
            order_by: Vec::new(),
            limit: 1,
            offset: None,
        }
    }
}

/// Writes subquery text.
///
/// Implementations must be pure: the same spec and context always produce
/// the same text.
pub trait SubqueryBuilder: fmt::Debug + Send + Sync {
    fn build(&self, spec: &SubquerySpec, ctx: &RenderContext<'_>) -> String;
}

/// `SELECT .. FROM .. GROUP BY .. ORDER BY .. LIMIT ..`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectSubqueryBuilder;

impl SubqueryBuilder for SelectSubqueryBuilder {
    fn build(&self, spec: &SubquerySpec, ctx: &RenderContext<'_>) -> String {
        let inner = ctx.with_aliases(&spec.aliases);
        let d = ctx.dialect();

        let projection: Vec<String> = spec
            .projection
            .iter()
            .map(|p| match &p.name {
                Some(name) => format!("{} AS {}", p.node.render(&inner), d.quote_identifier(name)),
                None => p.node.render(&inner),
            })
            .collect();
        let from: Vec<String> = spec
            .relations
            .iter()
            .map(|r| ctx.from_item(&r.relation, &r.seed))
            .collect();

        let mut sql = format!("SELECT {} FROM {}", projection.join(", "), from.join(", "));
        if !spec.group_by.is_empty() {
            let keys: Vec<String> = spec.group_by.iter().map(|n| n.render(&inner)).collect();
            sql.push_str(" GROUP BY ");
            sql.push_str(&keys.join(", "));
        }
        if !spec.order_by.is_empty() {
            let keys: Vec<String> = spec.order_by.iter().map(|k| k.render(&inner)).collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&keys.join(", "));
        }
        sql.push(' ');
        sql.push_str(&d.limit_clause(spec.limit, spec.offset));
        sql
    }
}
