//! Sort keys.

use crate::kind::Kind;
use crate::node::Node;
use crate::render::RenderContext;
use crate::typed::Expr;

/// One `ORDER BY` entry.
#[derive(Debug, Clone)]
pub struct SortKey {
    node: Node,
    descending: bool,
}

impl SortKey {
    pub fn ascending(node: impl Into<Node>) -> Self {
        Self {
            node: node.into(),
            descending: false,
        }
    }

    pub fn descending(node: impl Into<Node>) -> Self {
        Self {
            node: node.into(),
            descending: true,
        }
    }

    pub const fn node(&self) -> &Node {
        &self.node
    }

    pub const fn is_descending(&self) -> bool {
        self.descending
    }

    pub fn render(&self, ctx: &RenderContext<'_>) -> String {
        ctx.dialect()
            .sort_key(&self.node.render(ctx), self.descending)
    }
}

impl<K: Kind> From<Expr<K>> for SortKey {
    fn from(expr: Expr<K>) -> Self {
        Self::ascending(expr)
    }
}

impl From<Node> for SortKey {
    fn from(node: Node) -> Self {
        Self::ascending(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::StandardDialect;
    use crate::kind::Integer;
    use crate::relation::RelationRef;

    #[test]
    fn test_sort_key_rendering() {
        let d = StandardDialect::new();
        let ctx = RenderContext::new(&d);
        let price = Expr::<Integer>::column(&RelationRef::new("t"), "price");
        assert_eq!(SortKey::from(price.clone()).render(&ctx), "\"t\".\"price\" ASC");
        assert_eq!(price.descending().render(&ctx), "\"t\".\"price\" DESC");
    }
}
