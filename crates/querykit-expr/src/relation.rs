//! Table and column references.
//!
//! Relations are the leaves that make an expression depend on stored data.
//! They are ordered and hashable so that the relation set of a tree is a
//! plain [`BTreeSet`] with a deterministic iteration order.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// A table reference.
///
/// # Examples
///
/// ```
/// use querykit_expr::relation::RelationRef;
///
/// let marque = RelationRef::new("marque").with_schema("fleet");
/// assert_eq!(marque.name(), "marque");
/// assert_eq!(marque.schema(), Some("fleet"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RelationRef {
    schema: Option<String>,
    name: String,
    alias: Option<String>,
}

impl RelationRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
            alias: None,
        }
    }

    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Returns a copy of this relation referred to by `alias` in queries.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// The name columns of this relation are qualified with: the alias if
    /// one is set, the table name otherwise.
    pub fn reference_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

/// A column of a relation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ColumnRef {
    relation: RelationRef,
    name: String,
}

impl ColumnRef {
    pub fn new(relation: RelationRef, name: impl Into<String>) -> Self {
        Self {
            relation,
            name: name.into(),
        }
    }

    pub const fn relation(&self) -> &RelationRef {
        &self.relation
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// The relations an expression reads from.
pub type RelationSet = BTreeSet<RelationRef>;

/// Maps source relations to the synthetic alias seed they are renamed to
/// inside a generated subquery.
pub type AliasMap = BTreeMap<RelationRef, String>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_name_prefers_alias() {
        let r = RelationRef::new("marque");
        assert_eq!(r.reference_name(), "marque");
        let aliased = r.with_alias("m");
        assert_eq!(aliased.reference_name(), "m");
        assert_eq!(aliased.name(), "marque");
    }

    #[test]
    fn test_relation_ordering_is_deterministic() {
        let mut set = RelationSet::new();
        set.insert(RelationRef::new("b"));
        set.insert(RelationRef::new("a"));
        set.insert(RelationRef::new("a"));
        let names: Vec<&str> = set.iter().map(RelationRef::name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_column_ref() {
        let c = ColumnRef::new(RelationRef::new("marque"), "uid");
        assert_eq!(c.name(), "uid");
        assert_eq!(c.relation().name(), "marque");
    }
}
