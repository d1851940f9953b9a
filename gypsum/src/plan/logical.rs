use std::sync::Arc;

use crate::catalogue::NamedRelation;
use crate::plan::{Plan, PlanNode, PlanNodeRef};
use crate::predicate::Predicate;

/// Builds a plan bottom up, starting from a scan.
///
/// ```
/// # use std::sync::Arc;
/// # use gypsum::catalogue::NamedRelation;
/// # use gypsum::plan::PlanBuilder;
/// # use gypsum::predicate::Predicate;
/// # use gypsum::stat::Relation;
/// let r = Arc::new(NamedRelation::new("R", Relation::new(10)));
/// let s = Arc::new(NamedRelation::new("S", Relation::new(20)));
///
/// let plan = PlanBuilder::scan(r)
///     .product(PlanBuilder::scan(s).build().root())
///     .select(Predicate::attr_eq("a", "b"))
///     .project(vec!["a"])
///     .build();
/// ```
pub struct PlanBuilder {
    root: PlanNodeRef,
}

impl PlanBuilder {
    pub fn scan(relation: Arc<NamedRelation>) -> Self {
        Self::from_node(PlanNode::scan(relation))
    }

    pub fn from_node<P: Into<PlanNodeRef>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn project<I, S>(self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_node(PlanNode::project(self.root, attributes))
    }

    pub fn select(self, predicate: Predicate) -> Self {
        Self::from_node(PlanNode::select(self.root, predicate))
    }

    /// Current plan becomes left input.
    pub fn product<P: Into<PlanNodeRef>>(self, right: P) -> Self {
        Self::from_node(PlanNode::product(self.root, right))
    }

    /// Current plan becomes left input.
    pub fn join<P: Into<PlanNodeRef>>(self, right: P, predicate: Predicate) -> Self {
        Self::from_node(PlanNode::join(self.root, right, predicate))
    }

    pub fn build(self) -> Plan {
        Plan::new(self.root)
    }
}
