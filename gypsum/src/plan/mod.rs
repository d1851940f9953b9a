use std::collections::VecDeque;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

use crate::catalogue::NamedRelation;
use crate::operator::{Join, Operator, Product, Projection, Select, TableScan};
use crate::predicate::Predicate;
use crate::stat::Relation;

pub mod explain;
mod logical;
pub use logical::*;

pub type PlanNodeRef = Arc<PlanNode>;

/// One node in a plan.
///
/// Nodes are immutable and may be shared between plans, e.g. the optimizer reuses subtrees it
/// has already estimated. Estimating a node means building a new node with statistics attached,
/// see [`crate::cost::Estimator`].
#[derive(Debug, PartialEq)]
pub struct PlanNode {
    operator: Operator,
    inputs: Vec<PlanNodeRef>,
    /// Estimated output of this node.
    stat: Option<Relation>,
}

impl PlanNode {
    pub fn scan(relation: Arc<NamedRelation>) -> Self {
        Self::with_inputs(Operator::Scan(TableScan::new(relation)), vec![])
    }

    pub fn project<P, I, S>(input: P, attributes: I) -> Self
    where
        P: Into<PlanNodeRef>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_inputs(
            Operator::Project(Projection::new(attributes)),
            vec![input.into()],
        )
    }

    pub fn select<P: Into<PlanNodeRef>>(input: P, predicate: Predicate) -> Self {
        Self::with_inputs(Operator::Select(Select::new(predicate)), vec![input.into()])
    }

    pub fn product<L, R>(left: L, right: R) -> Self
    where
        L: Into<PlanNodeRef>,
        R: Into<PlanNodeRef>,
    {
        Self::with_inputs(Operator::Product(Product), vec![left.into(), right.into()])
    }

    pub fn join<L, R>(left: L, right: R, predicate: Predicate) -> Self
    where
        L: Into<PlanNodeRef>,
        R: Into<PlanNodeRef>,
    {
        Self::with_inputs(
            Operator::Join(Join::new(predicate)),
            vec![left.into(), right.into()],
        )
    }

    fn with_inputs(operator: Operator, inputs: Vec<PlanNodeRef>) -> Self {
        Self {
            operator,
            inputs,
            stat: None,
        }
    }

    pub fn operator(&self) -> &Operator {
        &self.operator
    }

    pub fn inputs(&self) -> &[PlanNodeRef] {
        &self.inputs
    }

    pub fn stat(&self) -> Option<&Relation> {
        self.stat.as_ref()
    }
}

impl Display for PlanNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.operator)?;
        if let Some(stat) = &self.stat {
            write!(f, " {}", stat)?;
        }
        Ok(())
    }
}

/// Rebuilds a node from an operator and inputs.
///
/// Arity is not checked here, callers are expected to take operator and inputs from an existing
/// node. The estimator outputs an empty relation for a node with wrong number of inputs.
pub struct PlanNodeBuilder {
    plan_node: PlanNode,
}

impl PlanNodeBuilder {
    pub fn new(operator: &Operator) -> Self {
        Self {
            plan_node: PlanNode::with_inputs(operator.clone(), vec![]),
        }
    }

    pub fn add_inputs<I>(mut self, inputs: I) -> Self
    where
        I: IntoIterator<Item = PlanNodeRef>,
    {
        self.plan_node.inputs.extend(inputs);
        self
    }

    pub fn with_statistics(mut self, stat: Option<Relation>) -> Self {
        self.plan_node.stat = stat;
        self
    }

    pub fn build(self) -> PlanNode {
        self.plan_node
    }
}

/// A query plan.
///
/// A query plan is a tree of [`PlanNode`]s, used as both input and output of optimizer.
#[derive(PartialEq, Debug, Clone)]
pub struct Plan {
    root: PlanNodeRef,
}

/// Breath first iterator of a plan tree.
struct BFSPlanNodeIter {
    queue: VecDeque<PlanNodeRef>,
}

impl Iterator for BFSPlanNodeIter {
    type Item = PlanNodeRef;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        self.queue.extend(node.inputs.iter().cloned());
        Some(node)
    }
}

impl Plan {
    pub fn new(root: PlanNodeRef) -> Self {
        Self { root }
    }

    pub fn root(&self) -> PlanNodeRef {
        self.root.clone()
    }

    /// Output statistics of plan, present after estimation.
    pub fn stat(&self) -> Option<&Relation> {
        self.root.stat()
    }

    pub fn bfs_iterator(&self) -> impl Iterator<Item = PlanNodeRef> {
        BFSPlanNodeIter {
            queue: VecDeque::from(vec![self.root.clone()]),
        }
    }
}

impl From<PlanNode> for Plan {
    fn from(root: PlanNode) -> Self {
        Self::new(Arc::new(root))
    }
}
