use std::sync::Arc;

use itertools::Itertools;
use log::{debug, warn};

use crate::catalogue::NamedRelation;
use crate::cost::{estimate_cost, Estimator};
use crate::heuristic::{Candidate, OptimizerState};
use crate::operator::Operator;
use crate::optimizer::{Optimizer, OptimizerContext};
use crate::plan::{Plan, PlanNode, PlanNodeRef};
use crate::predicate::Predicate;
use crate::stat::Relation;

/// Optimizer pushing selections and projections down, and turning products into joins.
///
/// The optimizer holds no state between calls, one instance can be shared by many threads.
#[derive(Clone, Default)]
pub struct HeuristicOptimizer {
    context: OptimizerContext,
}

impl Optimizer for HeuristicOptimizer {
    fn context(&self) -> &OptimizerContext {
        &self.context
    }

    fn optimize(&self, plan: &Plan) -> Plan {
        let root = plan.root();
        let output = output_statistics(&root);
        let mut state = OptimizerState::collect(&root, output.attribute_names());
        debug!(
            "Optimizing plan with relations [{}], predicates [{}], output [{}]",
            state.scans().iter().map(|r| r.name()).join(", "),
            state.pending_predicates().iter().join(", "),
            state.final_attributes().iter().join(", ")
        );

        let candidates = self.push_down_to_scans(&mut state);
        let root = match Self::connect(Self::reorder(candidates)) {
            Some(root) => self.introduce_joins(&mut state, &root),
            None => {
                warn!("No relation contributes to plan output, plan left unchanged.");
                return Estimator::new().estimate_plan(plan);
            }
        };

        let root = state
            .take_remaining()
            .into_iter()
            .fold(root, |node, predicate| {
                warn!("Predicate {} can't be pushed down, applied on top.", predicate);
                Arc::new(PlanNode::select(node, predicate))
            });

        Estimator::new().estimate_plan(&Plan::new(root))
    }
}

impl HeuristicOptimizer {
    pub fn new(context: OptimizerContext) -> Self {
        Self { context }
    }

    /// Builds a candidate subtree for every scanned relation. Relations with no attribute needed
    /// above their subtree are dropped.
    fn push_down_to_scans(&self, state: &mut OptimizerState) -> Vec<Candidate> {
        let scans = state.scans().to_vec();
        scans
            .iter()
            .filter_map(|relation| Self::push_down_to_scan(state, relation))
            .collect()
    }

    fn push_down_to_scan(
        state: &mut OptimizerState,
        relation: &Arc<NamedRelation>,
    ) -> Option<Candidate> {
        let stat = relation.relation();
        let mut subtree = PlanNode::scan(relation.clone());

        for predicate in state.take_predicates(stat) {
            debug!("Pushing {} down to scan of {}", predicate, relation.name());
            subtree = PlanNode::select(subtree, predicate);
        }

        let kept = state.kept_attributes(stat);
        if kept.is_empty() {
            debug!("No attribute of {} is needed, relation dropped.", relation.name());
            return None;
        }
        if kept.len() < stat.attributes().len() {
            subtree = PlanNode::project(subtree, kept);
        }

        let (subtree, cost) = estimate_cost(&subtree);
        debug!("Subtree of {} costs {}", relation.name(), cost);
        Some(Candidate { subtree, cost })
    }

    /// Cheapest first. Candidates of same cost keep their scan order.
    fn reorder(mut candidates: Vec<Candidate>) -> Vec<Candidate> {
        candidates.sort_by_key(|c| c.cost);
        candidates
    }

    /// Connects candidates with a left deep tree of products, first candidate at the bottom.
    ///
    /// A single candidate is returned as is.
    fn connect(candidates: Vec<Candidate>) -> Option<PlanNodeRef> {
        let single = candidates.len() == 1;
        let root = candidates
            .into_iter()
            .map(|c| c.subtree)
            .reduce(|left, right| Arc::new(PlanNode::product(left, right)))?;

        if single {
            Some(root)
        } else {
            Some(Estimator::new().estimate(&root))
        }
    }

    /// Replaces products with joins, bottom up along the left spine of the tree.
    ///
    /// At each product, pending predicates covered by its output are applied: the first equality
    /// of attributes turns the product into a join, the rest become selections above it. Then
    /// attributes no longer needed are projected away.
    fn introduce_joins(&self, state: &mut OptimizerState, node: &PlanNodeRef) -> PlanNodeRef {
        let (left, right) = match (node.operator(), node.inputs()) {
            (Operator::Product(_), [left, right]) => (left, right),
            _ => return node.clone(),
        };

        let output = output_statistics(node);
        let left = self.introduce_joins(state, left);
        let mut root = Arc::new(PlanNode::product(left.clone(), right.clone()));

        for predicate in state.take_predicates(&output) {
            let joinable =
                matches!(root.operator(), Operator::Product(_)) && !predicate.is_value_equality();
            root = if joinable {
                let predicate = Self::orient(predicate, &left, right);
                debug!("Replacing product with join on {}", predicate);
                Arc::new(PlanNode::join(left.clone(), right.clone(), predicate))
            } else {
                debug!("Applying {} above {}", predicate, root.operator());
                Arc::new(PlanNode::select(root, predicate))
            };
        }

        let kept = state.kept_attributes(&output);
        if kept.len() < output.attributes().len() {
            root = Arc::new(PlanNode::project(root, kept));
        }
        root
    }

    /// Swaps sides of `predicate` unless its left attribute comes from `left` and right attribute
    /// from `right`.
    fn orient(predicate: Predicate, left: &PlanNode, right: &PlanNode) -> Predicate {
        let (left, right) = (output_statistics(left), output_statistics(right));
        let matched = left.contains(predicate.left_attribute())
            && predicate
                .right_attribute()
                .map_or(false, |name| right.contains(name));

        if matched {
            predicate
        } else {
            predicate.swapped()
        }
    }
}

/// Statistics attached to `node`, or estimated if there is none.
fn output_statistics(node: &PlanNode) -> Relation {
    match node.stat() {
        Some(stat) => stat.clone(),
        None => Estimator::new().statistics(node),
    }
}
