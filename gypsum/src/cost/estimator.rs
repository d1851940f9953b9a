use std::sync::Arc;

use log::{trace, warn};

use crate::cost::Cost;
use crate::operator::{Join, Operator, Projection, Select, TableScan};
use crate::plan::{Plan, PlanNode, PlanNodeBuilder, PlanNodeRef};
use crate::predicate::Predicate;
use crate::stat::{Attribute, Relation};

/// Estimates output statistics of every node in a plan, and accumulates their cost.
///
/// Estimation is bottom up: inputs of a node are always estimated before the node itself.
/// Cost of each node is its output tuple count, and cost of scan is tuple count of the base
/// relation it reads.
///
/// Cost keeps accumulating across calls to [`Estimator::estimate`], use a new estimator or
/// [`Estimator::reset`] for unrelated plans.
#[derive(Debug, Default)]
pub struct Estimator {
    cost: Cost,
}

/// Estimates a subtree with a fresh estimator, returning estimated subtree and its cost.
pub fn estimate_cost(node: &PlanNode) -> (PlanNodeRef, Cost) {
    let mut estimator = Estimator::new();
    let estimated = estimator.estimate(node);
    (estimated, estimator.cost())
}

impl Estimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total cost of all nodes estimated so far.
    pub fn cost(&self) -> Cost {
        self.cost
    }

    pub fn reset(&mut self) {
        self.cost = Cost::ZERO;
    }

    pub fn estimate_plan(&mut self, plan: &Plan) -> Plan {
        Plan::new(self.estimate(&plan.root()))
    }

    /// Rebuilds `node` and all its descendants with output statistics attached.
    ///
    /// Statistics already attached to input nodes are ignored and derived again.
    pub fn estimate(&mut self, node: &PlanNode) -> PlanNodeRef {
        self.visit(node).0
    }

    /// Output statistics of `node`, derived the same way as [`Estimator::estimate`].
    pub fn statistics(&mut self, node: &PlanNode) -> Relation {
        self.visit(node).1
    }

    fn visit(&mut self, node: &PlanNode) -> (PlanNodeRef, Relation) {
        let (inputs, input_stats): (Vec<PlanNodeRef>, Vec<Relation>) = node
            .inputs()
            .iter()
            .map(|input| self.visit(input))
            .unzip();

        let stat = self.derive_statistics(
            node.operator(),
            &input_stats.iter().collect::<Vec<&Relation>>(),
        );
        trace!("Estimated {} as {}", node.operator(), stat);

        let estimated = PlanNodeBuilder::new(node.operator())
            .add_inputs(inputs)
            .with_statistics(Some(stat.clone()))
            .build();
        (Arc::new(estimated), stat)
    }

    /// Derives output statistics of one operator from statistics of its inputs, and adds cost of
    /// the operator.
    ///
    /// An operator given the wrong number of inputs outputs an empty relation.
    pub fn derive_statistics(&mut self, operator: &Operator, inputs: &[&Relation]) -> Relation {
        let output = match (operator, inputs) {
            (Operator::Scan(scan), []) => self.scan(scan),
            (Operator::Project(projection), [input]) => self.project(projection, input),
            (Operator::Select(select), [input]) => self.select(select, input),
            (Operator::Product(_), [left, right]) => self.product(left, right),
            (Operator::Join(join), [left, right]) => self.join(join, left, right),
            (operator, inputs) => {
                warn!(
                    "{} requires {} inputs, got {}, estimated as empty.",
                    operator,
                    operator.arity(),
                    inputs.len()
                );
                Relation::empty()
            }
        };

        // An empty relation caused by a missing attribute has no tuples, so it adds nothing.
        self.cost += Cost::from(output.tuple_count());
        output
    }

    fn scan(&self, scan: &TableScan) -> Relation {
        scan.relation().relation().clone()
    }

    /// Attributes not in input are silently dropped.
    fn project(&self, projection: &Projection, input: &Relation) -> Relation {
        Relation::new(input.tuple_count()).with_attributes(
            projection
                .attributes()
                .iter()
                .filter_map(|name| input.attribute(name).ok())
                .cloned(),
        )
    }

    fn select(&self, select: &Select, input: &Relation) -> Relation {
        match select.predicate() {
            Predicate::ValueEq { attribute, .. } => {
                let value_count = match input.attribute(attribute) {
                    Ok(attr) => attr.value_count(),
                    Err(_) => return Relation::empty(),
                };

                let tuple_count = match value_count {
                    0 => 0,
                    v => input.tuple_count() / v,
                };

                Relation::new(tuple_count).with_attributes(Self::derive_attributes(
                    tuple_count,
                    input.attributes(),
                    &[attribute],
                    1,
                ))
            }
            Predicate::AttrEq { left, right } => {
                let (left_count, right_count) =
                    match (input.attribute(left), input.attribute(right)) {
                        (Ok(l), Ok(r)) => (l.value_count(), r.value_count()),
                        _ => return Relation::empty(),
                    };

                let tuple_count = match left_count.max(right_count) {
                    0 => 0,
                    v => input.tuple_count() / v,
                };

                Relation::new(tuple_count).with_attributes(Self::derive_attributes(
                    tuple_count,
                    input.attributes(),
                    &[left, right],
                    left_count.min(right_count),
                ))
            }
        }
    }

    fn product(&self, left: &Relation, right: &Relation) -> Relation {
        Relation::new(left.tuple_count().saturating_mul(right.tuple_count()))
            .with_attributes(left.attributes().iter().cloned())
            .with_attributes(right.attributes().iter().cloned())
    }

    /// Join attributes are looked up in their own side: left attribute of predicate in left
    /// input, and right attribute in right input.
    fn join(&self, join: &Join, left: &Relation, right: &Relation) -> Relation {
        let (left_name, right_name) = match join.predicate() {
            Predicate::AttrEq { left, right } => (left, right),
            Predicate::ValueEq { .. } => return Relation::empty(),
        };

        let (left_count, right_count) =
            match (left.attribute(left_name), right.attribute(right_name)) {
                (Ok(l), Ok(r)) => (l.value_count(), r.value_count()),
                _ => return Relation::empty(),
            };

        let tuple_count = match left_count.max(right_count) {
            0 => 0,
            v => left.tuple_count().saturating_mul(right.tuple_count()) / v,
        };
        let value_count = left_count.min(right_count);

        Relation::new(tuple_count)
            .with_attributes(Self::derive_attributes(
                tuple_count,
                left.attributes(),
                &[left_name],
                value_count,
            ))
            .with_attributes(Self::derive_attributes(
                tuple_count,
                right.attributes(),
                &[right_name],
                value_count,
            ))
    }

    /// Copies `attributes` for an output of `tuple_count` tuples: attributes named in
    /// `predicate_attributes` get `value_count`, others keep theirs. Every count is capped at
    /// `tuple_count`.
    fn derive_attributes<'a>(
        tuple_count: u64,
        attributes: &'a [Attribute],
        predicate_attributes: &'a [&'a String],
        value_count: u64,
    ) -> impl Iterator<Item = Attribute> + 'a {
        attributes.iter().map(move |attr| {
            if predicate_attributes.iter().any(|name| name.as_str() == attr.name()) {
                Attribute::new(attr.name(), value_count.min(tuple_count))
            } else {
                attr.capped(tuple_count)
            }
        })
    }
}
