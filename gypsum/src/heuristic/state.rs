use std::sync::Arc;

use itertools::Itertools;

use crate::catalogue::NamedRelation;
use crate::cost::Cost;
use crate::operator::Operator;
use crate::plan::{PlanNode, PlanNodeRef};
use crate::predicate::Predicate;
use crate::stat::Relation;

/// Subtree built for one base relation, with its estimated cost.
#[derive(Clone, Debug)]
pub struct Candidate {
    pub subtree: PlanNodeRef,
    pub cost: Cost,
}

/// Working state of one optimization.
///
/// Predicates are kept in the order they are first met in the original plan, so the same plan
/// is always rewritten the same way.
#[derive(Debug, Default)]
pub struct OptimizerState {
    /// Base relations scanned by original plan, in scan order.
    scans: Vec<Arc<NamedRelation>>,
    /// Predicates not placed in the new plan yet.
    predicates: Vec<Predicate>,
    /// Attributes in output of original plan.
    final_attributes: Vec<String>,
}

impl OptimizerState {
    /// Collects scans and predicates of `root`, which outputs `final_attributes`.
    pub fn collect<I, S>(root: &PlanNode, final_attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut state = Self {
            final_attributes: final_attributes.into_iter().map(Into::into).collect(),
            ..Default::default()
        };
        state.visit(root);
        state
    }

    fn visit(&mut self, node: &PlanNode) {
        for input in node.inputs() {
            self.visit(input);
        }

        match node.operator() {
            Operator::Scan(scan) => self.scans.push(scan.relation().clone()),
            Operator::Select(select) => {
                if !self.predicates.contains(select.predicate()) {
                    self.predicates.push(select.predicate().clone());
                }
            }
            Operator::Project(_) | Operator::Product(_) | Operator::Join(_) => {}
        }
    }

    pub fn scans(&self) -> &[Arc<NamedRelation>] {
        &self.scans
    }

    pub fn final_attributes(&self) -> &[String] {
        &self.final_attributes
    }

    pub fn pending_predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Attributes referred by pending predicates.
    pub fn predicate_attributes(&self) -> impl Iterator<Item = &str> {
        self.predicates
            .iter()
            .flat_map(|p| p.attributes())
            .unique()
    }

    /// Removes and returns pending predicates whose attributes are all in `relation`.
    pub fn take_predicates(&mut self, relation: &Relation) -> Vec<Predicate> {
        let (taken, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.predicates)
            .into_iter()
            .partition(|p| p.contained_in(relation));
        self.predicates = pending;
        taken
    }

    /// Removes and returns all pending predicates.
    pub fn take_remaining(&mut self) -> Vec<Predicate> {
        std::mem::take(&mut self.predicates)
    }

    /// Attributes of `relation` still needed above it: those in final output, and those referred
    /// by pending predicates. They are returned in the order of `relation`.
    pub fn kept_attributes(&self, relation: &Relation) -> Vec<String> {
        relation
            .attribute_names()
            .filter(|name| {
                self.final_attributes.iter().any(|a| a.as_str() == *name)
                    || self.predicate_attributes().any(|a| a == *name)
            })
            .unique()
            .map(String::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::PlanBuilder;
    use crate::stat::Attribute;
    use crate::test_utils::catalogue_for_test;
    use maplit::hashmap;

    fn state() -> OptimizerState {
        let catalogue = catalogue_for_test(hashmap! {
            "R" => (10, vec![("a", 10), ("b", 5)]),
            "S" => (20, vec![("c", 20), ("d", 2)]),
        });

        let plan = PlanBuilder::scan(catalogue.relation("R").unwrap())
            .product(catalogue.scan("S").unwrap())
            .select(Predicate::attr_eq("a", "c"))
            .select(Predicate::value_eq("b", "x"))
            .select(Predicate::attr_eq("a", "c"))
            .project(vec!["d"])
            .build();

        OptimizerState::collect(&plan.root(), vec!["d"])
    }

    #[test]
    fn test_collect() {
        let state = state();

        assert_eq!(
            vec!["R", "S"],
            state.scans().iter().map(|r| r.name()).collect::<Vec<_>>()
        );
        assert_eq!(
            &[Predicate::attr_eq("a", "c"), Predicate::value_eq("b", "x")],
            state.pending_predicates()
        );
        assert_eq!(
            vec!["a", "c", "b"],
            state.predicate_attributes().collect::<Vec<_>>()
        );
        assert_eq!(&["d".to_string()], state.final_attributes());
    }

    #[test]
    fn test_take_predicates() {
        let mut state = state();
        let relation = Relation::new(10)
            .with_attribute(Attribute::new("a", 10))
            .with_attribute(Attribute::new("b", 5));

        assert_eq!(
            vec![Predicate::value_eq("b", "x")],
            state.take_predicates(&relation)
        );
        assert_eq!(&[Predicate::attr_eq("a", "c")], state.pending_predicates());
        assert!(state.take_predicates(&Relation::empty()).is_empty());
        assert_eq!(
            vec![Predicate::attr_eq("a", "c")],
            state.take_remaining()
        );
        assert!(state.pending_predicates().is_empty());
    }

    #[test]
    fn test_kept_attributes() {
        let mut state = state();
        let relation = Relation::new(20)
            .with_attribute(Attribute::new("c", 20))
            .with_attribute(Attribute::new("d", 2))
            .with_attribute(Attribute::new("e", 2));

        assert_eq!(vec!["c", "d"], state.kept_attributes(&relation));

        state.take_remaining();
        assert_eq!(vec!["d"], state.kept_attributes(&relation));
    }

    #[test]
    fn test_attribute_kept_while_any_predicate_needs_it() {
        let catalogue = catalogue_for_test(hashmap! {
            "R" => (10, vec![("a", 10), ("b", 5)]),
        });
        let plan = PlanBuilder::scan(catalogue.relation("R").unwrap())
            .select(Predicate::attr_eq("a", "b"))
            .select(Predicate::attr_eq("b", "c"))
            .build();
        let mut state = OptimizerState::collect(&plan.root(), Vec::<String>::new());

        let ab = Relation::new(10)
            .with_attribute(Attribute::new("a", 10))
            .with_attribute(Attribute::new("b", 5));
        state.take_predicates(&ab);

        assert_eq!(vec!["b"], state.kept_attributes(&ab));
    }
}
