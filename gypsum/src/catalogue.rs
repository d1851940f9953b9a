//! Statistics of base relations.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{bail, ensure};
use log::warn;

use crate::error::{GypsumResult, LookupError};
use crate::plan::PlanNode;
use crate::stat::{Attribute, Relation};

/// A base relation stored in catalogue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedRelation {
    name: String,
    relation: Relation,
}

impl NamedRelation {
    pub fn new<S: Into<String>>(name: S, relation: Relation) -> Self {
        Self {
            name: name.into(),
            relation,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn relation(&self) -> &Relation {
        &self.relation
    }
}

#[derive(Clone, Debug, Default)]
pub struct Catalogue {
    relations: BTreeMap<String, Arc<NamedRelation>>,
}

impl Catalogue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_relation<S: Into<String>>(
        &mut self,
        name: S,
        tuple_count: u64,
    ) -> GypsumResult<Arc<NamedRelation>> {
        let name = name.into();
        ensure!(
            !self.relations.contains_key(&name),
            "Relation {:?} already exists",
            name
        );

        let relation = Arc::new(NamedRelation::new(name.clone(), Relation::new(tuple_count)));
        self.relations.insert(name, relation.clone());
        Ok(relation)
    }

    /// Appends an attribute to an existing relation.
    ///
    /// Distinct value count never exceeds tuple count, larger values are capped.
    pub fn create_attribute<S: Into<String>>(
        &mut self,
        relation_name: &str,
        attribute_name: S,
        value_count: u64,
    ) -> GypsumResult<()> {
        let attribute_name = attribute_name.into();
        let named = match self.relations.get_mut(relation_name) {
            Some(named) => Arc::make_mut(named),
            None => bail!(LookupError::RelationNotFound(relation_name.to_string())),
        };

        ensure!(
            !named.relation.contains(&attribute_name),
            "Attribute {:?} already exists in relation {:?}",
            attribute_name,
            relation_name
        );

        let tuple_count = named.relation.tuple_count();
        if value_count > tuple_count {
            warn!(
                "Distinct value count {} of {}.{} exceeds tuple count {}, capped.",
                value_count, relation_name, attribute_name, tuple_count
            );
        }
        named
            .relation
            .add_attribute(Attribute::new(attribute_name, value_count.min(tuple_count)));
        Ok(())
    }

    pub fn relation(&self, name: &str) -> Result<Arc<NamedRelation>, LookupError> {
        self.relations
            .get(name)
            .cloned()
            .ok_or_else(|| LookupError::RelationNotFound(name.to_string()))
    }

    /// Scan of a base relation.
    pub fn scan(&self, name: &str) -> Result<PlanNode, LookupError> {
        self.relation(name).map(PlanNode::scan)
    }

    pub fn relations(&self) -> impl Iterator<Item = &Arc<NamedRelation>> {
        self.relations.values()
    }
}
