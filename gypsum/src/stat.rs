use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::LookupError;

/// Statistics of one attribute.
///
/// Two attributes are equal when they have same name, no matter what their statistics are.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Attribute {
    name: String,
    /// Number of distinct values.
    ///
    /// This maybe an estimated value.
    value_count: u64,
}

impl Attribute {
    pub fn new<S: Into<String>>(name: S, value_count: u64) -> Self {
        Self {
            name: name.into(),
            value_count,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value_count(&self) -> u64 {
        self.value_count
    }

    /// A copy of this attribute whose distinct value count does not exceed `max`.
    pub fn capped(&self, max: u64) -> Self {
        Self::new(self.name.clone(), self.value_count.min(max))
    }
}

impl PartialEq for Attribute {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Attribute {}

impl Hash for Attribute {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// Statistics of a relation, either a base relation or output of an operator.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    /// Total number of tuples.
    ///
    /// This maybe an estimated value.
    tuple_count: u64,
    #[serde(default)]
    attributes: Vec<Attribute>,
}

impl Relation {
    pub fn new(tuple_count: u64) -> Self {
        Self {
            tuple_count,
            attributes: vec![],
        }
    }

    /// Relation with no tuples and no attributes.
    ///
    /// Estimator produces this when a predicate refers to attributes missing in its input,
    /// which is different from a predicate that selects nothing: the latter still keeps all
    /// attributes.
    pub fn empty() -> Self {
        Self::new(0)
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.add_attribute(attribute);
        self
    }

    pub fn with_attributes<I>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = Attribute>,
    {
        self.attributes.extend(attributes);
        self
    }

    pub fn add_attribute(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    pub fn tuple_count(&self) -> u64 {
        self.tuple_count
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }

    pub fn attribute(&self, name: &str) -> Result<&Attribute, LookupError> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .ok_or_else(|| LookupError::AttributeNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attribute(name).is_ok()
    }

    pub fn attribute_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.attributes.iter().map(|a| a.name())
    }
}

impl Display for Relation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "rows={} [{}]",
            self.tuple_count,
            self.attributes
                .iter()
                .map(|a| format!("{}:{}", a.name, a.value_count))
                .join(", ")
        )
    }
}
