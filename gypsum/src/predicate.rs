use std::fmt::{Display, Formatter};

use crate::stat::Relation;

/// Equality predicate of select and join.
///
/// Predicates are compared by content, so the same condition written twice in a query collapses
/// into one when deduplicated.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum Predicate {
    /// `attribute = "value"`
    ValueEq { attribute: String, value: String },
    /// `left = right`
    AttrEq { left: String, right: String },
}

impl Predicate {
    pub fn value_eq<A: Into<String>, V: Into<String>>(attribute: A, value: V) -> Self {
        Self::ValueEq {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    pub fn attr_eq<L: Into<String>, R: Into<String>>(left: L, right: R) -> Self {
        Self::AttrEq {
            left: left.into(),
            right: right.into(),
        }
    }

    pub fn is_value_equality(&self) -> bool {
        matches!(self, Self::ValueEq { .. })
    }

    pub fn left_attribute(&self) -> &str {
        match self {
            Self::ValueEq { attribute, .. } => attribute,
            Self::AttrEq { left, .. } => left,
        }
    }

    /// `None` for value equality.
    pub fn right_attribute(&self) -> Option<&str> {
        match self {
            Self::ValueEq { .. } => None,
            Self::AttrEq { right, .. } => Some(right),
        }
    }

    /// All attributes referenced, left first.
    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.left_attribute()).chain(self.right_attribute())
    }

    /// Exchanges both sides of an attribute equality.
    pub fn swapped(&self) -> Self {
        match self {
            Self::ValueEq { .. } => self.clone(),
            Self::AttrEq { left, right } => Self::attr_eq(right.clone(), left.clone()),
        }
    }

    /// Whether every attribute this predicate refers to is present in `relation`.
    pub fn contained_in(&self, relation: &Relation) -> bool {
        self.attributes().all(|name| relation.contains(name))
    }
}

impl Display for Predicate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ValueEq { attribute, value } => write!(f, "{}={:?}", attribute, value),
            Self::AttrEq { left, right } => write!(f, "{}={}", left, right),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stat::Attribute;
    use std::collections::HashSet;

    #[test]
    fn test_equal_by_content() {
        let predicates: HashSet<Predicate> = vec![
            Predicate::attr_eq("a", "b"),
            Predicate::attr_eq("a", "b"),
            Predicate::attr_eq("b", "a"),
            Predicate::value_eq("a", "1"),
            Predicate::value_eq("a", "1"),
            Predicate::value_eq("a", "2"),
        ]
        .into_iter()
        .collect();

        assert_eq!(4, predicates.len());
    }

    #[test]
    fn test_attributes() {
        let value_eq = Predicate::value_eq("a", "1");
        assert!(value_eq.is_value_equality());
        assert_eq!(None, value_eq.right_attribute());
        assert_eq!(vec!["a"], value_eq.attributes().collect::<Vec<_>>());

        let attr_eq = Predicate::attr_eq("a", "b");
        assert!(!attr_eq.is_value_equality());
        assert_eq!(vec!["a", "b"], attr_eq.attributes().collect::<Vec<_>>());
        assert_eq!(Predicate::attr_eq("b", "a"), attr_eq.swapped());
        assert_eq!(value_eq, value_eq.swapped());
    }

    #[test]
    fn test_contained_in() {
        let relation = Relation::new(10)
            .with_attribute(Attribute::new("a", 10))
            .with_attribute(Attribute::new("b", 5));

        assert!(Predicate::value_eq("a", "1").contained_in(&relation));
        assert!(Predicate::attr_eq("b", "a").contained_in(&relation));
        assert!(!Predicate::attr_eq("a", "c").contained_in(&relation));
        assert!(!Predicate::attr_eq("a", "c").contained_in(&Relation::empty()));
    }

    #[test]
    fn test_display() {
        assert_eq!("a=b", Predicate::attr_eq("a", "b").to_string());
        assert_eq!("a=\"x\"", Predicate::value_eq("a", "x").to_string());
    }
}
