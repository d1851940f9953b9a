use std::fmt::Formatter;

use crate::operator::DisplayFields;
use crate::predicate::Predicate;

/// Logical equi join operator.
///
/// Left attribute of predicate comes from left input, and right attribute from right input.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Join {
    predicate: Predicate,
}

impl Join {
    pub fn new(predicate: Predicate) -> Self {
        Self { predicate }
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }
}

impl DisplayFields for Join {
    fn display(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("")
            .field("predicate", &format_args!("{}", self.predicate))
            .finish()
    }
}
