use std::fmt::Formatter;

use crate::operator::DisplayFields;
use crate::predicate::Predicate;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Select {
    predicate: Predicate,
}

impl Select {
    pub fn new(predicate: Predicate) -> Self {
        Self { predicate }
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }
}

impl DisplayFields for Select {
    fn display(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("")
            .field("predicate", &format_args!("{}", self.predicate))
            .finish()
    }
}
