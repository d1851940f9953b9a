use std::fmt::Formatter;
use std::sync::Arc;

use crate::catalogue::NamedRelation;
use crate::operator::DisplayFields;

/// Reads a base relation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TableScan {
    relation: Arc<NamedRelation>,
}

impl TableScan {
    pub fn new(relation: Arc<NamedRelation>) -> Self {
        Self { relation }
    }

    pub fn relation(&self) -> &Arc<NamedRelation> {
        &self.relation
    }

    pub fn table_name(&self) -> &str {
        self.relation.name()
    }
}

impl DisplayFields for TableScan {
    fn display(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("")
            .field("relation", &format_args!("{}", self.table_name()))
            .finish()
    }
}
