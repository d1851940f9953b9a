use std::fmt::Formatter;

use itertools::Itertools;

use crate::operator::DisplayFields;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Projection {
    attributes: Vec<String>,
}

impl Projection {
    pub fn new<I, S>(attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            attributes: attributes.into_iter().map(Into::into).collect(),
        }
    }

    /// Names of attributes to keep.
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }
}

impl DisplayFields for Projection {
    fn display(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("")
            .field(
                "attributes",
                &format_args!("[{}]", self.attributes.iter().join(", ")),
            )
            .finish()
    }
}
