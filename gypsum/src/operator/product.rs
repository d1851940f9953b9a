use std::fmt::Formatter;

use crate::operator::DisplayFields;

/// Cartesian product of two inputs.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Product;

impl DisplayFields for Product {
    fn display(&self, _f: &mut Formatter<'_>) -> std::fmt::Result {
        Ok(())
    }
}
