//! Contains relational operators: scan, projection, select, product and join.
//!
//! An operator only holds its own arguments, inputs are held by [`crate::plan::PlanNode`].
mod table_scan;
pub use table_scan::*;
mod projection;
pub use projection::*;
mod select;
pub use select::*;
mod product;
pub use product::*;
mod join;
pub use join::*;

use std::fmt::{Display, Formatter};

use enum_as_inner::EnumAsInner;
use enum_dispatch::enum_dispatch;
use strum_macros::AsRefStr;

/// Relational operator.
#[derive(Clone, Debug, Eq, PartialEq, EnumAsInner, AsRefStr)]
#[enum_dispatch]
pub enum Operator {
    Scan(TableScan),
    Project(Projection),
    Select(Select),
    Product(Product),
    Join(Join),
}

impl Operator {
    /// Number of inputs required by this operator.
    pub fn arity(&self) -> usize {
        match self {
            Operator::Scan(_) => 0,
            Operator::Project(_) | Operator::Select(_) => 1,
            Operator::Product(_) | Operator::Join(_) => 2,
        }
    }
}

/// Formats arguments of an operator, without operator name.
#[enum_dispatch(Operator)]
pub trait DisplayFields {
    fn display(&self, f: &mut Formatter<'_>) -> std::fmt::Result;
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())?;
        self.display(f)
    }
}
