//! Defines cost model.
//!
//! Cost of a plan is total number of tuples read or produced by all its nodes, see
//! [`Estimator`] for how tuple counts are estimated.

mod estimator;
pub use estimator::*;

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use derive_more::{Display, From, Into};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into)]
pub struct Cost(u64);

impl Cost {
    pub const ZERO: Cost = Cost(0);

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl Add for Cost {
    type Output = Cost;

    fn add(self, rhs: Self) -> Self::Output {
        Cost(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Cost {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Cost {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Cost::ZERO, Add::add)
    }
}
