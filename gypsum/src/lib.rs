//! Gypsum is a heuristic optimizer for select-project-join relational algebra plans.
//!
//! ## Background
//!
//! Given an unoptimized logical plan, usually produced by translating a query in the most
//! obvious way (a cross product of every relation in the `FROM` clause, filtered by every
//! predicate, projected last), the optimizer rewrites it into a semantically equivalent plan
//! that is expected to be much cheaper to execute.
//!
//! Unlike cost based optimizers, which enumerate alternative plans and pick the cheapest one
//! [1], this crate applies a fixed sequence of textbook heuristics [2] exactly once:
//!
//! 1. Push selections down to the relations they filter.
//! 2. Push projections down so that intermediate results carry only needed attributes.
//! 3. Order relation accesses so that small intermediate results are built first.
//! 4. Replace cross products followed by equality selections with equi joins.
//!
//! Cost estimation is still needed in step 3, and is implemented by [`cost::Estimator`], which
//! derives cardinality and distinct value count of every plan node from base relation
//! statistics stored in [`catalogue::Catalogue`].
//!
//! ## Design
//!
//! * [`stat`] Relation and attribute statistics.
//! * [`predicate`] Equality predicates used by select and join.
//! * [`catalogue`] Named base relations with their statistics.
//! * [`operator`] Relational operators.
//! * [`plan`] Plan tree, builders and explain.
//! * [`cost`] Cost model and cardinality estimator.
//! * [`heuristic`] Heuristic optimizer implementation.
//!
//! ## Reference
//!
//! 1. Selinger, P. Griffiths, et al. "Access path selection in a relational database management
//! system." Readings in Artificial Intelligence and Databases. Morgan Kaufmann, 1989. 511-522.
//! 2. Garcia-Molina, H., Ullman, J.D. and Widom, J., 2008. Database systems: the complete book.
//! Chapter 16, "The Query Compiler".

pub mod catalogue;
pub mod cost;
pub mod error;
pub mod heuristic;
pub mod operator;
pub mod optimizer;
pub mod plan;
pub mod predicate;
pub mod stat;

#[cfg(test)]
mod test_utils;
