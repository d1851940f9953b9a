//! Implementation of heuristic optimizer.
//!
//! Heuristic optimizer rewrites a canonical plan, e.g. a left deep cross product of all
//! relations with every selection and projection applied on top, in five passes:
//!
//! 1. Collect base relations and predicates of original plan.
//! 2. Build a subtree for each base relation, with selections and projections pushed down to its
//! scan.
//! 3. Order subtrees by their estimated cost, cheapest first.
//! 4. Connect subtrees with a left deep tree of products, cheapest at the bottom.
//! 5. Replace products with joins where predicates allow, and project away attributes no
//! longer needed.
//!
//! Only one plan is produced, no alternative is explored or compared.

mod optimizer;
pub use optimizer::*;
mod state;
pub use state::*;
