use std::sync::Arc;

use crate::catalogue::Catalogue;
use crate::plan::Plan;

/// Context for optimization. Includes access to catalogue.
#[derive(Clone, Default)]
pub struct OptimizerContext {
    pub catalogue: Arc<Catalogue>,
}

impl OptimizerContext {
    pub fn new(catalogue: Arc<Catalogue>) -> Self {
        Self { catalogue }
    }
}

/// Optimizer interface.
///
/// An optimizer never fails: plans it can't improve are returned in an equivalent form, and
/// plans referring to missing attributes are estimated as empty relations.
pub trait Optimizer {
    fn context(&self) -> &OptimizerContext;

    /// Entry point to drive optimization process.
    ///
    /// Every node of returned plan has its estimated statistics attached.
    fn optimize(&self, plan: &Plan) -> Plan;
}
