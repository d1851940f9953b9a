use thiserror::Error;

pub type GypsumResult<T> = anyhow::Result<T>;

/// Failure of a name based lookup.
///
/// Estimator and optimizer never return this to their callers: a missing attribute is turned
/// into an empty relation right where the lookup happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Attribute {0:?} not found")]
    AttributeNotFound(String),
    #[error("Relation {0:?} not found in catalogue")]
    RelationNotFound(String),
}
