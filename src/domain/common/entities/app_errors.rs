use thiserror::Error;

/// Error taxonomy for the food-entry pipeline.
///
/// `UpstreamDegraded` is internal to the orchestration layer: oracle
/// failures are absorbed into safe defaults and never surface to callers.
/// Every other variant aborts the current operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("authentication required")]
    AuthenticationRequired,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Conflict(String),

    #[error("upstream degraded: {0}")]
    UpstreamDegraded(String),

    #[error("persistence failure: {0}")]
    PersistenceFailure(String),
}
