#[derive(thiserror::Error, Debug)]
pub enum CostEngineError {
    #[error("InvalidInput: {0}")]
    InvalidInput(String),
    #[error("ContractViolation: {0}")]
    ContractViolation(String),
    #[error("TransitionResolutionFailure: {0}")]
    TransitionResolutionFailure(String),
    #[error("graph error while computing cost: {0}")]
    GraphFailure(#[from] crate::model::graph::GraphError),
}
