use crate::model::cost::CostEngineError;
use crate::model::graph::GraphError;
use crate::model::heuristic::HeuristicError;

#[derive(thiserror::Error, Debug)]
pub enum SearchError {
    #[error("PoolExhausted: priority queue pool exhausted (capacity {capacity})")]
    PoolExhausted { capacity: usize },
    #[error("HeapFull: priority queue heap is full (capacity {capacity})")]
    HeapFull { capacity: usize },
    #[error("DoubleRecycle: search state token already recycled")]
    DoubleRecycle,
    #[error("RecycleWithNoActive: recycle called with no active states outstanding")]
    RecycleWithNoActive,
    #[error("InvalidInput: {0}")]
    InvalidInput(String),
    #[error("InternalInvariant: {0}")]
    InternalInvariant(String),
    #[error("Cancelled")]
    Cancelled,
    #[error("cost engine failure: {0}")]
    Cost(#[from] CostEngineError),
    #[error("heuristic failure: {0}")]
    Heuristic(#[from] HeuristicError),
    #[error("graph failure: {0}")]
    Graph(#[from] GraphError),
}
