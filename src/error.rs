use crate::model::cost::CostEngineError;
use crate::model::graph::GraphError;
use crate::model::heuristic::HeuristicError;
use crate::model::overlay::LiveOverlayError;
use crate::model::profile::ProfileError;
use crate::model::temporal::TemporalConfigError;
use crate::model::transition::TransitionConfigError;
use crate::model::turn::TurnCostError;

use crate::algorithm::search::SearchError;

/// Top-level error type composing every subsystem's reason-coded failures.
///
/// Mirrors the teacher's `SearchError` composing `NetworkError`,
/// `StateModelError`, `TraversalModelError`, etc. via `#[from]`.
#[derive(thiserror::Error, Debug)]
pub enum TaroError {
    #[error("invalid artifact: {0}")]
    Graph(#[from] GraphError),
    #[error("invalid artifact: {0}")]
    Turn(#[from] TurnCostError),
    #[error("invalid artifact: {0}")]
    Profile(#[from] ProfileError),
    #[error("invalid artifact: {0}")]
    Overlay(#[from] LiveOverlayError),
    #[error("cost engine failure: {0}")]
    Cost(#[from] CostEngineError),
    #[error("invalid config: {0}")]
    Temporal(#[from] TemporalConfigError),
    #[error("invalid config: {0}")]
    Transition(#[from] TransitionConfigError),
    #[error("invalid config: {0}")]
    Heuristic(#[from] HeuristicError),
    #[error("search failure: {0}")]
    Search(#[from] SearchError),
}
