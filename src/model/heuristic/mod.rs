pub mod calibration;
mod error;
pub mod landmark;
mod factory;
mod provider;

pub use error::HeuristicError;
pub use factory::{build_heuristic_provider, HeuristicConfig};
pub use landmark::{build_landmark_store, LandmarkStore, RawLandmarkStore};
pub use provider::{GoalBoundHeuristic, HeuristicKind, HeuristicProvider};
