use super::calibration::{compute_lower_bound_scale, euclidean_distance, spherical_distance};
use super::error::HeuristicError;
use super::landmark::{compute_compatibility_signature, LandmarkStore};
use super::provider::{HeuristicKind, HeuristicProvider};
use crate::model::graph::GraphRuntime;
use crate::model::profile::ProfileStore;

/// Startup configuration consumed by [`build_heuristic_provider`].
#[derive(Debug)]
pub struct HeuristicConfig<'g> {
    pub kind: HeuristicKind,
    pub landmark_store: Option<&'g LandmarkStore>,
}

/// Centralises heuristic validation with the reason codes from spec.md
/// §4.7/§7: calibrates Euclidean/Spherical scales, and for `LANDMARK`
/// checks node-count and compatibility-signature agreement between the
/// loaded [`LandmarkStore`] and the current graph+profile pair.
pub fn build_heuristic_provider<'g>(
    config: &HeuristicConfig<'g>,
    graph: &'g GraphRuntime,
    profiles: &ProfileStore,
) -> Result<HeuristicProvider<'g>, HeuristicError> {
    match config.kind {
        HeuristicKind::None => Ok(HeuristicProvider::Null),
        HeuristicKind::Euclidean => {
            if !graph.has_coordinates() {
                return Err(HeuristicError::CoordinatesRequired);
            }
            let scale =
                compute_lower_bound_scale(graph, profiles, |a, b| euclidean_distance(graph, a, b))?;
            Ok(HeuristicProvider::Euclidean { graph, scale })
        }
        HeuristicKind::Spherical => {
            if !graph.has_coordinates() {
                return Err(HeuristicError::CoordinatesRequired);
            }
            let scale =
                compute_lower_bound_scale(graph, profiles, |a, b| spherical_distance(graph, a, b))?;
            Ok(HeuristicProvider::Spherical { graph, scale })
        }
        HeuristicKind::Landmark => {
            let store = config
                .landmark_store
                .ok_or(HeuristicError::LandmarkStoreRequired)?;
            if store.landmark_count() == 0 {
                return Err(HeuristicError::LandmarkEmpty);
            }
            if store.node_count() != graph.node_count() as usize {
                return Err(HeuristicError::LandmarkNodeCountMismatch {
                    landmark: store.node_count(),
                    graph: graph.node_count() as usize,
                });
            }
            let expected = compute_compatibility_signature(graph, profiles)?;
            if store.compatibility_signature() != expected {
                return Err(HeuristicError::LandmarkSignatureMismatch {
                    landmark: store.compatibility_signature(),
                    expected,
                });
            }
            Ok(HeuristicProvider::Landmark { graph, store })
        }
    }
}
