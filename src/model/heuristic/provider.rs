use super::calibration::spherical_distance;
use super::error::HeuristicError;
use super::landmark::LandmarkStore;
use crate::model::graph::GraphRuntime;
use crate::model::NodeId;

/// The closed set of heuristic kinds a query may request. A tagged enum
/// replaces the source's interface objects, per spec.md §9 — the variant
/// set is closed and none of the four need per-instance dynamic dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum HeuristicKind {
    None,
    Euclidean,
    Spherical,
    Landmark,
}

/// Startup-bound provider: holds whatever each variant needs to bind a
/// goal (a calibrated scale, or a landmark store reference) without
/// re-deriving it per query.
#[derive(Debug)]
pub enum HeuristicProvider<'g> {
    Null,
    Euclidean { graph: &'g GraphRuntime, scale: f64 },
    Spherical { graph: &'g GraphRuntime, scale: f64 },
    Landmark {
        graph: &'g GraphRuntime,
        store: &'g LandmarkStore,
    },
}

impl<'g> HeuristicProvider<'g> {
    pub fn kind(&self) -> HeuristicKind {
        match self {
            HeuristicProvider::Null => HeuristicKind::None,
            HeuristicProvider::Euclidean { .. } => HeuristicKind::Euclidean,
            HeuristicProvider::Spherical { .. } => HeuristicKind::Spherical,
            HeuristicProvider::Landmark { .. } => HeuristicKind::Landmark,
        }
    }

    /// binds the provider to a goal node once per query; the returned
    /// estimator's hot method is allocation-free.
    pub fn bind_goal(&self, goal: NodeId) -> Result<GoalBoundHeuristic<'g>, HeuristicError> {
        match *self {
            HeuristicProvider::Null => Ok(GoalBoundHeuristic::Null),
            HeuristicProvider::Euclidean { graph, scale } => {
                let (x, y) = graph.coordinate(goal)?;
                Ok(GoalBoundHeuristic::Euclidean {
                    graph,
                    goal,
                    goal_x: x,
                    goal_y: y,
                    scale,
                })
            }
            HeuristicProvider::Spherical { graph, scale } => {
                let (lat, lon) = graph.coordinate(goal)?;
                Ok(GoalBoundHeuristic::Spherical {
                    graph,
                    goal,
                    goal_lat: lat,
                    goal_lon: lon,
                    scale,
                })
            }
            HeuristicProvider::Landmark { graph, store } => {
                let goal_forward: Vec<f32> = (0..store.landmark_count())
                    .map(|l| store.forward(l, goal))
                    .collect();
                let goal_backward: Vec<f32> = (0..store.landmark_count())
                    .map(|l| store.backward(l, goal))
                    .collect();
                Ok(GoalBoundHeuristic::Landmark {
                    graph,
                    goal,
                    store,
                    goal_forward,
                    goal_backward,
                })
            }
        }
    }
}

/// The bound estimator. `estimate_from_node` is admissible (never
/// overestimates) and returns `0` at the goal.
#[derive(Debug)]
pub enum GoalBoundHeuristic<'g> {
    Null,
    Euclidean {
        graph: &'g GraphRuntime,
        goal: NodeId,
        goal_x: f64,
        goal_y: f64,
        scale: f64,
    },
    Spherical {
        graph: &'g GraphRuntime,
        goal: NodeId,
        goal_lat: f64,
        goal_lon: f64,
        scale: f64,
    },
    Landmark {
        graph: &'g GraphRuntime,
        goal: NodeId,
        store: &'g LandmarkStore,
        goal_forward: Vec<f32>,
        goal_backward: Vec<f32>,
    },
}

impl GoalBoundHeuristic<'_> {
    pub fn estimate_from_node(&self, node: NodeId) -> Result<f64, HeuristicError> {
        match self {
            GoalBoundHeuristic::Null => Ok(0.0),
            GoalBoundHeuristic::Euclidean {
                graph,
                goal,
                goal_x,
                goal_y,
                scale,
            } => {
                if node == *goal {
                    return Ok(0.0);
                }
                let (x, y) = graph.coordinate(node)?;
                let distance = (goal_x - x).hypot(goal_y - y);
                Ok(distance * scale)
            }
            GoalBoundHeuristic::Spherical {
                graph,
                goal,
                scale,
                ..
            } => {
                if node == *goal {
                    return Ok(0.0);
                }
                let distance = spherical_distance(graph, node, *goal)?;
                Ok(distance * scale)
            }
            GoalBoundHeuristic::Landmark {
                goal,
                store,
                goal_forward,
                goal_backward,
                ..
            } => {
                if node == *goal {
                    return Ok(0.0);
                }
                let mut best = 0.0f64;
                for l in 0..store.landmark_count() {
                    let fg = goal_forward[l];
                    let fn_ = store.forward(l, node);
                    let term1 = if fg.is_infinite() || fn_.is_infinite() {
                        0.0
                    } else {
                        (fg - fn_) as f64
                    };
                    let bn = store.backward(l, node);
                    let bg = goal_backward[l];
                    let term2 = if bn.is_infinite() || bg.is_infinite() {
                        0.0
                    } else {
                        (bn - bg) as f64
                    };
                    best = best.max(term1).max(term2);
                }
                Ok(best)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::graph::RawGraphBuffers;
    use crate::model::heuristic::calibration::{compute_lower_bound_scale, euclidean_distance};
    use crate::model::profile::ProfileStore;

    fn chain_with_coords() -> GraphRuntime {
        GraphRuntime::try_from(RawGraphBuffers {
            node_count: 3,
            edge_count: 2,
            first_edge: vec![0, 1, 2, 2],
            edge_target: vec![1, 2],
            edge_origin: None,
            base_weight: vec![10.0, 10.0],
            edge_profile_id: vec![0, 0],
            coordinates: Some(vec![(0.0, 0.0), (3.0, 4.0), (6.0, 8.0)]),
        })
        .unwrap()
    }

    #[test]
    fn euclidean_estimate_matches_known_distances() {
        let graph = chain_with_coords();
        let profiles = ProfileStore::try_from_raw(&[]).unwrap();
        let scale =
            compute_lower_bound_scale(&graph, &profiles, |a, b| euclidean_distance(&graph, a, b)).unwrap();
        let provider = HeuristicProvider::Euclidean { graph: &graph, scale };
        let bound = provider.bind_goal(NodeId(2)).unwrap();

        assert!((bound.estimate_from_node(NodeId(0)).unwrap() - 20.0).abs() < 1e-9);
        assert!((bound.estimate_from_node(NodeId(1)).unwrap() - 10.0).abs() < 1e-9);
        assert_eq!(bound.estimate_from_node(NodeId(2)).unwrap(), 0.0);
    }

    #[test]
    fn null_heuristic_is_always_zero() {
        let graph = chain_with_coords();
        let provider = HeuristicProvider::Null;
        let bound = provider.bind_goal(NodeId(1)).unwrap();
        assert_eq!(bound.estimate_from_node(NodeId(0)).unwrap(), 0.0);
        assert_eq!(bound.estimate_from_node(NodeId(1)).unwrap(), 0.0);
    }
}
