use crate::model::heuristic::HeuristicKind;
use crate::model::EdgeId;

/// The two supported search strategies: plain label-setting Dijkstra, or
/// A* guided by whichever [`HeuristicKind`] the request names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Algorithm {
    Dijkstra,
    AStar,
}

/// A single point-to-point routing request, addressed in external ids per
/// spec.md §6; the outer request layer is responsible for translating
/// these through an [`crate::model::mapping::ExternalIdMap`] before
/// calling [`super::core::SearchCore::run`].
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Request {
    pub source_external_id: String,
    pub target_external_id: String,
    pub departure_ticks: i64,
    pub algorithm: Algorithm,
    pub heuristic_type: HeuristicKind,
}

/// Ambient-stack diagnostics about a single run, gathered regardless of
/// whether the query reached its target.
#[derive(Debug, Clone, Copy, Default, serde::Serialize, serde::Deserialize)]
pub struct SearchTelemetry {
    pub states_settled: usize,
    pub peak_active_states: usize,
    pub pool_utilization: f64,
    pub pool_leak_count: u64,
}

/// The result of a point-to-point search.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Response {
    pub reachable: bool,
    pub edge_sequence: Vec<EdgeId>,
    pub total_cost: f32,
    pub arrival_ticks: i64,
    pub telemetry: Option<SearchTelemetry>,
}

impl Response {
    pub(super) fn unreachable() -> Self {
        Response {
            reachable: false,
            edge_sequence: Vec::new(),
            total_cost: f32::INFINITY,
            arrival_ticks: 0,
            telemetry: None,
        }
    }
}
