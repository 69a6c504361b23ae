use crate::model::EdgeId;

/// A single frontier entry: `{edge_id, arrival_time, cost, predecessor_edge_id}`
/// per spec.md §3. `predecessor_edge_id` uses [`crate::model::NO_PREDECESSOR`]
/// to mark a virtual-source seed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchState {
    pub edge_id: EdgeId,
    pub arrival_time: i64,
    pub cost: f32,
    pub predecessor_edge_id: i64,
}
