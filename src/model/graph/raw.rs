/// Already-decoded primitive buffers for the graph topology. Produced by
/// the (out-of-scope) binary-artifact reader; this crate only validates
/// and indexes them — it never parses bytes.
///
/// Field shapes mirror spec.md §3: `first_edge` has `node_count + 1`
/// entries, all other vectors are dense per-edge or per-node arrays.
#[derive(Debug, Clone)]
pub struct RawGraphBuffers {
    pub node_count: u32,
    pub edge_count: u32,
    pub first_edge: Vec<u32>,
    pub edge_target: Vec<u32>,
    /// Computed at load time in a single pass over `first_edge` when absent.
    pub edge_origin: Option<Vec<u32>>,
    pub base_weight: Vec<f32>,
    pub edge_profile_id: Vec<u16>,
    /// `(x, y)` pairs — either Euclidean or geodetic (lat, lon) degrees,
    /// per the heuristic strategy in use.
    pub coordinates: Option<Vec<(f64, f64)>>,
}
