use super::calibration::lower_bound_weight;
use super::error::HeuristicError;
use crate::model::graph::GraphRuntime;
use crate::model::profile::ProfileStore;
use crate::model::NodeId;
use crate::util::fnv::Fnv1a;
use crate::util::rng::fisher_yates_shuffle;
use itertools::Itertools;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Precomputed forward/backward landmark distance tables for the ALT
/// heuristic. Flattened `landmark_count * node_count` row-major arrays,
/// grounded on the same "flat arrays over pointer graphs" idiom as
/// [`GraphRuntime`] and [`crate::model::turn::TurnCostMap`].
#[derive(Debug)]
pub struct LandmarkStore {
    node_count: usize,
    landmark_node_ids: Box<[NodeId]>,
    forward: Box<[f32]>,
    backward: Box<[f32]>,
    compatibility_signature: u64,
}

impl LandmarkStore {
    pub fn landmark_count(&self) -> usize {
        self.landmark_node_ids.len()
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn compatibility_signature(&self) -> u64 {
        self.compatibility_signature
    }

    pub fn forward(&self, landmark: usize, node: NodeId) -> f32 {
        self.forward[landmark * self.node_count + node.index()]
    }

    pub fn backward(&self, landmark: usize, node: NodeId) -> f32 {
        self.backward[landmark * self.node_count + node.index()]
    }
}

/// already-decoded landmark artifact, as described by spec.md §3.
#[derive(Debug, Clone)]
pub struct RawLandmarkStore {
    pub landmark_node_ids: Vec<u32>,
    pub forward: Vec<Vec<f32>>,
    pub backward: Vec<Vec<f32>>,
    pub compatibility_signature: u64,
}

impl LandmarkStore {
    /// builds a store directly from an already-preprocessed artifact,
    /// without re-running Dijkstra. Used when loading a landmark table
    /// that was computed offline; signature compatibility is checked by
    /// [`super::factory`], not here.
    pub fn try_from_raw(raw: RawLandmarkStore, node_count: usize) -> Result<Self, HeuristicError> {
        if raw.landmark_node_ids.is_empty() {
            return Err(HeuristicError::LandmarkEmpty);
        }
        let l = raw.landmark_node_ids.len();
        let mut forward = vec![f32::INFINITY; l * node_count];
        let mut backward = vec![f32::INFINITY; l * node_count];
        for (li, row) in raw.forward.iter().enumerate() {
            if row.len() != node_count {
                return Err(HeuristicError::LandmarkNodeCountMismatch {
                    landmark: row.len(),
                    graph: node_count,
                });
            }
            forward[li * node_count..(li + 1) * node_count].copy_from_slice(row);
        }
        for (li, row) in raw.backward.iter().enumerate() {
            if row.len() != node_count {
                return Err(HeuristicError::LandmarkNodeCountMismatch {
                    landmark: row.len(),
                    graph: node_count,
                });
            }
            backward[li * node_count..(li + 1) * node_count].copy_from_slice(row);
        }
        Ok(LandmarkStore {
            node_count,
            landmark_node_ids: raw
                .landmark_node_ids
                .into_iter()
                .map(NodeId)
                .collect_vec()
                .into_boxed_slice(),
            forward: forward.into_boxed_slice(),
            backward: backward.into_boxed_slice(),
            compatibility_signature: raw.compatibility_signature,
        })
    }
}

/// FNV-1a over `(node_count, edge_count, and for every edge: origin,
/// destination, lower_bound_weight_f32_bits)`, per spec.md §4.7. Used both
/// to stamp a freshly preprocessed landmark store and to validate a
/// loaded one against the current graph+profile pair.
pub fn compute_compatibility_signature(
    graph: &GraphRuntime,
    profiles: &ProfileStore,
) -> Result<u64, HeuristicError> {
    let mut hasher = Fnv1a::new();
    hasher.write_u32(graph.node_count());
    hasher.write_u32(graph.edge_count());
    for raw_edge in 0..graph.edge_count() {
        let edge = crate::model::EdgeId(raw_edge);
        let origin = graph.origin(edge)?;
        let dest = graph.destination(edge)?;
        let weight = lower_bound_weight(graph, profiles, edge)?;
        hasher.write_u32(origin.0);
        hasher.write_u32(dest.0);
        hasher.write_u32(weight.to_bits());
    }
    Ok(hasher.finish())
}

/// Deterministic landmark selection (spec.md §4.7): shuffle `[0, N)` with a
/// seeded Fisher-Yates, keep the first `k` nodes with non-zero out-degree,
/// then fill from the remainder if there weren't enough.
fn select_landmarks(graph: &GraphRuntime, k: usize, seed: u64) -> Result<Vec<NodeId>, HeuristicError> {
    let n = graph.node_count();
    let mut candidates: Vec<u32> = (0..n).collect();
    fisher_yates_shuffle(&mut candidates, seed);

    let mut selected = Vec::with_capacity(k.min(n as usize));
    let mut remainder = Vec::new();
    for &c in &candidates {
        if selected.len() >= k {
            remainder.push(c);
            continue;
        }
        let degree = graph.degree(NodeId(c))?;
        if degree > 0.0 {
            selected.push(NodeId(c));
        } else {
            remainder.push(c);
        }
    }
    let mut i = 0;
    while selected.len() < k && i < remainder.len() {
        selected.push(NodeId(remainder[i]));
        i += 1;
    }
    Ok(selected)
}

type Adjacency = Vec<Vec<(NodeId, f32)>>;

fn forward_adjacency(graph: &GraphRuntime, profiles: &ProfileStore) -> Result<Adjacency, HeuristicError> {
    let n = graph.node_count() as usize;
    let mut adj: Adjacency = vec![Vec::new(); n];
    for raw_node in 0..graph.node_count() {
        let node = NodeId(raw_node);
        for edge in graph.edges_of_node(node)? {
            let dest = graph.destination(edge)?;
            let w = lower_bound_weight(graph, profiles, edge)?;
            adj[node.index()].push((dest, w));
        }
    }
    Ok(adj)
}

fn reverse_adjacency(graph: &GraphRuntime, profiles: &ProfileStore) -> Result<Adjacency, HeuristicError> {
    let n = graph.node_count() as usize;
    let mut adj: Adjacency = vec![Vec::new(); n];
    for raw_edge in 0..graph.edge_count() {
        let edge = crate::model::EdgeId(raw_edge);
        let origin = graph.origin(edge)?;
        let dest = graph.destination(edge)?;
        let w = lower_bound_weight(graph, profiles, edge)?;
        adj[dest.index()].push((origin, w));
    }
    Ok(adj)
}

/// single-source Dijkstra over a precomputed node adjacency, tie-breaking
/// on `(distance, node_id)` ascending for determinism. Unreachable nodes
/// retain `+inf`.
fn dijkstra_nodes(node_count: usize, source: NodeId, adjacency: &[Vec<(NodeId, f32)>], max_settled: Option<usize>) -> Vec<f32> {
    let mut dist = vec![f32::INFINITY; node_count];
    let mut settled = vec![false; node_count];
    let mut heap: BinaryHeap<Reverse<(OrderedFloat<f32>, u32)>> = BinaryHeap::new();

    dist[source.index()] = 0.0;
    heap.push(Reverse((OrderedFloat(0.0), source.0)));

    let mut settled_count = 0usize;
    while let Some(Reverse((OrderedFloat(d), node_idx))) = heap.pop() {
        let node = NodeId(node_idx);
        if settled[node.index()] {
            continue;
        }
        settled[node.index()] = true;
        settled_count += 1;
        if let Some(max) = max_settled {
            if settled_count > max {
                break;
            }
        }
        for &(neighbor, w) in &adjacency[node.index()] {
            let nd = d + w;
            if nd < dist[neighbor.index()] {
                dist[neighbor.index()] = nd;
                heap.push(Reverse((OrderedFloat(nd), neighbor.0)));
            }
        }
    }
    dist
}

/// Runs the full landmark preprocessing pipeline: selection, then forward
/// and backward Dijkstra per landmark over the lower-bound-weighted graph.
pub fn build_landmark_store(
    graph: &GraphRuntime,
    profiles: &ProfileStore,
    landmark_count: usize,
    seed: u64,
    max_settled_nodes_per_landmark: Option<usize>,
) -> Result<LandmarkStore, HeuristicError> {
    if landmark_count == 0 {
        return Err(HeuristicError::LandmarkEmpty);
    }
    let n = graph.node_count() as usize;
    let landmarks = select_landmarks(graph, landmark_count, seed)?;
    if landmarks.is_empty() {
        return Err(HeuristicError::LandmarkEmpty);
    }

    let forward_adj = forward_adjacency(graph, profiles)?;
    let reverse_adj = reverse_adjacency(graph, profiles)?;

    let mut forward = vec![f32::INFINITY; landmarks.len() * n];
    let mut backward = vec![f32::INFINITY; landmarks.len() * n];
    for (li, &lm) in landmarks.iter().enumerate() {
        let fwd = dijkstra_nodes(n, lm, &forward_adj, max_settled_nodes_per_landmark);
        let bwd = dijkstra_nodes(n, lm, &reverse_adj, max_settled_nodes_per_landmark);
        forward[li * n..(li + 1) * n].copy_from_slice(&fwd);
        backward[li * n..(li + 1) * n].copy_from_slice(&bwd);
    }

    let compatibility_signature = compute_compatibility_signature(graph, profiles)?;
    log::info!(
        "landmark preprocessing complete: {} landmarks over {} nodes",
        landmarks.len(),
        n
    );

    Ok(LandmarkStore {
        node_count: n,
        landmark_node_ids: landmarks.into_boxed_slice(),
        forward: forward.into_boxed_slice(),
        backward: backward.into_boxed_slice(),
        compatibility_signature,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::graph::RawGraphBuffers;
    use crate::model::profile::RawProfile;

    fn linear_chain(n: u32) -> GraphRuntime {
        let edge_count = n.saturating_sub(1);
        let first_edge: Vec<u32> = (0..=n).map(|i| i.min(edge_count)).collect();
        let edge_target: Vec<u32> = (0..edge_count).map(|i| i + 1).collect();
        GraphRuntime::try_from(RawGraphBuffers {
            node_count: n,
            edge_count,
            first_edge,
            edge_target,
            edge_origin: None,
            base_weight: vec![1.0; edge_count as usize],
            edge_profile_id: vec![0; edge_count as usize],
            coordinates: None,
        })
        .unwrap()
    }

    #[test]
    fn forward_distance_from_landmark_zero_is_index() {
        let g = linear_chain(5);
        let profiles = ProfileStore::try_from_raw(&[]).unwrap();
        let store = build_landmark_store(&g, &profiles, 1, 42, None).unwrap();
        for i in 0..5u32 {
            assert!((store.forward(0, NodeId(i)) - i as f32).abs() < 1e-6);
        }
    }

    #[test]
    fn backward_distance_to_landmark_is_reverse_index() {
        let g = linear_chain(5);
        let profiles = ProfileStore::try_from_raw(&[]).unwrap();
        // landmark must be node 4 to get nonzero backward distances on a chain
        let store = build_landmark_store(&g, &profiles, 5, 7, None).unwrap();
        let idx4 = store
            .landmark_node_ids
            .iter()
            .position(|&n| n == NodeId(4))
            .expect("node 4 selected when k == node_count");
        for i in 0..5u32 {
            assert!((store.backward(idx4, NodeId(i)) - (4 - i) as f32).abs() < 1e-6);
        }
    }

    #[test]
    fn compatibility_signature_is_stable() {
        let g = linear_chain(5);
        let profiles = ProfileStore::try_from_raw(&[]).unwrap();
        let a = compute_compatibility_signature(&g, &profiles).unwrap();
        let b = compute_compatibility_signature(&g, &profiles).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn compatibility_signature_changes_with_weights() {
        let g1 = linear_chain(3);
        let g2 = GraphRuntime::try_from(RawGraphBuffers {
            node_count: 3,
            edge_count: 2,
            first_edge: vec![0, 1, 2, 2],
            edge_target: vec![1, 2],
            edge_origin: None,
            base_weight: vec![99.0, 99.0],
            edge_profile_id: vec![0, 0],
            coordinates: None,
        })
        .unwrap();
        let profiles = ProfileStore::try_from_raw(&[]).unwrap();
        let sig1 = compute_compatibility_signature(&g1, &profiles).unwrap();
        let sig2 = compute_compatibility_signature(&g2, &profiles).unwrap();
        assert_ne!(sig1, sig2);
    }
}
