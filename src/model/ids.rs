use std::fmt::Display;

/// Index of a node in the graph, in `[0, node_count)`.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    derive_more::From,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct NodeId(pub u32);

/// Index of an edge in the graph, in `[0, edge_count)`. Edges are
/// first-class search nodes in this engine's edge-based graph.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    derive_more::From,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct EdgeId(pub u32);

/// Sentinel meaning "no predecessor edge", used to seed a search from a
/// virtual source and in the transition strategy's neutral case.
pub const NO_PREDECESSOR: i64 = -1;

/// Reference to a temporal profile, as stored per-edge.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    derive_more::From,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct ProfileId(pub u16);

/// Sentinel profile id returned when a day-mask selection falls back to
/// the neutral multiplier.
pub const DEFAULT_PROFILE_ID: ProfileId = ProfileId(u16::MAX);

/// Reference to a landmark in the ALT heuristic's landmark table.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    derive_more::From,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct LandmarkId(pub u16);

impl Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}", self.0)
    }
}
impl Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "e{}", self.0)
    }
}
impl Display for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "p{}", self.0)
    }
}
impl Display for LandmarkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "l{}", self.0)
    }
}

impl NodeId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}
impl EdgeId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}
