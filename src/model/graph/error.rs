/// Failures raised while validating and constructing a [`super::GraphRuntime`]
/// from a decoded artifact buffer. All variants are fatal at startup.
///
/// Grounded on `routee-compass-core::model::network::NetworkError`, whose
/// `EdgeNotFound`/`VertexNotFound`/`AttributeError` shape is generalized
/// here into a single `InvalidArtifact`-style field-or-stage report.
#[derive(thiserror::Error, Debug)]
pub enum GraphError {
    #[error("invalid artifact: field `{field}` has length {actual}, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("invalid artifact: field `{field}` not monotonically non-decreasing at index {index}")]
    NotMonotone { field: &'static str, index: usize },
    #[error("invalid artifact: `first_edge[0]` must be 0, found {0}")]
    BadFirstEdgeStart(u32),
    #[error("invalid artifact: `first_edge[N]` must equal edge_count ({expected}), found {actual}")]
    BadFirstEdgeEnd { expected: u32, actual: u32 },
    #[error("invalid artifact: `{field}[{index}]` value {value} out of node range [0, {node_count})")]
    NodeOutOfRange {
        field: &'static str,
        index: usize,
        value: u32,
        node_count: u32,
    },
    #[error("invalid artifact: `edge_origin[{index}]` = {actual} inconsistent with CSR span owner {expected}")]
    OriginMismatch {
        index: usize,
        expected: u32,
        actual: u32,
    },
    #[error("invalid artifact: `base_weight[{index}]` is not finite and non-negative: {value}")]
    BadBaseWeight { index: usize, value: f32 },
    #[error("invalid artifact: coordinate count {actual} does not match node count {expected}")]
    CoordinateCountMismatch { expected: usize, actual: usize },
    #[error("invalid artifact: coordinate at node {index} is not finite: ({x}, {y})")]
    NonFiniteCoordinate { index: usize, x: f64, y: f64 },
    #[error("invalid artifact: CSR span for node {node} is malformed ({start}..{end})")]
    MalformedSpan {
        node: usize,
        start: u32,
        end: u32,
    },
    #[error("node {0} out of range [0, {1})")]
    NodeNotFound(u32, u32),
    #[error("edge {0} out of range [0, {1})")]
    EdgeNotFound(u32, u32),
    #[error("node {0} has no coordinates loaded")]
    CoordinatesAbsent(u32),
}

/// Non-fatal findings surfaced by [`super::GraphRuntime::validate`].
#[derive(Debug, Clone, PartialEq)]
pub enum GraphWarning {
    IsolatedNode(u32),
}
