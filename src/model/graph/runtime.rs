use super::error::{GraphError, GraphWarning};
use super::raw::RawGraphBuffers;
use crate::model::{EdgeId, NodeId, ProfileId};

/// Report returned by [`GraphRuntime::validate`]: structural problems are
/// errors, isolated nodes are warnings.
#[derive(Debug, Default, Clone)]
pub struct ValidationReport {
    pub errors: Vec<GraphError>,
    pub warnings: Vec<GraphWarning>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A read-only, memory-resident compressed-sparse-row (CSR) edge-based
/// graph. Edges are first-class: each one is addressable by [`EdgeId`] and
/// carries its own base weight and profile reference, enabling per-turn
/// costs to be layered on via [`crate::model::turn::TurnCostMap`].
///
/// Storage is structure-of-arrays, grounded on
/// `routee-compass-core::model::network::Graph`'s adjacency-list design,
/// generalized here from a `Vertex -> IndexMap` adjacency into flat CSR
/// arrays as spec.md §3/§4.1 require.
#[derive(Debug)]
pub struct GraphRuntime {
    first_edge: Box<[u32]>,
    edge_target: Box<[u32]>,
    edge_origin: Box<[u32]>,
    base_weight: Box<[f32]>,
    edge_profile_id: Box<[u16]>,
    coordinates: Option<Box<[(f64, f64)]>>,
}

impl TryFrom<RawGraphBuffers> for GraphRuntime {
    type Error = GraphError;

    fn try_from(raw: RawGraphBuffers) -> Result<Self, Self::Error> {
        let n = raw.node_count as usize;
        let m = raw.edge_count as usize;

        if raw.first_edge.len() != n + 1 {
            return Err(GraphError::LengthMismatch {
                field: "first_edge",
                expected: n + 1,
                actual: raw.first_edge.len(),
            });
        }
        if raw.edge_target.len() != m {
            return Err(GraphError::LengthMismatch {
                field: "edge_target",
                expected: m,
                actual: raw.edge_target.len(),
            });
        }
        if raw.base_weight.len() != m {
            return Err(GraphError::LengthMismatch {
                field: "base_weight",
                expected: m,
                actual: raw.base_weight.len(),
            });
        }
        if raw.edge_profile_id.len() != m {
            return Err(GraphError::LengthMismatch {
                field: "edge_profile_id",
                expected: m,
                actual: raw.edge_profile_id.len(),
            });
        }

        if raw.first_edge[0] != 0 {
            return Err(GraphError::BadFirstEdgeStart(raw.first_edge[0]));
        }
        if raw.first_edge[n] != raw.edge_count {
            return Err(GraphError::BadFirstEdgeEnd {
                expected: raw.edge_count,
                actual: raw.first_edge[n],
            });
        }
        for i in 0..n {
            if raw.first_edge[i] > raw.first_edge[i + 1] {
                return Err(GraphError::NotMonotone {
                    field: "first_edge",
                    index: i,
                });
            }
        }

        for (i, &t) in raw.edge_target.iter().enumerate() {
            if t >= raw.node_count {
                return Err(GraphError::NodeOutOfRange {
                    field: "edge_target",
                    index: i,
                    value: t,
                    node_count: raw.node_count,
                });
            }
        }

        for (i, &w) in raw.base_weight.iter().enumerate() {
            if !w.is_finite() || w < 0.0 {
                return Err(GraphError::BadBaseWeight { index: i, value: w });
            }
        }

        let edge_origin = match raw.edge_origin {
            Some(origin) => {
                if origin.len() != m {
                    return Err(GraphError::LengthMismatch {
                        field: "edge_origin",
                        expected: m,
                        actual: origin.len(),
                    });
                }
                for node in 0..n {
                    let start = raw.first_edge[node] as usize;
                    let end = raw.first_edge[node + 1] as usize;
                    for e in &origin[start..end] {
                        if *e != node as u32 {
                            return Err(GraphError::OriginMismatch {
                                index: start,
                                expected: node as u32,
                                actual: *e,
                            });
                        }
                    }
                }
                origin
            }
            None => {
                // single pass: a malformed legacy span (start > end already
                // rejected above) would otherwise be silently skipped by the
                // teacher's loader; this spec requires rejection instead.
                let mut origin = vec![0u32; m];
                for node in 0..n {
                    let start = raw.first_edge[node] as usize;
                    let end = raw.first_edge[node + 1] as usize;
                    if start > end || end > m {
                        return Err(GraphError::MalformedSpan {
                            node,
                            start: start as u32,
                            end: end as u32,
                        });
                    }
                    for slot in origin.iter_mut().take(end).skip(start) {
                        *slot = node as u32;
                    }
                }
                origin
            }
        };

        let coordinates = match raw.coordinates {
            None => None,
            Some(coords) => {
                if coords.len() != n {
                    return Err(GraphError::CoordinateCountMismatch {
                        expected: n,
                        actual: coords.len(),
                    });
                }
                for (i, (x, y)) in coords.iter().enumerate() {
                    if !x.is_finite() || !y.is_finite() {
                        return Err(GraphError::NonFiniteCoordinate {
                            index: i,
                            x: *x,
                            y: *y,
                        });
                    }
                }
                Some(coords.into_boxed_slice())
            }
        };

        log::info!(
            "graph runtime loaded: {} nodes, {} edges, coordinates={}",
            n,
            m,
            coordinates.is_some()
        );

        Ok(GraphRuntime {
            first_edge: raw.first_edge.into_boxed_slice(),
            edge_target: raw.edge_target.into_boxed_slice(),
            edge_origin: edge_origin.into_boxed_slice(),
            base_weight: raw.base_weight.into_boxed_slice(),
            edge_profile_id: raw.edge_profile_id.into_boxed_slice(),
            coordinates,
        })
    }
}

impl GraphRuntime {
    pub fn node_count(&self) -> u32 {
        self.first_edge.len() as u32 - 1
    }

    pub fn edge_count(&self) -> u32 {
        self.edge_target.len() as u32
    }

    pub fn destination(&self, e: EdgeId) -> Result<NodeId, GraphError> {
        self.edge_target
            .get(e.index())
            .map(|&t| NodeId(t))
            .ok_or_else(|| GraphError::EdgeNotFound(e.0, self.edge_count()))
    }

    pub fn origin(&self, e: EdgeId) -> Result<NodeId, GraphError> {
        self.edge_origin
            .get(e.index())
            .map(|&t| NodeId(t))
            .ok_or_else(|| GraphError::EdgeNotFound(e.0, self.edge_count()))
    }

    pub fn base_weight(&self, e: EdgeId) -> Result<f32, GraphError> {
        self.base_weight
            .get(e.index())
            .copied()
            .ok_or_else(|| GraphError::EdgeNotFound(e.0, self.edge_count()))
    }

    pub fn profile_id(&self, e: EdgeId) -> Result<ProfileId, GraphError> {
        self.edge_profile_id
            .get(e.index())
            .map(|&p| ProfileId(p))
            .ok_or_else(|| GraphError::EdgeNotFound(e.0, self.edge_count()))
    }

    pub fn outgoing_range(&self, n: NodeId) -> Result<(u32, u32), GraphError> {
        let i = n.index();
        if i >= self.first_edge.len() - 1 {
            return Err(GraphError::NodeNotFound(n.0, self.node_count()));
        }
        Ok((self.first_edge[i], self.first_edge[i + 1]))
    }

    pub fn degree(&self, n: NodeId) -> Result<f32, GraphError> {
        let (start, end) = self.outgoing_range(n)?;
        Ok((end - start) as f32)
    }

    /// iterate the outgoing edges of a node.
    pub fn edges_of_node(&self, n: NodeId) -> Result<impl Iterator<Item = EdgeId>, GraphError> {
        let (start, end) = self.outgoing_range(n)?;
        Ok((start..end).map(EdgeId))
    }

    /// the edge-based traversal primitive: the outgoing edges of the
    /// destination of a given edge, i.e. the possible next hops.
    pub fn edges_of_edge(&self, e: EdgeId) -> Result<impl Iterator<Item = EdgeId>, GraphError> {
        let dst = self.destination(e)?;
        self.edges_of_node(dst)
    }

    pub fn coordinate(&self, n: NodeId) -> Result<(f64, f64), GraphError> {
        let coords = self
            .coordinates
            .as_ref()
            .ok_or_else(|| GraphError::CoordinatesAbsent(n.0))?;
        coords
            .get(n.index())
            .copied()
            .ok_or_else(|| GraphError::NodeNotFound(n.0, self.node_count()))
    }

    pub fn has_coordinates(&self) -> bool {
        self.coordinates.is_some()
    }

    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::default();
        let n = self.node_count() as usize;
        let m = self.edge_count();

        if self.first_edge[0] != 0 {
            report
                .errors
                .push(GraphError::BadFirstEdgeStart(self.first_edge[0]));
        }
        if self.first_edge[n] != m {
            report.errors.push(GraphError::BadFirstEdgeEnd {
                expected: m,
                actual: self.first_edge[n],
            });
        }
        for i in 0..n {
            if self.first_edge[i] > self.first_edge[i + 1] {
                report.errors.push(GraphError::NotMonotone {
                    field: "first_edge",
                    index: i,
                });
            } else if self.first_edge[i] == self.first_edge[i + 1] {
                report.warnings.push(GraphWarning::IsolatedNode(i as u32));
            }
        }
        for (i, &t) in self.edge_target.iter().enumerate() {
            if t >= self.node_count() {
                report.errors.push(GraphError::NodeOutOfRange {
                    field: "edge_target",
                    index: i,
                    value: t,
                    node_count: self.node_count(),
                });
            }
        }
        if let Some(coords) = &self.coordinates {
            for (i, (x, y)) in coords.iter().enumerate() {
                if !x.is_finite() || !y.is_finite() {
                    report.errors.push(GraphError::NonFiniteCoordinate {
                        index: i,
                        x: *x,
                        y: *y,
                    });
                }
            }
        }

        if !report.errors.is_empty() {
            log::error!("graph validation found {} error(s)", report.errors.len());
        }
        for w in &report.warnings {
            log::warn!("graph validation warning: {:?}", w);
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear_chain(n: u32) -> RawGraphBuffers {
        // n nodes, n-1 edges, weight 1.0 each, profile 0
        let edge_count = n.saturating_sub(1);
        let first_edge: Vec<u32> = (0..=n)
            .map(|i| if i < edge_count { i } else { edge_count })
            .collect();
        let edge_target: Vec<u32> = (0..edge_count).map(|i| i + 1).collect();
        RawGraphBuffers {
            node_count: n,
            edge_count,
            first_edge,
            edge_target,
            edge_origin: None,
            base_weight: vec![1.0; edge_count as usize],
            edge_profile_id: vec![0; edge_count as usize],
            coordinates: None,
        }
    }

    #[test]
    fn csr_consistency_holds() {
        let g = GraphRuntime::try_from(linear_chain(5)).unwrap();
        assert_eq!(g.node_count(), 5);
        assert_eq!(g.edge_count(), 4);
        for n in 0..4u32 {
            let edges: Vec<EdgeId> = g.edges_of_node(NodeId(n)).unwrap().collect();
            assert_eq!(edges, vec![EdgeId(n)]);
            assert_eq!(g.origin(EdgeId(n)).unwrap(), NodeId(n));
        }
        assert_eq!(g.edges_of_node(NodeId(4)).unwrap().count(), 0);
    }

    #[test]
    fn rejects_bad_first_edge_end() {
        let mut raw = linear_chain(5);
        raw.first_edge[5] = 99;
        let err = GraphRuntime::try_from(raw).unwrap_err();
        assert!(matches!(err, GraphError::BadFirstEdgeEnd { .. }));
    }

    #[test]
    fn rejects_target_out_of_range() {
        let mut raw = linear_chain(5);
        raw.edge_target[0] = 50;
        let err = GraphRuntime::try_from(raw).unwrap_err();
        assert!(matches!(err, GraphError::NodeOutOfRange { .. }));
    }

    #[test]
    fn rejects_malformed_legacy_span_instead_of_skipping() {
        let mut raw = linear_chain(5);
        raw.first_edge = vec![0, 2, 1, 3, 4, 4];
        let err = GraphRuntime::try_from(raw).unwrap_err();
        assert!(matches!(
            err,
            GraphError::NotMonotone { .. } | GraphError::MalformedSpan { .. }
        ));
    }

    #[test]
    fn isolated_node_is_warning_not_error() {
        let raw = linear_chain(5);
        let g = GraphRuntime::try_from(raw).unwrap();
        let report = g.validate();
        assert!(report.is_ok());
        assert!(report
            .warnings
            .contains(&GraphWarning::IsolatedNode(4)));
    }
}
