use super::error::SearchError;
use super::request::{Algorithm, Request, Response, SearchTelemetry};
use super::session::SearchSession;
use crate::model::cost::CostEngine;
use crate::model::graph::GraphRuntime;
use crate::model::heuristic::{HeuristicProvider, build_heuristic_provider, HeuristicConfig};
use crate::model::mapping::ExternalIdMap;
use crate::model::overlay::LiveOverlay;
use crate::model::profile::ProfileStore;
use crate::model::temporal::ResolvedTemporalContext;
use crate::model::transition::ResolvedTransitionContext;
use crate::model::turn::TurnCostMap;
use crate::model::{EdgeId, NodeId, NO_PREDECESSOR};

/// Borrows every read-only runtime artifact a query needs and runs the
/// edge-based time-dependent shortest-path search described in spec.md
/// §4.8. Stateless across queries; all mutable scratch state lives in the
/// caller-owned [`SearchSession`], mirroring the teacher's split between a
/// stateless `SearchAlgorithm` and a per-query `SearchInstance`.
#[derive(Debug)]
pub struct SearchCore<'a> {
    pub graph: &'a GraphRuntime,
    pub profiles: &'a ProfileStore,
    pub overlay: &'a LiveOverlay,
    pub turn_cost_map: Option<&'a TurnCostMap>,
    pub temporal_ctx: &'a ResolvedTemporalContext,
    pub transition_ctx: &'a ResolvedTransitionContext,
    pub cost_engine: &'a CostEngine,
}

impl<'a> SearchCore<'a> {
    /// Resolves a [`Request`]'s external node ids through `id_map`, builds
    /// the requested heuristic provider, and runs the search.
    pub fn run_request(
        &self,
        session: &mut SearchSession,
        id_map: &dyn ExternalIdMap,
        request: &Request,
        landmark_store: Option<&'a crate::model::heuristic::LandmarkStore>,
    ) -> Result<Response, SearchError> {
        let source = id_map
            .to_internal(&request.source_external_id)
            .ok_or_else(|| {
                SearchError::InvalidInput(format!(
                    "unknown source external id: {}",
                    request.source_external_id
                ))
            })?;
        let target = id_map
            .to_internal(&request.target_external_id)
            .ok_or_else(|| {
                SearchError::InvalidInput(format!(
                    "unknown target external id: {}",
                    request.target_external_id
                ))
            })?;

        let heuristic_config = HeuristicConfig {
            kind: request.heuristic_type,
            landmark_store,
        };
        let provider = build_heuristic_provider(&heuristic_config, self.graph, self.profiles)?;

        self.run(
            session,
            source,
            target,
            request.departure_ticks,
            request.algorithm,
            &provider,
        )
    }

    /// Runs a single point-to-point search from `source` to `target`,
    /// departing at `departure_ticks`. `session` is reset at entry so it
    /// may be reused across queries against the same static graph.
    pub fn run(
        &self,
        session: &mut SearchSession,
        source: NodeId,
        target: NodeId,
        departure_ticks: i64,
        algorithm: Algorithm,
        heuristic_provider: &HeuristicProvider<'_>,
    ) -> Result<Response, SearchError> {
        session.reset();

        let goal = match algorithm {
            Algorithm::Dijkstra => dijkstra_bound(target)?,
            Algorithm::AStar => heuristic_provider.bind_goal(target)?,
        };

        if source == target {
            return Ok(Response {
                reachable: true,
                edge_sequence: Vec::new(),
                total_cost: 0.0,
                arrival_ticks: departure_ticks,
                telemetry: Some(SearchTelemetry {
                    states_settled: 0,
                    peak_active_states: 0,
                    pool_utilization: 0.0,
                    pool_leak_count: 0,
                }),
            });
        }

        for seed_edge in self.graph.edges_of_node(source)? {
            let cost = self.cost_engine.effective_cost(
                self.graph,
                self.profiles,
                self.overlay,
                self.turn_cost_map,
                self.temporal_ctx,
                self.transition_ctx,
                None,
                seed_edge,
                departure_ticks,
                None,
            )?;
            if !cost.is_finite() {
                continue;
            }
            let destination = self.graph.destination(seed_edge)?;
            let h = goal.estimate_from_node(destination)?;
            let priority = cost + h as f32;
            session
                .queue
                .insert(seed_edge, departure_ticks + duration_from_cost(cost), cost, priority, NO_PREDECESSOR)?;
        }

        let mut states_settled = 0usize;

        let response = loop {
            if session.is_cancelled() {
                session.queue.clear();
                session.visited.clear();
                return Err(SearchError::Cancelled);
            }

            let Some((state, token)) = session.queue.extract_min() else {
                break Response::unreachable();
            };

            if session.visited.is_marked(state.edge_id) {
                session.queue.recycle(token)?;
                continue;
            }
            session.visited.mark(state.edge_id);
            session.queue.recycle(token)?;
            states_settled += 1;

            session.predecessor[state.edge_id.index()] = state.predecessor_edge_id;
            session.arrival[state.edge_id.index()] = state.arrival_time;
            session.cost[state.edge_id.index()] = state.cost;

            let destination = self.graph.destination(state.edge_id)?;
            if destination == target {
                break self.reconstruct(session, state.edge_id, departure_ticks)?;
            }

            for next_edge in self.graph.edges_of_edge(state.edge_id)? {
                if session.visited.is_marked(next_edge) {
                    continue;
                }
                let edge_cost = self.cost_engine.effective_cost(
                    self.graph,
                    self.profiles,
                    self.overlay,
                    self.turn_cost_map,
                    self.temporal_ctx,
                    self.transition_ctx,
                    Some(state.edge_id),
                    next_edge,
                    state.arrival_time,
                    None,
                )?;
                if !edge_cost.is_finite() {
                    continue;
                }
                let g = state.cost + edge_cost;
                let next_destination = self.graph.destination(next_edge)?;
                let h = goal.estimate_from_node(next_destination)?;
                let priority = g + h as f32;
                let arrival = state.arrival_time + duration_from_cost(edge_cost);
                session
                    .queue
                    .insert(next_edge, arrival, g, priority, state.edge_id.0 as i64)?;
            }
        };

        Ok(Response {
            telemetry: Some(SearchTelemetry {
                states_settled,
                peak_active_states: session.queue.peak_active_states(),
                pool_utilization: session.pool_utilization(),
                pool_leak_count: session.pool_leak_count(),
            }),
            ..response
        })
    }

    fn reconstruct(
        &self,
        session: &SearchSession,
        terminal_edge: EdgeId,
        departure_ticks: i64,
    ) -> Result<Response, SearchError> {
        let mut sequence = Vec::new();
        let mut cursor = terminal_edge.0 as i64;
        while cursor != NO_PREDECESSOR {
            let edge = EdgeId(cursor as u32);
            sequence.push(edge);
            cursor = session.predecessor[edge.index()];
        }
        sequence.reverse();

        let total_cost = session.cost[terminal_edge.index()];
        let arrival_ticks = session.arrival[terminal_edge.index()];
        let _ = departure_ticks;

        Ok(Response {
            reachable: true,
            edge_sequence: sequence,
            total_cost,
            arrival_ticks,
            telemetry: None,
        })
    }
}

/// converts an effective-cost value (engine time units) into whole ticks
/// of elapsed search-clock time.
fn duration_from_cost(cost: f32) -> i64 {
    if !cost.is_finite() {
        return i64::MAX;
    }
    cost.round() as i64
}

/// Dijkstra always runs with a null (zero) bound regardless of what the
/// request's heuristic_type named.
fn dijkstra_bound(target: NodeId) -> Result<crate::model::heuristic::GoalBoundHeuristic<'static>, SearchError> {
    Ok(HeuristicProvider::Null.bind_goal(target)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::cost::{CostEngineConfig, DaySamplingPolicy};
    use crate::model::graph::RawGraphBuffers;
    use crate::model::heuristic::HeuristicKind;
    use crate::model::mapping::test_double::InMemoryIdMap;
    use crate::model::overlay::LiveOverlay;
    use crate::model::profile::ProfileStore;
    use crate::model::temporal::ResolvedTemporalContext;
    use crate::model::transition::{ResolvedTransitionContext, TransitionTraitKind};
    use crate::model::TimeUnit;

    fn linear_chain() -> RawGraphBuffers {
        // 0 -> 1 -> 2, edge weights 1.0 and 3.0 (engine-unit seconds)
        RawGraphBuffers {
            node_count: 3,
            edge_count: 2,
            first_edge: vec![0, 1, 2, 2],
            edge_target: vec![1, 2],
            edge_origin: None,
            base_weight: vec![1.0, 3.0],
            edge_profile_id: vec![0, 0],
            coordinates: None,
        }
    }

    #[test]
    fn linear_chain_reaches_target_with_summed_cost() {
        let raw = linear_chain();
        let graph = GraphRuntime::try_from(raw).unwrap();
        let profiles = ProfileStore::try_from_raw(&[]).unwrap();
        let overlay = LiveOverlay::empty();
        let temporal_ctx = ResolvedTemporalContext::linear();
        let transition_ctx = ResolvedTransitionContext::new(TransitionTraitKind::EdgeBased);
        let cost_engine = CostEngine::new(CostEngineConfig {
            time_unit: TimeUnit::Seconds,
            bucket_size_seconds: 3600.0,
            sampling_policy: DaySamplingPolicy::Discrete,
        })
        .unwrap();

        let core = SearchCore {
            graph: &graph,
            profiles: &profiles,
            overlay: &overlay,
            turn_cost_map: None,
            temporal_ctx: &temporal_ctx,
            transition_ctx: &transition_ctx,
            cost_engine: &cost_engine,
        };

        let mut session = SearchSession::new(graph.edge_count() as usize, 16);
        let provider = HeuristicProvider::Null;
        let response = core
            .run(&mut session, NodeId(0), NodeId(2), 0, Algorithm::Dijkstra, &provider)
            .unwrap();

        assert!(response.reachable);
        assert_eq!(response.total_cost, 4.0);
        assert_eq!(response.edge_sequence, vec![EdgeId(0), EdgeId(1)]);

        let id_map = InMemoryIdMap::from_pairs([
            ("a".to_string(), 0),
            ("b".to_string(), 1),
            ("c".to_string(), 2),
        ]);
        let request = Request {
            source_external_id: "a".to_string(),
            target_external_id: "c".to_string(),
            departure_ticks: 0,
            algorithm: Algorithm::Dijkstra,
            heuristic_type: HeuristicKind::None,
        };
        let response2 = core
            .run_request(&mut session, &id_map, &request, None)
            .unwrap();
        assert!(response2.reachable);
        assert_eq!(response2.total_cost, 4.0);
    }

    #[test]
    fn disconnected_target_is_unreachable() {
        let raw = RawGraphBuffers {
            node_count: 3,
            edge_count: 1,
            first_edge: vec![0, 1, 1, 1],
            edge_target: vec![1],
            edge_origin: None,
            base_weight: vec![1.0],
            edge_profile_id: vec![0],
            coordinates: None,
        };
        let graph = GraphRuntime::try_from(raw).unwrap();
        let profiles = ProfileStore::try_from_raw(&[]).unwrap();
        let overlay = LiveOverlay::empty();
        let temporal_ctx = ResolvedTemporalContext::linear();
        let transition_ctx = ResolvedTransitionContext::new(TransitionTraitKind::EdgeBased);
        let cost_engine = CostEngine::new(CostEngineConfig {
            time_unit: TimeUnit::Seconds,
            bucket_size_seconds: 3600.0,
            sampling_policy: DaySamplingPolicy::Discrete,
        })
        .unwrap();
        let core = SearchCore {
            graph: &graph,
            profiles: &profiles,
            overlay: &overlay,
            turn_cost_map: None,
            temporal_ctx: &temporal_ctx,
            transition_ctx: &transition_ctx,
            cost_engine: &cost_engine,
        };
        let mut session = SearchSession::new(graph.edge_count() as usize, 16);
        let provider = HeuristicProvider::Null;
        let response = core
            .run(&mut session, NodeId(0), NodeId(2), 0, Algorithm::Dijkstra, &provider)
            .unwrap();
        assert!(!response.reachable);
    }
}
