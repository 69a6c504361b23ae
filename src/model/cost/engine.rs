use super::breakdown::CostBreakdown;
use super::error::CostEngineError;
use crate::model::graph::GraphRuntime;
use crate::model::overlay::LiveOverlay;
use crate::model::profile::ProfileStore;
use crate::model::temporal::ResolvedTemporalContext;
use crate::model::transition::ResolvedTransitionContext;
use crate::model::turn::TurnCostMap;
use crate::model::{EdgeId, TimeUnit};

/// How a profile's bucket array is sampled at an arbitrary instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DaySamplingPolicy {
    /// truncates to the containing bucket.
    Discrete,
    /// cyclic-linearly interpolates between neighbouring buckets.
    Interpolated,
}

/// Startup-bound configuration for [`CostEngine`].
#[derive(Debug, Clone)]
pub struct CostEngineConfig {
    pub time_unit: TimeUnit,
    pub bucket_size_seconds: f64,
    pub sampling_policy: DaySamplingPolicy,
}

/// Composes [`GraphRuntime`], [`ProfileStore`], [`LiveOverlay`] and the two
/// resolved strategy contexts into the canonical effective-cost formula.
/// Stateless beyond its startup config; the artifacts it reads are borrowed
/// per call, mirroring the teacher's `CostModel` pattern of a thin
/// computation layer over shared, immutable runtime tables.
#[derive(Debug, Clone)]
pub struct CostEngine {
    time_unit: TimeUnit,
    bucket_size_seconds: f64,
    bucket_size_ticks: i64,
    sampling_policy: DaySamplingPolicy,
}

impl CostEngine {
    pub fn new(config: CostEngineConfig) -> Result<Self, CostEngineError> {
        if !(config.bucket_size_seconds > 0.0) || !config.bucket_size_seconds.is_finite() {
            return Err(CostEngineError::InvalidInput(format!(
                "bucket_size_seconds must be positive and finite, got {}",
                config.bucket_size_seconds
            )));
        }
        let ticks_per_second = config.time_unit.ticks_per_second() as f64;
        let bucket_size_ticks_f = config.bucket_size_seconds * ticks_per_second;
        if !bucket_size_ticks_f.is_finite() || bucket_size_ticks_f > i64::MAX as f64 {
            return Err(CostEngineError::InvalidInput(
                "bucket_size_seconds overflows the engine's tick resolution".to_string(),
            ));
        }
        let bucket_size_ticks = bucket_size_ticks_f.round() as i64;
        if bucket_size_ticks <= 0 {
            return Err(CostEngineError::InvalidInput(
                "bucket_size_seconds rounds to zero ticks".to_string(),
            ));
        }

        Ok(CostEngine {
            time_unit: config.time_unit,
            bucket_size_seconds: config.bucket_size_seconds,
            bucket_size_ticks,
            sampling_policy: config.sampling_policy,
        })
    }

    /// The canonical effective-cost computation (spec.md §4.5):
    ///
    /// ```text
    /// edge_travel_cost = base_weight * temporal_multiplier * live_penalty    (+inf if blocked)
    /// effective_cost   = edge_travel_cost + turn_penalty                    (+inf if either is +inf)
    /// ```
    ///
    /// `from_edge` is `None` for a virtual-source seed; `breakdown`, when
    /// supplied, is populated with every intermediate value for explain
    /// mode.
    #[allow(clippy::too_many_arguments)]
    pub fn effective_cost(
        &self,
        graph: &GraphRuntime,
        profiles: &ProfileStore,
        overlay: &LiveOverlay,
        turn_cost_map: Option<&TurnCostMap>,
        temporal_ctx: &ResolvedTemporalContext,
        transition_ctx: &ResolvedTransitionContext,
        from_edge: Option<EdgeId>,
        to_edge: EdgeId,
        entry_ticks: i64,
        breakdown: Option<&mut CostBreakdown>,
    ) -> Result<f32, CostEngineError> {
        if to_edge.0 >= graph.edge_count() {
            return Err(CostEngineError::InvalidInput(format!(
                "to_edge {} out of range [0, {})",
                to_edge.0,
                graph.edge_count()
            )));
        }
        if let Some(f) = from_edge {
            if f.0 >= graph.edge_count() {
                return Err(CostEngineError::InvalidInput(format!(
                    "from_edge {} out of range [0, {})",
                    f.0,
                    graph.edge_count()
                )));
            }
        }

        let base_weight = graph.base_weight(to_edge)?;
        let profile_id = graph.profile_id(to_edge)?;

        let day_of_week = temporal_ctx.resolve_day_of_week(entry_ticks, self.time_unit);
        let day_mask_aware = temporal_ctx.day_mask_aware();

        let fractional_bucket =
            temporal_ctx.resolve_fractional_bucket(entry_ticks, self.bucket_size_ticks, self.time_unit);

        let temporal_multiplier = match self.sampling_policy {
            DaySamplingPolicy::Discrete => {
                let bucket_index =
                    temporal_ctx.resolve_bucket_index(entry_ticks, self.bucket_size_seconds, self.time_unit);
                if day_mask_aware {
                    profiles.multiplier_for_day(profile_id, day_of_week, bucket_index)
                } else {
                    profiles.multiplier(profile_id, bucket_index)
                }
            }
            DaySamplingPolicy::Interpolated => {
                if day_mask_aware {
                    profiles.interpolate_for_day(profile_id, day_of_week, fractional_bucket)
                } else {
                    profiles.interpolate(profile_id, fractional_bucket)
                }
            }
        };
        if !(temporal_multiplier > 0.0) || !temporal_multiplier.is_finite() {
            return Err(CostEngineError::ContractViolation(format!(
                "temporal multiplier for profile {} is not a positive finite value: {}",
                profile_id, temporal_multiplier
            )));
        }

        let live = overlay.lookup(to_edge, entry_ticks);
        if live.live_penalty_multiplier < 1.0 || live.live_penalty_multiplier.is_nan() {
            return Err(CostEngineError::ContractViolation(format!(
                "live penalty multiplier for edge {} must be >= 1.0 or +inf, got {}",
                to_edge, live.live_penalty_multiplier
            )));
        }

        let edge_travel_cost = if live.live_penalty_multiplier.is_infinite() {
            f32::INFINITY
        } else {
            let intermediate =
                base_weight as f64 * temporal_multiplier * live.live_penalty_multiplier as f64;
            saturate(intermediate)?
        };

        let (turn_penalty, turn_applied) = transition_ctx
            .evaluate_packed(turn_cost_map, from_edge, to_edge)
            .decode();
        if turn_penalty < 0.0 || turn_penalty.is_nan() {
            return Err(CostEngineError::ContractViolation(format!(
                "turn penalty from {:?} to {} must be non-negative or +inf, got {}",
                from_edge, to_edge, turn_penalty
            )));
        }

        let effective_cost = saturate(edge_travel_cost as f64 + turn_penalty as f64)?;

        if let Some(b) = breakdown {
            b.profile_id = profile_id;
            b.day_of_week = day_of_week;
            b.bucket_index =
                temporal_ctx.resolve_bucket_index(entry_ticks, self.bucket_size_seconds, self.time_unit);
            b.fractional_bucket = fractional_bucket;
            b.temporal_multiplier = temporal_multiplier;
            b.live_state = live.state;
            b.speed_factor = live.speed_factor;
            b.live_penalty_multiplier = live.live_penalty_multiplier;
            b.turn_applied = turn_applied;
            b.turn_penalty = turn_penalty;
            b.edge_travel_cost = edge_travel_cost;
            b.effective_cost = effective_cost;
        }

        Ok(effective_cost)
    }
}

/// Saturates an f64 intermediate into f32 per spec.md §4.5: a non-finite
/// positive value (or one exceeding `f32::MAX`) saturates to `+inf`; a
/// negative or NaN value is a contract violation, not a valid cost.
fn saturate(value: f64) -> Result<f32, CostEngineError> {
    if value.is_nan() {
        return Err(CostEngineError::ContractViolation(
            "cost computation produced NaN".to_string(),
        ));
    }
    if value < 0.0 {
        return Err(CostEngineError::ContractViolation(format!(
            "cost computation produced a negative value: {}",
            value
        )));
    }
    if value.is_infinite() || value > f32::MAX as f64 {
        return Ok(f32::INFINITY);
    }
    Ok(value as f32)
}
