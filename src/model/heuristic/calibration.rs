use super::error::HeuristicError;
use crate::model::graph::GraphRuntime;
use crate::model::profile::ProfileStore;
use crate::model::{EdgeId, NodeId};

/// Earth radius used by the spherical great-circle distance, in metres.
pub const EARTH_RADIUS_METERS: f64 = 6_371_008.8;

/// `hypot(dx, dy)` between two Euclidean coordinate pairs.
pub fn euclidean_distance(graph: &GraphRuntime, a: NodeId, b: NodeId) -> Result<f64, HeuristicError> {
    if !graph.has_coordinates() {
        return Err(HeuristicError::CoordinatesRequired);
    }
    let (ax, ay) = graph.coordinate(a)?;
    let (bx, by) = graph.coordinate(b)?;
    Ok((ax - bx).hypot(ay - by))
}

/// Haversine great-circle distance over geodetic `(lat, lon)` degrees, per
/// spec.md §4.7: delta-longitude normalised into `(-180, 180]`, the
/// intermediate `a` clamped to `[0, 1]`.
pub fn spherical_distance(graph: &GraphRuntime, a: NodeId, b: NodeId) -> Result<f64, HeuristicError> {
    if !graph.has_coordinates() {
        return Err(HeuristicError::CoordinatesRequired);
    }
    let (lat1, lon1) = graph.coordinate(a)?;
    let (lat2, lon2) = graph.coordinate(b)?;
    validate_geodetic(lat1, lon1)?;
    validate_geodetic(lat2, lon2)?;

    let mut dlon = lon2 - lon1;
    dlon = ((dlon + 180.0).rem_euclid(360.0)) - 180.0;
    if dlon <= -180.0 {
        dlon += 360.0;
    }
    let dlat = (lat2 - lat1).to_radians();
    let dlon_rad = dlon.to_radians();

    let a_term = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon_rad / 2.0).sin().powi(2);
    let a_term = a_term.clamp(0.0, 1.0);
    let c = 2.0 * a_term.sqrt().asin();
    Ok(EARTH_RADIUS_METERS * c)
}

pub fn validate_geodetic(lat: f64, lon: f64) -> Result<(), HeuristicError> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err(HeuristicError::LatRange(lat));
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(HeuristicError::LonRange(lon));
    }
    Ok(())
}

/// Per-edge lower-bound weight: `base_weight * min_temporal_multiplier`,
/// omitting live and turn contributions (both have a `1.0`/`0.0` lower
/// bound), saturated at `f32::MAX` rather than allowed to reach `+inf` —
/// landmark distances must stay summable.
pub fn lower_bound_weight(
    graph: &GraphRuntime,
    profiles: &ProfileStore,
    edge: EdgeId,
) -> Result<f32, HeuristicError> {
    let base = graph.base_weight(edge)?;
    let profile_id = graph.profile_id(edge)?;
    let min_mult = profiles.min_multiplier_across_week(profile_id);
    let raw = base as f64 * min_mult;
    Ok(if raw > f32::MAX as f64 {
        f32::MAX
    } else {
        raw as f32
    })
}

/// Computes the calibrated lower-bound-cost-per-distance scale used by the
/// Euclidean and spherical heuristics: the minimum, over all edges with a
/// positive metric distance, of `lower_bound_cost / distance`.
pub fn compute_lower_bound_scale<F>(
    graph: &GraphRuntime,
    profiles: &ProfileStore,
    distance: F,
) -> Result<f64, HeuristicError>
where
    F: Fn(NodeId, NodeId) -> Result<f64, HeuristicError>,
{
    if graph.edge_count() == 0 {
        return Err(HeuristicError::CalibrationEmptyGraph);
    }

    let mut min_ratio = f64::INFINITY;
    let mut saw_ratio = false;

    for raw_edge in 0..graph.edge_count() {
        let edge = EdgeId(raw_edge);
        let base = graph.base_weight(edge)?;
        if !base.is_finite() || base < 0.0 {
            return Err(HeuristicError::CalibrationInvalidBaseWeight(raw_edge, base));
        }
        let profile_id = graph.profile_id(edge)?;
        let min_mult = profiles.min_multiplier_across_week(profile_id);
        if !(min_mult > 0.0) || !min_mult.is_finite() {
            return Err(HeuristicError::CalibrationInvalidTemporalMinimum(
                profile_id, min_mult,
            ));
        }

        let origin = graph.origin(edge)?;
        let dest = graph.destination(edge)?;
        let d = distance(origin, dest)?;
        if d.is_nan() || d < 0.0 {
            return Err(HeuristicError::CalibrationInvalidEdgeDistance(raw_edge, d));
        }
        if !(d > 0.0) {
            continue;
        }

        let lower_bound_cost = base as f64 * min_mult;
        let ratio = lower_bound_cost / d;
        if !ratio.is_finite() || ratio < 0.0 {
            return Err(HeuristicError::CalibrationInvalidRatio(raw_edge, ratio));
        }
        saw_ratio = true;
        if ratio < min_ratio {
            min_ratio = ratio;
        }
    }

    if !saw_ratio {
        return Err(HeuristicError::CalibrationEmptyGraph);
    }
    log::info!("heuristic calibration: lower-bound-cost-per-distance scale = {min_ratio}");
    Ok(min_ratio)
}
