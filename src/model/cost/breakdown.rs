use crate::model::overlay::OverlayState;
use crate::model::ProfileId;

/// Per-edge diagnostic trace through [`super::CostEngine::effective_cost`].
/// Populated only when a caller opts into explain mode; the hot path skips
/// it entirely.
#[derive(Debug, Clone, Copy, Default)]
pub struct CostBreakdown {
    pub profile_id: ProfileId,
    pub day_of_week: u8,
    pub bucket_index: usize,
    /// diagnostic-only in DISCRETE sampling mode; does not change which
    /// bucket was sampled.
    pub fractional_bucket: f64,
    pub temporal_multiplier: f64,
    pub live_state: OverlayState,
    pub speed_factor: f32,
    pub live_penalty_multiplier: f32,
    pub turn_applied: bool,
    pub turn_penalty: f32,
    pub edge_travel_cost: f32,
    pub effective_cost: f32,
}

impl CostBreakdown {
    /// restores neutral values in place, so a caller can reuse one
    /// allocation across many `effective_cost` calls in explain mode.
    pub fn reset(&mut self) {
        *self = CostBreakdown::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_restores_default_values() {
        let mut b = CostBreakdown {
            bucket_index: 7,
            effective_cost: 42.0,
            ..CostBreakdown::default()
        };
        b.reset();
        assert_eq!(b.bucket_index, 0);
        assert_eq!(b.effective_cost, 0.0);
    }
}
