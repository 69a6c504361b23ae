use super::error::LiveOverlayError;
use crate::model::EdgeId;
use std::collections::HashMap;

/// Overlay state for a single edge.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum OverlayState {
    #[default]
    Missing,
    Ok,
    Blocked,
}

/// Result of a [`LiveOverlay::lookup`]: the classified state, the raw
/// speed factor (informational), and the multiplier to apply to
/// `base_weight * temporal_multiplier` in [`crate::model::cost::CostEngine`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiveLookup {
    pub state: OverlayState,
    pub speed_factor: f32,
    pub live_penalty_multiplier: f32,
}

impl LiveLookup {
    const MISSING: LiveLookup = LiveLookup {
        state: OverlayState::Missing,
        speed_factor: 1.0,
        live_penalty_multiplier: 1.0,
    };
}

/// Already-decoded live overlay record.
#[derive(Debug, Clone, Copy)]
pub struct RawLiveEntry {
    pub edge_id: u32,
    pub blocked: bool,
    pub speed_factor: f32,
    pub valid_until_tick: i64,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    blocked: bool,
    speed_factor: f32,
    valid_until_tick: i64,
}

/// Optional per-edge speed/block overrides with a freshness deadline.
/// Immutable once constructed; this specification does not model a
/// mutable live-refresh pipeline (see spec.md §5's RCU-swap note).
#[derive(Debug, Default)]
pub struct LiveOverlay {
    entries: HashMap<EdgeId, Entry>,
}

impl LiveOverlay {
    pub fn try_from_raw(raw: &[RawLiveEntry]) -> Result<Self, LiveOverlayError> {
        let mut entries = HashMap::with_capacity(raw.len());
        for r in raw {
            if !r.blocked && (!r.speed_factor.is_finite() || r.speed_factor <= 0.0) {
                return Err(LiveOverlayError::BadSpeedFactor(r.edge_id, r.speed_factor));
            }
            entries.insert(
                EdgeId(r.edge_id),
                Entry {
                    blocked: r.blocked,
                    speed_factor: r.speed_factor,
                    valid_until_tick: r.valid_until_tick,
                },
            );
        }
        Ok(LiveOverlay { entries })
    }

    pub fn empty() -> Self {
        LiveOverlay {
            entries: HashMap::new(),
        }
    }

    pub fn lookup(&self, edge_id: EdgeId, now_ticks: i64) -> LiveLookup {
        match self.entries.get(&edge_id) {
            None => LiveLookup::MISSING,
            Some(e) if now_ticks > e.valid_until_tick => LiveLookup::MISSING,
            Some(e) if e.blocked => LiveLookup {
                state: OverlayState::Blocked,
                speed_factor: 0.0,
                live_penalty_multiplier: f32::INFINITY,
            },
            Some(e) => LiveLookup {
                state: OverlayState::Ok,
                speed_factor: e.speed_factor,
                live_penalty_multiplier: 1.0 / e.speed_factor,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_entry_is_neutral() {
        let overlay = LiveOverlay::empty();
        let r = overlay.lookup(EdgeId(0), 100);
        assert_eq!(r.state, OverlayState::Missing);
        assert_eq!(r.live_penalty_multiplier, 1.0);
    }

    #[test]
    fn expired_entry_falls_back_to_missing() {
        let raw = vec![RawLiveEntry {
            edge_id: 0,
            blocked: false,
            speed_factor: 0.5,
            valid_until_tick: 10,
        }];
        let overlay = LiveOverlay::try_from_raw(&raw).unwrap();
        let r = overlay.lookup(EdgeId(0), 11);
        assert_eq!(r.state, OverlayState::Missing);
    }

    #[test]
    fn blocked_is_infinite_penalty() {
        let raw = vec![RawLiveEntry {
            edge_id: 0,
            blocked: true,
            speed_factor: 0.0,
            valid_until_tick: 100,
        }];
        let overlay = LiveOverlay::try_from_raw(&raw).unwrap();
        let r = overlay.lookup(EdgeId(0), 5);
        assert_eq!(r.state, OverlayState::Blocked);
        assert!(r.live_penalty_multiplier.is_infinite());
    }

    #[test]
    fn ok_entry_is_inverse_speed_factor() {
        let raw = vec![RawLiveEntry {
            edge_id: 0,
            blocked: false,
            speed_factor: 0.5,
            valid_until_tick: 100,
        }];
        let overlay = LiveOverlay::try_from_raw(&raw).unwrap();
        let r = overlay.lookup(EdgeId(0), 5);
        assert_eq!(r.state, OverlayState::Ok);
        assert_eq!(r.live_penalty_multiplier, 2.0);
        assert!(r.live_penalty_multiplier >= 1.0);
    }

    #[test]
    fn rejects_nonpositive_speed_factor_for_ok_state() {
        let raw = vec![RawLiveEntry {
            edge_id: 0,
            blocked: false,
            speed_factor: 0.0,
            valid_until_tick: 100,
        }];
        assert!(LiveOverlay::try_from_raw(&raw).is_err());
    }
}
