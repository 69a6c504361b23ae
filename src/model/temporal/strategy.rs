use super::offset_cache::OffsetCache;
use crate::model::TimeUnit;

/// The closed set of temporal traits. Dispatch is a tagged enum rather than
/// a trait object, per spec.md §9's redesign note: the variant set is
/// closed, so dynamic dispatch buys nothing here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TemporalTraitKind {
    /// resolves in naive ticks-since-epoch; not day-mask-aware.
    Linear,
    /// day-mask-aware; uses a timezone and a DST-aware offset cache.
    Calendar,
}

impl TemporalTraitKind {
    pub fn parse(id: &str) -> Option<Self> {
        match id {
            "LINEAR" => Some(TemporalTraitKind::Linear),
            "CALENDAR" => Some(TemporalTraitKind::Calendar),
            _ => None,
        }
    }

    pub fn day_mask_aware(&self) -> bool {
        matches!(self, TemporalTraitKind::Calendar)
    }
}

/// Immutable, startup-bound temporal context attached to every request.
/// Stateless strategy dispatch plus (for `CALENDAR`) a resolved zone and
/// offset cache.
#[derive(Debug)]
pub struct ResolvedTemporalContext {
    pub trait_kind: TemporalTraitKind,
    zone: Option<TemporalZoneBinding>,
}

#[derive(Debug)]
struct TemporalZoneBinding {
    offset_cache: OffsetCache,
}

impl ResolvedTemporalContext {
    pub fn linear() -> Self {
        ResolvedTemporalContext {
            trait_kind: TemporalTraitKind::Linear,
            zone: None,
        }
    }

    pub fn calendar(offset_cache: OffsetCache) -> Self {
        ResolvedTemporalContext {
            trait_kind: TemporalTraitKind::Calendar,
            zone: Some(TemporalZoneBinding { offset_cache }),
        }
    }

    pub fn day_mask_aware(&self) -> bool {
        self.trait_kind.day_mask_aware()
    }

    fn local_seconds(&self, ticks: i64, unit: TimeUnit) -> i64 {
        let epoch_seconds = ticks.div_euclid(unit.ticks_per_second());
        match &self.zone {
            None => epoch_seconds,
            Some(z) => epoch_seconds + z.offset_cache.lookup(epoch_seconds),
        }
    }

    /// Monday = 0 .. Sunday = 6. `LINEAR` computes this in naive ticks
    /// (no timezone conversion); callers only consult it when the bound
    /// trait is day-mask-aware.
    pub fn resolve_day_of_week(&self, ticks: i64, unit: TimeUnit) -> u8 {
        let local = self.local_seconds(ticks, unit);
        let days_since_epoch = local.div_euclid(86_400);
        // 1970-01-01 was a Thursday (index 3, Monday = 0).
        ((days_since_epoch + 3).rem_euclid(7)) as u8
    }

    /// Integer bucket index for DISCRETE sampling.
    pub fn resolve_bucket_index(&self, ticks: i64, bucket_size_seconds: f64, unit: TimeUnit) -> usize {
        self.resolve_fractional_bucket_raw(ticks, bucket_size_seconds, unit) as usize
    }

    /// Fractional bucket coordinate for INTERPOLATED sampling, and for the
    /// diagnostic-only fractional value emitted in DISCRETE explain mode
    /// (spec.md §9 open question: diagnostic-only, does not change the
    /// discrete bucket choice).
    pub fn resolve_fractional_bucket(
        &self,
        ticks: i64,
        bucket_size_ticks: i64,
        unit: TimeUnit,
    ) -> f64 {
        let bucket_size_seconds = bucket_size_ticks as f64 / unit.ticks_per_second() as f64;
        self.resolve_fractional_bucket_raw(ticks, bucket_size_seconds, unit)
    }

    fn resolve_fractional_bucket_raw(&self, ticks: i64, bucket_size_seconds: f64, unit: TimeUnit) -> f64 {
        match &self.zone {
            None => {
                // naive ticks-since-epoch, no day wraparound applied here;
                // ProfileStore::interpolate performs the cyclic wrap.
                let seconds = ticks as f64 / unit.ticks_per_second() as f64;
                seconds / bucket_size_seconds
            }
            Some(_) => {
                let local = self.local_seconds(ticks, unit);
                let seconds_of_day = local.rem_euclid(86_400) as f64;
                seconds_of_day / bucket_size_seconds
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_is_not_day_mask_aware() {
        let ctx = ResolvedTemporalContext::linear();
        assert!(!ctx.day_mask_aware());
    }

    #[test]
    fn calendar_is_day_mask_aware() {
        let ctx = ResolvedTemporalContext::calendar(OffsetCache::fixed(0));
        assert!(ctx.day_mask_aware());
    }

    #[test]
    fn sunday_epoch_resolves_to_day_index_six() {
        let ctx = ResolvedTemporalContext::calendar(OffsetCache::fixed(0));
        let dow = ctx.resolve_day_of_week(259_200, TimeUnit::Seconds);
        assert_eq!(dow, 6);
    }

    #[test]
    fn thursday_epoch_zero_resolves_to_day_index_three() {
        let ctx = ResolvedTemporalContext::calendar(OffsetCache::fixed(0));
        assert_eq!(ctx.resolve_day_of_week(0, TimeUnit::Seconds), 3);
    }
}
