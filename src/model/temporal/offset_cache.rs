use chrono::TimeZone as ChronoTimeZone;
use chrono::Utc;
use chrono_tz::Tz;

const SECONDS_PER_DAY: i64 = 86_400;
/// representable epoch-second range this cache clamps fallback lookups to,
/// matching spec.md §4.6's "clamping to the implementation's representable
/// range" boundary policy.
const MIN_REPRESENTABLE_EPOCH: i64 = -62_135_596_800; // year 1 CE
const MAX_REPRESENTABLE_EPOCH: i64 = 253_402_300_799; // year 9999 CE

#[derive(Debug, Clone, Copy)]
struct Window {
    start: i64,
    end: i64,
    offset_seconds: i64,
}

/// DST-aware offset cache. For fixed-offset zones this is a single
/// constant; for rule-based (IANA) zones it holds precomputed per-local-day
/// `[start, end) -> offset_seconds` windows covering the zone's DST
/// transitions, built once at startup over a bounded date range.
#[derive(Debug)]
pub enum OffsetCache {
    Fixed(i64),
    RuleBased {
        tz: Tz,
        first_day_epoch: i64,
        days: Vec<Vec<Window>>,
    },
}

impl OffsetCache {
    pub fn fixed(offset_seconds: i64) -> Self {
        OffsetCache::Fixed(offset_seconds)
    }

    /// precomputes windows for every local day in
    /// `[range_start_epoch, range_end_epoch)`.
    pub fn build_rule_based(tz: Tz, range_start_epoch: i64, range_end_epoch: i64) -> Self {
        let first_day = range_start_epoch.div_euclid(SECONDS_PER_DAY);
        let last_day = range_end_epoch.div_euclid(SECONDS_PER_DAY);
        let mut days = Vec::with_capacity((last_day - first_day + 1).max(0) as usize);

        let mut day = first_day;
        while day <= last_day {
            let day_start = day * SECONDS_PER_DAY;
            let day_end = day_start + SECONDS_PER_DAY;
            days.push(windows_for_day(&tz, day_start, day_end));
            day += 1;
        }

        OffsetCache::RuleBased {
            tz,
            first_day_epoch: first_day * SECONDS_PER_DAY,
            days,
        }
    }

    pub fn lookup(&self, epoch_seconds: i64) -> i64 {
        match self {
            OffsetCache::Fixed(offset) => *offset,
            OffsetCache::RuleBased {
                tz,
                first_day_epoch,
                days,
            } => {
                let day_idx = (epoch_seconds - first_day_epoch).div_euclid(SECONDS_PER_DAY);
                match days.get(day_idx as usize).filter(|_| day_idx >= 0) {
                    Some(windows) => lookup_in_day(windows, epoch_seconds),
                    None => direct_zone_offset(tz, clamp_epoch(epoch_seconds)),
                }
            }
        }
    }
}

fn clamp_epoch(epoch_seconds: i64) -> i64 {
    epoch_seconds.clamp(MIN_REPRESENTABLE_EPOCH, MAX_REPRESENTABLE_EPOCH)
}

fn direct_zone_offset(tz: &Tz, epoch_seconds: i64) -> i64 {
    let utc = Utc.timestamp_opt(epoch_seconds, 0).single().unwrap_or_else(|| {
        Utc.timestamp_opt(clamp_epoch(epoch_seconds), 0)
            .single()
            .expect("clamped epoch is representable")
    });
    let local = utc.with_timezone(tz);
    local.offset().fix().local_minus_utc() as i64
}

/// Sample offsets across the day to detect DST transitions; the rule
/// policy only models zones with at most one transition per local day,
/// which covers every transition scheme used by the IANA tz database.
fn windows_for_day(tz: &Tz, day_start: i64, day_end: i64) -> Vec<Window> {
    let start_offset = direct_zone_offset(tz, day_start);
    let end_offset = direct_zone_offset(tz, day_end - 1);

    if start_offset == end_offset {
        return vec![Window {
            start: day_start,
            end: day_end,
            offset_seconds: start_offset,
        }];
    }

    // binary search for the transition instant within the day
    let mut lo = day_start;
    let mut hi = day_end - 1;
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        if direct_zone_offset(tz, mid) == start_offset {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    vec![
        Window {
            start: day_start,
            end: hi,
            offset_seconds: start_offset,
        },
        Window {
            start: hi,
            end: day_end,
            offset_seconds: end_offset,
        },
    ]
}

fn lookup_in_day(windows: &[Window], epoch_seconds: i64) -> i64 {
    for w in windows {
        if epoch_seconds >= w.start && epoch_seconds < w.end {
            return w.offset_seconds;
        }
    }
    if let Some(first) = windows.first() {
        if epoch_seconds < first.start {
            return first.offset_seconds;
        }
    }
    windows
        .last()
        .map(|w| w.offset_seconds)
        .unwrap_or(0)
}
