use super::error::ProfileError;
use crate::model::ids::{ProfileId, DEFAULT_PROFILE_ID};

/// Default multiplier applied when a profile id is absent, or a day-masked
/// lookup finds the profile inactive for that day.
pub const DEFAULT_MULTIPLIER: f64 = 1.0;

/// Already-decoded temporal profile record.
#[derive(Debug, Clone)]
pub struct RawProfile {
    pub profile_id: u16,
    /// 7-bit bitmap, Monday = bit 0.
    pub day_mask: u16,
    pub buckets: Vec<f64>,
    pub scale: f64,
}

/// Precomputed summary statistics for a profile's effective bucket values
/// (`buckets[i] * scale`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileMetadata {
    pub avg: f64,
    pub min: f64,
    pub max: f64,
}

impl ProfileMetadata {
    pub const NEUTRAL: ProfileMetadata = ProfileMetadata {
        avg: 1.0,
        min: 1.0,
        max: 1.0,
    };
}

#[derive(Debug, Clone)]
struct ProfileEntry {
    day_mask: u16,
    buckets: Box<[f64]>,
    scale: f64,
    metadata: ProfileMetadata,
}

/// Dense, load-time-validated table of temporal profiles, indexed by
/// `profile_id` up to the maximum observed id. A presence bitmap
/// distinguishes "absent" from "zero-initialised" slots.
///
/// Grounded on the "dense array + presence bitmap" idiom used throughout
/// this corpus for sparse-but-dense-enough id spaces (compare
/// `routee-compass-core::model::unit` newtype tables), generalized from
/// the teacher's per-vehicle lookup tables to per-day-masked profiles.
#[derive(Debug)]
pub struct ProfileStore {
    present: Box<[bool]>,
    entries: Vec<Option<ProfileEntry>>,
}

impl ProfileStore {
    pub fn try_from_raw(raw: &[RawProfile]) -> Result<Self, ProfileError> {
        let max_id = raw.iter().map(|p| p.profile_id).max().unwrap_or(0);
        let size = max_id as usize + 1;
        let mut present = vec![false; size];
        let mut entries: Vec<Option<ProfileEntry>> = vec![None; size];

        for p in raw {
            if p.day_mask == 0 {
                return Err(ProfileError::ZeroDayMask(p.profile_id));
            }
            if p.day_mask > 0x7F {
                return Err(ProfileError::DayMaskTooWide {
                    profile: p.profile_id,
                    mask: p.day_mask,
                });
            }
            if p.buckets.is_empty() {
                return Err(ProfileError::NoBuckets(p.profile_id));
            }
            if !(p.scale > 0.0) || !p.scale.is_finite() {
                return Err(ProfileError::BadScale(p.profile_id, p.scale));
            }
            let mut scaled = Vec::with_capacity(p.buckets.len());
            for (i, &b) in p.buckets.iter().enumerate() {
                if !(b > 0.0) || !b.is_finite() {
                    return Err(ProfileError::BadBucket {
                        profile: p.profile_id,
                        index: i,
                        value: b,
                    });
                }
                let scaled_b = b * p.scale;
                if !(scaled_b > 0.0) || !scaled_b.is_finite() {
                    return Err(ProfileError::BadScaledBucket {
                        profile: p.profile_id,
                        index: i,
                        value: scaled_b,
                    });
                }
                scaled.push(scaled_b);
            }

            let idx = p.profile_id as usize;
            if present[idx] {
                return Err(ProfileError::DuplicateProfileId(p.profile_id));
            }
            present[idx] = true;

            let sum: f64 = scaled.iter().sum();
            let avg = sum / scaled.len() as f64;
            let min = scaled.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = scaled.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

            entries[idx] = Some(ProfileEntry {
                day_mask: p.day_mask,
                buckets: p.buckets.clone().into_boxed_slice(),
                scale: p.scale,
                metadata: ProfileMetadata { avg, min, max },
            });
        }

        log::info!("profile store loaded: {} profiles", raw.len());

        Ok(ProfileStore { present: present.into_boxed_slice(), entries })
    }

    fn entry(&self, id: ProfileId) -> Option<&ProfileEntry> {
        self.present
            .get(id.0 as usize)
            .copied()
            .unwrap_or(false)
            .then(|| self.entries[id.0 as usize].as_ref())
            .flatten()
    }

    /// returns `profile_id` if its day mask has the given day's bit set,
    /// else the [`DEFAULT_PROFILE_ID`] sentinel. `dow` uses Monday=0..Sunday=6.
    pub fn select_profile_for_day(&self, profile_id: ProfileId, dow: u8) -> ProfileId {
        match self.entry(profile_id) {
            Some(e) if (e.day_mask >> dow) & 1 == 1 => profile_id,
            _ => DEFAULT_PROFILE_ID,
        }
    }

    /// bounds-checked on bucket, unchecked on day. Absent profile id
    /// returns [`DEFAULT_MULTIPLIER`].
    pub fn multiplier(&self, profile_id: ProfileId, bucket_idx: usize) -> f64 {
        match self.entry(profile_id) {
            None => DEFAULT_MULTIPLIER,
            Some(e) => e
                .buckets
                .get(bucket_idx)
                .map(|&b| b * e.scale)
                .unwrap_or(DEFAULT_MULTIPLIER),
        }
    }

    /// applies day selection first; falls back to 1.0 when inactive.
    pub fn multiplier_for_day(&self, profile_id: ProfileId, dow: u8, bucket_idx: usize) -> f64 {
        match self.select_profile_for_day(profile_id, dow) {
            DEFAULT_PROFILE_ID => DEFAULT_MULTIPLIER,
            selected => self.multiplier(selected, bucket_idx),
        }
    }

    /// cyclic-linear interpolation: wraps the coordinate into `[0, B)`; the
    /// upper neighbour wraps from `B-1` back to `0`. Returns the discrete
    /// bucket value when the fractional part is exactly zero or `B == 1`.
    pub fn interpolate(&self, profile_id: ProfileId, fractional_bucket: f64) -> f64 {
        let e = match self.entry(profile_id) {
            None => return DEFAULT_MULTIPLIER,
            Some(e) => e,
        };
        let b = e.buckets.len();
        if b == 1 {
            return e.buckets[0] * e.scale;
        }
        let wrapped = fractional_bucket.rem_euclid(b as f64);
        let lower = wrapped.floor() as usize % b;
        let frac = wrapped - wrapped.floor();
        if frac == 0.0 {
            return e.buckets[lower] * e.scale;
        }
        let upper = (lower + 1) % b;
        let lo = e.buckets[lower] * e.scale;
        let hi = e.buckets[upper] * e.scale;
        lo + (hi - lo) * frac
    }

    /// day-masked variant of [`Self::interpolate`], same fallback policy.
    pub fn interpolate_for_day(&self, profile_id: ProfileId, dow: u8, fractional_bucket: f64) -> f64 {
        match self.select_profile_for_day(profile_id, dow) {
            DEFAULT_PROFILE_ID => DEFAULT_MULTIPLIER,
            selected => self.interpolate(selected, fractional_bucket),
        }
    }

    pub fn bucket_count(&self, profile_id: ProfileId) -> Option<usize> {
        self.entry(profile_id).map(|e| e.buckets.len())
    }

    /// precomputed at load time; absent id returns neutral metadata.
    pub fn metadata(&self, profile_id: ProfileId) -> ProfileMetadata {
        self.entry(profile_id)
            .map(|e| e.metadata)
            .unwrap_or(ProfileMetadata::NEUTRAL)
    }

    /// minimum temporal multiplier across all seven days, with the 1.0
    /// fallback on inactive days — used by heuristic calibration.
    pub fn min_multiplier_across_week(&self, profile_id: ProfileId) -> f64 {
        (0..7u8)
            .map(|dow| match self.select_profile_for_day(profile_id, dow) {
                DEFAULT_PROFILE_ID => DEFAULT_MULTIPLIER,
                selected => self.metadata(selected).min,
            })
            .fold(f64::INFINITY, f64::min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weekday_profile() -> RawProfile {
        RawProfile {
            profile_id: 1,
            day_mask: 0x1F, // Mon-Fri
            buckets: vec![1.0, 2.0, 3.0, 4.0],
            scale: 1.0,
        }
    }

    #[test]
    fn multiplier_matches_bucket_times_scale() {
        let store = ProfileStore::try_from_raw(&[weekday_profile()]).unwrap();
        assert_eq!(store.multiplier(ProfileId(1), 2), 3.0);
    }

    #[test]
    fn absent_profile_returns_default_multiplier() {
        let store = ProfileStore::try_from_raw(&[weekday_profile()]).unwrap();
        assert_eq!(store.multiplier(ProfileId(99), 0), DEFAULT_MULTIPLIER);
    }

    #[test]
    fn inactive_day_is_neutral_regardless_of_bucket_value() {
        let store = ProfileStore::try_from_raw(&[weekday_profile()]).unwrap();
        // Sunday = bit 6
        assert_eq!(store.multiplier_for_day(ProfileId(1), 6, 3), 1.0);
        assert_eq!(store.multiplier_for_day(ProfileId(1), 0, 3), 4.0);
    }

    #[test]
    fn interpolate_is_exact_at_integers_and_wraps() {
        let store = ProfileStore::try_from_raw(&[weekday_profile()]).unwrap();
        assert_eq!(store.interpolate(ProfileId(1), 0.0), 1.0);
        assert_eq!(store.interpolate(ProfileId(1), 3.0), 4.0);
        // wraps between buckets[3] and buckets[0]
        let mid = store.interpolate(ProfileId(1), 3.5);
        assert!((mid - 2.5).abs() < 1e-9);
    }

    #[test]
    fn interpolate_single_bucket_is_constant() {
        let raw = RawProfile {
            profile_id: 0,
            day_mask: 0x7F,
            buckets: vec![2.0],
            scale: 1.0,
        };
        let store = ProfileStore::try_from_raw(&[raw]).unwrap();
        assert_eq!(store.interpolate(ProfileId(0), 0.73), 2.0);
    }

    #[test]
    fn rejects_zero_day_mask_and_bad_scale_and_nonpositive_bucket() {
        let mut bad = weekday_profile();
        bad.day_mask = 0;
        assert!(ProfileStore::try_from_raw(&[bad]).is_err());

        let mut bad = weekday_profile();
        bad.scale = 0.0;
        assert!(ProfileStore::try_from_raw(&[bad]).is_err());

        let mut bad = weekday_profile();
        bad.buckets[0] = 0.0;
        assert!(ProfileStore::try_from_raw(&[bad]).is_err());
    }

    #[test]
    fn rejects_duplicate_profile_ids() {
        let raw = vec![weekday_profile(), weekday_profile()];
        assert!(ProfileStore::try_from_raw(&raw).is_err());
    }
}
