use super::error::TemporalConfigError;
use super::offset_cache::OffsetCache;
use chrono_tz::Tz;

/// Timezone policy bound into a [`super::ResolvedTemporalContext`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TimezonePolicyId {
    Utc,
    ModelTimezone,
}

impl TimezonePolicyId {
    pub fn parse(id: &str) -> Result<Self, TemporalConfigError> {
        match id {
            "UTC" => Ok(TimezonePolicyId::Utc),
            "MODEL_TIMEZONE" => Ok(TimezonePolicyId::ModelTimezone),
            other => Err(TemporalConfigError::UnknownTimezonePolicy(other.to_string())),
        }
    }
}

/// Resolved zone, ready to build an [`OffsetCache`] from.
#[derive(Debug)]
pub enum ResolvedZone {
    Utc,
    Named(Tz),
}

impl ResolvedZone {
    pub fn resolve(
        policy: &TimezonePolicyId,
        profile_timezone: Option<&str>,
    ) -> Result<ResolvedZone, TemporalConfigError> {
        match policy {
            TimezonePolicyId::Utc => Ok(ResolvedZone::Utc),
            TimezonePolicyId::ModelTimezone => {
                let zone_id = profile_timezone
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .ok_or(TemporalConfigError::ModelTimezoneRequired)?;
                let tz: Tz = zone_id
                    .parse()
                    .map_err(|_| TemporalConfigError::InvalidModelTimezone(zone_id.to_string()))?;
                Ok(ResolvedZone::Named(tz))
            }
        }
    }

    pub fn build_offset_cache(&self, range_start_epoch: i64, range_end_epoch: i64) -> OffsetCache {
        match self {
            ResolvedZone::Utc => OffsetCache::fixed(0),
            ResolvedZone::Named(tz) => {
                OffsetCache::build_rule_based(*tz, range_start_epoch, range_end_epoch)
            }
        }
    }
}
