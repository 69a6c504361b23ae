use super::error::TemporalConfigError;
use super::strategy::{ResolvedTemporalContext, TemporalTraitKind};
use super::timezone::{ResolvedZone, TimezonePolicyId};

/// Config consumed at startup to bind a [`ResolvedTemporalContext`].
#[derive(Debug, Clone)]
pub struct TemporalConfig {
    pub trait_id: String,
    pub timezone_policy_id: Option<String>,
    pub profile_timezone: Option<String>,
    /// bounds for the precomputed DST offset cache, in epoch seconds.
    pub cache_range: (i64, i64),
}

/// Binds a [`TemporalConfig`] into an immutable [`ResolvedTemporalContext`],
/// validating the trait/timezone compatibility policy from spec.md §4.6:
/// `CALENDAR` requires a timezone policy and is day-mask-aware; `LINEAR`
/// forbids a timezone policy and is day-mask-agnostic.
///
/// Grounded on the builder/service split in
/// `routee-compass-core::model::frontier::{FrontierModelBuilder,
/// FrontierModelService}`: a small catalogue of known ids feeding a single
/// validating constructor.
pub fn bind_temporal_context(
    config: &TemporalConfig,
) -> Result<ResolvedTemporalContext, TemporalConfigError> {
    if config.trait_id.trim().is_empty() {
        return Err(TemporalConfigError::TemporalConfigRequired);
    }
    let trait_kind = TemporalTraitKind::parse(&config.trait_id)
        .ok_or_else(|| TemporalConfigError::UnknownTemporalTrait(config.trait_id.clone()))?;

    match trait_kind {
        TemporalTraitKind::Linear => {
            if config.timezone_policy_id.is_some() {
                return Err(TemporalConfigError::TimezonePolicyNotApplicable(
                    config.trait_id.clone(),
                ));
            }
            Ok(ResolvedTemporalContext::linear())
        }
        TemporalTraitKind::Calendar => {
            let policy_id = config
                .timezone_policy_id
                .as_deref()
                .ok_or_else(|| TemporalConfigError::TimezonePolicyRequired(config.trait_id.clone()))?;
            let policy = TimezonePolicyId::parse(policy_id)?;
            let zone = ResolvedZone::resolve(&policy, config.profile_timezone.as_deref())?;
            let cache = zone.build_offset_cache(config.cache_range.0, config.cache_range.1);
            Ok(ResolvedTemporalContext::calendar(cache))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_with_timezone_policy_is_incompatible() {
        let config = TemporalConfig {
            trait_id: "LINEAR".to_string(),
            timezone_policy_id: Some("UTC".to_string()),
            profile_timezone: None,
            cache_range: (0, 0),
        };
        let err = bind_temporal_context(&config).unwrap_err();
        assert!(matches!(
            err,
            TemporalConfigError::TimezonePolicyNotApplicable(_)
        ));
    }

    #[test]
    fn calendar_without_timezone_policy_is_rejected() {
        let config = TemporalConfig {
            trait_id: "CALENDAR".to_string(),
            timezone_policy_id: None,
            profile_timezone: None,
            cache_range: (0, 0),
        };
        let err = bind_temporal_context(&config).unwrap_err();
        assert!(matches!(err, TemporalConfigError::TimezonePolicyRequired(_)));
    }

    #[test]
    fn calendar_with_utc_binds_successfully() {
        let config = TemporalConfig {
            trait_id: "CALENDAR".to_string(),
            timezone_policy_id: Some("UTC".to_string()),
            profile_timezone: None,
            cache_range: (0, 86_400),
        };
        let ctx = bind_temporal_context(&config).unwrap();
        assert!(ctx.day_mask_aware());
    }

    #[test]
    fn unknown_trait_is_rejected() {
        let config = TemporalConfig {
            trait_id: "QUANTUM".to_string(),
            timezone_policy_id: None,
            profile_timezone: None,
            cache_range: (0, 0),
        };
        let err = bind_temporal_context(&config).unwrap_err();
        assert!(matches!(err, TemporalConfigError::UnknownTemporalTrait(_)));
    }
}
