#[derive(thiserror::Error, Debug)]
pub enum TemporalConfigError {
    #[error("TemporalConfigRequired: a temporal trait id must be specified")]
    TemporalConfigRequired,
    #[error("UnknownTemporalTrait: `{0}` is not a known temporal trait")]
    UnknownTemporalTrait(String),
    #[error("UnknownTemporalStrategy: `{0}` is not a known temporal strategy")]
    UnknownTemporalStrategy(String),
    #[error("TimezonePolicyRequired: trait `{0}` requires a timezone policy")]
    TimezonePolicyRequired(String),
    #[error("TimezonePolicyNotApplicable: trait `{0}` forbids a timezone policy")]
    TimezonePolicyNotApplicable(String),
    #[error("UnknownTimezonePolicy: `{0}` is not a known timezone policy")]
    UnknownTimezonePolicy(String),
    #[error("ModelTimezoneRequired: MODEL_TIMEZONE policy requires `metadata.profile_timezone`")]
    ModelTimezoneRequired,
    #[error("InvalidModelTimezone: `{0}` is not a valid IANA timezone id")]
    InvalidModelTimezone(String),
    #[error("TemporalConfigIncompatible: trait `{trait_id}` is incompatible with timezone policy `{timezone_policy_id:?}`")]
    TemporalConfigIncompatible {
        trait_id: String,
        timezone_policy_id: Option<String>,
    },
    #[error("TemporalResolutionFailure: {0}")]
    TemporalResolutionFailure(String),
}
