#[derive(thiserror::Error, Debug)]
pub enum TransitionConfigError {
    #[error("TransitionConfigRequired: a transition trait id must be specified")]
    TransitionConfigRequired,
    #[error("UnknownTransitionTrait: `{0}` is not a known transition trait")]
    UnknownTransitionTrait(String),
    #[error("UnknownTransitionStrategy: `{0}` is not a known transition strategy")]
    UnknownTransitionStrategy(String),
    #[error("TransitionConfigIncompatible: trait `{trait_id}` requires applies_finite_turn_penalties = {expected}")]
    TransitionConfigIncompatible { trait_id: String, expected: bool },
    #[error("TransitionResolutionFailure: {0}")]
    TransitionResolutionFailure(String),
}
