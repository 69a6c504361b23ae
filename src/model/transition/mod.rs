mod binder;
mod error;
mod strategy;

pub use binder::{bind_transition_context, TransitionConfig};
pub use error::TransitionConfigError;
pub use strategy::{PackedTurnDecision, ResolvedTransitionContext, TransitionTraitKind};
