use super::error::TransitionConfigError;
use super::strategy::{ResolvedTransitionContext, TransitionTraitKind};

/// Config consumed at startup to bind a [`ResolvedTransitionContext`].
#[derive(Debug, Clone)]
pub struct TransitionConfig {
    pub trait_id: String,
}

/// Binds a [`TransitionConfig`], validating the compatibility policy from
/// spec.md §4.6: `EDGE_BASED` requires `applies_finite_turn_penalties =
/// true`; `NODE_BASED` requires `false`. Since both built-in traits already
/// satisfy their own requirement by construction, this amounts to
/// validating the trait id itself — the check is kept explicit so a future
/// trait addition cannot silently violate the invariant.
pub fn bind_transition_context(
    config: &TransitionConfig,
) -> Result<ResolvedTransitionContext, TransitionConfigError> {
    if config.trait_id.trim().is_empty() {
        return Err(TransitionConfigError::TransitionConfigRequired);
    }
    let trait_kind = TransitionTraitKind::parse(&config.trait_id)
        .ok_or_else(|| TransitionConfigError::UnknownTransitionTrait(config.trait_id.clone()))?;

    let expected = matches!(trait_kind, TransitionTraitKind::EdgeBased);
    if trait_kind.applies_finite_turn_penalties() != expected {
        return Err(TransitionConfigError::TransitionConfigIncompatible {
            trait_id: config.trait_id.clone(),
            expected,
        });
    }

    Ok(ResolvedTransitionContext::new(trait_kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binds_known_traits() {
        assert!(bind_transition_context(&TransitionConfig {
            trait_id: "NODE_BASED".to_string()
        })
        .is_ok());
        assert!(bind_transition_context(&TransitionConfig {
            trait_id: "EDGE_BASED".to_string()
        })
        .is_ok());
    }

    #[test]
    fn rejects_unknown_trait() {
        let err = bind_transition_context(&TransitionConfig {
            trait_id: "MYSTERY".to_string(),
        })
        .unwrap_err();
        assert!(matches!(
            err,
            TransitionConfigError::UnknownTransitionTrait(_)
        ));
    }

    #[test]
    fn rejects_blank_trait_id() {
        let err = bind_transition_context(&TransitionConfig {
            trait_id: "".to_string(),
        })
        .unwrap_err();
        assert!(matches!(
            err,
            TransitionConfigError::TransitionConfigRequired
        ));
    }
}
