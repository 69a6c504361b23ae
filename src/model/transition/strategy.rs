use crate::model::turn::TurnCostMap;
use crate::model::EdgeId;

/// The closed set of transition traits. As with [`crate::model::temporal`],
/// a tagged enum replaces the source's interface objects (spec.md §9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TransitionTraitKind {
    /// ignores finite turn penalties; still forbids a turn the map flags.
    NodeBased,
    /// applies the turn map's penalty verbatim.
    EdgeBased,
}

impl TransitionTraitKind {
    pub fn parse(id: &str) -> Option<Self> {
        match id {
            "NODE_BASED" => Some(TransitionTraitKind::NodeBased),
            "EDGE_BASED" => Some(TransitionTraitKind::EdgeBased),
            _ => None,
        }
    }

    pub fn applies_finite_turn_penalties(&self) -> bool {
        matches!(self, TransitionTraitKind::EdgeBased)
    }
}

/// A 64-bit cross-strategy ABI for "was a turn penalty applied, and what
/// was it": low bit is the applied flag, the upper 32 bits are the `f32`
/// bits of the penalty. Kept as the canonical wire format per spec.md §9.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackedTurnDecision(pub u64);

impl PackedTurnDecision {
    pub fn encode(penalty: f32, applied: bool) -> Self {
        let bits = (penalty.to_bits() as u64) << 32;
        PackedTurnDecision(bits | (applied as u64))
    }

    pub fn decode(self) -> (f32, bool) {
        let applied = (self.0 & 1) != 0;
        let penalty = f32::from_bits((self.0 >> 32) as u32);
        (penalty, applied)
    }

    pub const NEUTRAL: PackedTurnDecision = PackedTurnDecision(0); // (0.0, false)
}

/// Immutable, startup-bound transition context.
#[derive(Debug)]
pub struct ResolvedTransitionContext {
    pub trait_kind: TransitionTraitKind,
}

impl ResolvedTransitionContext {
    pub fn new(trait_kind: TransitionTraitKind) -> Self {
        ResolvedTransitionContext { trait_kind }
    }

    /// evaluates the packed turn decision for a transition, per spec.md
    /// §4.6: `NODE_BASED` ignores finite penalties but still forbids;
    /// `EDGE_BASED` applies the map's value verbatim, with "miss" treated
    /// as not-applied.
    pub fn evaluate_packed(
        &self,
        turn_cost_map: Option<&TurnCostMap>,
        from_edge: Option<EdgeId>,
        to_edge: EdgeId,
    ) -> PackedTurnDecision {
        let from_edge = match from_edge {
            None => return PackedTurnDecision::NEUTRAL,
            Some(e) => e,
        };
        let map = match turn_cost_map {
            None => return PackedTurnDecision::NEUTRAL,
            Some(m) => m,
        };

        match self.trait_kind {
            TransitionTraitKind::NodeBased => {
                if map.is_forbidden(from_edge, to_edge) {
                    PackedTurnDecision::encode(f32::INFINITY, true)
                } else {
                    PackedTurnDecision::NEUTRAL
                }
            }
            TransitionTraitKind::EdgeBased => {
                if map.has_cost(from_edge, to_edge) {
                    PackedTurnDecision::encode(map.cost(from_edge, to_edge), true)
                } else {
                    PackedTurnDecision::NEUTRAL
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::turn::RawTurnCost;

    #[test]
    fn packed_decision_roundtrips() {
        let d = PackedTurnDecision::encode(12.5, true);
        assert_eq!(d.decode(), (12.5, true));
        assert_eq!(PackedTurnDecision::NEUTRAL.decode(), (0.0, false));
    }

    #[test]
    fn node_based_ignores_finite_penalty_but_forbids() {
        let raw = vec![
            RawTurnCost {
                from_edge: 0,
                to_edge: 1,
                penalty_seconds: 99.0,
            },
            RawTurnCost {
                from_edge: 2,
                to_edge: 3,
                penalty_seconds: f32::INFINITY,
            },
        ];
        let map = TurnCostMap::try_from_raw(&raw).unwrap();
        let ctx = ResolvedTransitionContext::new(TransitionTraitKind::NodeBased);

        let (penalty, applied) =
            ctx.evaluate_packed(Some(&map), Some(EdgeId(0)), EdgeId(1)).decode();
        assert!(!applied);
        assert_eq!(penalty, 0.0);

        let (penalty, applied) =
            ctx.evaluate_packed(Some(&map), Some(EdgeId(2)), EdgeId(3)).decode();
        assert!(applied);
        assert!(penalty.is_infinite());
    }

    #[test]
    fn edge_based_applies_verbatim_and_misses_are_neutral() {
        let raw = vec![RawTurnCost {
            from_edge: 0,
            to_edge: 1,
            penalty_seconds: 7.0,
        }];
        let map = TurnCostMap::try_from_raw(&raw).unwrap();
        let ctx = ResolvedTransitionContext::new(TransitionTraitKind::EdgeBased);

        let (penalty, applied) =
            ctx.evaluate_packed(Some(&map), Some(EdgeId(0)), EdgeId(1)).decode();
        assert!(applied);
        assert_eq!(penalty, 7.0);

        let (penalty, applied) =
            ctx.evaluate_packed(Some(&map), Some(EdgeId(9)), EdgeId(9)).decode();
        assert!(!applied);
        assert_eq!(penalty, 0.0);
    }

    #[test]
    fn no_predecessor_is_always_neutral() {
        let ctx = ResolvedTransitionContext::new(TransitionTraitKind::EdgeBased);
        assert_eq!(
            ctx.evaluate_packed(None, None, EdgeId(1)),
            PackedTurnDecision::NEUTRAL
        );
    }
}
