//! Candidate scoring for entity resolution.
//!
//! Each candidate accumulates an additive score from match reasons; only
//! positive-score candidates stay viable. The reasons themselves are kept on
//! the match so disambiguation and diagnostics can see *why* a candidate
//! scored.

use brasslamp_foundation::EntityId;

/// Why a candidate matched, with its score contribution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchReason {
    /// Head noun equals the entity name.
    ExactName,
    /// Head noun equals the entity's kind word.
    KindMatch,
    /// Head noun equals a registered alias.
    AliasMatch,
    /// Head noun matched an adjective (fallback for "press yellow").
    AdjectiveMatch,
    /// A requested modifier matched an entity adjective.
    ModifierMatch(String),
    /// Entity has adjectives the player did not specify.
    UnspecifiedAdjectives,
    /// Entity is visible to the actor.
    Visible,
    /// Entity is reachable by the actor.
    Reachable,
    /// Entity is in the actor's inventory.
    InInventory,
    /// Entity was the most recently interacted one.
    Recency,
}

impl MatchReason {
    /// The score contribution of this reason.
    #[must_use]
    pub fn weight(&self) -> i32 {
        match self {
            MatchReason::ExactName => 10,
            MatchReason::KindMatch => 8,
            MatchReason::AliasMatch => 6,
            MatchReason::AdjectiveMatch => 4,
            MatchReason::ModifierMatch(_) => 5,
            MatchReason::UnspecifiedAdjectives => -1,
            MatchReason::Visible | MatchReason::Reachable => 1,
            MatchReason::InInventory | MatchReason::Recency => 2,
        }
    }
}

/// A candidate entity with its accumulated score.
#[derive(Clone, Debug)]
pub struct ScoredMatch {
    /// The candidate entity.
    pub entity: EntityId,
    /// Sum of the reason weights.
    pub score: i32,
    /// The reasons that contributed.
    pub reasons: Vec<MatchReason>,
}

impl ScoredMatch {
    /// Builds a match from its reasons.
    #[must_use]
    pub fn new(entity: EntityId, reasons: Vec<MatchReason>) -> Self {
        let score = reasons.iter().map(MatchReason::weight).sum();
        Self {
            entity,
            score,
            reasons,
        }
    }

    /// Whether any requested modifier matched.
    #[must_use]
    pub fn matched_modifiers(&self) -> bool {
        self.reasons
            .iter()
            .any(|r| matches!(r, MatchReason::ModifierMatch(_)))
    }
}
