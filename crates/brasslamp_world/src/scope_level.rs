//! Scope levels and author-declared scope overrides.

use brasslamp_foundation::EntityId;
use serde::{Deserialize, Serialize};

/// Degree to which an entity is perceivable/accessible to an observer.
///
/// Levels are totally ordered: `Carried` implies `Reachable` implies
/// `Visible` implies `Aware`. Hearing and smell are independent channels
/// evaluated by dedicated predicates; an entity perceived only through them
/// sits at `Aware`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ScopeLevel {
    /// The observer has no awareness of the entity.
    Unaware = 0,
    /// Known to be present (heard, smelled, or author-declared) but not seen.
    Aware = 1,
    /// Can be seen.
    Visible = 2,
    /// Can be physically touched.
    Reachable = 3,
    /// Held directly by the observer.
    Carried = 4,
}

impl ScopeLevel {
    /// Combines a physical scope with an author override.
    ///
    /// Overrides only raise scope, never lower it.
    #[must_use]
    pub fn raised_to(self, minimum: Option<ScopeLevel>) -> ScopeLevel {
        match minimum {
            Some(min) => self.max(min),
            None => self,
        }
    }
}

/// An author-declared minimum scope for an entity, keyed by the observer's
/// containing room.
///
/// Lets a story make a distant mountain referencable from a vista room, or a
/// hidden lever targetable before it has been seen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeOverride {
    /// The room the observer must be in for the override to apply.
    pub room: EntityId,
    /// The entity the override applies to.
    pub entity: EntityId,
    /// The minimum scope granted.
    pub minimum: ScopeLevel,
}
