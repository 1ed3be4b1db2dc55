//! Resolution context: pronoun bindings and recency.
//!
//! Tracks referents for "it", "him", "her", and "them", plus the most
//! recently interacted entity (a scoring bonus source). The context is not
//! turn-scoped; it persists across turns until explicitly reset by a restart
//! or restore.

use brasslamp_foundation::EntityId;
use brasslamp_world::{Gender, World};

use crate::noun_phrase::Pronoun;

/// Per-validator state mutated after each successful resolution.
#[derive(Clone, Debug, Default)]
pub struct ResolutionContext {
    it: Option<EntityId>,
    him: Option<EntityId>,
    her: Option<EntityId>,
    them: Vec<EntityId>,
    last_interacted: Option<EntityId>,
}

impl ResolutionContext {
    /// Creates a context with no referents.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves a pronoun to its referent(s).
    ///
    /// Returns `None` if the pronoun has no referent set.
    #[must_use]
    pub fn resolve(&self, pronoun: Pronoun) -> Option<Vec<EntityId>> {
        match pronoun {
            Pronoun::It => self.it.map(|e| vec![e]),
            Pronoun::Him => self.him.map(|e| vec![e]),
            Pronoun::Her => self.her.map(|e| vec![e]),
            Pronoun::Them => {
                if self.them.is_empty() {
                    None
                } else {
                    Some(self.them.clone())
                }
            }
        }
    }

    /// Records a successful single-entity resolution.
    ///
    /// Binds the pronoun slot matching the entity's gender and updates the
    /// recency source.
    pub fn remember(&mut self, world: &World, entity: EntityId) {
        let gender = world
            .identity(entity)
            .map_or(Gender::Neuter, |identity| identity.gender);
        match gender {
            Gender::Neuter => self.it = Some(entity),
            Gender::Male => self.him = Some(entity),
            Gender::Female => self.her = Some(entity),
            Gender::Plural => self.them = vec![entity],
        }
        self.last_interacted = Some(entity);
    }

    /// Records a successful multi-entity resolution ("take all").
    pub fn remember_all(&mut self, entities: &[EntityId]) {
        if entities.is_empty() {
            return;
        }
        self.them = entities.to_vec();
        self.last_interacted = entities.last().copied();
    }

    /// The most recently interacted entity, if any.
    #[must_use]
    pub fn last_interacted(&self) -> Option<EntityId> {
        self.last_interacted
    }

    /// Clears all referents. Called on restart/restore, never per turn.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
