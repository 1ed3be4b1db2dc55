//! Entity lifecycle management with generational indices.
//!
//! The `EntityStore` allocates entity slots and tracks generations so that
//! references to destroyed entities can be detected instead of silently
//! aliasing a reused slot.

// Allow u64 to usize casts - we target 64-bit systems
#![allow(clippy::cast_possible_truncation)]

use brasslamp_foundation::{EntityId, Error, Result};
use serde::{Deserialize, Serialize};

/// Manages entity allocation and generation tracking.
///
/// Destroyed indices go on a free list for reuse; each reuse bumps the slot's
/// generation. Even generations mark free slots, odd generations live ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityStore {
    /// Generation counter per slot. Even = free, odd = alive.
    generations: im::Vector<u32>,
    /// Indices available for reuse.
    free_list: im::Vector<u64>,
    /// Count of live entities.
    live_count: usize,
}

impl EntityStore {
    /// Creates a new empty entity store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a new entity and returns its ID.
    pub fn spawn(&mut self) -> EntityId {
        self.live_count += 1;

        if let Some(index) = self.free_list.pop_back() {
            let idx = index as usize;
            let generation = self.generations[idx] + 1;
            self.generations.set(idx, generation);
            EntityId::new(index, generation)
        } else {
            let index = self.generations.len() as u64;
            self.generations.push_back(1);
            EntityId::new(index, 1)
        }
    }

    /// Destroys an entity, freeing its slot for reuse.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference is stale or the entity never existed.
    pub fn destroy(&mut self, id: EntityId) -> Result<()> {
        self.validate(id)?;

        let idx = id.index as usize;
        self.generations.set(idx, id.generation + 1);
        self.free_list.push_back(id.index);
        self.live_count -= 1;

        Ok(())
    }

    /// Checks if an entity exists and is not stale.
    #[must_use]
    pub fn exists(&self, id: EntityId) -> bool {
        match self.generations.get(id.index as usize) {
            Some(&generation) => generation == id.generation && generation % 2 == 1,
            None => false,
        }
    }

    /// Validates that an entity reference is live.
    ///
    /// # Errors
    ///
    /// Returns [`brasslamp_foundation::ErrorKind::EntityNotFound`] for slots
    /// that were never allocated or are currently free, and
    /// [`brasslamp_foundation::ErrorKind::StaleEntity`] on generation
    /// mismatch.
    pub fn validate(&self, id: EntityId) -> Result<()> {
        let Some(&current) = self.generations.get(id.index as usize) else {
            return Err(Error::entity_not_found(id));
        };

        if current != id.generation {
            return Err(Error::stale_entity(id));
        }
        if current % 2 == 0 {
            return Err(Error::entity_not_found(id));
        }

        Ok(())
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live_count
    }

    /// Returns true if there are no live entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live_count == 0
    }

    /// Iterates over all live entity IDs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.generations
            .iter()
            .enumerate()
            .filter(|(_, generation)| *generation % 2 == 1)
            .map(|(idx, generation)| EntityId::new(idx as u64, *generation))
    }
}
