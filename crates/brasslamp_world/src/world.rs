//! World state: the trait side table and the containment tree.
//!
//! `World` is the single mutable authority over entities during a turn.
//! Internally it uses persistent collections, so [`World::snapshot`] is an
//! O(1) structural-sharing clone and restore is whole-snapshot replacement.

use brasslamp_foundation::{EntityId, Error, Result};
use serde::{Deserialize, Serialize};

use crate::entity::EntityStore;
use crate::scope_level::{ScopeLevel, ScopeOverride};
use crate::traits::{
    ContainerTrait, DoorTrait, IdentityTrait, OpenableTrait, RoomTrait, SceneryTrait,
    SwitchableTrait, Trait, TraitTag, WearableTrait,
};

/// Story-level configuration consumed by the execution layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Whether actions may synthesize implicit takes for merely-reachable
    /// objects. Stories that want explicit "(first taking the X)" behavior
    /// turned off set this to false.
    pub allow_implicit_takes: bool,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            allow_implicit_takes: true,
        }
    }
}

/// The world model: entities, their traits, and where everything is.
///
/// Containment is a tree of parent links; each entity has at most one
/// location, and rooms sit at the roots. Cycle-forming moves are rejected
/// when the move is attempted, so traversals never need depth guards.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct World {
    entities: EntityStore,
    traits: im::HashMap<EntityId, im::HashMap<TraitTag, Trait>>,
    parents: im::HashMap<EntityId, EntityId>,
    overrides: im::Vector<ScopeOverride>,
    player: Option<EntityId>,
    config: WorldConfig,
}

impl World {
    /// Creates a new empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the story configuration.
    #[must_use]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Returns the story configuration for mutation.
    pub fn config_mut(&mut self) -> &mut WorldConfig {
        &mut self.config
    }

    // --- Entity lifecycle ---

    /// Spawns a new entity with the given initial traits.
    pub fn spawn(&mut self, traits: impl IntoIterator<Item = Trait>) -> EntityId {
        let id = self.entities.spawn();
        let mut table = im::HashMap::new();
        for t in traits {
            table.insert(t.tag(), t);
        }
        self.traits.insert(id, table);
        id
    }

    /// Destroys an entity, detaching its contents.
    ///
    /// Contents of the destroyed entity lose their location (and so drop out
    /// of scope) rather than being destroyed with it.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference is stale or unknown.
    pub fn destroy(&mut self, id: EntityId) -> Result<()> {
        self.entities.validate(id)?;

        let children: Vec<EntityId> = self.contents_of(id);
        for child in children {
            self.parents.remove(&child);
        }
        self.parents.remove(&id);
        self.traits.remove(&id);
        self.overrides.retain(|o| o.entity != id && o.room != id);
        if self.player == Some(id) {
            self.player = None;
        }
        self.entities.destroy(id)
    }

    /// Checks if an entity exists and is not stale.
    #[must_use]
    pub fn exists(&self, id: EntityId) -> bool {
        self.entities.exists(id)
    }

    /// Validates an entity reference.
    ///
    /// # Errors
    ///
    /// See [`EntityStore::validate`].
    pub fn validate(&self, id: EntityId) -> Result<()> {
        self.entities.validate(id)
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Iterates all live entity IDs in slot order.
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.iter()
    }

    // --- Traits ---

    /// Attaches a trait, replacing any existing trait of the same kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference is stale or unknown.
    pub fn add_trait(&mut self, id: EntityId, t: Trait) -> Result<()> {
        self.entities.validate(id)?;
        if let Some(table) = self.traits.get_mut(&id) {
            table.insert(t.tag(), t);
        } else {
            let mut table = im::HashMap::new();
            table.insert(t.tag(), t);
            self.traits.insert(id, table);
        }
        Ok(())
    }

    /// Removes a trait kind from an entity, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference is stale or unknown.
    pub fn remove_trait(&mut self, id: EntityId, tag: TraitTag) -> Result<()> {
        self.entities.validate(id)?;
        if let Some(table) = self.traits.get_mut(&id) {
            table.remove(&tag);
        }
        Ok(())
    }

    /// Gets a trait by tag.
    #[must_use]
    pub fn trait_of(&self, id: EntityId, tag: TraitTag) -> Option<&Trait> {
        self.traits.get(&id).and_then(|table| table.get(&tag))
    }

    /// Checks whether an entity has a trait kind.
    #[must_use]
    pub fn has(&self, id: EntityId, tag: TraitTag) -> bool {
        self.trait_of(id, tag).is_some()
    }

    fn trait_of_mut(&mut self, id: EntityId, tag: TraitTag) -> Option<&mut Trait> {
        self.traits.get_mut(&id).and_then(|table| table.get_mut(&tag))
    }

    /// Gets an entity's identity trait.
    #[must_use]
    pub fn identity(&self, id: EntityId) -> Option<&IdentityTrait> {
        match self.trait_of(id, TraitTag::Identity) {
            Some(Trait::Identity(identity)) => Some(identity),
            _ => None,
        }
    }

    /// Gets an entity's identity trait for mutation.
    pub fn identity_mut(&mut self, id: EntityId) -> Option<&mut IdentityTrait> {
        match self.trait_of_mut(id, TraitTag::Identity) {
            Some(Trait::Identity(identity)) => Some(identity),
            _ => None,
        }
    }

    /// Gets an entity's room trait.
    #[must_use]
    pub fn room(&self, id: EntityId) -> Option<&RoomTrait> {
        match self.trait_of(id, TraitTag::Room) {
            Some(Trait::Room(room)) => Some(room),
            _ => None,
        }
    }

    /// Gets an entity's container trait.
    #[must_use]
    pub fn container(&self, id: EntityId) -> Option<&ContainerTrait> {
        match self.trait_of(id, TraitTag::Container) {
            Some(Trait::Container(container)) => Some(container),
            _ => None,
        }
    }

    /// Gets an entity's openable trait.
    #[must_use]
    pub fn openable(&self, id: EntityId) -> Option<&OpenableTrait> {
        match self.trait_of(id, TraitTag::Openable) {
            Some(Trait::Openable(openable)) => Some(openable),
            _ => None,
        }
    }

    /// Gets an entity's openable trait for mutation.
    pub fn openable_mut(&mut self, id: EntityId) -> Option<&mut OpenableTrait> {
        match self.trait_of_mut(id, TraitTag::Openable) {
            Some(Trait::Openable(openable)) => Some(openable),
            _ => None,
        }
    }

    /// Gets an entity's door trait.
    #[must_use]
    pub fn door(&self, id: EntityId) -> Option<&DoorTrait> {
        match self.trait_of(id, TraitTag::Door) {
            Some(Trait::Door(door)) => Some(door),
            _ => None,
        }
    }

    /// Gets an entity's switchable trait.
    #[must_use]
    pub fn switchable(&self, id: EntityId) -> Option<&SwitchableTrait> {
        match self.trait_of(id, TraitTag::Switchable) {
            Some(Trait::Switchable(switchable)) => Some(switchable),
            _ => None,
        }
    }

    /// Gets an entity's switchable trait for mutation.
    pub fn switchable_mut(&mut self, id: EntityId) -> Option<&mut SwitchableTrait> {
        match self.trait_of_mut(id, TraitTag::Switchable) {
            Some(Trait::Switchable(switchable)) => Some(switchable),
            _ => None,
        }
    }

    /// Gets an entity's wearable trait.
    #[must_use]
    pub fn wearable(&self, id: EntityId) -> Option<&WearableTrait> {
        match self.trait_of(id, TraitTag::Wearable) {
            Some(Trait::Wearable(wearable)) => Some(wearable),
            _ => None,
        }
    }

    /// Gets an entity's wearable trait for mutation.
    pub fn wearable_mut(&mut self, id: EntityId) -> Option<&mut WearableTrait> {
        match self.trait_of_mut(id, TraitTag::Wearable) {
            Some(Trait::Wearable(wearable)) => Some(wearable),
            _ => None,
        }
    }

    /// Gets an entity's scenery trait.
    #[must_use]
    pub fn scenery(&self, id: EntityId) -> Option<&SceneryTrait> {
        match self.trait_of(id, TraitTag::Scenery) {
            Some(Trait::Scenery(scenery)) => Some(scenery),
            _ => None,
        }
    }

    /// Returns the display name of an entity, falling back to "thing".
    #[must_use]
    pub fn name_of(&self, id: EntityId) -> String {
        self.identity(id)
            .map_or_else(|| "thing".to_string(), |identity| identity.name.clone())
    }

    /// Returns the description of an entity, falling back to its name.
    #[must_use]
    pub fn description_of(&self, id: EntityId) -> String {
        self.identity(id)
            .and_then(|identity| identity.description.clone())
            .unwrap_or_else(|| self.name_of(id))
    }

    /// Returns the kind word for an entity, derived from its traits.
    ///
    /// Used for kind-word matching during resolution ("take the container").
    #[must_use]
    pub fn kind_of(&self, id: EntityId) -> &'static str {
        if self.has(id, TraitTag::Room) {
            "room"
        } else if self.has(id, TraitTag::Door) {
            "door"
        } else if self.has(id, TraitTag::Actor) {
            "actor"
        } else if self.has(id, TraitTag::Container) {
            "container"
        } else if self.has(id, TraitTag::Supporter) {
            "supporter"
        } else {
            "thing"
        }
    }

    /// Whether an entity counts as open.
    ///
    /// Entities without an openable trait (open-topped boxes, doorless
    /// archways) are always open.
    #[must_use]
    pub fn is_open(&self, id: EntityId) -> bool {
        self.openable(id).is_none_or(|openable| openable.open)
    }

    // --- Containment ---

    /// Returns the immediate location of an entity.
    #[must_use]
    pub fn location_of(&self, id: EntityId) -> Option<EntityId> {
        self.parents.get(&id).copied()
    }

    /// Returns the immediate contents of an entity, in slot order.
    #[must_use]
    pub fn contents_of(&self, id: EntityId) -> Vec<EntityId> {
        let mut contents: Vec<EntityId> = self
            .parents
            .iter()
            .filter(|(_, parent)| **parent == id)
            .map(|(child, _)| *child)
            .collect();
        contents.sort();
        contents
    }

    /// Returns the transitive contents of an entity, depth first.
    #[must_use]
    pub fn all_contents_of(&self, id: EntityId) -> Vec<EntityId> {
        let mut all = Vec::new();
        let mut stack = self.contents_of(id);
        stack.reverse();
        while let Some(entity) = stack.pop() {
            all.push(entity);
            let mut nested = self.contents_of(entity);
            nested.reverse();
            stack.extend(nested);
        }
        all
    }

    /// Moves an entity into a new location.
    ///
    /// # Errors
    ///
    /// Returns an error if either reference is stale, or if the move would
    /// make the entity contain itself — directly or transitively. Cycles are
    /// rejected here, at the single mutation site, so every traversal
    /// elsewhere can trust the tree.
    pub fn move_entity(&mut self, id: EntityId, destination: EntityId) -> Result<()> {
        self.entities.validate(id)?;
        self.entities.validate(destination)?;

        let mut cursor = Some(destination);
        while let Some(ancestor) = cursor {
            if ancestor == id {
                return Err(Error::containment_cycle(id, destination));
            }
            cursor = self.location_of(ancestor);
        }

        self.parents.insert(id, destination);
        Ok(())
    }

    /// Removes an entity from its location, leaving it nowhere.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference is stale or unknown.
    pub fn detach(&mut self, id: EntityId) -> Result<()> {
        self.entities.validate(id)?;
        self.parents.remove(&id);
        Ok(())
    }

    /// Walks parent links to the containing room.
    ///
    /// An entity that is itself a room is its own containing room. Returns
    /// `None` for entities with no room above them.
    #[must_use]
    pub fn room_of(&self, id: EntityId) -> Option<EntityId> {
        let mut cursor = Some(id);
        while let Some(entity) = cursor {
            if self.has(entity, TraitTag::Room) {
                return Some(entity);
            }
            cursor = self.location_of(entity);
        }
        None
    }

    // --- Player ---

    /// Designates the player entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference is stale or unknown.
    pub fn set_player(&mut self, id: EntityId) -> Result<()> {
        self.entities.validate(id)?;
        self.player = Some(id);
        Ok(())
    }

    /// Returns the player entity, if designated.
    #[must_use]
    pub fn player(&self) -> Option<EntityId> {
        self.player
    }

    /// Returns the player entity or an error.
    ///
    /// # Errors
    ///
    /// Returns [`brasslamp_foundation::ErrorKind::NoPlayer`] if no player has
    /// been designated.
    pub fn require_player(&self) -> Result<EntityId> {
        self.player.ok_or_else(Error::no_player)
    }

    // --- Author scope overrides ---

    /// Declares a minimum scope for an entity when observed from a room.
    ///
    /// Overrides are additive: they raise scope but never lower it.
    ///
    /// # Errors
    ///
    /// Returns an error if either reference is stale or unknown.
    pub fn add_scope_override(
        &mut self,
        room: EntityId,
        entity: EntityId,
        minimum: ScopeLevel,
    ) -> Result<()> {
        self.entities.validate(room)?;
        self.entities.validate(entity)?;
        self.overrides.push_back(ScopeOverride {
            room,
            entity,
            minimum,
        });
        Ok(())
    }

    /// Looks up the strongest override for an entity observed from a room.
    #[must_use]
    pub fn scope_override(&self, room: EntityId, entity: EntityId) -> Option<ScopeLevel> {
        self.overrides
            .iter()
            .filter(|o| o.room == room && o.entity == entity)
            .map(|o| o.minimum)
            .max()
    }

    /// Iterates all overrides that apply from the given room.
    pub fn overrides_from(&self, room: EntityId) -> impl Iterator<Item = &ScopeOverride> + '_ {
        self.overrides.iter().filter(move |o| o.room == room)
    }

    // --- Snapshots ---

    /// Captures a snapshot of the entire world state.
    ///
    /// O(1): the persistent structures inside share storage with the live
    /// world until one side mutates.
    #[must_use]
    pub fn snapshot(&self) -> World {
        self.clone()
    }

    /// Restores the world from a snapshot by whole-state replacement.
    ///
    /// This is the only rollback mechanism; turn execution never rolls back
    /// on its own.
    pub fn restore(&mut self, snapshot: World) {
        *self = snapshot;
    }
}
