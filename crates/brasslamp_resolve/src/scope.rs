//! Physical scope resolution.
//!
//! Determines what an observer can perceive: carried, reachable, visible,
//! audible, or smellable. Every operation is a pure read over a world
//! snapshot; missing location data yields `Unaware`/`false`, never an error.
//!
//! Author-declared minimum-scope overrides (keyed by the observer's
//! containing room) combine with the physical result via `max`, so overrides
//! can only raise scope.

use brasslamp_foundation::EntityId;
use brasslamp_world::{ScopeLevel, TraitTag, World};
use serde::{Deserialize, Serialize};

/// A sense through which an entity is perceived.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sense {
    /// Seen.
    Sight,
    /// Heard.
    Hearing,
    /// Smelled.
    Smell,
    /// Within physical reach.
    Touch,
}

/// Resolves perception levels between an observer and target entities.
///
/// Borrow one per query batch; it holds no state beyond the world reference.
#[derive(Copy, Clone)]
pub struct ScopeResolver<'w> {
    world: &'w World,
}

impl<'w> ScopeResolver<'w> {
    /// Creates a resolver over a world snapshot.
    #[must_use]
    pub fn new(world: &'w World) -> Self {
        Self { world }
    }

    /// Computes the scope level of `target` as perceived by `observer`.
    ///
    /// Physical scope is evaluated in priority order (carried, reachable,
    /// visible, aware-through-hearing-or-smell), then raised to any author
    /// override declared for the observer's containing room.
    #[must_use]
    pub fn scope(&self, observer: EntityId, target: EntityId) -> ScopeLevel {
        let physical = if self.is_carried(observer, target) {
            ScopeLevel::Carried
        } else if self.can_reach(observer, target) {
            ScopeLevel::Reachable
        } else if self.can_see(observer, target) {
            ScopeLevel::Visible
        } else if self.can_hear(observer, target) || self.can_smell(observer, target) {
            ScopeLevel::Aware
        } else {
            ScopeLevel::Unaware
        };

        physical.raised_to(self.author_override(observer, target))
    }

    /// Checks if the observer can see the target.
    ///
    /// Requires a shared containing room, light (the room is lit or the
    /// observer carries an active light source), and no closed container
    /// between the target and room level. Supporters never block sight.
    #[must_use]
    pub fn can_see(&self, observer: EntityId, target: EntityId) -> bool {
        if observer == target {
            return false;
        }
        // Directly carried items stay visible and reachable even in the
        // dark; CARRIED implies REACHABLE implies VISIBLE.
        if self.is_carried(observer, target) {
            return true;
        }
        let Some(observer_room) = self.world.room_of(observer) else {
            return false;
        };
        let Some(target_room) = self.world.room_of(target) else {
            return false;
        };
        if observer_room != target_room {
            return false;
        }

        let dark = self
            .world
            .room(observer_room)
            .is_some_and(|room| room.dark);
        if dark && !self.has_light(observer) {
            return false;
        }

        self.unobstructed(target)
    }

    /// Checks if the observer can physically reach the target.
    ///
    /// Requires visibility, then: carried, co-located, resting on a supporter
    /// in the room, or inside an open container in the room or the observer's
    /// own inventory.
    #[must_use]
    pub fn can_reach(&self, observer: EntityId, target: EntityId) -> bool {
        if self.is_carried(observer, target) {
            return true;
        }
        if !self.can_see(observer, target) {
            return false;
        }

        let observer_location = self.world.location_of(observer);
        let target_location = self.world.location_of(target);
        if observer_location == target_location {
            return true;
        }

        let Some(holder) = target_location else {
            return false;
        };
        if self.world.has(holder, TraitTag::Supporter) {
            return true;
        }
        if self.world.has(holder, TraitTag::Container) {
            return self.world.is_open(holder);
        }

        // Held by something else in the room (an actor's hands, say)
        true
    }

    /// Checks if the observer can hear the target.
    ///
    /// Same-room sound passes unless the source sits inside a closed
    /// container without the loud override. Sound crosses rooms only through
    /// an open connecting door; a closed connector is a hard block.
    #[must_use]
    pub fn can_hear(&self, observer: EntityId, target: EntityId) -> bool {
        if observer == target {
            return false;
        }
        let Some(observer_room) = self.world.room_of(observer) else {
            return false;
        };
        let Some(target_room) = self.world.room_of(target) else {
            return false;
        };

        if observer_room == target_room {
            if self.inside_closed_container(target) {
                return self
                    .world
                    .identity(target)
                    .is_some_and(|identity| identity.loud);
            }
            return true;
        }

        self.open_connection(observer_room, target_room)
    }

    /// Checks if the observer can smell the target.
    ///
    /// The target must have a scent at all (smelly flag, edible, or actor).
    /// Closed containers block scent unless the source is very smelly;
    /// cross-room scent requires an open connecting door.
    #[must_use]
    pub fn can_smell(&self, observer: EntityId, target: EntityId) -> bool {
        if observer == target || !self.has_scent(target) {
            return false;
        }
        let Some(observer_room) = self.world.room_of(observer) else {
            return false;
        };
        let Some(target_room) = self.world.room_of(target) else {
            return false;
        };

        if observer_room == target_room {
            if self.inside_closed_container(target) {
                return self
                    .world
                    .identity(target)
                    .is_some_and(|identity| identity.very_smelly);
            }
            return true;
        }

        self.open_connection(observer_room, target_room)
    }

    /// Returns the senses through which the observer perceives the target.
    #[must_use]
    pub fn senses(&self, observer: EntityId, target: EntityId) -> Vec<Sense> {
        let mut senses = Vec::new();
        if self.can_see(observer, target) {
            senses.push(Sense::Sight);
        }
        if self.can_hear(observer, target) {
            senses.push(Sense::Hearing);
        }
        if self.can_smell(observer, target) {
            senses.push(Sense::Smell);
        }
        if self.can_reach(observer, target) {
            senses.push(Sense::Touch);
        }
        senses
    }

    /// All entities visible to the observer, unioned with author overrides
    /// at or above [`ScopeLevel::Visible`].
    #[must_use]
    pub fn visible_entities(&self, observer: EntityId) -> Vec<EntityId> {
        self.bulk(observer, ScopeLevel::Visible, |target| {
            self.can_see(observer, target)
        })
    }

    /// All entities reachable by the observer, unioned with author overrides
    /// at or above [`ScopeLevel::Reachable`].
    #[must_use]
    pub fn reachable_entities(&self, observer: EntityId) -> Vec<EntityId> {
        self.bulk(observer, ScopeLevel::Reachable, |target| {
            self.can_reach(observer, target)
        })
    }

    /// All entities audible to the observer, unioned with author overrides
    /// at or above [`ScopeLevel::Aware`].
    #[must_use]
    pub fn audible_entities(&self, observer: EntityId) -> Vec<EntityId> {
        self.bulk(observer, ScopeLevel::Aware, |target| {
            self.can_hear(observer, target)
        })
    }

    fn bulk(
        &self,
        observer: EntityId,
        threshold: ScopeLevel,
        physical: impl Fn(EntityId) -> bool,
    ) -> Vec<EntityId> {
        let room = self.world.room_of(observer);
        self.world
            .entities()
            .filter(|&target| target != observer)
            .filter(|&target| {
                if physical(target) {
                    return true;
                }
                room.and_then(|room| self.world.scope_override(room, target))
                    .is_some_and(|minimum| minimum >= threshold)
            })
            .collect()
    }

    /// Whether the target is directly contained by the observer.
    #[must_use]
    pub fn is_carried(&self, observer: EntityId, target: EntityId) -> bool {
        self.world.location_of(target) == Some(observer)
    }

    fn author_override(&self, observer: EntityId, target: EntityId) -> Option<ScopeLevel> {
        let room = self.world.room_of(observer)?;
        self.world.scope_override(room, target)
    }

    /// True if no closed container sits between the target and room level.
    fn unobstructed(&self, target: EntityId) -> bool {
        let mut cursor = self.world.location_of(target);
        while let Some(holder) = cursor {
            if self.world.has(holder, TraitTag::Room) {
                return true;
            }
            if self.world.has(holder, TraitTag::Container) && !self.world.is_open(holder) {
                return false;
            }
            cursor = self.world.location_of(holder);
        }
        false
    }

    fn inside_closed_container(&self, target: EntityId) -> bool {
        let mut cursor = self.world.location_of(target);
        while let Some(holder) = cursor {
            if self.world.has(holder, TraitTag::Room) {
                return false;
            }
            if self.world.has(holder, TraitTag::Container) && !self.world.is_open(holder) {
                return true;
            }
            cursor = self.world.location_of(holder);
        }
        false
    }

    /// True if an open door connects the two rooms.
    fn open_connection(&self, a: EntityId, b: EntityId) -> bool {
        self.world.entities().any(|entity| {
            self.world
                .door(entity)
                .is_some_and(|door| door.connects(a, b))
                && self.world.is_open(entity)
        })
    }

    fn has_scent(&self, target: EntityId) -> bool {
        if self
            .world
            .identity(target)
            .is_some_and(|identity| identity.smelly)
        {
            return true;
        }
        self.world.has(target, TraitTag::Edible) || self.world.has(target, TraitTag::Actor)
    }

    /// Whether the observer has light: an active light source carried or
    /// constituted by the observer itself.
    fn has_light(&self, observer: EntityId) -> bool {
        if self.is_active_light(observer) {
            return true;
        }
        self.world
            .contents_of(observer)
            .into_iter()
            .any(|item| self.is_active_light(item))
    }

    fn is_active_light(&self, entity: EntityId) -> bool {
        if !self.world.has(entity, TraitTag::LightSource) {
            return false;
        }
        // Light sources without a switch are always on
        self.world
            .switchable(entity)
            .is_none_or(|switchable| switchable.on)
    }
}
