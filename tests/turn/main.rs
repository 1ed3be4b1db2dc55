//! Integration tests for turn execution.
//!
//! Event ordering guarantees, the implicit-take matrix, reaction
//! sub-sequencing, and failure behavior.

mod failures;
mod implicit_take;
mod ordering;
mod reactions;

use brasslamp_engine::TurnEngine;
use brasslamp_foundation::EntityId;
use brasslamp_world::{ContainerTrait, IdentityTrait, RoomTrait, Trait, World};

/// An engine over a lit room with a player.
pub fn engine() -> (TurnEngine, EntityId, EntityId) {
    let mut world = World::new();
    let room = world.spawn([
        Trait::Room(RoomTrait::default()),
        Trait::Identity(IdentityTrait::new("parlor")),
    ]);
    let player = world.spawn([
        Trait::Actor,
        Trait::Container(ContainerTrait::default()),
        Trait::Identity(IdentityTrait::new("yourself")),
    ]);
    world.move_entity(player, room).unwrap();
    world.set_player(player).unwrap();
    (TurnEngine::new(world), room, player)
}
