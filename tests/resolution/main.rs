//! Integration tests for entity resolution and command validation.

mod disambiguation;
mod expansion;
mod pronouns;

use brasslamp_engine::{ActionRegistry, TurnEngine};
use brasslamp_foundation::EntityId;
use brasslamp_world::{ContainerTrait, IdentityTrait, RoomTrait, Trait, World};

/// A lit room with a player, plus a registry with the standard actions.
pub fn base_world() -> (World, EntityId, EntityId) {
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
    (world, room, player)
}

/// A standard registry.
pub fn registry() -> ActionRegistry {
    let mut registry = ActionRegistry::new();
    brasslamp_engine::actions::register_standard(&mut registry);
    registry
}

/// A full engine over the base world.
pub fn engine() -> (TurnEngine, EntityId, EntityId) {
    let (world, room, player) = base_world();
    (TurnEngine::new(world), room, player)
}
