//! Integration tests for scope resolution.
//!
//! Monotonicity of scope levels, container opacity, and author overrides.

mod monotonicity;
mod opacity;
mod overrides;

use brasslamp_foundation::EntityId;
use brasslamp_world::{ContainerTrait, IdentityTrait, RoomTrait, Trait, World};

/// A lit room with a player in it.
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
