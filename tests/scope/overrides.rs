//! Author scope overrides are additive-only.

use crate::base_world;
use brasslamp_resolve::ScopeResolver;
use brasslamp_world::{IdentityTrait, RoomTrait, ScopeLevel, Trait};

#[test]
fn override_raises_unaware_to_reachable() {
    let (mut world, room, player) = base_world();
    let vista = world.spawn([Trait::Room(RoomTrait::default())]);
    let mountain = world.spawn([Trait::Identity(IdentityTrait::new("mountain"))]);
    world.move_entity(mountain, vista).unwrap();

    world
        .add_scope_override(room, mountain, ScopeLevel::Reachable)
        .unwrap();

    let resolver = ScopeResolver::new(&world);
    assert_eq!(resolver.scope(player, mountain), ScopeLevel::Reachable);
}

#[test]
fn override_never_lowers_carried() {
    let (mut world, room, player) = base_world();
    let lamp = world.spawn([Trait::Identity(IdentityTrait::new("lamp"))]);
    world.move_entity(lamp, player).unwrap();

    world
        .add_scope_override(room, lamp, ScopeLevel::Aware)
        .unwrap();

    let resolver = ScopeResolver::new(&world);
    assert_eq!(resolver.scope(player, lamp), ScopeLevel::Carried);
}

#[test]
fn override_is_keyed_by_observer_room() {
    let (mut world, room, player) = base_world();
    let vista = world.spawn([Trait::Room(RoomTrait::default())]);
    let mountain = world.spawn([Trait::Identity(IdentityTrait::new("mountain"))]);
    let cellar = world.spawn([Trait::Room(RoomTrait::default())]);
    world.move_entity(mountain, vista).unwrap();

    world
        .add_scope_override(room, mountain, ScopeLevel::Visible)
        .unwrap();

    {
        let resolver = ScopeResolver::new(&world);
        assert_eq!(resolver.scope(player, mountain), ScopeLevel::Visible);
    }

    // From another room the override doesn't apply
    world.move_entity(player, cellar).unwrap();
    let resolver = ScopeResolver::new(&world);
    assert_eq!(resolver.scope(player, mountain), ScopeLevel::Unaware);
}
