//! Scope level implications hold across containment arrangements.

use crate::base_world;
use brasslamp_resolve::ScopeResolver;
use brasslamp_world::{
    ContainerTrait, IdentityTrait, OpenableTrait, RoomTrait, ScopeLevel, Trait,
};

#[test]
fn carried_implies_reachable_and_visible() {
    let (mut world, _room, player) = base_world();
    let lamp = world.spawn([Trait::Identity(IdentityTrait::new("lamp"))]);
    world.move_entity(lamp, player).unwrap();

    let resolver = ScopeResolver::new(&world);
    assert_eq!(resolver.scope(player, lamp), ScopeLevel::Carried);
    assert!(resolver.can_reach(player, lamp));
    assert!(resolver.can_see(player, lamp));
}

#[test]
fn reachable_implies_visible() {
    let (mut world, room, player) = base_world();
    let table = world.spawn([
        Trait::Supporter,
        Trait::Identity(IdentityTrait::new("table")),
    ]);
    let plate = world.spawn([Trait::Identity(IdentityTrait::new("plate"))]);
    world.move_entity(table, room).unwrap();
    world.move_entity(plate, table).unwrap();

    let resolver = ScopeResolver::new(&world);
    assert_eq!(resolver.scope(player, plate), ScopeLevel::Reachable);
    assert!(resolver.can_see(player, plate));
}

#[test]
fn implications_hold_for_every_arrangement() {
    // One entity in each interesting position; the implications must hold
    // for all of them at once.
    let (mut world, room, player) = base_world();

    let carried = world.spawn([Trait::Identity(IdentityTrait::new("carried"))]);
    world.move_entity(carried, player).unwrap();

    let on_floor = world.spawn([Trait::Identity(IdentityTrait::new("floor-thing"))]);
    world.move_entity(on_floor, room).unwrap();

    let open_box = world.spawn([
        Trait::Container(ContainerTrait::default()),
        Trait::Openable(OpenableTrait { open: true }),
        Trait::Identity(IdentityTrait::new("crate")),
    ]);
    world.move_entity(open_box, room).unwrap();
    let in_open = world.spawn([Trait::Identity(IdentityTrait::new("marble"))]);
    world.move_entity(in_open, open_box).unwrap();

    let shut_box = world.spawn([
        Trait::Container(ContainerTrait::default()),
        Trait::Openable(OpenableTrait { open: false }),
        Trait::Identity(IdentityTrait::new("chest")),
    ]);
    world.move_entity(shut_box, room).unwrap();
    let in_shut = world.spawn([Trait::Identity(IdentityTrait::new("pearl"))]);
    world.move_entity(in_shut, shut_box).unwrap();

    let elsewhere = world.spawn([Trait::Room(RoomTrait::default())]);
    let far = world.spawn([Trait::Identity(IdentityTrait::new("far-thing"))]);
    world.move_entity(far, elsewhere).unwrap();

    let resolver = ScopeResolver::new(&world);
    for target in world.entities().filter(|&e| e != player) {
        let scope = resolver.scope(player, target);
        if scope >= ScopeLevel::Carried {
            assert!(resolver.can_reach(player, target), "{target} carried");
        }
        if scope >= ScopeLevel::Reachable {
            assert!(resolver.can_see(player, target), "{target} reachable");
        }
    }
}
