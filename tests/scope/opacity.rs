//! Closed-container opacity and the open/closed flip.

use crate::base_world;
use brasslamp_resolve::ScopeResolver;
use brasslamp_world::{ContainerTrait, IdentityTrait, OpenableTrait, Trait};

#[test]
fn flipping_the_flag_reveals_contents_without_re_resolving() {
    let (mut world, room, player) = base_world();
    let chest = world.spawn([
        Trait::Container(ContainerTrait::default()),
        Trait::Openable(OpenableTrait { open: false }),
        Trait::Identity(IdentityTrait::new("chest")),
    ]);
    let pearl = world.spawn([Trait::Identity(IdentityTrait::new("pearl"))]);
    world.move_entity(chest, room).unwrap();
    world.move_entity(pearl, chest).unwrap();

    {
        let resolver = ScopeResolver::new(&world);
        assert!(!resolver.can_see(player, pearl));
        assert!(!resolver.can_reach(player, pearl));
    }

    // Flip the flag in place; no relocation, same entity identity.
    world.openable_mut(chest).unwrap().open = true;

    let resolver = ScopeResolver::new(&world);
    assert!(resolver.can_see(player, pearl));
    assert!(resolver.can_reach(player, pearl));
}

#[test]
fn nesting_inside_an_open_box_inside_a_closed_chest_still_blocks() {
    let (mut world, room, player) = base_world();
    let chest = world.spawn([
        Trait::Container(ContainerTrait::default()),
        Trait::Openable(OpenableTrait { open: false }),
        Trait::Identity(IdentityTrait::new("chest")),
    ]);
    let box_ = world.spawn([
        Trait::Container(ContainerTrait::default()),
        Trait::Openable(OpenableTrait { open: true }),
        Trait::Identity(IdentityTrait::new("box")),
    ]);
    let pearl = world.spawn([Trait::Identity(IdentityTrait::new("pearl"))]);
    world.move_entity(chest, room).unwrap();
    world.move_entity(box_, chest).unwrap();
    world.move_entity(pearl, box_).unwrap();

    let resolver = ScopeResolver::new(&world);
    // The open box doesn't help while the chest above it is shut
    assert!(!resolver.can_see(player, pearl));

    world.openable_mut(chest).unwrap().open = true;
    let resolver = ScopeResolver::new(&world);
    assert!(resolver.can_see(player, pearl));
    assert!(resolver.can_reach(player, pearl));
}
