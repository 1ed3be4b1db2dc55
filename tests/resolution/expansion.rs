//! Multi-object expansion through full commands.

use crate::engine;
use brasslamp_engine::EventKind;
use brasslamp_resolve::{NounPhrase, ParsedCommand};
use brasslamp_world::{IdentityTrait, SceneryTrait, Trait};

#[test]
fn take_all_takes_only_portable_things() {
    let (mut engine, room, player) = engine();
    let lamp = engine
        .world_mut()
        .spawn([Trait::Identity(IdentityTrait::new("lamp"))]);
    let key = engine
        .world_mut()
        .spawn([Trait::Identity(IdentityTrait::new("key"))]);
    let fireplace = engine.world_mut().spawn([
        Trait::Scenery(SceneryTrait::default()),
        Trait::Identity(IdentityTrait::new("fireplace")),
    ]);
    let butler = engine.world_mut().spawn([
        Trait::Actor,
        Trait::Identity(IdentityTrait::new("butler")),
    ]);
    for e in [lamp, key, fireplace, butler] {
        engine.world_mut().move_entity(e, room).unwrap();
    }

    let result = engine.execute_turn(
        &ParsedCommand::new("taking")
            .with_input("take all")
            .with_direct(NounPhrase::all(vec![])),
    );

    assert!(result.success);
    assert_eq!(engine.world().location_of(lamp), Some(player));
    assert_eq!(engine.world().location_of(key), Some(player));
    assert_eq!(engine.world().location_of(fireplace), Some(room));
    assert_eq!(engine.world().location_of(butler), Some(room));
}

#[test]
fn take_list_is_best_effort() {
    let (mut engine, room, player) = engine();
    let lamp = engine
        .world_mut()
        .spawn([Trait::Identity(IdentityTrait::new("lamp"))]);
    engine.world_mut().move_entity(lamp, room).unwrap();

    // "take lamp and grue": the grue matches nothing and drops silently
    let result = engine.execute_turn(
        &ParsedCommand::new("taking")
            .with_input("take lamp and grue")
            .with_direct(NounPhrase::list(vec![
                "lamp".to_string(),
                "grue".to_string(),
            ])),
    );

    assert!(result.success);
    assert_eq!(engine.world().location_of(lamp), Some(player));
    let taken = result
        .events
        .iter()
        .filter(|e| matches!(e.event.kind, EventKind::Taken { .. }))
        .count();
    // Partial success is visible in the count
    assert_eq!(taken, 1);
}

#[test]
fn take_all_but_exclusion_by_alias() {
    let (mut engine, room, player) = engine();
    let lamp = engine
        .world_mut()
        .spawn([Trait::Identity(IdentityTrait::new("lamp"))]);
    let sword = engine.world_mut().spawn([Trait::Identity(
        IdentityTrait::new("sword").with_alias("blade"),
    )]);
    engine.world_mut().move_entity(lamp, room).unwrap();
    engine.world_mut().move_entity(sword, room).unwrap();

    let result = engine.execute_turn(
        &ParsedCommand::new("taking")
            .with_input("take all but the blade")
            .with_direct(NounPhrase::all(vec!["blade".to_string()])),
    );

    assert!(result.success);
    assert_eq!(engine.world().location_of(lamp), Some(player));
    assert_eq!(engine.world().location_of(sword), Some(room));
}
