//! Pronoun memory persists across turns until reset.

use crate::engine;
use brasslamp_engine::EventKind;
use brasslamp_resolve::{NounPhrase, ParsedCommand, Pronoun};
use brasslamp_world::{IdentityTrait, Trait};

#[test]
fn it_refers_to_the_last_resolved_entity_across_turns() {
    let (mut engine, room, player) = engine();
    let lamp = engine
        .world_mut()
        .spawn([Trait::Identity(IdentityTrait::new("lamp"))]);
    engine.world_mut().move_entity(lamp, room).unwrap();

    let take = ParsedCommand::new("taking")
        .with_input("take lamp")
        .with_direct(NounPhrase::new("lamp"));
    assert!(engine.execute_turn(&take).success);
    assert_eq!(engine.world().location_of(lamp), Some(player));

    // A later turn: "examine it"
    let examine = ParsedCommand::new("examining")
        .with_input("examine it")
        .with_direct(NounPhrase::pronoun(Pronoun::It));
    let result = engine.execute_turn(&examine);
    assert!(result.success);
    assert!(result.events.iter().any(|e| matches!(
        &e.event.kind,
        EventKind::Examined { target, .. } if *target == lamp
    )));
}

#[test]
fn restore_resets_pronoun_memory() {
    let (mut engine, room, _player) = engine();
    let lamp = engine
        .world_mut()
        .spawn([Trait::Identity(IdentityTrait::new("lamp"))]);
    engine.world_mut().move_entity(lamp, room).unwrap();

    let snapshot = engine.snapshot();

    let take = ParsedCommand::new("taking")
        .with_input("take lamp")
        .with_direct(NounPhrase::new("lamp"));
    assert!(engine.execute_turn(&take).success);

    engine.restore(snapshot);

    // "it" no longer refers to anything
    let examine = ParsedCommand::new("examining")
        .with_input("examine it")
        .with_direct(NounPhrase::pronoun(Pronoun::It));
    let result = engine.execute_turn(&examine);
    assert!(!result.success);
    assert!(result.events.iter().any(|e| matches!(
        &e.event.kind,
        EventKind::ValidationFailed { .. }
    )));
}

#[test]
fn take_all_binds_them() {
    let (mut engine, room, _player) = engine();
    let lamp = engine
        .world_mut()
        .spawn([Trait::Identity(IdentityTrait::new("lamp"))]);
    let key = engine
        .world_mut()
        .spawn([Trait::Identity(IdentityTrait::new("key"))]);
    engine.world_mut().move_entity(lamp, room).unwrap();
    engine.world_mut().move_entity(key, room).unwrap();

    let take_all = ParsedCommand::new("taking")
        .with_input("take all")
        .with_direct(NounPhrase::all(vec![]));
    assert!(engine.execute_turn(&take_all).success);

    // "drop them" resolves through the bound plural referent
    let drop_them = ParsedCommand::new("dropping")
        .with_input("drop them")
        .with_direct(NounPhrase::pronoun(Pronoun::Them));
    let result = engine.execute_turn(&drop_them);
    assert!(result.success);
    assert_eq!(engine.world().location_of(lamp), Some(room));
}
