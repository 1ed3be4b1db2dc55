//! Failure behavior: every failed turn still produces events and advances
//! the counter.

use crate::engine;
use brasslamp_engine::EventKind;
use brasslamp_resolve::{NounPhrase, ParsedCommand};
use brasslamp_world::{IdentityTrait, Trait, World};

#[test]
fn validation_failure_yields_one_event_and_advances_the_turn() {
    let (mut engine, _room, _player) = engine();

    let result = engine.execute_turn(
        &ParsedCommand::new("taking")
            .with_input("take grue")
            .with_direct(NounPhrase::new("grue")),
    );

    assert!(!result.success);
    assert_eq!(result.turn, 1);
    assert_eq!(result.events.len(), 1);
    assert!(matches!(
        &result.events[0].event.kind,
        EventKind::ValidationFailed { code, .. } if code == "entity_not_found"
    ));

    // The next turn still advances
    let next = engine.execute_turn(
        &ParsedCommand::new("taking")
            .with_input("take grue")
            .with_direct(NounPhrase::new("grue")),
    );
    assert_eq!(next.turn, 2);
}

#[test]
fn unknown_action_is_reported_not_swallowed() {
    let (mut engine, _room, _player) = engine();

    let result = engine.execute_turn(&ParsedCommand::new("yodeling").with_input("yodel"));
    assert!(!result.success);
    assert!(matches!(
        &result.events[0].event.kind,
        EventKind::ValidationFailed { code, .. } if code == "action_not_available"
    ));
}

#[test]
fn missing_player_is_an_exceptional_failure_with_an_event() {
    let mut engine = brasslamp_engine::TurnEngine::new(World::new());

    let result = engine.execute_turn(&ParsedCommand::new("taking").with_input("take lamp"));
    assert!(!result.success);
    assert_eq!(result.turn, 1);
    assert_eq!(result.events.len(), 1);
    assert!(matches!(
        &result.events[0].event.kind,
        EventKind::CommandFailed { .. }
    ));
    assert!(result.error.is_some());
}

#[test]
fn business_refusal_is_an_event_not_an_error() {
    let (mut engine, room, _player) = engine();
    let statue = engine.world_mut().spawn([
        Trait::Scenery(brasslamp_world::SceneryTrait::default()),
        Trait::Identity(IdentityTrait::new("statue")),
    ]);
    engine.world_mut().move_entity(statue, room).unwrap();

    let result = engine.execute_turn(
        &ParsedCommand::new("taking")
            .with_input("take statue")
            .with_direct(NounPhrase::new("statue")),
    );

    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("fixed_in_place"));
    assert!(result.events.iter().any(|e| matches!(
        &e.event.kind,
        EventKind::ActionBlocked { message, .. } if message == "fixed_in_place"
    )));
}

#[test]
fn history_retains_validated_commands() {
    let (mut engine, room, _player) = engine();
    let lamp = engine
        .world_mut()
        .spawn([Trait::Identity(IdentityTrait::new("lamp"))]);
    engine.world_mut().move_entity(lamp, room).unwrap();

    engine.execute_turn(
        &ParsedCommand::new("taking")
            .with_input("take lamp")
            .with_direct(NounPhrase::new("lamp")),
    );
    engine.execute_turn(&ParsedCommand::new("yodeling").with_input("yodel"));

    let history = engine.history();
    assert_eq!(history.len(), 2);
    assert!(history[0].success);
    assert!(history[0].command.is_some());
    assert!(!history[1].success);
    assert!(history[1].command.is_none());
}
