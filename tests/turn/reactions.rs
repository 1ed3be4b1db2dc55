//! Reaction dispatch produces sub-sequenced events.

use crate::engine;
use brasslamp_engine::{EventKind, SemanticEvent};
use brasslamp_resolve::{NounPhrase, ParsedCommand};
use brasslamp_world::{IdentityTrait, Trait, World};

fn alarm(_world: &World, event: &SemanticEvent) -> Vec<SemanticEvent> {
    let EventKind::Taken { item, .. } = event.kind else {
        return Vec::new();
    };
    vec![SemanticEvent::post(EventKind::Heard {
        target: item,
        target_name: "alarm".to_string(),
    })]
}

#[test]
fn reaction_events_nest_under_the_triggering_ordinal() {
    let (mut engine, room, _player) = engine();
    let idol = engine
        .world_mut()
        .spawn([Trait::Identity(IdentityTrait::new("idol"))]);
    engine.world_mut().move_entity(idol, room).unwrap();
    engine.reactions_mut().register(idol, "taken", alarm);

    let result = engine.execute_turn(
        &ParsedCommand::new("taking")
            .with_input("take idol")
            .with_direct(NounPhrase::new("idol")),
    );
    assert!(result.success);

    let taken_index = result
        .events
        .iter()
        .position(|e| matches!(e.event.kind, EventKind::Taken { .. }))
        .unwrap();
    let reaction = &result.events[taken_index + 1];

    assert!(matches!(reaction.event.kind, EventKind::Heard { .. }));
    assert_eq!(reaction.ordinal, result.events[taken_index].ordinal);
    assert_eq!(reaction.sub_ordinal, Some(1));
    assert_eq!(
        reaction.event.phase,
        brasslamp_engine::EventPhase::Post
    );

    // Total order still holds across the whole stream
    for pair in result.events.windows(2) {
        assert!(pair[0].sort_key() < pair[1].sort_key());
    }
}

#[test]
fn unrelated_entities_do_not_react() {
    let (mut engine, room, _player) = engine();
    let idol = engine
        .world_mut()
        .spawn([Trait::Identity(IdentityTrait::new("idol"))]);
    let lamp = engine
        .world_mut()
        .spawn([Trait::Identity(IdentityTrait::new("lamp"))]);
    engine.world_mut().move_entity(idol, room).unwrap();
    engine.world_mut().move_entity(lamp, room).unwrap();
    engine.reactions_mut().register(idol, "taken", alarm);

    let result = engine.execute_turn(
        &ParsedCommand::new("taking")
            .with_input("take lamp")
            .with_direct(NounPhrase::new("lamp")),
    );
    assert!(result.success);
    assert!(
        !result
            .events
            .iter()
            .any(|e| matches!(e.event.kind, EventKind::Heard { .. }))
    );
}
