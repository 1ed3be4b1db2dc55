//! Deterministic event ordering within and across turns.

use crate::engine;
use brasslamp_engine::SequencedEvent;
use brasslamp_resolve::{NounPhrase, ParsedCommand};
use brasslamp_world::{IdentityTrait, Trait};

#[test]
fn ordinals_strictly_increase_within_a_turn() {
    let (mut engine, room, _player) = engine();
    for name in ["lamp", "key", "coin"] {
        let item = engine
            .world_mut()
            .spawn([Trait::Identity(IdentityTrait::new(name))]);
        engine.world_mut().move_entity(item, room).unwrap();
    }

    let result = engine.execute_turn(
        &ParsedCommand::new("taking")
            .with_input("take all")
            .with_direct(NounPhrase::all(vec![])),
    );

    assert!(result.events.len() >= 6); // taken + success per item
    for pair in result.events.windows(2) {
        assert!(pair[0].sort_key() < pair[1].sort_key());
        assert_eq!(pair[0].turn, result.turn);
    }
}

#[test]
fn sorting_a_shuffled_copy_recovers_emission_order() {
    let (mut engine, room, _player) = engine();
    for name in ["lamp", "key", "coin", "feather"] {
        let item = engine
            .world_mut()
            .spawn([Trait::Identity(IdentityTrait::new(name))]);
        engine.world_mut().move_entity(item, room).unwrap();
    }

    let result = engine.execute_turn(
        &ParsedCommand::new("taking")
            .with_input("take all")
            .with_direct(NounPhrase::all(vec![])),
    );

    let mut shuffled: Vec<SequencedEvent> = result.events.clone();
    shuffled.reverse();
    let mid = shuffled.len() / 2;
    shuffled.swap(0, mid);
    shuffled.sort_by_key(SequencedEvent::sort_key);

    assert_eq!(shuffled, result.events);
}

#[test]
fn each_turn_restarts_ordinals_at_one() {
    let (mut engine, room, _player) = engine();
    for name in ["lamp", "key"] {
        let item = engine
            .world_mut()
            .spawn([Trait::Identity(IdentityTrait::new(name))]);
        engine.world_mut().move_entity(item, room).unwrap();
    }

    let first = engine.execute_turn(
        &ParsedCommand::new("taking")
            .with_input("take all")
            .with_direct(NounPhrase::all(vec![])),
    );
    assert!(first.events.len() > 1);

    let second = engine.execute_turn(
        &ParsedCommand::new("dropping")
            .with_input("drop lamp")
            .with_direct(NounPhrase::new("lamp")),
    );

    assert_eq!(second.turn, first.turn + 1);
    assert_eq!(second.events[0].ordinal, 1);
}
