//! Disambiguation determinism across repeated resolutions.

use crate::{base_world, registry};
use brasslamp_resolve::{
    CommandValidator, NounPhrase, ParsedCommand, ValidationError,
};
use brasslamp_world::{IdentityTrait, Trait};

#[test]
fn red_ball_always_resolves_to_the_red_one() {
    let (mut world, room, player) = base_world();
    let red = world.spawn([Trait::Identity(
        IdentityTrait::new("ball")
            .with_adjective("red")
            .with_adjective("small"),
    )]);
    let blue = world.spawn([Trait::Identity(
        IdentityTrait::new("ball")
            .with_adjective("blue")
            .with_adjective("large"),
    )]);
    world.move_entity(red, room).unwrap();
    world.move_entity(blue, room).unwrap();

    let registry = registry();
    let mut validator = CommandValidator::new();
    let command = ParsedCommand::new("taking")
        .with_direct(NounPhrase::new("ball").with_modifier("red"));

    for _ in 0..5 {
        let validated = validator
            .validate(&world, &registry, player, &command)
            .unwrap();
        assert_eq!(validated.direct_object.unwrap().entity, red);
    }
}

#[test]
fn bare_ball_is_ambiguous_with_exactly_two_candidates() {
    let (mut world, room, player) = base_world();
    let red = world.spawn([Trait::Identity(
        IdentityTrait::new("ball").with_adjective("red"),
    )]);
    let blue = world.spawn([Trait::Identity(
        IdentityTrait::new("ball").with_adjective("blue"),
    )]);
    world.move_entity(red, room).unwrap();
    world.move_entity(blue, room).unwrap();

    let registry = registry();
    let mut validator = CommandValidator::new();
    let err = validator
        .validate(
            &world,
            &registry,
            player,
            &ParsedCommand::new("taking").with_direct(NounPhrase::new("ball")),
        )
        .unwrap_err();

    let ValidationError::EntityNotFound {
        ambiguous: Some(choices),
        ..
    } = err
    else {
        panic!("expected an ambiguity error, got {err:?}");
    };
    assert_eq!(choices.len(), 2);
    let names: Vec<&str> = choices.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["ball", "ball"]);
}

#[test]
fn ambiguity_error_caps_candidates_at_five() {
    let (mut world, room, player) = base_world();
    for color in ["red", "blue", "green", "white", "black", "grey", "pink"] {
        let coin = world.spawn([Trait::Identity(
            IdentityTrait::new("coin").with_adjective(color),
        )]);
        world.move_entity(coin, room).unwrap();
    }

    let registry = registry();
    let mut validator = CommandValidator::new();
    let err = validator
        .validate(
            &world,
            &registry,
            player,
            &ParsedCommand::new("taking").with_direct(NounPhrase::new("coin")),
        )
        .unwrap_err();

    let ValidationError::EntityNotFound {
        ambiguous: Some(choices),
        ..
    } = err
    else {
        panic!("expected an ambiguity error");
    };
    assert_eq!(choices.len(), 5);
}
