//! The end-to-end implicit-take matrix.
//!
//! An action requiring a carried object, given a merely-reachable one,
//! triggers exactly one implicit taking cycle whose events precede its own,
//! unless implicit takes are disabled at story or action level.

use crate::engine;
use brasslamp_engine::{Action, EventKind, TurnEngine, Validity};
use brasslamp_foundation::{EntityId, Result};
use brasslamp_resolve::{ActionMetadata, NounPhrase, ParsedCommand, ScopeRequirement};
use brasslamp_world::{ContainerTrait, IdentityTrait, Trait, World};

fn put_setup(engine: &mut TurnEngine, room: EntityId) -> (EntityId, EntityId) {
    let coin = engine
        .world_mut()
        .spawn([Trait::Identity(IdentityTrait::new("coin"))]);
    let box_ = engine.world_mut().spawn([
        Trait::Container(ContainerTrait::default()),
        Trait::Identity(IdentityTrait::new("box")),
    ]);
    engine.world_mut().move_entity(coin, room).unwrap();
    engine.world_mut().move_entity(box_, room).unwrap();
    (coin, box_)
}

fn put_command() -> ParsedCommand {
    ParsedCommand::new("putting")
        .with_input("put coin in box")
        .with_direct(NounPhrase::new("coin"))
        .with_indirect(NounPhrase::new("box"))
        .with_preposition("in")
}

#[test]
fn reachable_object_triggers_exactly_one_take_cycle() {
    let (mut engine, room, _player) = engine();
    let (coin, box_) = put_setup(&mut engine, room);

    let result = engine.execute_turn(&put_command());
    assert!(result.success);
    assert_eq!(engine.world().location_of(coin), Some(box_));

    let implicit_takes = result
        .events
        .iter()
        .filter(|e| matches!(e.event.kind, EventKind::ImplicitTake { .. }))
        .count();
    assert_eq!(implicit_takes, 1);

    // Implicit events come first, then the put
    let take_position = result
        .events
        .iter()
        .position(|e| matches!(e.event.kind, EventKind::Taken { .. }))
        .unwrap();
    let put_position = result
        .events
        .iter()
        .position(|e| matches!(e.event.kind, EventKind::Put { .. }))
        .unwrap();
    assert!(take_position < put_position);
}

#[test]
fn story_level_opt_out_returns_not_carried() {
    let (mut engine, room, _player) = engine();
    engine.world_mut().config_mut().allow_implicit_takes = false;
    let (coin, _box) = put_setup(&mut engine, room);

    let result = engine.execute_turn(&put_command());
    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("not_carried"));
    assert_eq!(engine.world().location_of(coin), Some(room));
    assert!(
        !result
            .events
            .iter()
            .any(|e| matches!(e.event.kind, EventKind::ImplicitTake { .. }))
    );
}

/// A putting variant that opts out of implicit takes at action level.
struct StrictPutting {
    inner: brasslamp_engine::actions::PuttingAction,
    metadata: ActionMetadata,
}

impl StrictPutting {
    fn new() -> Self {
        Self {
            inner: brasslamp_engine::actions::PuttingAction::new(),
            metadata: ActionMetadata::with_direct(ScopeRequirement::Reachable)
                .and_indirect(ScopeRequirement::Reachable)
                .with_prepositions(vec!["in", "into", "inside", "on", "onto"])
                .carried_direct()
                .no_implicit_take(),
        }
    }
}

impl Action for StrictPutting {
    fn id(&self) -> &'static str {
        "putting"
    }

    fn metadata(&self) -> &ActionMetadata {
        &self.metadata
    }

    fn validate(
        &self,
        world: &World,
        ctx: &mut brasslamp_engine::ActionContext,
    ) -> Validity {
        self.inner.validate(world, ctx)
    }

    fn execute(
        &self,
        world: &mut World,
        ctx: &mut brasslamp_engine::ActionContext,
    ) -> Result<()> {
        self.inner.execute(world, ctx)
    }

    fn report(
        &self,
        world: &World,
        ctx: &brasslamp_engine::ActionContext,
    ) -> Vec<brasslamp_engine::SemanticEvent> {
        self.inner.report(world, ctx)
    }
}

#[test]
fn action_level_opt_out_returns_not_carried() {
    let (mut engine, room, _player) = engine();
    engine.registry_mut().register(Box::new(StrictPutting::new()));
    let (coin, _box) = put_setup(&mut engine, room);

    let result = engine.execute_turn(&put_command());
    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("not_carried"));
    assert_eq!(engine.world().location_of(coin), Some(room));
}

#[test]
fn already_carried_object_skips_the_cycle() {
    let (mut engine, room, player) = engine();
    let (coin, box_) = put_setup(&mut engine, room);
    engine.world_mut().move_entity(coin, player).unwrap();

    let result = engine.execute_turn(&put_command());
    assert!(result.success);
    assert_eq!(engine.world().location_of(coin), Some(box_));
    assert!(
        !result
            .events
            .iter()
            .any(|e| matches!(e.event.kind, EventKind::ImplicitTake { .. }))
    );
}
