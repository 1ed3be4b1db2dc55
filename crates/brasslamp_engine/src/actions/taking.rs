//! Taking: pick up an object, or several.
//!
//! Handles "take lamp", "take all", "take all but sword", and
//! "take lamp and key". Worn items are implicitly removed first.

use brasslamp_foundation::{EntityId, Result};
use brasslamp_resolve::{
    expand, ActionMetadata, ExpandOptions, ExpandScope, ScopeRequirement,
};
use brasslamp_world::{TraitTag, World};

use crate::action::{Action, Validity};
use crate::context::{ActionContext, ItemOutcome};
use crate::event::{EventKind, SemanticEvent};

const NO_TARGET: &str = "no_target";
const CANT_TAKE_SELF: &str = "cant_take_self";
const ALREADY_HAVE: &str = "already_have";
const CANT_TAKE_ROOM: &str = "cant_take_room";
const FIXED_IN_PLACE: &str = "fixed_in_place";
const NOT_WHILE_INSIDE: &str = "not_while_inside";
const CONTAINER_FULL: &str = "container_full";
const NOTHING_TO_TAKE: &str = "nothing_to_take";
const TAKEN: &str = "taken";
const TAKEN_FROM: &str = "taken_from";

/// The taking action.
pub struct TakingAction {
    metadata: ActionMetadata,
}

impl TakingAction {
    /// The action id.
    pub const ID: &'static str = "taking";

    /// Creates the action.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: ActionMetadata::with_direct(ScopeRequirement::Reachable),
        }
    }

    fn validate_single(world: &World, actor: EntityId, noun: EntityId) -> Validity {
        let item_param = vec![("item".to_string(), world.name_of(noun))];

        if noun == actor {
            return Validity::blocked(CANT_TAKE_SELF);
        }
        if world.location_of(noun) == Some(actor) {
            return Validity::blocked_with(ALREADY_HAVE, item_param);
        }
        if world.has(noun, TraitTag::Room) {
            return Validity::blocked_with(CANT_TAKE_ROOM, item_param);
        }
        if let Some(scenery) = world.scenery(noun) {
            let message = scenery
                .cant_take_message
                .clone()
                .unwrap_or_else(|| FIXED_IN_PLACE.to_string());
            return Validity::blocked_with(message, item_param);
        }

        // Taking a container you are inside would fold the tree in on
        // itself; the world would reject the move, so refuse it here.
        let mut cursor = world.location_of(actor);
        while let Some(ancestor) = cursor {
            if ancestor == noun {
                return Validity::blocked_with(NOT_WHILE_INSIDE, item_param);
            }
            cursor = world.location_of(ancestor);
        }

        if let Some(capacity) = world.container(actor).and_then(|c| c.capacity) {
            let held = world
                .contents_of(actor)
                .into_iter()
                .filter(|&item| !world.wearable(item).is_some_and(|w| w.worn))
                .count();
            if held >= capacity {
                return Validity::blocked_with(CONTAINER_FULL, item_param);
            }
        }

        Validity::valid()
    }

    fn take_one(
        world: &mut World,
        actor: EntityId,
        noun: EntityId,
    ) -> Result<(Option<EntityId>, bool)> {
        let previous_location = world.location_of(noun);

        let mut was_worn = false;
        if let Some(wearable) = world.wearable_mut(noun) {
            if wearable.worn {
                wearable.worn = false;
                was_worn = true;
            }
        }

        world.move_entity(noun, actor)?;
        Ok((previous_location, was_worn))
    }

    fn report_one(
        world: &World,
        actor: EntityId,
        noun: EntityId,
        previous_location: Option<EntityId>,
        was_worn: bool,
        events: &mut Vec<SemanticEvent>,
    ) {
        let item_name = world.name_of(noun);

        if was_worn {
            events.push(SemanticEvent::new(EventKind::Removed {
                item: noun,
                item_name: item_name.clone(),
                implicit: true,
            }));
        }

        events.push(SemanticEvent::new(EventKind::Taken {
            item: noun,
            item_name: item_name.clone(),
            actor,
            previous_location,
        }));

        let from_holder = previous_location
            .filter(|&holder| Some(holder) != world.location_of(actor));
        let (message, mut params) = match from_holder {
            Some(holder) => (
                TAKEN_FROM,
                vec![("container".to_string(), world.name_of(holder))],
            ),
            None => (TAKEN, Vec::new()),
        };
        params.push(("item".to_string(), item_name));
        events.push(SemanticEvent::new(EventKind::ActionSuccess {
            action: Self::ID.to_string(),
            message: message.to_string(),
            params,
        }));
    }
}

impl Default for TakingAction {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for TakingAction {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn metadata(&self) -> &ActionMetadata {
        &self.metadata
    }

    fn validate(&self, world: &World, ctx: &mut ActionContext) -> Validity {
        if ctx.is_multi() {
            let items = expand(
                world,
                ctx.actor,
                &ctx.command,
                &ExpandOptions::scope(ExpandScope::Reachable),
            );
            if items.is_empty() {
                return Validity::blocked(NOTHING_TO_TAKE);
            }

            let outcomes: Vec<ItemOutcome> = items
                .iter()
                .map(|item| {
                    let error = match Self::validate_single(world, ctx.actor, item.entity) {
                        Validity::Valid => None,
                        Validity::Blocked { message, params } => Some((message, params)),
                    };
                    ItemOutcome {
                        entity: item.entity,
                        error,
                        previous_location: None,
                        was_worn: false,
                    }
                })
                .collect();

            // Valid when at least one item can be taken; report covers the
            // rest with per-item blocked events.
            let any_ok = outcomes.iter().any(ItemOutcome::ok);
            let first_error = outcomes.iter().find_map(|o| o.error.clone());
            ctx.scratch.multi = outcomes;
            if any_ok {
                return Validity::valid();
            }
            let (message, params) = first_error.unwrap_or((NOTHING_TO_TAKE.to_string(), vec![]));
            return Validity::Blocked { message, params };
        }

        let Some(noun) = ctx.direct_entity() else {
            return Validity::blocked(NO_TARGET);
        };
        Self::validate_single(world, ctx.actor, noun)
    }

    fn execute(&self, world: &mut World, ctx: &mut ActionContext) -> Result<()> {
        if !ctx.scratch.multi.is_empty() {
            let mut outcomes = std::mem::take(&mut ctx.scratch.multi);
            for outcome in outcomes.iter_mut().filter(|o| o.ok()) {
                let (previous, worn) = Self::take_one(world, ctx.actor, outcome.entity)?;
                outcome.previous_location = previous;
                outcome.was_worn = worn;
            }
            ctx.scratch.multi = outcomes;
            return Ok(());
        }

        let Some(noun) = ctx.direct_entity() else {
            return Ok(());
        };
        let (previous, worn) = Self::take_one(world, ctx.actor, noun)?;
        ctx.scratch.previous_location = previous;
        ctx.scratch.was_worn = worn;
        Ok(())
    }

    fn report(&self, world: &World, ctx: &ActionContext) -> Vec<SemanticEvent> {
        let mut events = Vec::new();

        if !ctx.scratch.multi.is_empty() {
            for outcome in &ctx.scratch.multi {
                match &outcome.error {
                    None => Self::report_one(
                        world,
                        ctx.actor,
                        outcome.entity,
                        outcome.previous_location,
                        outcome.was_worn,
                        &mut events,
                    ),
                    Some((message, params)) => {
                        events.push(SemanticEvent::new(EventKind::ActionBlocked {
                            action: Self::ID.to_string(),
                            message: message.clone(),
                            params: params.clone(),
                        }));
                    }
                }
            }
            return events;
        }

        if let Some(noun) = ctx.direct_entity() {
            Self::report_one(
                world,
                ctx.actor,
                noun,
                ctx.scratch.previous_location,
                ctx.scratch.was_worn,
                &mut events,
            );
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{InvocationState, ProtocolRunner};
    use brasslamp_resolve::{CommandValidator, NounPhrase, ParsedCommand};
    use brasslamp_world::{
        ContainerTrait, IdentityTrait, RoomTrait, SceneryTrait, Trait, WearableTrait,
    };

    struct Fixture {
        world: World,
        room: EntityId,
        player: EntityId,
    }

    fn fixture() -> Fixture {
        let mut world = World::new();
        let room = world.spawn([
            Trait::Room(RoomTrait::default()),
            Trait::Identity(IdentityTrait::new("parlor")),
        ]);
        let player = world.spawn([
            Trait::Actor,
            Trait::Container(ContainerTrait::default()),
            Trait::Identity(IdentityTrait::new("yourself")),
        ]);
        world.move_entity(player, room).unwrap();
        world.set_player(player).unwrap();
        Fixture {
            world,
            room,
            player,
        }
    }

    fn run_take(f: &mut Fixture, phrase: NounPhrase) -> crate::protocol::ProtocolOutcome {
        let mut registry = crate::action::ActionRegistry::new();
        registry.register(Box::new(TakingAction::new()));

        let mut validator = CommandValidator::new();
        let command = ParsedCommand::new("taking").with_direct(phrase);
        let validated = validator
            .validate(&f.world, &registry, f.player, &command)
            .unwrap();

        let action = registry.get("taking").unwrap();
        let mut ctx = ActionContext::new(f.player, validated);
        ProtocolRunner::run(action, &mut f.world, &mut ctx).unwrap()
    }

    #[test]
    fn take_moves_item_to_inventory() {
        let mut f = fixture();
        let lamp = f.world.spawn([Trait::Identity(IdentityTrait::new("lamp"))]);
        f.world.move_entity(lamp, f.room).unwrap();

        let outcome = run_take(&mut f, NounPhrase::new("lamp"));
        assert!(outcome.success);
        assert_eq!(outcome.state, InvocationState::Reported);
        assert_eq!(f.world.location_of(lamp), Some(f.player));
        assert!(matches!(
            outcome.events[0].kind,
            EventKind::Taken { item, .. } if item == lamp
        ));
    }

    #[test]
    fn take_from_container_names_the_source() {
        let mut f = fixture();
        let box_ = f.world.spawn([
            Trait::Container(ContainerTrait::default()),
            Trait::Identity(IdentityTrait::new("box")),
        ]);
        let coin = f.world.spawn([Trait::Identity(IdentityTrait::new("coin"))]);
        f.world.move_entity(box_, f.room).unwrap();
        f.world.move_entity(coin, box_).unwrap();

        let outcome = run_take(&mut f, NounPhrase::new("coin"));
        assert!(outcome.success);
        let success = outcome
            .events
            .iter()
            .find_map(|e| match &e.kind {
                EventKind::ActionSuccess { message, params, .. } => {
                    Some((message.clone(), params.clone()))
                }
                _ => None,
            })
            .unwrap();
        assert_eq!(success.0, TAKEN_FROM);
        assert!(success.1.iter().any(|(k, v)| k == "container" && v == "box"));
    }

    #[test]
    fn scenery_is_refused() {
        let mut f = fixture();
        let statue = f.world.spawn([
            Trait::Scenery(SceneryTrait::default()),
            Trait::Identity(IdentityTrait::new("statue")),
        ]);
        f.world.move_entity(statue, f.room).unwrap();

        let outcome = run_take(&mut f, NounPhrase::new("statue"));
        assert!(!outcome.success);
        assert_eq!(
            outcome.state,
            InvocationState::Blocked {
                message: FIXED_IN_PLACE.to_string()
            }
        );
        assert_eq!(f.world.location_of(statue), Some(f.room));
        // The refusal still produced an event
        assert!(matches!(
            outcome.events[0].kind,
            EventKind::ActionBlocked { .. }
        ));
    }

    #[test]
    fn capacity_limit_blocks() {
        let mut f = fixture();
        f.world
            .add_trait(
                f.player,
                Trait::Container(ContainerTrait { capacity: Some(1) }),
            )
            .unwrap();
        let coin = f.world.spawn([Trait::Identity(IdentityTrait::new("coin"))]);
        let lamp = f.world.spawn([Trait::Identity(IdentityTrait::new("lamp"))]);
        f.world.move_entity(coin, f.player).unwrap();
        f.world.move_entity(lamp, f.room).unwrap();

        let outcome = run_take(&mut f, NounPhrase::new("lamp"));
        assert!(!outcome.success);
        assert_eq!(
            outcome.state,
            InvocationState::Blocked {
                message: CONTAINER_FULL.to_string()
            }
        );
    }

    #[test]
    fn worn_item_is_implicitly_removed() {
        let mut f = fixture();
        let npc = f.world.spawn([
            Trait::Actor,
            Trait::Container(ContainerTrait::default()),
            Trait::Identity(IdentityTrait::new("scarecrow")),
        ]);
        let hat = f.world.spawn([
            Trait::Wearable(WearableTrait { worn: true }),
            Trait::Identity(IdentityTrait::new("hat")),
        ]);
        f.world.move_entity(npc, f.room).unwrap();
        f.world.move_entity(hat, npc).unwrap();

        let outcome = run_take(&mut f, NounPhrase::new("hat"));
        assert!(outcome.success);
        assert!(matches!(
            outcome.events[0].kind,
            EventKind::Removed { implicit: true, .. }
        ));
        assert!(!f.world.wearable(hat).unwrap().worn);
        assert_eq!(f.world.location_of(hat), Some(f.player));
    }

    #[test]
    fn take_all_skips_scenery_and_reports_each() {
        let mut f = fixture();
        let lamp = f.world.spawn([Trait::Identity(IdentityTrait::new("lamp"))]);
        let key = f.world.spawn([Trait::Identity(IdentityTrait::new("key"))]);
        let statue = f.world.spawn([
            Trait::Scenery(SceneryTrait::default()),
            Trait::Identity(IdentityTrait::new("statue")),
        ]);
        f.world.move_entity(lamp, f.room).unwrap();
        f.world.move_entity(key, f.room).unwrap();
        f.world.move_entity(statue, f.room).unwrap();

        let outcome = run_take(&mut f, NounPhrase::all(vec![]));
        assert!(outcome.success);
        assert_eq!(f.world.location_of(lamp), Some(f.player));
        assert_eq!(f.world.location_of(key), Some(f.player));
        assert_eq!(f.world.location_of(statue), Some(f.room));

        let taken: Vec<_> = outcome
            .events
            .iter()
            .filter(|e| matches!(e.kind, EventKind::Taken { .. }))
            .collect();
        assert_eq!(taken.len(), 2);
    }

    #[test]
    fn take_all_but_excludes_named() {
        let mut f = fixture();
        let lamp = f.world.spawn([Trait::Identity(IdentityTrait::new("lamp"))]);
        let sword = f.world.spawn([Trait::Identity(IdentityTrait::new("sword"))]);
        f.world.move_entity(lamp, f.room).unwrap();
        f.world.move_entity(sword, f.room).unwrap();

        let outcome = run_take(&mut f, NounPhrase::all(vec!["sword".to_string()]));
        assert!(outcome.success);
        assert_eq!(f.world.location_of(lamp), Some(f.player));
        assert_eq!(f.world.location_of(sword), Some(f.room));
    }

    #[test]
    fn take_all_with_nothing_portable_blocks() {
        let mut f = fixture();
        let outcome = run_take(&mut f, NounPhrase::all(vec![]));
        assert!(!outcome.success);
        assert_eq!(
            outcome.state,
            InvocationState::Blocked {
                message: NOTHING_TO_TAKE.to_string()
            }
        );
    }
}
