//! Dropping: put down a held object, or everything held.

use brasslamp_foundation::{EntityId, Result};
use brasslamp_resolve::{
    expand, ActionMetadata, ExpandOptions, ExpandScope, ScopeRequirement,
};
use brasslamp_world::World;

use crate::action::{Action, Validity};
use crate::context::{ActionContext, ItemOutcome};
use crate::event::{EventKind, SemanticEvent};

const NO_TARGET: &str = "no_target";
const NOT_HELD: &str = "not_held";
const NOWHERE_TO_DROP: &str = "nowhere_to_drop";
const NOTHING_TO_DROP: &str = "nothing_to_drop";
const DROPPED: &str = "dropped";

/// The dropping action.
pub struct DroppingAction {
    metadata: ActionMetadata,
}

impl DroppingAction {
    /// The action id.
    pub const ID: &'static str = "dropping";

    /// Creates the action.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: ActionMetadata::with_direct(ScopeRequirement::Carried),
        }
    }

    fn validate_single(world: &World, actor: EntityId, noun: EntityId) -> Validity {
        if world.location_of(noun) != Some(actor) {
            return Validity::blocked_with(
                NOT_HELD,
                vec![("item".to_string(), world.name_of(noun))],
            );
        }
        if world.location_of(actor).is_none() {
            return Validity::blocked(NOWHERE_TO_DROP);
        }
        Validity::valid()
    }

    fn drop_one(world: &mut World, actor: EntityId, noun: EntityId) -> Result<bool> {
        let mut was_worn = false;
        if let Some(wearable) = world.wearable_mut(noun) {
            if wearable.worn {
                wearable.worn = false;
                was_worn = true;
            }
        }
        // validate_single established the actor has a location
        if let Some(destination) = world.location_of(actor) {
            world.move_entity(noun, destination)?;
        }
        Ok(was_worn)
    }

    fn report_one(
        world: &World,
        actor: EntityId,
        noun: EntityId,
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
        events.push(SemanticEvent::new(EventKind::Dropped {
            item: noun,
            item_name: item_name.clone(),
            actor,
        }));
        events.push(SemanticEvent::new(EventKind::ActionSuccess {
            action: Self::ID.to_string(),
            message: DROPPED.to_string(),
            params: vec![("item".to_string(), item_name)],
        }));
    }
}

impl Default for DroppingAction {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for DroppingAction {
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
                &ExpandOptions::scope(ExpandScope::Carried),
            );
            if items.is_empty() {
                return Validity::blocked(NOTHING_TO_DROP);
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
            let any_ok = outcomes.iter().any(ItemOutcome::ok);
            let first_error = outcomes.iter().find_map(|o| o.error.clone());
            ctx.scratch.multi = outcomes;
            if any_ok {
                return Validity::valid();
            }
            let (message, params) =
                first_error.unwrap_or((NOTHING_TO_DROP.to_string(), vec![]));
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
                outcome.was_worn = Self::drop_one(world, ctx.actor, outcome.entity)?;
            }
            ctx.scratch.multi = outcomes;
            return Ok(());
        }

        let Some(noun) = ctx.direct_entity() else {
            return Ok(());
        };
        ctx.scratch.was_worn = Self::drop_one(world, ctx.actor, noun)?;
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
            Self::report_one(world, ctx.actor, noun, ctx.scratch.was_worn, &mut events);
        }
        events
    }
}
