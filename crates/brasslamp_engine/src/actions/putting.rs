//! Putting: move a held object into a container or onto a supporter.
//!
//! The preposition decides the relation; the item must be in hand, so a
//! merely-reachable item triggers an implicit take.

use brasslamp_foundation::Result;
use brasslamp_resolve::{ActionMetadata, ScopeRequirement};
use brasslamp_world::{TraitTag, World};

use crate::action::{Action, Validity};
use crate::context::ActionContext;
use crate::event::{EventKind, PutRelation, SemanticEvent};

const NO_TARGET: &str = "no_target";
const NO_DESTINATION: &str = "no_destination";
const CANT_PUT_IN_ITSELF: &str = "cant_put_in_itself";
const NOT_A_CONTAINER: &str = "not_a_container";
const NOT_A_SUPPORTER: &str = "not_a_supporter";
const CONTAINER_CLOSED: &str = "container_closed";
const PUT_IN: &str = "put_in";
const PUT_ON: &str = "put_on";

const IN_WORDS: [&str; 3] = ["in", "into", "inside"];
const ON_WORDS: [&str; 2] = ["on", "onto"];

/// The putting action.
pub struct PuttingAction {
    metadata: ActionMetadata,
}

impl PuttingAction {
    /// The action id.
    pub const ID: &'static str = "putting";

    /// Creates the action.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: ActionMetadata::with_direct(ScopeRequirement::Reachable)
                .and_indirect(ScopeRequirement::Reachable)
                .with_prepositions(vec!["in", "into", "inside", "on", "onto"])
                .carried_direct(),
        }
    }

    fn relation(preposition: Option<&str>) -> Option<PutRelation> {
        let word = preposition?;
        if IN_WORDS.contains(&word) {
            Some(PutRelation::In)
        } else if ON_WORDS.contains(&word) {
            Some(PutRelation::On)
        } else {
            None
        }
    }
}

impl Default for PuttingAction {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for PuttingAction {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn metadata(&self) -> &ActionMetadata {
        &self.metadata
    }

    fn validate(&self, world: &World, ctx: &mut ActionContext) -> Validity {
        let Some(item) = ctx.direct_entity() else {
            return Validity::blocked(NO_TARGET);
        };
        let Some(destination) = ctx.indirect_entity() else {
            return Validity::blocked(NO_DESTINATION);
        };
        let item_param = vec![("item".to_string(), world.name_of(item))];

        if item == destination {
            return Validity::blocked_with(CANT_PUT_IN_ITSELF, item_param);
        }
        // Putting a box into something the box contains would fold the tree
        let mut cursor = world.location_of(destination);
        while let Some(ancestor) = cursor {
            if ancestor == item {
                return Validity::blocked_with(CANT_PUT_IN_ITSELF, item_param);
            }
            cursor = world.location_of(ancestor);
        }

        // The validator already checked the preposition whitelist
        let Some(relation) = Self::relation(ctx.command.parsed.preposition.as_deref()) else {
            return Validity::blocked(NO_DESTINATION);
        };
        match relation {
            PutRelation::In => {
                if !world.has(destination, TraitTag::Container) {
                    return Validity::blocked_with(
                        NOT_A_CONTAINER,
                        vec![("destination".to_string(), world.name_of(destination))],
                    );
                }
                if !world.is_open(destination) {
                    return Validity::blocked_with(
                        CONTAINER_CLOSED,
                        vec![("destination".to_string(), world.name_of(destination))],
                    );
                }
            }
            PutRelation::On => {
                if !world.has(destination, TraitTag::Supporter) {
                    return Validity::blocked_with(
                        NOT_A_SUPPORTER,
                        vec![("destination".to_string(), world.name_of(destination))],
                    );
                }
            }
        }

        ctx.scratch.put_relation = Some(relation);
        Validity::valid()
    }

    fn execute(&self, world: &mut World, ctx: &mut ActionContext) -> Result<()> {
        let (Some(item), Some(destination)) = (ctx.direct_entity(), ctx.indirect_entity())
        else {
            return Ok(());
        };
        ctx.scratch.previous_location = world.location_of(item);
        world.move_entity(item, destination)
    }

    fn report(&self, world: &World, ctx: &ActionContext) -> Vec<SemanticEvent> {
        let (Some(item), Some(destination)) = (ctx.direct_entity(), ctx.indirect_entity())
        else {
            return Vec::new();
        };
        let relation = ctx.scratch.put_relation.unwrap_or(PutRelation::In);
        let item_name = world.name_of(item);
        let destination_name = world.name_of(destination);

        vec![
            SemanticEvent::new(EventKind::Put {
                item,
                item_name: item_name.clone(),
                destination,
                destination_name: destination_name.clone(),
                relation,
            }),
            SemanticEvent::new(EventKind::ActionSuccess {
                action: Self::ID.to_string(),
                message: match relation {
                    PutRelation::In => PUT_IN.to_string(),
                    PutRelation::On => PUT_ON.to_string(),
                },
                params: vec![
                    ("item".to_string(), item_name),
                    ("destination".to_string(), destination_name),
                ],
            }),
        ]
    }
}
