//! Per-invocation action context and scratch data.
//!
//! The scratch area is how data established during validate/execute reaches
//! the report phase; it lives exactly as long as one protocol invocation.

use brasslamp_foundation::EntityId;
use brasslamp_resolve::ValidatedCommand;

use crate::event::{PutRelation, SemanticEvent};

/// Outcome of one item in a multi-object command.
#[derive(Clone, Debug)]
pub struct ItemOutcome {
    /// The item.
    pub entity: EntityId,
    /// The blocking message id and params, if this item failed validation.
    pub error: Option<(String, Vec<(String, String)>)>,
    /// Where the item was before execution moved it.
    pub previous_location: Option<EntityId>,
    /// Whether a worn item was implicitly removed first.
    pub was_worn: bool,
}

impl ItemOutcome {
    /// Whether this item passed validation.
    #[must_use]
    pub fn ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Scratch data handed from validate/execute to report.
#[derive(Clone, Debug, Default)]
pub struct Scratch {
    /// Where the single direct object was before execution.
    pub previous_location: Option<EntityId>,
    /// Whether the single direct object was worn and implicitly removed.
    pub was_worn: bool,
    /// Per-item outcomes of a multi-object command.
    pub multi: Vec<ItemOutcome>,
    /// Events of a synthesized implicit take, spliced before the host
    /// action's own events.
    pub implicit_take_events: Vec<SemanticEvent>,
    /// In or on, decided from the preposition during validation.
    pub put_relation: Option<PutRelation>,
}

/// Everything an action phase sees besides the world.
#[derive(Clone, Debug)]
pub struct ActionContext {
    /// The acting entity.
    pub actor: EntityId,
    /// The validated command being carried out.
    pub command: ValidatedCommand,
    /// Per-invocation scratch area.
    pub scratch: Scratch,
}

impl ActionContext {
    /// Creates a context for one protocol invocation.
    #[must_use]
    pub fn new(actor: EntityId, command: ValidatedCommand) -> Self {
        Self {
            actor,
            command,
            scratch: Scratch::default(),
        }
    }

    /// The resolved direct object, if the slot resolved to one entity.
    #[must_use]
    pub fn direct_entity(&self) -> Option<EntityId> {
        self.command.direct_object.as_ref().map(|slot| slot.entity)
    }

    /// The resolved indirect object.
    #[must_use]
    pub fn indirect_entity(&self) -> Option<EntityId> {
        self.command.indirect_object.as_ref().map(|slot| slot.entity)
    }

    /// Whether the direct slot was an all/list phrase the action must
    /// expand itself.
    #[must_use]
    pub fn is_multi(&self) -> bool {
        self.command
            .parsed
            .direct_object
            .as_ref()
            .is_some_and(brasslamp_resolve::NounPhrase::is_multi)
    }
}
