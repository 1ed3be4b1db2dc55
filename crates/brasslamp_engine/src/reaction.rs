//! Per-entity event reactions.
//!
//! A reaction fires when a turn produces an event of a registered kind whose
//! subject is the registered entity; whatever events it returns are stamped
//! as sub-ordinal events under the triggering parent.

use brasslamp_foundation::EntityId;
use brasslamp_world::World;

use crate::event::SemanticEvent;

/// A reaction handler. Receives the world and the triggering event.
pub type ReactionFn = fn(&World, &SemanticEvent) -> Vec<SemanticEvent>;

struct Reaction {
    entity: EntityId,
    event_name: &'static str,
    handler: ReactionFn,
}

/// Registered reactions, dispatched during event post-processing.
#[derive(Default)]
pub struct ReactionRegistry {
    reactions: Vec<Reaction>,
}

impl ReactionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a reaction for an entity and event-type name.
    pub fn register(&mut self, entity: EntityId, event_name: &'static str, handler: ReactionFn) {
        self.reactions.push(Reaction {
            entity,
            event_name,
            handler,
        });
    }

    /// Number of registered reactions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reactions.len()
    }

    /// Whether no reactions are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reactions.is_empty()
    }

    /// Runs every reaction matching the event, in registration order.
    #[must_use]
    pub fn dispatch(&self, world: &World, event: &SemanticEvent) -> Vec<SemanticEvent> {
        let Some(subject) = event.kind.subject() else {
            return Vec::new();
        };
        self.reactions
            .iter()
            .filter(|r| r.entity == subject && r.event_name == event.kind.name())
            .flat_map(|r| (r.handler)(world, event))
            .collect()
    }
}
