//! Domain events.
//!
//! Events are a closed union: each kind carries exactly the data its
//! renderer needs. The phase is an explicit field declared by the producer,
//! not inferred from the event name.

use brasslamp_foundation::EntityId;
use brasslamp_resolve::Sense;
use serde::{Deserialize, Serialize};

/// Where in a turn an event belongs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventPhase {
    /// Before the main action effects.
    Pre,
    /// The action's own effects.
    #[default]
    Main,
    /// Follow-on effects after the action.
    Post,
    /// End-of-turn housekeeping.
    Cleanup,
}

/// Whether an object went inside or on top of its destination.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PutRelation {
    /// Into a container.
    In,
    /// Onto a supporter.
    On,
}

/// A domain event produced by action execution or validation failure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// An item was picked up.
    Taken {
        /// The item.
        item: EntityId,
        /// Its display name at the time.
        item_name: String,
        /// Who took it.
        actor: EntityId,
        /// Where it was before the move.
        previous_location: Option<EntityId>,
    },
    /// A worn item was removed (possibly implicitly, mid-take).
    Removed {
        /// The item.
        item: EntityId,
        /// Its display name.
        item_name: String,
        /// Whether the removal was synthesized rather than commanded.
        implicit: bool,
    },
    /// An item was put down.
    Dropped {
        /// The item.
        item: EntityId,
        /// Its display name.
        item_name: String,
        /// Who dropped it.
        actor: EntityId,
    },
    /// An item went into or onto something.
    Put {
        /// The item.
        item: EntityId,
        /// Its display name.
        item_name: String,
        /// The container or supporter.
        destination: EntityId,
        /// Its display name.
        destination_name: String,
        /// In or on.
        relation: PutRelation,
    },
    /// Something was examined.
    Examined {
        /// The target.
        target: EntityId,
        /// Its display name.
        target_name: String,
        /// The description to render.
        description: String,
    },
    /// Something was listened to.
    Heard {
        /// The target.
        target: EntityId,
        /// Its display name.
        target_name: String,
    },
    /// Something was smelled.
    Smelled {
        /// The target.
        target: EntityId,
        /// Its display name.
        target_name: String,
    },
    /// "(first taking the X)" - an implicit take is about to run.
    ImplicitTake {
        /// The item being taken.
        item: EntityId,
        /// Its display name.
        item_name: String,
    },
    /// An action completed; render the message id with the params.
    ActionSuccess {
        /// The action id.
        action: String,
        /// Message id for the renderer.
        message: String,
        /// Message parameters.
        params: Vec<(String, String)>,
    },
    /// An action was refused by a business rule; never thrown.
    ActionBlocked {
        /// The action id.
        action: String,
        /// Message id for the renderer.
        message: String,
        /// Message parameters.
        params: Vec<(String, String)>,
    },
    /// Command validation failed; one of these is always emitted so a turn
    /// is never silently swallowed.
    ValidationFailed {
        /// Stable error code.
        code: String,
        /// Human-readable detail.
        detail: String,
    },
    /// A collaborator failed exceptionally; minimal failure marker.
    CommandFailed {
        /// The raw input of the failed turn.
        input: String,
        /// What went wrong.
        reason: String,
    },
}

impl EventKind {
    /// Stable event-type name, as exposed to the text renderer.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::Taken { .. } => "taken",
            EventKind::Removed { .. } => "removed",
            EventKind::Dropped { .. } => "dropped",
            EventKind::Put { .. } => "put",
            EventKind::Examined { .. } => "examined",
            EventKind::Heard { .. } => "heard",
            EventKind::Smelled { .. } => "smelled",
            EventKind::ImplicitTake { .. } => "implicit_take",
            EventKind::ActionSuccess { .. } => "action.success",
            EventKind::ActionBlocked { .. } => "action.blocked",
            EventKind::ValidationFailed { .. } => "validation.failed",
            EventKind::CommandFailed { .. } => "command.failed",
        }
    }

    /// The entity this event is about, for reactions and witnesses.
    #[must_use]
    pub fn subject(&self) -> Option<EntityId> {
        match self {
            EventKind::Taken { item, .. }
            | EventKind::Removed { item, .. }
            | EventKind::Dropped { item, .. }
            | EventKind::Put { item, .. }
            | EventKind::ImplicitTake { item, .. } => Some(*item),
            EventKind::Examined { target, .. }
            | EventKind::Heard { target, .. }
            | EventKind::Smelled { target, .. } => Some(*target),
            _ => None,
        }
    }

    /// The acting entity, when the event records one.
    #[must_use]
    pub fn acting(&self) -> Option<EntityId> {
        match self {
            EventKind::Taken { actor, .. } | EventKind::Dropped { actor, .. } => Some(*actor),
            _ => None,
        }
    }
}

/// An event plus its producer-declared phase.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SemanticEvent {
    /// The event payload.
    pub kind: EventKind,
    /// The phase the producer declared.
    pub phase: EventPhase,
}

impl SemanticEvent {
    /// A main-phase event.
    #[must_use]
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            phase: EventPhase::Main,
        }
    }

    /// A pre-phase event.
    #[must_use]
    pub fn pre(kind: EventKind) -> Self {
        Self {
            kind,
            phase: EventPhase::Pre,
        }
    }

    /// A post-phase event.
    #[must_use]
    pub fn post(kind: EventKind) -> Self {
        Self {
            kind,
            phase: EventPhase::Post,
        }
    }

    /// A cleanup-phase event.
    #[must_use]
    pub fn cleanup(kind: EventKind) -> Self {
        Self {
            kind,
            phase: EventPhase::Cleanup,
        }
    }
}

/// An actor that perceived an event, and through which sense.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventWitness {
    /// The perceiving actor.
    pub actor: EntityId,
    /// The primary sense it perceived through.
    pub sense: Sense,
}

/// An event stamped with its deterministic position within a turn.
///
/// Within a turn, ordinals strictly increase in emission order; reaction
/// events share their parent's ordinal and carry a sub-ordinal. Sorting by
/// [`SequencedEvent::sort_key`] recovers emission order exactly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SequencedEvent {
    /// The event.
    pub event: SemanticEvent,
    /// The turn it belongs to.
    pub turn: u64,
    /// Position within the turn, starting at 1.
    pub ordinal: u32,
    /// Position under a parent ordinal, for nested/reaction events.
    pub sub_ordinal: Option<u32>,
    /// Actors that perceived the event.
    pub witnesses: Vec<EventWitness>,
}

impl SequencedEvent {
    /// Total-order key: `(turn, ordinal, sub_ordinal)`, parents before
    /// their sub-events.
    #[must_use]
    pub fn sort_key(&self) -> (u64, u32, u32) {
        (self.turn, self.ordinal, self.sub_ordinal.unwrap_or(0))
    }
}
