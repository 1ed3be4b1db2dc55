//! Deterministic event sequencing.
//!
//! The sequencer is an explicitly constructed instance owned by the turn
//! orchestrator and reset at each turn start; there is no global counter.
//! Ordinals restart at 1 every turn and strictly increase in emission order.

use crate::event::{SemanticEvent, SequencedEvent};

/// Stamps events with `(turn, ordinal)` positions.
#[derive(Clone, Debug, Default)]
pub struct EventSequencer {
    turn: u64,
    next_ordinal: u32,
}

impl EventSequencer {
    /// Creates a sequencer positioned before any turn.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins a turn, restarting the ordinal counter at 1.
    pub fn start_turn(&mut self, turn: u64) {
        self.turn = turn;
        self.next_ordinal = 1;
    }

    /// The turn currently being sequenced.
    #[must_use]
    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// Stamps one event with the next ordinal.
    pub fn sequence(&mut self, event: SemanticEvent) -> SequencedEvent {
        let ordinal = self.next_ordinal;
        self.next_ordinal += 1;
        SequencedEvent {
            event,
            turn: self.turn,
            ordinal,
            sub_ordinal: None,
            witnesses: Vec::new(),
        }
    }

    /// Stamps a batch of events in order.
    pub fn sequence_all(&mut self, events: Vec<SemanticEvent>) -> Vec<SequencedEvent> {
        events.into_iter().map(|e| self.sequence(e)).collect()
    }
}

/// Stamps nested/reaction events under a parent ordinal.
///
/// Sub-events share the parent's ordinal and carry an incrementing
/// sub-ordinal, preserving total order under `(turn, ordinal, sub_ordinal)`.
#[derive(Clone, Debug)]
pub struct SubSequencer {
    turn: u64,
    parent_ordinal: u32,
    next_sub: u32,
}

impl SubSequencer {
    /// Creates a sub-sequencer for events nested under the given parent.
    #[must_use]
    pub fn for_parent(parent: &SequencedEvent) -> Self {
        Self {
            turn: parent.turn,
            parent_ordinal: parent.ordinal,
            next_sub: 1,
        }
    }

    /// Stamps one nested event.
    pub fn sequence(&mut self, event: SemanticEvent) -> SequencedEvent {
        let sub = self.next_sub;
        self.next_sub += 1;
        SequencedEvent {
            event,
            turn: self.turn,
            ordinal: self.parent_ordinal,
            sub_ordinal: Some(sub),
            witnesses: Vec::new(),
        }
    }
}
