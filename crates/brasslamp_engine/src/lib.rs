//! Action protocol, event sequencing, and turn orchestration for Brasslamp.
//!
//! This crate provides:
//! - [`Action`] / [`ActionRegistry`] - The four-phase action protocol
//!   (validate, execute, report, blocked) as a fixed capability set
//! - [`ProtocolRunner`] - Drives one invocation, synthesizing implicit
//!   takes for actions that need their object in hand
//! - [`EventSequencer`] / [`SubSequencer`] - Deterministic per-turn event
//!   ordering, owned by the orchestrator
//! - [`TurnEngine`] - Wires validation, the protocol, reaction dispatch,
//!   witness annotation, and sequencing into one turn

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod action;
pub mod actions;
mod context;
mod event;
mod protocol;
mod reaction;
mod sequencer;
mod turn;
mod witness;

pub use action::{Action, ActionRegistry, Validity};
pub use context::{ActionContext, ItemOutcome, Scratch};
pub use event::{
    EventKind, EventPhase, EventWitness, PutRelation, SemanticEvent, SequencedEvent,
};
pub use protocol::{InvocationState, ProtocolOutcome, ProtocolRunner};
pub use reaction::{ReactionFn, ReactionRegistry};
pub use sequencer::{EventSequencer, SubSequencer};
pub use turn::{TurnEngine, TurnRecord, TurnResult};
pub use witness::witnesses;
