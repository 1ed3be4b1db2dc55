//! Turn orchestration.
//!
//! One turn: validate the parsed command, run the action protocol,
//! post-process events (reaction dispatch, witness annotation), and
//! sequence. Turns are strictly serialized through `&mut self`; there is no
//! mid-turn cancellation, and a collaborator failure leaves the world in
//! whatever partial state execution reached — the snapshot facility is the
//! only rollback.

use brasslamp_foundation::{EntityId, Error, Result};
use brasslamp_resolve::{CommandValidator, ParsedCommand, TraceRecord, ValidatedCommand};
use brasslamp_world::World;

use crate::action::ActionRegistry;
use crate::actions;
use crate::context::ActionContext;
use crate::event::{EventKind, SemanticEvent, SequencedEvent};
use crate::protocol::{InvocationState, ProtocolRunner};
use crate::reaction::ReactionRegistry;
use crate::sequencer::{EventSequencer, SubSequencer};
use crate::witness;

/// The outcome of one turn, with its ordered event stream.
#[derive(Clone, Debug)]
pub struct TurnResult {
    /// The turn number.
    pub turn: u64,
    /// The raw input that started the turn.
    pub input: String,
    /// Whether the command executed successfully.
    pub success: bool,
    /// Every event of the turn, in deterministic order. Never empty for a
    /// validation or business failure.
    pub events: Vec<SequencedEvent>,
    /// The failure message, when the turn did not succeed.
    pub error: Option<String>,
    /// The action that ran (or was attempted).
    pub action: Option<String>,
}

/// One retained history entry per completed turn.
#[derive(Clone, Debug)]
pub struct TurnRecord {
    /// The turn number.
    pub turn: u64,
    /// The raw input.
    pub input: String,
    /// The validated command, when validation succeeded.
    pub command: Option<ValidatedCommand>,
    /// Whether the turn succeeded.
    pub success: bool,
}

/// Owns the world and every per-session service, and runs turns against
/// them.
pub struct TurnEngine {
    world: World,
    validator: CommandValidator,
    registry: ActionRegistry,
    reactions: ReactionRegistry,
    sequencer: EventSequencer,
    turn: u64,
    history: Vec<TurnRecord>,
}

impl TurnEngine {
    /// Creates an engine over a world, with the standard actions registered.
    #[must_use]
    pub fn new(world: World) -> Self {
        let mut registry = ActionRegistry::new();
        actions::register_standard(&mut registry);
        Self {
            world,
            validator: CommandValidator::new(),
            registry,
            reactions: ReactionRegistry::new(),
            sequencer: EventSequencer::new(),
            turn: 0,
            history: Vec::new(),
        }
    }

    /// The world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The world, for setup mutations between turns.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The action registry, for registering story actions.
    pub fn registry_mut(&mut self) -> &mut ActionRegistry {
        &mut self.registry
    }

    /// The reaction registry, for registering story reactions.
    pub fn reactions_mut(&mut self) -> &mut ReactionRegistry {
        &mut self.reactions
    }

    /// The turn counter.
    #[must_use]
    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// Completed-turn history, oldest first.
    #[must_use]
    pub fn history(&self) -> &[TurnRecord] {
        &self.history
    }

    /// Drains validator diagnostics accumulated so far.
    pub fn take_trace(&mut self) -> Vec<TraceRecord> {
        self.validator.take_trace()
    }

    /// Captures a world snapshot for the undo facility.
    #[must_use]
    pub fn snapshot(&self) -> World {
        self.world.snapshot()
    }

    /// Restores a snapshot and resets the resolution context, as a restore
    /// crosses the boundary pronouns were bound in.
    pub fn restore(&mut self, snapshot: World) {
        self.world.restore(snapshot);
        self.validator.reset();
    }

    /// Executes one turn. The turn counter advances no matter what; even an
    /// exceptional collaborator failure produces a result with one event.
    pub fn execute_turn(&mut self, parsed: &ParsedCommand) -> TurnResult {
        self.turn += 1;
        self.sequencer.start_turn(self.turn);

        let (result, command) = match self.run_turn(parsed) {
            Ok((result, command)) => (result, command),
            Err(error) => (self.failure_result(parsed, &error), None),
        };

        self.history.push(TurnRecord {
            turn: result.turn,
            input: result.input.clone(),
            command,
            success: result.success,
        });
        result
    }

    fn run_turn(
        &mut self,
        parsed: &ParsedCommand,
    ) -> Result<(TurnResult, Option<ValidatedCommand>)> {
        let actor = self.world.require_player()?;

        let validated =
            match self
                .validator
                .validate(&self.world, &self.registry, actor, parsed)
            {
                Ok(validated) => validated,
                Err(error) => {
                    // A validation failure still yields an event; the turn
                    // is never silently swallowed.
                    let event = self.sequencer.sequence(SemanticEvent::new(
                        EventKind::ValidationFailed {
                            code: error.code().to_string(),
                            detail: error.to_string(),
                        },
                    ));
                    return Ok((
                        TurnResult {
                            turn: self.turn,
                            input: parsed.raw_input.clone(),
                            success: false,
                            events: vec![event],
                            error: Some(error.to_string()),
                            action: Some(parsed.action.clone()),
                        },
                        None,
                    ));
                }
            };

        let action = self
            .registry
            .get(&validated.action)
            .ok_or_else(|| Error::new(brasslamp_foundation::ErrorKind::ActionMissing(
                validated.action.clone(),
            )))?;

        let mut ctx = ActionContext::new(actor, validated);
        let outcome = ProtocolRunner::run(action, &mut self.world, &mut ctx)?;

        // Multi-object commands bind "them" to what actually moved.
        let moved: Vec<EntityId> = ctx
            .scratch
            .multi
            .iter()
            .filter(|o| o.ok())
            .map(|o| o.entity)
            .collect();
        if !moved.is_empty() {
            self.validator.context_mut().remember_all(&moved);
        }

        let events = self.post_process(outcome.events);
        let error = match &outcome.state {
            InvocationState::Blocked { message } => Some(message.clone()),
            _ => None,
        };

        let result = TurnResult {
            turn: self.turn,
            input: ctx.command.parsed.raw_input.clone(),
            success: outcome.success,
            events,
            error,
            action: Some(ctx.command.action.clone()),
        };
        Ok((result, Some(ctx.command)))
    }

    /// Sequences raw events and splices in reaction events under their
    /// parent ordinals, annotating everything with witnesses.
    fn post_process(&mut self, raw: Vec<SemanticEvent>) -> Vec<SequencedEvent> {
        let mut events = Vec::new();
        for event in raw {
            let reactions = self.reactions.dispatch(&self.world, &event);

            let mut sequenced = self.sequencer.sequence(event);
            sequenced.witnesses = witness::witnesses(&self.world, &sequenced.event);
            let mut sub = SubSequencer::for_parent(&sequenced);
            events.push(sequenced);

            for reaction in reactions {
                let mut nested = sub.sequence(reaction);
                nested.witnesses = witness::witnesses(&self.world, &nested.event);
                events.push(nested);
            }
        }
        events
    }

    fn failure_result(&mut self, parsed: &ParsedCommand, error: &Error) -> TurnResult {
        let event = self
            .sequencer
            .sequence(SemanticEvent::new(EventKind::CommandFailed {
                input: parsed.raw_input.clone(),
                reason: error.to_string(),
            }));
        TurnResult {
            turn: self.turn,
            input: parsed.raw_input.clone(),
            success: false,
            events: vec![event],
            error: Some(error.to_string()),
            action: None,
        }
    }
}
