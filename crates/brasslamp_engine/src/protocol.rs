//! The protocol runner: validate, execute, report, or blocked.
//!
//! One explicit state machine drives every invocation:
//! `validating -> valid -> executed -> reported`, or `validating -> blocked`.
//! Implicit takes are synthesized here, before the host action validates, so
//! an action that needs its object in hand sees it already carried.

use brasslamp_foundation::Result;
use brasslamp_resolve::{
    ActionMetadata, NounPhrase, ParsedCommand, ResolvedObject, ScopeResolver, SlotScope,
    ValidatedCommand, ValidationDiagnostics,
};
use brasslamp_world::{TraitTag, World};

use crate::action::{Action, Validity};
use crate::actions::taking::TakingAction;
use crate::context::ActionContext;
use crate::event::{EventKind, SemanticEvent};

/// Observable state of one action invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvocationState {
    /// Validation is in progress.
    Validating,
    /// Validation passed.
    Valid,
    /// Validation refused the action; terminal.
    Blocked {
        /// The refusal message id.
        message: String,
    },
    /// Mutations have been applied.
    Executed,
    /// Success events have been built; terminal.
    Reported,
}

/// What one protocol invocation produced.
#[derive(Clone, Debug)]
pub struct ProtocolOutcome {
    /// The terminal state reached.
    pub state: InvocationState,
    /// Events in emission order, implicit-take events first.
    pub events: Vec<SemanticEvent>,
    /// Whether the action went through execute/report.
    pub success: bool,
}

/// Drives actions through the four-phase protocol.
pub struct ProtocolRunner;

impl ProtocolRunner {
    /// Runs one action invocation to a terminal state.
    ///
    /// # Errors
    ///
    /// Propagates exceptional failures from the execute phase; business
    /// refusals come back as a blocked outcome, never as an error.
    pub fn run(
        action: &dyn Action,
        world: &mut World,
        ctx: &mut ActionContext,
    ) -> Result<ProtocolOutcome> {
        // Pre-step: an action that needs its direct object in hand may get
        // an implicit take for a merely-reachable object.
        if action.metadata().needs_carried_direct {
            if let Some(item) = ctx.direct_entity() {
                if let Some(refusal) =
                    Self::ensure_carried(world, ctx, item, action.metadata())?
                {
                    let message = match &refusal {
                        Validity::Blocked { message, .. } => message.clone(),
                        Validity::Valid => String::new(),
                    };
                    let mut events = std::mem::take(&mut ctx.scratch.implicit_take_events);
                    events.extend(action.blocked(world, ctx, &refusal));
                    return Ok(ProtocolOutcome {
                        state: InvocationState::Blocked { message },
                        events,
                        success: false,
                    });
                }
            }
        }

        match action.validate(world, ctx) {
            Validity::Blocked { message, params } => {
                let refusal = Validity::Blocked {
                    message: message.clone(),
                    params,
                };
                let mut events = std::mem::take(&mut ctx.scratch.implicit_take_events);
                events.extend(action.blocked(world, ctx, &refusal));
                Ok(ProtocolOutcome {
                    state: InvocationState::Blocked { message },
                    events,
                    success: false,
                })
            }
            Validity::Valid => {
                action.execute(world, ctx)?;
                let mut events = std::mem::take(&mut ctx.scratch.implicit_take_events);
                events.extend(action.report(world, ctx));
                Ok(ProtocolOutcome {
                    state: InvocationState::Reported,
                    events,
                    success: true,
                })
            }
        }
    }

    /// Makes sure `item` is carried, synthesizing a nested taking cycle when
    /// allowed. Returns `Some(refusal)` when the item cannot end up in hand.
    fn ensure_carried(
        world: &mut World,
        ctx: &mut ActionContext,
        item: brasslamp_foundation::EntityId,
        metadata: &ActionMetadata,
    ) -> Result<Option<Validity>> {
        let item_name = world.name_of(item);
        let (carried, reachable) = {
            let resolver = ScopeResolver::new(world);
            (
                resolver.is_carried(ctx.actor, item),
                resolver.can_reach(ctx.actor, item),
            )
        };
        if carried {
            return Ok(None);
        }
        if !reachable {
            return Ok(Some(Validity::blocked_with(
                "not_reachable",
                vec![("item".to_string(), item_name)],
            )));
        }

        // Fixed-in-place things are never implicitly taken.
        let fixed = world.has(item, TraitTag::Scenery)
            || world.has(item, TraitTag::Room)
            || world.has(item, TraitTag::Door);
        // Both opt-outs produce a plain "you aren't holding it".
        let disabled =
            !world.config().allow_implicit_takes || !metadata.allow_implicit_take;
        if fixed || disabled {
            return Ok(Some(Validity::blocked_with(
                "not_carried",
                vec![("item".to_string(), item_name)],
            )));
        }

        // One full nested validate/execute/report cycle of taking.
        let taking = TakingAction::new();
        let synthetic = Self::synthesize_take(world, ctx, item, &item_name);
        let mut take_ctx = ActionContext::new(ctx.actor, synthetic);

        match taking.validate(world, &mut take_ctx) {
            Validity::Blocked { message, params } => {
                Ok(Some(Validity::Blocked { message, params }))
            }
            Validity::Valid => {
                taking.execute(world, &mut take_ctx)?;
                let report = taking.report(world, &take_ctx);

                ctx.scratch
                    .implicit_take_events
                    .push(SemanticEvent::new(EventKind::ImplicitTake {
                        item,
                        item_name,
                    }));
                ctx.scratch.implicit_take_events.extend(report);
                Ok(None)
            }
        }
    }

    fn synthesize_take(
        world: &World,
        ctx: &ActionContext,
        item: brasslamp_foundation::EntityId,
        item_name: &str,
    ) -> ValidatedCommand {
        let resolver = ScopeResolver::new(world);
        let phrase = NounPhrase::new(item_name);
        ValidatedCommand {
            parsed: ParsedCommand::new("taking")
                .with_input(format!("take {item_name}"))
                .with_direct(phrase.clone()),
            action: "taking".to_string(),
            direct_object: Some(ResolvedObject {
                entity: item,
                phrase,
                scope: SlotScope {
                    level: resolver.scope(ctx.actor, item),
                    senses: resolver.senses(ctx.actor, item),
                },
            }),
            indirect_object: None,
            diagnostics: ValidationDiagnostics::default(),
        }
    }
}
