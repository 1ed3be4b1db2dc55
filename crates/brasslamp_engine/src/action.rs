//! The action protocol trait and registry.
//!
//! Actions implement validate/execute/report/blocked as a fixed capability
//! set; the runner never inspects an action's shape at runtime. `validate`
//! is a pure predicate over the world (it may write scratch data), `execute`
//! is the only phase that mutates, and `report`/`blocked` build events from
//! what the earlier phases established.

use std::collections::HashMap;

use brasslamp_foundation::{EntityId, Result};
use brasslamp_resolve::{ActionCatalog, ActionMetadata};
use brasslamp_world::World;

use crate::context::ActionContext;
use crate::event::{EventKind, SemanticEvent};

/// Result of an action's validate phase.
#[derive(Clone, Debug, PartialEq)]
pub enum Validity {
    /// The action may proceed to execute.
    Valid,
    /// The action is refused, with a message id and params for rendering.
    Blocked {
        /// Message id.
        message: String,
        /// Message parameters.
        params: Vec<(String, String)>,
    },
}

impl Validity {
    /// A passing validation.
    #[must_use]
    pub fn valid() -> Self {
        Validity::Valid
    }

    /// A refusal with a bare message id.
    #[must_use]
    pub fn blocked(message: impl Into<String>) -> Self {
        Validity::Blocked {
            message: message.into(),
            params: Vec::new(),
        }
    }

    /// A refusal with message parameters.
    #[must_use]
    pub fn blocked_with(
        message: impl Into<String>,
        params: Vec<(String, String)>,
    ) -> Self {
        Validity::Blocked {
            message: message.into(),
            params,
        }
    }

    /// Whether this is a pass.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Validity::Valid)
    }
}

/// A game action implementing the four-phase protocol.
pub trait Action {
    /// Stable action id, matching what the parser produces.
    fn id(&self) -> &'static str;

    /// Declared slot requirements and options.
    fn metadata(&self) -> &ActionMetadata;

    /// Pure check that the action can run. May record scratch data for the
    /// later phases but must not touch the world.
    fn validate(&self, world: &World, ctx: &mut ActionContext) -> Validity;

    /// Performs the world mutations. Runs only after a valid check.
    ///
    /// # Errors
    ///
    /// Only for genuinely exceptional conditions (stale references and the
    /// like); business refusals belong in `validate`.
    fn execute(&self, world: &mut World, ctx: &mut ActionContext) -> Result<()>;

    /// Builds success events from data established during validate/execute.
    fn report(&self, world: &World, ctx: &ActionContext) -> Vec<SemanticEvent>;

    /// Builds error events when validation refused the action.
    ///
    /// The default synthesizes a generic blocked event carrying the
    /// validation message.
    fn blocked(
        &self,
        world: &World,
        ctx: &ActionContext,
        validity: &Validity,
    ) -> Vec<SemanticEvent> {
        let (message, mut params) = match validity {
            Validity::Blocked { message, params } => (message.clone(), params.clone()),
            Validity::Valid => ("cannot_do_that".to_string(), Vec::new()),
        };
        if let Some(entity) = ctx.direct_entity() {
            if !params.iter().any(|(k, _)| k == "item") {
                params.push(("item".to_string(), world.name_of(entity)));
            }
        }
        vec![SemanticEvent::new(EventKind::ActionBlocked {
            action: self.id().to_string(),
            message,
            params,
        })]
    }

    /// Custom preconditions run at validation time, before the protocol.
    ///
    /// # Errors
    ///
    /// Returns the failure message id when the command should be rejected.
    fn preconditions(
        &self,
        world: &World,
        direct: Option<EntityId>,
        indirect: Option<EntityId>,
    ) -> std::result::Result<(), String> {
        let _ = (world, direct, indirect);
        Ok(())
    }
}

/// Registry of available actions, keyed by id.
#[derive(Default)]
pub struct ActionRegistry {
    actions: HashMap<&'static str, Box<dyn Action>>,
}

impl ActionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an action, replacing any previous one with the same id.
    pub fn register(&mut self, action: Box<dyn Action>) {
        self.actions.insert(action.id(), action);
    }

    /// Looks up an action by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&dyn Action> {
        self.actions.get(id).map(|action| &**action)
    }

    /// The registered action ids.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.actions.keys().copied()
    }
}

impl ActionCatalog for ActionRegistry {
    fn metadata(&self, action: &str) -> Option<&ActionMetadata> {
        self.actions.get(action).map(|a| a.metadata())
    }

    fn check_preconditions(
        &self,
        action: &str,
        world: &World,
        direct: Option<EntityId>,
        indirect: Option<EntityId>,
    ) -> std::result::Result<(), String> {
        match self.actions.get(action) {
            Some(a) => a.preconditions(world, direct, indirect),
            None => Ok(()),
        }
    }
}
