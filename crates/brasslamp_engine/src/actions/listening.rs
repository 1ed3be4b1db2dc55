//! Listening: attend to something audible, possibly in another room.

use brasslamp_foundation::Result;
use brasslamp_resolve::{ActionMetadata, ScopeRequirement};
use brasslamp_world::World;

use crate::action::{Action, Validity};
use crate::context::ActionContext;
use crate::event::{EventKind, SemanticEvent};

const NO_TARGET: &str = "no_target";
const HEARD: &str = "heard";

/// The listening action.
pub struct ListeningAction {
    metadata: ActionMetadata,
}

impl ListeningAction {
    /// The action id.
    pub const ID: &'static str = "listening";

    /// Creates the action.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: ActionMetadata::with_direct(ScopeRequirement::Audible),
        }
    }
}

impl Default for ListeningAction {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for ListeningAction {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn metadata(&self) -> &ActionMetadata {
        &self.metadata
    }

    fn validate(&self, _world: &World, ctx: &mut ActionContext) -> Validity {
        if ctx.direct_entity().is_none() {
            return Validity::blocked(NO_TARGET);
        }
        Validity::valid()
    }

    fn execute(&self, _world: &mut World, _ctx: &mut ActionContext) -> Result<()> {
        Ok(())
    }

    fn report(&self, world: &World, ctx: &ActionContext) -> Vec<SemanticEvent> {
        let Some(target) = ctx.direct_entity() else {
            return Vec::new();
        };
        let target_name = world.name_of(target);
        vec![
            SemanticEvent::new(EventKind::Heard {
                target,
                target_name: target_name.clone(),
            }),
            SemanticEvent::new(EventKind::ActionSuccess {
                action: Self::ID.to_string(),
                message: HEARD.to_string(),
                params: vec![("item".to_string(), target_name)],
            }),
        ]
    }
}
