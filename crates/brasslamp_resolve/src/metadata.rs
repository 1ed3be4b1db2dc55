//! Action metadata: what an action declares about its object slots.
//!
//! The validator consults this through the [`ActionCatalog`] seam; the
//! execution layer's registry implements it.

use brasslamp_foundation::EntityId;
use brasslamp_world::{ScopeLevel, World};

use crate::scope::ScopeResolver;

/// The scope an action requires of an object slot.
///
/// The first three map onto the ordered [`ScopeLevel`]s; the hearing and
/// smell channels are checked by dedicated predicates rather than level
/// comparison.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScopeRequirement {
    /// Object must be held by the actor.
    Carried,
    /// Object must be physically reachable.
    Reachable,
    /// Object must be visible.
    Visible,
    /// Object must be audible.
    Audible,
    /// Object must be smellable.
    Detectable,
}

impl ScopeRequirement {
    /// Checks whether an entity meets this requirement for the observer.
    #[must_use]
    pub fn met_by(self, resolver: &ScopeResolver<'_>, observer: EntityId, entity: EntityId) -> bool {
        let scope = resolver.scope(observer, entity);
        match self {
            ScopeRequirement::Carried => scope == ScopeLevel::Carried,
            ScopeRequirement::Reachable => scope >= ScopeLevel::Reachable,
            ScopeRequirement::Visible => scope >= ScopeLevel::Visible,
            ScopeRequirement::Audible => resolver.can_hear(observer, entity),
            ScopeRequirement::Detectable => resolver.can_smell(observer, entity),
        }
    }

    /// Whether candidate gathering must sweep beyond name-indexed search.
    ///
    /// Hearing and smell span rooms, so name search over the observer's
    /// surroundings would miss distant sources.
    #[must_use]
    pub fn is_sense_channel(self) -> bool {
        matches!(
            self,
            ScopeRequirement::Audible | ScopeRequirement::Detectable
        )
    }
}

/// What an action declares about its shape and requirements.
#[derive(Clone, Debug)]
pub struct ActionMetadata {
    /// Whether a direct object is required.
    pub requires_direct_object: bool,
    /// Whether an indirect object is required.
    pub requires_indirect_object: bool,
    /// Scope required of the direct object.
    pub direct_object_scope: ScopeRequirement,
    /// Scope required of the indirect object.
    pub indirect_object_scope: ScopeRequirement,
    /// Whitelist of accepted prepositions, if the action takes one.
    pub valid_prepositions: Option<Vec<&'static str>>,
    /// The action needs its direct object in hand; the protocol runner may
    /// synthesize an implicit take for merely-reachable objects.
    pub needs_carried_direct: bool,
    /// Action-level opt-out for implicit takes.
    pub allow_implicit_take: bool,
}

impl Default for ActionMetadata {
    fn default() -> Self {
        Self {
            requires_direct_object: false,
            requires_indirect_object: false,
            direct_object_scope: ScopeRequirement::Visible,
            indirect_object_scope: ScopeRequirement::Visible,
            valid_prepositions: None,
            needs_carried_direct: false,
            allow_implicit_take: true,
        }
    }
}

impl ActionMetadata {
    /// Metadata for an action taking a direct object at the given scope.
    #[must_use]
    pub fn with_direct(scope: ScopeRequirement) -> Self {
        Self {
            requires_direct_object: true,
            direct_object_scope: scope,
            ..Self::default()
        }
    }

    /// Adds an indirect object requirement at the given scope.
    #[must_use]
    pub fn and_indirect(mut self, scope: ScopeRequirement) -> Self {
        self.requires_indirect_object = true;
        self.indirect_object_scope = scope;
        self
    }

    /// Restricts the accepted prepositions.
    #[must_use]
    pub fn with_prepositions(mut self, prepositions: Vec<&'static str>) -> Self {
        self.valid_prepositions = Some(prepositions);
        self
    }

    /// Declares that the direct object must end up in hand.
    #[must_use]
    pub fn carried_direct(mut self) -> Self {
        self.needs_carried_direct = true;
        self
    }

    /// Opts this action out of implicit takes.
    #[must_use]
    pub fn no_implicit_take(mut self) -> Self {
        self.allow_implicit_take = false;
        self
    }
}

/// Lookup seam between the validator and the action registry.
pub trait ActionCatalog {
    /// Returns the metadata for an action id, or `None` if unknown.
    fn metadata(&self, action: &str) -> Option<&ActionMetadata>;

    /// Runs action-declared custom preconditions against resolved slots.
    ///
    /// # Errors
    ///
    /// Returns the failure message id when a precondition rejects the
    /// command.
    fn check_preconditions(
        &self,
        action: &str,
        world: &World,
        direct: Option<EntityId>,
        indirect: Option<EntityId>,
    ) -> std::result::Result<(), String> {
        let _ = (action, world, direct, indirect);
        Ok(())
    }
}
