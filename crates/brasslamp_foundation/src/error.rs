//! Error types for exceptional conditions.
//!
//! Uses `thiserror` for ergonomic error definition. Only genuinely
//! exceptional conditions live here; command-validation failures are typed
//! values in the resolution layer and are never raised through this type.

use thiserror::Error;

use crate::entity::EntityId;

/// Result alias for Brasslamp operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Brasslamp operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind }
    }

    /// Creates an entity not found error.
    #[must_use]
    pub fn entity_not_found(id: EntityId) -> Self {
        Self::new(ErrorKind::EntityNotFound(id))
    }

    /// Creates a stale entity reference error.
    #[must_use]
    pub fn stale_entity(id: EntityId) -> Self {
        Self::new(ErrorKind::StaleEntity(id))
    }

    /// Creates a containment cycle error.
    #[must_use]
    pub fn containment_cycle(entity: EntityId, destination: EntityId) -> Self {
        Self::new(ErrorKind::ContainmentCycle {
            entity,
            destination,
        })
    }

    /// Creates a missing-player error.
    #[must_use]
    pub fn no_player() -> Self {
        Self::new(ErrorKind::NoPlayer)
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Entity was not found in storage.
    #[error("entity not found: {0:?}")]
    EntityNotFound(EntityId),

    /// Entity reference is stale (generation mismatch).
    #[error("stale entity reference: {0:?}")]
    StaleEntity(EntityId),

    /// A containment move would create a cycle.
    #[error("moving {entity:?} into {destination:?} would create a containment cycle")]
    ContainmentCycle {
        /// The entity being moved.
        entity: EntityId,
        /// The destination it was being moved into.
        destination: EntityId,
    },

    /// No player entity has been designated.
    #[error("no player entity designated")]
    NoPlayer,

    /// Action id is not registered.
    ///
    /// Raised only when an already-*validated* command names an action the
    /// registry no longer holds; an unknown action in a parsed command is a
    /// validation failure, not an error.
    #[error("action missing from registry: {0}")]
    ActionMissing(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}
