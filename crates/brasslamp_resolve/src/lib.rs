//! Scope resolution and command validation for Brasslamp.
//!
//! This crate provides:
//! - [`ScopeResolver`] - Perception levels between an observer and targets
//! - [`CommandValidator`] - Noun phrases to concrete entities, with scored
//!   disambiguation and pronoun memory
//! - [`expand`] - Multi-object expansion for "all"/"all but"/list commands
//! - [`ActionMetadata`] / [`ActionCatalog`] - The seam through which the
//!   validator sees action declarations
//!
//! All validation failures are typed values ([`ValidationError`]); nothing
//! in this crate raises an error for a merely-unresolvable command.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod context;
mod metadata;
mod multi;
mod noun_phrase;
mod score;
mod scope;
mod trace;
mod validator;

pub use context::ResolutionContext;
pub use metadata::{ActionCatalog, ActionMetadata, ScopeRequirement};
pub use multi::{expand, ExpandOptions, ExpandScope, ExpandedObject};
pub use noun_phrase::{NounPhrase, ParsedCommand, Pronoun};
pub use score::{MatchReason, ScoredMatch};
pub use scope::{ScopeResolver, Sense};
pub use trace::{TraceBuffer, TraceRecord};
pub use validator::{
    Candidate, CommandValidator, ResolvedObject, SlotScope, ValidatedCommand,
    ValidationDiagnostics, ValidationError,
};
