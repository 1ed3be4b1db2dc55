//! Observational resolution diagnostics.
//!
//! The validator records structured trace events as it works. They have no
//! effect on control flow; a renderer or debugger can drain them after a
//! turn.

use brasslamp_foundation::EntityId;

use crate::metadata::ScopeRequirement;

/// One diagnostic record from the validator.
#[derive(Clone, Debug, PartialEq)]
pub enum TraceRecord {
    /// Candidate gathering for a search term.
    EntitySearch {
        /// The head noun searched for.
        term: String,
        /// Exact-name matches.
        by_name: usize,
        /// Kind-word matches.
        by_kind: usize,
        /// Alias matches.
        by_alias: usize,
        /// Candidates after deduplication.
        total: usize,
    },
    /// Scope filtering of gathered candidates.
    ScopeCheck {
        /// The requirement being filtered against.
        requirement: ScopeRequirement,
        /// Candidates before filtering.
        candidates: usize,
        /// Candidates meeting the requirement.
        in_scope: usize,
    },
    /// Outcome of the disambiguation cascade.
    AmbiguityResolution {
        /// Which rule decided ("score_dominance", "modifier_superset",
        /// "only_reachable", "none").
        method: &'static str,
        /// The chosen entity, if one was picked.
        chosen: Option<EntityId>,
        /// Viable candidates at the time.
        remaining: usize,
    },
    /// A validation error was produced.
    ValidationFailure {
        /// Stable error code (see `ValidationError::code`).
        code: &'static str,
        /// The search text involved, if any.
        search: Option<String>,
    },
}

/// Accumulates trace records during validation.
#[derive(Clone, Debug, Default)]
pub struct TraceBuffer {
    records: Vec<TraceRecord>,
}

impl TraceBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record.
    pub fn record(&mut self, record: TraceRecord) {
        self.records.push(record);
    }

    /// The records accumulated so far.
    #[must_use]
    pub fn records(&self) -> &[TraceRecord] {
        &self.records
    }

    /// Takes the records, leaving the buffer empty.
    pub fn take(&mut self) -> Vec<TraceRecord> {
        std::mem::take(&mut self.records)
    }
}
