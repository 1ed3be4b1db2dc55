//! Command validation: noun phrases to concrete entities.
//!
//! The validator maps each object slot of a parsed command to an entity at
//! the scope the action declares, via candidate gathering, scored matching,
//! and a disambiguation cascade. Failures are typed values; nothing here
//! throws for a merely-unresolvable command.

use std::time::{Duration, Instant};

use brasslamp_foundation::EntityId;
use brasslamp_world::{TraitTag, World};
use thiserror::Error;

use crate::context::ResolutionContext;
use crate::metadata::{ActionCatalog, ScopeRequirement};
use crate::noun_phrase::{NounPhrase, ParsedCommand};
use crate::score::{MatchReason, ScoredMatch};
use crate::scope::{ScopeResolver, Sense};
use crate::trace::{TraceBuffer, TraceRecord};

/// How many candidates an ambiguity error lists.
const MAX_AMBIGUOUS_CHOICES: usize = 5;

/// Score dominance ratio that settles ambiguity without asking.
const DOMINANCE_RATIO: f64 = 1.5;

/// A display candidate carried by an ambiguity error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    /// The candidate entity.
    pub entity: EntityId,
    /// Display name.
    pub name: String,
    /// Longer description, for disambiguation prompts.
    pub description: String,
}

/// A failed validation, with enough detail to render a response.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ValidationError {
    /// The action id is not registered.
    #[error("that's not something you can do")]
    ActionNotAvailable {
        /// The unresolvable action id.
        action: String,
    },
    /// No entity matched, or several did.
    ///
    /// An ambiguous match carries the viable candidates; a plain no-match
    /// carries `None`.
    #[error("you can't see any such thing")]
    EntityNotFound {
        /// The search text from the noun phrase.
        search: String,
        /// Present when the failure was ambiguity, not absence.
        ambiguous: Option<Vec<Candidate>>,
    },
    /// Resolved entity is not visible.
    #[error("you can't see {name}")]
    NotVisible {
        /// The referenced name.
        name: String,
    },
    /// Resolved entity is not reachable.
    #[error("you can't reach {name}")]
    NotReachable {
        /// The referenced name.
        name: String,
    },
    /// Resolved entity is not held.
    #[error("you aren't holding {name}")]
    NotCarried {
        /// The referenced name.
        name: String,
    },
    /// Resolved entity cannot be heard.
    #[error("you can't hear {name}")]
    NotAudible {
        /// The referenced name.
        name: String,
    },
    /// Resolved entity cannot be smelled.
    #[error("you can't smell {name}")]
    NotDetectable {
        /// The referenced name.
        name: String,
    },
    /// A declared precondition rejected the command.
    #[error("{message}")]
    PreconditionFailed {
        /// The failure message id.
        message: String,
    },
}

impl ValidationError {
    /// Stable machine-readable code for this error.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::ActionNotAvailable { .. } => "action_not_available",
            ValidationError::EntityNotFound { ambiguous: None, .. } => "entity_not_found",
            ValidationError::EntityNotFound { .. } => "ambiguous_entity",
            ValidationError::NotVisible { .. } => "entity_not_visible",
            ValidationError::NotReachable { .. } => "entity_not_reachable",
            ValidationError::NotCarried { .. } => "entity_not_carried",
            ValidationError::NotAudible { .. } => "entity_not_audible",
            ValidationError::NotDetectable { .. } => "entity_not_detectable",
            ValidationError::PreconditionFailed { .. } => "precondition_failed",
        }
    }
}

/// Scope metadata captured for a resolved slot.
#[derive(Clone, Debug, PartialEq)]
pub struct SlotScope {
    /// The level the entity sat at when resolved.
    pub level: brasslamp_world::ScopeLevel,
    /// The senses through which the actor perceives it.
    pub senses: Vec<Sense>,
}

/// An object slot resolved to a concrete entity.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedObject {
    /// The resolved entity.
    pub entity: EntityId,
    /// The noun phrase it came from.
    pub phrase: NounPhrase,
    /// Scope metadata at resolution time.
    pub scope: SlotScope,
}

/// Timing and advisory output of a validation pass.
#[derive(Clone, Debug, Default)]
pub struct ValidationDiagnostics {
    /// Wall-clock time the validation took.
    pub elapsed: Duration,
    /// Non-fatal observations (e.g., a pronoun that fell through).
    pub warnings: Vec<String>,
}

/// A fully resolved, unambiguous command, ready for the action protocol.
///
/// Immutable once constructed; afterwards it is retained only in turn
/// history.
#[derive(Clone, Debug)]
pub struct ValidatedCommand {
    /// The original parsed command (kept for multi-object expansion).
    pub parsed: ParsedCommand,
    /// The resolved action id.
    pub action: String,
    /// Resolved direct object. `None` for absent slots and for all/list
    /// phrases, which the action expands itself.
    pub direct_object: Option<ResolvedObject>,
    /// Resolved indirect object.
    pub indirect_object: Option<ResolvedObject>,
    /// Timing and warnings.
    pub diagnostics: ValidationDiagnostics,
}

/// Resolves noun phrases against the world and validates commands.
///
/// Owns the [`ResolutionContext`], which persists across turns until a
/// restart or restore resets it.
#[derive(Clone, Debug, Default)]
pub struct CommandValidator {
    context: ResolutionContext,
    trace: TraceBuffer,
}

impl CommandValidator {
    /// Creates a validator with an empty resolution context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The resolution context.
    #[must_use]
    pub fn context(&self) -> &ResolutionContext {
        &self.context
    }

    /// The resolution context, for orchestrator updates after multi-object
    /// commands.
    pub fn context_mut(&mut self) -> &mut ResolutionContext {
        &mut self.context
    }

    /// The diagnostic trace accumulated so far.
    #[must_use]
    pub fn trace(&self) -> &TraceBuffer {
        &self.trace
    }

    /// Drains the diagnostic trace.
    pub fn take_trace(&mut self) -> Vec<TraceRecord> {
        self.trace.take()
    }

    /// Resets the resolution context. Called on restart/restore.
    pub fn reset(&mut self) {
        self.context.reset();
    }

    /// Validates a parsed command against the world.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] describing the first failure: unknown
    /// action, unresolvable or ambiguous noun phrase, scope mismatch,
    /// rejected preposition, or failed precondition.
    pub fn validate(
        &mut self,
        world: &World,
        catalog: &dyn ActionCatalog,
        actor: EntityId,
        parsed: &ParsedCommand,
    ) -> Result<ValidatedCommand, ValidationError> {
        let started = Instant::now();
        let mut warnings = Vec::new();

        // 1. The action must exist.
        let Some(metadata) = catalog.metadata(&parsed.action) else {
            self.trace.record(TraceRecord::ValidationFailure {
                code: "action_not_available",
                search: None,
            });
            return Err(ValidationError::ActionNotAvailable {
                action: parsed.action.clone(),
            });
        };

        // 2. Resolve each present slot. All/list phrases stay unresolved;
        // the action expands them itself.
        let direct_object = match &parsed.direct_object {
            Some(phrase) if !phrase.is_multi() => Some(self.resolve_slot(
                world,
                actor,
                phrase,
                metadata.direct_object_scope,
                &mut warnings,
            )?),
            _ => None,
        };

        let indirect_object = match &parsed.indirect_object {
            Some(phrase) => Some(self.resolve_slot(
                world,
                actor,
                phrase,
                metadata.indirect_object_scope,
                &mut warnings,
            )?),
            None => None,
        };

        // 3. Re-check resolved entities against the declared requirement.
        // Resolution already filters, but pronoun referents skip gathering
        // and may have drifted out of scope since they were bound.
        let resolver = ScopeResolver::new(world);
        if let Some(slot) = &direct_object {
            Self::check_slot_scope(
                &resolver,
                actor,
                slot.entity,
                &slot.phrase.text,
                metadata.direct_object_scope,
            )?;
        }
        if let Some(slot) = &indirect_object {
            Self::check_slot_scope(
                &resolver,
                actor,
                slot.entity,
                &slot.phrase.text,
                metadata.indirect_object_scope,
            )?;
        }

        // 4. Preposition whitelist.
        if let Some(whitelist) = &metadata.valid_prepositions {
            let accepted = parsed
                .preposition
                .as_deref()
                .is_some_and(|p| whitelist.iter().any(|w| *w == p));
            if !accepted {
                return Err(ValidationError::PreconditionFailed {
                    message: "that doesn't make sense here".to_string(),
                });
            }
        }

        // 5. Action-declared custom preconditions.
        catalog
            .check_preconditions(
                &parsed.action,
                world,
                direct_object.as_ref().map(|s| s.entity),
                indirect_object.as_ref().map(|s| s.entity),
            )
            .map_err(|message| ValidationError::PreconditionFailed { message })?;

        // Every successful resolution updates the context.
        for slot in direct_object.iter().chain(indirect_object.iter()) {
            self.context.remember(world, slot.entity);
        }

        Ok(ValidatedCommand {
            parsed: parsed.clone(),
            action: parsed.action.clone(),
            direct_object,
            indirect_object,
            diagnostics: ValidationDiagnostics {
                elapsed: started.elapsed(),
                warnings,
            },
        })
    }

    fn resolve_slot(
        &mut self,
        world: &World,
        actor: EntityId,
        phrase: &NounPhrase,
        requirement: ScopeRequirement,
        warnings: &mut Vec<String>,
    ) -> Result<ResolvedObject, ValidationError> {
        let entity = self.resolve_entity(world, actor, phrase, requirement, warnings)?;
        let resolver = ScopeResolver::new(world);
        Ok(ResolvedObject {
            entity,
            phrase: phrase.clone(),
            scope: SlotScope {
                level: resolver.scope(actor, entity),
                senses: resolver.senses(actor, entity),
            },
        })
    }

    fn resolve_entity(
        &mut self,
        world: &World,
        actor: EntityId,
        phrase: &NounPhrase,
        requirement: ScopeRequirement,
        warnings: &mut Vec<String>,
    ) -> Result<EntityId, ValidationError> {
        // Pronouns resolve from context first; unresolved pronouns fall
        // through to literal-text search, which rarely matches anything.
        if let Some(pronoun) = phrase.pronoun {
            if let Some(referents) = self.context.resolve(pronoun) {
                if let Some(&entity) = referents.iter().find(|e| world.exists(**e)) {
                    return Ok(entity);
                }
            }
            warnings.push(format!("pronoun {pronoun:?} had no referent"));
        }

        let resolver = ScopeResolver::new(world);
        let head = phrase.head.to_lowercase();

        let candidates = if requirement.is_sense_channel() {
            self.gather_broad(world, actor, &head)
        } else {
            self.gather_indexed(world, actor, &head)
        };

        let in_scope: Vec<EntityId> = candidates
            .iter()
            .copied()
            .filter(|&entity| requirement.met_by(&resolver, actor, entity))
            .collect();
        self.trace.record(TraceRecord::ScopeCheck {
            requirement,
            candidates: candidates.len(),
            in_scope: in_scope.len(),
        });

        let mut matches: Vec<ScoredMatch> = in_scope
            .into_iter()
            .map(|entity| self.score_candidate(world, &resolver, actor, entity, &head, phrase))
            .filter(|m| m.score > 0)
            .collect();
        matches.sort_by(|a, b| b.score.cmp(&a.score).then(a.entity.cmp(&b.entity)));

        match matches.len() {
            0 => {
                self.trace.record(TraceRecord::ValidationFailure {
                    code: "entity_not_found",
                    search: Some(phrase.text.clone()),
                });
                Err(ValidationError::EntityNotFound {
                    search: phrase.text.clone(),
                    ambiguous: None,
                })
            }
            1 => Ok(matches[0].entity),
            _ => self.disambiguate(world, &resolver, actor, &matches, phrase),
        }
    }

    /// Candidate gathering by exact name, kind word, and alias, with an
    /// adjective fallback when nothing matched ("press yellow").
    fn gather_indexed(&mut self, world: &World, actor: EntityId, head: &str) -> Vec<EntityId> {
        let mut by_name = 0usize;
        let mut by_kind = 0usize;
        let mut by_alias = 0usize;
        let mut candidates: Vec<EntityId> = Vec::new();

        for entity in Self::searchable(world, actor) {
            let Some(identity) = world.identity(entity) else {
                continue;
            };
            let name_hit = identity.name.eq_ignore_ascii_case(head);
            let kind_hit = world.kind_of(entity) == head;
            let alias_hit = identity
                .aliases
                .iter()
                .any(|alias| alias.eq_ignore_ascii_case(head));

            if name_hit {
                by_name += 1;
            }
            if kind_hit {
                by_kind += 1;
            }
            if alias_hit {
                by_alias += 1;
            }
            if (name_hit || kind_hit || alias_hit) && !candidates.contains(&entity) {
                candidates.push(entity);
            }
        }

        if candidates.is_empty() {
            for entity in Self::searchable(world, actor) {
                let adjective_hit = world.identity(entity).is_some_and(|identity| {
                    identity
                        .adjectives
                        .iter()
                        .any(|adj| adj.eq_ignore_ascii_case(head))
                });
                if adjective_hit {
                    candidates.push(entity);
                }
            }
        }

        self.trace.record(TraceRecord::EntitySearch {
            term: head.to_string(),
            by_name,
            by_kind,
            by_alias,
            total: candidates.len(),
        });
        candidates
    }

    /// Broadened gathering for the hearing/smell channels: every non-room
    /// entity except the observer, since name-indexed search does not span
    /// distant rooms. Scope filtering prunes to what is perceivable.
    fn gather_broad(&mut self, world: &World, actor: EntityId, head: &str) -> Vec<EntityId> {
        let candidates: Vec<EntityId> = Self::searchable(world, actor)
            .filter(|&entity| {
                let Some(identity) = world.identity(entity) else {
                    return false;
                };
                identity.name.eq_ignore_ascii_case(head)
                    || world.kind_of(entity) == head
                    || identity
                        .aliases
                        .iter()
                        .any(|alias| alias.eq_ignore_ascii_case(head))
            })
            .collect();

        self.trace.record(TraceRecord::EntitySearch {
            term: head.to_string(),
            by_name: 0,
            by_kind: 0,
            by_alias: 0,
            total: candidates.len(),
        });
        candidates
    }

    fn searchable(world: &World, actor: EntityId) -> impl Iterator<Item = EntityId> + '_ {
        world
            .entities()
            .filter(move |&entity| entity != actor && !world.has(entity, TraitTag::Room))
    }

    fn score_candidate(
        &self,
        world: &World,
        resolver: &ScopeResolver<'_>,
        actor: EntityId,
        entity: EntityId,
        head: &str,
        phrase: &NounPhrase,
    ) -> ScoredMatch {
        let mut reasons = Vec::new();

        let name = world.name_of(entity);
        let kind = world.kind_of(entity);
        let (aliases, adjectives) = world.identity(entity).map_or_else(
            || (Vec::new(), Vec::new()),
            |identity| (identity.aliases.clone(), identity.adjectives.clone()),
        );

        if name.eq_ignore_ascii_case(head) {
            reasons.push(MatchReason::ExactName);
        } else if kind == head {
            reasons.push(MatchReason::KindMatch);
        } else if aliases.iter().any(|a| a.eq_ignore_ascii_case(head)) {
            reasons.push(MatchReason::AliasMatch);
        } else if adjectives.iter().any(|a| a.eq_ignore_ascii_case(head)) {
            reasons.push(MatchReason::AdjectiveMatch);
        }

        for modifier in &phrase.modifiers {
            if adjectives.iter().any(|a| a.eq_ignore_ascii_case(modifier)) {
                reasons.push(MatchReason::ModifierMatch(modifier.clone()));
            }
        }
        if phrase.modifiers.is_empty() && !adjectives.is_empty() {
            reasons.push(MatchReason::UnspecifiedAdjectives);
        }

        if resolver.can_see(actor, entity) {
            reasons.push(MatchReason::Visible);
        }
        if resolver.can_reach(actor, entity) {
            reasons.push(MatchReason::Reachable);
        }
        if world.location_of(entity) == Some(actor) {
            reasons.push(MatchReason::InInventory);
        }
        if self.context.last_interacted() == Some(entity) {
            reasons.push(MatchReason::Recency);
        }

        ScoredMatch::new(entity, reasons)
    }

    /// The disambiguation cascade: score dominance, unique modifier
    /// superset, unique visible-and-reachable, then an ambiguity error.
    fn disambiguate(
        &mut self,
        world: &World,
        resolver: &ScopeResolver<'_>,
        actor: EntityId,
        matches: &[ScoredMatch],
        phrase: &NounPhrase,
    ) -> Result<EntityId, ValidationError> {
        let top = &matches[0];
        let runner_up = &matches[1];
        if f64::from(top.score) >= f64::from(runner_up.score) * DOMINANCE_RATIO {
            self.trace.record(TraceRecord::AmbiguityResolution {
                method: "score_dominance",
                chosen: Some(top.entity),
                remaining: matches.len(),
            });
            return Ok(top.entity);
        }

        if !phrase.modifiers.is_empty() {
            let supersets: Vec<&ScoredMatch> = matches
                .iter()
                .filter(|m| {
                    let adjectives = world
                        .identity(m.entity)
                        .map(|identity| identity.adjectives.clone())
                        .unwrap_or_default();
                    phrase.modifiers.iter().all(|modifier| {
                        adjectives.iter().any(|a| a.eq_ignore_ascii_case(modifier))
                    })
                })
                .collect();
            if let [only] = supersets.as_slice() {
                self.trace.record(TraceRecord::AmbiguityResolution {
                    method: "modifier_superset",
                    chosen: Some(only.entity),
                    remaining: matches.len(),
                });
                return Ok(only.entity);
            }
        }

        let reachable: Vec<&ScoredMatch> = matches
            .iter()
            .filter(|m| resolver.can_see(actor, m.entity) && resolver.can_reach(actor, m.entity))
            .collect();
        if let [only] = reachable.as_slice() {
            self.trace.record(TraceRecord::AmbiguityResolution {
                method: "only_reachable",
                chosen: Some(only.entity),
                remaining: matches.len(),
            });
            return Ok(only.entity);
        }

        self.trace.record(TraceRecord::AmbiguityResolution {
            method: "none",
            chosen: None,
            remaining: matches.len(),
        });
        let choices = matches
            .iter()
            .take(MAX_AMBIGUOUS_CHOICES)
            .map(|m| Candidate {
                entity: m.entity,
                name: world.name_of(m.entity),
                description: world.description_of(m.entity),
            })
            .collect();
        Err(ValidationError::EntityNotFound {
            search: phrase.text.clone(),
            ambiguous: Some(choices),
        })
    }

    fn check_slot_scope(
        resolver: &ScopeResolver<'_>,
        actor: EntityId,
        entity: EntityId,
        name: &str,
        requirement: ScopeRequirement,
    ) -> Result<(), ValidationError> {
        if requirement.met_by(resolver, actor, entity) {
            return Ok(());
        }
        let name = name.to_string();
        Err(match requirement {
            ScopeRequirement::Carried => ValidationError::NotCarried { name },
            ScopeRequirement::Reachable => ValidationError::NotReachable { name },
            ScopeRequirement::Visible => ValidationError::NotVisible { name },
            ScopeRequirement::Audible => ValidationError::NotAudible { name },
            ScopeRequirement::Detectable => ValidationError::NotDetectable { name },
        })
    }
}
