//! Multi-object expansion: "all", "all but X", and list commands.
//!
//! Expansion is best-effort by design: list items that match nothing are
//! silently dropped, and callers detect partial success by comparing the
//! result count to the request count.

use brasslamp_foundation::EntityId;
use brasslamp_world::{TraitTag, World};

use crate::noun_phrase::NounPhrase;
use crate::scope::ScopeResolver;
use crate::validator::ValidatedCommand;

/// Which candidate pool "all" draws from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExpandScope {
    /// The actor's inventory ("drop all").
    Carried,
    /// Everything reachable ("take all").
    Reachable,
    /// Everything visible ("examine all").
    Visible,
}

/// Options for an expansion.
pub struct ExpandOptions<'f> {
    /// The candidate pool.
    pub scope: ExpandScope,
    /// Additional caller filter on top of the default portability filter.
    pub filter: Option<&'f dyn Fn(&World, EntityId) -> bool>,
}

impl ExpandOptions<'_> {
    /// Options with just a scope and no extra filter.
    #[must_use]
    pub fn scope(scope: ExpandScope) -> Self {
        Self {
            scope,
            filter: None,
        }
    }
}

/// One expanded object with the phrase it came from, when there was one.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpandedObject {
    /// The entity.
    pub entity: EntityId,
    /// The source phrase: the slot's phrase for single objects, a
    /// synthesized one for list items, `None` for "all" expansion.
    pub phrase: Option<NounPhrase>,
}

/// Expands a validated command's direct-object slot into an entity list.
///
/// - A resolved single object passes through unchanged.
/// - "all" gathers the scope pool, applies the default portability filter
///   (no rooms, no scenery, no actors) plus any caller filter, and removes
///   entities named in the exclusion list.
/// - A list matches each item against the scope pool by exact name or alias.
#[must_use]
pub fn expand(
    world: &World,
    actor: EntityId,
    command: &ValidatedCommand,
    options: &ExpandOptions<'_>,
) -> Vec<ExpandedObject> {
    if let Some(resolved) = &command.direct_object {
        return vec![ExpandedObject {
            entity: resolved.entity,
            phrase: Some(resolved.phrase.clone()),
        }];
    }

    let Some(phrase) = &command.parsed.direct_object else {
        return Vec::new();
    };

    if phrase.is_all {
        expand_all(world, actor, phrase, options)
    } else if phrase.is_list {
        expand_list(world, actor, phrase, options)
    } else {
        Vec::new()
    }
}

fn pool(world: &World, actor: EntityId, scope: ExpandScope) -> Vec<EntityId> {
    let resolver = ScopeResolver::new(world);
    match scope {
        ExpandScope::Carried => world.contents_of(actor),
        ExpandScope::Reachable => resolver.reachable_entities(actor),
        ExpandScope::Visible => resolver.visible_entities(actor),
    }
}

fn portable(world: &World, entity: EntityId) -> bool {
    !world.has(entity, TraitTag::Room)
        && !world.has(entity, TraitTag::Scenery)
        && !world.has(entity, TraitTag::Actor)
}

fn named(world: &World, entity: EntityId, word: &str) -> bool {
    world.identity(entity).is_some_and(|identity| {
        identity.name.eq_ignore_ascii_case(word)
            || identity
                .aliases
                .iter()
                .any(|alias| alias.eq_ignore_ascii_case(word))
    })
}

fn expand_all(
    world: &World,
    actor: EntityId,
    phrase: &NounPhrase,
    options: &ExpandOptions<'_>,
) -> Vec<ExpandedObject> {
    pool(world, actor, options.scope)
        .into_iter()
        .filter(|&entity| portable(world, entity))
        .filter(|&entity| options.filter.is_none_or(|f| f(world, entity)))
        .filter(|&entity| {
            !phrase
                .exclusions
                .iter()
                .any(|word| named(world, entity, word))
        })
        .map(|entity| ExpandedObject {
            entity,
            phrase: None,
        })
        .collect()
}

fn expand_list(
    world: &World,
    actor: EntityId,
    phrase: &NounPhrase,
    options: &ExpandOptions<'_>,
) -> Vec<ExpandedObject> {
    let candidates = pool(world, actor, options.scope);
    let mut expanded = Vec::new();

    for item in &phrase.list_items {
        let found = candidates.iter().copied().find(|&entity| {
            named(world, entity, item)
                && options.filter.is_none_or(|f| f(world, entity))
        });
        // Unmatched items drop silently; callers compare counts.
        if let Some(entity) = found {
            expanded.push(ExpandedObject {
                entity,
                phrase: Some(NounPhrase::new(item.clone())),
            });
        }
    }

    expanded
}
