//! Witness annotation: which actors perceived each event.
//!
//! Part of event post-processing. For every event with a subject entity,
//! every other actor that can perceive the subject is recorded along with
//! its primary sense, so downstream knowledge systems can filter what each
//! actor learned this turn.

use brasslamp_resolve::{ScopeResolver, Sense};
use brasslamp_world::{TraitTag, World};

use crate::event::{EventWitness, SemanticEvent};

/// Computes the witnesses of an event.
///
/// The acting entity is excluded; it already knows what it did. Sight
/// outranks hearing outranks smell as the recorded sense.
#[must_use]
pub fn witnesses(world: &World, event: &SemanticEvent) -> Vec<EventWitness> {
    let Some(subject) = event.kind.subject() else {
        return Vec::new();
    };
    let acting = event.kind.acting();
    let resolver = ScopeResolver::new(world);

    world
        .entities()
        .filter(|&actor| world.has(actor, TraitTag::Actor))
        .filter(|&actor| actor != subject && Some(actor) != acting)
        .filter_map(|actor| {
            let sense = if resolver.can_see(actor, subject) {
                Sense::Sight
            } else if resolver.can_hear(actor, subject) {
                Sense::Hearing
            } else if resolver.can_smell(actor, subject) {
                Sense::Smell
            } else {
                return None;
            };
            Some(EventWitness { actor, sense })
        })
        .collect()
}
