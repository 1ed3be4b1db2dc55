//! The closed trait union.
//!
//! Traits are typed property bags attached to entities. The set of trait
//! kinds is a closed enum so every consumer matches exhaustively; there is no
//! string-keyed lookup and no runtime type checking.

use brasslamp_foundation::EntityId;
use serde::{Deserialize, Serialize};

/// A trait attached to an entity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Trait {
    /// Names, aliases, adjectives, and sensory properties.
    Identity(IdentityTrait),
    /// Marks a room: the root of a containment subtree.
    Room(RoomTrait),
    /// Entity can contain other entities.
    Container(ContainerTrait),
    /// Entity can be opened and closed.
    Openable(OpenableTrait),
    /// Entity can have other entities resting on it. Never blocks sight.
    Supporter,
    /// Fixed in place; excluded from "all" expansion and implicit takes.
    Scenery(SceneryTrait),
    /// An animate entity that can act and perceive.
    Actor,
    /// A connector between two rooms.
    Door(DoorTrait),
    /// Emits light when active.
    LightSource,
    /// Entity can be switched on and off.
    Switchable(SwitchableTrait),
    /// Entity can be worn.
    Wearable(WearableTrait),
    /// Entity can be eaten; edible things carry a scent.
    Edible,
}

impl Trait {
    /// Returns the tag discriminant for this trait.
    #[must_use]
    pub fn tag(&self) -> TraitTag {
        match self {
            Trait::Identity(_) => TraitTag::Identity,
            Trait::Room(_) => TraitTag::Room,
            Trait::Container(_) => TraitTag::Container,
            Trait::Openable(_) => TraitTag::Openable,
            Trait::Supporter => TraitTag::Supporter,
            Trait::Scenery(_) => TraitTag::Scenery,
            Trait::Actor => TraitTag::Actor,
            Trait::Door(_) => TraitTag::Door,
            Trait::LightSource => TraitTag::LightSource,
            Trait::Switchable(_) => TraitTag::Switchable,
            Trait::Wearable(_) => TraitTag::Wearable,
            Trait::Edible => TraitTag::Edible,
        }
    }
}

/// Discriminant for [`Trait`] variants, used as the side-table key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraitTag {
    /// See [`Trait::Identity`].
    Identity,
    /// See [`Trait::Room`].
    Room,
    /// See [`Trait::Container`].
    Container,
    /// See [`Trait::Openable`].
    Openable,
    /// See [`Trait::Supporter`].
    Supporter,
    /// See [`Trait::Scenery`].
    Scenery,
    /// See [`Trait::Actor`].
    Actor,
    /// See [`Trait::Door`].
    Door,
    /// See [`Trait::LightSource`].
    LightSource,
    /// See [`Trait::Switchable`].
    Switchable,
    /// See [`Trait::Wearable`].
    Wearable,
    /// See [`Trait::Edible`].
    Edible,
}

/// Grammatical gender, used for pronoun binding after resolution.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    /// Referred to as "it".
    #[default]
    Neuter,
    /// Referred to as "him".
    Male,
    /// Referred to as "her".
    Female,
    /// Plural-named; referred to as "them".
    Plural,
}

/// Names and sensory properties of an entity.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IdentityTrait {
    /// Display name and primary noun (e.g., "lamp").
    pub name: String,
    /// Alternative nouns that refer to this entity.
    pub aliases: Vec<String>,
    /// Adjectives used for disambiguation (e.g., "brass").
    pub adjectives: Vec<String>,
    /// Longer description shown on examination.
    pub description: Option<String>,
    /// Grammatical gender for pronoun binding.
    pub gender: Gender,
    /// Sound escapes closed containers.
    pub loud: bool,
    /// Has a scent.
    pub smelly: bool,
    /// Scent escapes closed containers.
    pub very_smelly: bool,
}

impl IdentityTrait {
    /// Creates an identity with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds an alias.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Adds an adjective.
    #[must_use]
    pub fn with_adjective(mut self, adjective: impl Into<String>) -> Self {
        self.adjectives.push(adjective.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the grammatical gender.
    #[must_use]
    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    /// Marks the entity as loud.
    #[must_use]
    pub fn loud(mut self) -> Self {
        self.loud = true;
        self
    }

    /// Marks the entity as having a scent.
    #[must_use]
    pub fn smelly(mut self) -> Self {
        self.smelly = true;
        self
    }

    /// Marks the entity's scent as strong enough to escape closed containers.
    #[must_use]
    pub fn very_smelly(mut self) -> Self {
        self.smelly = true;
        self.very_smelly = true;
        self
    }
}

/// Container properties.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerTrait {
    /// Maximum number of (unworn) items held, if limited.
    pub capacity: Option<usize>,
}

/// Room properties.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomTrait {
    /// A dark room requires the observer to carry an active light source.
    pub dark: bool,
}

/// Open/closed state for containers and doors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenableTrait {
    /// Whether currently open.
    pub open: bool,
}

/// Fixed-in-place marker with an optional custom refusal message id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneryTrait {
    /// Message id reported when a take is refused, if the story supplies one.
    pub cant_take_message: Option<String>,
}

/// A connector between two rooms.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorTrait {
    /// The two rooms this door connects.
    pub rooms: [EntityId; 2],
}

impl DoorTrait {
    /// Returns true if this door connects the given pair of rooms.
    #[must_use]
    pub fn connects(&self, a: EntityId, b: EntityId) -> bool {
        (self.rooms[0] == a && self.rooms[1] == b) || (self.rooms[0] == b && self.rooms[1] == a)
    }
}

/// On/off state for switchable entities.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchableTrait {
    /// Whether currently switched on.
    pub on: bool,
}

/// Worn state for wearable entities.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WearableTrait {
    /// Whether currently worn by the containing entity.
    pub worn: bool,
}
