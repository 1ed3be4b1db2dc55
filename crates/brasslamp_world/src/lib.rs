//! World model for Brasslamp: entities, traits, and containment.
//!
//! This crate provides:
//! - [`EntityStore`] - Entity lifecycle with generational indices
//! - [`Trait`] - Closed union of typed traits, stored in a side table
//! - [`World`] - Containment tree, queries, scope overrides, snapshots
//!
//! The containment relation is a tree of parent links stored as entity ids;
//! cycle-forming moves are rejected at mutation time, so queries walk parent
//! chains without defensive depth bounds. `World` uses persistent collections
//! internally, making [`World::snapshot`] an O(1) structural-sharing clone.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod entity;
mod scope_level;
mod traits;
mod world;

pub use entity::EntityStore;
pub use scope_level::{ScopeLevel, ScopeOverride};
pub use traits::{
    ContainerTrait, DoorTrait, Gender, IdentityTrait, OpenableTrait, RoomTrait, SceneryTrait,
    SwitchableTrait, Trait, TraitTag, WearableTrait,
};
pub use world::{World, WorldConfig};
