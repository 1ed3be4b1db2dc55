//! Brasslamp - Command-resolution and turn-execution core for an
//! interactive-fiction runtime.
//!
//! This crate re-exports all layers of the Brasslamp system for convenient
//! access. For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: brasslamp_engine     — Action protocol, sequencing, turns
//! Layer 2: brasslamp_resolve    — Scope, entity resolution, validation
//! Layer 1: brasslamp_world      — Traits, containment tree, snapshots
//! Layer 0: brasslamp_foundation — Core types (EntityId, Error)
//! ```

pub use brasslamp_engine as engine;
pub use brasslamp_foundation as foundation;
pub use brasslamp_resolve as resolve;
pub use brasslamp_world as world;
