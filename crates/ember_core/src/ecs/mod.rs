//! Entity store core types.
//!
//! The store owns all entities and their components. Handles are
//! generation-indexed so a reference held across a deletion can be
//! detected as stale instead of silently aliasing a reused slot.
//! Deletion is deferred: `delete` marks, `flush` (once per frame, after
//! all systems have run) removes. Systems iterating within a frame never
//! observe a partially-deleted entity.

mod component;
mod entity;
mod world;

pub use component::{Component, ComponentId, ComponentSet};
pub use entity::Entity;
pub use world::{QueryMode, World, WorldError};
