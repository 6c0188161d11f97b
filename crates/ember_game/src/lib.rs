//! Ember Game
//!
//! The furnace-room simulation: a four-handed boiler keeper moves falling
//! coal, seeds and plants between a feed chute, a growing box and the
//! furnace gate, while temperature and clutter race toward the end of the
//! run. This crate is the headless core: it consumes pointer state and a
//! time delta each frame and produces render/audio snapshots; windowing,
//! drawing and sound playback live elsewhere.

pub mod audio;
pub mod components;
pub mod context;
pub mod input;
pub mod items;
pub mod render;
pub mod run;
pub mod stage;
pub mod systems;
pub mod tools;

pub use context::{LossCause, RunEnd, SimContext};
pub use run::{GameRun, RunConfig};
