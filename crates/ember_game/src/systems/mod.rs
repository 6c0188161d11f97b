//! Frame systems, listed in execution order.
//!
//! Each system is a free function over `(&mut World, &mut SimContext, dt)`
//! plus whatever extra input it needs. `GameRun::update` drives them in a
//! fixed order every frame; nothing here is re-entrant across frames.

pub mod animation;
pub mod boundary;
pub mod collision;
pub mod gravity;
pub mod hand;
pub mod hazard;
pub mod interaction;
pub mod lifecycle;
pub mod minion;
pub mod tool_motion;
pub mod velocity;
