//! Ember Core
//!
//! Contains the fundamental simulation systems:
//! - Entity store (generational handles, typed components, deferred deletion)
//! - Deterministic time and math

pub mod ecs;
pub mod math;
pub mod time;

pub use glam;

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
