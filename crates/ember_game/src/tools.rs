//! Tool kinds and the explicit tool-state model.
//!
//! Tool state is mutated only by the interaction controller and read by
//! physics and lifecycle systems; the furnace gate and the skylight are
//! open exactly while their crank is `Active`.

use ember_core::math::Vec2;
use std::f32::consts::TAU;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Furnace,
    Bellows,
    Skylight,
    MusicBox,
}

/// Tri-state replacing the original's inferred boolean flags.
///
/// `Held`: a hand is bound and flying toward the crank. `Active`: the
/// bound hand has arrived and is operating the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolState {
    #[default]
    Idle,
    Held,
    Active,
}

impl ToolState {
    pub fn is_active(self) -> bool {
        matches!(self, ToolState::Active)
    }

    pub fn is_bound(self) -> bool {
        !matches!(self, ToolState::Idle)
    }
}

/// Read-model of all four tool states.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToolSet {
    pub furnace: ToolState,
    pub bellows: ToolState,
    pub skylight: ToolState,
    pub music_box: ToolState,
}

impl ToolSet {
    pub fn get(&self, kind: ToolKind) -> ToolState {
        match kind {
            ToolKind::Furnace => self.furnace,
            ToolKind::Bellows => self.bellows,
            ToolKind::Skylight => self.skylight,
            ToolKind::MusicBox => self.music_box,
        }
    }

    pub fn set(&mut self, kind: ToolKind, state: ToolState) {
        match kind {
            ToolKind::Furnace => self.furnace = state,
            ToolKind::Bellows => self.bellows = state,
            ToolKind::Skylight => self.skylight = state,
            ToolKind::MusicBox => self.music_box = state,
        }
    }

    /// The furnace gate is open while the crank is being worked.
    pub fn furnace_open(&self) -> bool {
        self.furnace.is_active()
    }

    pub fn skylight_open(&self) -> bool {
        self.skylight.is_active()
    }
}

/// Gate and skylight open/close animation length in seconds.
pub const GATE_ANIM_DURATION: f32 = 0.075;

// Idle wobble closures, one per tool, with the original periods and
// amplitudes.

pub fn furnace_idle(t: f32) -> Vec2 {
    let p = t % 1.0;
    Vec2::new((p * TAU).cos() * 8.0, (p * TAU).sin() * 32.0)
}

pub fn bellows_idle(t: f32) -> Vec2 {
    let p = (t % 1.5) / 1.5;
    Vec2::new((p * TAU).cos() * 8.0, (p * TAU).sin() * 32.0)
}

pub fn skylight_idle(_t: f32) -> Vec2 {
    Vec2::ZERO
}

pub fn music_box_idle(t: f32) -> Vec2 {
    let p = (t % 2.0) / 2.0;
    Vec2::new((p * TAU).cos() * 16.0, (p * TAU).sin() * 16.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_follows_furnace_state() {
        let mut tools = ToolSet::default();
        assert!(!tools.furnace_open());
        tools.set(ToolKind::Furnace, ToolState::Held);
        assert!(!tools.furnace_open());
        tools.set(ToolKind::Furnace, ToolState::Active);
        assert!(tools.furnace_open());
    }

    #[test]
    fn idle_motions_are_periodic() {
        let a = music_box_idle(0.25);
        let b = music_box_idle(2.25);
        assert!((a - b).length() < 1e-3);
        assert_eq!(skylight_idle(1.7), Vec2::ZERO);
    }
}
