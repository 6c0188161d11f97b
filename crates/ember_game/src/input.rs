//! Pointer input snapshot consumed by the interaction controller.

use ember_core::math::Vec2;

/// Single-pointer, single-button state for one frame.
#[derive(Debug, Clone, Copy)]
pub struct Pointer {
    pub position: Vec2,
    pub pressed: bool,
}

impl Pointer {
    pub fn pressed_at(position: Vec2) -> Self {
        Self {
            position,
            pressed: true,
        }
    }

    pub fn released() -> Self {
        Self {
            position: Vec2::ZERO,
            pressed: false,
        }
    }
}

impl Default for Pointer {
    fn default() -> Self {
        Self::released()
    }
}
