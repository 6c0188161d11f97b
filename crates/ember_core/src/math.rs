//! Deterministic math utilities
//!
//! Re-exports glam with additional 2D helpers used by the simulation.

pub use glam::*;

/// Axis-aligned rectangle in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width, y + height),
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x < self.max.x && point.y >= self.min.y && point.y < self.max.y
    }

    /// Clamp a point into the rectangle shrunk by `margin` on every side.
    pub fn clamp_inside(&self, point: Vec2, margin: f32) -> Vec2 {
        Vec2::new(
            point.x.clamp(self.min.x + margin, self.max.x - margin),
            point.y.clamp(self.min.y + margin, self.max.y - margin),
        )
    }
}

/// Move `value` toward `target` by at most `step`, without overshooting.
pub fn move_toward(value: f32, target: f32, step: f32) -> f32 {
    if value < target {
        (value + step).min(target)
    } else {
        (value - step).max(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_and_clamps() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert!(r.contains(Vec2::new(50.0, 40.0)));
        assert!(!r.contains(Vec2::new(5.0, 40.0)));
        assert_eq!(
            r.clamp_inside(Vec2::new(0.0, 0.0), 4.0),
            Vec2::new(14.0, 24.0)
        );
        assert_eq!(r.center(), Vec2::new(60.0, 45.0));
    }

    #[test]
    fn move_toward_never_overshoots() {
        assert_eq!(move_toward(0.0, 1.0, 10.0), 1.0);
        assert_eq!(move_toward(5.0, 1.0, 2.0), 3.0);
        assert_eq!(move_toward(1.0, 1.0, 2.0), 1.0);
    }
}
