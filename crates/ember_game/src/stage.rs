//! Playfield geometry derived from the viewport size.
//!
//! All placements reproduce the original table layout: a ground pit with
//! the furnace gate strip along its top edge, a growing box above it, tool
//! anchors on the side walls, seed dispensers down the right edge and the
//! four shoulder-anchored hands around the box.

use crate::items::Item;
use ember_core::math::{Rect, Vec2};
use rand::rngs::StdRng;
use rand::Rng;

/// Default viewport, matching the original window.
pub const VIEW_WIDTH: f32 = 620.0;
pub const VIEW_HEIGHT: f32 = 540.0;

/// Placement of one hand: rest position and shoulder anchor.
#[derive(Debug, Clone, Copy)]
pub struct HandSlot {
    pub position: Vec2,
    pub shoulder: Vec2,
}

#[derive(Debug, Clone)]
pub struct Stage {
    pub view: Vec2,
    /// The ground pit items are confined to.
    pub ground: Rect,
    /// The growing box where saplings are planted.
    pub growing_box: Rect,
    /// Top strip of the pit: items here fall through when the gate opens.
    pub gate_region: Rect,
    pub furnace_anchor: Vec2,
    pub bellows_anchor: Vec2,
    pub skylight_anchor: Vec2,
    pub music_box_anchor: Vec2,
    /// Seed dispensers along the right edge, top to bottom.
    pub dispensers: [(Item, Vec2); 4],
    pub hands: [HandSlot; 4],
}

impl Stage {
    pub fn new(view: Vec2) -> Self {
        let ground = Rect::new(
            (view.x - 448.0) / 2.0,
            (view.y - 400.0) / 2.0 + 36.0,
            448.0,
            400.0,
        );
        let growing_box = Rect::new((view.x - 96.0) / 2.0, 154.0 - 160.0 / 2.0, 96.0, 160.0);
        let gate_region = Rect::new(ground.min.x, ground.min.y, 448.0, 128.0);

        let box_center = growing_box.center();
        let hands = [
            HandSlot {
                position: box_center + Vec2::new(192.0, 32.0),
                shoulder: box_center + Vec2::new(16.0, -8.0),
            },
            HandSlot {
                position: box_center + Vec2::new(-192.0, 32.0),
                shoulder: box_center + Vec2::new(-16.0, -8.0),
            },
            HandSlot {
                position: box_center + Vec2::new(128.0, 128.0),
                shoulder: box_center + Vec2::new(12.0, 8.0),
            },
            HandSlot {
                position: box_center + Vec2::new(-128.0, 128.0),
                shoulder: box_center + Vec2::new(-12.0, 8.0),
            },
        ];

        Self {
            view,
            ground,
            growing_box,
            gate_region,
            furnace_anchor: Vec2::new(64.0, 160.0),
            bellows_anchor: Vec2::new(view.x - 64.0, 160.0),
            skylight_anchor: Vec2::new(view.x - 44.0, 256.0),
            music_box_anchor: Vec2::new(50.0, 304.0),
            dispensers: [
                (Item::GreenSeed, Vec2::new(view.x - 42.0, view.y - 206.0)),
                (Item::RedSeed, Vec2::new(view.x - 42.0, view.y - 154.0)),
                (Item::BlueSeed, Vec2::new(view.x - 42.0, view.y - 102.0)),
                (Item::SoulSeed, Vec2::new(view.x - 42.0, view.y - 52.0)),
            ],
            hands,
        }
    }

    /// Random coal-chute entrance along the bottom edge of the pit.
    pub fn random_chute_entrance(&self, rng: &mut StdRng) -> Vec2 {
        let x = if rng.gen_range(0..2) == 0 {
            self.ground.max.x - rng.gen::<f32>() * 176.0
        } else {
            self.ground.min.x + rng.gen::<f32>() * 176.0
        };
        Vec2::new(x, self.ground.max.y + 8.0 + rng.gen::<f32>() * 16.0)
    }

    /// Random minion entrance just outside a side wall, below the gate.
    pub fn random_side_entrance(&self, rng: &mut StdRng) -> Vec2 {
        let x = if rng.gen_range(0..2) == 0 {
            self.ground.max.x + 32.0
        } else {
            self.ground.min.x - 32.0
        };
        Vec2::new(x, self.gate_region.max.y + 4.0 + rng.gen::<f32>() * 64.0)
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new(Vec2::new(VIEW_WIDTH, VIEW_HEIGHT))
    }
}
