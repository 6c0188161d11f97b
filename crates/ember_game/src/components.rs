//! Components attached to simulation entities.
//!
//! All components are plain data owned by the store. Cross-entity fields
//! (a hand's held item, a tool's holding hand) are non-owning `Entity`
//! handles resolved by lookup each frame.

use crate::items::Item;
use crate::tools::ToolKind;
use ember_core::define_component;
use ember_core::ecs::Entity;
use ember_core::math::Vec2;

/// Screen position plus a pseudo-z depth.
///
/// `depth == 0` rests on the ground plane; `depth < 0` has fallen past the
/// furnace gate (below `REMOVAL_DEPTH` it is removed); `depth > 0` is
/// lifted off the surface by a hand.
#[derive(Debug, Clone, Copy)]
pub struct Position {
    pub position: Vec2,
    pub depth: f32,
}

impl Position {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            depth: 0.0,
        }
    }

    pub fn with_depth(position: Vec2, depth: f32) -> Self {
        Self { position, depth }
    }
}

/// Entities sinking past this depth are removed at end of frame.
pub const REMOVAL_DEPTH: f32 = -50.0;

#[derive(Debug, Clone, Copy)]
pub struct Velocity {
    pub velocity: Vec2,
    pub max_speed: f32,
}

impl Velocity {
    pub fn new(max_speed: f32) -> Self {
        Self {
            velocity: Vec2::ZERO,
            max_speed,
        }
    }
}

/// Force accumulator, zeroed each frame after integration.
#[derive(Debug, Clone, Copy)]
pub struct Force {
    pub accumulated: Vec2,
    pub mass: f32,
}

impl Force {
    pub fn new(mass: f32) -> Self {
        Self {
            accumulated: Vec2::ZERO,
            mass,
        }
    }
}

/// A pending kind change (growth) with its remaining time.
#[derive(Debug, Clone, Copy)]
pub struct Transform {
    pub into: Item,
    pub timer: f32,
}

/// Periodic self-copying (invasive growth).
#[derive(Debug, Clone, Copy)]
pub struct Spread {
    pub kind: Item,
    pub timer: f32,
}

/// An item instance on the table.
///
/// `spawner` marks dispenser fixtures: grabbing one manufactures a fresh
/// instance of the spawner kind instead of moving the dispenser itself.
#[derive(Debug, Clone, Copy)]
pub struct Object {
    pub kind: Item,
    pub radius: f32,
    pub is_held: bool,
    pub is_solid: bool,
    pub spawner: Option<Item>,
    pub transform: Option<Transform>,
    pub spread: Option<Spread>,
}

impl Object {
    pub fn new(kind: Item, radius: f32) -> Self {
        Self {
            kind,
            radius,
            is_held: false,
            is_solid: true,
            spawner: None,
            transform: None,
            spread: None,
        }
    }
}

/// An operable fixture (furnace crank, bellows, skylight, music box).
///
/// `idle_motion` supplies the small cyclic wobble applied to the rendered
/// position while the tool is unheld.
#[derive(Debug, Clone, Copy)]
pub struct Tool {
    pub kind: ToolKind,
    pub radius: f32,
    pub holding_hand: Option<Entity>,
    pub idle_motion: fn(f32) -> Vec2,
}

impl Tool {
    pub fn new(kind: ToolKind, radius: f32, idle_motion: fn(f32) -> Vec2) -> Self {
        Self {
            kind,
            radius,
            holding_hand: None,
            idle_motion,
        }
    }
}

/// One of the four player hands. Created at startup, never deleted.
///
/// At most one of `held_item`/`held_tool` is `Some` at a time.
#[derive(Debug, Clone, Copy)]
pub struct Hand {
    pub shoulder: Vec2,
    /// Where the hand returns to when it has nothing to do.
    pub rest: Vec2,
    pub target_position: Vec2,
    pub target_depth: f32,
    pub held_item: Option<Entity>,
    pub held_tool: Option<Entity>,
}

impl Hand {
    pub fn new(shoulder: Vec2, rest: Vec2, rest_depth: f32) -> Self {
        Self {
            shoulder,
            rest,
            target_position: rest,
            target_depth: rest_depth,
            held_item: None,
            held_tool: None,
        }
    }
}

/// Tag marking a roaming creature.
#[derive(Debug, Clone, Copy)]
pub struct Minion;

/// Render tag: enough for a renderer to select a sprite and frame.
#[derive(Debug, Clone, Copy)]
pub struct Sprite {
    pub key: SpriteKey,
    pub rotation: f32,
    pub frame: u32,
    pub layer: f32,
}

impl Sprite {
    pub fn new(key: SpriteKey, layer: f32) -> Self {
        Self {
            key,
            rotation: 0.0,
            frame: 0,
            layer,
        }
    }
}

/// Frame-stepped sprite animation descriptor.
#[derive(Debug, Clone, Copy)]
pub struct Animation {
    pub frames: u32,
    pub frame_time: f32,
    pub elapsed: f32,
    pub looped: bool,
}

/// Sprite sheet identifiers understood by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKey {
    Coal,
    CoalLarge,
    HandOpen,
    HandGrab,
    SoulSeed,
    SoulSapling,
    SoulPlant,
    RedSeed,
    RedSapling,
    RedPlant,
    GreenSeed,
    GreenSapling,
    GreenPlant,
    BlueSeed,
    BlueSapling,
    BluePlant,
    GoldPlant,
    MadPlant,
    Minion,
}

/// Draw-layer constants consumed by the renderer.
pub mod layers {
    pub const GROUND: f32 = 0.1;
    pub const OBJECTS: f32 = 0.5;
    pub const ABOVE_GROUND: f32 = 0.6;
    pub const HANDS: f32 = 0.8;
    pub const SHADOW: f32 = 0.9;
    pub const UI: f32 = 0.95;
}

define_component!(Position, 0, "Position");
define_component!(Velocity, 1, "Velocity");
define_component!(Force, 2, "Force");
define_component!(Object, 3, "Object");
define_component!(Tool, 4, "Tool");
define_component!(Hand, 5, "Hand");
define_component!(Minion, 6, "Minion");
define_component!(Sprite, 7, "Sprite");
define_component!(Animation, 8, "Animation");
