//! Render snapshot: a flat, renderer-agnostic description of one frame.

use ember_core::ecs::{ComponentSet, QueryMode, World};
use ember_core::math::Vec2;

use crate::components::{Position, Sprite, SpriteKey, Tool};
use crate::context::SimContext;
use crate::items::Item;
use crate::tools::{ToolKind, ToolState};

#[derive(Debug, Clone, Copy)]
pub struct SpriteInstance {
    pub key: SpriteKey,
    pub position: Vec2,
    pub depth: f32,
    pub rotation: f32,
    pub frame: u32,
    pub layer: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct ToolView {
    pub kind: ToolKind,
    pub position: Vec2,
    pub state: ToolState,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone)]
pub struct RenderFrame {
    /// Sprites sorted back to front by layer, ties by screen y.
    pub sprites: Vec<SpriteInstance>,
    pub tools: Vec<ToolView>,
    /// Gate shutter openness, 0 closed to 1 open.
    pub furnace_open: f32,
    pub skylight_open: f32,
    pub flame_power: f32,
    pub orders: Vec<Item>,
    pub score: i32,
    pub clutter: usize,
}

pub fn build_frame(world: &World, ctx: &SimContext) -> RenderFrame {
    let drawable = ComponentSet::new().with::<Sprite>().with::<Position>();
    let mut sprites: Vec<SpriteInstance> = world
        .query(drawable, QueryMode::All)
        .into_iter()
        .filter_map(|e| {
            let sprite = world.get::<Sprite>(e).ok()?;
            let pos = world.get::<Position>(e).ok()?;
            Some(SpriteInstance {
                key: sprite.key,
                position: pos.position,
                depth: pos.depth,
                rotation: sprite.rotation,
                frame: sprite.frame,
                layer: sprite.layer,
            })
        })
        .collect();
    sprites.sort_by(|a, b| {
        a.layer
            .total_cmp(&b.layer)
            .then(a.position.y.total_cmp(&b.position.y))
    });

    let tool_set = ComponentSet::new().with::<Tool>().with::<Position>();
    let tools = world
        .query(tool_set, QueryMode::All)
        .into_iter()
        .filter_map(|e| {
            let tool = world.get::<Tool>(e).ok()?;
            let pos = world.get::<Position>(e).ok()?;
            Some(ToolView {
                kind: tool.kind,
                position: pos.position,
                state: ctx.tools.get(tool.kind),
            })
        })
        .collect();

    RenderFrame {
        sprites,
        tools,
        furnace_open: ctx.furnace_open_anim,
        skylight_open: ctx.skylight_open_anim,
        flame_power: ctx.flame_power,
        orders: ctx.order_queue.iter().copied().collect(),
        score: ctx.score(),
        clutter: ctx.object_count,
    }
}
