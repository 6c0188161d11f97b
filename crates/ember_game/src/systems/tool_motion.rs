//! Tool fixture motion: idle wobble around the anchor, plus the short
//! gate and skylight shutter animations.

use ember_core::ecs::{ComponentSet, QueryMode, World};
use ember_core::math::move_toward;

use crate::components::{Position, Tool};
use crate::context::SimContext;
use crate::tools::{ToolKind, GATE_ANIM_DURATION};

pub fn update(world: &mut World, ctx: &mut SimContext, dt: f32) {
    let step = dt / GATE_ANIM_DURATION;
    let furnace_target = if ctx.tools.furnace_open() { 1.0 } else { 0.0 };
    ctx.furnace_open_anim = move_toward(ctx.furnace_open_anim, furnace_target, step);
    let skylight_target = if ctx.tools.skylight_open() { 1.0 } else { 0.0 };
    ctx.skylight_open_anim = move_toward(ctx.skylight_open_anim, skylight_target, step);

    let set = ComponentSet::new().with::<Tool>().with::<Position>();
    for entity in world.query(set, QueryMode::All) {
        let Ok(tool) = world.get::<Tool>(entity).copied() else {
            continue;
        };
        let anchor = anchor_of(ctx, tool.kind);
        let offset = if ctx.tools.get(tool.kind).is_bound() {
            ember_core::math::Vec2::ZERO
        } else {
            (tool.idle_motion)(ctx.elapsed)
        };
        if let Ok(pos) = world.get_mut::<Position>(entity) {
            pos.position = anchor + offset;
        }
    }
}

pub fn anchor_of(ctx: &SimContext, kind: ToolKind) -> ember_core::math::Vec2 {
    match kind {
        ToolKind::Furnace => ctx.stage.furnace_anchor,
        ToolKind::Bellows => ctx.stage.bellows_anchor,
        ToolKind::Skylight => ctx.stage.skylight_anchor,
        ToolKind::MusicBox => ctx.stage.music_box_anchor,
    }
}
