//! Depth motion: dropped objects settle back onto the ground plane, and
//! objects over the open furnace gate sink through it.

use ember_core::ecs::{ComponentSet, QueryMode, World};
use ember_core::math::move_toward;

use crate::audio::Cue;
use crate::components::{Object, Position};
use crate::context::SimContext;

/// How fast an object sinks through the open gate, depth units per second.
const SINK_RATE: f32 = 120.0;
/// How fast a dropped object falls back onto the surface.
const SETTLE_RATE: f32 = 180.0;

pub fn update(world: &mut World, ctx: &mut SimContext, dt: f32) {
    let set = ComponentSet::new().with::<Object>().with::<Position>();
    for entity in world.query(set, QueryMode::All) {
        let Ok(object) = world.get::<Object>(entity).copied() else {
            continue;
        };
        if object.is_held || object.spawner.is_some() {
            continue;
        }
        let Ok(pos) = world.get::<Position>(entity).copied() else {
            continue;
        };

        // The growing box overlaps the gate strip but sits above it;
        // nothing planted there falls through.
        let over_gate = ctx.stage.gate_region.contains(pos.position)
            && !ctx.stage.growing_box.contains(pos.position);
        let mut depth = pos.depth;

        if depth > 0.0 {
            depth = move_toward(depth, 0.0, SETTLE_RATE * dt);
            if depth == 0.0 && over_gate && !ctx.tools.furnace_open() {
                ctx.audio.play(Cue::Bonk);
            }
        } else if depth < 0.0 || (over_gate && ctx.tools.furnace_open()) {
            // Once below the surface the fall is committed, gate or not.
            depth -= SINK_RATE * dt;
        }

        if depth != pos.depth {
            if let Ok(p) = world.get_mut::<Position>(entity) {
                p.depth = depth;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{spawn_item, Item};
    use crate::stage::Stage;
    use crate::tools::{ToolKind, ToolState};
    use ember_core::math::Vec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn setup() -> (World, SimContext, StdRng) {
        (
            World::new(),
            SimContext::new(Stage::default(), 3),
            StdRng::seed_from_u64(3),
        )
    }

    #[test]
    fn sinks_only_while_gate_is_open() {
        let (mut world, mut ctx, mut rng) = setup();
        // In the gate strip but clear of the growing box.
        let in_gate = Vec2::new(150.0, 170.0);
        let e = spawn_item(&mut world, Item::GreenPlant, in_gate, &mut rng);

        update(&mut world, &mut ctx, 0.1);
        assert_eq!(world.get::<Position>(e).unwrap().depth, 0.0);

        ctx.tools.set(ToolKind::Furnace, ToolState::Active);
        update(&mut world, &mut ctx, 0.1);
        assert!(world.get::<Position>(e).unwrap().depth < 0.0);

        // Closing the gate does not rescue a falling object.
        ctx.tools.set(ToolKind::Furnace, ToolState::Idle);
        let before = world.get::<Position>(e).unwrap().depth;
        update(&mut world, &mut ctx, 0.1);
        assert!(world.get::<Position>(e).unwrap().depth < before);
    }

    #[test]
    fn dropped_objects_settle_to_the_surface() {
        let (mut world, mut ctx, mut rng) = setup();
        let spot = Vec2::new(300.0, 400.0);
        let e = spawn_item(&mut world, Item::Coal, spot, &mut rng);
        world.get_mut::<Position>(e).unwrap().depth = 30.0;

        update(&mut world, &mut ctx, 0.1);
        let depth = world.get::<Position>(e).unwrap().depth;
        assert!(depth > 0.0 && depth < 30.0);
        for _ in 0..10 {
            update(&mut world, &mut ctx, 0.1);
        }
        assert_eq!(world.get::<Position>(e).unwrap().depth, 0.0);
    }

    #[test]
    fn held_objects_are_exempt() {
        let (mut world, mut ctx, mut rng) = setup();
        let in_gate = Vec2::new(150.0, 170.0);
        let e = spawn_item(&mut world, Item::Coal, in_gate, &mut rng);
        world.get_mut::<Object>(e).unwrap().is_held = true;
        world.get_mut::<Position>(e).unwrap().depth = 40.0;
        ctx.tools.set(ToolKind::Furnace, ToolState::Active);

        update(&mut world, &mut ctx, 0.5);
        assert_eq!(world.get::<Position>(e).unwrap().depth, 40.0);
    }
}
