//! Minion steering: walk into the pit from outside, wander once inside,
//! gather toward the music box while it plays.

use ember_core::ecs::{ComponentSet, QueryMode, World};
use ember_core::math::Vec2;
use rand::Rng;

use crate::components::{Force, Minion, Object, Position};
use crate::context::SimContext;

/// Steering force magnitude; with the integrator's drag this settles at a
/// walking pace of roughly 40 px/s.
const STEER_FORCE: f32 = 200.0;
/// Chance per second of a wandering minion picking a new heading.
const TURN_RATE: f32 = 0.5;

pub fn update(world: &mut World, ctx: &mut SimContext, dt: f32) {
    let set = ComponentSet::new()
        .with::<Minion>()
        .with::<Position>()
        .with::<Force>();
    let lured = ctx.tools.music_box.is_active();

    for entity in world.query(set, QueryMode::All) {
        let Ok(object) = world.get::<Object>(entity) else {
            continue;
        };
        if object.is_held {
            continue;
        }
        let radius = object.radius;
        let Ok(pos) = world.get::<Position>(entity).copied() else {
            continue;
        };
        if pos.depth < 0.0 {
            continue;
        }

        let inside = ctx.stage.ground.contains(pos.position);
        let dir = if !inside {
            // Head for the nearest interior point.
            let target = ctx.stage.ground.clamp_inside(pos.position, radius);
            (target - pos.position).normalize_or_zero()
        } else if lured {
            let target = ctx
                .stage
                .ground
                .clamp_inside(ctx.stage.music_box_anchor, radius);
            (target - pos.position).normalize_or_zero()
        } else if ctx.rng.gen::<f32>() < TURN_RATE * dt {
            let angle = ctx.rng.gen::<f32>() * std::f32::consts::TAU;
            Vec2::from_angle(angle)
        } else {
            Vec2::ZERO
        };

        if dir != Vec2::ZERO {
            if let Ok(force) = world.get_mut::<Force>(entity) {
                force.accumulated += dir * STEER_FORCE;
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
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn outside_minions_steer_into_the_pit() {
        let mut world = World::new();
        let mut ctx = SimContext::new(Stage::default(), 9);
        let mut rng = StdRng::seed_from_u64(9);

        let outside = Vec2::new(ctx.stage.ground.max.x + 32.0, 300.0);
        let e = spawn_item(&mut world, Item::Minion, outside, &mut rng);
        update(&mut world, &mut ctx, 1.0 / 60.0);
        assert!(world.get::<Force>(e).unwrap().accumulated.x < 0.0);
    }

    #[test]
    fn the_music_box_lures_minions_toward_it() {
        let mut world = World::new();
        let mut ctx = SimContext::new(Stage::default(), 9);
        let mut rng = StdRng::seed_from_u64(9);
        ctx.tools.set(ToolKind::MusicBox, ToolState::Active);

        // Music box is off the left wall; a minion on the right must be
        // pulled left and not pushed further right by wandering.
        let e = spawn_item(
            &mut world,
            Item::Minion,
            Vec2::new(ctx.stage.ground.max.x - 40.0, 300.0),
            &mut rng,
        );
        update(&mut world, &mut ctx, 1.0 / 60.0);
        assert!(world.get::<Force>(e).unwrap().accumulated.x < 0.0);
    }
}
