//! Keeps surface objects inside the pit (or the growing box, if that is
//! where they are), killing the velocity component that hit the wall.

use ember_core::ecs::{ComponentSet, QueryMode, World};

use crate::components::{Object, Position, Velocity};
use crate::context::SimContext;

pub fn update(world: &mut World, ctx: &SimContext) {
    let set = ComponentSet::new()
        .with::<Object>()
        .with::<Position>()
        .with::<Velocity>();
    for entity in world.query(set, QueryMode::All) {
        let Ok(object) = world.get::<Object>(entity).copied() else {
            continue;
        };
        // Held objects follow the hand; minions walk in from outside the
        // walls and are steered, not clamped.
        if object.is_held || object.spawner.is_some() || !object.is_solid {
            continue;
        }
        let Ok(pos) = world.get::<Position>(entity).copied() else {
            continue;
        };
        if pos.depth < 0.0 {
            continue;
        }

        let bounds = if ctx.stage.growing_box.contains(pos.position) {
            ctx.stage.growing_box
        } else {
            ctx.stage.ground
        };
        let clamped = bounds.clamp_inside(pos.position, object.radius);
        if clamped == pos.position {
            continue;
        }

        if let Ok(p) = world.get_mut::<Position>(entity) {
            p.position = clamped;
        }
        if let Ok(v) = world.get_mut::<Velocity>(entity) {
            if clamped.x != pos.position.x {
                v.velocity.x = 0.0;
            }
            if clamped.y != pos.position.y {
                v.velocity.y = 0.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{spawn_item, Item};
    use crate::stage::Stage;
    use ember_core::math::Vec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn objects_are_clamped_to_the_pit_walls() {
        let mut world = World::new();
        let ctx = SimContext::new(Stage::default(), 5);
        let mut rng = StdRng::seed_from_u64(5);

        let e = spawn_item(&mut world, Item::Coal, Vec2::new(10.0, 300.0), &mut rng);
        world.get_mut::<Velocity>(e).unwrap().velocity = Vec2::new(-100.0, 50.0);

        update(&mut world, &ctx);
        let pos = world.get::<Position>(e).unwrap();
        let radius = world.get::<Object>(e).unwrap().radius;
        assert_eq!(pos.position.x, ctx.stage.ground.min.x + radius);
        // Only the clamped axis loses its velocity.
        let vel = world.get::<Velocity>(e).unwrap().velocity;
        assert_eq!(vel.x, 0.0);
        assert_eq!(vel.y, 50.0);
    }

    #[test]
    fn objects_in_the_growing_box_stay_in_it() {
        let mut world = World::new();
        let ctx = SimContext::new(Stage::default(), 5);
        let mut rng = StdRng::seed_from_u64(5);

        let inside = ctx.stage.growing_box.center() - Vec2::new(45.0, 0.0);
        let e = spawn_item(&mut world, Item::GreenSapling, inside, &mut rng);
        update(&mut world, &ctx);
        let pos = world.get::<Position>(e).unwrap();
        let radius = world.get::<Object>(e).unwrap().radius;
        assert_eq!(pos.position.x, ctx.stage.growing_box.min.x + radius);
    }

    #[test]
    fn minions_walk_through_the_walls() {
        let mut world = World::new();
        let ctx = SimContext::new(Stage::default(), 5);
        let mut rng = StdRng::seed_from_u64(5);

        let outside = Vec2::new(ctx.stage.ground.max.x + 32.0, 300.0);
        let e = spawn_item(&mut world, Item::Minion, outside, &mut rng);
        update(&mut world, &ctx);
        assert_eq!(world.get::<Position>(e).unwrap().position, outside);
    }
}
