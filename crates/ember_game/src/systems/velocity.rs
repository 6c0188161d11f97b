//! Force integration for free-moving objects.
//!
//! Hands integrate in their own spring system; held objects are carried,
//! so both are excluded here.

use ember_core::ecs::{ComponentSet, QueryMode, World};

use crate::components::{Force, Object, Position, Velocity};

/// Exponential velocity decay rate per second.
const DRAG: f32 = 5.0;

pub fn update(world: &mut World, dt: f32) {
    let set = ComponentSet::new()
        .with::<Object>()
        .with::<Position>()
        .with::<Velocity>()
        .with::<Force>();
    let damping = (-DRAG * dt).exp();

    for entity in world.query(set, QueryMode::All) {
        let Ok(object) = world.get::<Object>(entity) else {
            continue;
        };
        if object.is_held || object.spawner.is_some() {
            continue;
        }
        let Ok(force) = world.get_mut::<Force>(entity) else {
            continue;
        };
        let accel = force.accumulated / force.mass;
        force.accumulated = ember_core::math::Vec2::ZERO;

        let Ok(vel) = world.get_mut::<Velocity>(entity) else {
            continue;
        };
        vel.velocity = (vel.velocity + accel * dt) * damping;
        vel.velocity = vel.velocity.clamp_length_max(vel.max_speed);
        let step = vel.velocity * dt;

        if let Ok(pos) = world.get_mut::<Position>(entity) {
            pos.position += step;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{spawn_item, Item, ITEM_MAX_SPEED};
    use ember_core::math::Vec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn forces_move_objects_and_drag_slows_them() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(2);
        let e = spawn_item(&mut world, Item::Coal, Vec2::new(200.0, 300.0), &mut rng);
        world.get_mut::<Force>(e).unwrap().accumulated = Vec2::new(600.0, 0.0);

        update(&mut world, 1.0 / 60.0);
        let after_push = world.get::<Velocity>(e).unwrap().velocity.x;
        assert!(after_push > 0.0);
        assert!(world.get::<Position>(e).unwrap().position.x > 200.0);
        // Force accumulator is consumed.
        assert_eq!(world.get::<Force>(e).unwrap().accumulated, Vec2::ZERO);

        update(&mut world, 1.0 / 60.0);
        assert!(world.get::<Velocity>(e).unwrap().velocity.x < after_push);
    }

    #[test]
    fn speed_is_capped() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(2);
        let e = spawn_item(&mut world, Item::Coal, Vec2::new(200.0, 300.0), &mut rng);
        world.get_mut::<Force>(e).unwrap().accumulated = Vec2::new(1e6, 0.0);

        update(&mut world, 1.0 / 60.0);
        let speed = world.get::<Velocity>(e).unwrap().velocity.length();
        assert!(speed <= ITEM_MAX_SPEED + 1e-3);
    }
}
