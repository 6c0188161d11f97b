//! Pairwise circle separation between solid objects on the surface.
//!
//! The object count stays small enough (the clutter hazard ends the run
//! past sixty) that the O(n^2) pass is cheaper than maintaining a spatial
//! index.

use ember_core::ecs::{ComponentSet, Entity, QueryMode, World};
use ember_core::math::Vec2;

use crate::components::{Force, Object, Position};

/// Separation force per unit of normalized overlap.
const PUSH_STRENGTH: f32 = 600.0;

pub fn update(world: &mut World, _dt: f32) {
    let set = ComponentSet::new()
        .with::<Object>()
        .with::<Position>()
        .with::<Force>();

    // Snapshot the colliders, then apply accumulated pushes.
    let mut bodies: Vec<(Entity, Vec2, f32)> = Vec::new();
    for entity in world.query(set, QueryMode::All) {
        let Ok(object) = world.get::<Object>(entity) else {
            continue;
        };
        if !object.is_solid || object.is_held || object.spawner.is_some() {
            continue;
        }
        let radius = object.radius;
        let Ok(pos) = world.get::<Position>(entity) else {
            continue;
        };
        // Objects falling through the gate no longer push their neighbors.
        if pos.depth < 0.0 {
            continue;
        }
        bodies.push((entity, pos.position, radius));
    }

    let mut pushes: Vec<(Entity, Vec2)> = Vec::new();
    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            let (a, pa, ra) = bodies[i];
            let (b, pb, rb) = bodies[j];
            let min_dist = ra + rb;
            let delta = pb - pa;
            let dist_sq = delta.length_squared();
            if dist_sq >= min_dist * min_dist {
                continue;
            }
            let dist = dist_sq.sqrt();
            let dir = if dist > 1e-3 {
                delta / dist
            } else {
                // Coincident centers: separate along a fixed axis.
                Vec2::X
            };
            let overlap = (min_dist - dist) / min_dist;
            let push = dir * (PUSH_STRENGTH * overlap);
            pushes.push((a, -push));
            pushes.push((b, push));
        }
    }

    for (entity, push) in pushes {
        if let Ok(force) = world.get_mut::<Force>(entity) {
            force.accumulated += push;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{spawn_item, Item};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn overlapping_bodies_push_apart() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(11);
        let a = spawn_item(&mut world, Item::GreenPlant, Vec2::new(200.0, 300.0), &mut rng);
        let b = spawn_item(&mut world, Item::GreenPlant, Vec2::new(210.0, 300.0), &mut rng);

        update(&mut world, 1.0 / 60.0);
        assert!(world.get::<Force>(a).unwrap().accumulated.x < 0.0);
        assert!(world.get::<Force>(b).unwrap().accumulated.x > 0.0);
    }

    #[test]
    fn soft_bodies_pass_through() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(11);
        let plant = spawn_item(&mut world, Item::GreenPlant, Vec2::new(200.0, 300.0), &mut rng);
        let minion = spawn_item(&mut world, Item::Minion, Vec2::new(205.0, 300.0), &mut rng);

        update(&mut world, 1.0 / 60.0);
        assert_eq!(world.get::<Force>(plant).unwrap().accumulated, Vec2::ZERO);
        assert_eq!(world.get::<Force>(minion).unwrap().accumulated, Vec2::ZERO);
    }
}
