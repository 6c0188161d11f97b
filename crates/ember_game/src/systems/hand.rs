//! Hand motion and carry.
//!
//! Hands chase their target with a critically damped spring so they
//! arrive fast without oscillating, then drag whatever they hold along.

use ember_core::ecs::{ComponentSet, QueryMode, World};
use ember_core::math::move_toward;

use crate::components::{Hand, Position, Velocity};

/// Spring natural frequency, radians per second. Damping is fixed at
/// critical (2 * omega).
const OMEGA: f32 = 12.0;
/// Vertical (depth) travel rate, units per second.
pub const DEPTH_RATE: f32 = 250.0;
/// Depth a hand lifts its cargo to while carrying.
pub const CARRY_DEPTH: f32 = 50.0;

pub fn update(world: &mut World, dt: f32) {
    let set = ComponentSet::new().with::<Hand>().with::<Position>();
    for entity in world.query(set, QueryMode::All) {
        let Ok(hand) = world.get::<Hand>(entity).copied() else {
            continue;
        };
        let Ok(pos) = world.get::<Position>(entity).copied() else {
            continue;
        };
        let Ok(vel) = world.get_mut::<Velocity>(entity) else {
            continue;
        };

        let accel = (hand.target_position - pos.position) * (OMEGA * OMEGA)
            - vel.velocity * (2.0 * OMEGA);
        vel.velocity = (vel.velocity + accel * dt).clamp_length_max(vel.max_speed);
        let velocity = vel.velocity;

        let new_pos = pos.position + velocity * dt;
        let new_depth = move_toward(pos.depth, hand.target_depth, DEPTH_RATE * dt);
        if let Ok(p) = world.get_mut::<Position>(entity) {
            p.position = new_pos;
            p.depth = new_depth;
        }

        // Carried item rides the hand exactly.
        if let Some(item) = hand.held_item {
            if let Ok(p) = world.get_mut::<Position>(item) {
                p.position = new_pos;
                p.depth = new_depth;
            }
            if let Ok(v) = world.get_mut::<Velocity>(item) {
                v.velocity = velocity.clamp_length_max(v.max_speed);
            }
        }
    }
}
