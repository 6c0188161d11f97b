//! Advances frame-stepped sprite animations.

use ember_core::ecs::{ComponentSet, QueryMode, World};

use crate::components::{Animation, Sprite};

pub fn update(world: &mut World, dt: f32) {
    let set = ComponentSet::new().with::<Animation>().with::<Sprite>();
    for entity in world.query(set, QueryMode::All) {
        let Ok(anim) = world.get_mut::<Animation>(entity) else {
            continue;
        };
        anim.elapsed += dt;
        let step = (anim.elapsed / anim.frame_time) as u32;
        let frame = if anim.looped {
            step % anim.frames
        } else {
            step.min(anim.frames - 1)
        };
        if let Ok(sprite) = world.get_mut::<Sprite>(entity) {
            sprite.frame = frame;
        }
    }
}
