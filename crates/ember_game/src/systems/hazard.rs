//! Run-ending pressures: floor clutter, furnace temperature and the
//! order queue, plus the warning loops that telegraph them.

use ember_core::ecs::{ComponentSet, QueryMode, World};
use rand::Rng;
use tracing::warn;

use crate::audio::{Cue, LoopCue};
use crate::components::Object;
use crate::context::{LossCause, SimContext};
use crate::items::Item;

/// Over this many objects on the floor the run is lost.
const CLUTTER_LOSS: usize = 60;
const CLUTTER_FINAL_WARNING: usize = 55;
const CLUTTER_WARNING: usize = 45;

/// Flame power gained per second while the bellows are worked.
const FLAME_GAIN: f32 = 15.0;
/// Flame power lost per second otherwise.
const FLAME_DECAY: f32 = 10.0;

/// Each appended order shaves this off the request interval.
const REQUEST_ACCEL: f32 = 0.75;
const REQUEST_INTERVAL_FLOOR: f32 = 4.0;
/// A queue past this length ends the run.
const ORDER_QUEUE_LIMIT: usize = 11;

pub fn update(world: &World, ctx: &mut SimContext, dt: f32) {
    clutter(world, ctx);
    flame(ctx, dt);
    orders(ctx, dt);

    ctx.audio
        .set_loop(LoopCue::FurnaceWheel, ctx.tools.furnace.is_active());
    ctx.audio
        .set_loop(LoopCue::BellowsWheel, ctx.tools.bellows.is_active());
    ctx.audio
        .tick_music(ctx.tools.music_box.is_active(), dt);
}

fn clutter(world: &World, ctx: &mut SimContext) {
    let set = ComponentSet::new().with::<Object>();
    let count = world
        .query(set, QueryMode::All)
        .into_iter()
        .filter(|&e| !world.is_doomed(e))
        .count();
    ctx.object_count = count;

    ctx.audio.set_loop(
        LoopCue::Warning,
        count > CLUTTER_WARNING && count <= CLUTTER_FINAL_WARNING,
    );
    ctx.audio
        .set_loop(LoopCue::FinalWarning, count > CLUTTER_FINAL_WARNING);
    if count > CLUTTER_LOSS {
        warn!(count, "floor clutter over the limit");
        ctx.fail(LossCause::Clutter);
    }
}

fn flame(ctx: &mut SimContext, dt: f32) {
    if ctx.tools.bellows.is_active() {
        ctx.flame_power = (ctx.flame_power + FLAME_GAIN * dt).min(crate::context::FLAME_POWER_MAX);
    } else {
        ctx.flame_power = (ctx.flame_power - FLAME_DECAY * dt).max(0.0);
    }

    let starving = ctx.flame_power < crate::context::FLAME_POWER_MAX;
    ctx.audio.set_loop(LoopCue::BellowsDanger, starving);
    ctx.audio.hiss_volume = if starving {
        1.0 - ctx.flame_power / crate::context::FLAME_POWER_MAX
    } else {
        0.0
    };

    if ctx.flame_power <= 0.0 {
        warn!("flame went out");
        ctx.fail(LossCause::Temperature);
    }
}

fn orders(ctx: &mut SimContext, dt: f32) {
    ctx.request_timer += dt;
    if ctx.request_timer < ctx.request_interval {
        return;
    }
    ctx.request_timer = 0.0;

    let order = if ctx.rng.gen_range(0..6) == 0 {
        Item::GoldPlant
    } else {
        match ctx.rng.gen_range(0..3) {
            0 => Item::GreenPlant,
            1 => Item::RedPlant,
            _ => Item::BluePlant,
        }
    };
    ctx.order_queue.push_back(order);
    ctx.audio.play(Cue::Paper);
    ctx.request_interval = (ctx.request_interval - REQUEST_ACCEL).max(REQUEST_INTERVAL_FLOOR);

    if ctx.order_queue.len() > ORDER_QUEUE_LIMIT {
        warn!(queued = ctx.order_queue.len(), "order queue overflowed");
        ctx.fail(LossCause::OrderOverflow);
    }
}
