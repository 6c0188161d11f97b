//! Item lifecycle: the coal chute, minion arrivals, burn-off below the
//! gate, sapling growth and mad-plant spread.

use ember_core::ecs::{ComponentSet, Entity, QueryMode, World};
use ember_core::math::Vec2;
use rand::Rng;
use tracing::debug;

use crate::audio::Cue;
use crate::components::{Object, Position, REMOVAL_DEPTH};
use crate::context::SimContext;
use crate::items::{self, spawn_item, Item};

/// The chute never delivers faster than this, seconds per lump.
const COAL_PERIOD_FLOOR: f32 = 0.65;
/// How much the chute period shrinks per second of play.
const COAL_PERIOD_DECAY: f32 = 0.03;
/// Soul plants count their neighbors within this radius when deciding
/// whether to come up mad.
const CROWD_RADIUS: f32 = 64.0;

pub fn update(world: &mut World, ctx: &mut SimContext, dt: f32) {
    deliver_coal(world, ctx, dt);
    admit_minions(world, ctx, dt);
    object_pass(world, ctx, dt);
}

fn deliver_coal(world: &mut World, ctx: &mut SimContext, dt: f32) {
    ctx.coal_period = (ctx.coal_period - COAL_PERIOD_DECAY * dt).max(COAL_PERIOD_FLOOR);
    ctx.coal_timer += dt;
    while ctx.coal_timer >= ctx.coal_period {
        ctx.coal_timer -= ctx.coal_period;
        let at = ctx.stage.random_chute_entrance(&mut ctx.rng);
        spawn_item(world, Item::Coal, at, &mut ctx.rng);
    }
}

fn admit_minions(world: &mut World, ctx: &mut SimContext, dt: f32) {
    if ctx.incoming_minions == 0 {
        return;
    }
    ctx.minion_timer -= dt;
    if ctx.minion_timer > 0.0 {
        return;
    }
    ctx.incoming_minions -= 1;
    ctx.minion_timer = 0.1 + ctx.rng.gen::<f32>() * 0.4;
    let at = ctx.stage.random_side_entrance(&mut ctx.rng);
    spawn_item(world, Item::Minion, at, &mut ctx.rng);
    ctx.audio.play(Cue::Pop);
}

fn object_pass(world: &mut World, ctx: &mut SimContext, dt: f32) {
    let set = ComponentSet::new().with::<Object>().with::<Position>();
    let mut spawns: Vec<(Item, Vec2)> = Vec::new();

    for entity in world.query(set, QueryMode::All) {
        let Ok(object) = world.get::<Object>(entity).copied() else {
            continue;
        };
        if object.spawner.is_some() {
            continue;
        }
        let Ok(pos) = world.get::<Position>(entity).copied() else {
            continue;
        };

        if pos.depth < REMOVAL_DEPTH {
            burn(world, ctx, entity, object.kind);
            continue;
        }
        if object.is_held {
            continue;
        }

        // A seed that has touched down takes root wherever it landed.
        if let Some(sapling) = object.kind.sapling() {
            if pos.depth == 0.0 {
                world.delete(entity);
                spawns.push((sapling, pos.position));
            }
            continue;
        }

        if let Some(mut transform) = object.transform {
            if growth_allowed(ctx, transform.into) {
                transform.timer -= dt;
            }
            if transform.timer <= 0.0 {
                let kind = finished_kind(world, ctx, transform.into, pos.position);
                debug!(?kind, "growth finished");
                world.delete(entity);
                spawns.push((kind, pos.position));
                continue;
            }
            if let Ok(o) = world.get_mut::<Object>(entity) {
                o.transform = Some(transform);
            }
        }

        if let Some(mut spread) = object.spread {
            spread.timer -= dt;
            if spread.timer <= 0.0 {
                let interval = items::spec(object.kind)
                    .spread
                    .map(|(_, i)| i)
                    .unwrap_or(spread.timer.abs().max(1.0));
                spread.timer = interval;
                // Offspring come up right next to the parent.
                let offset = Vec2::new(ctx.rng.gen::<f32>(), ctx.rng.gen::<f32>()) * 10.0;
                spawns.push((spread.kind, pos.position + offset));
            }
            if let Ok(o) = world.get_mut::<Object>(entity) {
                o.spread = Some(spread);
            }
        }
    }

    for (kind, at) in spawns {
        spawn_item(world, kind, at, &mut ctx.rng);
    }
}

/// Remove an object that fell through the gate and apply its burn
/// effects: order plants at the head of the queue fill it, soul plants
/// summon minions, minions complain.
fn burn(world: &mut World, ctx: &mut SimContext, entity: Entity, kind: Item) {
    world.delete(entity);
    match kind {
        Item::SoulPlant => {
            if ctx.incoming_minions == 0 {
                ctx.minion_timer = 0.1 + ctx.rng.gen::<f32>() * 0.4;
            }
            ctx.incoming_minions += 1;
        }
        Item::Minion => ctx.audio.play(Cue::Pff),
        _ if kind.is_order_plant() => {
            if ctx.order_queue.front() == Some(&kind) {
                ctx.order_queue.pop_front();
                ctx.orders_filled += 1;
                ctx.audio.play(Cue::Click);
            }
        }
        _ => {}
    }
}

/// The light conditions each growth stage demands. The blue line grows
/// in the dark; everything else wants the skylight open, and red plants
/// additionally need the music playing.
fn growth_allowed(ctx: &SimContext, target: Item) -> bool {
    match target {
        Item::SoulPlant | Item::GreenPlant | Item::GoldPlant => ctx.tools.skylight_open(),
        Item::RedPlant => ctx.tools.skylight_open() && ctx.tools.music_box.is_active(),
        Item::BluePlant => !ctx.tools.skylight_open(),
        _ => true,
    }
}

/// Soul saplings that finish growing in a crowd can come up mad.
fn finished_kind(world: &World, ctx: &mut SimContext, target: Item, at: Vec2) -> Item {
    if target != Item::SoulPlant {
        return target;
    }
    let neighbors = crowd_count(world, at);
    let mad = if neighbors > 10 {
        true
    } else if neighbors > 5 {
        ctx.rng.gen_range(0..3) == 0
    } else {
        ctx.rng.gen_range(0..7) == 0
    };
    if mad {
        Item::MadPlant
    } else {
        target
    }
}

/// Solid objects within `CROWD_RADIUS`, including the one growing.
fn crowd_count(world: &World, at: Vec2) -> usize {
    let set = ComponentSet::new().with::<Object>().with::<Position>();
    world
        .query(set, QueryMode::All)
        .into_iter()
        .filter(|&e| {
            let solid = world
                .get::<Object>(e)
                .map(|o| o.is_solid && o.spawner.is_none())
                .unwrap_or(false);
            solid
                && world
                    .get::<Position>(e)
                    .map(|p| p.position.distance(at) <= CROWD_RADIUS)
                    .unwrap_or(false)
        })
        .count()
}
