//! Pointer-driven hand controller.
//!
//! While the pointer is pressed and no hand is engaged, every frame
//! looks for the nearest object or tool under the pointer. Items are
//! grabbed once the engaged hand closes to within `GRAB_DISTANCE` and
//! carried at the pointer until release. Tools bind the hand instead:
//! the binding survives pointer release and is broken by clicking the
//! tool again, which gives the freed hand to the pointer.

use ember_core::ecs::{ComponentSet, Entity, QueryMode, World};
use ember_core::math::Vec2;

use crate::audio::Cue;
use crate::components::{Hand, Object, Position, Sprite, SpriteKey, Tool};
use crate::context::SimContext;
use crate::input::Pointer;
use crate::items::spawn_item;
use crate::systems::hand::CARRY_DEPTH;
use crate::systems::tool_motion::anchor_of;
use crate::tools::{ToolKind, ToolState};

/// Extra reach beyond an entity's radius when picking a press target.
const GRAB_MARGIN: f32 = 10.0;
/// The hand closes its grip within this distance of the target.
const GRAB_DISTANCE: f32 = 10.0;
/// Depth the hand dips to while reaching for something on the ground.
const APPROACH_DEPTH: f32 = 1.0;
/// A tool engages once its bound hand is this close to the anchor.
const TOOL_ARRIVAL: f32 = 12.0;

/// Whatever sits closest to the pointer, if it is within grabbing
/// reach of its own radius.
enum Target {
    Item(Entity),
    Tool(Entity, ToolKind),
}

pub fn update(world: &mut World, ctx: &mut SimContext, pointer: Pointer) {
    let released_edge = !pointer.pressed && ctx.pointer_was_pressed;
    ctx.pointer_was_pressed = pointer.pressed;

    if pointer.pressed {
        if ctx.engaged_hand.is_none() {
            acquire(world, ctx, pointer.position);
        }
        drive_engaged_hand(world, ctx, pointer.position);
    }
    if released_edge {
        on_release(world, ctx);
    }
    promote_bound_tools(world, ctx);
}

/// Look for a target under the pointer. Runs every pressed frame until
/// a hand engages, so a press held over bare floor picks things up the
/// moment it slides onto them.
fn acquire(world: &mut World, ctx: &mut SimContext, at: Vec2) {
    match target_under(world, at) {
        Some(Target::Tool(tool_entity, kind)) => {
            if ctx.tools.get(kind).is_bound() {
                ctx.engaged_hand = unbind_tool(world, ctx, tool_entity, kind);
                ctx.grab_candidate = None;
            } else {
                let Ok(anchor) = world.get::<Position>(tool_entity).map(|p| p.position) else {
                    return;
                };
                if let Some(hand) = nearest_free_hand(world, anchor) {
                    grab_tool(world, ctx, hand, tool_entity);
                    ctx.engaged_hand = Some(hand);
                    ctx.grab_candidate = None;
                }
            }
        }
        Some(Target::Item(item)) => {
            let Ok(item_pos) = world.get::<Position>(item).map(|p| p.position) else {
                return;
            };
            if let Some(hand) = nearest_free_hand(world, item_pos) {
                ctx.engaged_hand = Some(hand);
                ctx.grab_candidate = Some(item);
            }
        }
        None => {}
    }
}

fn drive_engaged_hand(world: &mut World, ctx: &mut SimContext, at: Vec2) {
    let Some(hand_entity) = ctx.engaged_hand else {
        return;
    };
    // A hand cranking a tool stays on its anchor.
    if world
        .get::<Hand>(hand_entity)
        .map(|h| h.held_tool.is_some())
        .unwrap_or(true)
    {
        return;
    }

    // Drop a candidate that died or got taken since the press.
    if let Some(candidate) = ctx.grab_candidate {
        let taken = world
            .get::<Object>(candidate)
            .map(|o| o.is_held)
            .unwrap_or(false);
        if !world.is_alive(candidate) || world.is_doomed(candidate) || taken {
            ctx.grab_candidate = None;
        }
    }

    let Some(candidate) = ctx.grab_candidate else {
        // Nothing to reach for: the hand just shadows the pointer.
        if let Ok(hand) = world.get_mut::<Hand>(hand_entity) {
            hand.target_position = at;
            hand.target_depth = CARRY_DEPTH;
        }
        return;
    };

    let Ok(target_pos) = world.get::<Position>(candidate).map(|p| p.position) else {
        return;
    };
    if let Ok(hand) = world.get_mut::<Hand>(hand_entity) {
        hand.target_position = target_pos;
        hand.target_depth = APPROACH_DEPTH;
    }

    let Ok(hand_pos) = world.get::<Position>(hand_entity).copied() else {
        return;
    };
    if hand_pos.depth > APPROACH_DEPTH || hand_pos.position.distance(target_pos) > GRAB_DISTANCE {
        return;
    }

    grab_item(world, ctx, hand_entity, candidate, target_pos);
    ctx.grab_candidate = None;
}

fn on_release(world: &mut World, ctx: &mut SimContext) {
    let Some(hand_entity) = ctx.engaged_hand.take() else {
        ctx.grab_candidate = None;
        return;
    };
    ctx.grab_candidate = None;

    let Ok(hand) = world.get::<Hand>(hand_entity).copied() else {
        return;
    };
    // A bound hand keeps cranking after the pointer lets go.
    if hand.held_tool.is_some() {
        return;
    }
    if let Some(item) = hand.held_item {
        if let Ok(object) = world.get_mut::<Object>(item) {
            object.is_held = false;
        }
        ctx.audio.play(Cue::Swosh);
    }
    if let Ok(h) = world.get_mut::<Hand>(hand_entity) {
        h.held_item = None;
        h.target_position = hand.rest;
        h.target_depth = CARRY_DEPTH;
    }
    set_hand_sprite(world, hand_entity, SpriteKey::HandOpen);
}

/// Bind the hand to the tool. The tool activates later, once the hand
/// reaches the anchor.
fn grab_tool(world: &mut World, ctx: &mut SimContext, hand_entity: Entity, tool_entity: Entity) {
    let Ok(tool) = world.get_mut::<Tool>(tool_entity) else {
        return;
    };
    let kind = tool.kind;
    tool.holding_hand = Some(hand_entity);

    let anchor = anchor_of(ctx, kind);
    if let Ok(hand) = world.get_mut::<Hand>(hand_entity) {
        hand.held_tool = Some(tool_entity);
        hand.target_position = anchor;
        hand.target_depth = APPROACH_DEPTH;
    }
    ctx.tools.set(kind, ToolState::Held);
    ctx.audio.play(Cue::Swish);
    set_hand_sprite(world, hand_entity, SpriteKey::HandGrab);
}

/// Pick up an item. Dispensers hand over a freshly made instance of
/// their kind instead of themselves.
fn grab_item(
    world: &mut World,
    ctx: &mut SimContext,
    hand_entity: Entity,
    candidate: Entity,
    at: Vec2,
) {
    let Ok(object) = world.get::<Object>(candidate).copied() else {
        return;
    };
    let item = match object.spawner {
        Some(kind) => spawn_item(world, kind, at, &mut ctx.rng),
        None => candidate,
    };
    if let Ok(o) = world.get_mut::<Object>(item) {
        o.is_held = true;
    }
    if let Ok(hand) = world.get_mut::<Hand>(hand_entity) {
        hand.held_item = Some(item);
        hand.target_depth = CARRY_DEPTH;
    }
    ctx.audio.play(Cue::Swish);
    set_hand_sprite(world, hand_entity, SpriteKey::HandGrab);
}

fn unbind_tool(
    world: &mut World,
    ctx: &mut SimContext,
    tool_entity: Entity,
    kind: ToolKind,
) -> Option<Entity> {
    let was_active = ctx.tools.get(kind).is_active();
    ctx.tools.set(kind, ToolState::Idle);
    if was_active && matches!(kind, ToolKind::Furnace | ToolKind::Skylight) {
        ctx.audio.play(Cue::GateClose);
    }

    let freed = world
        .get_mut::<Tool>(tool_entity)
        .map(|t| t.holding_hand.take())
        .unwrap_or(None);
    if let Some(hand_entity) = freed {
        if let Ok(hand) = world.get_mut::<Hand>(hand_entity) {
            hand.held_tool = None;
        }
        set_hand_sprite(world, hand_entity, SpriteKey::HandOpen);
    }
    freed
}

/// Flip `Held` tools to `Active` once their bound hand arrives.
fn promote_bound_tools(world: &mut World, ctx: &mut SimContext) {
    let set = ComponentSet::new().with::<Tool>();
    for entity in world.query(set, QueryMode::All) {
        let Ok(tool) = world.get::<Tool>(entity).copied() else {
            continue;
        };
        let Some(hand_entity) = tool.holding_hand else {
            continue;
        };
        if ctx.tools.get(tool.kind) != ToolState::Held {
            continue;
        }
        let anchor = anchor_of(ctx, tool.kind);
        let Ok(hand_pos) = world.get::<Position>(hand_entity).map(|p| p.position) else {
            continue;
        };
        if hand_pos.distance(anchor) <= TOOL_ARRIVAL {
            ctx.tools.set(tool.kind, ToolState::Active);
            if matches!(tool.kind, ToolKind::Furnace | ToolKind::Skylight) {
                ctx.audio.play(Cue::GateOpen);
            }
        }
    }
}

/// The single nearest object or tool under the pointer, with no
/// preference between the two kinds. Returns nothing when even the
/// nearest one is out of grabbing reach.
fn target_under(world: &World, at: Vec2) -> Option<Target> {
    let mut best: Option<(Target, f32, f32)> = None;
    let mut consider = |target: Target, dist: f32, reach: f32| {
        if best.as_ref().map(|&(_, d, _)| dist < d).unwrap_or(true) {
            best = Some((target, dist, reach));
        }
    };

    let objects = ComponentSet::new().with::<Object>().with::<Position>();
    for entity in world.query(objects, QueryMode::All) {
        let (Ok(object), Ok(pos)) = (world.get::<Object>(entity), world.get::<Position>(entity))
        else {
            continue;
        };
        if object.is_held || pos.depth < 0.0 {
            continue;
        }
        let dist = pos.position.distance(at);
        consider(Target::Item(entity), dist, object.radius + GRAB_MARGIN);
    }

    let tools = ComponentSet::new().with::<Tool>().with::<Position>();
    for entity in world.query(tools, QueryMode::All) {
        let (Ok(tool), Ok(pos)) = (world.get::<Tool>(entity), world.get::<Position>(entity))
        else {
            continue;
        };
        let dist = pos.position.distance(at);
        consider(
            Target::Tool(entity, tool.kind),
            dist,
            tool.radius + GRAB_MARGIN,
        );
    }

    match best {
        Some((target, dist, reach)) if dist < reach => Some(target),
        _ => None,
    }
}

/// The free hand closest to the target being reached for.
fn nearest_free_hand(world: &World, target: Vec2) -> Option<Entity> {
    let set = ComponentSet::new().with::<Hand>().with::<Position>();
    let mut best: Option<(Entity, f32)> = None;
    for entity in world.query(set, QueryMode::All) {
        let (Ok(hand), Ok(pos)) = (world.get::<Hand>(entity), world.get::<Position>(entity))
        else {
            continue;
        };
        if hand.held_tool.is_some() || hand.held_item.is_some() {
            continue;
        }
        let dist = pos.position.distance(target);
        if best.map(|(_, d)| dist < d).unwrap_or(true) {
            best = Some((entity, dist));
        }
    }
    best.map(|(e, _)| e)
}

fn set_hand_sprite(world: &mut World, hand_entity: Entity, key: SpriteKey) {
    if let Ok(sprite) = world.get_mut::<Sprite>(hand_entity) {
        sprite.key = key;
    }
}
