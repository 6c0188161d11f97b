//! End-to-end runs driven through `GameRun::update` with scripted
//! pointer input.

use ember_core::ecs::{ComponentSet, Entity, QueryMode};
use ember_core::math::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use ember_game::components::{Hand, Object, Position};
use ember_game::input::Pointer;
use ember_game::items::{spawn_item, Item};
use ember_game::tools::{ToolKind, ToolState};
use ember_game::{GameRun, LossCause, RunConfig};

const DT: f32 = 1.0 / 60.0;

fn new_run(seed: u64) -> GameRun {
    GameRun::new(RunConfig {
        seed,
        ..RunConfig::default()
    })
}

fn live_kinds(run: &GameRun) -> Vec<Item> {
    let set = ComponentSet::new().with::<Object>();
    run.world
        .query(set, QueryMode::All)
        .into_iter()
        .filter(|&e| run.world.get::<Object>(e).unwrap().spawner.is_none())
        .map(|e| run.world.get::<Object>(e).unwrap().kind)
        .collect()
}

fn holding_hand(run: &GameRun) -> Option<(Entity, Entity)> {
    let set = ComponentSet::new().with::<Hand>();
    run.world
        .query(set, QueryMode::All)
        .into_iter()
        .find_map(|e| {
            run.world
                .get::<Hand>(e)
                .ok()
                .and_then(|h| h.held_item)
                .map(|item| (e, item))
        })
}

#[test]
fn a_settled_seed_becomes_a_sapling_in_one_tick() {
    let mut run = new_run(1);
    let in_box = run.ctx.stage.growing_box.center();
    spawn_item(&mut run.world, Item::GreenSeed, in_box, &mut StdRng::seed_from_u64(1));

    run.update(DT, Pointer::released());
    let kinds = live_kinds(&run);
    assert!(kinds.contains(&Item::GreenSapling));
    assert!(!kinds.contains(&Item::GreenSeed));
}

#[test]
fn a_green_sapling_grows_under_the_open_skylight() {
    let mut run = new_run(2);
    let in_box = run.ctx.stage.growing_box.center();
    spawn_item(&mut run.world, Item::GreenSapling, in_box, &mut StdRng::seed_from_u64(2));
    run.ctx.tools.set(ToolKind::Skylight, ToolState::Active);
    run.ctx.tools.set(ToolKind::Bellows, ToolState::Active);

    for _ in 0..53 {
        if run.update(0.5, Pointer::released()).is_some() {
            panic!("run ended early");
        }
    }
    assert!(live_kinds(&run).contains(&Item::GreenPlant));
}

#[test]
fn the_pointer_grabs_carries_and_drops_an_item() {
    let mut run = new_run(3);
    let spot = Vec2::new(300.0, 400.0);
    let coal = spawn_item(&mut run.world, Item::Coal, spot, &mut StdRng::seed_from_u64(3));

    // Hold the press until a hand flies over and closes its grip.
    let mut grabbed = false;
    for _ in 0..120 {
        run.update(DT, Pointer::pressed_at(spot));
        if run.world.get::<Object>(coal).unwrap().is_held {
            grabbed = true;
            break;
        }
    }
    assert!(grabbed);
    let (hand, held) = holding_hand(&run).expect("a hand holds the coal");
    assert_eq!(held, coal);

    // Carry it somewhere else.
    let target = Vec2::new(200.0, 300.0);
    for _ in 0..120 {
        run.update(DT, Pointer::pressed_at(target));
    }
    let carried = run.world.get::<Position>(coal).unwrap();
    assert!(carried.position.distance(target) < 15.0);
    assert!(carried.depth > 0.0);

    // Release drops it the same frame.
    run.update(DT, Pointer::released());
    assert!(!run.world.get::<Object>(coal).unwrap().is_held);
    assert!(run.world.get::<Hand>(hand).unwrap().held_item.is_none());
}

#[test]
fn dragging_a_held_press_onto_an_item_grabs_it() {
    let mut run = new_run(7);
    let spot = Vec2::new(300.0, 400.0);
    let coal = spawn_item(&mut run.world, Item::Coal, spot, &mut StdRng::seed_from_u64(7));

    // A press over bare floor engages nothing.
    run.update(DT, Pointer::pressed_at(Vec2::new(180.0, 330.0)));
    assert!(run.ctx.engaged_hand.is_none());
    assert!(holding_hand(&run).is_none());

    // Sliding the still-held press over the coal picks it up.
    let mut grabbed = false;
    for _ in 0..300 {
        run.update(DT, Pointer::pressed_at(spot));
        if run.world.get::<Object>(coal).unwrap().is_held {
            grabbed = true;
            break;
        }
    }
    assert!(grabbed);
}

#[test]
fn the_hand_nearest_the_target_answers_the_press() {
    let mut run = new_run(8);
    let spot = Vec2::new(300.0, 282.0);
    let coal = spawn_item(&mut run.world, Item::Coal, spot, &mut StdRng::seed_from_u64(8));
    run.world.get_mut::<Object>(coal).unwrap().radius = 12.0;

    // Press off-center so the pointer itself sits nearer a different
    // hand than the coal does; the coal's own position decides.
    run.update(DT, Pointer::pressed_at(Vec2::new(320.0, 282.0)));
    let engaged = run.ctx.engaged_hand.expect("a hand answered the press");
    let rest = run.world.get::<Hand>(engaged).unwrap().rest;
    let nearest = run
        .ctx
        .stage
        .hands
        .iter()
        .map(|slot| slot.position.distance(spot))
        .fold(f32::MAX, f32::min);
    assert_eq!(rest.distance(spot), nearest);
}

#[test]
fn the_furnace_crank_opens_the_gate_and_burns_a_delivery() {
    let mut run = new_run(4);
    run.ctx.tools.set(ToolKind::Bellows, ToolState::Active);
    run.ctx.order_queue.push_back(Item::GreenPlant);

    // Click and hold the crank until a hand binds to it.
    let anchor = run.ctx.stage.furnace_anchor;
    for _ in 0..180 {
        run.update(DT, Pointer::pressed_at(anchor));
        if run.ctx.tools.furnace.is_bound() {
            break;
        }
    }
    assert!(run.ctx.tools.furnace.is_bound());

    // The binding survives letting go of the pointer, and the gate opens
    // once the hand reaches the crank.
    for _ in 0..120 {
        run.update(DT, Pointer::released());
        if run.ctx.tools.furnace_open() {
            break;
        }
    }
    assert!(run.ctx.tools.furnace_open());

    // A plant dropped on the open gate sinks through and fills the order.
    // The spot is in the gate strip but clear of the growing box.
    let over_gate = Vec2::new(150.0, 170.0);
    spawn_item(&mut run.world, Item::GreenPlant, over_gate, &mut StdRng::seed_from_u64(4));
    for _ in 0..120 {
        run.update(DT, Pointer::released());
    }
    assert_eq!(run.ctx.orders_filled, 1);
    assert!(run.ctx.order_queue.is_empty());
    assert!(!live_kinds(&run).contains(&Item::GreenPlant));

    // Clicking the crank again closes the gate and frees the hand.
    run.update(DT, Pointer::pressed_at(anchor));
    assert!(!run.ctx.tools.furnace.is_bound());
    assert!(!run.ctx.tools.furnace_open());
}

#[test]
fn a_bound_hand_never_doubles_as_a_carrier() {
    let mut run = new_run(5);
    run.ctx.tools.set(ToolKind::Bellows, ToolState::Active);

    let anchor = run.ctx.stage.music_box_anchor;
    for _ in 0..180 {
        run.update(DT, Pointer::pressed_at(anchor));
        if run.ctx.tools.music_box.is_bound() {
            break;
        }
    }
    assert!(run.ctx.tools.music_box.is_bound());
    run.update(DT, Pointer::released());

    // Grab an item: the tool-bound hand must not be the one that comes.
    let spot = Vec2::new(300.0, 400.0);
    let coal = spawn_item(&mut run.world, Item::Coal, spot, &mut StdRng::seed_from_u64(5));
    for _ in 0..120 {
        run.update(DT, Pointer::pressed_at(spot));
        if run.world.get::<Object>(coal).unwrap().is_held {
            break;
        }
    }
    let (hand, _) = holding_hand(&run).expect("some hand holds the coal");
    let hand = run.world.get::<Hand>(hand).unwrap();
    assert!(hand.held_tool.is_none());
}

#[test]
fn an_untended_flame_ends_the_run() {
    let mut run = new_run(6);
    let mut end = None;
    for _ in 0..30 {
        end = run.update(0.5, Pointer::released());
        if end.is_some() {
            break;
        }
    }
    let end = end.expect("the flame went out");
    assert_eq!(end.cause, LossCause::Temperature);
    assert_eq!(end.score, 1);
    // Later updates keep returning the same summary.
    assert_eq!(run.update(DT, Pointer::released()), Some(end));
}
