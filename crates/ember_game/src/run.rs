//! One playable run: builds the stage fixtures and drives the frame
//! pipeline.

use ember_core::ecs::{World, WorldError};
use ember_core::math::Vec2;
use tracing::info;

use crate::components::{layers, Hand, Object, Position, Sprite, SpriteKey, Tool, Velocity};
use crate::context::{RunEnd, SimContext};
use crate::input::Pointer;
use crate::items::{self, Item};
use crate::render::{build_frame, RenderFrame};
use crate::stage::{Stage, VIEW_HEIGHT, VIEW_WIDTH};
use crate::systems;
use crate::systems::hand::CARRY_DEPTH;
use crate::tools::{self, ToolKind};

/// Hands fly much faster than anything they carry.
const HAND_MAX_SPEED: f32 = 1000.0;

const FURNACE_RADIUS: f32 = 24.0;
const BELLOWS_RADIUS: f32 = 24.0;
const SKYLIGHT_RADIUS: f32 = 16.0;
const MUSIC_BOX_RADIUS: f32 = 20.0;
const DISPENSER_RADIUS: f32 = 24.0;

#[derive(Debug, Clone, Copy)]
pub struct RunConfig {
    pub view_width: f32,
    pub view_height: f32,
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            view_width: VIEW_WIDTH,
            view_height: VIEW_HEIGHT,
            seed: 0,
        }
    }
}

pub struct GameRun {
    pub world: World,
    pub ctx: SimContext,
}

impl GameRun {
    pub fn new(config: RunConfig) -> Self {
        let stage = Stage::new(Vec2::new(config.view_width, config.view_height));
        let ctx = SimContext::new(stage, config.seed);
        let mut world = World::new();
        let setup = populate(&mut world, &ctx);
        debug_assert!(setup.is_ok(), "fixtures attach to just-created entities");
        info!(seed = config.seed, "run started");
        Self { world, ctx }
    }

    /// Advance the simulation by `dt` seconds. Returns the run summary
    /// once the run is over; further calls are no-ops.
    pub fn update(&mut self, dt: f32, pointer: Pointer) -> Option<RunEnd> {
        if self.ctx.is_over() {
            return self.ctx.run_end;
        }
        self.ctx.elapsed += dt;

        let world = &mut self.world;
        let ctx = &mut self.ctx;
        systems::gravity::update(world, ctx, dt);
        systems::collision::update(world, dt);
        systems::minion::update(world, ctx, dt);
        systems::boundary::update(world, ctx);
        systems::velocity::update(world, dt);
        systems::hand::update(world, dt);
        systems::tool_motion::update(world, ctx, dt);
        systems::animation::update(world, dt);
        systems::interaction::update(world, ctx, pointer);
        systems::lifecycle::update(world, ctx, dt);
        systems::hazard::update(world, ctx, dt);
        world.flush();

        self.ctx.run_end
    }

    pub fn frame(&self) -> RenderFrame {
        build_frame(&self.world, &self.ctx)
    }

    pub fn audio(&mut self) -> &mut crate::audio::AudioBus {
        &mut self.ctx.audio
    }
}

fn populate(world: &mut World, ctx: &SimContext) -> Result<(), WorldError> {
    for slot in ctx.stage.hands {
        let hand = world.create();
        world.attach(hand, Position::with_depth(slot.position, CARRY_DEPTH))?;
        world.attach(hand, Velocity::new(HAND_MAX_SPEED))?;
        world.attach(hand, Hand::new(slot.shoulder, slot.position, CARRY_DEPTH))?;
        world.attach(hand, Sprite::new(SpriteKey::HandOpen, layers::HANDS))?;
    }

    let fixtures: [(ToolKind, Vec2, f32, fn(f32) -> Vec2); 4] = [
        (
            ToolKind::Furnace,
            ctx.stage.furnace_anchor,
            FURNACE_RADIUS,
            tools::furnace_idle,
        ),
        (
            ToolKind::Bellows,
            ctx.stage.bellows_anchor,
            BELLOWS_RADIUS,
            tools::bellows_idle,
        ),
        (
            ToolKind::Skylight,
            ctx.stage.skylight_anchor,
            SKYLIGHT_RADIUS,
            tools::skylight_idle,
        ),
        (
            ToolKind::MusicBox,
            ctx.stage.music_box_anchor,
            MUSIC_BOX_RADIUS,
            tools::music_box_idle,
        ),
    ];
    for (kind, anchor, radius, idle) in fixtures {
        let tool = world.create();
        world.attach(tool, Position::new(anchor))?;
        world.attach(tool, Tool::new(kind, radius, idle))?;
    }

    for (kind, at) in ctx.stage.dispensers {
        let dispenser = world.create();
        world.attach(dispenser, Position::new(at))?;
        let mut object = Object::new(Item::None, DISPENSER_RADIUS);
        object.is_solid = false;
        object.spawner = Some(kind);
        world.attach(dispenser, object)?;
        world.attach(
            dispenser,
            Sprite::new(items::spec(kind).sprite, layers::ABOVE_GROUND),
        )?;
    }
    Ok(())
}
