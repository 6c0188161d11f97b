//! Per-run simulation state shared by every system.

use std::collections::VecDeque;

use ember_core::ecs::Entity;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::audio::{AudioBus, Cue};
use crate::items::Item;
use crate::stage::Stage;
use crate::tools::ToolSet;

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LossCause {
    /// Too many objects on the floor.
    Clutter,
    /// Flame power hit zero.
    Temperature,
    /// Order queue ran over.
    OrderOverflow,
}

/// Terminal run summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunEnd {
    pub score: i32,
    pub cause: LossCause,
}

/// Starting interval between order requests, seconds.
pub const REQUEST_INTERVAL_START: f32 = 18.0;
/// Starting interval between coal deliveries, seconds.
pub const COAL_PERIOD_START: f32 = 5.0;
pub const FLAME_POWER_MAX: f32 = 100.0;

/// Mutable run state outside the entity store: stage geometry, RNG,
/// audio bus, tool states, timers and counters.
pub struct SimContext {
    pub stage: Stage,
    pub rng: StdRng,
    pub audio: AudioBus,
    pub tools: ToolSet,

    pub elapsed: f32,
    pub orders_filled: u32,
    pub flame_power: f32,
    /// Solid-object census from the latest hazard pass.
    pub object_count: usize,

    pub order_queue: VecDeque<Item>,
    pub request_timer: f32,
    pub request_interval: f32,

    pub coal_timer: f32,
    pub coal_period: f32,

    pub incoming_minions: u32,
    pub minion_timer: f32,

    /// Gate animation progress, 0 closed to 1 open.
    pub furnace_open_anim: f32,
    pub skylight_open_anim: f32,

    /// Hand currently following the pointer.
    pub engaged_hand: Option<Entity>,
    /// Entity the engaged hand is reaching for.
    pub grab_candidate: Option<Entity>,
    /// Pointer button state from the previous frame, for edge detection.
    pub pointer_was_pressed: bool,

    pub run_end: Option<RunEnd>,
}

impl SimContext {
    pub fn new(stage: Stage, seed: u64) -> Self {
        Self {
            stage,
            rng: StdRng::seed_from_u64(seed),
            audio: AudioBus::new(),
            tools: ToolSet::default(),
            elapsed: 0.0,
            orders_filled: 0,
            flame_power: FLAME_POWER_MAX,
            object_count: 0,
            order_queue: VecDeque::new(),
            request_timer: 0.0,
            request_interval: REQUEST_INTERVAL_START,
            coal_timer: 0.0,
            coal_period: COAL_PERIOD_START,
            incoming_minions: 0,
            minion_timer: 0.0,
            furnace_open_anim: 0.0,
            skylight_open_anim: 0.0,
            engaged_hand: None,
            grab_candidate: None,
            pointer_was_pressed: false,
            run_end: None,
        }
    }

    /// Score at this instant: base 1, plus one per 30 seconds survived,
    /// plus one per two orders filled.
    pub fn score(&self) -> i32 {
        1 + (self.elapsed / 30.0) as i32 + (self.orders_filled / 2) as i32
    }

    /// End the run. The first cause wins; later failures in the same
    /// frame are ignored.
    pub fn fail(&mut self, cause: LossCause) {
        if self.run_end.is_some() {
            return;
        }
        let end = RunEnd {
            score: self.score(),
            cause,
        };
        info!(score = end.score, ?cause, "run over");
        self.audio.play(Cue::Fail);
        self.audio.stop_all_loops();
        self.run_end = Some(end);
    }

    pub fn is_over(&self) -> bool {
        self.run_end.is_some()
    }
}
