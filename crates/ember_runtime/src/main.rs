//! Ember Runtime
//!
//! Headless binary that boots a run and steps it at the fixed tick rate
//! until the run ends, logging cues and the final score. A windowed
//! front end would feed real pointer input instead of `Pointer::released`.

use std::path::Path;

use anyhow::Result;
use ember_core::time::{SimulationTime, TICK_SECONDS};
use ember_game::input::Pointer;
use ember_game::{GameRun, RunConfig};

mod settings;

use settings::Settings;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(Path::new(&path))?,
        None => Settings::default(),
    };
    tracing::info!("Ember v{}", ember_core::VERSION);
    tracing::debug!(
        seed = settings.simulation.seed,
        volume = settings.audio.master_volume,
        "settings loaded"
    );

    let mut run = GameRun::new(RunConfig {
        view_width: settings.simulation.view_width,
        view_height: settings.simulation.view_height,
        seed: settings.simulation.seed,
    });

    let mut time = SimulationTime::new();
    let end = loop {
        if let Some(end) = run.update(TICK_SECONDS, Pointer::released()) {
            break Some(end);
        }
        time.advance_tick();
        for cue in run.audio().drain() {
            tracing::debug!(?cue, "audio cue");
        }
        let limited = settings.simulation.max_seconds > 0.0;
        if limited && run.ctx.elapsed >= settings.simulation.max_seconds {
            break None;
        }
    };

    match end {
        Some(end) => tracing::info!(
            ticks = time.tick_count(),
            score = end.score,
            cause = ?end.cause,
            "run over"
        ),
        None => tracing::info!(
            ticks = time.tick_count(),
            elapsed = run.ctx.elapsed,
            score = run.ctx.score(),
            "run stopped at the time limit"
        ),
    }
    Ok(())
}
