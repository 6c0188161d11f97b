//! Fire-and-forget audio cue bus.
//!
//! The core never plays sound; it records one-shot cues and loop states
//! for the audio collaborator to drain after each frame.

/// Discrete one-shot cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Item grabbed.
    Swish,
    /// Item dropped.
    Swosh,
    /// Object blocked by the closed gate.
    Bonk,
    /// Order delivered.
    Click,
    /// New order posted.
    Paper,
    /// Minion burned.
    Pff,
    /// Minion arrives.
    Pop,
    GateOpen,
    GateClose,
    /// Run over.
    Fail,
}

/// Looped cues toggled on/off by simulation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopCue {
    FurnaceWheel = 0,
    BellowsWheel = 1,
    MusicBox = 2,
    BellowsDanger = 3,
    Warning = 4,
    FinalWarning = 5,
}

const LOOP_COUNT: usize = 6;

/// Rate the music-box pitch ramps at when toggled, per second.
const MUSIC_PITCH_RATE: f32 = 20.0;
/// Fully wound-down pitch; the loop pauses once it gets here.
const MUSIC_PITCH_FLOOR: f32 = -0.99;

#[derive(Debug, Default)]
pub struct AudioBus {
    cues: Vec<Cue>,
    loops: [bool; LOOP_COUNT],
    /// Volume for the bellows danger hiss, 0..1.
    pub hiss_volume: f32,
    /// Music-box pitch offset: 0 at speed, ramps to the floor when off.
    pub music_pitch: f32,
}

impl AudioBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn play(&mut self, cue: Cue) {
        self.cues.push(cue);
    }

    pub fn set_loop(&mut self, cue: LoopCue, on: bool) {
        self.loops[cue as usize] = on;
    }

    pub fn loop_on(&self, cue: LoopCue) -> bool {
        self.loops[cue as usize]
    }

    pub fn stop_all_loops(&mut self) {
        self.loops = [false; LOOP_COUNT];
    }

    /// Take this frame's one-shot cues.
    pub fn drain(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }

    #[cfg(test)]
    pub fn pending(&self) -> &[Cue] {
        &self.cues
    }

    /// Advance the music-box loop: resume and ramp pitch up while the box
    /// is wound, wind down and pause otherwise.
    pub fn tick_music(&mut self, active: bool, dt: f32) {
        if active {
            self.set_loop(LoopCue::MusicBox, true);
            if self.music_pitch < 0.0 {
                self.music_pitch = (self.music_pitch + MUSIC_PITCH_RATE * dt).min(0.0);
            }
        } else if self.music_pitch > MUSIC_PITCH_FLOOR {
            self.music_pitch = (self.music_pitch - MUSIC_PITCH_RATE * dt).max(MUSIC_PITCH_FLOOR);
        } else {
            self.set_loop(LoopCue::MusicBox, false);
        }
    }
}
