//! Runtime settings

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub simulation: SimulationSettings,
    pub audio: AudioSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSettings {
    pub view_width: f32,
    pub view_height: f32,
    pub seed: u64,
    /// Cap on simulated seconds for headless runs; 0 means unlimited.
    pub max_seconds: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioSettings {
    pub master_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            simulation: SimulationSettings {
                view_width: 620.0,
                view_height: 540.0,
                seed: 0,
                max_seconds: 0.0,
            },
            audio: AudioSettings { master_volume: 1.0 },
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing settings from {}", path.display()))
    }
}
