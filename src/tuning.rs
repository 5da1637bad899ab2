//! Data-driven session balance
//!
//! Everything a designer might reasonably tweak between builds. The
//! roach-type probability thresholds are deliberately not here; see
//! `sim::spawner`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected tuning values
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("{field} must be greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("start_lives {start} must be between 1 and max_lives {max}")]
    LivesOutOfRange { start: u8, max: u8 },
    #[error("swarm_hazards {hazards} exceeds swarm_size {size}")]
    SwarmTooSmall { hazards: usize, size: usize },
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("reading tuning: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Starting session clock (seconds)
    pub time_budget: f32,
    pub start_lives: u8,
    pub max_lives: u8,
    /// Base strike reach (pixels), added to the target's own radius
    pub strike_radius: f32,
    /// Strike debounce window (seconds)
    pub strike_duration: f32,
    /// Frame deltas above this are discarded (seconds)
    pub max_frame_dt: f32,
    /// Debris cap
    pub max_particles: usize,
    /// Roaches released by an elite kill
    pub swarm_size: usize,
    /// How many of the swarm (the last ones) are hazards
    pub swarm_hazards: usize,
    /// Delay between swarm spawns (seconds)
    pub swarm_spacing: f32,
    /// Clock bonus for a prismatic kill (seconds)
    pub time_bonus: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            time_budget: 60.0,
            start_lives: 3,
            max_lives: 5,
            strike_radius: 50.0,
            strike_duration: 0.1,
            max_frame_dt: 1.0,
            max_particles: 512,
            swarm_size: 20,
            swarm_hazards: 3,
            swarm_spacing: 0.05,
            time_bonus: 10.0,
        }
    }
}

impl Tuning {
    /// Parse from JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read and validate a JSON tuning file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        for (field, value) in [
            ("time_budget", self.time_budget),
            ("strike_radius", self.strike_radius),
            ("strike_duration", self.strike_duration),
            ("max_frame_dt", self.max_frame_dt),
        ] {
            if !(value > 0.0) {
                return Err(TuningError::NotPositive { field, value });
            }
        }
        if !(self.swarm_spacing >= 0.0) {
            return Err(TuningError::NotPositive {
                field: "swarm_spacing",
                value: self.swarm_spacing,
            });
        }
        if self.start_lives == 0 || self.start_lives > self.max_lives {
            return Err(TuningError::LivesOutOfRange {
                start: self.start_lives,
                max: self.max_lives,
            });
        }
        if self.swarm_hazards > self.swarm_size {
            return Err(TuningError::SwarmTooSmall {
                hazards: self.swarm_hazards,
                size: self.swarm_size,
            });
        }
        Ok(())
    }
}
