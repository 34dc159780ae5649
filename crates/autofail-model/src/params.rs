use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Longest approach time the engine uses (AR 0).
const MAX_APPROACH_TIME: i64 = 1800;

/// Upper bound for the other windows, keeping all time sums inside `i64`.
const MAX_WINDOW: i64 = i32::MAX as i64;

/// Engine windowing constants, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct TimingParams {
    /// How long before its start an object must be loaded
    pub approach_time: i64,
    /// Width of the 50-judgement hit window
    pub hit_window_50: i64,
    /// Extra time the engine keeps simulating an object after it ends
    pub physics_margin: i64,
}

impl Default for TimingParams {
    fn default() -> Self {
        Self {
            approach_time: 1200,
            hit_window_50: 140,
            physics_margin: 0,
        }
    }
}

impl TimingParams {
    pub fn new(approach_time: i64, hit_window_50: i64, physics_margin: i64) -> Self {
        Self {
            approach_time,
            hit_window_50,
            physics_margin,
        }
    }

    /// Derive the windowing constants from chart difficulty settings.
    pub fn from_difficulty(approach_rate: f64, overall_difficulty: f64, physics_margin: i64) -> Self {
        let approach_time = if approach_rate < 5.0 {
            1200.0 + 600.0 * (5.0 - approach_rate) / 5.0
        } else {
            1200.0 - 750.0 * (approach_rate - 5.0) / 5.0
        };
        let hit_window_50 = 200.0 - 10.0 * overall_difficulty;
        let mut params = Self {
            approach_time: approach_time as i64,
            hit_window_50: hit_window_50 as i64,
            physics_margin,
        };
        params.validate();
        params
    }

    pub fn validate(&mut self) {
        self.approach_time = self.approach_time.clamp(0, MAX_APPROACH_TIME);
        self.hit_window_50 = self.hit_window_50.clamp(0, MAX_WINDOW);
        self.physics_margin = self.physics_margin.clamp(0, MAX_WINDOW);
    }

    /// Read params from a JSON file.
    pub fn read(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let mut params: TimingParams = serde_json::from_str(&data)?;
        params.validate();
        Ok(params)
    }

    /// Write params to a JSON file.
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
