//! Session configuration — the menu-settable parameters.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validated ranges for the configuration surface.
pub const MAZE_WIDTH_RANGE: std::ops::RangeInclusive<u32> = 10..=25;
pub const MAZE_HEIGHT_RANGE: std::ops::RangeInclusive<u32> = 10..=16;
pub const SPAWN_COUNT_RANGE: std::ops::RangeInclusive<u32> = 1..=3;
pub const MIN_ENEMIES_PER_WAVE: u32 = 2;

/// Parameters chosen on the menu screen before a session starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub maze_width: u32,
    pub maze_height: u32,
    /// Distinct spawn points on the west edge.
    pub spawn_count: u32,
    /// Number of waves to survive; 0 means endless.
    pub wave_count: u32,
    /// Enemy quota of the first wave.
    pub enemies_per_wave: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            maze_width: 20,
            maze_height: 15,
            spawn_count: 2,
            wave_count: 5,
            enemies_per_wave: 10,
        }
    }
}

/// A configuration value outside its validated range.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("maze width {0} outside {min}..={max}", min = MAZE_WIDTH_RANGE.start(), max = MAZE_WIDTH_RANGE.end())]
    MazeWidth(u32),
    #[error("maze height {0} outside {min}..={max}", min = MAZE_HEIGHT_RANGE.start(), max = MAZE_HEIGHT_RANGE.end())]
    MazeHeight(u32),
    #[error("spawn count {0} outside {min}..={max}", min = SPAWN_COUNT_RANGE.start(), max = SPAWN_COUNT_RANGE.end())]
    SpawnCount(u32),
    #[error("enemies per wave {0} below minimum {min}", min = MIN_ENEMIES_PER_WAVE)]
    EnemiesPerWave(u32),
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !MAZE_WIDTH_RANGE.contains(&self.maze_width) {
            return Err(ConfigError::MazeWidth(self.maze_width));
        }
        if !MAZE_HEIGHT_RANGE.contains(&self.maze_height) {
            return Err(ConfigError::MazeHeight(self.maze_height));
        }
        if !SPAWN_COUNT_RANGE.contains(&self.spawn_count) {
            return Err(ConfigError::SpawnCount(self.spawn_count));
        }
        if self.enemies_per_wave < MIN_ENEMIES_PER_WAVE {
            return Err(ConfigError::EnemiesPerWave(self.enemies_per_wave));
        }
        Ok(())
    }

    /// Whether the session runs forever (no wave quota).
    pub fn endless(&self) -> bool {
        self.wave_count == 0
    }
}
