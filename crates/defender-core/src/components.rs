//! ECS components for hecs entities.
//!
//! Components are plain data structs with no game logic; systems in the
//! sim crate drive them. The projectile component lives in the sim crate
//! because it carries an entity handle.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::constants::{TOWER_BASE_RANGE, TOWER_MAX_LEVEL};
use crate::enums::{Direction, EnemyBehavior};
use crate::types::GridPos;

/// Marks an entity as an enemy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy;

/// Marks an entity as the player.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player;

/// Enemy pathing state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyAgent {
    pub behavior: EnemyBehavior,
    /// Remaining cells to traverse, consumed front to back.
    pub path: VecDeque<GridPos>,
    /// Cell the current path leads to. Cleared when reached or when no
    /// path exists, so wanderers re-roll instead of stalling.
    pub target: Option<GridPos>,
}

impl EnemyAgent {
    pub fn new(behavior: EnemyBehavior) -> Self {
        Self {
            behavior,
            path: VecDeque::new(),
            target: None,
        }
    }
}

/// Hit points for damageable entities. Max is fixed at spawn time
/// (the wave number, for enemies).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub hit_points: i32,
    pub max_hit_points: i32,
}

impl Health {
    pub fn new(hit_points: i32) -> Self {
        Self {
            hit_points,
            max_hit_points: hit_points,
        }
    }

    /// Remaining health fraction for display.
    pub fn ratio(&self) -> f64 {
        if self.max_hit_points <= 0 {
            0.0
        } else {
            self.hit_points.max(0) as f64 / self.max_hit_points as f64
        }
    }
}

/// A defensive tower occupying one maze cell. Upgrade-only; never removed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tower {
    pub cell: GridPos,
    /// Level 1..=10. Damage equals level.
    pub level: u32,
    /// Tick of the last shot; None means the tower has never fired
    /// and may fire immediately.
    pub last_shot_tick: Option<u64>,
}

impl Tower {
    pub fn new(cell: GridPos) -> Self {
        Self {
            cell,
            level: 1,
            last_shot_tick: None,
        }
    }

    pub fn damage(&self) -> i32 {
        self.level as i32
    }

    /// Seconds between shots; shrinks with level, floored at 1.0.
    pub fn cooldown_secs(&self) -> f64 {
        (6.0 - (self.level - 1) as f64 * 0.5).max(1.0)
    }

    /// Range in pixels before any session-wide boost.
    pub fn base_range(&self) -> f64 {
        TOWER_BASE_RANGE
    }

    /// Raise the level by one, capped at the maximum.
    pub fn upgrade(&mut self) {
        self.level = (self.level + 1).min(TOWER_MAX_LEVEL);
    }
}

/// Player session state: resources, facing, and timed status effects.
/// Effect timers count down in ticks and revert at zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    pub resources: u32,
    pub facing: Direction,
    pub moving: bool,
    pub invincibility_timer: u32,
    pub speed_boost_timer: u32,
    pub slow_timer: u32,
    /// Tick of the last build/upgrade action, for rate limiting.
    pub last_build_tick: Option<u64>,
}

impl PlayerState {
    pub fn new() -> Self {
        Self {
            resources: 0,
            facing: Direction::East,
            moving: false,
            invincibility_timer: 0,
            speed_boost_timer: 0,
            slow_timer: 0,
            last_build_tick: None,
        }
    }

    pub fn invincible(&self) -> bool {
        self.invincibility_timer > 0
    }

    /// Effective speed multiplier from active status effects. Deriving
    /// the multiplier each tick keeps the slow penalty from stacking.
    pub fn speed_factor(&self) -> f64 {
        let mut factor = 1.0;
        if self.speed_boost_timer > 0 {
            factor *= crate::constants::SPEED_BOOST_FACTOR;
        }
        if self.slow_timer > 0 {
            factor *= crate::constants::SLOW_FACTOR;
        }
        factor
    }

    /// Count player-local effect timers down by one tick.
    pub fn tick_timers(&mut self) {
        self.invincibility_timer = self.invincibility_timer.saturating_sub(1);
        self.speed_boost_timer = self.speed_boost_timer.saturating_sub(1);
        self.slow_timer = self.slow_timer.saturating_sub(1);
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new()
    }
}
