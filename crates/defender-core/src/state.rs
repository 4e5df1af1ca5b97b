//! Game state snapshot — the complete visible state handed to the
//! renderer each tick. Read-only; nothing feeds back into the simulation.

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::enums::{Direction, EnemyBehavior, GameMode};
use crate::events::GameEvent;
use crate::types::{GridPos, OneWayWall, Position, Rect, SimTime};

/// Complete game state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub mode: GameMode,
    pub config: GameConfig,
    /// Present while a session is live (Playing or GameOver).
    pub maze: Option<MazeView>,
    pub player: Option<PlayerView>,
    pub enemies: Vec<EnemyView>,
    pub towers: Vec<TowerView>,
    pub projectiles: Vec<ProjectileView>,
    pub session: SessionView,
    pub events: Vec<GameEvent>,
}

/// Static maze geometry plus the mutable pellet/power-up sets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MazeView {
    pub width: u32,
    pub height: u32,
    pub spawn_points: Vec<GridPos>,
    pub base: GridPos,
    pub pellets: Vec<GridPos>,
    pub powerups: Vec<GridPos>,
    pub walls: Vec<Rect>,
    pub one_way_walls: Vec<OneWayWall>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Position,
    pub facing: Direction,
    pub moving: bool,
    pub resources: u32,
    pub invincible: bool,
    pub speed_boost_remaining_secs: f64,
    pub slow_remaining_secs: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub position: Position,
    pub behavior: EnemyBehavior,
    /// Remaining health fraction for the health bar.
    pub health_ratio: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TowerView {
    pub cell: GridPos,
    pub level: u32,
    /// Effective range in pixels, including any active boost.
    pub range: f64,
    /// Fraction of the cooldown elapsed (1.0 = ready to fire).
    pub cooldown_ratio: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: Position,
    /// Target position for drawing the tracer, if the target is alive.
    pub target_position: Option<Position>,
}

/// Wave, score, and global-timer state for the HUD.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionView {
    pub wave_number: u32,
    pub base_health: i32,
    pub score: u32,
    pub spawned_enemies: u32,
    pub destroyed_enemies: u32,
    pub total_enemies: u32,
    pub wave_timer_secs: f64,
    pub tower_boost_remaining_secs: f64,
    pub freeze_remaining_secs: f64,
}
