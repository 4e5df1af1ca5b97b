//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Side length of one maze cell in pixels.
pub const TILE_SIZE: f64 = 32.0;

/// Half a tile, the offset from a cell corner to its center.
pub const HALF_TILE: f64 = TILE_SIZE / 2.0;

// --- Maze generation ---

/// Probability that a dead-end repair opens a one-way passage
/// instead of a two-way one.
pub const ONE_WAY_PROB: f64 = 0.3;

/// Per-cell probability of holding a pellet at generation time.
pub const PELLET_PROB: f64 = 0.2;

/// Number of power-ups placed at generation time.
pub const POWERUP_COUNT: usize = 5;

/// Thickness of derived wall rectangles in pixels.
pub const WALL_THICKNESS: f64 = 2.0;

// --- Movement (pixels per tick) ---

/// Player base speed: 2 tiles per second.
pub const PLAYER_SPEED: f64 = 2.0 * TILE_SIZE / TICK_RATE as f64;

/// Enemy speed: 0.75 tiles per second.
pub const ENEMY_SPEED: f64 = 0.75 * TILE_SIZE / TICK_RATE as f64;

/// Projectile speed: 5 tiles per second.
pub const PROJECTILE_SPEED: f64 = 5.0 * TILE_SIZE / TICK_RATE as f64;

// --- Player ---

/// Player collision rectangle side length in pixels.
pub const PLAYER_SIZE: f64 = 24.0;

/// Minimum ticks between build/upgrade actions (0.5 s).
pub const BUILD_COOLDOWN_TICKS: u64 = TICK_RATE as u64 / 2;

/// Speed multiplier while the speed-boost effect is active.
pub const SPEED_BOOST_FACTOR: f64 = 1.5;

/// Speed multiplier while slowed by an enemy collision.
pub const SLOW_FACTOR: f64 = 0.75;

// --- Timed effects (ticks) ---

pub const SPEED_BOOST_TICKS: u32 = 10 * TICK_RATE;
pub const INVINCIBILITY_TICKS: u32 = 15 * TICK_RATE;
pub const TOWER_BOOST_TICKS: u32 = 20 * TICK_RATE;
pub const FREEZE_TICKS: u32 = 5 * TICK_RATE;
pub const SLOW_TICKS: u32 = 5 * TICK_RATE;

// --- Towers ---

/// Resource cost of placing a new tower.
pub const TOWER_COST: u32 = 5;

/// Maximum tower level.
pub const TOWER_MAX_LEVEL: u32 = 10;

/// Tower range in pixels (3 tiles).
pub const TOWER_BASE_RANGE: f64 = 3.0 * TILE_SIZE;

/// Range multiplier while the tower-boost effect is active.
pub const TOWER_BOOST_RANGE_FACTOR: f64 = 1.5;

// --- Collisions ---

/// Radius around the base center at which an enemy scores a hit (pixels).
pub const BASE_HIT_RADIUS: f64 = 4.0;

/// Radius around the player center at which an enemy collides (pixels).
pub const PLAYER_HIT_RADIUS: f64 = 14.0;

// --- Scoring ---

/// Starting base health.
pub const BASE_HEALTH_START: i32 = 100;

/// Score lost when an enemy reaches the base (floored at zero).
pub const BASE_HIT_SCORE_PENALTY: u32 = 25;

/// Score lost when an enemy robs the player (floored at zero).
pub const PLAYER_HIT_SCORE_PENALTY: u32 = 10;

/// Score gained when an invincible player destroys an enemy by contact.
pub const INVINCIBLE_KILL_SCORE: u32 = 10;

/// Score gained when a projectile destroys an enemy.
pub const ENEMY_KILL_SCORE: u32 = 10;

/// Score gained per pellet collected.
pub const PELLET_SCORE: u32 = 1;

/// Score gained when a wave is cleared.
pub const WAVE_CLEAR_SCORE: u32 = 100;

// --- Waves ---

/// Ticks of grace period at the start of every wave (20 s).
pub const WAVE_TIMER_TICKS: u32 = 20 * TICK_RATE;

/// Seconds between enemy spawns, indexed by wave number - 1 and
/// clamped at the last entry.
pub const SPAWN_INTERVALS_SECS: [f64; 6] = [4.0, 3.0, 2.0, 1.0, 0.5, 0.25];

/// Enemies added to the wave quota after every cleared wave.
pub const WAVE_ENEMY_INCREMENT: u32 = 2;

// --- Regeneration (ticks) ---

pub const PELLET_REGEN_TICKS: u32 = 10 * TICK_RATE;
pub const POWERUP_REGEN_TICKS: u32 = 60 * TICK_RATE;
