//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// A cardinal traversal direction. North is -y, South is +y,
/// West is -x, East is +x (screen coordinates, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Unit cell offset of this direction.
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    /// Bit used to store this direction in a cell's open-direction mask.
    pub fn bit(&self) -> u8 {
        match self {
            Direction::North => 1 << 0,
            Direction::South => 1 << 1,
            Direction::East => 1 << 2,
            Direction::West => 1 << 3,
        }
    }
}

/// Orientation of a wall segment between two adjacent cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallOrientation {
    /// Wall along a vertical edge (between east/west neighbors).
    Vertical,
    /// Wall along a horizontal edge (between north/south neighbors).
    Horizontal,
}

/// Top-level session mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    Menu,
    Playing,
    GameOver,
}

/// Enemy pathing behavior, fixed at spawn time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyBehavior {
    /// Heads straight for the base.
    ShortestToBase,
    /// Re-paths toward the player's current cell.
    ChasePlayer,
    /// Wanders to random cells, re-rolling on arrival.
    RandomWander,
}

impl EnemyBehavior {
    pub const ALL: [EnemyBehavior; 3] = [
        EnemyBehavior::ShortestToBase,
        EnemyBehavior::ChasePlayer,
        EnemyBehavior::RandomWander,
    ];
}

/// Effect granted by a power-up pickup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpEffect {
    /// 1.5x player speed for 10 s.
    SpeedBoost,
    /// Player invincibility for 15 s.
    Invincibility,
    /// Session-wide tower damage/range boost for 20 s.
    TowerBoost,
    /// Session-wide enemy freeze for 5 s.
    Freeze,
}

impl PowerUpEffect {
    pub const ALL: [PowerUpEffect; 4] = [
        PowerUpEffect::SpeedBoost,
        PowerUpEffect::Invincibility,
        PowerUpEffect::TowerBoost,
        PowerUpEffect::Freeze,
    ];
}
