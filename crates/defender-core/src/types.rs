//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::{HALF_TILE, TILE_SIZE};
use crate::enums::Direction;

/// Integer cell coordinate in the maze grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another cell.
    pub fn manhattan(&self, other: GridPos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// The adjacent cell in the given direction (may be out of bounds).
    pub fn neighbor(&self, dir: Direction) -> GridPos {
        let (dx, dy) = dir.offset();
        GridPos::new(self.x + dx, self.y + dy)
    }

    /// Pixel position of this cell's center.
    pub fn center(&self) -> Position {
        Position(DVec2::new(
            self.x as f64 * TILE_SIZE + HALF_TILE,
            self.y as f64 * TILE_SIZE + HALF_TILE,
        ))
    }
}

/// Continuous position in pixel space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub DVec2);

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self(DVec2::new(x, y))
    }

    /// The grid cell this position falls in.
    pub fn cell(&self) -> GridPos {
        GridPos::new(
            (self.0.x / TILE_SIZE) as i32,
            (self.0.y / TILE_SIZE) as i32,
        )
    }

    /// Euclidean distance to another position in pixels.
    pub fn distance_to(&self, other: Position) -> f64 {
        self.0.distance(other.0)
    }

    /// Step toward a target position by at most `step` pixels.
    /// Returns the new position and whether the target was reached.
    pub fn step_toward(&self, target: Position, step: f64) -> (Position, bool) {
        let delta = target.0 - self.0;
        let dist = delta.length();
        if dist < step {
            (target, true)
        } else {
            (Position(self.0 + delta / dist * step), false)
        }
    }
}

/// Axis-aligned rectangle in pixel space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner.
    pub pos: DVec2,
    pub size: DVec2,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            pos: DVec2::new(x, y),
            size: DVec2::new(w, h),
        }
    }

    /// Rectangle of the given size centered on `center`.
    pub fn centered(center: Position, w: f64, h: f64) -> Self {
        Self {
            pos: center.0 - DVec2::new(w / 2.0, h / 2.0),
            size: DVec2::new(w, h),
        }
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.pos.x < other.pos.x + other.size.x
            && other.pos.x < self.pos.x + self.size.x
            && self.pos.y < other.pos.y + other.size.y
            && other.pos.y < self.pos.y + self.size.y
    }

    pub fn contains(&self, point: Position) -> bool {
        point.0.x >= self.pos.x
            && point.0.x < self.pos.x + self.size.x
            && point.0.y >= self.pos.y
            && point.0.y < self.pos.y + self.size.y
    }
}

/// Visual marker for an internal edge that is open in exactly one
/// direction. Consumed by the renderer; no effect on simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneWayWall {
    pub orientation: crate::enums::WallOrientation,
    /// The cell on the west/north side of the edge.
    pub cell: GridPos,
    /// The direction travel is permitted in.
    pub open_toward: Direction,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each active tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per tick at the fixed tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}
