//! The complete per-session maze.

use rand::seq::SliceRandom;
use rand::Rng;

use defender_core::constants::{PELLET_PROB, POWERUP_COUNT};
use defender_core::types::{GridPos, OneWayWall, Rect};

use crate::grid::Grid;
use crate::walls;

/// A fully generated maze. Geometry is immutable after construction;
/// pellets and power-ups mutate over the session (consumed by the
/// player, regenerated by the game loop).
#[derive(Debug, Clone)]
pub struct Maze {
    pub grid: Grid,
    /// Distinct cells on the west edge enemies spawn from.
    pub spawn_points: Vec<GridPos>,
    /// The defended cell on the east edge.
    pub base: GridPos,
    pub pellets: Vec<GridPos>,
    pub powerups: Vec<GridPos>,
    pub walls: Vec<Rect>,
    pub one_way_walls: Vec<OneWayWall>,
}

impl Maze {
    /// Generate a maze: DFS carving, dead-end reduction, then placements
    /// and derived wall geometry.
    ///
    /// When `height` is smaller than `spawn_count`, fewer spawns are
    /// placed rather than erroring.
    pub fn generate<R: Rng>(width: u32, height: u32, spawn_count: u32, rng: &mut R) -> Self {
        let mut grid = Grid::closed(width, height);
        grid.carve(rng);
        grid.reduce_dead_ends(rng);

        let spawn_points = place_spawns(&grid, spawn_count, rng);
        let base = place_base(&grid, rng);
        let pellets = place_pellets(&grid, &spawn_points, base, rng);
        let powerups = place_powerups(&grid, &spawn_points, base, &pellets, rng);

        let walls = walls::wall_rects(&grid);
        let one_way_walls = walls::one_way_walls(&grid);

        Self {
            grid,
            spawn_points,
            base,
            pellets,
            powerups,
            walls,
            one_way_walls,
        }
    }

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    /// A uniformly random cell, for wandering enemies.
    pub fn random_cell<R: Rng>(&self, rng: &mut R) -> GridPos {
        GridPos::new(
            rng.gen_range(0..self.width() as i32),
            rng.gen_range(0..self.height() as i32),
        )
    }

    /// Whether the cell holds no spawn point, base, pellet, or power-up.
    /// Tower occupancy is tracked by the simulation, not the maze.
    pub fn cell_unoccupied(&self, cell: GridPos) -> bool {
        !self.spawn_points.contains(&cell)
            && self.base != cell
            && !self.pellets.contains(&cell)
            && !self.powerups.contains(&cell)
    }
}

/// Sample distinct west-edge cells, clamped to the column height.
fn place_spawns<R: Rng>(grid: &Grid, requested: u32, rng: &mut R) -> Vec<GridPos> {
    let mut edge: Vec<GridPos> = (0..grid.height() as i32)
        .map(|y| GridPos::new(0, y))
        .collect();
    edge.shuffle(rng);
    edge.truncate(requested.min(grid.height()) as usize);
    edge
}

/// A random east-edge cell.
fn place_base<R: Rng>(grid: &Grid, rng: &mut R) -> GridPos {
    GridPos::new(
        grid.width() as i32 - 1,
        rng.gen_range(0..grid.height() as i32),
    )
}

/// Each non-spawn, non-base cell independently becomes a pellet.
fn place_pellets<R: Rng>(
    grid: &Grid,
    spawns: &[GridPos],
    base: GridPos,
    rng: &mut R,
) -> Vec<GridPos> {
    grid.positions()
        .filter(|&pos| pos != base && !spawns.contains(&pos) && rng.gen_bool(PELLET_PROB))
        .collect()
}

/// A fixed count of power-ups sampled from the free cells. A grid with
/// fewer free cells than the count gets them all.
fn place_powerups<R: Rng>(
    grid: &Grid,
    spawns: &[GridPos],
    base: GridPos,
    pellets: &[GridPos],
    rng: &mut R,
) -> Vec<GridPos> {
    let eligible: Vec<GridPos> = grid
        .positions()
        .filter(|&cell| cell != base && !spawns.contains(&cell) && !pellets.contains(&cell))
        .collect();
    eligible
        .choose_multiple(rng, POWERUP_COUNT)
        .copied()
        .collect()
}
