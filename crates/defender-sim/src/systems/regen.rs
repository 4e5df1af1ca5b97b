//! Pellet and power-up regeneration on fixed intervals.

use std::collections::HashSet;

use hecs::World;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use defender_core::components::Tower;
use defender_core::constants::{PELLET_REGEN_TICKS, POWERUP_REGEN_TICKS};
use defender_core::types::GridPos;
use defender_maze::Maze;

use crate::session::SessionState;

/// Place one pellet every 10 s and one power-up every 60 s on a random
/// empty cell. When no cell is eligible the timer stays expired and the
/// placement is retried next tick.
pub fn run(world: &World, maze: &mut Maze, session: &mut SessionState, rng: &mut ChaCha8Rng) {
    if session.pellet_regen_timer > 0 {
        session.pellet_regen_timer -= 1;
    }
    if session.pellet_regen_timer == 0 {
        if let Some(cell) = random_empty_cell(world, maze, rng) {
            maze.pellets.push(cell);
            session.pellet_regen_timer = PELLET_REGEN_TICKS;
        }
    }

    if session.powerup_regen_timer > 0 {
        session.powerup_regen_timer -= 1;
    }
    if session.powerup_regen_timer == 0 {
        if let Some(cell) = random_empty_cell(world, maze, rng) {
            maze.powerups.push(cell);
            session.powerup_regen_timer = POWERUP_REGEN_TICKS;
        }
    }
}

/// A uniformly random cell holding no spawn point, base, pellet,
/// power-up, or tower.
fn random_empty_cell(world: &World, maze: &Maze, rng: &mut ChaCha8Rng) -> Option<GridPos> {
    let towers: HashSet<GridPos> = {
        let mut query = world.query::<&Tower>();
        query.iter().map(|(_, tower)| tower.cell).collect()
    };

    let eligible: Vec<GridPos> = maze
        .grid
        .positions()
        .filter(|cell| maze.cell_unoccupied(*cell) && !towers.contains(cell))
        .collect();
    eligible.choose(rng).copied()
}
