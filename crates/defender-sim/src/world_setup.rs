//! Entity spawn factories for setting up the simulation world.

use hecs::World;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use defender_core::components::{Enemy, EnemyAgent, Health, Player, PlayerState, Tower};
use defender_core::enums::EnemyBehavior;
use defender_core::types::{GridPos, Position};
use defender_maze::Maze;

use crate::components::Projectile;

/// Spawn the player at the center cell of the maze.
pub fn spawn_player(world: &mut World, maze: &Maze) -> hecs::Entity {
    let center = GridPos::new(maze.width() as i32 / 2, maze.height() as i32 / 2);
    world.spawn((Player, PlayerState::new(), center.center()))
}

/// Spawn one enemy at a random spawn point with a random behavior.
/// Hit points equal the wave number, so later waves take more shots.
pub fn spawn_enemy(
    world: &mut World,
    maze: &Maze,
    rng: &mut ChaCha8Rng,
    wave: u32,
) -> (hecs::Entity, GridPos) {
    let behavior = *EnemyBehavior::ALL
        .choose(rng)
        .unwrap_or(&EnemyBehavior::ShortestToBase);
    let cell = *maze.spawn_points.choose(rng).unwrap_or(&maze.base);

    let entity = world.spawn((
        Enemy,
        cell.center(),
        EnemyAgent::new(behavior),
        Health::new(wave.max(1) as i32),
    ));
    (entity, cell)
}

/// Spawn a level-1 tower on the given cell.
pub fn spawn_tower(world: &mut World, cell: GridPos) -> hecs::Entity {
    world.spawn((Tower::new(cell),))
}

/// Spawn a projectile at `origin` homing toward `target`.
pub fn spawn_projectile(
    world: &mut World,
    origin: Position,
    target: hecs::Entity,
    damage: i32,
) -> hecs::Entity {
    world.spawn((Projectile { target, damage }, origin))
}

/// Spawn an enemy at an exact cell with explicit behavior and hit points,
/// bypassing the wave scheduler (for tests).
#[cfg(test)]
pub fn spawn_enemy_at(
    world: &mut World,
    cell: GridPos,
    behavior: EnemyBehavior,
    hit_points: i32,
) -> hecs::Entity {
    world.spawn((
        Enemy,
        cell.center(),
        EnemyAgent::new(behavior),
        Health::new(hit_points),
    ))
}
