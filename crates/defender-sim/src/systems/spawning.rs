//! Spawn scheduling: the per-wave grace period and enemy spawn cadence.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use defender_core::events::GameEvent;
use defender_maze::Maze;

use crate::session::SessionState;
use crate::world_setup;

/// Count the wave timer down, then spawn enemies on the wave's interval
/// until the quota is met.
pub fn run(
    world: &mut World,
    maze: &Maze,
    session: &mut SessionState,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
) {
    if session.wave_timer > 0 {
        session.wave_timer -= 1;
        return;
    }
    if session.spawned >= session.total {
        return;
    }
    if session.spawn_timer > 0 {
        session.spawn_timer -= 1;
        return;
    }

    let (_entity, cell) = world_setup::spawn_enemy(world, maze, rng, session.wave_number);
    session.spawned += 1;
    session.spawn_timer = session.spawn_interval_ticks();
    events.push(GameEvent::EnemySpawned { cell });
}
