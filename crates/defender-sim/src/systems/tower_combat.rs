//! Tower system: cooldown gating, target selection, and firing.

use hecs::{Entity, World};

use defender_core::components::{Enemy, Tower};
use defender_core::constants::DT;
use defender_core::events::GameEvent;
use defender_core::types::Position;
use defender_maze::Maze;

use crate::session::SessionState;
use crate::world_setup;

/// Fire every tower whose cooldown has elapsed at the in-range enemy
/// nearest the base. Damage is the tower's level at fire time.
pub fn run(
    world: &mut World,
    maze: &Maze,
    session: &SessionState,
    tick: u64,
    events: &mut Vec<GameEvent>,
) {
    let range_factor = session.tower_range_factor();

    let ready: Vec<(Entity, Position, f64, i32)> = {
        let mut query = world.query::<&Tower>();
        query
            .iter()
            .filter(|(_, tower)| cooldown_elapsed(tower, tick))
            .map(|(entity, tower)| {
                (
                    entity,
                    tower.cell.center(),
                    tower.base_range() * range_factor,
                    tower.damage(),
                )
            })
            .collect()
    };

    let base_center = maze.base.center();

    for (tower_entity, muzzle, range, damage) in ready {
        let target = {
            let mut query = world.query::<(&Enemy, &Position)>();
            query
                .iter()
                .filter(|(_, (_, pos))| muzzle.distance_to(**pos) <= range)
                .min_by(|(_, (_, a)), (_, (_, b))| {
                    a.distance_to(base_center).total_cmp(&b.distance_to(base_center))
                })
                .map(|(entity, _)| entity)
        };

        if let Some(enemy) = target {
            world_setup::spawn_projectile(world, muzzle, enemy, damage);
            if let Ok(mut tower) = world.get::<&mut Tower>(tower_entity) {
                tower.last_shot_tick = Some(tick);
                events.push(GameEvent::ProjectileFired { cell: tower.cell });
            }
        }
    }
}

/// A never-fired tower may fire immediately; otherwise the per-level
/// cooldown must have elapsed since the last shot.
fn cooldown_elapsed(tower: &Tower, tick: u64) -> bool {
    match tower.last_shot_tick {
        None => true,
        Some(last) => tick.saturating_sub(last) as f64 * DT >= tower.cooldown_secs(),
    }
}
