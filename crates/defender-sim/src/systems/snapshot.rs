//! Snapshot system: queries the ECS world and builds a complete
//! GameStateSnapshot.
//!
//! This system is read-only — it never modifies the world.

use hecs::World;

use defender_core::components::{Enemy, EnemyAgent, Health, Player, PlayerState, Tower};
use defender_core::config::GameConfig;
use defender_core::constants::DT;
use defender_core::enums::GameMode;
use defender_core::events::GameEvent;
use defender_core::state::*;
use defender_core::types::{Position, SimTime};
use defender_maze::Maze;

use crate::components::Projectile;
use crate::session::SessionState;

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    maze: Option<&Maze>,
    time: &SimTime,
    mode: GameMode,
    config: &GameConfig,
    session: &SessionState,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        mode,
        config: *config,
        maze: maze.map(build_maze),
        player: build_player(world),
        enemies: build_enemies(world),
        towers: build_towers(world, session, time.tick),
        projectiles: build_projectiles(world),
        session: build_session(session),
        events,
    }
}

fn build_maze(maze: &Maze) -> MazeView {
    MazeView {
        width: maze.width(),
        height: maze.height(),
        spawn_points: maze.spawn_points.clone(),
        base: maze.base,
        pellets: maze.pellets.clone(),
        powerups: maze.powerups.clone(),
        walls: maze.walls.clone(),
        one_way_walls: maze.one_way_walls.clone(),
    }
}

fn build_player(world: &World) -> Option<PlayerView> {
    world
        .query::<(&Player, &PlayerState, &Position)>()
        .iter()
        .next()
        .map(|(_, (_, state, pos))| PlayerView {
            position: *pos,
            facing: state.facing,
            moving: state.moving,
            resources: state.resources,
            invincible: state.invincible(),
            speed_boost_remaining_secs: state.speed_boost_timer as f64 * DT,
            slow_remaining_secs: state.slow_timer as f64 * DT,
        })
}

/// Build EnemyView list, sorted by entity for stable output.
fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<(hecs::Entity, EnemyView)> = world
        .query::<(&Enemy, &EnemyAgent, &Position, &Health)>()
        .iter()
        .map(|(entity, (_, agent, pos, health))| {
            (
                entity,
                EnemyView {
                    position: *pos,
                    behavior: agent.behavior,
                    health_ratio: health.ratio(),
                },
            )
        })
        .collect();

    enemies.sort_by_key(|(entity, _)| entity.to_bits());
    enemies.into_iter().map(|(_, view)| view).collect()
}

/// Build TowerView list, sorted by cell.
fn build_towers(world: &World, session: &SessionState, tick: u64) -> Vec<TowerView> {
    let range_factor = session.tower_range_factor();

    let mut towers: Vec<TowerView> = world
        .query::<&Tower>()
        .iter()
        .map(|(_, tower)| TowerView {
            cell: tower.cell,
            level: tower.level,
            range: tower.base_range() * range_factor,
            cooldown_ratio: cooldown_ratio(tower, tick),
        })
        .collect();

    towers.sort_by_key(|t| (t.cell.y, t.cell.x));
    towers
}

/// Fraction of the cooldown elapsed; 1.0 means ready to fire.
fn cooldown_ratio(tower: &Tower, tick: u64) -> f64 {
    match tower.last_shot_tick {
        None => 1.0,
        Some(last) => {
            let elapsed = tick.saturating_sub(last) as f64 * DT;
            (elapsed / tower.cooldown_secs()).min(1.0)
        }
    }
}

/// Build ProjectileView list, sorted by entity for stable output.
fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<(hecs::Entity, ProjectileView)> = world
        .query::<(&Projectile, &Position)>()
        .iter()
        .map(|(entity, (proj, pos))| {
            let target_position = world.get::<&Position>(proj.target).ok().map(|p| *p);
            (
                entity,
                ProjectileView {
                    position: *pos,
                    target_position,
                },
            )
        })
        .collect();

    projectiles.sort_by_key(|(entity, _)| entity.to_bits());
    projectiles.into_iter().map(|(_, view)| view).collect()
}

fn build_session(session: &SessionState) -> SessionView {
    SessionView {
        wave_number: session.wave_number,
        base_health: session.base_health,
        score: session.score,
        spawned_enemies: session.spawned,
        destroyed_enemies: session.destroyed,
        total_enemies: session.total,
        wave_timer_secs: session.wave_timer as f64 * DT,
        tower_boost_remaining_secs: session.tower_boost_timer as f64 * DT,
        freeze_remaining_secs: session.freeze_timer as f64 * DT,
    }
}
