//! Enemy system: retargeting, A* path following, and collision
//! resolution against the base and the player.
//!
//! Entities are collected up front and removed through the despawn
//! buffer after the pass, so iteration never skips an element.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use defender_core::components::{Enemy, EnemyAgent, Health, Player, PlayerState};
use defender_core::constants::{
    BASE_HIT_RADIUS, BASE_HIT_SCORE_PENALTY, ENEMY_SPEED, INVINCIBLE_KILL_SCORE,
    PLAYER_HIT_RADIUS, PLAYER_HIT_SCORE_PENALTY, SLOW_TICKS,
};
use defender_core::enums::EnemyBehavior;
use defender_core::events::GameEvent;
use defender_core::types::Position;
use defender_maze::{find_path, Maze};

use crate::session::SessionState;

/// Run the enemy system over every live enemy.
pub fn run(
    world: &mut World,
    maze: &Maze,
    session: &mut SessionState,
    rng: &mut ChaCha8Rng,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<GameEvent>,
) {
    let player = {
        let mut query = world.query::<(&Player, &Position)>();
        query.iter().next().map(|(entity, (_, pos))| (entity, *pos))
    };

    let enemies: Vec<Entity> = {
        let mut query = world.query::<&Enemy>();
        query.iter().map(|(entity, _)| entity).collect()
    };

    for entity in enemies {
        retarget(world, maze, player.map(|(_, pos)| pos), rng, entity);

        // Freeze halts movement only; pathing above and collisions
        // below still run.
        if !session.freeze_active() {
            step_along_path(world, entity);
        }

        resolve_collisions(world, maze, session, player, entity, despawn_buffer, events);
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Recompute the path when the current one is exhausted. The goal
/// depends on behavior: the base, the player's current cell, or a
/// random cell kept until reached. A wander target that proves
/// unreachable (behind a one-way passage) is dropped so the next tick
/// re-rolls instead of stalling.
fn retarget(
    world: &mut World,
    maze: &Maze,
    player_pos: Option<Position>,
    rng: &mut ChaCha8Rng,
    entity: Entity,
) {
    let mut agent = match world.get::<&mut EnemyAgent>(entity) {
        Ok(a) => a,
        Err(_) => return,
    };
    if !agent.path.is_empty() {
        return;
    }
    let cell = match world.get::<&Position>(entity) {
        Ok(pos) => pos.cell(),
        Err(_) => return,
    };

    let goal = match agent.behavior {
        EnemyBehavior::ShortestToBase => maze.base,
        EnemyBehavior::ChasePlayer => player_pos.map(|p| p.cell()).unwrap_or(maze.base),
        EnemyBehavior::RandomWander => match agent.target {
            Some(target) if target != cell => target,
            _ => maze.random_cell(rng),
        },
    };

    agent.path = find_path(cell, goal, &maze.grid).into();
    agent.target = if agent.path.is_empty() {
        None
    } else {
        Some(goal)
    };
}

/// Move toward the next path cell's center, popping it once reached.
fn step_along_path(world: &mut World, entity: Entity) {
    let mut agent = match world.get::<&mut EnemyAgent>(entity) {
        Ok(a) => a,
        Err(_) => return,
    };
    let mut pos = match world.get::<&mut Position>(entity) {
        Ok(p) => p,
        Err(_) => return,
    };

    if let Some(&next) = agent.path.front() {
        let (stepped, arrived) = pos.step_toward(next.center(), ENEMY_SPEED);
        *pos = stepped;
        if arrived {
            agent.path.pop_front();
        }
    }
}

/// Base contact first, then player contact. Every resolution that
/// destroys the enemy goes through the despawn buffer.
fn resolve_collisions(
    world: &mut World,
    maze: &Maze,
    session: &mut SessionState,
    player: Option<(Entity, Position)>,
    entity: Entity,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<GameEvent>,
) {
    let pos = match world.get::<&Position>(entity) {
        Ok(p) => *p,
        Err(_) => return,
    };

    // An enemy reaching the base damages it by its remaining hit points.
    if pos.distance_to(maze.base.center()) <= BASE_HIT_RADIUS {
        let damage = world
            .get::<&Health>(entity)
            .map(|h| h.hit_points.max(0))
            .unwrap_or(0);
        session.base_health -= damage;
        session.score -= session.score.min(BASE_HIT_SCORE_PENALTY);
        session.destroyed += 1;
        despawn_buffer.push(entity);
        events.push(GameEvent::BaseDamaged { amount: damage });
        events.push(GameEvent::EnemyDestroyed);
        return;
    }

    let (player_entity, player_pos) = match player {
        Some(p) => p,
        None => return,
    };
    if pos.distance_to(player_pos) > PLAYER_HIT_RADIUS {
        return;
    }

    let mut state = match world.get::<&mut PlayerState>(player_entity) {
        Ok(s) => s,
        Err(_) => return,
    };

    if state.invincible() {
        // Contact while invincible destroys the enemy for points.
        session.score += INVINCIBLE_KILL_SCORE;
        session.destroyed += 1;
        despawn_buffer.push(entity);
        events.push(GameEvent::EnemyDestroyed);
    } else if state.resources > 0 {
        // Robbery: the enemy takes a cut of resources and score, then
        // leaves the field.
        let stolen = (state.resources / 4).max(1);
        state.resources -= stolen;
        session.score -= session.score.min(PLAYER_HIT_SCORE_PENALTY);
        session.destroyed += 1;
        despawn_buffer.push(entity);
        events.push(GameEvent::EnemyDestroyed);
    } else {
        // Nothing to steal: the enemy survives and the player is slowed.
        // Refreshing the timer keeps the penalty from compounding on
        // repeated contact.
        state.slow_timer = SLOW_TICKS;
    }
}
