//! Player system: movement, the build/upgrade action, and pickups.

use hecs::World;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use defender_core::commands::InputState;
use defender_core::components::{Player, PlayerState, Tower};
use defender_core::constants::{
    BUILD_COOLDOWN_TICKS, FREEZE_TICKS, INVINCIBILITY_TICKS, PELLET_SCORE, PLAYER_SIZE,
    PLAYER_SPEED, SPEED_BOOST_TICKS, TOWER_BOOST_TICKS, TOWER_COST, TOWER_MAX_LEVEL,
};
use defender_core::enums::{Direction, PowerUpEffect};
use defender_core::events::GameEvent;
use defender_core::types::{Position, Rect};
use defender_maze::Maze;

use crate::session::SessionState;
use crate::world_setup;

/// Run the player system: move, build, collect, tick local timers.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    maze: &mut Maze,
    session: &mut SessionState,
    input: InputState,
    tick: u64,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
) {
    let player = {
        let mut query = world.query::<(&Player, &Position)>();
        match query.iter().next() {
            Some((entity, _)) => entity,
            None => return,
        }
    };

    apply_movement(world, maze, player, input);
    if input.build {
        try_build(world, maze, player, tick, events);
    }
    collect_pickups(world, maze, session, player, rng, events);

    if let Ok(mut state) = world.get::<&mut PlayerState>(player) {
        state.tick_timers();
    }
}

/// One active movement axis, priority left, right, up, down. The move
/// is rejected outright when the player's body would overlap a wall —
/// no sliding along it.
fn apply_movement(world: &mut World, maze: &Maze, player: hecs::Entity, input: InputState) {
    let direction = if input.left {
        Some(Direction::West)
    } else if input.right {
        Some(Direction::East)
    } else if input.up {
        Some(Direction::North)
    } else if input.down {
        Some(Direction::South)
    } else {
        None
    };

    let mut state = match world.get::<&mut PlayerState>(player) {
        Ok(s) => s,
        Err(_) => return,
    };
    let mut pos = match world.get::<&mut Position>(player) {
        Ok(p) => p,
        Err(_) => return,
    };

    match direction {
        Some(dir) => {
            state.facing = dir;
            state.moving = true;

            let step = PLAYER_SPEED * state.speed_factor();
            let (dx, dy) = dir.offset();
            let candidate = Position::new(pos.0.x + dx as f64 * step, pos.0.y + dy as f64 * step);
            let body = Rect::centered(candidate, PLAYER_SIZE, PLAYER_SIZE);

            if !maze.walls.iter().any(|wall| body.intersects(wall)) {
                *pos = candidate;
            }
        }
        None => state.moving = false,
    }
}

/// The build action, rate-limited to one per cooldown window. Upgrades
/// the tower under the player when one exists (cost = current level),
/// otherwise places a new tower (cost 5) on a free cell. Every
/// ineligible case is a silent no-op.
fn try_build(
    world: &mut World,
    maze: &Maze,
    player: hecs::Entity,
    tick: u64,
    events: &mut Vec<GameEvent>,
) {
    let (cell, resources) = {
        let state = match world.get::<&PlayerState>(player) {
            Ok(s) => s,
            Err(_) => return,
        };
        if let Some(last) = state.last_build_tick {
            if tick.saturating_sub(last) < BUILD_COOLDOWN_TICKS {
                return;
            }
        }
        let pos = match world.get::<&Position>(player) {
            Ok(p) => *p,
            Err(_) => return,
        };
        (pos.cell(), state.resources)
    };

    let existing = {
        let mut query = world.query::<&Tower>();
        query
            .iter()
            .find(|(_, tower)| tower.cell == cell)
            .map(|(entity, tower)| (entity, tower.level))
    };

    let cost = match existing {
        Some((tower_entity, level)) => {
            if level >= TOWER_MAX_LEVEL || resources < level {
                return;
            }
            if let Ok(mut tower) = world.get::<&mut Tower>(tower_entity) {
                tower.upgrade();
            }
            events.push(GameEvent::TowerUpgraded {
                cell,
                level: level + 1,
            });
            level
        }
        None => {
            if resources < TOWER_COST || !maze.cell_unoccupied(cell) {
                return;
            }
            world_setup::spawn_tower(world, cell);
            events.push(GameEvent::TowerBuilt { cell });
            TOWER_COST
        }
    };

    if let Ok(mut state) = world.get::<&mut PlayerState>(player) {
        state.resources -= cost;
        state.last_build_tick = Some(tick);
    }
}

/// Pick up pellets and power-ups whose cell centers fall inside the
/// player's body rect. Power-ups grant one of the four effects uniformly
/// at random.
fn collect_pickups(
    world: &mut World,
    maze: &mut Maze,
    session: &mut SessionState,
    player: hecs::Entity,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
) {
    let body = {
        let pos = match world.get::<&Position>(player) {
            Ok(p) => *p,
            Err(_) => return,
        };
        Rect::centered(pos, PLAYER_SIZE, PLAYER_SIZE)
    };

    let mut pellets = Vec::new();
    maze.pellets.retain(|&cell| {
        if body.contains(cell.center()) {
            pellets.push(cell);
            false
        } else {
            true
        }
    });
    for cell in pellets {
        if let Ok(mut state) = world.get::<&mut PlayerState>(player) {
            state.resources += 1;
        }
        session.score += PELLET_SCORE;
        events.push(GameEvent::PelletCollected { cell });
    }

    let mut powerups = 0;
    maze.powerups.retain(|&cell| {
        if body.contains(cell.center()) {
            powerups += 1;
            false
        } else {
            true
        }
    });
    for _ in 0..powerups {
        if let Some(&effect) = PowerUpEffect::ALL.choose(rng) {
            apply_effect(world, session, player, effect);
            events.push(GameEvent::PowerUpCollected { effect });
        }
    }
}

fn apply_effect(
    world: &mut World,
    session: &mut SessionState,
    player: hecs::Entity,
    effect: PowerUpEffect,
) {
    match effect {
        PowerUpEffect::SpeedBoost => {
            if let Ok(mut state) = world.get::<&mut PlayerState>(player) {
                state.speed_boost_timer = SPEED_BOOST_TICKS;
            }
        }
        PowerUpEffect::Invincibility => {
            if let Ok(mut state) = world.get::<&mut PlayerState>(player) {
                state.invincibility_timer = INVINCIBILITY_TICKS;
            }
        }
        PowerUpEffect::TowerBoost => session.tower_boost_timer = TOWER_BOOST_TICKS,
        PowerUpEffect::Freeze => session.freeze_timer = FREEZE_TICKS,
    }
}
