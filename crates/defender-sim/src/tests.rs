//! Tests for the simulation engine: command handling, the tick pipeline,
//! combat resolution, and determinism.

use defender_core::commands::{InputState, PlayerCommand};
use defender_core::components::{EnemyAgent, PlayerState, Tower};
use defender_core::config::GameConfig;
use defender_core::constants::*;
use defender_core::enums::{EnemyBehavior, GameMode};
use defender_core::events::GameEvent;

use crate::components::Projectile;
use crate::engine::{SimConfig, SimulationEngine};
use crate::world_setup;

/// Engine one tick into a fresh session, normalized so a pickup that
/// happened to sit under the player's spawn cell cannot skew exact
/// score/resource assertions.
fn started_engine(seed: u64) -> SimulationEngine {
    let mut engine = SimulationEngine::new(SimConfig {
        seed,
        ..Default::default()
    });
    engine.queue_command(PlayerCommand::StartGame);
    engine.tick();

    engine.clear_pickups();
    engine.session_mut().score = 0;
    engine.session_mut().tower_boost_timer = 0;
    engine.session_mut().freeze_timer = 0;
    for (_, state) in engine.world_mut().query_mut::<&mut PlayerState>() {
        state.resources = 0;
        state.speed_boost_timer = 0;
        state.invincibility_timer = 0;
    }
    engine
}

/// Stop the spawn scheduler and the wave-completion check from
/// interfering with a hand-built scenario.
fn hold_wave(engine: &mut SimulationEngine) {
    engine.session_mut().wave_timer = 1_000_000;
    let total = engine.session().total;
    engine.session_mut().spawned = total;
}

fn enemy_count(engine: &SimulationEngine) -> usize {
    let mut query = engine.world().query::<&defender_core::components::Enemy>();
    query.iter().count()
}

fn projectile_count(engine: &SimulationEngine) -> usize {
    let mut query = engine.world().query::<&Projectile>();
    query.iter().count()
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });

    engine_a.queue_command(PlayerCommand::StartGame);
    engine_b.queue_command(PlayerCommand::StartGame);

    // Long enough to cover the wave grace period and real spawns.
    for _ in 0..800 {
        let snap_a = engine_a.tick();
        let snap_b = engine_b.tick();

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 111,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 222,
        ..Default::default()
    });

    engine_a.queue_command(PlayerCommand::StartGame);
    engine_b.queue_command(PlayerCommand::StartGame);

    // Maze generation draws from the seed, so the very first live
    // snapshots should already differ.
    let mut diverged = false;
    for _ in 0..10 {
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        if json_a != json_b {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "different seeds should produce divergent output");
}

// ---- Mode transitions ----

#[test]
fn test_menu_time_frozen() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    for _ in 0..10 {
        let snap = engine.tick();
        assert_eq!(snap.mode, GameMode::Menu);
        assert!(snap.maze.is_none());
    }
    assert_eq!(engine.time().tick, 0);
}

#[test]
fn test_start_game_builds_session() {
    let mut engine = started_engine(7);
    let snap = engine.tick();

    assert_eq!(snap.mode, GameMode::Playing);
    let maze = snap.maze.expect("live session has a maze");
    assert_eq!(maze.width, 20);
    assert_eq!(maze.height, 15);
    assert!(snap.player.is_some());
    assert_eq!(snap.session.wave_number, 1);
    assert_eq!(snap.session.base_health, BASE_HEALTH_START);
    assert_eq!(snap.session.total_enemies, 10);
}

#[test]
fn test_end_game_and_return_to_menu() {
    let mut engine = started_engine(7);

    engine.queue_command(PlayerCommand::EndGame);
    let snap = engine.tick();
    assert_eq!(snap.mode, GameMode::GameOver);
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::GameOver { .. })));

    engine.queue_command(PlayerCommand::ReturnToMenu);
    let snap = engine.tick();
    assert_eq!(snap.mode, GameMode::Menu);
    assert!(snap.maze.is_none());
    assert!(snap.player.is_none());
}

#[test]
fn test_configure_only_in_menu() {
    let mut engine = SimulationEngine::new(SimConfig::default());

    let custom = GameConfig {
        maze_width: 12,
        maze_height: 11,
        spawn_count: 1,
        wave_count: 0,
        enemies_per_wave: 3,
    };
    engine.queue_command(PlayerCommand::Configure { config: custom });
    let snap = engine.tick();
    assert_eq!(snap.config, custom);

    // Invalid values leave the previous config in place.
    engine.queue_command(PlayerCommand::Configure {
        config: GameConfig {
            maze_width: 99,
            ..custom
        },
    });
    let snap = engine.tick();
    assert_eq!(snap.config, custom);

    // Configure is ignored once playing.
    engine.queue_command(PlayerCommand::StartGame);
    engine.queue_command(PlayerCommand::Configure {
        config: GameConfig::default(),
    });
    let snap = engine.tick();
    assert_eq!(snap.config, custom);
}

#[test]
fn test_queued_command_batch_applies_in_order() {
    let mut engine = SimulationEngine::new(SimConfig::default());

    let custom = GameConfig {
        maze_width: 12,
        maze_height: 11,
        spawn_count: 1,
        wave_count: 3,
        enemies_per_wave: 4,
    };
    engine.queue_commands([
        PlayerCommand::Configure { config: custom },
        PlayerCommand::StartGame,
    ]);
    let snap = engine.tick();

    // The session must start under the configuration queued before it.
    assert_eq!(snap.mode, GameMode::Playing);
    assert_eq!(snap.config, custom);
    let maze = snap.maze.expect("live session has a maze");
    assert_eq!(maze.width, 12);
    assert_eq!(snap.session.total_enemies, 4);
}

// ---- Tick timing ----

#[test]
fn test_tick_timing_30_ticks_one_second() {
    let mut engine = started_engine(1);
    for _ in 0..29 {
        engine.tick();
    }
    assert_eq!(engine.time().tick, 30);
    assert!((engine.time().elapsed_secs - 1.0).abs() < 1e-10);
}

// ---- Spawning ----

#[test]
fn test_spawn_cadence_follows_wave_interval() {
    let mut engine = started_engine(3);
    engine.clear_pickups();
    engine.session_mut().wave_timer = 0;

    engine.tick();
    assert_eq!(engine.session().spawned, 1, "first spawn is immediate");
    // Wave 1 interval is 4 s.
    assert_eq!(engine.session().spawn_timer, 4 * TICK_RATE);

    engine.tick();
    assert_eq!(engine.session().spawned, 1);

    for _ in 0..125 {
        engine.tick();
    }
    assert!(engine.session().spawned >= 2);
}

#[test]
fn test_wave_timer_delays_spawning() {
    let mut engine = started_engine(3);
    // Grace period is 20 s; nothing spawns during the first 10 ticks.
    for _ in 0..10 {
        let snap = engine.tick();
        assert!(snap.enemies.is_empty());
    }
    assert!(engine.session().wave_timer > 0);
}

// ---- Wave progression ----

#[test]
fn test_wave_clear_advances_and_scores() {
    let mut engine = started_engine(5);
    engine.clear_pickups();
    engine.session_mut().wave_timer = 0;
    let total = engine.session().total;
    engine.session_mut().spawned = total;

    engine.tick();

    let session = engine.session();
    assert_eq!(session.wave_number, 2);
    assert_eq!(session.score, WAVE_CLEAR_SCORE);
    assert_eq!(session.total, total + WAVE_ENEMY_INCREMENT);
    assert_eq!(session.spawned, 0);
    assert_eq!(session.destroyed, 0);
    assert_eq!(session.wave_timer, WAVE_TIMER_TICKS);
}

#[test]
fn test_final_wave_clear_ends_session() {
    let mut engine = started_engine(5);
    engine.clear_pickups();
    engine.session_mut().wave_number = 5; // default wave_count
    engine.session_mut().wave_timer = 0;
    let total = engine.session().total;
    engine.session_mut().spawned = total;

    let snap = engine.tick();
    assert_eq!(snap.mode, GameMode::GameOver);
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::WaveCompleted { wave: 5 })));
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::GameOver { .. })));
}

#[test]
fn test_game_over_when_base_falls() {
    let mut engine = started_engine(5);
    engine.session_mut().base_health = 0;

    let snap = engine.tick();
    assert_eq!(snap.mode, GameMode::GameOver);

    // Mode is terminal until ReturnToMenu.
    let snap = engine.tick();
    assert_eq!(snap.mode, GameMode::GameOver);
}

// ---- Enemies ----

#[test]
fn test_shortest_to_base_enemy_damages_base() {
    let mut engine = started_engine(9);
    engine.clear_pickups();
    hold_wave(&mut engine);

    let spawn = engine.maze().unwrap().spawn_points[0];
    engine.spawn_test_enemy(spawn, EnemyBehavior::ShortestToBase, 3);

    // Worst case: every cell of a 20x15 maze at 0.75 tiles/s.
    let mut hit = false;
    for _ in 0..20_000 {
        engine.tick();
        if engine.session().base_health < BASE_HEALTH_START {
            hit = true;
            break;
        }
    }
    assert!(hit, "enemy never reached the base");
    assert_eq!(engine.session().base_health, BASE_HEALTH_START - 3);
    assert_eq!(engine.session().destroyed, 1);
    assert_eq!(enemy_count(&engine), 0);
}

#[test]
fn test_base_hit_takes_score_and_health() {
    let mut engine = started_engine(9);
    engine.clear_pickups();
    hold_wave(&mut engine);
    engine.session_mut().score = 100;

    let base = engine.maze().unwrap().base;
    engine.spawn_test_enemy(base, EnemyBehavior::ShortestToBase, 4);

    let snap = engine.tick();
    assert_eq!(engine.session().base_health, BASE_HEALTH_START - 4);
    assert_eq!(engine.session().score, 100 - BASE_HIT_SCORE_PENALTY);
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::BaseDamaged { amount: 4 })));
}

#[test]
fn test_freeze_halts_enemy_movement() {
    let mut engine = started_engine(9);
    engine.clear_pickups();
    hold_wave(&mut engine);
    engine.session_mut().freeze_timer = 1_000;

    let spawn = engine.maze().unwrap().spawn_points[0];
    engine.spawn_test_enemy(spawn, EnemyBehavior::ShortestToBase, 1);

    let before = engine.tick().enemies[0].position;
    for _ in 0..10 {
        engine.tick();
    }
    let after = engine.tick().enemies[0].position;
    assert_eq!(before, after, "frozen enemy moved");
}

#[test]
fn test_invincible_contact_destroys_enemy() {
    let mut engine = started_engine(9);
    engine.clear_pickups();
    hold_wave(&mut engine);

    for (_, state) in engine.world_mut().query_mut::<&mut PlayerState>() {
        state.invincibility_timer = 1_000;
    }
    let player_cell = {
        let snap = engine.tick();
        snap.player.unwrap().position.cell()
    };
    engine.spawn_test_enemy(player_cell, EnemyBehavior::ChasePlayer, 2);

    engine.tick();
    assert_eq!(enemy_count(&engine), 0);
    assert_eq!(engine.session().score, INVINCIBLE_KILL_SCORE);
    assert_eq!(engine.session().destroyed, 1);
}

#[test]
fn test_robbery_takes_resources_and_enemy_leaves() {
    let mut engine = started_engine(9);
    engine.clear_pickups();
    hold_wave(&mut engine);
    engine.grant_resources(8);

    let player_cell = {
        let snap = engine.tick();
        snap.player.unwrap().position.cell()
    };
    engine.spawn_test_enemy(player_cell, EnemyBehavior::ChasePlayer, 2);

    let snap = engine.tick();
    assert_eq!(enemy_count(&engine), 0);
    // Steals max(1, resources / 4) = 2.
    assert_eq!(snap.player.unwrap().resources, 6);
    assert_eq!(engine.session().destroyed, 1);
}

#[test]
fn test_contact_with_broke_player_slows_not_kills() {
    let mut engine = started_engine(9);
    engine.clear_pickups();
    hold_wave(&mut engine);

    let player_cell = {
        let snap = engine.tick();
        snap.player.unwrap().position.cell()
    };
    engine.spawn_test_enemy(player_cell, EnemyBehavior::ChasePlayer, 2);

    for _ in 0..10 {
        engine.tick();
    }
    let snap = engine.tick();
    assert_eq!(enemy_count(&engine), 1, "enemy must survive the contact");
    assert!(snap.player.unwrap().slow_remaining_secs > 0.0);
}

#[test]
fn test_wanderer_keeps_target_until_reached() {
    let mut engine = started_engine(21);
    engine.clear_pickups();
    hold_wave(&mut engine);
    // Freeze pins the enemy in place; retargeting still runs.
    engine.session_mut().freeze_timer = 10_000;

    let spawn = engine.maze().unwrap().spawn_points[0];
    let enemy = engine.spawn_test_enemy(spawn, EnemyBehavior::RandomWander, 1);
    let goal = engine.maze().unwrap().base;

    // An unreached target survives a path recompute.
    {
        let mut agent = engine.world_mut().get::<&mut EnemyAgent>(enemy).unwrap();
        agent.target = Some(goal);
        agent.path.clear();
    }
    engine.tick();
    {
        let agent = engine.world().get::<&EnemyAgent>(enemy).unwrap();
        assert_eq!(agent.target, Some(goal), "unreached target was re-rolled");
        assert_eq!(agent.path.back().copied(), Some(goal));
    }

    // A reached target is dropped and re-rolled.
    {
        let mut agent = engine.world_mut().get::<&mut EnemyAgent>(enemy).unwrap();
        agent.target = Some(spawn);
        agent.path.clear();
    }
    engine.tick();
    let agent = engine.world().get::<&EnemyAgent>(enemy).unwrap();
    assert_ne!(agent.target, Some(spawn));
}

// ---- Building ----

#[test]
fn test_build_tower_costs_five() {
    let mut engine = started_engine(11);
    engine.clear_pickups();
    hold_wave(&mut engine);
    engine.grant_resources(7);

    engine.queue_command(PlayerCommand::SetInput {
        input: InputState {
            build: true,
            ..Default::default()
        },
    });
    let snap = engine.tick();

    let towers = {
        let mut query = engine.world().query::<&Tower>();
        query.iter().count()
    };
    assert_eq!(towers, 1);
    assert_eq!(snap.player.unwrap().resources, 2);
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::TowerBuilt { .. })));
}

#[test]
fn test_build_fails_silently_without_resources() {
    let mut engine = started_engine(11);
    engine.clear_pickups();
    hold_wave(&mut engine);

    engine.queue_command(PlayerCommand::SetInput {
        input: InputState {
            build: true,
            ..Default::default()
        },
    });
    for _ in 0..5 {
        engine.tick();
    }
    let towers = {
        let mut query = engine.world().query::<&Tower>();
        query.iter().count()
    };
    assert_eq!(towers, 0);
}

#[test]
fn test_upgrade_costs_current_level_and_rate_limits() {
    let mut engine = started_engine(11);
    engine.clear_pickups();
    hold_wave(&mut engine);
    engine.grant_resources(6);

    engine.queue_command(PlayerCommand::SetInput {
        input: InputState {
            build: true,
            ..Default::default()
        },
    });
    // Build happens on the first tick; the upgrade must wait out the
    // build cooldown even with the key held.
    engine.tick();
    for _ in 0..BUILD_COOLDOWN_TICKS - 1 {
        engine.tick();
        let level = {
            let mut query = engine.world().query::<&Tower>();
            query.iter().next().map(|(_, t)| t.level).unwrap()
        };
        assert_eq!(level, 1);
    }

    let snap = engine.tick();
    let level = {
        let mut query = engine.world().query::<&Tower>();
        query.iter().next().map(|(_, t)| t.level).unwrap()
    };
    assert_eq!(level, 2);
    // 6 - 5 (build) - 1 (upgrade from level 1).
    assert_eq!(snap.player.unwrap().resources, 0);
}

// ---- Towers and projectiles ----

#[test]
fn test_tower_fires_immediately_then_cools_down() {
    let mut engine = started_engine(13);
    engine.clear_pickups();
    hold_wave(&mut engine);
    engine.session_mut().freeze_timer = 10_000;

    let spawn = engine.maze().unwrap().spawn_points[0];
    engine.spawn_test_enemy(spawn, EnemyBehavior::ShortestToBase, 50);
    engine.place_test_tower(spawn.neighbor(defender_core::enums::Direction::East));

    let mut shots = 0;
    for _ in 0..30 {
        let snap = engine.tick();
        shots += snap
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::ProjectileFired { .. }))
            .count();
    }
    // Level-1 cooldown is 6 s, so only the immediate shot fits in 1 s.
    assert_eq!(shots, 1);
}

#[test]
fn test_projectile_kills_enemy_and_scores() {
    let mut engine = started_engine(13);
    engine.clear_pickups();
    hold_wave(&mut engine);
    engine.session_mut().freeze_timer = 10_000;

    let spawn = engine.maze().unwrap().spawn_points[0];
    let enemy = engine.spawn_test_enemy(spawn, EnemyBehavior::ShortestToBase, 1);
    let origin = spawn
        .neighbor(defender_core::enums::Direction::East)
        .center();
    world_setup::spawn_projectile(engine.world_mut(), origin, enemy, 1);

    for _ in 0..30 {
        engine.tick();
    }
    assert_eq!(enemy_count(&engine), 0);
    assert_eq!(projectile_count(&engine), 0);
    assert_eq!(engine.session().score, ENEMY_KILL_SCORE);
    assert_eq!(engine.session().destroyed, 1);
}

#[test]
fn test_projectile_expires_when_target_gone() {
    let mut engine = started_engine(13);
    engine.clear_pickups();
    hold_wave(&mut engine);

    let spawn = engine.maze().unwrap().spawn_points[0];
    let enemy = engine.spawn_test_enemy(spawn, EnemyBehavior::ShortestToBase, 5);
    // Far away, so the projectile could never have reached it anyway.
    let origin = engine.maze().unwrap().base.center();
    world_setup::spawn_projectile(engine.world_mut(), origin, enemy, 1);

    engine.world_mut().despawn(enemy).unwrap();
    engine.tick();

    assert_eq!(projectile_count(&engine), 0);
    assert_eq!(engine.session().score, 0, "expiry must not score");
}

// ---- Movement ----

#[test]
fn test_player_moves_and_stops() {
    let mut engine = started_engine(17);
    engine.clear_pickups();
    hold_wave(&mut engine);

    let start = engine.tick().player.unwrap().position;
    engine.queue_command(PlayerCommand::SetInput {
        input: InputState {
            right: true,
            ..Default::default()
        },
    });
    let snap = engine.tick();
    let player = snap.player.unwrap();
    assert!(player.moving);
    assert!(player.position.0.x > start.0.x);

    engine.queue_command(PlayerCommand::SetInput {
        input: InputState::default(),
    });
    let snap = engine.tick();
    assert!(!snap.player.unwrap().moving);
}

#[test]
fn test_walls_block_player() {
    let mut engine = started_engine(17);
    engine.clear_pickups();
    hold_wave(&mut engine);

    // Hold one direction long enough to cross the whole maze; the
    // player must end up still inside the outer boundary.
    engine.queue_command(PlayerCommand::SetInput {
        input: InputState {
            left: true,
            ..Default::default()
        },
    });
    for _ in 0..2_000 {
        engine.tick();
    }
    let snap = engine.tick();
    let pos = snap.player.unwrap().position;
    assert!(pos.0.x > 0.0);
    let width_px = engine.maze().unwrap().width() as f64 * TILE_SIZE;
    assert!(pos.0.x < width_px);
}

// ---- Regeneration ----

#[test]
fn test_pellet_regenerates_on_interval() {
    let mut engine = started_engine(19);
    engine.clear_pickups();
    hold_wave(&mut engine);

    let mut collected = false;
    for _ in 0..PELLET_REGEN_TICKS + 2 {
        let snap = engine.tick();
        if snap
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::PelletCollected { .. }))
        {
            collected = true;
        }
    }
    // Either the pellet sits on the board or it landed under the player
    // and was collected immediately.
    assert!(
        !engine.maze().unwrap().pellets.is_empty() || collected,
        "no pellet regenerated after the interval"
    );
}
