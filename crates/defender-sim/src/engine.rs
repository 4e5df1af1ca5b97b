//! Simulation engine — the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems, and produces `GameStateSnapshot`s. Completely headless
//! (no frontend dependency), enabling deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use defender_core::commands::{InputState, PlayerCommand};
use defender_core::components::Enemy;
use defender_core::config::GameConfig;
use defender_core::constants::WAVE_CLEAR_SCORE;
use defender_core::enums::GameMode;
use defender_core::events::GameEvent;
use defender_core::state::GameStateSnapshot;
use defender_core::types::SimTime;
use defender_maze::Maze;

use crate::session::SessionState;
use crate::systems;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial menu-settable parameters.
    pub game: GameConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            game: GameConfig::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    maze: Option<Maze>,
    time: SimTime,
    mode: GameMode,
    config: GameConfig,
    input: InputState,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<GameEvent>,
    session: SessionState,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            maze: None,
            time: SimTime::default(),
            mode: GameMode::default(),
            config: config.game,
            input: InputState::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            session: SessionState::default(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.mode == GameMode::Playing {
            self.run_systems();
            self.time.advance();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            self.maze.as_ref(),
            &self.time,
            self.mode,
            &self.config,
            &self.session,
            events,
        )
    }

    /// Get the current game mode.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the active configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::SetInput { input } => {
                self.input = input;
            }
            PlayerCommand::Configure { config } => {
                if self.mode != GameMode::Menu {
                    log::warn!("Configure ignored outside the menu");
                    return;
                }
                match config.validate() {
                    Ok(()) => self.config = config,
                    Err(err) => log::warn!("rejected configuration: {err}"),
                }
            }
            PlayerCommand::StartGame => {
                if self.mode == GameMode::Menu {
                    self.start_session();
                }
            }
            PlayerCommand::EndGame => {
                if self.mode == GameMode::Playing {
                    self.finish_session();
                }
            }
            PlayerCommand::ReturnToMenu => {
                if self.mode == GameMode::GameOver {
                    self.world.clear();
                    self.maze = None;
                    self.session = SessionState::default();
                    self.input = InputState::default();
                    self.mode = GameMode::Menu;
                }
            }
        }
    }

    /// Regenerate the maze and reset everything for a fresh session.
    fn start_session(&mut self) {
        self.world.clear();
        let maze = Maze::generate(
            self.config.maze_width,
            self.config.maze_height,
            self.config.spawn_count,
            &mut self.rng,
        );
        world_setup::spawn_player(&mut self.world, &maze);
        self.maze = Some(maze);
        self.session = SessionState::new(self.config.enemies_per_wave);
        self.time = SimTime::default();
        self.input = InputState::default();
        self.mode = GameMode::Playing;
        log::info!(
            "session started: {}x{} maze, {} spawns, {} enemies in wave 1",
            self.config.maze_width,
            self.config.maze_height,
            self.config.spawn_count,
            self.session.total
        );
    }

    /// Transition to the game-over screen.
    fn finish_session(&mut self) {
        self.mode = GameMode::GameOver;
        self.events.push(GameEvent::GameOver {
            score: self.session.score,
            wave: self.session.wave_number,
        });
        log::info!(
            "game over: score {} on wave {}",
            self.session.score,
            self.session.wave_number
        );
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let maze = match self.maze.as_mut() {
            Some(m) => m,
            None => return,
        };

        // 1. Player movement, build action, pickups
        systems::player::run(
            &mut self.world,
            maze,
            &mut self.session,
            self.input,
            self.time.tick,
            &mut self.rng,
            &mut self.events,
        );
        // 2. Wave grace period and spawn cadence
        systems::spawning::run(
            &mut self.world,
            maze,
            &mut self.session,
            &mut self.rng,
            &mut self.events,
        );
        // 3. Enemy pathing, movement, collisions
        systems::enemy_ai::run(
            &mut self.world,
            maze,
            &mut self.session,
            &mut self.rng,
            &mut self.despawn_buffer,
            &mut self.events,
        );
        // 4. Tower cooldowns and firing
        systems::tower_combat::run(
            &mut self.world,
            maze,
            &self.session,
            self.time.tick,
            &mut self.events,
        );
        // 5. Projectile homing and impact
        systems::projectiles::run(
            &mut self.world,
            &mut self.session,
            &mut self.despawn_buffer,
            &mut self.events,
        );
        // 6. Session-wide effect timers
        self.session.tick_effect_timers();
        // 7. Wave completion and game over
        self.check_wave_and_game_over();
        // 8. Pellet and power-up regeneration
        if let Some(maze) = self.maze.as_mut() {
            systems::regen::run(&self.world, maze, &mut self.session, &mut self.rng);
        }
    }

    /// Advance the wave when cleared; end the session when the base
    /// falls or the final wave is beaten.
    fn check_wave_and_game_over(&mut self) {
        let live_enemies = {
            let mut query = self.world.query::<&Enemy>();
            query.iter().count()
        };

        if self.session.wave_timer == 0
            && self.session.spawned >= self.session.total
            && live_enemies == 0
        {
            self.session.score += WAVE_CLEAR_SCORE;
            self.events.push(GameEvent::WaveCompleted {
                wave: self.session.wave_number,
            });
            log::info!(
                "wave {} cleared, score {}",
                self.session.wave_number,
                self.session.score
            );
            self.session.advance_wave();
        }

        let out_of_waves =
            !self.config.endless() && self.session.wave_number > self.config.wave_count;
        if self.session.base_health <= 0 || out_of_waves {
            self.finish_session();
        }
    }

    /// Get a read-only reference to the session state.
    #[cfg(test)]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Get a mutable reference to the session state (for test setup).
    #[cfg(test)]
    pub fn session_mut(&mut self) -> &mut SessionState {
        &mut self.session
    }

    /// Get a read-only reference to the generated maze.
    #[cfg(test)]
    pub fn maze(&self) -> Option<&Maze> {
        self.maze.as_ref()
    }

    /// Get a mutable reference to the ECS world (for test setup).
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The player entity, if a session is live.
    #[cfg(test)]
    pub fn player_entity(&self) -> Option<hecs::Entity> {
        let mut query = self.world.query::<&defender_core::components::Player>();
        query.iter().next().map(|(entity, _)| entity)
    }

    /// Add resources to the player (for test setup).
    #[cfg(test)]
    pub fn grant_resources(&mut self, amount: u32) {
        for (_, state) in self
            .world
            .query_mut::<&mut defender_core::components::PlayerState>()
        {
            state.resources += amount;
        }
    }

    /// Remove every pellet and power-up from the maze (for tests that
    /// need pickup-free movement or building).
    #[cfg(test)]
    pub fn clear_pickups(&mut self) {
        if let Some(maze) = self.maze.as_mut() {
            maze.pellets.clear();
            maze.powerups.clear();
        }
    }

    /// Spawn an enemy at an exact cell (for tests).
    #[cfg(test)]
    pub fn spawn_test_enemy(
        &mut self,
        cell: defender_core::types::GridPos,
        behavior: defender_core::enums::EnemyBehavior,
        hit_points: i32,
    ) -> hecs::Entity {
        world_setup::spawn_enemy_at(&mut self.world, cell, behavior, hit_points)
    }

    /// Place a tower directly, bypassing cost and rate limits (for tests).
    #[cfg(test)]
    pub fn place_test_tower(&mut self, cell: defender_core::types::GridPos) -> hecs::Entity {
        world_setup::spawn_tower(&mut self.world, cell)
    }
}
