//! Shared state between the game loop thread and its host.

use std::sync::{Arc, Mutex};

use defender_core::commands::PlayerCommand;
use defender_core::state::GameStateSnapshot;

/// Commands sent from the host to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    Player(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// The latest snapshot, updated by the game loop thread after each tick
/// and polled synchronously by the host.
pub type SnapshotCell = Arc<Mutex<Option<GameStateSnapshot>>>;
