//! Player commands sent from the frontend to the simulation.
//!
//! Commands are validated and queued for processing at the next tick
//! boundary. Continuous input arrives as a per-tick snapshot of pressed
//! logical keys; discrete menu actions are their own commands.

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

/// Snapshot of the pressed logical keys for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// The build/upgrade action key.
    pub build: bool,
}

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Replace the held-keys snapshot used by the player system.
    SetInput { input: InputState },
    /// Apply menu-settable parameters. Rejected outside the menu or
    /// when validation fails.
    Configure { config: GameConfig },
    /// Start a new session from the menu: regenerates the maze and
    /// resets all session state.
    StartGame,
    /// Abandon the running session (escape key).
    EndGame,
    /// Return to the menu from the game-over screen.
    ReturnToMenu,
}
