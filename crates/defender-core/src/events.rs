//! Events emitted by the simulation for audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::PowerUpEffect;
use crate::types::GridPos;

/// One-shot events for the frontend sound/UI layer, drained every tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    EnemySpawned { cell: GridPos },
    /// An enemy was removed, by projectile or collision.
    EnemyDestroyed,
    /// An enemy reached the base.
    BaseDamaged { amount: i32 },
    PelletCollected { cell: GridPos },
    PowerUpCollected { effect: PowerUpEffect },
    TowerBuilt { cell: GridPos },
    TowerUpgraded { cell: GridPos, level: u32 },
    ProjectileFired { cell: GridPos },
    WaveCompleted { wave: u32 },
    GameOver { score: u32, wave: u32 },
}
